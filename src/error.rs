//! 全局错误类型定义

use thiserror::Error;
use serde_json::Error as SerdeJsonError;
use std::io::Error as IoError;
use url::ParseError as UrlParseError;

#[derive(Error, Debug)]
pub enum DraftError {
    // 数据源相关错误
    #[error("数据源不可用[{source_name}]：{reason}")]
    SourceUnavailable { source_name: String, reason: String },
    #[error("数据行格式错误[{table}:{line}]：{reason}")]
    MalformedRow { table: &'static str, line: usize, reason: String },
    #[error("表格解析失败：{0}")]
    TableParseError(String),
    #[error("快照读写失败：{0}")]
    SnapshotError(String),

    // 网络相关错误
    #[error("网络请求失败：{0}")]
    HttpError(#[from] reqwest::Error),

    // 序列化/反序列化错误
    #[error("JSON解析失败：{0}")]
    JsonError(#[from] SerdeJsonError),

    // 基础错误
    #[error("IO操作失败：{0}")]
    IoError(#[from] IoError),
    #[error("URL解析失败：{0}")]
    UrlError(#[from] UrlParseError),
    #[error("无效输入：{0}")]
    InvalidInput(String),
}

impl DraftError {
    /// 构造数据源不可用错误
    pub fn unavailable(source_name: impl Into<String>, reason: impl ToString) -> Self {
        DraftError::SourceUnavailable {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }

    /// 是否为可恢复的行级错误
    pub fn is_recoverable(&self) -> bool {
        matches!(self, DraftError::MalformedRow { .. })
    }
}

// 全局Result类型
pub type DraftResult<T> = Result<T, DraftError>;
