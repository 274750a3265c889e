//! 远程表格拉取
//! 从基础URL下拉取三张CSV表，结果作为内存表格交给加载器

use std::error::Error as StdError;
use std::time::Duration;

use reqwest::Client;
use tracing::debug;
use url::Url;

use super::loader::{CatalogTable, InlineTables};
use super::table::TableFormat;
use crate::config::GlobalConfig;
use crate::error::{DraftError, DraftResult};

/// 远程表格拉取器
#[derive(Debug, Clone)]
pub struct RemoteTableFetcher {
    client: Client,
    base_url: Url,
    timeout: Duration,
}

impl RemoteTableFetcher {
    /// 创建拉取器，超时单位为秒
    pub fn new(base_url: &str, timeout_secs: u64) -> DraftResult<Self> {
        // 补齐结尾的 `/`，否则 join 会替换最后一段路径
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        let base_url = Url::parse(&normalized)?;

        let timeout = Duration::from_secs(timeout_secs);
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { client, base_url, timeout })
    }

    /// 按全局配置中的 HTTP 超时创建拉取器
    pub fn from_config(base_url: &str, config: &GlobalConfig) -> DraftResult<Self> {
        Self::new(base_url, config.http_timeout)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// 表的完整URL
    pub fn table_url(&self, table: CatalogTable) -> DraftResult<Url> {
        let file_name = format!("{}.{}", table.file_stem(), TableFormat::Csv.extension());
        Ok(self.base_url.join(&file_name)?)
    }

    /// 拉取单张表文本
    pub async fn fetch_table(&self, table: CatalogTable) -> DraftResult<String> {
        let url = self.table_url(table)?;
        debug!("开始拉取 [{}]，URL：{}", table, url);

        let response = self
            .client
            .get(url.clone())
            .header("User-Agent", "herodraft/0.1.0")
            .send()
            .await
            .map_err(|e| DraftError::unavailable(url.as_str(), error_chain(&e)))?;

        if !response.status().is_success() {
            return Err(DraftError::unavailable(
                url.as_str(),
                format!("返回状态码 {}", response.status()),
            ));
        }

        let text = response
            .text()
            .await
            .map_err(|e| DraftError::unavailable(url.as_str(), error_chain(&e)))?;
        debug!("拉取 [{}] 成功，{} 字节", table, text.len());
        Ok(text)
    }

    /// 并发拉取三张表
    pub async fn fetch_all(&self) -> DraftResult<InlineTables> {
        let (heroes, items, rules) = tokio::try_join!(
            self.fetch_table(CatalogTable::Heroes),
            self.fetch_table(CatalogTable::Items),
            self.fetch_table(CatalogTable::Rules),
        )?;

        Ok(InlineTables { format: TableFormat::Csv, heroes, items, rules })
    }
}

/// 展开 reqwest 错误的完整原因链（连接被拒、TLS 失败等底层原因）
fn error_chain(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str("：");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
