//! 表格数据解析
//! 将 CSV / JSON 文本统一解析为"列名 -> 单元格文本"的原始行，类型转换交给加载器

use std::collections::HashMap;

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{DraftError, DraftResult};

/// 表格文本格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableFormat {
    /// 首行为表头
    #[default]
    Csv,
    /// 行对象数组
    Json,
}

impl TableFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            TableFormat::Csv => "csv",
            TableFormat::Json => "json",
        }
    }
}

/// 列名归一化：忽略大小写与 `_`/`-`/空格，使 `damageType` 与 `damage_type` 等价
pub fn normalize_column(name: &str) -> String {
    name.trim()
        .chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

/// 单行原始数据
#[derive(Debug, Clone, Default)]
pub struct RawRow {
    /// 源文件中的行号（CSV 为物理行号，JSON 为数组下标 +1）
    pub line: usize,
    cells: HashMap<String, String>,
    /// 行级解码失败原因（如非 UTF-8 单元格），由加载器作为格式错误行跳过
    invalid: Option<String>,
}

impl RawRow {
    pub fn new(line: usize) -> Self {
        Self { line, cells: HashMap::new(), invalid: None }
    }

    pub fn invalid_reason(&self) -> Option<&str> {
        self.invalid.as_deref()
    }

    pub fn insert(&mut self, column: &str, value: impl Into<String>) {
        self.cells.insert(normalize_column(column), value.into());
    }

    /// 按列名取值（列名写法不敏感），缺失列返回 None
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(&normalize_column(column)).map(String::as_str)
    }

    /// 去除空白后的非空文本
    pub fn non_blank(&self, column: &str) -> Option<&str> {
        self.get(column).map(str::trim).filter(|s| !s.is_empty())
    }
}

/// 解析整张表
pub fn parse_table(text: &str, format: TableFormat) -> DraftResult<Vec<RawRow>> {
    parse_table_bytes(text.as_bytes(), format)
}

/// 解析原始字节表格；CSV 中个别单元格非 UTF-8 只影响所在行
pub fn parse_table_bytes(data: &[u8], format: TableFormat) -> DraftResult<Vec<RawRow>> {
    if data.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    let rows = match format {
        TableFormat::Csv => parse_csv(data)?,
        TableFormat::Json => parse_json(data)?,
    };

    debug!("表格解析完成，格式：{:?}，行数：{}", format, rows.len());
    Ok(rows)
}

fn parse_csv(data: &[u8]) -> DraftResult<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(data);

    let headers: Vec<String> = reader
        .byte_headers()
        .map_err(|e| DraftError::TableParseError(format!("读取CSV表头失败：{}", e)))?
        .iter()
        .map(|header| {
            std::str::from_utf8(header)
                .map(str::to_string)
                .map_err(|e| DraftError::TableParseError(format!("CSV表头不是有效的UTF-8：{}", e)))
        })
        .collect::<DraftResult<_>>()?;

    let mut rows = Vec::new();
    for (idx, record) in reader.byte_records().enumerate() {
        let record = record.map_err(|e| DraftError::TableParseError(format!("读取CSV数据行失败：{}", e)))?;
        // 表头占第 1 行
        let line = record.position().map(|p| p.line() as usize).unwrap_or(idx + 2);

        let mut row = RawRow::new(line);
        for (header, cell) in headers.iter().zip(record.iter()) {
            match std::str::from_utf8(cell) {
                Ok(cell) => row.insert(header, cell),
                Err(e) => {
                    row.invalid = Some(format!("列[{}]不是有效的UTF-8：{}", header, e));
                    break;
                }
            }
        }
        rows.push(row);
    }

    Ok(rows)
}

fn parse_json(data: &[u8]) -> DraftResult<Vec<RawRow>> {
    let objects: Vec<Map<String, Value>> = serde_json::from_slice(data)?;

    let rows = objects
        .into_iter()
        .enumerate()
        .map(|(idx, object)| {
            let mut row = RawRow::new(idx + 1);
            for (key, value) in object {
                let cell = match value {
                    Value::Null => continue,
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                row.insert(&key, cell);
            }
            row
        })
        .collect();

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv_trims_and_normalizes_headers() {
        let text = "name, damage_type ,price\n  Miya , physical ,0\nEudora,magic\n";
        let rows = parse_table(text, TableFormat::Csv).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("name"), Some("Miya"));
        assert_eq!(rows[0].get("damageType"), Some("physical"));
        assert_eq!(rows[0].line, 2);
        // 短行缺失的列视为不存在
        assert_eq!(rows[1].get("price"), None);
    }

    #[test]
    fn test_parse_json_stringifies_scalars() {
        let text = r#"[{"name": "Blade", "price": 2100, "critChance": 0.2, "note": null}]"#;
        let rows = parse_table(text, TableFormat::Json).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("price"), Some("2100"));
        assert_eq!(rows[0].get("crit_chance"), Some("0.2"));
        assert_eq!(rows[0].get("note"), None);
        assert_eq!(rows[0].line, 1);
    }

    #[test]
    fn test_parse_empty_text() {
        assert!(parse_table("   \n", TableFormat::Json).unwrap().is_empty());
        assert!(parse_table("", TableFormat::Csv).unwrap().is_empty());
    }

    #[test]
    fn test_parse_invalid_json() {
        let err = parse_table("{not json", TableFormat::Json).unwrap_err();
        assert!(matches!(err, DraftError::JsonError(_)));
    }

    #[test]
    fn test_non_utf8_cell_marks_only_its_row() {
        let mut data = b"name,price,description\nBlade,2100,sharp\nCaf".to_vec();
        data.push(0xE9);
        data.extend_from_slice(b" Wand,1800,latin1\nBoots,500,fast\n");

        let rows = parse_table_bytes(&data, TableFormat::Csv).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].invalid_reason(), None);
        assert_eq!(rows[0].get("name"), Some("Blade"));
        assert_eq!(rows[1].line, 3);
        assert!(rows[1].invalid_reason().is_some());
        assert_eq!(rows[2].get("name"), Some("Boots"));
    }
}
