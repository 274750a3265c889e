//! 表格单元格转换工具
//! 数值列统一回退为 0，文本列统一去除首尾空白

/// 数值列缺失或非数值时的回退值（0 表示"无此属性"，不参与任何阈值判断）
pub const DEFAULT_STAT_VALUE: f64 = 0.0;

/// 解析浮点数值列，缺失、非数值、非有限值均回退为 [`DEFAULT_STAT_VALUE`]
pub fn coerce_f64(raw: Option<&str>) -> f64 {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(DEFAULT_STAT_VALUE)
}

/// 解析整数值列（优先级、加成分），允许 "8.0" 这类浮点写法
pub fn coerce_i32(raw: Option<&str>) -> i32 {
    let Some(s) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return 0;
    };

    if let Ok(v) = s.parse::<i32>() {
        return v;
    }

    // 浮点写法截断取整
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= i32::MIN as f64 && v <= i32::MAX as f64 => v.trunc() as i32,
        _ => 0,
    }
}

/// 文本列去除首尾空白，缺失时返回空串
pub fn clean_text(raw: Option<&str>) -> String {
    raw.map(|s| s.trim().to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_f64_fallbacks() {
        assert_eq!(coerce_f64(Some(" 42.5 ")), 42.5);
        assert_eq!(coerce_f64(Some("")), 0.0);
        assert_eq!(coerce_f64(Some("n/a")), 0.0);
        assert_eq!(coerce_f64(Some("NaN")), 0.0);
        assert_eq!(coerce_f64(None), 0.0);
    }

    #[test]
    fn test_coerce_i32_accepts_float_notation() {
        assert_eq!(coerce_i32(Some("8")), 8);
        assert_eq!(coerce_i32(Some("8.0")), 8);
        assert_eq!(coerce_i32(Some("-3")), -3);
        assert_eq!(coerce_i32(Some("high")), 0);
        assert_eq!(coerce_i32(None), 0);
    }

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text(Some("  Miya \t")), "Miya");
        assert_eq!(clean_text(None), "");
    }
}
