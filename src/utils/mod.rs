//! 工具模块：单元格转换与分类启发式
pub mod classifier;
pub mod coerce;

// 导出核心接口
pub use self::classifier::{DamageType, MOVEMENT_CATEGORY, primary_role};
pub use self::coerce::{DEFAULT_STAT_VALUE, clean_text, coerce_f64, coerce_i32};
