//! 索引模块：将扁平规则表转换为评分使用的查找结构
pub mod builder;
pub mod rule_index;

pub use self::rule_index::{DEFAULT_HERO_PRIORITY, RuleIndex};
