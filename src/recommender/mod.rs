//! 推荐模块：装备评分、搭档评分与引擎门面
pub mod engine;
pub mod items;
pub mod partners;

// 导出核心接口
pub use self::engine::DraftEngine;
pub use self::items::{BuildMeta, BuildSuggestion, ItemScorer, ValuedItem};
pub use self::partners::{DIVERSITY_BONUS, PartnerRecommendation, PartnerScorer, recommend_partners};
