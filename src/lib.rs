//! herodraft - 英雄/装备目录与选人出装推荐引擎

// 导出全局错误类型
pub use self::error::{DraftError, DraftResult};

// 导出配置模块
pub use self::config::{GlobalConfig, ConfigManager, CustomConfigBuilder};

// 导出目录模块核心接口
pub use self::catalog::{
    HeroRecord, ItemRecord, DraftRule, SynergyRule, CatalogSnapshot,
    CatalogLoader, CatalogSource, CatalogTable, InlineTables, TableFormat,
    CatalogCache, SnapshotManager, RemoteTableFetcher,
};

// 导出索引模块核心接口
pub use self::index::{RuleIndex, DEFAULT_HERO_PRIORITY};

// 导出工具模块核心接口
pub use self::utils::{DamageType, primary_role};

// 导出推荐模块核心接口
pub use self::recommender::{
    DraftEngine,
    ItemScorer,
    PartnerScorer,
    BuildSuggestion,
    BuildMeta,
    ValuedItem,
    PartnerRecommendation,
    recommend_partners,
};

// 声明所有子模块
pub mod config;
pub mod error;
pub mod catalog;
pub mod index;
pub mod utils;
pub mod recommender;
