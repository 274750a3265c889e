//! 目录模块：负责英雄/装备/规则表的加载、缓存、快照与数据模型定义
pub mod model;
pub mod table;
pub mod loader;
pub mod cache;
pub mod snapshot;
pub mod remote;

// 导出核心接口
pub use self::model::{CatalogSnapshot, DraftRule, HeroRecord, ItemRecord, SynergyRule};
pub use self::table::TableFormat;
pub use self::loader::{CatalogLoader, CatalogSource, CatalogTable, InlineTables, ParsedTable};
pub use self::cache::CatalogCache;
pub use self::snapshot::SnapshotManager;
pub use self::remote::RemoteTableFetcher;
