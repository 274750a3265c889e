//! 全局配置管理,存储所有可配置项

use std::path::PathBuf;

use crate::catalog::CatalogSource;

/// 出装推荐：穿透槽位默认候选数
pub const DEFAULT_PENETRATION_LIMIT: usize = 3;
/// 出装推荐：核心装备槽位默认候选数
pub const DEFAULT_CORE_LIMIT: usize = 6;
/// 搭档推荐默认条数
pub const DEFAULT_PARTNER_LIMIT: usize = 4;

/// 全局配置
#[derive(Debug, Clone)]
pub struct GlobalConfig {
    // 目录数据源
    pub source: CatalogSource,
    // MessagePack 快照路径（CLI snapshot 子命令写入位置）
    pub snapshot_path: PathBuf,
    // 超时配置（单位：秒）
    pub http_timeout: u64,
    // 出装推荐各槽位候选数
    pub penetration_limit: usize,
    pub core_limit: usize,
    // 搭档推荐条数
    pub partner_limit: usize,
    // 是否启用详细日志
    pub verbose: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            source: CatalogSource::Directory(PathBuf::from("data")),
            snapshot_path: PathBuf::from("herodraft_catalog.mp"),
            http_timeout: 30,
            penetration_limit: DEFAULT_PENETRATION_LIMIT,
            core_limit: DEFAULT_CORE_LIMIT,
            partner_limit: DEFAULT_PARTNER_LIMIT,
            verbose: false,
        }
    }
}

impl GlobalConfig {
    /// 默认日志过滤规则（未设置 RUST_LOG 时使用）
    pub fn log_filter(&self) -> &'static str {
        if self.verbose { "herodraft=debug" } else { "herodraft=info" }
    }
}

/// 配置管理器
pub struct ConfigManager;

impl ConfigManager {
    /// 获取默认配置
    pub fn get_default() -> GlobalConfig {
        GlobalConfig::default()
    }

    /// 自定义配置
    pub fn custom() -> CustomConfigBuilder {
        CustomConfigBuilder::new()
    }
}

/// 配置构建器（便于自定义配置）
#[derive(Debug, Clone)]
pub struct CustomConfigBuilder {
    config: GlobalConfig,
}

impl Default for CustomConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: GlobalConfig::default(),
        }
    }

    pub fn source(mut self, source: CatalogSource) -> Self {
        self.config.source = source;
        self
    }

    pub fn data_dir(mut self, dir: PathBuf) -> Self {
        self.config.source = CatalogSource::Directory(dir);
        self
    }

    pub fn snapshot_path(mut self, path: PathBuf) -> Self {
        self.config.snapshot_path = path;
        self
    }

    pub fn http_timeout(mut self, timeout: u64) -> Self {
        self.config.http_timeout = timeout;
        self
    }

    pub fn penetration_limit(mut self, limit: usize) -> Self {
        self.config.penetration_limit = limit;
        self
    }

    pub fn core_limit(mut self, limit: usize) -> Self {
        self.config.core_limit = limit;
        self
    }

    pub fn partner_limit(mut self, limit: usize) -> Self {
        self.config.partner_limit = limit;
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.config.verbose = verbose;
        self
    }

    pub fn build(self) -> GlobalConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides_defaults() {
        let config = ConfigManager::custom()
            .data_dir(PathBuf::from("/tmp/catalog"))
            .core_limit(2)
            .partner_limit(1)
            .verbose(true)
            .build();

        assert!(matches!(config.source, CatalogSource::Directory(ref p) if p == &PathBuf::from("/tmp/catalog")));
        assert_eq!(config.core_limit, 2);
        assert_eq!(config.partner_limit, 1);
        // 未覆盖的项保持默认值
        assert_eq!(config.penetration_limit, DEFAULT_PENETRATION_LIMIT);
        assert_eq!(config.http_timeout, 30);
        assert!(config.verbose);
    }

    #[test]
    fn test_log_filter_follows_verbose() {
        assert_eq!(ConfigManager::get_default().log_filter(), "herodraft=info");
        assert_eq!(ConfigManager::custom().verbose(true).build().log_filter(), "herodraft=debug");
    }
}
