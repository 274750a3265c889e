//! 推荐引擎：整合目录缓存与各评分器，对外提供推荐接口
use std::sync::Arc;

use super::items::{BuildSuggestion, ItemScorer, ValuedItem};
use super::partners::{PartnerRecommendation, PartnerScorer};
use crate::catalog::model::{HeroRecord, ItemRecord};
use crate::catalog::{CatalogCache, SnapshotManager};
use crate::config::GlobalConfig;
use crate::error::{DraftError, DraftResult};
use crate::utils::classifier::DamageType;

/// 推荐引擎
#[derive(Debug, Clone)]
pub struct DraftEngine {
    cache: Arc<CatalogCache>,
    config: GlobalConfig,
}

impl DraftEngine {
    /// 创建引擎（惰性加载，首次推荐时读取数据源）
    pub fn new(config: GlobalConfig) -> Self {
        let cache = Arc::new(CatalogCache::new(config.source.clone()));
        Self { cache, config }
    }

    /// 使用外部持有的缓存创建引擎
    pub fn with_cache(config: GlobalConfig, cache: Arc<CatalogCache>) -> Self {
        Self { cache, config }
    }

    /// 创建引擎并立即加载全部表
    pub fn init(config: GlobalConfig) -> DraftResult<Self> {
        let engine = Self::new(config);
        engine.cache.reload()?;
        Ok(engine)
    }

    pub fn cache(&self) -> &Arc<CatalogCache> {
        &self.cache
    }

    pub fn config(&self) -> &GlobalConfig {
        &self.config
    }

    /// 出装建议
    pub fn suggest_build(&self, role: &str, damage_type: DamageType, phase: &str) -> DraftResult<BuildSuggestion> {
        let items = self.cache.items()?;
        Ok(self.item_scorer(&items).suggest_build(role, damage_type, phase))
    }

    /// 预算内装备
    pub fn budget_items(&self, damage_type: DamageType, max_price: f64, limit: usize) -> DraftResult<Vec<ItemRecord>> {
        let items = self.cache.items()?;
        Ok(self.item_scorer(&items).budget_items(damage_type, max_price, limit))
    }

    /// 纯性价比排行
    pub fn cost_effective_items(&self, limit: usize) -> DraftResult<Vec<ValuedItem>> {
        let items = self.cache.items()?;
        Ok(self.item_scorer(&items).cost_effective_items(limit))
    }

    /// 按英雄名查找（大小写敏感）
    pub fn find_hero(&self, name: &str) -> DraftResult<HeroRecord> {
        self.cache
            .heroes()?
            .iter()
            .find(|hero| hero.name == name)
            .cloned()
            .ok_or_else(|| DraftError::InvalidInput(format!("未知英雄：{}", name)))
    }

    /// 为指定英雄推荐搭档，`limit` 缺省取配置值
    pub fn recommend_partners(&self, hero_name: &str, limit: Option<usize>) -> DraftResult<Vec<PartnerRecommendation>> {
        let selected = self.find_hero(hero_name)?;
        let heroes = self.cache.heroes()?;
        let index = self.cache.rule_index()?;

        let limit = limit.unwrap_or(self.config.partner_limit);
        Ok(PartnerScorer::new(&heroes, &index).recommend(&selected, limit))
    }

    /// 将当前目录写入配置的快照路径
    pub fn save_snapshot(&self) -> DraftResult<()> {
        let snapshot = self.cache.snapshot()?;
        SnapshotManager::save(&self.config.snapshot_path, &snapshot)
    }

    /// 重新加载目录（管理端编辑数据后调用）
    pub fn reload(&self) -> DraftResult<()> {
        self.cache.reload()
    }

    /// 清空目录缓存
    pub fn invalidate(&self) {
        self.cache.invalidate()
    }

    fn item_scorer<'a>(&self, items: &'a [ItemRecord]) -> ItemScorer<'a> {
        ItemScorer::new(items).with_slot_limits(self.config.penetration_limit, self.config.core_limit)
    }
}
