//! 目录缓存
//! 进程内只读缓存：首次访问时加载，之后返回同一份数据，仅在显式 invalidate / reload 时失效

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use super::loader::{CatalogLoader, CatalogSource, ParsedTable};
use super::model::{CatalogSnapshot, DraftRule, HeroRecord, ItemRecord};
use crate::error::DraftResult;
use crate::index::RuleIndex;

type Slot<T> = RwLock<Option<Arc<T>>>;

/// 目录缓存，每个实例独立持有数据源与已加载数据
#[derive(Debug)]
pub struct CatalogCache {
    source: CatalogSource,
    heroes: Slot<Vec<HeroRecord>>,
    items: Slot<Vec<ItemRecord>>,
    rules: Slot<Vec<DraftRule>>,
    rule_index: Slot<RuleIndex>,
    malformed_rows: AtomicUsize,
}

impl CatalogCache {
    pub fn new(source: CatalogSource) -> Self {
        Self {
            source,
            heroes: RwLock::new(None),
            items: RwLock::new(None),
            rules: RwLock::new(None),
            rule_index: RwLock::new(None),
            malformed_rows: AtomicUsize::new(0),
        }
    }

    pub fn source(&self) -> &CatalogSource {
        &self.source
    }

    /// 英雄列表（重复调用返回同一个 Arc）
    pub fn heroes(&self) -> DraftResult<Arc<Vec<HeroRecord>>> {
        get_or_load(&self.heroes, || {
            CatalogLoader::load_heroes(&self.source).map(|parsed| self.take_records(parsed))
        })
    }

    /// 装备列表
    pub fn items(&self) -> DraftResult<Arc<Vec<ItemRecord>>> {
        get_or_load(&self.items, || {
            CatalogLoader::load_items(&self.source).map(|parsed| self.take_records(parsed))
        })
    }

    /// 规则列表
    pub fn rules(&self) -> DraftResult<Arc<Vec<DraftRule>>> {
        get_or_load(&self.rules, || {
            CatalogLoader::load_rules(&self.source).map(|parsed| self.take_records(parsed))
        })
    }

    /// 规则索引（由缓存中的规则列表构建）
    pub fn rule_index(&self) -> DraftResult<Arc<RuleIndex>> {
        get_or_load(&self.rule_index, || {
            let rules = self.rules()?;
            Ok(RuleIndex::build(&rules))
        })
    }

    /// 自上次失效以来被跳过的格式错误行数
    pub fn malformed_rows(&self) -> usize {
        self.malformed_rows.load(Ordering::Relaxed)
    }

    /// 清空所有已加载数据（幂等）
    pub fn invalidate(&self) {
        clear(&self.heroes);
        clear(&self.items);
        clear(&self.rules);
        clear(&self.rule_index);
        self.malformed_rows.store(0, Ordering::Relaxed);
        debug!("目录缓存已清空，数据源：{}", self.source);
    }

    /// 清空后立即重新加载全部表
    pub fn reload(&self) -> DraftResult<()> {
        self.invalidate();

        let heroes = self.heroes()?;
        let items = self.items()?;
        let rules = self.rules()?;
        self.rule_index()?;

        debug!(
            "目录重新加载完成，英雄{}条，装备{}条，规则{}条，跳过{}行",
            heroes.len(),
            items.len(),
            rules.len(),
            self.malformed_rows()
        );
        Ok(())
    }

    /// 当前数据的快照副本
    pub fn snapshot(&self) -> DraftResult<CatalogSnapshot> {
        Ok(CatalogSnapshot {
            heroes: self.heroes()?.as_ref().clone(),
            items: self.items()?.as_ref().clone(),
            rules: self.rules()?.as_ref().clone(),
        })
    }

    fn take_records<T>(&self, parsed: ParsedTable<T>) -> Vec<T> {
        self.malformed_rows.fetch_add(parsed.malformed.len(), Ordering::Relaxed);
        parsed.records
    }
}

fn get_or_load<T>(slot: &Slot<T>, load: impl FnOnce() -> DraftResult<T>) -> DraftResult<Arc<T>> {
    if let Some(cached) = slot.read().unwrap_or_else(PoisonError::into_inner).as_ref() {
        return Ok(Arc::clone(cached));
    }

    let mut guard = slot.write().unwrap_or_else(PoisonError::into_inner);
    // 等待写锁期间可能已被其他线程加载
    if let Some(cached) = guard.as_ref() {
        return Ok(Arc::clone(cached));
    }

    let loaded = Arc::new(load()?);
    *guard = Some(Arc::clone(&loaded));
    Ok(loaded)
}

fn clear<T>(slot: &Slot<T>) {
    *slot.write().unwrap_or_else(PoisonError::into_inner) = None;
}
