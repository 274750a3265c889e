//! 规则索引模型
//! 定位兼容表、定位内优先级表、协同加成列表三种查找结构

use std::collections::HashMap;

use crate::catalog::model::{HeroRecord, SynergyRule};

/// 英雄在某定位下没有显式优先级时的默认值（1-10 分制的中位）
pub const DEFAULT_HERO_PRIORITY: i32 = 5;

/// 规则索引
#[derive(Debug, Clone, Default)]
pub struct RuleIndex {
    /// 主定位 -> 兼容定位（保持规则表中的出现顺序）
    pub role_compatibility: HashMap<String, Vec<String>>,
    /// 定位 -> 英雄名 -> 优先级
    pub hero_priority: HashMap<String, HashMap<String, i32>>,
    /// 协同加成规则（保持出现顺序）
    pub synergy: Vec<SynergyRule>,
    /// 标签（英雄名或定位名，取自规则两侧） -> synergy 下标
    pub(super) synergy_lookup: HashMap<String, Vec<usize>>,
}

impl RuleIndex {
    /// 主定位的兼容定位列表，无规则时为空
    pub fn compatible_roles(&self, primary_role: &str) -> &[String] {
        self.role_compatibility
            .get(primary_role)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// 英雄在指定定位下的优先级，缺省为 [`DEFAULT_HERO_PRIORITY`]
    pub fn priority(&self, role: &str, hero_name: &str) -> i32 {
        self.hero_priority
            .get(role)
            .and_then(|heroes| heroes.get(hero_name))
            .copied()
            .unwrap_or(DEFAULT_HERO_PRIORITY)
    }

    /// 配对的协同加成：所有命中规则中的最大值，无命中为 0
    ///
    /// 命中规则的某一侧必然是已选英雄的名称或主定位，
    /// 因此只需扫描以这两个标签建立索引的规则
    pub fn synergy_bonus(&self, selected: &HeroRecord, candidate: &HeroRecord) -> i32 {
        let mut best = 0;

        for label in [selected.name.as_str(), selected.primary_role()] {
            let Some(indices) = self.synergy_lookup.get(label) else {
                continue;
            };
            for &idx in indices {
                let rule = &self.synergy[idx];
                if rule.matches(selected, candidate) {
                    best = best.max(rule.bonus);
                }
            }
        }

        best
    }
}
