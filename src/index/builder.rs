//! 规则索引构建器
//! 单次遍历规则列表，按规则类型分派到三种查找结构

use std::time::Instant;

use tracing::debug;

use super::rule_index::RuleIndex;
use crate::catalog::model::DraftRule;

/// 构建统计
#[derive(Debug, Default)]
struct BuildStats {
    compatibility_count: usize,
    priority_count: usize,
    priority_overwrites: usize,
    synergy_count: usize,
}

impl RuleIndex {
    /// 由规则列表构建索引
    ///
    /// 不校验规则中引用的英雄/定位是否存在，无法解析的引用在评分时自然不命中
    pub fn build(rules: &[DraftRule]) -> Self {
        let start = Instant::now();
        let mut index = RuleIndex::default();
        let mut stats = BuildStats::default();

        for rule in rules {
            match rule {
                DraftRule::RoleCompatibility { primary_role, compatible_role } => {
                    index
                        .role_compatibility
                        .entry(primary_role.clone())
                        .or_default()
                        .push(compatible_role.clone());
                    stats.compatibility_count += 1;
                }
                DraftRule::HeroPriority { role, hero_name, priority } => {
                    // 重复 (定位, 英雄) 以最后一条为准，属于源数据问题
                    let previous = index
                        .hero_priority
                        .entry(role.clone())
                        .or_default()
                        .insert(hero_name.clone(), *priority);
                    if let Some(previous) = previous {
                        debug!("优先级重复：{}/{}，{} 覆盖为 {}", role, hero_name, previous, priority);
                        stats.priority_overwrites += 1;
                    }
                    stats.priority_count += 1;
                }
                DraftRule::Synergy(synergy) => {
                    let idx = index.synergy.len();
                    index.synergy_lookup.entry(synergy.selected_hero.clone()).or_default().push(idx);
                    if synergy.partner != synergy.selected_hero {
                        index.synergy_lookup.entry(synergy.partner.clone()).or_default().push(idx);
                    }
                    index.synergy.push(synergy.clone());
                    stats.synergy_count += 1;
                }
            }
        }

        debug!(
            "✅ 规则索引构建完成，耗时{:?}，兼容{}条、优先级{}条（覆盖{}条）、协同{}条",
            start.elapsed(),
            stats.compatibility_count,
            stats.priority_count,
            stats.priority_overwrites,
            stats.synergy_count
        );

        index
    }
}
