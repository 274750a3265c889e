//! 搭档评分器
//! 对已选英雄的每个兼容定位挑选一名得分最高的搭档：
//! 总分 = 基础优先级 + 伤害类型多样性加成 + 协同加成

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use crate::catalog::model::HeroRecord;
use crate::config::DEFAULT_PARTNER_LIMIT;
use crate::index::RuleIndex;

/// 候选与已选英雄伤害类型不同时的固定加成
pub const DIVERSITY_BONUS: i32 = 2;

/// 单条搭档推荐
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerRecommendation {
    pub hero: HeroRecord,
    /// 推荐所属的兼容定位
    pub role: String,
    pub base_priority: i32,
    pub diversity_bonus: i32,
    pub synergy_bonus: i32,
    pub total_score: i32,
}

/// 搭档评分器
#[derive(Debug, Clone, Copy)]
pub struct PartnerScorer<'a> {
    heroes: &'a [HeroRecord],
    index: &'a RuleIndex,
}

impl<'a> PartnerScorer<'a> {
    pub fn new(heroes: &'a [HeroRecord], index: &'a RuleIndex) -> Self {
        Self { heroes, index }
    }

    /// 计算单个候选在指定定位下的得分
    pub fn score(&self, selected: &HeroRecord, candidate: &HeroRecord, role: &str) -> PartnerRecommendation {
        let base_priority = self.index.priority(role, &candidate.name);
        let diversity_bonus = if candidate.damage_class() != selected.damage_class() {
            DIVERSITY_BONUS
        } else {
            0
        };
        let synergy_bonus = self.index.synergy_bonus(selected, candidate);

        PartnerRecommendation {
            hero: candidate.clone(),
            role: role.to_string(),
            base_priority,
            diversity_bonus,
            synergy_bonus,
            total_score: base_priority + diversity_bonus + synergy_bonus,
        }
    }

    /// 按兼容定位顺序，每个定位推荐一名搭档，最多 `limit` 条
    pub fn recommend(&self, selected: &HeroRecord, limit: usize) -> Vec<PartnerRecommendation> {
        let primary_role = selected.primary_role();
        let mut recommendations = Vec::new();
        let mut seen_roles = HashSet::new();

        for role in self.index.compatible_roles(primary_role) {
            if recommendations.len() >= limit {
                break;
            }
            // 兼容表中重复出现的定位只推荐一次
            if !seen_roles.insert(role.as_str()) {
                continue;
            }

            let mut candidates: Vec<PartnerRecommendation> = self
                .heroes
                .iter()
                .filter(|hero| hero.primary_role() == role.as_str() && hero.name != selected.name)
                .map(|hero| self.score(selected, hero, role))
                .collect();

            // 稳定排序：同分时目录中靠前者胜出
            candidates.sort_by(|a, b| b.total_score.cmp(&a.total_score));

            if let Some(best) = candidates.into_iter().next() {
                debug!("定位 {} 推荐 {}，总分 {}", role, best.hero.name, best.total_score);
                recommendations.push(best);
            }
        }

        recommendations
    }
}

/// 为已选英雄推荐搭档（默认最多 4 条）
pub fn recommend_partners(
    selected: &HeroRecord,
    heroes: &[HeroRecord],
    index: &RuleIndex,
    limit: Option<usize>,
) -> Vec<PartnerRecommendation> {
    PartnerScorer::new(heroes, index).recommend(selected, limit.unwrap_or(DEFAULT_PARTNER_LIMIT))
}
