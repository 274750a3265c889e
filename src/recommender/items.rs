//! 装备评分器
//! 按定位、伤害类型、预算筛选并排序装备，生成出装建议

use serde::Serialize;

use crate::catalog::model::ItemRecord;
use crate::config::{DEFAULT_CORE_LIMIT, DEFAULT_PENETRATION_LIMIT};
use crate::utils::classifier::{self, DamageType};

/// 出装建议
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildSuggestion {
    pub boots: Vec<ItemRecord>,
    pub penetration: Vec<ItemRecord>,
    pub core: Vec<ItemRecord>,
    /// 鞋子、穿透、两件核心装备，按槽位固定顺序，缺失槽位省略
    pub suggested: Vec<ItemRecord>,
    pub meta: BuildMeta,
}

/// 出装建议元信息
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildMeta {
    pub role: String,
    pub damage_type: DamageType,
    pub phase: String,
    pub total_price: f64,
}

/// 带性价比的装备
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuedItem {
    pub item: ItemRecord,
    pub value_per_gold: f64,
}

/// 装备评分器，所有方法均为纯函数
#[derive(Debug, Clone, Copy)]
pub struct ItemScorer<'a> {
    items: &'a [ItemRecord],
    penetration_limit: usize,
    core_limit: usize,
}

impl<'a> ItemScorer<'a> {
    pub fn new(items: &'a [ItemRecord]) -> Self {
        Self {
            items,
            penetration_limit: DEFAULT_PENETRATION_LIMIT,
            core_limit: DEFAULT_CORE_LIMIT,
        }
    }

    /// 出装建议中穿透 / 核心槽位的候选数
    pub fn with_slot_limits(mut self, penetration_limit: usize, core_limit: usize) -> Self {
        self.penetration_limit = penetration_limit;
        self.core_limit = core_limit;
        self
    }

    /// 鞋子候选
    ///
    /// 注意：物理/法术分支保持目录原始顺序，不按价格排序；
    /// 只有回退分支（其他伤害类型）按价格升序。这是既定行为，不要"修正"。
    pub fn boots(&self, damage_type: DamageType) -> Vec<ItemRecord> {
        let all_boots = self.items.iter().filter(|item| item.is_boots());

        match damage_type {
            DamageType::Magic => all_boots
                .filter(|item| item.magic_power > 0.0 || classifier::has_arcane_name(&item.name))
                .cloned()
                .collect(),
            DamageType::Physical => all_boots
                .filter(|item| {
                    item.attack > 0.0
                        || item.attack_speed > 0.0
                        || classifier::has_physical_boots_name(&item.name)
                })
                .cloned()
                .collect(),
            DamageType::Mixed | DamageType::Unknown => sorted_by_price(all_boots),
        }
    }

    /// 穿透装备，价格升序
    pub fn penetration_items(&self, damage_type: DamageType, limit: usize) -> Vec<ItemRecord> {
        let candidates: Vec<&ItemRecord> = match damage_type {
            DamageType::Physical => self.items.iter().filter(|item| item.armor_penetration > 0.0).collect(),
            DamageType::Magic => self
                .items
                .iter()
                .filter(|item| item.magic_power > 0.0 && classifier::mentions_magic_penetration(&item.description))
                .collect(),
            DamageType::Mixed | DamageType::Unknown => return Vec::new(),
        };

        truncate(sorted_by_price(candidates), limit)
    }

    /// 核心装备：按定位筛选、排除鞋子，价格升序
    ///
    /// 伤害类型不参与定位筛选表
    pub fn core_items(&self, role: &str, _damage_type: DamageType, limit: usize) -> Vec<ItemRecord> {
        let candidates = self
            .items
            .iter()
            .filter(|item| !item.is_boots() && keeps_for_role(role, item));

        truncate(sorted_by_price(candidates), limit)
    }

    /// 出装建议
    pub fn suggest_build(&self, role: &str, damage_type: DamageType, phase: &str) -> BuildSuggestion {
        let boots = self.boots(damage_type);
        let penetration = self.penetration_items(damage_type, self.penetration_limit);
        let core = self.core_items(role, damage_type, self.core_limit);

        let suggested: Vec<ItemRecord> = boots
            .first()
            .into_iter()
            .chain(penetration.first())
            .chain(core.iter().take(2))
            .cloned()
            .collect();
        let total_price: f64 = suggested.iter().map(|item| item.price).sum();

        BuildSuggestion {
            boots,
            penetration,
            core,
            suggested,
            meta: BuildMeta {
                role: role.to_string(),
                damage_type,
                phase: phase.to_string(),
                total_price,
            },
        }
    }

    /// 预算内装备，按"属性价值 / 价格"降序
    pub fn budget_items(&self, damage_type: DamageType, max_price: f64, limit: usize) -> Vec<ItemRecord> {
        let candidates = self
            .items
            .iter()
            .filter(|item| item.price > 0.0 && item.price <= max_price)
            .filter(|item| keeps_for_budget(damage_type, item))
            .map(|item| (budget_value(damage_type, item) / item.price, item));

        truncate(sorted_by_ratio(candidates), limit)
    }

    /// 纯性价比排行：所有非鞋子、非免费装备按综合属性价值 / 价格降序
    pub fn cost_effective_items(&self, limit: usize) -> Vec<ValuedItem> {
        let mut ranked: Vec<(f64, &ItemRecord)> = self
            .items
            .iter()
            .filter(|item| !item.is_boots() && item.price > 0.0)
            .map(|item| (generic_value(item) / item.price, item))
            .collect();
        ranked.sort_by(|a, b| b.0.total_cmp(&a.0));

        ranked
            .into_iter()
            .take(limit)
            .map(|(value_per_gold, item)| ValuedItem { item: item.clone(), value_per_gold })
            .collect()
    }
}

/// 定位筛选表，未知定位保留全部
fn keeps_for_role(role: &str, item: &ItemRecord) -> bool {
    match role {
        "Tank" => item.hp > 500.0 || item.armor > 40.0 || item.magic_resist > 40.0,
        "Fighter" => (item.attack > 0.0 || item.hp > 300.0) && item.price < 2500.0,
        "Assassin" => item.attack > 50.0 || item.armor_penetration > 10.0,
        "Mage" => item.magic_power > 50.0,
        "Marksman" => item.attack > 40.0 || item.crit_chance > 0.15 || item.attack_speed > 0.05,
        "Support" => item.hp > 300.0 || item.cooldown_reduction > 0.05 || item.hp_regen > 0.0,
        _ => true,
    }
}

/// 预算装备的伤害类型筛选
fn keeps_for_budget(damage_type: DamageType, item: &ItemRecord) -> bool {
    match damage_type {
        DamageType::Physical => item.attack > 20.0 || item.attack_speed > 0.0 || item.armor_penetration > 0.0,
        DamageType::Magic => item.magic_power > 30.0 || item.cooldown_reduction > 0.0,
        DamageType::Mixed | DamageType::Unknown => item.hp > 300.0,
    }
}

/// 预算装备的属性价值
fn budget_value(damage_type: DamageType, item: &ItemRecord) -> f64 {
    match damage_type {
        DamageType::Physical => physical_value(item),
        DamageType::Magic => magic_value(item),
        DamageType::Mixed | DamageType::Unknown => item.hp,
    }
}

fn physical_value(item: &ItemRecord) -> f64 {
    item.attack + item.attack_speed * 100.0 + item.armor_penetration * 10.0
}

fn magic_value(item: &ItemRecord) -> f64 {
    item.magic_power + item.cooldown_reduction * 100.0
}

fn generic_value(item: &ItemRecord) -> f64 {
    physical_value(item) + magic_value(item) + item.hp
}

/// 价格升序（稳定排序，同价保持目录顺序）
fn sorted_by_price<'a>(items: impl IntoIterator<Item = &'a ItemRecord>) -> Vec<ItemRecord> {
    let mut sorted: Vec<&ItemRecord> = items.into_iter().collect();
    sorted.sort_by(|a, b| a.price.total_cmp(&b.price));
    sorted.into_iter().cloned().collect()
}

/// 比值降序（稳定排序）
fn sorted_by_ratio<'a>(items: impl IntoIterator<Item = (f64, &'a ItemRecord)>) -> Vec<ItemRecord> {
    let mut sorted: Vec<(f64, &ItemRecord)> = items.into_iter().collect();
    sorted.sort_by(|a, b| b.0.total_cmp(&a.0));
    sorted.into_iter().map(|(_, item)| item.clone()).collect()
}

fn truncate(mut items: Vec<ItemRecord>, limit: usize) -> Vec<ItemRecord> {
    items.truncate(limit);
    items
}
