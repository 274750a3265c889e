//! 目录数据模型定义
//! 仅存储记录数据，无任何评分逻辑，支持序列化/反序列化

use std::fmt;
use serde::{Deserialize, Serialize};

use crate::utils::classifier::{self, DamageType};

/// 英雄记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroRecord {
    pub name: String,
    /// 斜杠分隔的定位串，首段为主定位（拆分由调用方负责）
    pub role: String,
    /// 原始伤害标签，评分时再归一化
    pub damage_type: String,
    #[serde(default)]
    pub lane: String,
    #[serde(default)]
    pub specialty: String,
    #[serde(default)]
    pub description: String,
}

impl HeroRecord {
    /// 从名称与定位快速创建（其余描述字段留空）
    pub fn new(name: impl Into<String>, role: impl Into<String>, damage_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            damage_type: damage_type.into(),
            lane: String::new(),
            specialty: String::new(),
            description: String::new(),
        }
    }

    /// 主定位
    pub fn primary_role(&self) -> &str {
        classifier::primary_role(&self.role)
    }

    /// 归一化后的伤害类型
    pub fn damage_class(&self) -> DamageType {
        DamageType::classify(&self.damage_type)
    }
}

impl fmt::Display for HeroRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.role)
    }
}

/// 装备记录
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    pub name: String,
    pub category: String,
    /// 0 为"免费"哨兵值，不参与预算与性价比计算
    pub price: f64,

    // 数值属性，缺失时为 0
    pub attack: f64,
    pub attack_speed: f64,
    pub crit_chance: f64,
    pub armor_penetration: f64,
    pub spell_vamp: f64,
    pub magic_power: f64,
    pub hp: f64,
    pub armor: f64,
    pub magic_resist: f64,
    pub movement_speed: f64,
    pub cooldown_reduction: f64,
    pub mana_regen: f64,
    pub hp_regen: f64,

    #[serde(default)]
    pub description: String,
}

impl ItemRecord {
    /// 从名称、分类、价格快速创建（属性全部为 0）
    pub fn new(name: impl Into<String>, category: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            price,
            ..Default::default()
        }
    }

    /// 是否为鞋子
    pub fn is_boots(&self) -> bool {
        classifier::is_movement(&self.category)
    }
}

impl fmt::Display for ItemRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] {}", self.name, self.category, self.price)
    }
}

/// 协同加成规则
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynergyRule {
    pub selected_hero: String,
    /// 英雄名或定位名
    pub partner: String,
    pub bonus: i32,
    #[serde(default)]
    pub notes: String,
}

impl SynergyRule {
    /// 规则是否适用于给定配对（双向；任一侧可按英雄名或主定位命中）
    pub fn matches(&self, selected: &HeroRecord, candidate: &HeroRecord) -> bool {
        let hits = |label: &str, hero: &HeroRecord| label == hero.name || label == hero.primary_role();

        (hits(&self.selected_hero, selected) && hits(&self.partner, candidate))
            || (hits(&self.selected_hero, candidate) && hits(&self.partner, selected))
    }
}

/// 选人规则（同一张规则表中的三种规则）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftRule {
    /// 定位兼容（有向）
    RoleCompatibility { primary_role: String, compatible_role: String },
    /// 定位内英雄优先级
    HeroPriority { role: String, hero_name: String, priority: i32 },
    /// 协同加成
    Synergy(SynergyRule),
}

impl DraftRule {
    /// 规则表中的类型字面值
    pub const ROLE_COMPATIBILITY: &'static str = "role_compatibility";
    pub const HERO_PRIORITY: &'static str = "hero_priority";
    pub const SYNERGY: &'static str = "synergy";
}

/// 完整目录快照（MessagePack 持久化单位）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    pub heroes: Vec<HeroRecord>,
    pub items: Vec<ItemRecord>,
    pub rules: Vec<DraftRule>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn synergy(selected: &str, partner: &str, bonus: i32) -> SynergyRule {
        SynergyRule {
            selected_hero: selected.to_string(),
            partner: partner.to_string(),
            bonus,
            notes: String::new(),
        }
    }

    #[test]
    fn test_synergy_matches_both_directions() {
        let miya = HeroRecord::new("Miya", "Marksman", "physical");
        let estes = HeroRecord::new("Estes", "Support", "magic");
        let rule = synergy("Estes", "Miya", 3);

        assert!(rule.matches(&miya, &estes));
        assert!(rule.matches(&estes, &miya));
    }

    #[test]
    fn test_synergy_matches_by_primary_role() {
        let miya = HeroRecord::new("Miya", "Marksman/Assassin", "physical");
        let tigreal = HeroRecord::new("Tigreal", "Tank", "physical");
        let eudora = HeroRecord::new("Eudora", "Mage", "magic");
        let rule = synergy("Marksman", "Tank", 2);

        assert!(rule.matches(&miya, &tigreal));
        assert!(rule.matches(&tigreal, &miya));
        assert!(!rule.matches(&miya, &eudora));
        // 次定位不参与匹配
        assert!(!synergy("Assassin", "Tank", 2).matches(&miya, &tigreal));
    }

    #[test]
    fn test_item_is_boots() {
        assert!(ItemRecord::new("Boots", "movement", 500.0).is_boots());
        assert!(!ItemRecord::new("Blade", "attack", 500.0).is_boots());
    }
}
