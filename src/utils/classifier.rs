//! 分类启发式工具
//! 伤害类型归一化、主定位解析、装备名称/描述关键字匹配统一收口在此，
//! 后续改为结构化标签时只需替换本模块

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// 鞋子装备的分类字面值
pub const MOVEMENT_CATEGORY: &str = "movement";

static ARCANE_NAME_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)arcane").unwrap());
static PHYSICAL_BOOTS_NAME_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)warrior|rapid").unwrap());
static MAGIC_PENETRATION_DESC_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)penetration|magic damage").unwrap());

/// 伤害类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DamageType {
    Physical,
    Magic,
    Mixed,
    Unknown,
}

impl DamageType {
    /// 将英雄的自由文本伤害标签归一化
    ///
    /// 同时包含 physical 与 magic 为 mixed，其次按 physical、magic 顺序判断，
    /// 均不包含为 unknown（子串匹配，忽略大小写）
    pub fn classify(label: &str) -> Self {
        let lower = label.to_lowercase();
        let physical = lower.contains("physical");
        let magic = lower.contains("magic");

        match (physical, magic) {
            (true, true) => DamageType::Mixed,
            (true, false) => DamageType::Physical,
            (false, true) => DamageType::Magic,
            (false, false) => DamageType::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DamageType::Physical => "physical",
            DamageType::Magic => "magic",
            DamageType::Mixed => "mixed",
            DamageType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for DamageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 调用方传入的伤害类型须已小写，未识别的值一律视为 unknown
impl FromStr for DamageType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "physical" => DamageType::Physical,
            "magic" => DamageType::Magic,
            "mixed" => DamageType::Mixed,
            _ => DamageType::Unknown,
        })
    }
}

/// 主定位：斜杠分隔定位串的第一段
pub fn primary_role(role: &str) -> &str {
    role.split('/').next().unwrap_or("").trim()
}

/// 是否为鞋子
pub fn is_movement(category: &str) -> bool {
    category == MOVEMENT_CATEGORY
}

/// 法术鞋名称特征
pub fn has_arcane_name(name: &str) -> bool {
    ARCANE_NAME_REGEX.is_match(name)
}

/// 物理鞋名称特征
pub fn has_physical_boots_name(name: &str) -> bool {
    PHYSICAL_BOOTS_NAME_REGEX.is_match(name)
}

/// 装备描述是否提及法术穿透 / 法术伤害
pub fn mentions_magic_penetration(description: &str) -> bool {
    MAGIC_PENETRATION_DESC_REGEX.is_match(description)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_damage_type() {
        assert_eq!(DamageType::classify("physical_attack_speed"), DamageType::Physical);
        assert_eq!(DamageType::classify("Magic Burst"), DamageType::Magic);
        assert_eq!(DamageType::classify("physical/magic hybrid"), DamageType::Mixed);
        assert_eq!(DamageType::classify("true damage"), DamageType::Unknown);
        assert_eq!(DamageType::classify(""), DamageType::Unknown);
    }

    #[test]
    fn test_damage_type_from_str_is_exact() {
        assert_eq!("magic".parse::<DamageType>().unwrap(), DamageType::Magic);
        assert_eq!("physical".parse::<DamageType>().unwrap(), DamageType::Physical);
        // 调用方负责归一化大小写
        assert_eq!("Magic".parse::<DamageType>().unwrap(), DamageType::Unknown);
        assert_eq!("".parse::<DamageType>().unwrap(), DamageType::Unknown);
    }

    #[test]
    fn test_primary_role() {
        assert_eq!(primary_role("Marksman/Assassin"), "Marksman");
        assert_eq!(primary_role("Tank"), "Tank");
        assert_eq!(primary_role(" Fighter / Tank"), "Fighter");
        assert_eq!(primary_role(""), "");
    }

    #[test]
    fn test_name_and_description_keywords() {
        assert!(has_arcane_name("Arcane Boots"));
        assert!(has_arcane_name("ARCANE"));
        assert!(has_physical_boots_name("Warrior Boots"));
        assert!(has_physical_boots_name("Rapid Boots"));
        assert!(!has_physical_boots_name("Tough Boots"));
        assert!(mentions_magic_penetration("+10 Magic PENETRATION"));
        assert!(mentions_magic_penetration("Deals extra Magic Damage"));
        assert!(!mentions_magic_penetration("+20 physical attack"));
    }

    #[test]
    fn test_movement_category_is_literal() {
        assert!(is_movement("movement"));
        assert!(!is_movement("Movement"));
        assert!(!is_movement("attack"));
    }
}
