//! 目录加载器
//! 负责定位数据源、读取表格文本并转换为强类型记录

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::model::{CatalogSnapshot, DraftRule, HeroRecord, ItemRecord, SynergyRule};
use super::snapshot::SnapshotManager;
use super::table::{RawRow, TableFormat, parse_table, parse_table_bytes};
use crate::error::{DraftError, DraftResult};
use crate::utils::coerce::{clean_text, coerce_f64, coerce_i32};

/// 目录中的三张表
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogTable {
    Heroes,
    Items,
    Rules,
}

impl CatalogTable {
    /// 表文件名（不含扩展名）
    pub fn file_stem(&self) -> &'static str {
        match self {
            CatalogTable::Heroes => "heroes",
            CatalogTable::Items => "items",
            CatalogTable::Rules => "draft_rules",
        }
    }
}

impl fmt::Display for CatalogTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_stem())
    }
}

/// 内存中的表格文本（测试夹具、远程拉取结果）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InlineTables {
    pub format: TableFormat,
    pub heroes: String,
    pub items: String,
    pub rules: String,
}

impl InlineTables {
    pub fn csv(heroes: impl Into<String>, items: impl Into<String>, rules: impl Into<String>) -> Self {
        Self {
            format: TableFormat::Csv,
            heroes: heroes.into(),
            items: items.into(),
            rules: rules.into(),
        }
    }

    pub fn table(&self, table: CatalogTable) -> &str {
        match table {
            CatalogTable::Heroes => &self.heroes,
            CatalogTable::Items => &self.items,
            CatalogTable::Rules => &self.rules,
        }
    }
}

/// 目录数据源
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogSource {
    /// 目录下的 heroes / items / draft_rules 表文件（.csv 优先，其次 .json）
    Directory(PathBuf),
    /// 内存表格
    Inline(InlineTables),
    /// MessagePack 快照文件
    Snapshot(PathBuf),
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogSource::Directory(dir) => write!(f, "dir:{}", dir.display()),
            CatalogSource::Inline(_) => f.write_str("inline"),
            CatalogSource::Snapshot(path) => write!(f, "snapshot:{}", path.display()),
        }
    }
}

/// 单表解析结果：有效记录 + 被跳过的格式错误行
#[derive(Debug)]
pub struct ParsedTable<T> {
    pub records: Vec<T>,
    pub malformed: Vec<DraftError>,
}

impl<T> Default for ParsedTable<T> {
    fn default() -> Self {
        Self { records: Vec::new(), malformed: Vec::new() }
    }
}

impl<T> ParsedTable<T> {
    fn skip(&mut self, table: CatalogTable, line: usize, reason: impl Into<String>) {
        let err = DraftError::MalformedRow { table: table.file_stem(), line, reason: reason.into() };
        warn!("跳过格式错误行：{}", err);
        self.malformed.push(err);
    }

    /// 行级解码失败时跳过该行，返回是否可继续转换
    fn accept(&mut self, table: CatalogTable, row: &RawRow) -> bool {
        match row.invalid_reason() {
            Some(reason) => {
                self.skip(table, row.line, reason);
                false
            }
            None => true,
        }
    }
}

/// 目录加载器
pub struct CatalogLoader;

impl CatalogLoader {
    /// 加载英雄表
    pub fn load_heroes(source: &CatalogSource) -> DraftResult<ParsedTable<HeroRecord>> {
        if let CatalogSource::Snapshot(path) = source {
            let snapshot = Self::read_snapshot(path)?;
            return Ok(ParsedTable { records: snapshot.heroes, malformed: Vec::new() });
        }
        let rows = Self::read_rows(source, CatalogTable::Heroes)?;
        Ok(Self::parse_heroes(&rows))
    }

    /// 加载装备表
    pub fn load_items(source: &CatalogSource) -> DraftResult<ParsedTable<ItemRecord>> {
        if let CatalogSource::Snapshot(path) = source {
            let snapshot = Self::read_snapshot(path)?;
            return Ok(ParsedTable { records: snapshot.items, malformed: Vec::new() });
        }
        let rows = Self::read_rows(source, CatalogTable::Items)?;
        Ok(Self::parse_items(&rows))
    }

    /// 加载规则表
    pub fn load_rules(source: &CatalogSource) -> DraftResult<ParsedTable<DraftRule>> {
        if let CatalogSource::Snapshot(path) = source {
            let snapshot = Self::read_snapshot(path)?;
            return Ok(ParsedTable { records: snapshot.rules, malformed: Vec::new() });
        }
        let rows = Self::read_rows(source, CatalogTable::Rules)?;
        Ok(Self::parse_rules(&rows))
    }

    /// 转换英雄行，name 为空的行跳过
    pub fn parse_heroes(rows: &[RawRow]) -> ParsedTable<HeroRecord> {
        let mut parsed = ParsedTable::default();

        for row in rows {
            if !parsed.accept(CatalogTable::Heroes, row) {
                continue;
            }
            let Some(name) = row.non_blank("name") else {
                parsed.skip(CatalogTable::Heroes, row.line, "缺失name");
                continue;
            };

            parsed.records.push(HeroRecord {
                name: name.to_string(),
                role: clean_text(row.get("role")),
                damage_type: clean_text(row.get("damageType")),
                lane: clean_text(row.get("lane")),
                specialty: clean_text(row.get("specialty")),
                description: clean_text(row.get("description")),
            });
        }

        debug!("英雄表转换完成，有效{}条，跳过{}条", parsed.records.len(), parsed.malformed.len());
        parsed
    }

    /// 转换装备行，数值列缺失或非数值一律回退为 0
    pub fn parse_items(rows: &[RawRow]) -> ParsedTable<ItemRecord> {
        let mut parsed = ParsedTable::default();

        for row in rows {
            if !parsed.accept(CatalogTable::Items, row) {
                continue;
            }
            let Some(name) = row.non_blank("name") else {
                parsed.skip(CatalogTable::Items, row.line, "缺失name");
                continue;
            };
            let stat = |column: &str| coerce_f64(row.get(column));

            parsed.records.push(ItemRecord {
                name: name.to_string(),
                category: clean_text(row.get("category")),
                // 负价格按"免费"处理
                price: stat("price").max(0.0),
                attack: stat("attack"),
                attack_speed: stat("attackSpeed"),
                crit_chance: stat("critChance"),
                armor_penetration: stat("armorPenetration"),
                spell_vamp: stat("spellVamp"),
                magic_power: stat("magicPower"),
                hp: stat("hp"),
                armor: stat("armor"),
                magic_resist: stat("magicResist"),
                movement_speed: stat("movementSpeed"),
                cooldown_reduction: stat("cooldownReduction"),
                mana_regen: stat("manaRegen"),
                hp_regen: stat("hpRegen"),
                description: clean_text(row.get("description")),
            });
        }

        debug!("装备表转换完成，有效{}条，跳过{}条", parsed.records.len(), parsed.malformed.len());
        parsed
    }

    /// 转换规则行：ruleType 决定 subject / target / value 的含义
    pub fn parse_rules(rows: &[RawRow]) -> ParsedTable<DraftRule> {
        let mut parsed = ParsedTable::default();

        for row in rows {
            if !parsed.accept(CatalogTable::Rules, row) {
                continue;
            }
            let kind = row.non_blank("ruleType").map(str::to_ascii_lowercase).unwrap_or_default();
            let (Some(subject), Some(target)) = (row.non_blank("subject"), row.non_blank("target")) else {
                parsed.skip(CatalogTable::Rules, row.line, format!("规则[{}]缺失subject或target", kind));
                continue;
            };
            let value = coerce_i32(row.get("value"));

            let rule = match kind.as_str() {
                DraftRule::ROLE_COMPATIBILITY => DraftRule::RoleCompatibility {
                    primary_role: subject.to_string(),
                    compatible_role: target.to_string(),
                },
                DraftRule::HERO_PRIORITY => DraftRule::HeroPriority {
                    role: subject.to_string(),
                    hero_name: target.to_string(),
                    priority: value,
                },
                DraftRule::SYNERGY => DraftRule::Synergy(SynergyRule {
                    selected_hero: subject.to_string(),
                    partner: target.to_string(),
                    bonus: value,
                    notes: clean_text(row.get("notes")),
                }),
                _ => {
                    parsed.skip(CatalogTable::Rules, row.line, format!("未知规则类型：{:?}", kind));
                    continue;
                }
            };
            parsed.records.push(rule);
        }

        debug!("规则表转换完成，有效{}条，跳过{}条", parsed.records.len(), parsed.malformed.len());
        parsed
    }

    /// 读取数据源中的一张表
    fn read_rows(source: &CatalogSource, table: CatalogTable) -> DraftResult<Vec<RawRow>> {
        let rows = match source {
            CatalogSource::Directory(dir) => {
                let (path, format) = Self::locate_table(dir, table)?;
                // 按字节读取，单元格编码问题留给行级处理
                let data = std::fs::read(&path)
                    .map_err(|e| DraftError::unavailable(path.display().to_string(), e))?;
                debug!("读取表文件：{}，{} 字节", path.display(), data.len());
                parse_table_bytes(&data, format)
            }
            CatalogSource::Inline(tables) => parse_table(tables.table(table), tables.format),
            CatalogSource::Snapshot(path) => {
                return Err(DraftError::InvalidInput(format!(
                    "快照源 {} 不支持按行读取",
                    path.display()
                )));
            }
        };

        rows.map_err(|e| DraftError::unavailable(format!("{}/{}", source, table), e))
    }

    /// 在目录中查找表文件，CSV 优先
    fn locate_table(dir: &Path, table: CatalogTable) -> DraftResult<(PathBuf, TableFormat)> {
        for format in [TableFormat::Csv, TableFormat::Json] {
            let path = dir.join(format!("{}.{}", table.file_stem(), format.extension()));
            if path.is_file() {
                return Ok((path, format));
            }
        }

        Err(DraftError::unavailable(
            dir.display().to_string(),
            format!("未找到表文件 {}.csv / {}.json", table.file_stem(), table.file_stem()),
        ))
    }

    fn read_snapshot(path: &Path) -> DraftResult<CatalogSnapshot> {
        SnapshotManager::load(path).map_err(|e| DraftError::unavailable(path.display().to_string(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const HEROES_CSV: &str = "name,role,damageType,lane\nMiya,Marksman,physical_attack_speed,Gold\n ,Mage,magic,Mid\nEudora,Mage,magic,Mid\n";
    const ITEMS_CSV: &str = "name,category,price,attack,magicPower,description\nBlade,attack,2100,40,,\nWand,magic,abc,,75, Magic PENETRATION \n,attack,100,,,\n";
    const RULES_CSV: &str = "ruleType,subject,target,value,notes\nrole_compatibility,Marksman,Mage,,\nhero_priority,Mage,Eudora,8,\nsynergy,Miya,Estes,3,heal\nunknown_kind,a,b,1,\nsynergy,Miya,,2,\n";

    fn inline() -> CatalogSource {
        CatalogSource::Inline(InlineTables::csv(HEROES_CSV, ITEMS_CSV, RULES_CSV))
    }

    #[test]
    fn test_load_heroes_skips_blank_names() {
        let parsed = CatalogLoader::load_heroes(&inline()).unwrap();

        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.records[0].name, "Miya");
        assert_eq!(parsed.records[0].lane, "Gold");
        assert_eq!(parsed.malformed.len(), 1);
        assert!(matches!(parsed.malformed[0], DraftError::MalformedRow { table: "heroes", line: 3, .. }));
    }

    #[test]
    fn test_load_items_coerces_numbers() {
        let parsed = CatalogLoader::load_items(&inline()).unwrap();

        assert_eq!(parsed.records.len(), 2);
        let blade = &parsed.records[0];
        assert_eq!(blade.price, 2100.0);
        assert_eq!(blade.attack, 40.0);
        assert_eq!(blade.magic_power, 0.0);

        let wand = &parsed.records[1];
        // 非数值价格回退为 0
        assert_eq!(wand.price, 0.0);
        assert_eq!(wand.magic_power, 75.0);
        assert_eq!(wand.description, "Magic PENETRATION");
        assert_eq!(parsed.malformed.len(), 1);
    }

    #[test]
    fn test_load_rules_decodes_variants() {
        let parsed = CatalogLoader::load_rules(&inline()).unwrap();

        assert_eq!(
            parsed.records,
            vec![
                DraftRule::RoleCompatibility { primary_role: "Marksman".into(), compatible_role: "Mage".into() },
                DraftRule::HeroPriority { role: "Mage".into(), hero_name: "Eudora".into(), priority: 8 },
                DraftRule::Synergy(SynergyRule {
                    selected_hero: "Miya".into(),
                    partner: "Estes".into(),
                    bonus: 3,
                    notes: "heal".into(),
                }),
            ]
        );
        // 未知类型与缺失 target 的行均被跳过
        assert_eq!(parsed.malformed.len(), 2);
        assert!(parsed.malformed.iter().all(DraftError::is_recoverable));
    }

    #[test]
    fn test_directory_source_prefers_csv() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("heroes.csv"), HEROES_CSV).unwrap();
        fs::write(dir.path().join("heroes.json"), r#"[{"name": "Only In Json", "role": "Tank"}]"#).unwrap();
        fs::write(dir.path().join("items.json"), r#"[{"name": "Boots", "category": "movement", "price": 500}]"#).unwrap();

        let source = CatalogSource::Directory(dir.path().to_path_buf());
        let heroes = CatalogLoader::load_heroes(&source).unwrap();
        assert_eq!(heroes.records.len(), 2);

        let items = CatalogLoader::load_items(&source).unwrap();
        assert_eq!(items.records[0].price, 500.0);
        assert!(items.records[0].is_boots());
    }

    #[test]
    fn test_non_utf8_item_row_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let mut data = b"name,category,price,description\nBlade,attack,2100,sharp\nWand,magic,1800,Caf".to_vec();
        data.push(0xE9);
        data.extend_from_slice(b"\n");
        fs::write(dir.path().join("items.csv"), data).unwrap();

        let parsed = CatalogLoader::load_items(&CatalogSource::Directory(dir.path().to_path_buf())).unwrap();

        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.records[0].name, "Blade");
        assert_eq!(parsed.malformed.len(), 1);
        assert!(matches!(parsed.malformed[0], DraftError::MalformedRow { table: "items", line: 3, .. }));
    }

    #[test]
    fn test_missing_table_is_source_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let source = CatalogSource::Directory(dir.path().to_path_buf());

        let err = CatalogLoader::load_rules(&source).unwrap_err();
        assert!(matches!(err, DraftError::SourceUnavailable { .. }));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_unreadable_table_is_source_unavailable() {
        let source = CatalogSource::Inline(InlineTables {
            format: TableFormat::Json,
            heroes: "[broken".into(),
            ..Default::default()
        });

        let err = CatalogLoader::load_heroes(&source).unwrap_err();
        assert!(matches!(err, DraftError::SourceUnavailable { .. }));
    }
}
