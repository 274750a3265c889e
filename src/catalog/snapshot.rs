//! 目录快照管理
//! 仅处理目录数据的本地序列化（MessagePack）和反序列化

use std::fs;
use std::path::Path;

use rmp_serde::{Serializer, from_slice};
use serde::Serialize;
use tracing::debug;

use super::model::CatalogSnapshot;
use crate::error::{DraftError, DraftResult};

/// 快照管理器
pub struct SnapshotManager;

impl SnapshotManager {
    /// 从本地快照加载目录
    pub fn load(path: &Path) -> DraftResult<CatalogSnapshot> {
        let data = fs::read(path)?;

        // MessagePack反序列化
        let snapshot: CatalogSnapshot = from_slice(&data)
            .map_err(|e| DraftError::SnapshotError(format!("反序列化失败：{}", e)))?;

        debug!(
            "快照反序列化成功，英雄数：{}，装备数：{}，规则数：{}",
            snapshot.heroes.len(),
            snapshot.items.len(),
            snapshot.rules.len()
        );

        Ok(snapshot)
    }

    /// 将目录写入本地快照
    pub fn save(path: &Path, snapshot: &CatalogSnapshot) -> DraftResult<()> {
        let mut data = Vec::new();

        // MessagePack序列化
        snapshot
            .serialize(&mut Serializer::new(&mut data))
            .map_err(|e| DraftError::SnapshotError(format!("序列化失败：{}", e)))?;

        debug!("快照序列化成功，序列化后数据大小：{} 字节", data.len());

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, data)?;
        Ok(())
    }

    /// 清除本地快照（不存在时视为成功）
    pub fn clear(path: &Path) -> DraftResult<()> {
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::model::{DraftRule, HeroRecord, ItemRecord, SynergyRule};

    fn sample() -> CatalogSnapshot {
        let mut blade = ItemRecord::new("Blade of Despair", "attack", 3010.0);
        blade.attack = 160.0;
        blade.description = "Unique passive".into();

        CatalogSnapshot {
            heroes: vec![HeroRecord::new("Miya", "Marksman", "physical")],
            items: vec![blade],
            rules: vec![
                DraftRule::RoleCompatibility { primary_role: "Marksman".into(), compatible_role: "Tank".into() },
                DraftRule::Synergy(SynergyRule {
                    selected_hero: "Miya".into(),
                    partner: "Tank".into(),
                    bonus: 2,
                    notes: "frontline".into(),
                }),
            ],
        }
    }

    #[test]
    fn test_save_then_load_preserves_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("catalog.mp");

        SnapshotManager::save(&path, &sample()).unwrap();
        let loaded = SnapshotManager::load(&path).unwrap();

        assert_eq!(loaded, sample());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.mp");

        SnapshotManager::save(&path, &sample()).unwrap();
        SnapshotManager::clear(&path).unwrap();
        assert!(!path.exists());
        SnapshotManager::clear(&path).unwrap();
    }

    #[test]
    fn test_load_corrupt_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.mp");
        fs::write(&path, b"not msgpack at all").unwrap();

        assert!(matches!(SnapshotManager::load(&path), Err(DraftError::SnapshotError(_))));
    }
}
