//! Inventory and usage-log file access.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use stockroom_inventory::{InventoryRecord, UsageRecord};

/// File name of the usage log kept next to the inventory file.
pub const USAGE_LOG: &str = "usage.json";

pub fn load(path: &Path) -> Result<Vec<InventoryRecord>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed reading inventory file {}", path.display()))?;
    parse(&raw).with_context(|| format!("failed parsing inventory file {}", path.display()))
}

pub fn parse(raw: &str) -> Result<Vec<InventoryRecord>> {
    let records: Vec<InventoryRecord> = serde_json::from_str(raw)?;
    tracing::debug!(records = records.len(), "inventory loaded");
    Ok(records)
}

/// Write `records` as pretty JSON. Refuses to replace an existing file unless
/// `overwrite` is set.
pub fn save(path: &Path, records: &[InventoryRecord], overwrite: bool) -> Result<()> {
    if !overwrite && path.exists() {
        bail!("{} already exists; pass --overwrite to replace it", path.display());
    }
    let json = serde_json::to_string_pretty(records).context("failed serializing inventory")?;
    std::fs::write(path, json).with_context(|| format!("failed writing inventory file {}", path.display()))?;
    tracing::debug!(records = records.len(), path = %path.display(), "inventory saved");
    Ok(())
}

pub fn usage_path(inventory: &Path) -> PathBuf {
    inventory.with_file_name(USAGE_LOG)
}

pub fn load_usage(path: &Path) -> Result<Vec<UsageRecord>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed reading usage log {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed parsing usage log {}", path.display()))
}

/// Append `entries` to the usage log, creating it when missing.
pub fn append_usage(path: &Path, entries: &[UsageRecord]) -> Result<()> {
    if entries.is_empty() {
        return Ok(());
    }
    let mut log = if path.exists() { load_usage(path)? } else { Vec::new() };
    log.extend_from_slice(entries);
    let json = serde_json::to_string_pretty(&log).context("failed serializing usage log")?;
    std::fs::write(path, json).with_context(|| format!("failed writing usage log {}", path.display()))?;
    tracing::debug!(entries = entries.len(), total = log.len(), "usage logged");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_client_export() {
        let raw = r#"[
            {"id": "1", "name": "Surgical Masks", "category": "PPE", "industry": "healthcare",
             "quantity": 50, "minStock": 100, "price": 2.5, "status": "low-stock", "priority": "critical",
             "sku": "MSK-001"}
        ]"#;
        let records = parse(raw).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].min_stock, Some(100.0));
        assert_eq!(records[0].sku.as_deref(), Some("MSK-001"));
    }

    #[test]
    fn rejects_non_array_input() {
        assert!(parse("{\"id\": \"1\"}").is_err());
    }

    #[test]
    fn save_refuses_to_clobber() {
        let dir = std::env::temp_dir().join(format!("stockroom-store-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("inventory.json");
        let _ = std::fs::remove_file(&path);

        save(&path, &[], false).unwrap();
        assert!(save(&path, &[], false).is_err());
        save(&path, &[], true).unwrap();
        assert!(load(&path).unwrap().is_empty());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn usage_log_sits_next_to_the_inventory() {
        assert_eq!(
            usage_path(Path::new("/data/shop/inventory.json")),
            PathBuf::from("/data/shop/usage.json")
        );
    }

    #[test]
    fn usage_log_grows_by_appending() {
        let dir = std::env::temp_dir().join(format!("stockroom-usage-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(USAGE_LOG);
        let _ = std::fs::remove_file(&path);

        let entry = |id: &str| UsageRecord {
            id: id.into(),
            timestamp: "2025-10-11T08:00:00Z".into(),
            item: "Rice".into(),
            quantity: 2.0,
            unit_price: Some(1.5),
        };
        append_usage(&path, &[]).unwrap();
        assert!(!path.exists());
        append_usage(&path, &[entry("a")]).unwrap();
        append_usage(&path, &[entry("b")]).unwrap();
        let ids: Vec<String> = load_usage(&path).unwrap().into_iter().map(|u| u.id).collect();
        assert_eq!(ids, vec!["a", "b"]);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
