// ============================================================
// Layer 6 — Training Config Store
// ============================================================
// Writes the hyperparameters of a training run as JSON next to
// its metrics, so a checkpoint can be traced back to the flags
// that produced it.

use anyhow::{Context, Result};
use serde::Serialize;
use std::{fs, path::Path};

const CONFIG_FILE: &str = "train_config.json";

pub fn save_config<T: Serialize>(cfg: &T, dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Cannot create '{}'", dir.display()))?;
    let path = dir.join(CONFIG_FILE);

    let json = serde_json::to_string_pretty(cfg)?;
    fs::write(&path, json)
        .with_context(|| format!("Cannot write config to '{}'", path.display()))?;

    tracing::debug!("Saved training config to '{}'", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Params {
        epochs: usize,
        lr:     f64,
    }

    #[test]
    fn test_save_writes_readable_json() {
        let dir = TempDir::new().unwrap();
        let params = Params { epochs: 5, lr: 1e-3 };
        save_config(&params, dir.path()).unwrap();

        let json = fs::read_to_string(dir.path().join(CONFIG_FILE)).unwrap();
        let loaded: Params = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, params);
    }

    #[test]
    fn test_save_creates_missing_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("runs").join("1");
        save_config(&Params { epochs: 1, lr: 0.1 }, &nested).unwrap();
        assert!(nested.join(CONFIG_FILE).exists());
    }
}
