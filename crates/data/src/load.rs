use anyhow::Context;
use digitduel_core::{LevelConfig, LevelTable};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const LEVELS_FILE: &str = "levels.json";
pub const ASSETS_DIR: &str = "assets";

#[derive(Debug, Deserialize)]
struct LevelFile {
    levels: Vec<LevelConfig>,
}

/// Reads a level table from `path` and checks it before handing it out.
pub fn load_levels(path: &Path) -> anyhow::Result<LevelTable> {
    let file: LevelFile = load_json(path)?;
    let table =
        LevelTable::new(file.levels).with_context(|| format!("validate {}", path.display()))?;
    Ok(table)
}

/// Loads `levels.json` from `dir`, or the built-in table when there is none.
/// A file that exists but does not load is still an error.
pub fn load_levels_or_builtin(dir: &Path) -> anyhow::Result<LevelTable> {
    let path = dir.join(LEVELS_FILE);
    if path.exists() {
        load_levels(&path)
    } else {
        Ok(LevelTable::builtin())
    }
}

/// Picks the level table for a front-end: an explicit file wins, then the
/// assets directory, then the built-in table.
pub fn resolve_levels(explicit: Option<&Path>) -> anyhow::Result<LevelTable> {
    match explicit {
        Some(path) => load_levels(path),
        None => load_levels_or_builtin(&assets_dir()),
    }
}

pub fn assets_dir() -> PathBuf {
    PathBuf::from(ASSETS_DIR)
}

fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value = serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(value)
}
