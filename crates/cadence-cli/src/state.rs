//! Engine state snapshot
//!
//! The CLI keeps both engines' tables in one JSON file. Writes go to a
//! sibling temp file first and are renamed into place, so a crash mid-write
//! leaves the previous snapshot intact.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use cadence_outreach::OutreachTables;
use cadence_tasks::TaskTables;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub tasks: TaskTables,
    #[serde(default)]
    pub outreach: OutreachTables,
}

impl Snapshot {
    /// Read a snapshot; a missing file is an empty state
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no state file, starting empty");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
        }

        let tmp = temp_path(path);
        std::fs::write(&tmp, serde_json::to_vec_pretty(self)?).with_context(|| format!("writing {}", tmp.display()))?;
        std::fs::rename(&tmp, path).with_context(|| format!("replacing {}", path.display()))?;

        tracing::debug!(path = %path.display(), tasks = self.tasks.len(), "state saved");
        Ok(())
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
