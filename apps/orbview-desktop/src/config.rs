use anyhow::Context;
use orbview_common::AssetPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Viewer configuration, loadable from a YAML file. Missing fields fall
/// back to defaults; CLI flags override file values after loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub window_width: u32,
    pub window_height: u32,
    pub assets_dir: PathBuf,
    pub asset_policy: AssetPolicy,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            assets_dir: PathBuf::from("./resources"),
            asset_policy: AssetPolicy::Degrade,
        }
    }
}

impl ViewerConfig {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&data)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }
}
