use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::Palette;
use crate::error::Result;
use crate::legend::ZeroValueCategories;
use crate::treemap::{TreemapLayout, DEFAULT_RATIO};

/// Everything a layout request can be tuned with. Missing keys in a config
/// file fall back to these defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreemapConfig {
    pub width: f64,
    pub height: f64,
    /// Gap kept around every tile.
    pub padding: f64,
    pub ratio: f64,
    pub palette: Palette,
    pub legend: LegendConfig,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendConfig {
    pub zero_value_categories: ZeroValueCategories,
}

impl Default for TreemapConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            padding: 1.0,
            ratio: DEFAULT_RATIO,
            palette: Palette::default(),
            legend: LegendConfig::default(),
        }
    }
}

impl TreemapConfig {
    pub fn layout(&self) -> TreemapLayout {
        TreemapLayout::new(self.width, self.height, self.padding).with_ratio(self.ratio)
    }
}

/// Read a JSON config file; `None` yields the defaults.
pub fn load_config(path: Option<&Path>) -> Result<TreemapConfig> {
    let Some(path) = path else {
        return Ok(TreemapConfig::default());
    };
    let contents = std::fs::read_to_string(path)?;
    let config: TreemapConfig = serde_json::from_str(&contents)?;
    tracing::debug!(path = %path.display(), ?config, "loaded config");
    Ok(config)
}
