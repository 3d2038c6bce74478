use anyhow::Context;
use std::path::{Path, PathBuf};

use pledgemap_core::color::ColorAssigner;
use pledgemap_core::config::TreemapConfig;
use pledgemap_core::hierarchy::{build, load_tree};
use pledgemap_core::Treemap;

pub struct AppState {
    pub config: TreemapConfig,
    pub path: Option<PathBuf>,
    pub map: Option<Treemap>,
    pub error: Option<String>,
    pub search: String,
    colors: ColorAssigner,
}

impl AppState {
    pub fn new(config: TreemapConfig) -> Self {
        let colors = ColorAssigner::new(config.palette.clone());
        Self {
            config,
            path: None,
            map: None,
            error: None,
            search: String::new(),
            colors,
        }
    }

    pub fn open(&mut self, path: PathBuf) {
        match self.load(&path) {
            Ok(map) => {
                self.map = Some(map);
                self.error = None;
            }
            Err(e) => {
                let message = format!("{e:#}");
                tracing::error!(error = %message, "failed to load dataset");
                self.map = None;
                self.error = Some(message);
            }
        }
        self.path = Some(path);
    }

    pub fn reload(&mut self) {
        if let Some(path) = self.path.clone() {
            self.open(path);
        }
    }

    fn load(&mut self, path: &Path) -> anyhow::Result<Treemap> {
        let root = load_tree(path).with_context(|| format!("reading {}", path.display()))?;
        let tree = build(&root).context("dataset is malformed")?;
        Ok(Treemap::from_tree(&tree, &self.config, &mut self.colors))
    }
}
