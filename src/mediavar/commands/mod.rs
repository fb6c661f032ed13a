use crate::config::MediaConfig;
use crate::model::Asset;
use crate::recipe::Recipe;
use std::path::PathBuf;

pub mod add;
pub mod config;
pub mod helpers;
pub mod history;
pub mod list;
pub mod move_asset;
pub mod paths;
pub mod purge;
pub mod record;

/// Where mediavar keeps its own files: `config.json`, `data.json` and, by
/// default, the `disks/` roots.
#[derive(Debug, Clone)]
pub struct MediaPaths {
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// One file belonging to an asset: the original or a logged variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetFile {
    /// Canonical recipe, empty for the original.
    pub recipe: String,
    pub path: String,
    pub exists: bool,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_assets: Vec<Asset>,
    pub listed_assets: Vec<Asset>,
    pub files: Vec<AssetFile>,
    pub history: Vec<Recipe>,
    pub config: Option<MediaConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_assets(mut self, assets: Vec<Asset>) -> Self {
        self.affected_assets = assets;
        self
    }

    pub fn with_listed_assets(mut self, assets: Vec<Asset>) -> Self {
        self.listed_assets = assets;
        self
    }

    pub fn with_files(mut self, files: Vec<AssetFile>) -> Self {
        self.files = files;
        self
    }

    pub fn with_history(mut self, history: Vec<Recipe>) -> Self {
        self.history = history;
        self
    }

    pub fn with_config(mut self, config: MediaConfig) -> Self {
        self.config = Some(config);
        self
    }
}
