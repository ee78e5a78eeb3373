//! Persistent configuration, stored as JSON in the user data directory.
//!
//! ```json
//! {
//!   "store": { "api_url": "https://mill.example/api", "auth_token": "..." },
//!   "export": { "title": "Attendance Register", "rows_per_page": 25, "glyphs": "short" }
//! }
//! ```
//!
//! Every section is optional. A missing file reads as the default
//! configuration so read-only commands work with `--snapshot` and no setup.

use super::data_storage::DataStorage;
use crate::api::StoreConfig;
use crate::libs::export::DEFAULT_ROWS_PER_PAGE;
use crate::libs::glyph::GlyphMode;
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect, Select};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::PathBuf;

pub const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Clone)]
pub struct ConfigModule {
    pub key: String,
    pub name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExportConfig {
    pub title: String,
    pub rows_per_page: usize,
    #[serde(default)]
    pub glyphs: GlyphMode,
    /// Directory for exports without an explicit `--output`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig {
            title: "Attendance Register".to_string(),
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
            glyphs: GlyphMode::Short,
            output_dir: None,
        }
    }
}

impl ExportConfig {
    pub fn module() -> ConfigModule {
        ConfigModule {
            key: "export".to_string(),
            name: "Export".to_string(),
        }
    }

    pub fn init(config: &Option<Self>) -> Result<Self> {
        let default = config.clone().unwrap_or_default();
        msg_print!(Message::ConfigModuleExport);

        let title = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptExportTitle.to_string())
            .default(default.title)
            .interact_text()?;

        let rows_per_page = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptExportRowsPerPage.to_string())
            .default(default.rows_per_page)
            .validate_with(|n: &usize| if *n >= 1 { Ok(()) } else { Err(Message::InvalidRowsPerPage.to_string()) })
            .interact_text()?;

        let glyph_modes = [GlyphMode::Short, GlyphMode::Full];
        let glyph_index = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptExportGlyphs.to_string())
            .items(&["short (P, H, L, A)", "full (Present, Half Day, Leave, Absent)"])
            .default(glyph_modes.iter().position(|m| *m == default.glyphs).unwrap_or(0))
            .interact()?;

        let output_dir: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptExportOutputDir.to_string())
            .default(default.output_dir.map(|p| p.display().to_string()).unwrap_or_default())
            .allow_empty(true)
            .interact_text()?;

        Ok(ExportConfig {
            title,
            rows_per_page,
            glyphs: glyph_modes[glyph_index],
            output_dir: Some(output_dir.trim()).filter(|dir| !dir.is_empty()).map(PathBuf::from),
        })
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store: Option<StoreConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export: Option<ExportConfig>,
}

impl Config {
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Export settings, falling back to the defaults.
    pub fn export_settings(&self) -> ExportConfig {
        self.export.clone().unwrap_or_default()
    }

    /// Interactive setup of the selected modules.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let modules = [StoreConfig::module(), ExportConfig::module()];
        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected {
            match modules[selection].key.as_str() {
                "store" => config.store = Some(StoreConfig::init(&config.store)?),
                "export" => config.export = Some(ExportConfig::init(&config.export)?),
                _ => {}
            }
        }

        Ok(config)
    }
}
