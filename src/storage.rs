//! Storage management for configuration and exports.
//!
//! All application data lives under `~/.config/credkit/`:
//!
//! ```text
//! ~/.config/credkit/
//!   config.ini          — User configuration
//!   exports/            — Exported credential sheets (.txt / .json)
//! ```
//!
//! Calculations are **in-memory only**; nothing is persisted unless the
//! user explicitly exports a result sheet.

use anyhow::{Context, Result};
use configparser::ini::Ini;
use std::fs;
use std::path::PathBuf;

// ─── Config ──────────────────────────────────────────────────────────────────

/// Application configuration loaded from `~/.config/credkit/config.ini`
#[derive(Debug, Clone)]
pub struct Config {
    // [export]
    /// Directory where exported credential sheets are saved
    pub export_directory: PathBuf,
    /// Default export format (text or json)
    pub default_export_format: String,
}

impl Config {
    /// Build the default config, using the given config_dir as the base.
    /// This keeps everything under `~/.config/credkit/` by default.
    fn default_for(config_dir: &PathBuf) -> Self {
        Self {
            export_directory: config_dir.join("exports"),
            default_export_format: "text".to_string(),
        }
    }

    /// Load config from an INI file, falling back to defaults for missing keys.
    fn load_from_ini(path: &std::path::Path, config_dir: &PathBuf) -> Result<Self> {
        let mut ini = Ini::new();
        ini.load(path)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

        let defaults = Config::default_for(config_dir);

        let export_directory = ini
            .get("export", "export_directory")
            .map(|s| expand_tilde(&s))
            .unwrap_or(defaults.export_directory);

        let default_export_format = ini
            .get("export", "default_format")
            .unwrap_or(defaults.default_export_format);

        Ok(Self {
            export_directory,
            default_export_format,
        })
    }

    /// Save config to an INI-style file with comments explaining each field.
    fn save_to_ini(&self, path: &std::path::Path) -> Result<()> {
        let export_str = self.export_directory.to_string_lossy();

        let content = format!(
            r#"; credkit configuration
; Location: {path}
;
; Edit this file to change default settings.
; Lines starting with ; or # are comments.

[export]
; Directory where exported credential sheets are saved.
; Supports ~ for home directory.
export_directory = {export_dir}

; Default export format: text (one field per line) or json
default_format = {export_fmt}
"#,
            path = path.display(),
            export_dir = export_str,
            export_fmt = self.default_export_format,
        );

        fs::write(path, content)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }
}

/// Expand `~` at the start of a path to the user's home directory.
fn expand_tilde(s: &str) -> PathBuf {
    if s.starts_with("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(&s[2..]);
        }
    }
    PathBuf::from(s)
}

/// Resolve the credkit config directory to `~/.config/credkit/` regardless of OS.
pub fn resolve_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("credkit"))
}

// ─── Storage ─────────────────────────────────────────────────────────────────

/// Storage manager for configuration and exports.
///
/// On construction it ensures the directory tree exists:
///
/// ```text
/// ~/.config/credkit/
///   config.ini
///   exports/
/// ```
pub struct Storage {
    /// Base config directory (~/.config/credkit)
    config_dir: PathBuf,
    /// Configuration
    pub config: Config,
}

impl Storage {
    /// Create a new storage manager.
    ///
    /// 1. Resolves the config directory (`~/.config/credkit`).
    /// 2. Creates it if missing.
    /// 3. Loads `config.ini` if it exists, otherwise writes a default one.
    /// 4. Creates the export directory if missing.
    pub fn new() -> Result<Self> {
        let config_dir = resolve_config_dir()
            .context("Could not determine home directory (is $HOME set?)")?;

        let config_path = config_dir.join("config.ini");

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config dir: {:?}", config_dir))?;
            tracing::info!("Created config directory: {:?}", config_dir);
        }

        let config = if config_path.exists() {
            match Config::load_from_ini(&config_path, &config_dir) {
                Ok(cfg) => cfg,
                Err(e) => {
                    tracing::warn!("Failed to parse config.ini, using defaults: {}", e);
                    Config::default_for(&config_dir)
                }
            }
        } else {
            tracing::info!("No config.ini found — creating default at {:?}", config_path);
            let config = Config::default_for(&config_dir);
            if let Err(e) = config.save_to_ini(&config_path) {
                tracing::warn!("Could not write default config.ini: {}", e);
            }
            config
        };

        if !config.export_directory.exists() {
            fs::create_dir_all(&config.export_directory).with_context(|| {
                format!("Failed to create export dir: {:?}", config.export_directory)
            })?;
            tracing::info!("Created export directory: {:?}", config.export_directory);
        }

        Ok(Self { config_dir, config })
    }

    /// Save the current configuration back to `config.ini`.
    #[allow(dead_code)]
    pub fn save_config(&self) -> Result<()> {
        let config_path = self.config_dir.join("config.ini");
        self.config.save_to_ini(&config_path)?;
        tracing::info!("Saved config to {:?}", config_path);
        Ok(())
    }

    /// Get the export directory path (from config, default `~/.config/credkit/exports`)
    pub fn export_dir(&self) -> &PathBuf {
        &self.config.export_directory
    }
}
