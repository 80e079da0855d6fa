//! Application configuration for dexgen.
//!
//! User config lives at `~/.dexgen/dexgen.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DexError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "dexgen.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".dexgen";

// ---------------------------------------------------------------------------
// Config structs (matching dexgen.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Input and output locations.
    #[serde(default)]
    pub paths: PathsConfig,

    /// Site presentation.
    #[serde(default)]
    pub site: SiteConfig,
}

/// `[paths]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory scanned recursively for `*.yaml` records.
    #[serde(default = "default_db_dir")]
    pub db_dir: String,

    /// Directory the generated site is written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Stylesheet copied into the site. The built-in one is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stylesheet: Option<String>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            db_dir: default_db_dir(),
            output_dir: default_output_dir(),
            stylesheet: None,
        }
    }
}

fn default_db_dir() -> String {
    "db/pokemon".into()
}
fn default_output_dir() -> String {
    "site".into()
}

/// `[site]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Title of the index page.
    #[serde(default = "default_title")]
    pub title: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
        }
    }
}

fn default_title() -> String {
    "Pokédex".into()
}

// ---------------------------------------------------------------------------
// Build config (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime build configuration, merged from config file + CLI flags.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Record database root.
    pub db_dir: PathBuf,
    /// Site output directory.
    pub output_dir: PathBuf,
    /// Stylesheet to copy through, if any.
    pub stylesheet: Option<PathBuf>,
    /// Index page title.
    pub title: String,
}

impl From<&AppConfig> for BuildConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            db_dir: PathBuf::from(&config.paths.db_dir),
            output_dir: PathBuf::from(&config.paths.output_dir),
            stylesheet: config.paths.stylesheet.as_ref().map(PathBuf::from),
            title: config.site.title.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.dexgen/`).
pub fn config_dir() -> Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| DexError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.dexgen/dexgen.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| DexError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| DexError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| DexError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| DexError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| DexError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("db_dir"));
        assert!(toml_str.contains("output_dir"));
        assert!(!toml_str.contains("stylesheet"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.paths.db_dir, "db/pokemon");
        assert_eq!(parsed.site.title, "Pokédex");
    }

    #[test]
    fn partial_config_falls_back_to_defaults() {
        let toml_str = r#"
[paths]
output_dir = "/tmp/dex"
stylesheet = "assets/dex.css"
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.paths.output_dir, "/tmp/dex");
        assert_eq!(config.paths.db_dir, "db/pokemon");
        assert_eq!(config.paths.stylesheet.as_deref(), Some("assets/dex.css"));
        assert_eq!(config.site.title, "Pokédex");
    }

    #[test]
    fn build_config_from_app_config() {
        let app = AppConfig::default();
        let build = BuildConfig::from(&app);
        assert_eq!(build.db_dir, PathBuf::from("db/pokemon"));
        assert_eq!(build.output_dir, PathBuf::from("site"));
        assert!(build.stylesheet.is_none());
    }

    #[test]
    fn load_config_from_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("dexgen-no-such-config.toml");
        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, DexError::Io { .. }));
    }
}
