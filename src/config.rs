//! Browser configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! overridden by the user's file, key by key: a config file only needs the
//! values it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! title = "GhostMicro"
//! base_url = "/"            # Prefix for every link in the generated site
//!
//! [projects]
//! page_size = 6             # Tutorials per page (>= 1)
//! # source = "projects.toml" # Replace the built-in projects with a file
//!
//! [modules]
//! # page_size = 12          # Omit to show every module on one page
//! # source = "modules.json"  # Replace the built-in modules with a file
//! download_base = "/downloads/"
//!
//! [colors]
//! background = "#05060a"
//! panel = "#0d0f17"
//! text = "#f5f7fa"
//! text_muted = "#8a8f98"
//! accent_modules = "#22d3ee"
//! accent_projects = "#fb923c"
//! ```
//!
//! Unknown keys are rejected to catch typos early. Relative `source` paths
//! resolve against the directory holding `config.toml`.

use crate::data::PROJECT_PAGE_SIZE;
use crate::paginate::PageSize;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Browser configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BrowserConfig {
    /// Site identity used by the generated pages.
    pub site: SiteSettings,
    /// Project hub settings.
    pub projects: ProjectsConfig,
    /// Library hub settings.
    pub modules: ModulesConfig,
    /// Palette for the generated site.
    pub colors: ColorConfig,
}

impl BrowserConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.title.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site.title must not be empty".into(),
            ));
        }
        if !self.site.base_url.ends_with('/') {
            return Err(ConfigError::Validation(
                "site.base_url must end with '/'".into(),
            ));
        }
        if self.projects.page_size == 0 {
            return Err(ConfigError::Validation(
                "projects.page_size must be at least 1".into(),
            ));
        }
        if self.modules.page_size == Some(0) {
            return Err(ConfigError::Validation(
                "modules.page_size must be at least 1 (omit it to disable pagination)".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSettings {
    pub title: String,
    /// Link prefix, must end with `/`. Use `/` when serving from the domain
    /// root, `/catalog/` when serving from a subdirectory.
    pub base_url: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            title: "GhostMicro".to_string(),
            base_url: "/".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectsConfig {
    /// Tutorials per page.
    pub page_size: usize,
    /// Optional catalog file replacing the built-in projects.
    pub source: Option<PathBuf>,
}

impl Default for ProjectsConfig {
    fn default() -> Self {
        Self {
            page_size: PROJECT_PAGE_SIZE,
            source: None,
        }
    }
}

impl ProjectsConfig {
    pub fn pagination(&self) -> PageSize {
        PageSize::from_count(self.page_size)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModulesConfig {
    /// Modules per page. When absent, the hub lists every match at once.
    pub page_size: Option<usize>,
    /// Optional catalog file replacing the built-in modules.
    pub source: Option<PathBuf>,
    /// URL prefix module archives are downloaded from.
    pub download_base: String,
}

impl Default for ModulesConfig {
    fn default() -> Self {
        Self {
            page_size: None,
            source: None,
            download_base: "/downloads/".to_string(),
        }
    }
}

impl ModulesConfig {
    pub fn pagination(&self) -> PageSize {
        self.page_size
            .map_or(PageSize::Unpaginated, PageSize::from_count)
    }

    /// Download URL of a module archive.
    pub fn download_url(&self, file: &str) -> String {
        if self.download_base.ends_with('/') {
            format!("{}{}", self.download_base, file)
        } else {
            format!("{}/{}", self.download_base, file)
        }
    }
}

/// Palette of the generated site (a single dark scheme).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub background: String,
    /// Card and panel fill.
    pub panel: String,
    pub text: String,
    /// Descriptions, footers, disabled controls.
    pub text_muted: String,
    /// Highlight colour of the library hub.
    pub accent_modules: String,
    /// Highlight colour of the project hub.
    pub accent_projects: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            background: "#05060a".to_string(),
            panel: "#0d0f17".to_string(),
            text: "#f5f7fa".to_string(),
            text_muted: "#8a8f98".to_string(),
            accent_modules: "#22d3ee".to_string(),
            accent_projects: "#fb923c".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged onto.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(BrowserConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join("config.toml");
    if !config_path.exists() {
        tracing::debug!(dir = %dir.display(), "no config.toml, using stock defaults");
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<BrowserConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: BrowserConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
pub fn load_config(dir: &Path) -> Result<BrowserConfig, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(dir)?)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Ghost Catalog Configuration
# ===========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Site
# ---------------------------------------------------------------------------
[site]
# Title shown in page headers and the browser tab.
title = "GhostMicro"

# Prefix for every generated link. Must end with "/".
base_url = "/"

# ---------------------------------------------------------------------------
# Project hub
# ---------------------------------------------------------------------------
[projects]
# Tutorials per page (at least 1).
page_size = 6

# Catalog file (.toml or .json) replacing the built-in projects.
# Relative paths resolve against this file's directory.
# source = "projects.toml"

# ---------------------------------------------------------------------------
# Library hub
# ---------------------------------------------------------------------------
[modules]
# Modules per page. Omit to list every module on a single page.
# page_size = 12

# Catalog file (.toml or .json) replacing the built-in modules.
# source = "modules.json"

# URL prefix module archives are served from.
download_base = "/downloads/"

# ---------------------------------------------------------------------------
# Colors (generated site)
# ---------------------------------------------------------------------------
[colors]
background = "#05060a"
panel = "#0d0f17"
text = "#f5f7fa"
text_muted = "#8a8f98"      # Descriptions, footers, disabled controls
accent_modules = "#22d3ee"  # Library hub highlight
accent_projects = "#fb923c" # Project hub highlight
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-bg: {background};
    --color-panel: {panel};
    --color-text: {text};
    --color-text-muted: {text_muted};
    --accent-modules: {accent_modules};
    --accent-projects: {accent_projects};
}}"#,
        background = colors.background,
        panel = colors.panel,
        text = colors.text,
        text_muted = colors.text_muted,
        accent_modules = colors.accent_modules,
        accent_projects = colors.accent_projects,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = BrowserConfig::default();
        assert_eq!(config.site.title, "GhostMicro");
        assert_eq!(config.site.base_url, "/");
        assert_eq!(config.projects.page_size, 6);
        assert_eq!(config.modules.page_size, None);
        assert_eq!(config.modules.download_base, "/downloads/");
    }

    #[test]
    fn default_pagination_policies() {
        let config = BrowserConfig::default();
        assert_eq!(config.projects.pagination(), PageSize::from_count(6));
        assert_eq!(config.modules.pagination(), PageSize::Unpaginated);
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
[projects]
page_size = 4
"#;
        let config: BrowserConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.projects.page_size, 4);
        // Defaults preserved
        assert_eq!(config.site.title, "GhostMicro");
        assert_eq!(config.colors.accent_projects, "#fb923c");
    }

    #[test]
    fn parse_sources() {
        let toml = r#"
[projects]
source = "data/projects.toml"

[modules]
source = "data/modules.json"
page_size = 10
"#;
        let config: BrowserConfig = toml::from_str(toml).unwrap();
        assert_eq!(
            config.projects.source.as_deref(),
            Some(Path::new("data/projects.toml"))
        );
        assert_eq!(config.modules.pagination(), PageSize::from_count(10));
    }

    #[test]
    fn download_url_joins_with_single_slash() {
        let mut modules = ModulesConfig::default();
        assert_eq!(modules.download_url("DHT.zip"), "/downloads/DHT.zip");
        modules.download_base = "https://cdn.example.com/files".to_string();
        assert_eq!(
            modules.download_url("DHT.zip"),
            "https://cdn.example.com/files/DHT.zip"
        );
    }

    #[test]
    fn generate_css_uses_config_colors() {
        let mut colors = ColorConfig::default();
        colors.accent_projects = "#ff0000".to_string();
        let css = generate_color_css(&colors);
        assert!(css.contains("--accent-projects: #ff0000"));
        assert!(css.contains("--color-bg: #05060a"));
        assert!(css.contains("--color-text-muted:"));
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.projects.page_size, 6);
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
[site]
title = "Lab Nodes"

[modules]
download_base = "/files/"
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.site.title, "Lab Nodes");
        assert_eq!(config.modules.download_base, "/files/");
        // Unspecified values are defaults
        assert_eq!(config.site.base_url, "/");
        assert_eq!(config.projects.page_size, 6);
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "this is not valid toml [[[").unwrap();
        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str(r#"page_size = 6"#).unwrap();
        let overlay: toml::Value = toml::from_str(r#"page_size = 9"#).unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("page_size").unwrap().as_integer(), Some(9));
    }

    #[test]
    fn merge_toml_deep_nested() {
        let base: toml::Value = toml::from_str(
            r##"
[colors]
background = "#000"
text = "#fff"
"##,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(
            r##"
[colors]
background = "#111"
"##,
        )
        .unwrap();
        let merged = merge_toml(base, overlay);
        let colors = merged.get("colors").unwrap();
        assert_eq!(colors.get("background").unwrap().as_str(), Some("#111"));
        assert_eq!(colors.get("text").unwrap().as_str(), Some("#fff"));
    }

    #[test]
    fn merge_toml_adds_new_keys() {
        let base = stock_defaults_value();
        let overlay: toml::Value = toml::from_str(
            r#"
[modules]
page_size = 3
"#,
        )
        .unwrap();
        let merged = merge_toml(base, overlay);
        let modules = merged.get("modules").unwrap();
        assert_eq!(modules.get("page_size").unwrap().as_integer(), Some(3));
        assert_eq!(
            modules.get("download_base").unwrap().as_str(),
            Some("/downloads/")
        );
    }

    // =========================================================================
    // Unknown key rejection tests
    // =========================================================================

    #[test]
    fn unknown_key_rejected() {
        let toml_str = r#"
[projects]
page_sise = 6
"#;
        let result: Result<BrowserConfig, _> = toml::from_str(toml_str);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    #[test]
    fn unknown_section_rejected() {
        let result: Result<BrowserConfig, _> = toml::from_str("[projectz]\npage_size = 6\n");
        assert!(result.is_err());
    }

    #[test]
    fn unknown_key_rejected_via_load_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "[colors]\naccent = \"#fff\"\n").unwrap();
        assert!(load_config(tmp.path()).is_err());
    }

    // =========================================================================
    // Validation tests
    // =========================================================================

    #[test]
    fn validate_default_config_passes() {
        assert!(BrowserConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_project_page_size_zero() {
        let mut config = BrowserConfig::default();
        config.projects.page_size = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("projects.page_size"));
    }

    #[test]
    fn validate_module_page_size_zero() {
        let mut config = BrowserConfig::default();
        config.modules.page_size = Some(0);
        assert!(config.validate().is_err());
        config.modules.page_size = Some(1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_base_url_trailing_slash() {
        let mut config = BrowserConfig::default();
        config.site.base_url = "/catalog".to_string();
        assert!(config.validate().is_err());
        config.site.base_url = "/catalog/".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_blank_title() {
        let mut config = BrowserConfig::default();
        config.site.title = "   ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "[projects]\npage_size = 0\n").unwrap();
        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // stock_config_toml / stock_defaults_value tests
    // =========================================================================

    #[test]
    fn stock_config_toml_is_valid_toml() {
        let _: toml::Value =
            toml::from_str(stock_config_toml()).expect("stock config must be valid TOML");
    }

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: BrowserConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = BrowserConfig::default();
        assert_eq!(config.site.title, defaults.site.title);
        assert_eq!(config.projects.page_size, defaults.projects.page_size);
        assert_eq!(config.modules.page_size, defaults.modules.page_size);
        assert_eq!(config.modules.download_base, defaults.modules.download_base);
        assert_eq!(config.colors.background, defaults.colors.background);
        assert_eq!(config.colors.accent_modules, defaults.colors.accent_modules);
    }

    #[test]
    fn stock_config_toml_contains_all_sections() {
        let content = stock_config_toml();
        assert!(content.contains("[site]"));
        assert!(content.contains("[projects]"));
        assert!(content.contains("[modules]"));
        assert!(content.contains("[colors]"));
    }

    #[test]
    fn stock_defaults_value_omits_unset_options() {
        let val = stock_defaults_value();
        assert!(val.is_table());
        let modules = val.get("modules").unwrap();
        assert!(modules.get("page_size").is_none());
        assert!(modules.get("source").is_none());
    }
}
