//! Configuration file support for upload-qa.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/upload-qa/config.toml` (lowest priority)
//! - Project-local: `.upload-qa.toml` (searched up directory tree)
//! - CLI flags (highest priority, applied separately)

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

/// Project-local config file name.
pub const PROJECT_CONFIG_NAME: &str = ".upload-qa.toml";

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// General options.
    pub general: GeneralConfig,
    /// Whole-image aggregation settings.
    pub analysis: AnalysisConfig,
    /// Per-region darkness settings.
    pub darkness: DarknessConfig,
    /// Per-region blur settings.
    pub blur: BlurConfig,
    /// Output formatting settings.
    pub output: OutputConfig,
}

/// General configuration options.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Recurse into subdirectories by default.
    pub recursive: Option<bool>,
}

/// Whole-image aggregation configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Score regions in parallel.
    pub parallel: Option<bool>,
    /// Share of dark regions that makes an image dark (0.0-1.0).
    pub dark_region_factor: Option<f64>,
    /// Share of blurry regions that makes an image blurry (0.0-1.0).
    pub blurry_region_factor: Option<f64>,
}

/// Darkness scoring configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct DarknessConfig {
    /// Luminance below which a pixel is dark (0-255).
    pub luminance_threshold: Option<u8>,
    /// Share of dark pixels that makes a region dark (0.0-1.0).
    pub dark_pixel_factor: Option<f64>,
}

/// Blur scoring configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct BlurConfig {
    /// Laplacian variance below which a region is blurry.
    pub variance_threshold: Option<f64>,
}

/// Output formatting configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: "json" or "jsonl".
    pub format: Option<String>,
    /// Pretty-print JSON output.
    pub pretty: Option<bool>,
    /// Show progress bar.
    pub progress: Option<bool>,
}

impl AppConfig {
    /// Load configuration from XDG and project-local files.
    ///
    /// Missing files are silently ignored. Invalid values are reported as
    /// warnings and otherwise applied as parsed.
    pub fn load() -> Self {
        let cwd = std::env::current_dir().ok();
        Self::load_from(xdg_config_path().as_deref(), cwd.as_deref())
    }

    /// Load configuration from an explicit XDG path and working directory.
    pub fn load_from(xdg_path: Option<&Path>, cwd: Option<&Path>) -> Self {
        let mut config = Self::default();

        // Load XDG config (lowest priority)
        if let Some(xdg_path) = xdg_path {
            if xdg_path.exists() {
                info!("Loading XDG config: {}", xdg_path.display());
                if let Some(xdg_config) = load_file(xdg_path) {
                    config = xdg_config;
                }
            } else {
                debug!("XDG config not found: {}", xdg_path.display());
            }
        }

        // Load project-local config (higher priority, merged)
        if let Some(project_path) = cwd.and_then(find_config_in_parents) {
            info!("Loading project config: {}", project_path.display());
            if let Some(project_config) = load_file(&project_path) {
                config.merge(project_config);
            }
        }

        if let Err(e) = config.validate() {
            eprintln!("warning: {e}");
        }

        config
    }

    /// Validate configuration values are within acceptable ranges.
    fn validate(&self) -> Result<(), String> {
        let factors = [
            ("analysis.dark_region_factor", self.analysis.dark_region_factor),
            (
                "analysis.blurry_region_factor",
                self.analysis.blurry_region_factor,
            ),
            ("darkness.dark_pixel_factor", self.darkness.dark_pixel_factor),
        ];
        for (name, value) in factors {
            if let Some(v) = value {
                if !(0.0..=1.0).contains(&v) {
                    return Err(format!("{name} must be 0.0-1.0, got {v}"));
                }
            }
        }

        if let Some(v) = self.blur.variance_threshold {
            if !(v >= 0.0 && v.is_finite()) {
                return Err(format!(
                    "blur.variance_threshold must be a non-negative number, got {v}"
                ));
            }
        }

        if let Some(ref f) = self.output.format {
            if f != "json" && f != "jsonl" {
                return Err(format!(
                    "output.format must be 'json' or 'jsonl', got '{f}'"
                ));
            }
        }

        Ok(())
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` when present.
    fn merge(&mut self, other: Self) {
        self.general.recursive = other.general.recursive.or(self.general.recursive);

        self.analysis.parallel = other.analysis.parallel.or(self.analysis.parallel);
        self.analysis.dark_region_factor = other
            .analysis
            .dark_region_factor
            .or(self.analysis.dark_region_factor);
        self.analysis.blurry_region_factor = other
            .analysis
            .blurry_region_factor
            .or(self.analysis.blurry_region_factor);

        self.darkness.luminance_threshold = other
            .darkness
            .luminance_threshold
            .or(self.darkness.luminance_threshold);
        self.darkness.dark_pixel_factor = other
            .darkness
            .dark_pixel_factor
            .or(self.darkness.dark_pixel_factor);

        self.blur.variance_threshold = other
            .blur
            .variance_threshold
            .or(self.blur.variance_threshold);

        self.output.format = other.output.format.or_else(|| self.output.format.take());
        self.output.pretty = other.output.pretty.or(self.output.pretty);
        self.output.progress = other.output.progress.or(self.output.progress);
    }
}

/// Get the XDG config file path.
fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("upload-qa").join("config.toml"))
}

/// Search for `.upload-qa.toml` in the given directory and its parents.
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);

    while let Some(dir) = current {
        let config_path = dir.join(PROJECT_CONFIG_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        current = dir.parent();
    }

    None
}

/// Load and parse a TOML config file.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Failed to read config file {}: {}", path.display(), e);
            return None;
        }
    };

    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!("Failed to parse config file {}: {}", path.display(), e);
            None
        }
    }
}
