//! Check command - classify images as dark, blurry or ok.

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing::{debug, info, warn};
use upload_qa_adapters::FsImageSource;
use upload_qa_core::{
    AnalyzerConfig, BlurConfig, CheckRecord, DarknessConfig, ImageQualityAnalyzer, ImageSource,
    ProgressEvent, ProgressSink, ResultOutput,
};

use super::ExitCode;
use crate::config::AppConfig;
use crate::output::{JsonOutput, OutputFormat, ProgressBar};

/// Hardcoded default values for thresholds.
mod defaults {
    pub const REGION_FACTOR: f64 = 0.5;
    pub const DARK_PIXEL_FACTOR: f64 = 0.5;
    pub const LUMINANCE_THRESHOLD: u8 = 50;
    pub const VARIANCE_THRESHOLD: f64 = 70.0;
}

/// Parse and validate a share (0.0-1.0).
fn parse_factor(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is not in 0.0..=1.0"))
    }
}

/// Parse and validate a non-negative variance threshold.
fn parse_variance(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if value >= 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(format!("{value} is not a non-negative number"))
    }
}

/// Shared arguments for image checks.
#[derive(Args, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct CheckArgs {
    /// Files or directories to check
    pub paths: Vec<PathBuf>,

    /// Recurse into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Share of dark regions above which an image is dark (0.0-1.0)
    #[arg(long, value_parser = parse_factor)]
    pub dark_factor: Option<f64>,

    /// Share of blurry regions above which an image is blurry (0.0-1.0)
    #[arg(long, value_parser = parse_factor)]
    pub blurry_factor: Option<f64>,

    /// Share of dark pixels above which a region is dark (0.0-1.0)
    #[arg(long, value_parser = parse_factor)]
    pub dark_pixel_factor: Option<f64>,

    /// Luminance below which a pixel counts as dark (0-255)
    #[arg(long)]
    pub luminance_threshold: Option<u8>,

    /// Laplacian variance below which a region is blurry
    #[arg(long, value_parser = parse_variance)]
    pub variance_threshold: Option<f64>,

    /// Score regions in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Show progress bar
    #[arg(long)]
    pub progress: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON output (only affects --format json)
    #[arg(long)]
    pub pretty: bool,
}

impl CheckArgs {
    /// Apply configuration file values, respecting CLI precedence.
    ///
    /// Layering priority (lowest to highest):
    /// 1. Hardcoded defaults (in accessor methods)
    /// 2. Config file values (XDG, then project-local)
    /// 3. CLI arguments (already set on self)
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        // Boolean flags: config applies only if the CLI flag was not passed
        if !args.recursive {
            args.recursive = config.general.recursive.unwrap_or(false);
        }
        if !args.parallel {
            args.parallel = config.analysis.parallel.unwrap_or(false);
        }

        args.dark_factor = args.dark_factor.or(config.analysis.dark_region_factor);
        args.blurry_factor = args
            .blurry_factor
            .or(config.analysis.blurry_region_factor);
        args.dark_pixel_factor = args
            .dark_pixel_factor
            .or(config.darkness.dark_pixel_factor);
        args.luminance_threshold = args
            .luminance_threshold
            .or(config.darkness.luminance_threshold);
        args.variance_threshold = args
            .variance_threshold
            .or(config.blur.variance_threshold);

        if args.format.is_none() {
            args.format = config
                .output
                .format
                .as_deref()
                .and_then(OutputFormat::from_config);
        }

        if !args.pretty {
            args.pretty = config.output.pretty.unwrap_or(false);
        }
        if !args.progress {
            args.progress = config.output.progress.unwrap_or(false);
        }

        args
    }

    /// Get output format with fallback to JSONL.
    fn format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }

    /// Build the analyzer configuration, filling unset values with defaults.
    fn analyzer_config(&self) -> AnalyzerConfig {
        AnalyzerConfig {
            dark_region_factor: self.dark_factor.unwrap_or(defaults::REGION_FACTOR),
            blurry_region_factor: self.blurry_factor.unwrap_or(defaults::REGION_FACTOR),
            parallel: self.parallel,
            darkness: DarknessConfig {
                luminance_threshold: self
                    .luminance_threshold
                    .unwrap_or(defaults::LUMINANCE_THRESHOLD),
                dark_pixel_factor: self
                    .dark_pixel_factor
                    .unwrap_or(defaults::DARK_PIXEL_FACTOR),
            },
            blur: BlurConfig {
                variance_threshold: self
                    .variance_threshold
                    .unwrap_or(defaults::VARIANCE_THRESHOLD),
            },
        }
    }
}

/// Result of running the check command.
#[allow(dead_code)] // Fields exposed for programmatic use
#[derive(Debug)]
pub struct CheckResult {
    /// Number of images decoded and scored.
    pub checked: usize,
    /// Number of images that could not be decoded.
    pub skipped: usize,
    /// Number of images judged dark or blurry.
    pub rejected: usize,
    /// Exit code.
    pub exit_code: ExitCode,
}

/// Run the check command.
///
/// Expects `args` to have been processed through `with_config()` first
/// to apply configuration file settings.
pub fn run(args: &CheckArgs) -> Result<CheckResult> {
    info!("Running check command on {} paths", args.paths.len());

    if args.paths.is_empty() {
        anyhow::bail!("No paths specified");
    }

    let source = FsImageSource::new(args.paths.clone(), args.recursive);
    let total = source.count_hint();

    // Determine if we should show progress
    let show_progress = !args.quiet && (args.progress || std::io::stderr().is_terminal());
    let progress_bar = ProgressBar::new(total.map(|t| t as u64), args.quiet, show_progress);

    let output = JsonOutput::stdout(args.format(), args.pretty);

    let config = args.analyzer_config();
    debug!("Analyzer config: {config:?}");
    let analyzer = ImageQualityAnalyzer::new(config);

    process_images(&source, &analyzer, &output, &progress_bar)
}

/// Check every image from `source`, writing one record per image.
///
/// Images that fail to decode are reported as skipped and recorded with an
/// unevaluated `ok` report.
pub fn process_images(
    source: &dyn ImageSource,
    analyzer: &ImageQualityAnalyzer,
    output: &dyn ResultOutput,
    progress: &dyn ProgressSink,
) -> Result<CheckResult> {
    let total = source.count_hint();
    let mut checked = 0usize;
    let mut skipped = 0usize;
    let mut rejected = 0usize;

    for (index, (path, loaded)) in source.images().enumerate() {
        progress.on_event(ProgressEvent::Started {
            path: path.clone(),
            index,
            total,
        });

        let (dimensions, report) = match loaded {
            Ok(image) => {
                checked += 1;
                (Some(image.dimensions()), analyzer.inspect(Some(&image)))
            }
            Err(e) => {
                warn!("{e:#}");
                skipped += 1;
                progress.on_event(ProgressEvent::Skipped {
                    path: path.clone(),
                    reason: format!("{e:#}"),
                });
                (None, analyzer.inspect(None))
            }
        };

        if report.verdict.is_rejected() {
            rejected += 1;
        }

        let record = CheckRecord {
            path,
            timestamp: iso_timestamp(),
            dimensions,
            report,
        };

        if dimensions.is_some() {
            progress.on_event(ProgressEvent::Completed {
                record: record.clone(),
            });
        }

        output.write(&record)?;
    }

    output.flush()?;

    progress.on_event(ProgressEvent::Finished {
        checked,
        skipped,
        rejected,
    });

    let exit_code = if rejected > 0 {
        ExitCode::IssuesFound
    } else {
        ExitCode::Success
    };

    Ok(CheckResult {
        checked,
        skipped,
        rejected,
        exit_code,
    })
}

/// Generate ISO 8601 UTC timestamp (RFC 3339 format).
fn iso_timestamp() -> String {
    match time::OffsetDateTime::now_utc().format(&time::format_description::well_known::Rfc3339) {
        Ok(ts) => ts,
        Err(e) => {
            debug!("Timestamp format failed: {e}");
            String::from("1970-01-01T00:00:00Z")
        }
    }
}
