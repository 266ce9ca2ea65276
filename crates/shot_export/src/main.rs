//! Shot Export CLI
//!
//! 경기 이벤트 JSON 디렉터리 → goal/X/Y 테이블

#[cfg(feature = "cli")]
use anyhow::{Context, Result};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use shot_export::{EntryOrder, ExtractConfig, LineEnding, MissingFieldPolicy, OutputFormat, WriteOptions};
#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "shot_export")]
#[command(about = "Export shot events from match-event JSON files to a goal/X/Y table", long_about = None)]
struct Cli {
    /// Directory holding one JSON event file per match
    #[arg(env = "SHOT_EXPORT_EVENTS_DIR")]
    events_dir: PathBuf,

    /// Output file path
    #[arg(short, long, env = "SHOT_EXPORT_OUT", default_value = shot_export::config::DEFAULT_OUTPUT_FILE)]
    out: PathBuf,

    /// Output delimiter
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,

    /// Terminate rows with CRLF instead of LF
    #[arg(long, default_value = "false")]
    crlf: bool,

    /// Process files in directory listing order instead of sorted by name
    #[arg(long, default_value = "false")]
    listing_order: bool,

    /// Policy for shot events missing location or outcome
    #[arg(long, value_enum, default_value_t = MissingFieldPolicy::Abort)]
    on_missing: MissingFieldPolicy,

    /// Write a JSON run summary to this path
    #[arg(long)]
    summary: Option<PathBuf>,
}

#[cfg(feature = "cli")]
impl Cli {
    fn into_config(self) -> (ExtractConfig, Option<PathBuf>) {
        let config = ExtractConfig {
            events_dir: self.events_dir,
            output: self.out,
            order: if self.listing_order { EntryOrder::Listing } else { EntryOrder::Sorted },
            on_missing: self.on_missing,
            write: WriteOptions {
                format: self.format,
                line_ending: if self.crlf { LineEnding::Crlf } else { LineEnding::Lf },
            },
        };
        (config, self.summary)
    }
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let (config, summary_path) = Cli::parse().into_config();

    let collection = shot_export::load_shots(&config)
        .with_context(|| format!("Failed to load events from {}", config.events_dir.display()))?;
    println!(
        "Finished loading: {} shots from {} files",
        collection.len(),
        collection.files
    );

    println!("Writing output: {}", config.output.display());
    let report = shot_export::write_shots(&collection.shots, &config.output, config.write)
        .context("Failed to write shot table")?;

    let summary = shot_export::RunSummary::new(&config, &collection, &report);
    print_summary(&summary);

    if let Some(path) = summary_path {
        save_summary(&path, &summary)?;
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn print_summary(summary: &shot_export::RunSummary) {
    println!("\n✅ Export finished");
    println!("   Events scanned: {}", summary.events);
    println!("   Shots:          {} ({} goals)", summary.shots, summary.goals);
    if summary.skipped > 0 {
        println!("   Skipped shots:  {}", summary.skipped);
    }
    println!("   Size:           {} bytes", summary.bytes);
    println!("   Checksum:       {}", summary.checksum);
}

#[cfg(feature = "cli")]
fn save_summary(path: &Path, summary: &shot_export::RunSummary) -> Result<()> {
    let json = serde_json::to_string_pretty(summary)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write summary: {}", path.display()))?;
    println!("\n📄 Summary saved to: {}", path.display());
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("shot_export CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
