mod settings;

use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use transect_core::captions::infrastructure::srt_caption_writer::SrtCaptionWriter;
use transect_core::clipping::domain::clip_boundary::ClipLength;
use transect_core::media::infrastructure::ffmpeg_clip_extractor::FfmpegClipExtractor;
use transect_core::media::infrastructure::ffmpeg_media_probe::FfmpegMediaProbe;
use transect_core::pipeline::batch_summary::BatchSummary;
use transect_core::pipeline::clip_videos_use_case::ClipVideosUseCase;
use transect_core::pipeline::diagnostics::LogDiagnosticReporter;
use transect_core::pipeline::generate_captions_use_case::GenerateCaptionsUseCase;
use transect_core::survey::domain::dive_log_index::DiveLogColumns;
use transect_core::survey::domain::telemetry_layout::TelemetrySchema;
use transect_core::survey::infrastructure::csv_dive_log_reader::CsvDiveLogReader;
use transect_core::survey::infrastructure::csv_telemetry_reader::CsvTelemetryReader;

use settings::Settings;

/// Transect clipping and telemetry captions for ROV survey video.
#[derive(Parser)]
#[command(name = "transect", version)]
struct Cli {
    /// JSON settings file (default: <config dir>/transect/settings.json).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Cut source videos into fixed-length clips covering each dive's transect.
    Clip {
        /// Directory of source videos named TRIP_DIVE_YYYYMMDD_HHMMSS.ext.
        videos: PathBuf,

        /// Dive log CSV with transect start and end times.
        dive_log: PathBuf,

        /// Directory for the clips (created if missing).
        output: PathBuf,

        /// Clip length in minutes.
        #[arg(long)]
        clip_minutes: Option<u32>,

        /// 1-based dive log column holding the dive name.
        #[arg(long)]
        dive_column: Option<usize>,

        /// 1-based dive log column holding the transect start.
        #[arg(long)]
        start_column: Option<usize>,

        /// 1-based dive log column holding the transect end.
        #[arg(long)]
        end_column: Option<usize>,
    },

    /// Write an SRT caption file next to every clip.
    Captions {
        /// Directory of clips.
        clips: PathBuf,

        /// Telemetry log CSV.
        telemetry: PathBuf,

        /// Telemetry fields to caption (comma-separated, in display order).
        #[arg(long, value_delimiter = ',')]
        fields: Option<Vec<String>>,

        /// Telemetry column holding the row timestamp.
        #[arg(long)]
        datetime_field: Option<String>,

        /// Telemetry column holding the dive name.
        #[arg(long)]
        dive_field: Option<String>,

        /// Tokens stripped from field names to build labels (comma-separated).
        #[arg(long, value_delimiter = ',')]
        noise_tokens: Option<Vec<String>>,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut settings = Settings::load(cli.config.as_deref())?;
    apply_overrides(&mut settings, &cli.command);
    validate(&cli.command, &settings)?;

    let summary = match &cli.command {
        Command::Clip {
            videos,
            dive_log,
            output,
            ..
        } => run_clip(videos, dive_log, output, &settings)?,
        Command::Captions {
            clips, telemetry, ..
        } => run_captions(clips, telemetry, &settings)?,
    };

    log::info!("Done: {summary}");
    Ok(())
}

fn run_clip(
    videos: &Path,
    dive_log: &Path,
    output: &Path,
    settings: &Settings,
) -> Result<BatchSummary, Box<dyn std::error::Error>> {
    let columns = DiveLogColumns {
        dive: settings.dive_column,
        start: settings.start_column,
        end: settings.end_column,
    };
    let index = CsvDiveLogReader::new(columns).read(dive_log)?;
    let minutes = NonZeroU32::new(settings.clip_minutes).ok_or("Clip length must be positive")?;

    let mut use_case = ClipVideosUseCase::new(
        Box::new(FfmpegMediaProbe::new()),
        Box::new(FfmpegClipExtractor::new()),
        index,
        ClipLength::from_minutes(minutes),
        Box::new(LogDiagnosticReporter::new()),
    );
    Ok(use_case.execute(videos, output)?)
}

fn run_captions(
    clips: &Path,
    telemetry: &Path,
    settings: &Settings,
) -> Result<BatchSummary, Box<dyn std::error::Error>> {
    let index = CsvTelemetryReader::new(telemetry_schema(settings)).read(telemetry)?;

    let mut use_case = GenerateCaptionsUseCase::new(
        Box::new(FfmpegMediaProbe::new()),
        index,
        Box::new(SrtCaptionWriter::new()),
        Box::new(LogDiagnosticReporter::new()),
    );
    Ok(use_case.execute(clips)?)
}

fn telemetry_schema(settings: &Settings) -> TelemetrySchema {
    TelemetrySchema {
        datetime_field: settings.datetime_field.clone(),
        dive_field: settings.dive_field.clone(),
        fields: settings.caption_fields.clone(),
        noise_tokens: settings.label_noise_tokens.clone(),
    }
}

/// Command-line values win over the settings file.
fn apply_overrides(settings: &mut Settings, command: &Command) {
    match command {
        Command::Clip {
            clip_minutes,
            dive_column,
            start_column,
            end_column,
            ..
        } => {
            if let Some(v) = clip_minutes {
                settings.clip_minutes = *v;
            }
            if let Some(v) = dive_column {
                settings.dive_column = *v;
            }
            if let Some(v) = start_column {
                settings.start_column = *v;
            }
            if let Some(v) = end_column {
                settings.end_column = *v;
            }
        }
        Command::Captions {
            fields,
            datetime_field,
            dive_field,
            noise_tokens,
            ..
        } => {
            if let Some(v) = fields {
                settings.caption_fields = v.clone();
            }
            if let Some(v) = datetime_field {
                settings.datetime_field = v.clone();
            }
            if let Some(v) = dive_field {
                settings.dive_field = v.clone();
            }
            if let Some(v) = noise_tokens {
                settings.label_noise_tokens = v.clone();
            }
        }
    }
}

fn validate(command: &Command, settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Clip {
            videos,
            dive_log,
            output,
            ..
        } => {
            require_dir(videos)?;
            require_file(dive_log)?;
            if is_same_dir(videos, output) {
                return Err(format!(
                    "Output directory must differ from the videos directory: {}",
                    output.display()
                )
                .into());
            }
            if settings.clip_minutes == 0 {
                return Err("Clip length must be at least 1 minute".into());
            }
            for (name, column) in [
                ("Dive", settings.dive_column),
                ("Start", settings.start_column),
                ("End", settings.end_column),
            ] {
                if column == 0 {
                    return Err(format!("{name} column is 1-based, got 0").into());
                }
            }
        }
        Command::Captions {
            clips, telemetry, ..
        } => {
            require_dir(clips)?;
            require_file(telemetry)?;
            if settings.caption_fields.iter().all(|f| f.trim().is_empty()) {
                return Err("At least one caption field is required".into());
            }
            if settings.datetime_field.is_empty() || settings.dive_field.is_empty() {
                return Err("Datetime and dive field names must not be empty".into());
            }
        }
    }
    Ok(())
}

fn require_dir(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if !path.is_dir() {
        return Err(format!("Directory not found: {}", path.display()).into());
    }
    Ok(())
}

/// Compares resolved paths; an output that does not exist yet never matches.
fn is_same_dir(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn require_file(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if !path.is_file() {
        return Err(format!("File not found: {}", path.display()).into());
    }
    Ok(())
}
