//! Command-line interface components.
//!
//! The binary decodes one already-written sensor line and prints it. It does
//! not watch the file; run it again (or from cron) to get a fresh reading.

use crate::config::{DecoderConfig, Location};
use crate::constants::wet_flag_description;
use crate::decoder::Decoder;
use crate::models::SensorRecord;
use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use colored::*;
use std::fmt::Write as _;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "skyalert")]
#[command(about = "Decode a Boltwood II / SkyAlert cloud sensor data line")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// File holding the sensor line (reads stdin when omitted or `-`)
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Time zone the sensor clock is set to (IANA name or `Local`)
    #[arg(short = 'z', long, value_name = "ZONE")]
    pub timezone: Option<Location>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub format: OutputFormat,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Single-line JSON
    Json,
    /// Indented JSON
    Pretty,
    /// Colored human-readable summary
    Text,
}

impl Args {
    /// Log level implied by `-q` / `-v`
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }

    /// Decoder configuration, falling back to the process zone
    pub fn decoder_config(&self) -> DecoderConfig {
        let config = DecoderConfig::default();
        match self.timezone {
            Some(location) => config.with_location(location),
            None => config,
        }
    }

    /// Path to read from, or `None` for stdin
    pub fn input_path(&self) -> Option<&Path> {
        self.input
            .as_deref()
            .filter(|path| *path != Path::new("-"))
    }
}

/// Set up structured logging on stderr
pub fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("skyalert={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    debug!("Logging initialized at level: {}", log_level);
}

/// First line of `content`, without its terminator
pub fn first_line(content: &[u8]) -> &[u8] {
    let line = match content.iter().position(|&b| b == b'\n') {
        Some(end) => &content[..end],
        None => content,
    };
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Read the sensor line from a file
pub fn read_line_from_file(path: &Path) -> Result<Vec<u8>> {
    let content = std::fs::read(path)
        .with_context(|| format!("Failed to read sensor file {}", path.display()))?;
    Ok(first_line(&content).to_vec())
}

fn read_line_from_stdin() -> Result<Vec<u8>> {
    let mut content = Vec::new();
    std::io::stdin()
        .read_to_end(&mut content)
        .context("Failed to read sensor line from stdin")?;
    Ok(first_line(&content).to_vec())
}

/// Format a decoded record for output
pub fn render(record: &SensorRecord, format: OutputFormat) -> Result<String> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string(record)?,
        OutputFormat::Pretty => serde_json::to_string_pretty(record)?,
        OutputFormat::Text => render_text(record)?,
    };
    Ok(rendered)
}

fn render_text(record: &SensorRecord) -> std::result::Result<String, std::fmt::Error> {
    let t = record.temperature_scale;
    let mut out = String::new();

    writeln!(out, "{:<12}{}", "Time".bold(), record.timestamp)?;
    writeln!(
        out,
        "{:<12}sky {:.1} {t}  ambient {:.1} {t}  sensor {:.1} {t}",
        "Temperature".bold(),
        record.sky_temp,
        record.ambient_temp,
        record.sensor_temp,
    )?;
    writeln!(
        out,
        "{:<12}{:.1} {}  humidity {}%  dew point {:.1} {t}  heater {}%",
        "Wind".bold(),
        record.wind_speed,
        record.wind_scale,
        record.humidity,
        record.dew_point,
        record.dew_heater_percentage,
    )?;
    writeln!(
        out,
        "{:<12}rain {}  wet {}  last good data {}s ago",
        "Flags".bold(),
        wet_flag_description(record.rain_flag),
        wet_flag_description(record.wet_flag),
        record.seconds_since_good_data,
    )?;
    writeln!(
        out,
        "{:<12}cloud {}  wind {}  rain {}  darkness {}",
        "Conditions".bold(),
        record.cloud_condition,
        record.wind_condition,
        record.rain_condition,
        record.darkness_condition,
    )?;

    let roof = if record.is_roof_close_requested() {
        "close requested".red().bold()
    } else {
        "open ok".green()
    };
    let alert = if record.is_alerting() {
        "ALERT".red().bold()
    } else {
        "none".green()
    };
    writeln!(out, "{:<12}{}", "Roof".bold(), roof)?;
    write!(out, "{:<12}{}", "Alert".bold(), alert)?;
    Ok(out)
}

/// Read, decode and print one sensor line
pub fn run(args: &Args) -> Result<()> {
    let decoder = Decoder::new(args.decoder_config());
    info!("Decoding with time zone {}", decoder.location());

    let line = match args.input_path() {
        Some(path) => read_line_from_file(path)?,
        None => read_line_from_stdin()?,
    };

    let record = decoder
        .decode(&line)
        .context("Failed to decode sensor line")?;

    println!("{}", render(&record, args.format)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = "2024-06-11 14:09:57.00 F M 79.6   92.8  93      0      42  66.3   000 1 1 00019 045454.59025 3 1 1 1 1 1";

    fn sample_record() -> SensorRecord {
        Decoder::with_location(chrono_tz::America::Chicago)
            .decode_str(SAMPLE)
            .unwrap()
    }

    #[test]
    fn test_first_line() {
        assert_eq!(first_line(b"abc\r\ndef\n"), b"abc");
        assert_eq!(first_line(b"abc\ndef"), b"abc");
        assert_eq!(first_line(b"abc"), b"abc");
        assert_eq!(first_line(b""), b"");
    }

    #[test]
    fn test_read_line_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}\r", SAMPLE).unwrap();

        let line = read_line_from_file(file.path()).unwrap();
        assert_eq!(line, SAMPLE.as_bytes());
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_line_from_file(Path::new("/nonexistent/skyalert.txt")).unwrap_err();
        assert!(err.to_string().contains("Failed to read sensor file"));
    }

    #[test]
    fn test_parse_args() {
        let args = Args::parse_from([
            "skyalert",
            "--timezone",
            "America/Chicago",
            "-f",
            "json",
            "-vv",
            "data.txt",
        ]);
        assert_eq!(args.timezone, Some(Location::Zone(chrono_tz::America::Chicago)));
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.get_log_level(), "trace");
        assert_eq!(args.input, Some(PathBuf::from("data.txt")));
        assert_eq!(args.input_path(), Some(Path::new("data.txt")));
        assert_eq!(
            args.decoder_config().location,
            Location::Zone(chrono_tz::America::Chicago)
        );
    }

    #[test]
    fn test_parse_args_defaults() {
        let args = Args::parse_from(["skyalert"]);
        assert_eq!(args.format, OutputFormat::Pretty);
        assert_eq!(args.get_log_level(), "info");
        assert_eq!(args.input_path(), None);

        let args = Args::parse_from(["skyalert", "-q", "-"]);
        assert_eq!(args.get_log_level(), "error");
        assert_eq!(args.input_path(), None);
    }

    #[test]
    fn test_bad_timezone_argument() {
        let result = Args::try_parse_from(["skyalert", "--timezone", "Nowhere/Special"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_render_json() {
        let json = render(&sample_record(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["sky_temp"], 79.6);
        assert_eq!(value["alert_condition"], 1);
        assert!(value.get("generated_at").is_none());
        assert!(!json.contains('\n'));

        let pretty = render(&sample_record(), OutputFormat::Pretty).unwrap();
        assert!(pretty.contains("\n  \"humidity\": 42"));
    }

    #[test]
    fn test_render_text() {
        colored::control::set_override(false);
        let text = render(&sample_record(), OutputFormat::Text).unwrap();
        assert!(text.contains("sky 79.6 F"));
        assert!(text.contains("cloud very cloudy"));
        assert!(text.contains("rain within the last minute"));
        assert!(text.contains("close requested"));
        assert!(text.contains("ALERT"));
    }
}
