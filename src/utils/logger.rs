use crate::domain::model::LogFormat;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{MuError, Result};
use crate::utils::validation::validate_path;
use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing::Level;
use tracing_subscriber::{
    layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

pub const LOG_FILE_NAME: &str = "logs.log";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Maps the mu `LOG_LEVEL` names onto tracing levels.
///
/// `WARNING` and `CRITICAL` have no direct tracing counterpart and map to
/// `WARN` and `ERROR`.
pub fn parse_log_level(name: &str) -> Option<Level> {
    match name.trim().to_ascii_uppercase().as_str() {
        "TRACE" => Some(Level::TRACE),
        "DEBUG" => Some(Level::DEBUG),
        "INFO" => Some(Level::INFO),
        "WARN" | "WARNING" => Some(Level::WARN),
        "ERROR" | "CRITICAL" => Some(Level::ERROR),
        _ => None,
    }
}

/// 決定預設的 filter 指令 (RUST_LOG 優先)
pub fn default_directive(log_level: Option<&str>, verbose: bool) -> String {
    if verbose {
        return "mu_sparql_helpers=debug,info".to_string();
    }

    let level = log_level.and_then(parse_log_level).unwrap_or(Level::INFO);
    level.as_str().to_ascii_lowercase()
}

/// Opens (appending) `<dir>/logs.log`, creating the directory first.
pub fn open_log_file(dir: &str) -> Result<File> {
    validate_path("LOG_DIR", dir)?;
    fs::create_dir_all(dir)?;

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(Path::new(dir).join(LOG_FILE_NAME))?;
    Ok(file)
}

fn console_layer(format: LogFormat) -> BoxedLayer {
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    match format {
        LogFormat::Compact => layer.compact().boxed(),
        LogFormat::Json => layer.json().boxed(),
    }
}

fn file_layer(file: File, format: LogFormat) -> BoxedLayer {
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false);

    match format {
        LogFormat::Compact => layer.compact().boxed(),
        LogFormat::Json => layer.json().boxed(),
    }
}

/// Installs the global subscriber: stdout plus, when a log directory is
/// configured, `<LOG_DIR>/logs.log`.
///
/// Returns `Ok(false)` when a global subscriber was already installed.
pub fn init_logger<C: ConfigProvider + ?Sized>(config: &C, verbose: bool) -> Result<bool> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(config.log_level(), verbose)));

    let mut layers: Vec<BoxedLayer> = vec![console_layer(config.log_format())];

    if let Some(dir) = config.log_dir() {
        let file = open_log_file(dir).map_err(|e| MuError::LoggerError {
            message: format!("cannot open log file in {}: {}", dir, e),
        })?;
        layers.push(file_layer(file, config.log_format()));
    }

    match tracing_subscriber::registry().with(layers).with(filter).try_init() {
        Ok(()) => Ok(true),
        Err(e) => {
            tracing::debug!("Logger already initialised: {}", e);
            Ok(false)
        }
    }
}

/// Writes an info-level log message.
pub fn log(msg: &str) {
    tracing::info!("{}", msg);
}
