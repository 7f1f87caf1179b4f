//! Observability setup: structured JSON-lines logging.
//!
//! Nothing here writes to stdout, which carries command output (and is what
//! `--json` consumers parse). Logs go to a file, or to stderr as a fallback.

use anyhow::{Result, anyhow};
use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::Event;
use tracing::field::{Field, Visit};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::layer::{Context as LayerContext, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;

const SERVICE: &str = env!("CARGO_PKG_NAME");
const ENV_LOG_PATH: &str = "VERTXT_LOG_PATH";
const ENV_LOG_DIR: &str = "VERTXT_LOG_DIR";

#[derive(Debug, PartialEq, Eq)]
struct LogTarget {
    dir: PathBuf,
    file_name: String,
}

/// Install the global subscriber, logging to the first usable target.
///
/// Falls back to stderr when no log file can be opened. Hold the returned
/// guard until exit so buffered lines get flushed.
pub fn init_observability(log_dir: Option<&Path>, env_filter: EnvFilter) -> Result<WorkerGuard> {
    let (writer, guard) = match log_writer(log_dir) {
        Ok(pair) => pair,
        Err(err) => {
            eprintln!("Warning: {err}. Falling back to stderr logging.");
            tracing_appender::non_blocking(std::io::stderr())
        }
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(JsonLogLayer { writer })
        .try_init()?;

    tracing::debug!("observability initialized");
    Ok(guard)
}

/// Build an `EnvFilter` from CLI flags and environment.
///
/// Priority: quiet flag > verbose flag > RUST_LOG env > default_level
pub fn env_filter(quiet: bool, verbose: u8, default_level: &str) -> EnvFilter {
    if quiet {
        return EnvFilter::new("error");
    }

    match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    }
}

// ============================================================================
// JSON Log Layer
// ============================================================================

/// Writes one JSON object per event, carrying the fields of enclosing spans.
struct JsonLogLayer {
    writer: NonBlocking,
}

impl<S> tracing_subscriber::Layer<S> for JsonLogLayer
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        id: &tracing::span::Id,
        ctx: LayerContext<'_, S>,
    ) {
        if let Some(span) = ctx.span(id) {
            let mut fields = FieldMap::default();
            attrs.record(&mut fields);
            span.extensions_mut().insert(fields);
        }
    }

    fn on_event(&self, event: &Event<'_>, ctx: LayerContext<'_, S>) {
        let metadata = event.metadata();
        let mut line = Map::new();
        line.insert(
            "timestamp".into(),
            Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true).into(),
        );
        line.insert("level".into(), metadata.level().as_str().to_lowercase().into());
        line.insert("target".into(), metadata.target().into());

        // Span fields first so event fields win on collision.
        for span in ctx.event_scope(event).into_iter().flat_map(|s| s.from_root()) {
            if let Some(fields) = span.extensions().get::<FieldMap>() {
                line.extend(fields.0.clone());
            }
        }

        let mut fields = FieldMap::default();
        event.record(&mut fields);
        line.extend(fields.0);

        let mut writer = self.writer.clone();
        if serde_json::to_writer(&mut writer, &Value::Object(line)).is_ok() {
            let _ = writer.write_all(b"\n");
        }
    }
}

#[derive(Clone, Debug, Default)]
struct FieldMap(Map<String, Value>);

impl Visit for FieldMap {
    fn record_bool(&mut self, field: &Field, value: bool) {
        self.0.insert(field.name().into(), value.into());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.0.insert(field.name().into(), value.into());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.0.insert(field.name().into(), value.into());
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().into(), value.into());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.0.insert(field.name().into(), format!("{value:?}").into());
    }
}

// ============================================================================
// Log Target Resolution
// ============================================================================

fn log_writer(config_dir: Option<&Path>) -> Result<(NonBlocking, WorkerGuard)> {
    let target = resolve_log_target(
        std::env::var_os(ENV_LOG_PATH).map(PathBuf::from),
        std::env::var_os(ENV_LOG_DIR).map(PathBuf::from),
        config_dir.map(Path::to_path_buf),
    )?;

    let appender = tracing_appender::rolling::daily(&target.dir, &target.file_name);
    Ok(tracing_appender::non_blocking(appender))
}

/// Pick where logs go.
///
/// Order: `VERTXT_LOG_PATH` > `VERTXT_LOG_DIR` > config `log_dir` > the
/// platform data directory.
fn resolve_log_target(
    path_override: Option<PathBuf>,
    dir_override: Option<PathBuf>,
    config_dir: Option<PathBuf>,
) -> Result<LogTarget> {
    if let Some(path) = path_override {
        let file_name = path
            .file_name()
            .and_then(std::ffi::OsStr::to_str)
            .ok_or_else(|| anyhow!("{ENV_LOG_PATH} must end in a UTF-8 file name"))?
            .to_string();
        let dir = path.parent().unwrap_or_else(|| Path::new(".")).to_path_buf();
        return writable(LogTarget { dir, file_name });
    }

    let dir = dir_override
        .or(config_dir)
        .or_else(|| {
            directories::ProjectDirs::from("", "", SERVICE)
                .map(|dirs| dirs.data_local_dir().join("logs"))
        })
        .ok_or_else(|| anyhow!("no log directory could be determined"))?;

    writable(LogTarget {
        dir,
        file_name: format!("{SERVICE}.jsonl"),
    })
}

fn writable(target: LogTarget) -> Result<LogTarget> {
    std::fs::create_dir_all(&target.dir)
        .map_err(|e| anyhow!("failed to create log directory {}: {e}", target.dir.display()))?;

    let path = target.dir.join(&target.file_name);
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| anyhow!("failed to open log file {}: {e}", path.display()))?;

    Ok(target)
}
