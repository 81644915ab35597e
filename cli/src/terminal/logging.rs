use std::fmt;

use colored::*;
use lanscan_common::logging::{PRINT_TARGET, SUCCESS_TARGET};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_indicatif::IndicatifLayer;
use tracing_indicatif::filter::IndicatifFilter;
use tracing_subscriber::fmt::FormatEvent;
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const WORKSPACE_CRATES: &[&str] = &["lanscan", "lanscan_cli", "lanscan_core", "lanscan_common"];

pub struct LanscanFormatter;

impl<S, N> FormatEvent<S, N> for LanscanFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();

        if meta.target() == PRINT_TARGET {
            let mut raw = RawMessage::default();
            event.record(&mut raw);
            return writeln!(writer, "{}", raw.0.unwrap_or_default());
        }

        let (symbol, color_func): (&str, fn(ColoredString) -> ColoredString) =
            match (*meta.level(), meta.target() == SUCCESS_TARGET) {
                (Level::INFO, true) => ("[✓]", |s| s.bright_green().bold()),
                (Level::TRACE, _) => ("[ ]", |s| s.dimmed()),
                (Level::DEBUG, _) => ("[?]", |s| s.blue()),
                (Level::INFO, _) => ("[+]", |s| s.green().bold()),
                (Level::WARN, _) => ("[*]", |s| s.yellow().bold()),
                _ => ("[-]", |s| s.red().bold()),
            };

        write!(writer, "{} ", color_func(symbol.into()))?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

#[derive(Default)]
struct RawMessage(Option<String>);

impl Visit for RawMessage {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "raw_msg" {
            self.0 = Some(value.to_string());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "raw_msg" {
            self.0 = Some(format!("{value:?}"));
        }
    }
}

/// Installs the global subscriber. `RUST_LOG` wins over `verbosity`, but
/// never hides the console output targets.
pub fn init_logging(verbosity: u8) {
    let from_env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = EnvFilter::try_new(filter_directives(from_env.as_deref(), verbosity))
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(None, verbosity)));

    let indicatif_layer = IndicatifLayer::new();
    let fmt_layer = tracing_subscriber::fmt::layer()
        .event_format(LanscanFormatter)
        .with_writer(indicatif_layer.get_stdout_writer());

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(indicatif_layer.with_filter(IndicatifFilter::new(false)))
        .init();
}

fn filter_directives(from_env: Option<&str>, verbosity: u8) -> String {
    let base: String = match from_env {
        Some(env) if !env.trim().is_empty() => env.trim().to_string(),
        _ => default_directives(verbosity),
    };
    format!("{base},{PRINT_TARGET}=info,{SUCCESS_TARGET}=info")
}

fn default_directives(verbosity: u8) -> String {
    let level = match verbosity {
        0 => return "info".to_string(),
        1 => "debug",
        _ => "trace",
    };
    let mut directives = vec!["info".to_string()];
    directives.extend(WORKSPACE_CRATES.iter().map(|krate| format!("{krate}={level}")));
    directives.join(",")
}
