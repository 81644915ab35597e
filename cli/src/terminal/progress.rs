use std::sync::Arc;

use indicatif::ProgressStyle;
use lanscan_core::scanner::{EventHook, ScanEvent};
use tracing::Span;
use tracing_indicatif::span_ext::IndicatifSpanExt;

use crate::terminal::{format, print};

const BAR_TEMPLATE: &str =
    "{spinner:.blue} {msg} [{bar:32.green/bright_black}] {pos}/{len} ({elapsed})";
const TICKS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

/// Turns the sweep span into a progress bar sized to `total` probes.
pub fn attach_bar(span: &Span, total: u64) {
    let style = ProgressStyle::with_template(BAR_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .tick_strings(TICKS);

    span.pb_set_style(&style);
    span.pb_set_length(total);
    span.pb_set_message("probing");
}

/// Prints discoveries as they happen and, unless suppressed, progress
/// lines at every reporting boundary.
pub fn event_hook(span: Span, show_progress: bool) -> EventHook {
    Arc::new(move |event: &ScanEvent| match event {
        ScanEvent::HostFound(record) => print::print(&format::found_line(record)),
        ScanEvent::Progress { completed, total } if show_progress => {
            span.pb_set_position(*completed);
            print::print(&format::progress_line(*completed, *total));
        }
        ScanEvent::Progress { .. } => {}
    })
}
