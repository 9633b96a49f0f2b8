use chrono::{Local, NaiveDateTime, Timelike};
use marking_engine::marking::{Grade, MarkingEngine};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type SharedEngine = Arc<MarkingEngine>;

/// Local wall-clock time truncated to whole seconds, matching the export date formats.
pub(crate) fn evaluation_timestamp() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

pub(crate) fn grade_icon(grade: Grade) -> &'static str {
    match grade {
        Grade::Excellent => "🟢",
        Grade::Good => "🔵",
        Grade::Average | Grade::Medium => "🟡",
        Grade::Bad => "🔴",
        Grade::NoSelection | Grade::InvalidSelection | Grade::Unknown => "⚪",
    }
}
