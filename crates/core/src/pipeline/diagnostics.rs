use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::NaiveDateTime;

use crate::clipping::domain::clip_planner::ConsistencyWarning;
use crate::pipeline::batch_summary::BatchSummary;

/// A non-fatal event raised while processing one item of a batch.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    VideoStartsAfterTransect {
        video: PathBuf,
        video_start: NaiveDateTime,
        transect_start: NaiveDateTime,
    },
    VideoEndsBeforeTransect {
        video: PathBuf,
        probed_secs: f64,
        required_secs: f64,
    },
    /// An item was skipped; `item` is the file being read or written.
    ItemFailed { item: PathBuf, error: String },
}

impl Diagnostic {
    pub fn from_warning(video: PathBuf, warning: ConsistencyWarning) -> Self {
        match warning {
            ConsistencyWarning::VideoStartsAfterTransect {
                video_start,
                transect_start,
            } => Diagnostic::VideoStartsAfterTransect {
                video,
                video_start,
                transect_start,
            },
            ConsistencyWarning::VideoEndsBeforeTransect {
                probed_secs,
                required_secs,
            } => Diagnostic::VideoEndsBeforeTransect {
                video,
                probed_secs,
                required_secs,
            },
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Diagnostic::ItemFailed { .. })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::VideoStartsAfterTransect {
                video,
                video_start,
                transect_start,
            } => write!(
                f,
                "{}: video starts at {video_start}, after the transect start {transect_start}",
                video.display()
            ),
            Diagnostic::VideoEndsBeforeTransect {
                video,
                probed_secs,
                required_secs,
            } => write!(
                f,
                "{}: video is {probed_secs:.1}s long but the buffered transect ends at {required_secs:.1}s",
                video.display()
            ),
            Diagnostic::ItemFailed { item, error } => {
                write!(f, "{}: skipped: {error}", item.display())
            }
        }
    }
}

/// Receives diagnostics and status messages from the batch use cases.
///
/// Keeps the use cases free of any particular output mechanism.
pub trait DiagnosticReporter: Send {
    fn report(&mut self, diagnostic: Diagnostic);

    fn info(&mut self, message: &str);

    /// Called once when a batch finishes. Default: no-op.
    fn summary(&self, _summary: &BatchSummary) {}
}

/// Forwards diagnostics to the `log` facade and counts them for the
/// end-of-batch summary.
#[derive(Default)]
pub struct LogDiagnosticReporter {
    warnings: usize,
    failures: usize,
}

impl LogDiagnosticReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn summary_string(&self, summary: &BatchSummary) -> String {
        format!(
            "{} processed, {} failed, {} files written ({} warnings)",
            summary.processed, summary.failed, summary.written, self.warnings
        )
    }

    pub fn warnings(&self) -> usize {
        self.warnings
    }

    pub fn failures(&self) -> usize {
        self.failures
    }
}

impl DiagnosticReporter for LogDiagnosticReporter {
    fn report(&mut self, diagnostic: Diagnostic) {
        if diagnostic.is_failure() {
            self.failures += 1;
            log::error!("{diagnostic}");
        } else {
            self.warnings += 1;
            log::warn!("{diagnostic}");
        }
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn summary(&self, summary: &BatchSummary) {
        log::info!("{}", self.summary_string(summary));
    }
}

/// Keeps every diagnostic in memory. Clones share the same record.
#[derive(Clone, Default)]
pub struct CollectingReporter {
    diagnostics: Arc<Mutex<Vec<Diagnostic>>>,
    messages: Arc<Mutex<Vec<String>>>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl DiagnosticReporter for CollectingReporter {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(diagnostic);
    }

    fn info(&mut self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    }
}
