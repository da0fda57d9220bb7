//! Resource-cost display state.
//!
//! The cost itself is computed by an external estimator; this module owns
//! the mapping from its outcome (a positive total with a breakdown, or a
//! negative sentinel) to the user-visible label and rows, plus the
//! coalescing debouncer that keeps rapid successive edits from thrashing
//! the display.

use std::time::{Duration, Instant};

/// Default delay before a submitted display update is released.
pub const COST_DEBOUNCE: Duration = Duration::from_millis(300);

/// Failure categories encoded as negative sentinels by the estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostErrorCode {
    ImportError,
    UrlImportError,
    SyntaxError,
}

impl CostErrorCode {
    /// Decode a non-positive sentinel. Unknown sentinels fall back to
    /// `SyntaxError`, matching the estimator's catch-all category.
    pub fn from_sentinel(cost: f64) -> Self {
        if cost == -1.0 {
            CostErrorCode::ImportError
        } else if cost == -2.0 {
            CostErrorCode::UrlImportError
        } else {
            CostErrorCode::SyntaxError
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CostErrorCode::ImportError => "Import Error",
            CostErrorCode::UrlImportError => "HTTP Import Error",
            CostErrorCode::SyntaxError => "Syntax Error",
        }
    }
}

/// One line of the cost breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct CostEntry {
    pub name: String,
    pub category: String,
    pub cost: f64,
}

/// What the external estimator produced for a script.
#[derive(Debug, Clone, PartialEq)]
pub enum CostOutcome {
    Cost { total: f64, entries: Vec<CostEntry> },
    Error(CostErrorCode),
}

impl CostOutcome {
    /// Interpret a raw estimator result: positive totals carry a breakdown,
    /// anything else is a coded failure.
    pub fn from_raw(cost: f64, entries: Vec<CostEntry>) -> Self {
        if cost > 0.0 {
            CostOutcome::Cost {
                total: cost,
                entries,
            }
        } else {
            CostOutcome::Error(CostErrorCode::from_sentinel(cost))
        }
    }
}

/// Display-ready cost state: the status label plus breakdown rows.
#[derive(Debug, Clone, PartialEq)]
pub struct CostReport {
    pub label: String,
    pub rows: Vec<(String, String)>,
}

/// Two-decimal gigabyte rendering.
pub fn format_ram(gigabytes: f64) -> String {
    format!("{gigabytes:.2}GB")
}

/// Build the display state for an estimator outcome.
///
/// Plain text documents have no cost at all; successful estimates sort their
/// breakdown by descending cost; failures show a fixed category label, never
/// the raw sentinel.
pub fn cost_report(outcome: &CostOutcome, is_text_file: bool) -> CostReport {
    if is_text_file {
        return CostReport {
            label: "N/A".to_string(),
            rows: vec![("N/A".to_string(), String::new())],
        };
    }

    match outcome {
        CostOutcome::Cost { total, entries } => {
            let mut sorted: Vec<&CostEntry> = entries.iter().collect();
            sorted.sort_by(|a, b| b.cost.total_cmp(&a.cost));
            CostReport {
                label: format!("RAM: {}", format_ram(*total)),
                rows: sorted
                    .iter()
                    .map(|e| (format!("{} ({})", e.name, e.category), format_ram(e.cost)))
                    .collect(),
            }
        }
        CostOutcome::Error(code) => CostReport {
            label: format!("RAM: {}", code.label()),
            rows: vec![(code.label().to_string(), String::new())],
        },
    }
}

/// Poll-based coalescer for display updates.
///
/// `submit` replaces any pending value and re-arms the deadline; `poll`
/// releases the latest value once the deadline has passed. A superseded
/// update is simply dropped. Time is injected by the caller so the editor's
/// event loop stays in control and tests need no real clock.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<T>,
    deadline: Option<Instant>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Debouncer {
            delay,
            pending: None,
            deadline: None,
        }
    }

    pub fn submit(&mut self, value: T, now: Instant) {
        self.pending = Some(value);
        self.deadline = Some(now + self.delay);
    }

    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.pending.take()
            }
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Debouncer::new(COST_DEBOUNCE)
    }
}
