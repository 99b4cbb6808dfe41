//! Clock capability for day-lock evaluation.
//!
//! The original design read the system date at several call sites, which makes
//! unlock behavior untestable without waiting for real calendar dates. The app
//! context holds an `Arc<dyn Clock>` instead; production wires `SystemClock`,
//! tests wire `FixedClock`.

use chrono::{Local, NaiveDate};

/// Source of "today" for unlock decisions.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Production clock backed by the local system date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to a fixed date. Used by tests and the `--today` override.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
