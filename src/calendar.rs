//! Advent calendar state: 25 days, unlock-by-date policy.
//!
//! Day `d` unlocks on `start_date + (d - 1)` days. A day can be opened once
//! `today` reaches its unlock date; `opened` is monotonic for the session and
//! nothing is persisted across runs.

use chrono::{Days, NaiveDate};

/// Number of day cells on the calendar.
pub const DAY_COUNT: u8 = 25;

/// One calendar day cell.
#[derive(Debug, Clone)]
pub struct Day {
    /// Day number, 1..=25.
    pub day: u8,
    /// Date on which this day's panel may first be opened.
    pub unlock_date: NaiveDate,
    /// Whether this day has been opened this session.
    pub opened: bool,
}

/// Outcome of activating a day cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// The day is still locked; state unchanged.
    Locked { unlock_date: NaiveDate },
    /// The day is unlocked and now marked opened.
    Opened,
}

/// The 25-cell calendar.
#[derive(Debug, Clone)]
pub struct Calendar {
    start_date: NaiveDate,
    days: Vec<Day>,
}

impl Calendar {
    pub fn new(start_date: NaiveDate) -> Self {
        let days = (1..=DAY_COUNT)
            .map(|day| Day {
                day,
                unlock_date: unlock_date(start_date, day),
                opened: false,
            })
            .collect();
        Self { start_date, days }
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn days(&self) -> &[Day] {
        &self.days
    }

    pub fn day(&self, day: u8) -> &Day {
        debug_assert!((1..=DAY_COUNT).contains(&day), "day out of range: {day}");
        &self.days[day as usize - 1]
    }

    /// Whether `day` is still locked as of `today`.
    pub fn is_locked(&self, day: u8, today: NaiveDate) -> bool {
        today < self.day(day).unlock_date
    }

    /// Activate a day cell. Locked days are left untouched; unlocked days are
    /// marked opened (idempotent if already opened).
    ///
    /// A day outside 1..=25 is a caller bug, not a runtime failure.
    pub fn activate(&mut self, day: u8, today: NaiveDate) -> Activation {
        debug_assert!((1..=DAY_COUNT).contains(&day), "day out of range: {day}");
        let cell = &mut self.days[day as usize - 1];
        if today < cell.unlock_date {
            return Activation::Locked {
                unlock_date: cell.unlock_date,
            };
        }
        cell.opened = true;
        Activation::Opened
    }
}

fn unlock_date(start_date: NaiveDate, day: u8) -> NaiveDate {
    start_date
        .checked_add_days(Days::new(day as u64 - 1))
        .expect("unlock date within chrono range")
}
