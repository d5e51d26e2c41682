//! Opening-hours evaluation across one or more checkpoints.
//!
//! Times are compared as `HHMM` integers (`1930` for 7:30 PM). A period whose
//! close is not after its open spans midnight.

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};

/// One entry of a venue's weekly schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    /// Open around the clock, every day.
    AlwaysOpen,
    /// Open on provider weekday `day` from `open` until `close` (`HHMM`).
    Window { day: u8, open: u32, close: u32 },
}

/// A venue's weekly schedule as published by the provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpeningHours {
    pub periods: Vec<Period>,
}

/// Provider weekday index (Sunday = 0 .. Saturday = 6) for each weekday,
/// indexed by days since Monday.
pub const PROVIDER_DAY_FROM_MONDAY: [u8; 7] = [1, 2, 3, 4, 5, 6, 0];

/// Map a calendar weekday onto the provider's Sunday-first numbering.
#[must_use]
pub fn provider_day(weekday: Weekday) -> u8 {
    PROVIDER_DAY_FROM_MONDAY[weekday.num_days_from_monday() as usize]
}

/// Wall-clock time of `at` as an `HHMM` integer.
#[must_use]
pub fn clock_hhmm(at: NaiveDateTime) -> u32 {
    at.hour() * 100 + at.minute()
}

/// Parse a provider `"HHMM"` string. `2400` is accepted as end of day.
#[must_use]
pub fn parse_hhmm(raw: &str) -> Option<u32> {
    if raw.len() != 4 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value: u32 = raw.parse().ok()?;
    let (hours, minutes) = (value / 100, value % 100);
    if minutes > 59 || hours > 24 || (hours == 24 && minutes > 0) {
        return None;
    }
    Some(value)
}

impl OpeningHours {
    #[must_use]
    pub fn new(periods: Vec<Period>) -> Self {
        Self { periods }
    }

    /// `true` when any period covers `at`.
    ///
    /// Only periods opening on the same provider weekday as `at` are
    /// considered. Same-day windows are half-open `[open, close)`; overnight
    /// windows (`open >= close`) cover `t >= open` or `t < close`.
    #[must_use]
    pub fn is_open_at(&self, at: NaiveDateTime) -> bool {
        let day = provider_day(at.weekday());
        let t = clock_hhmm(at);

        self.periods.iter().any(|period| match *period {
            Period::AlwaysOpen => true,
            Period::Window {
                day: open_day,
                open,
                close,
            } if open_day == day => {
                if open < close {
                    open <= t && t < close
                } else {
                    t >= open || t < close
                }
            }
            Period::Window { .. } => false,
        })
    }

    /// `true` only when the venue is open at every checkpoint.
    #[must_use]
    pub fn window_satisfied(&self, checkpoints: &[NaiveDateTime]) -> bool {
        checkpoints.iter().all(|&at| self.is_open_at(at))
    }
}
