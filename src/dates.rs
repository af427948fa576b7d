// Check-in / check-out guard
// Keeps a stay's check-out strictly after its check-in.

use crate::error::BookingError;
use chrono::{Days, NaiveDate};
use tracing::debug;

fn next_day(date: NaiveDate) -> Result<NaiveDate, BookingError> {
    date.checked_add_days(Days::new(1))
        .ok_or(BookingError::InvalidDateRange {
            check_in: date,
            check_out: date,
        })
}

/// Check-out to use after the check-in moves to `new_check_in`.
///
/// A check-in on or after the current check-out pushes the check-out to the
/// day after the new check-in. Otherwise the current check-out is kept.
pub fn adjust_check_out(
    new_check_in: NaiveDate,
    current_check_out: NaiveDate,
) -> Result<NaiveDate, BookingError> {
    if new_check_in >= current_check_out {
        let advanced = next_day(new_check_in)?;
        debug!(%new_check_in, %current_check_out, %advanced, "check-out auto-advanced");
        Ok(advanced)
    } else {
        Ok(current_check_out)
    }
}

// Check-in may be today or later, never in the past
pub fn validate_check_in(today: NaiveDate, proposed: NaiveDate) -> Result<NaiveDate, BookingError> {
    if proposed < today {
        debug!(%today, %proposed, "check-in rejected");
        return Err(BookingError::CheckInInPast {
            check_in: proposed,
            today,
        });
    }
    Ok(proposed)
}

/// Accepts `proposed` only when it falls strictly after `check_in`.
pub fn validate_check_out(
    check_in: NaiveDate,
    proposed: NaiveDate,
) -> Result<NaiveDate, BookingError> {
    if proposed > check_in {
        Ok(proposed)
    } else {
        debug!(%check_in, %proposed, "check-out rejected");
        Err(BookingError::InvalidDateRange {
            check_in,
            check_out: proposed,
        })
    }
}

// A check-in/check-out pair that always satisfies check_out > check_in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayDates {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl StayDates {
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self, BookingError> {
        let check_out = validate_check_out(check_in, check_out)?;
        Ok(Self {
            check_in,
            check_out,
        })
    }

    // Stay of `nights` starting today; zero nights is treated as one
    pub fn starting(today: NaiveDate, nights: u32) -> Result<Self, BookingError> {
        let check_out = today
            .checked_add_days(Days::new(u64::from(nights.max(1))))
            .ok_or(BookingError::InvalidDateRange {
                check_in: today,
                check_out: today,
            })?;
        Self::new(today, check_out)
    }

    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    pub fn set_check_in(&mut self, check_in: NaiveDate) -> Result<(), BookingError> {
        let check_out = adjust_check_out(check_in, self.check_out)?;
        self.check_in = check_in;
        self.check_out = check_out;
        Ok(())
    }

    // Rejected check-outs leave the pair untouched
    pub fn set_check_out(&mut self, check_out: NaiveDate) -> Result<(), BookingError> {
        self.check_out = validate_check_out(self.check_in, check_out)?;
        Ok(())
    }
}
