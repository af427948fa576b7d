// Booking schedule: month calendar, booking list entries and the booking details view

use crate::booking::{BookingId, BookingRecord};
use crate::pricing::{self, round_money};
use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthPosition {
    Previous,
    Current,
    Next,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    pub day: u32,
    pub position: MonthPosition,
    pub booked: bool,
}

fn first_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = first_of_month(year, month)?;
    let next = first.checked_add_months(Months::new(1))?;
    Some(next.pred_opt()?.day())
}

/// Moves `delta` months forward (or back when negative) from `year`/`month`.
pub fn shift_month(year: i32, month: u32, delta: i32) -> Option<(i32, u32)> {
    let first = first_of_month(year, month)?;
    let shifted = if delta >= 0 {
        first.checked_add_months(Months::new(delta.unsigned_abs()))?
    } else {
        first.checked_sub_months(Months::new(delta.unsigned_abs()))?
    };
    Some((shifted.year(), shifted.month()))
}

/// Sunday-first grid for a month, padded with neighbouring days to whole weeks.
///
/// Returns `None` for an invalid month.
pub fn month_grid(year: i32, month: u32, booked: &BTreeSet<u32>) -> Option<Vec<CalendarDay>> {
    let first = first_of_month(year, month)?;
    let leading = first.weekday().num_days_from_sunday();
    let days = days_in_month(year, month)?;
    let (prev_year, prev_month) = shift_month(year, month, -1)?;
    let days_in_prev = days_in_month(prev_year, prev_month)?;

    let total = (leading + days).div_ceil(7) * 7;
    let mut grid = Vec::with_capacity(total as usize);

    grid.extend((0..leading).map(|i| CalendarDay {
        day: days_in_prev - leading + i + 1,
        position: MonthPosition::Previous,
        booked: false,
    }));
    grid.extend((1..=days).map(|day| CalendarDay {
        day,
        position: MonthPosition::Current,
        booked: booked.contains(&day),
    }));
    grid.extend((1..=total - leading - days).map(|day| CalendarDay {
        day,
        position: MonthPosition::Next,
        booked: false,
    }));

    Some(grid)
}

// Days of the month on which one of the bookings checks in
pub fn booked_days<'a, I>(records: I, year: i32, month: u32) -> BTreeSet<u32>
where
    I: IntoIterator<Item = &'a BookingRecord>,
{
    records
        .into_iter()
        .map(|record| record.check_in_date)
        .filter(|date| date.year() == year && date.month() == month)
        .map(|date| date.day())
        .collect()
}

// Entry in the "my bookings" list under the calendar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingSummary {
    pub id: BookingId,
    pub name: String,
    pub date: String,
    pub price: Decimal,
    pub location: String,
    pub check_in_date: NaiveDate,
}

impl BookingSummary {
    pub fn from_record(id: &BookingId, record: &BookingRecord) -> Self {
        Self {
            id: id.clone(),
            name: record.property_name.clone(),
            date: record.check_in_date.format("%B %-d, %Y").to_string(),
            price: record.price.base_price,
            location: record.property_location.clone(),
            check_in_date: record.check_in_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDetails {
    pub id: BookingId,
    pub property_name: String,
    pub property_location: String,
    pub formatted_check_in: String,
    pub formatted_check_out: String,
    pub guests: u32,
    pub nights: u32,
    pub base_price: Decimal,
    pub service_fee: Decimal,
    pub tax: Decimal,
}

impl BookingDetails {
    pub fn from_record(id: &BookingId, record: &BookingRecord) -> Self {
        let long_date = |date: NaiveDate| date.format("%a, %B %-d, %Y").to_string();
        Self {
            id: id.clone(),
            property_name: record.property_name.clone(),
            property_location: record.property_location.clone(),
            formatted_check_in: long_date(record.check_in_date),
            formatted_check_out: long_date(record.check_out_date),
            guests: record.guests,
            // Recomputed from the dates rather than trusted from the document
            nights: pricing::nights_between(record.check_in_date, record.check_out_date),
            base_price: record.price.base_price,
            service_fee: record.price.service_fee,
            tax: record.price.tax,
        }
    }

    pub fn guest_label(&self) -> String {
        format!(
            "{} guest{}",
            self.guests,
            if self.guests > 1 { "s" } else { "" }
        )
    }

    pub fn stay_cost(&self) -> Decimal {
        self.base_price.saturating_mul(Decimal::from(self.nights))
    }

    pub fn total(&self) -> Decimal {
        round_money(
            self.stay_cost()
                .saturating_add(self.tax)
                .saturating_add(self.service_fee),
        )
    }
}
