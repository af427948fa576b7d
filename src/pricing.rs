// Stay pricing: nights between dates and the price breakdown shown at checkout

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const TAX_RATE: Decimal = dec!(0.10);
pub const SERVICE_FEE_RATE: Decimal = dec!(0.05);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StayRequest {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub base_price_per_night: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub nights: u32,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub service_fee: Decimal,
    pub total: Decimal,
}

/// Whole nights between two calendar dates, at least one.
pub fn nights_between(check_in: NaiveDate, check_out: NaiveDate) -> u32 {
    clamp_nights((check_out - check_in).num_days())
}

fn clamp_nights(days: i64) -> u32 {
    u32::try_from(days.max(1)).unwrap_or(u32::MAX)
}

/// Price breakdown for a stay. Tax and service fee are fixed fractions of the subtotal.
///
/// Amounts beyond the decimal range saturate at `Decimal::MAX` instead of failing.
pub fn calculate(request: &StayRequest) -> PriceBreakdown {
    let nights = nights_between(request.check_in, request.check_out);
    let subtotal = request
        .base_price_per_night
        .saturating_mul(Decimal::from(nights));
    let tax = subtotal.saturating_mul(TAX_RATE);
    let service_fee = subtotal.saturating_mul(SERVICE_FEE_RATE);

    PriceBreakdown {
        nights,
        subtotal,
        tax,
        service_fee,
        total: subtotal.saturating_add(tax).saturating_add(service_fee),
    }
}

pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

// "$1,234.50" style amount with the given currency symbol
pub fn format_money(amount: Decimal, symbol: &str) -> String {
    let rounded = format!("{:.2}", round_money(amount).abs());
    let (whole, cents) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount.is_sign_negative() && !round_money(amount).is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{symbol}{grouped}.{cents}")
}

// One row of the price summary card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceLine {
    pub label: String,
    pub amount: String,
}

impl PriceBreakdown {
    /// Rows of the price summary: nightly rate times nights, tax, service fee, total.
    pub fn summary_lines(&self, base_price_per_night: Decimal, symbol: &str) -> Vec<PriceLine> {
        let line = |label: String, amount: Decimal| PriceLine {
            label,
            amount: format_money(amount, symbol),
        };
        vec![
            line(
                format!(
                    "{} x {} night{}",
                    format_money(base_price_per_night, symbol),
                    self.nights,
                    if self.nights == 1 { "" } else { "s" }
                ),
                self.subtotal,
            ),
            line("Tax (10%)".to_string(), self.tax),
            line("Service fee (5%)".to_string(), self.service_fee),
            line("Total".to_string(), self.total),
        ]
    }

    // Same breakdown with every amount rounded to cents
    pub fn rounded(&self) -> Self {
        Self {
            nights: self.nights,
            subtotal: round_money(self.subtotal),
            tax: round_money(self.tax),
            service_fee: round_money(self.service_fee),
            total: round_money(self.total),
        }
    }
}

impl fmt::Display for PriceBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.rounded();
        write!(
            f,
            "{} night{}: subtotal {:.2}, tax {:.2}, service fee {:.2}, total {:.2}",
            r.nights,
            if r.nights == 1 { "" } else { "s" },
            r.subtotal,
            r.tax,
            r.service_fee,
            r.total
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn request(check_in: &str, check_out: &str, price: Decimal) -> StayRequest {
        StayRequest {
            check_in: date(check_in),
            check_out: date(check_out),
            base_price_per_night: price,
        }
    }

    #[test]
    fn test_two_night_scenario() {
        let breakdown = calculate(&request("2024-03-01", "2024-03-03", dec!(100)));
        assert_eq!(breakdown.nights, 2);
        assert_eq!(breakdown.subtotal, dec!(200));
        assert_eq!(breakdown.tax, dec!(20));
        assert_eq!(breakdown.service_fee, dec!(10));
        assert_eq!(breakdown.total, dec!(230));
        assert_eq!(format!("{:.2}", breakdown.rounded().total), "230.00");
    }

    #[test_case(dec!(0); "free stay")]
    #[test_case(dec!(99.99); "cents")]
    #[test_case(dec!(200.7); "listing price")]
    #[test_case(dec!(1234567.891); "large with fractional cents")]
    fn test_total_is_subtotal_plus_fifteen_percent(price: Decimal) {
        let breakdown = calculate(&request("2024-01-30", "2024-02-04", price));
        assert_eq!(breakdown.nights, 5);
        assert_eq!(breakdown.total, breakdown.subtotal * dec!(1.15));
    }

    #[test]
    fn test_calculation_is_repeatable() {
        let req = request("2024-12-30", "2025-01-02", dec!(165.3));
        assert_eq!(calculate(&req), calculate(&req));
    }

    #[test_case("2024-03-01", "2024-03-02", 1; "one night")]
    #[test_case("2024-02-27", "2024-03-02", 4; "across leap day")]
    #[test_case("2024-03-01", "2024-03-01", 1; "same day floors at one")]
    #[test_case("2024-03-05", "2024-03-01", 1; "reversed floors at one")]
    fn test_nights_between(check_in: &str, check_out: &str, expected: u32) {
        assert_eq!(nights_between(date(check_in), date(check_out)), expected);
    }

    #[test]
    fn test_price_beyond_decimal_range_saturates() {
        let breakdown = calculate(&request("2024-03-01", "2024-03-03", Decimal::MAX));
        assert_eq!(breakdown.nights, 2);
        assert_eq!(breakdown.subtotal, Decimal::MAX);
        assert_eq!(breakdown.total, Decimal::MAX);
    }

    #[test_case(dec!(230), "$230.00"; "whole")]
    #[test_case(dec!(1234.5), "$1,234.50"; "thousands")]
    #[test_case(dec!(1234567.891), "$1,234,567.89"; "millions")]
    #[test_case(dec!(0.004), "$0.00"; "rounds to zero")]
    #[test_case(dec!(-12.5), "-$12.50"; "negative")]
    fn test_format_money(amount: Decimal, expected: &str) {
        assert_eq!(format_money(amount, "$"), expected);
    }

    #[test]
    fn test_summary_lines_use_symbol() {
        let breakdown = calculate(&request("2024-03-01", "2024-03-03", dec!(100)));
        let lines = breakdown.summary_lines(dec!(100), "€");
        let rows: Vec<(&str, &str)> = lines
            .iter()
            .map(|l| (l.label.as_str(), l.amount.as_str()))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("€100.00 x 2 nights", "€200.00"),
                ("Tax (10%)", "€20.00"),
                ("Service fee (5%)", "€10.00"),
                ("Total", "€230.00"),
            ]
        );
    }

    #[test]
    fn test_display_rounds_to_cents() {
        let breakdown = calculate(&request("2024-03-01", "2024-03-02", dec!(33.333)));
        assert_eq!(
            breakdown.to_string(),
            "1 night: subtotal 33.33, tax 3.33, service fee 1.67, total 38.33"
        );
    }
}
