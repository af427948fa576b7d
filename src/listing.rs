// Destination listings shown on the browse screen

use crate::error::{BookingError, CatalogError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const ALL_CATEGORIES: &str = "All";

// Highest nightly price accepted from listing data. Keeps every stay the
// calendar can express well inside the decimal range.
pub const MAX_NIGHTLY_PRICE: Decimal = dec!(1000000);

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Listing {
    pub id: String,
    pub name: String,
    pub image: String,
    pub description: String,
    pub rating: f64,
    pub price: String,
    pub duration: String,
    pub location: String,
    pub category: String,
    #[serde(rename = "previewImage1")]
    pub preview_image_1: String,
    #[serde(rename = "previewImage2")]
    pub preview_image_2: String,
    #[serde(rename = "previewImage3")]
    pub preview_image_3: String,
    #[serde(rename = "previewImage4")]
    pub preview_image_4: String,
}

impl Listing {
    /// Nightly price parsed from the display string ("$200.7", "1,250", "99").
    pub fn nightly_price(&self, currency_symbol: &str) -> Result<Decimal, BookingError> {
        parse_price(&self.price, currency_symbol)
    }
}

pub fn parse_price(display: &str, currency_symbol: &str) -> Result<Decimal, BookingError> {
    let invalid = || BookingError::InvalidPrice(display.to_string());
    let trimmed = display.trim();
    let digits: String = trimmed
        .strip_prefix(currency_symbol)
        .unwrap_or(trimmed)
        .chars()
        .filter(|c| *c != ',')
        .collect();
    let price = Decimal::from_str(digits.trim()).map_err(|_| invalid())?;
    if price.is_sign_negative() || price > MAX_NIGHTLY_PRICE {
        return Err(invalid());
    }
    Ok(price)
}

pub fn parse_listings(json: &str) -> Result<Vec<Listing>, CatalogError> {
    Ok(serde_json::from_str(json)?)
}

// "All" keeps every listing; any other category is matched exactly
pub fn filter_by_category<'a>(listings: &'a [Listing], category: &str) -> Vec<&'a Listing> {
    listings
        .iter()
        .filter(|listing| category == ALL_CATEGORIES || listing.category == category)
        .collect()
}
