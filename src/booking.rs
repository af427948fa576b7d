// Booking submission: form state, the stored booking document and confirmation

use crate::config::BookingConfig;
use crate::dates::{self, StayDates};
use crate::error::{BookingError, StoreError, SubmitError};
use crate::listing::Listing;
use crate::pricing::{self, PriceBreakdown, PriceLine, StayRequest};
use crate::store::BookingStore;
use crate::validation::{BookingValidator, ContactInfo};
use chrono::{DateTime, NaiveDate, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, warn};

// Length of generated document ids and submission keys
pub const ID_LENGTH: usize = 20;

pub fn random_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(ID_LENGTH)
        .map(char::from)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(pub String);

impl BookingId {
    pub fn generate() -> Self {
        Self(random_id())
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[default]
    #[serde(rename = "credit")]
    Credit,
    #[serde(rename = "paypal")]
    PayPal,
    #[serde(rename = "apple")]
    ApplePay,
}

impl PaymentMethod {
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Credit => "Credit Card",
            PaymentMethod::PayPal => "PayPal",
            PaymentMethod::ApplePay => "Apple Pay",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Confirmed,
}

// Price block of the stored document. `total_price` is the pre-tax subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredPrice {
    #[serde(with = "rust_decimal::serde::float")]
    pub base_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub service_fee: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub grand_total: Decimal,
}

impl StoredPrice {
    pub fn new(base_price: Decimal, breakdown: &PriceBreakdown) -> Self {
        Self {
            base_price,
            total_price: breakdown.subtotal,
            tax: breakdown.tax,
            service_fee: breakdown.service_fee,
            grand_total: breakdown.total,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    pub user_id: String,
    pub property_id: String,
    pub property_name: String,
    pub property_location: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub nights: u32,
    pub guests: u32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub payment_method: PaymentMethod,
    pub price: StoredPrice,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

// A record ready for the store plus the key that makes resubmission idempotent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub submission_key: String,
    pub record: BookingRecord,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub booking_id: BookingId,
    pub property_name: String,
    pub nights: u32,
}

impl Confirmation {
    pub fn message(&self) -> String {
        format!(
            "Your booking at {} for {} nights has been confirmed. Booking ID: {}. \
             You will receive a confirmation email shortly.",
            self.property_name, self.nights, self.booking_id
        )
    }
}

/// State of a single booking submission.
///
/// Date changes go through the date guard, the price summary through the stay
/// calculator and submission through the validator before anything is stored.
#[derive(Debug, Clone)]
pub struct BookingForm {
    listing: Listing,
    base_price: Decimal,
    currency_symbol: String,
    today: NaiveDate,
    dates: StayDates,
    validator: BookingValidator,
    submission_key: String,
    pub guests: String,
    pub contact: ContactInfo,
    pub payment_method: PaymentMethod,
}

impl BookingForm {
    pub fn new(
        listing: Listing,
        today: NaiveDate,
        config: &BookingConfig,
    ) -> Result<Self, BookingError> {
        let base_price = listing.nightly_price(&config.currency_symbol)?;
        let dates = StayDates::starting(today, config.default_stay_nights)?;

        Ok(Self {
            listing,
            base_price,
            currency_symbol: config.currency_symbol.clone(),
            today,
            dates,
            validator: BookingValidator::new(config),
            submission_key: random_id(),
            guests: config.default_guests.to_string(),
            contact: ContactInfo::default(),
            payment_method: PaymentMethod::default(),
        })
    }

    pub fn listing(&self) -> &Listing {
        &self.listing
    }

    pub fn dates(&self) -> StayDates {
        self.dates
    }

    pub fn submission_key(&self) -> &str {
        &self.submission_key
    }

    // Past check-ins are rejected and leave the dates unchanged
    pub fn set_check_in(&mut self, check_in: NaiveDate) -> Result<(), BookingError> {
        let check_in = dates::validate_check_in(self.today, check_in)?;
        self.dates.set_check_in(check_in)
    }

    pub fn set_check_out(&mut self, check_out: NaiveDate) -> Result<(), BookingError> {
        self.dates.set_check_out(check_out)
    }

    pub fn stay_request(&self) -> StayRequest {
        StayRequest {
            check_in: self.dates.check_in(),
            check_out: self.dates.check_out(),
            base_price_per_night: self.base_price,
        }
    }

    pub fn quote(&self) -> PriceBreakdown {
        pricing::calculate(&self.stay_request())
    }

    // Price summary card rows in the configured currency
    pub fn price_summary(&self) -> Vec<PriceLine> {
        self.quote()
            .summary_lines(self.base_price, &self.currency_symbol)
    }

    /// Validates the form and builds the document to store for `user_id`.
    pub fn prepare(&self, user_id: &str, now: DateTime<Utc>) -> Result<NewBooking, BookingError> {
        let validated = self.validator.validate(&self.contact, &self.guests)?;
        let breakdown = self.quote();
        let contact = validated.contact;

        let record = BookingRecord {
            user_id: user_id.to_string(),
            property_id: self.listing.id.clone(),
            property_name: self.listing.name.clone(),
            property_location: self.listing.location.clone(),
            check_in_date: self.dates.check_in(),
            check_out_date: self.dates.check_out(),
            nights: breakdown.nights,
            guests: validated.guests,
            first_name: contact.first_name,
            last_name: contact.last_name,
            email: contact.email,
            phone: contact.phone,
            payment_method: self.payment_method,
            price: StoredPrice::new(self.base_price, &breakdown),
            status: BookingStatus::Confirmed,
            created_at: now,
        };

        Ok(NewBooking {
            submission_key: self.submission_key.clone(),
            record,
        })
    }

    /// Validates and stores the booking. `user_id` is `None` when nobody is signed in.
    pub async fn submit<S>(
        &self,
        store: &S,
        user_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Confirmation, SubmitError>
    where
        S: BookingStore + ?Sized,
    {
        let user_id = user_id.ok_or(StoreError::Unauthenticated)?;
        let booking = self.prepare(user_id, now)?;
        let nights = booking.record.nights;

        let booking_id = store.create(booking).await.map_err(|e| {
            warn!(error = %e, listing = %self.listing.id, "booking submission failed");
            e
        })?;

        info!(%booking_id, listing = %self.listing.id, nights, "booking confirmed");

        Ok(Confirmation {
            booking_id,
            property_name: self.listing.name.clone(),
            nights,
        })
    }
}
