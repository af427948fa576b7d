// Stay booking core: date guard, stay pricing, booking validation and the booking flow

pub mod booking;
pub mod config;
pub mod dates;
pub mod error;
pub mod listing;
pub mod pricing;
pub mod schedule;
pub mod store;
pub mod validation;

// Re-export key types for convenience
pub use booking::{
    BookingForm, BookingId, BookingRecord, BookingStatus, Confirmation, NewBooking,
    PaymentMethod, StoredPrice,
};
pub use config::BookingConfig;
pub use dates::{adjust_check_out, validate_check_in, validate_check_out, StayDates};
pub use error::{BookingError, CatalogError, ContactField, StoreError, SubmitError};
pub use listing::{filter_by_category, parse_listings, Listing};
pub use pricing::{
    calculate, format_money, PriceBreakdown, PriceLine, StayRequest, SERVICE_FEE_RATE, TAX_RATE,
};
pub use schedule::{month_grid, BookingDetails, BookingSummary, CalendarDay, MonthPosition};
pub use store::{BookingStore, InMemoryBookingStore};
pub use validation::{validate_booking, BookingValidator, ContactInfo, ValidatedBooking};
