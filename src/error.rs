// Error types for booking input, persistence and listing data
use chrono::NaiveDate;
use std::fmt;
use thiserror::Error;

// Contact fields checked for presence, in the order they are checked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    FirstName,
    LastName,
    Email,
    Phone,
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ContactField::FirstName => "first name",
            ContactField::LastName => "last name",
            ContactField::Email => "email",
            ContactField::Phone => "phone",
        };
        f.write_str(name)
    }
}

// Local validation failures. All of them are recoverable by correcting input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    #[error("Missing required field: {0}")]
    MissingField(ContactField),

    #[error("Invalid email address: {0:?}")]
    InvalidEmail(String),

    #[error("Invalid guest count: {0:?}")]
    InvalidGuestCount(String),

    #[error("Check-out date {check_out} must be after check-in date {check_in}")]
    InvalidDateRange {
        check_in: NaiveDate,
        check_out: NaiveDate,
    },

    #[error("Check-in date {check_in} is before {today}")]
    CheckInInPast {
        check_in: NaiveDate,
        today: NaiveDate,
    },

    #[error("Invalid nightly price: {0:?}")]
    InvalidPrice(String),
}

impl BookingError {
    /// Title and message the booking screen shows for this failure.
    pub fn alert(&self) -> (&'static str, &'static str) {
        match self {
            BookingError::MissingField(_) => (
                "Missing Information",
                "Please fill in all required fields",
            ),
            BookingError::InvalidEmail(_) => {
                ("Invalid Email", "Please enter a valid email address")
            }
            BookingError::InvalidGuestCount(_) => {
                ("Invalid Guests", "Please enter a valid number of guests")
            }
            BookingError::InvalidDateRange { .. } => {
                ("Invalid Date", "Check-out date must be after check-in date")
            }
            BookingError::CheckInInPast { .. } => {
                ("Invalid Date", "Check-in date cannot be in the past")
            }
            BookingError::InvalidPrice(_) => {
                ("Unavailable", "This listing has no valid nightly price")
            }
        }
    }
}

// Failures reported by the document store collaborator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("User is not authenticated. Please log in.")]
    Unauthenticated,

    #[error("Backend error: {0}")]
    Backend(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] BookingError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl SubmitError {
    pub fn alert(&self) -> (&'static str, &'static str) {
        match self {
            SubmitError::Validation(e) => e.alert(),
            SubmitError::Store(_) => (
                "Booking Failed",
                "There was an error processing your booking. Please try again.",
            ),
        }
    }
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Listing data parse error: {0}")]
    JsonParseError(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_message_names_field() {
        let err = BookingError::MissingField(ContactField::LastName);
        assert_eq!(err.to_string(), "Missing required field: last name");
        assert_eq!(err.alert().0, "Missing Information");
    }

    #[test]
    fn test_guest_alert_does_not_quote_a_limit() {
        let (_, message) = BookingError::InvalidGuestCount("100".to_string()).alert();
        assert!(!message.chars().any(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_store_failures_share_one_alert() {
        let unauthenticated: SubmitError = StoreError::Unauthenticated.into();
        let backend: SubmitError = StoreError::Backend("timeout".to_string()).into();
        assert_eq!(unauthenticated.alert(), backend.alert());
        assert_eq!(unauthenticated.alert().0, "Booking Failed");
    }

    #[test]
    fn test_validation_alert_passes_through() {
        let err: SubmitError = BookingError::InvalidEmail("foo".to_string()).into();
        assert_eq!(err.alert(), ("Invalid Email", "Please enter a valid email address"));
        assert_eq!(err.to_string(), "Invalid email address: \"foo\"");
    }
}
