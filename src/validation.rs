// Contact and guest-count checks run before a booking is submitted

use crate::config::BookingConfig;
use crate::error::{BookingError, ContactField};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::debug;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

impl ContactInfo {
    pub fn new(first_name: &str, last_name: &str, email: &str, phone: &str) -> Self {
        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
        }
    }

    fn trimmed(&self) -> Self {
        Self::new(
            self.first_name.trim(),
            self.last_name.trim(),
            self.email.trim(),
            self.phone.trim(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedBooking {
    pub contact: ContactInfo,
    pub guests: u32,
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

// Validator with a configurable guest ceiling
#[derive(Debug, Clone)]
pub struct BookingValidator {
    max_guests: u32,
}

impl Default for BookingValidator {
    fn default() -> Self {
        Self::new(&BookingConfig::default())
    }
}

impl BookingValidator {
    pub fn new(config: &BookingConfig) -> Self {
        Self {
            max_guests: config.max_guests,
        }
    }

    /// Checks presence of every contact field, then email shape, then the guest count.
    ///
    /// Returns the trimmed fields and the parsed guest count.
    pub fn validate(
        &self,
        contact: &ContactInfo,
        guests: &str,
    ) -> Result<ValidatedBooking, BookingError> {
        let contact = contact.trimmed();

        let fields = [
            (ContactField::FirstName, &contact.first_name),
            (ContactField::LastName, &contact.last_name),
            (ContactField::Email, &contact.email),
            (ContactField::Phone, &contact.phone),
        ];
        if let Some((field, _)) = fields.iter().find(|(_, value)| value.is_empty()) {
            debug!(%field, "booking rejected: missing field");
            return Err(BookingError::MissingField(*field));
        }

        if !is_valid_email(&contact.email) {
            debug!("booking rejected: invalid email");
            return Err(BookingError::InvalidEmail(contact.email));
        }

        let guests = self.parse_guests(guests)?;

        Ok(ValidatedBooking { contact, guests })
    }

    fn parse_guests(&self, input: &str) -> Result<u32, BookingError> {
        let invalid = || BookingError::InvalidGuestCount(input.to_string());
        let count: i64 = input.trim().parse().map_err(|_| invalid())?;
        if count < 1 || count > i64::from(self.max_guests) {
            debug!(count, max = self.max_guests, "booking rejected: guest count");
            return Err(invalid());
        }
        u32::try_from(count).map_err(|_| invalid())
    }
}

pub fn validate_booking(
    contact: &ContactInfo,
    guests: &str,
) -> Result<ValidatedBooking, BookingError> {
    BookingValidator::default().validate(contact, guests)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn john() -> ContactInfo {
        ContactInfo::new("John", "Doe", "john@doe.com", "+1 (555) 123-4567")
    }

    #[test]
    fn test_complete_contact_passes_unchanged() {
        let validated = validate_booking(&john(), "2").unwrap();
        assert_eq!(validated.contact, john());
        assert_eq!(validated.guests, 2);
    }

    #[test]
    fn test_fields_are_returned_trimmed() {
        let padded = ContactInfo::new("  John ", "Doe\t", " john@doe.com ", " 555 ");
        let validated = validate_booking(&padded, " 3 ").unwrap();
        assert_eq!(
            validated.contact,
            ContactInfo::new("John", "Doe", "john@doe.com", "555")
        );
        assert_eq!(validated.guests, 3);
    }

    #[test_case(ContactInfo::new("", "Doe", "john@doe.com", "555"), ContactField::FirstName; "first name")]
    #[test_case(ContactInfo::new("John", "", "john@doe.com", "555"), ContactField::LastName; "last name")]
    #[test_case(ContactInfo::new("John", "Doe", "", "555"), ContactField::Email; "email")]
    #[test_case(ContactInfo::new("John", "Doe", "john@doe.com", "   "), ContactField::Phone; "blank phone")]
    #[test_case(ContactInfo::default(), ContactField::FirstName; "everything empty reports first")]
    fn test_missing_field(contact: ContactInfo, expected: ContactField) {
        assert_eq!(
            validate_booking(&contact, "2"),
            Err(BookingError::MissingField(expected))
        );
    }

    #[test_case("foo", false; "no at sign")]
    #[test_case("a@b.co", true; "minimal address")]
    #[test_case("@b.co", false; "empty local part")]
    #[test_case("a@bco", false; "no dot in domain")]
    #[test_case("a b@c.de", false; "whitespace")]
    #[test_case("a@@b.co", false; "double at")]
    #[test_case("first.last@sub.example.org", true; "dotted")]
    fn test_email_pattern(email: &str, valid: bool) {
        assert_eq!(is_valid_email(email), valid);
    }

    #[test]
    fn test_email_checked_after_presence() {
        let mut contact = john();
        contact.email = "foo".to_string();
        assert_eq!(
            validate_booking(&contact, "2"),
            Err(BookingError::InvalidEmail("foo".to_string()))
        );
        contact.phone.clear();
        assert_eq!(
            validate_booking(&contact, "2"),
            Err(BookingError::MissingField(ContactField::Phone))
        );
    }

    #[test_case("0"; "zero")]
    #[test_case("-1"; "negative")]
    #[test_case("two"; "not a number")]
    #[test_case(""; "empty")]
    #[test_case("1.5"; "fractional")]
    #[test_case("100"; "above two digits")]
    fn test_invalid_guest_count(guests: &str) {
        assert_eq!(
            validate_booking(&john(), guests),
            Err(BookingError::InvalidGuestCount(guests.to_string()))
        );
    }

    #[test]
    fn test_guest_ceiling_comes_from_config() {
        let config = BookingConfig {
            max_guests: 4,
            ..BookingConfig::default()
        };
        let validator = BookingValidator::new(&config);
        assert!(validator.validate(&john(), "4").is_ok());
        assert!(matches!(
            validator.validate(&john(), "5"),
            Err(BookingError::InvalidGuestCount(_))
        ));
    }
}
