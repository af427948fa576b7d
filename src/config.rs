// Booking form configuration

// Defaults seeded into a new booking form and limits applied on submission
#[derive(Debug, Clone)]
pub struct BookingConfig {
    pub default_stay_nights: u32,
    pub default_guests: u32,
    pub max_guests: u32,
    pub currency_symbol: String,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            default_stay_nights: 2,
            default_guests: 2,
            // Guest input is a two-digit field
            max_guests: 99,
            currency_symbol: "$".to_string(),
        }
    }
}
