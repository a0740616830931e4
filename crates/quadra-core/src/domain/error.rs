//! Domain-level error types.
//!
//! These errors are storage agnostic. Repository implementations and use
//! cases wrap them without leaking any store-specific detail.

/// Errors raised when turning a raw persistence record into a [`Space`].
///
/// Missing optional fields are filled with defaults; everything here is a
/// field that is present but unusable, or a required field that is absent.
///
/// [`Space`]: super::Space
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecodeError {
    #[error("malformed space record: {0}")]
    Malformed(String),

    #[error("space record is missing required field `{0}`")]
    MissingField(&'static str),

    #[error("price must be a non-negative number (got {0})")]
    InvalidPrice(f64),

    #[error("rating must be between 0 and 5 (got {0})")]
    InvalidRating(f64),

    #[error("invalid time `{0}`, expected zero-padded HH:MM")]
    InvalidTime(String),

    #[error("opening time {open} is after closing time {close}")]
    InvertedHours { open: String, close: String },

    #[error("coordinates out of range ({latitude}, {longitude})")]
    InvalidCoordinates { latitude: f64, longitude: f64 },
}

/// Input validation failures raised by use cases before touching storage.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("minimum price must be a non-negative number (got {0})")]
    InvalidMinPrice(f64),

    #[error("maximum price must be a non-negative number (got {0})")]
    InvalidMaxPrice(f64),

    #[error("minimum price {min} is greater than maximum price {max}")]
    InvertedPriceRange { min: f64, max: f64 },

    #[error("rating must be between 0 and 5 (got {0})")]
    RatingOutOfRange(f64),

    #[error("space id must not be empty")]
    EmptyId,

    #[error("latitude must be between -90 and 90 (got {0})")]
    InvalidLatitude(f64),

    #[error("longitude must be between -180 and 180 (got {0})")]
    InvalidLongitude(f64),

    #[error("search radius must be a positive number of kilometres (got {0})")]
    InvalidRadius(f64),
}
