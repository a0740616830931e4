//! Space entity - a bookable sports facility (court, class, plan)

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use super::error::DecodeError;
use super::geo::Coordinates;

lazy_static! {
    static ref TIME_OF_DAY: Regex = Regex::new(r"^([01][0-9]|2[0-3]):[0-5][0-9]$").unwrap();
}

/// Whether `value` is a zero-padded 24-hour `HH:MM` string.
pub fn is_time_of_day(value: &str) -> bool {
    TIME_OF_DAY.is_match(value)
}

/// Daily opening window as zero-padded `HH:MM` strings.
///
/// Windows spanning midnight are not supported: `open <= close` always.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningHours {
    pub open: String,
    pub close: String,
}

impl OpeningHours {
    pub const DEFAULT_OPEN: &'static str = "00:00";
    pub const DEFAULT_CLOSE: &'static str = "23:59";

    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }

    /// Inclusive containment by string comparison. Only meaningful because
    /// both bounds and `time` are zero-padded `HH:MM`.
    pub fn contains(&self, time: &str) -> bool {
        self.open.as_str() <= time && time <= self.close.as_str()
    }

    fn validate(&self) -> Result<(), DecodeError> {
        for value in [&self.open, &self.close] {
            if !is_time_of_day(value) {
                return Err(DecodeError::InvalidTime(value.clone()));
            }
        }
        if self.open > self.close {
            return Err(DecodeError::InvertedHours {
                open: self.open.clone(),
                close: self.close.clone(),
            });
        }
        Ok(())
    }
}

impl Default for OpeningHours {
    fn default() -> Self {
        Self::new(Self::DEFAULT_OPEN, Self::DEFAULT_CLOSE)
    }
}

/// Raw persistence shape of a space document.
///
/// Every field is optional at the type level; [`Space::from_record`] decides
/// which absences get a default and which are errors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sports: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<OpeningHours>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

/// A bookable sports facility.
///
/// Fields are read-only once constructed. Build new values with
/// [`Space::new`] and the `with_*` methods, or decode them from storage with
/// [`Space::from_data`].
#[derive(Debug, Clone, PartialEq)]
pub struct Space {
    id: String,
    name: String,
    description: String,
    address: String,
    sports: Vec<String>,
    images: Vec<String>,
    price: f64,
    rating: f64,
    opening_hours: OpeningHours,
    coordinates: Coordinates,
}

impl Space {
    /// Create a new space with a fresh identifier and default values
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            description: String::new(),
            address: String::new(),
            sports: Vec::new(),
            images: Vec::new(),
            price: 0.0,
            rating: 0.0,
            opening_hours: OpeningHours::default(),
            coordinates: Coordinates::default(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    pub fn with_sports<I, S>(mut self, sports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sports = sports.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_images<I, S>(mut self, images: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.images = images.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    /// Set the rating. Not range-checked here; decoding from storage is.
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    pub fn with_opening_hours(mut self, open: impl Into<String>, close: impl Into<String>) -> Self {
        self.opening_hours = OpeningHours::new(open, close);
        self
    }

    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.coordinates = Coordinates::new(latitude, longitude);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn sports(&self) -> &[String] {
        &self.sports
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    /// The first image, used as the cover.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn rating(&self) -> f64 {
        self.rating
    }

    pub fn opening_hours(&self) -> &OpeningHours {
        &self.opening_hours
    }

    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    /// Exact, case-sensitive membership in the sports list.
    pub fn has_sport(&self, sport: &str) -> bool {
        self.sports.iter().any(|s| s == sport)
    }

    /// True unless a provided bound is violated. `min <= max` is the caller's
    /// concern.
    pub fn is_price_in_range(&self, min: Option<f64>, max: Option<f64>) -> bool {
        min.map_or(true, |min| self.price >= min) && max.map_or(true, |max| self.price <= max)
    }

    pub fn has_minimum_rating(&self, min: f64) -> bool {
        self.rating >= min
    }

    /// Whether `time` (`HH:MM`) falls inside the opening window, inclusive.
    pub fn is_open_at(&self, time: &str) -> bool {
        self.opening_hours.contains(time)
    }

    pub fn distance_km_to(&self, latitude: f64, longitude: f64) -> f64 {
        self.coordinates
            .distance_km(&Coordinates::new(latitude, longitude))
    }

    /// Decode an untyped document payload.
    pub fn from_data(raw: Value) -> Result<Self, DecodeError> {
        let record: SpaceRecord =
            serde_json::from_value(raw).map_err(|e| DecodeError::Malformed(e.to_string()))?;
        Self::from_record(record)
    }

    /// Decode a typed record, filling defaults for absent optional fields.
    ///
    /// Defaults: no sports, no images, price and rating 0, open all day
    /// (`00:00`-`23:59`), coordinates at the origin.
    pub fn from_record(record: SpaceRecord) -> Result<Self, DecodeError> {
        let id = record
            .id
            .filter(|id| !id.trim().is_empty())
            .ok_or(DecodeError::MissingField("id"))?;
        let name = record.name.ok_or(DecodeError::MissingField("name"))?;
        let description = record
            .description
            .ok_or(DecodeError::MissingField("description"))?;
        let address = record.address.ok_or(DecodeError::MissingField("address"))?;

        let price = record.price.unwrap_or(0.0);
        if !price.is_finite() || price < 0.0 {
            return Err(DecodeError::InvalidPrice(price));
        }

        let rating = record.rating.unwrap_or(0.0);
        if !(0.0..=5.0).contains(&rating) {
            return Err(DecodeError::InvalidRating(rating));
        }

        let opening_hours = record.opening_hours.unwrap_or_default();
        opening_hours.validate()?;

        let coordinates = record.coordinates.unwrap_or_default();
        if !coordinates.is_valid() {
            return Err(DecodeError::InvalidCoordinates {
                latitude: coordinates.latitude,
                longitude: coordinates.longitude,
            });
        }

        Ok(Self {
            id,
            name,
            description,
            address,
            sports: record.sports.unwrap_or_default(),
            images: record.images.unwrap_or_default(),
            price,
            rating,
            opening_hours,
            coordinates,
        })
    }

    /// Field-for-field projection back to a record with every field set.
    pub fn to_record(&self) -> SpaceRecord {
        SpaceRecord {
            id: Some(self.id.clone()),
            name: Some(self.name.clone()),
            description: Some(self.description.clone()),
            address: Some(self.address.clone()),
            sports: Some(self.sports.clone()),
            images: Some(self.images.clone()),
            price: Some(self.price),
            rating: Some(self.rating),
            opening_hours: Some(self.opening_hours.clone()),
            coordinates: Some(self.coordinates),
        }
    }

    /// Untyped document payload, the inverse of [`Space::from_data`].
    ///
    /// Numbers are always emitted as floats, so a record written with
    /// `"price": 80` comes back as `80.0`: equal in value, not in `Value`.
    pub fn to_data(&self) -> Value {
        json!({
            "id": self.id,
            "name": self.name,
            "description": self.description,
            "address": self.address,
            "sports": self.sports,
            "images": self.images,
            "price": self.price,
            "rating": self.rating,
            "openingHours": {
                "open": self.opening_hours.open,
                "close": self.opening_hours.close,
            },
            "coordinates": {
                "latitude": self.coordinates.latitude,
                "longitude": self.coordinates.longitude,
            },
        })
    }
}
