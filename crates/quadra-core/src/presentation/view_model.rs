//! Screen-shaped projection of a space

use serde::Serialize;

use crate::domain::{Coordinates, Space};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceViewModel {
    pub id: String,
    pub name: String,
    pub description: String,
    pub address: String,
    pub sports: Vec<String>,
    /// Sports joined with ", " for list rows
    pub sports_text: String,
    pub images: Vec<String>,
    pub primary_image: Option<String>,
    pub price: f64,
    pub formatted_price: String,
    pub rating: f64,
    pub formatted_rating: String,
    pub opening_hours_text: String,
    pub is_open_now: bool,
    pub coordinates: Coordinates,
}

impl SpaceViewModel {
    /// Project `space`, using `now` (`HH:MM`, local time) for `is_open_now`.
    pub fn from_space(space: &Space, now: &str) -> Self {
        let hours = space.opening_hours();
        Self {
            id: space.id().to_string(),
            name: space.name().to_string(),
            description: space.description().to_string(),
            address: space.address().to_string(),
            sports: space.sports().to_vec(),
            sports_text: space.sports().join(", "),
            images: space.images().to_vec(),
            primary_image: space.primary_image().map(str::to_string),
            price: space.price(),
            formatted_price: format_price(space.price()),
            rating: space.rating(),
            formatted_rating: format!("{:.1}", space.rating()),
            opening_hours_text: format!("{} - {}", hours.open, hours.close),
            is_open_now: space.is_open_at(now),
            coordinates: space.coordinates(),
        }
    }
}

/// Hourly price in reais, e.g. `R$ 80.00/h`.
pub fn format_price(price: f64) -> String {
    format!("R$ {:.2}/h", price)
}
