pub mod numeric;

use crate::error::ParseError;
use crate::pipeline::text::fold;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether a listing is offered for sale or for rent
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "kebab-case", try_from = "String")]
pub enum Status {
    ForSale,
    ForRent,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::ForSale => "for-sale",
            Status::ForRent => "for-rent",
        }
    }
}

impl FromStr for Status {
    type Err = ParseError;

    /// Accepts the English keys and the Turkish "satılık"/"kiralık", with
    /// or without Turkish letters.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match fold(s.trim()).as_str() {
            "for-sale" | "satilik" => Ok(Status::ForSale),
            "for-rent" | "kiralik" => Ok(Status::ForRent),
            other => Err(ParseError::Status(other.to_string())),
        }
    }
}

impl TryFrom<String> for Status {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of property. Types the site does not know about yet land in `Other`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum PropertyType {
    Apartment,
    Villa,
    SummerHouse,
    Land,
    Commercial,
    #[serde(other)]
    Other,
}

impl PropertyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Apartment => "apartment",
            PropertyType::Villa => "villa",
            PropertyType::SummerHouse => "summer-house",
            PropertyType::Land => "land",
            PropertyType::Commercial => "commercial",
            PropertyType::Other => "other",
        }
    }

    /// Name shown on the site
    pub fn label(&self) -> &'static str {
        match self {
            PropertyType::Apartment => "Daire",
            PropertyType::Villa => "Villa",
            PropertyType::SummerHouse => "Yazlık",
            PropertyType::Land => "Arsa",
            PropertyType::Commercial => "İşyeri",
            PropertyType::Other => "Diğer",
        }
    }
}

impl FromStr for PropertyType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "apartment" => Ok(PropertyType::Apartment),
            "villa" => Ok(PropertyType::Villa),
            "summer-house" => Ok(PropertyType::SummerHouse),
            "land" => Ok(PropertyType::Land),
            "commercial" => Ok(PropertyType::Commercial),
            "other" => Ok(PropertyType::Other),
            other => Err(ParseError::PropertyType(other.to_string())),
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Yes/no amenities that can be required by a search
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum BooleanFeature {
    Parking,
    Elevator,
    SeaView,
    Balcony,
    Furnished,
}

impl FromStr for BooleanFeature {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "parking" => Ok(BooleanFeature::Parking),
            "elevator" => Ok(BooleanFeature::Elevator),
            "sea-view" => Ok(BooleanFeature::SeaView),
            "balcony" => Ok(BooleanFeature::Balcony),
            "furnished" => Ok(BooleanFeature::Furnished),
            other => Err(ParseError::Feature(other.to_string())),
        }
    }
}

/// Location information for a listing
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Location {
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub district: String,
    /// Display name, e.g. "Yalı Mahallesi"
    #[serde(default)]
    pub neighborhood: String,
}

/// Structured feature bag. Every field is optional: `None` means unknown.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Features {
    #[serde(default, deserialize_with = "numeric::lenient_f64")]
    pub size_m2: Option<f64>,
    #[serde(default, deserialize_with = "numeric::lenient_count")]
    pub room_count: Option<u32>,
    #[serde(default, deserialize_with = "numeric::lenient_count")]
    pub bathroom_count: Option<u32>,
    /// Negative below ground; "Zemin", "Giriş" and "Bahçe Katı" are 0
    #[serde(default, deserialize_with = "numeric::lenient_floor")]
    pub floor: Option<i32>,
    #[serde(default)]
    pub parking: Option<bool>,
    #[serde(default)]
    pub elevator: Option<bool>,
    #[serde(default)]
    pub sea_view: Option<bool>,
    #[serde(default)]
    pub balcony: Option<bool>,
    #[serde(default)]
    pub furnished: Option<bool>,
    #[serde(default)]
    pub heating: Option<String>,
    #[serde(default, deserialize_with = "numeric::lenient_count")]
    pub building_age: Option<u32>,
}

impl Features {
    pub fn flag(&self, feature: BooleanFeature) -> Option<bool> {
        match feature {
            BooleanFeature::Parking => self.parking,
            BooleanFeature::Elevator => self.elevator,
            BooleanFeature::SeaView => self.sea_view,
            BooleanFeature::Balcony => self.balcony,
            BooleanFeature::Furnished => self.furnished,
        }
    }
}

/// A property record as loaded from the backend snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Listing {
    pub id: String,
    pub slug: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub short_description: String,
    pub status: Status,
    pub property_type: PropertyType,
    #[serde(flatten)]
    pub location: Location,
    #[serde(default, deserialize_with = "numeric::lenient_f64")]
    pub price: Option<f64>,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub features: Features,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default = "default_published")]
    pub published: bool,
}

fn default_currency() -> String {
    "TRY".to_string()
}

fn default_published() -> bool {
    true
}

impl Listing {
    /// Replace malformed values with "unknown".
    ///
    /// Prices must be finite and non-negative, sizes finite and positive.
    pub fn normalized(mut self) -> Self {
        // adding 0.0 turns -0.0 into 0.0 so it ties with unpriced listings
        self.price = self
            .price
            .filter(|p| p.is_finite() && *p >= 0.0)
            .map(|p| p + 0.0);
        self.features.size_m2 = self.features.size_m2.filter(|s| s.is_finite() && *s > 0.0);
        self.features.heating = self
            .features
            .heating
            .take()
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty());
        self
    }

    pub fn room_count(&self) -> Option<u32> {
        self.features.room_count
    }

    pub fn size_m2(&self) -> Option<f64> {
        self.features.size_m2
    }

    /// Price per square meter, only when both values are known.
    pub fn price_per_m2(&self) -> Option<f64> {
        match (self.price, self.features.size_m2) {
            (Some(price), Some(size)) if size > 0.0 => Some(price / size),
            _ => None,
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use chrono::TimeZone;

    /// Published for-sale apartment in Bodrum with only price and rooms set.
    pub fn listing(id: &str, neighborhood: &str, price: Option<f64>, rooms: Option<u32>) -> Listing {
        let created_at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        Listing {
            id: id.to_string(),
            slug: format!("ilan-{}", id),
            title: format!("Satılık daire {}", id),
            short_description: String::new(),
            status: Status::ForSale,
            property_type: PropertyType::Apartment,
            location: Location {
                city: "Muğla".to_string(),
                district: "Bodrum".to_string(),
                neighborhood: neighborhood.to_string(),
            },
            price,
            currency: "TRY".to_string(),
            features: Features {
                room_count: rooms,
                ..Features::default()
            },
            created_at,
            updated_at: created_at,
            images: vec![],
            featured: false,
            published: true,
        }
    }

    pub fn created_on_day(mut listing: Listing, day: i64) -> Listing {
        listing.created_at += chrono::Duration::days(day);
        listing.updated_at = listing.created_at;
        listing
    }
}
