//! Filter predicates over a listing snapshot.
//!
//! Every present field of a [`FilterSpec`] narrows the result (logical AND).
//! Absent fields, blank strings and empty sets impose no constraint. Nothing
//! here fails: bad input just produces a smaller (possibly empty) result.

use super::text::{fold, slugify};
use crate::models::{BooleanFeature, Listing, PropertyType, Status};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// User-selected search criteria
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FilterSpec {
    pub status: Option<Status>,
    pub property_type: Option<PropertyType>,
    /// Partial or abbreviated neighborhood name
    pub neighborhood_query: Option<String>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub size_min: Option<f64>,
    pub size_max: Option<f64>,
    /// Accepted room counts
    pub rooms: BTreeSet<u32>,
    /// Accepted bathroom counts
    pub bathrooms: BTreeSet<u32>,
    /// Amenities that must all be present
    pub boolean_features: BTreeSet<BooleanFeature>,
    pub free_text_query: Option<String>,
    /// Heating type, e.g. "kombi" or "yerden ısıtma"
    pub heating: Option<String>,
    pub max_building_age: Option<u32>,
    pub featured: Option<bool>,
    pub published: Option<bool>,
}

impl FilterSpec {
    pub fn matches(&self, listing: &Listing) -> bool {
        Matcher::new(self).matches(listing)
    }

    /// True when no field constrains the result.
    pub fn is_empty(&self) -> bool {
        Matcher::new(self).is_unconstrained()
    }
}

/// Filter a snapshot, preserving the original relative order.
pub fn filter_listings<'a, I>(listings: I, spec: &FilterSpec) -> Vec<&'a Listing>
where
    I: IntoIterator<Item = &'a Listing>,
{
    let matcher = Matcher::new(spec);
    let mut considered = 0usize;
    let kept: Vec<&Listing> = listings
        .into_iter()
        .inspect(|_| considered += 1)
        .filter(|listing| matcher.matches(listing))
        .collect();

    debug!("Filter kept {} of {} listings", kept.len(), considered);
    kept
}

/// A filter spec with its text queries folded once per call.
struct Matcher<'s> {
    spec: &'s FilterSpec,
    neighborhood: Option<String>,
    free_text: Option<String>,
    heating: Option<String>,
    price: (Option<f64>, Option<f64>),
    size: (Option<f64>, Option<f64>),
}

impl<'s> Matcher<'s> {
    fn new(spec: &'s FilterSpec) -> Self {
        Self {
            spec,
            neighborhood: spec
                .neighborhood_query
                .as_deref()
                .map(slugify)
                .filter(|q| !q.is_empty()),
            free_text: spec
                .free_text_query
                .as_deref()
                .map(|q| fold(q.trim()))
                .filter(|q| !q.is_empty()),
            heating: spec
                .heating
                .as_deref()
                .map(|h| fold(h.trim()))
                .filter(|h| !h.is_empty()),
            price: (usable_bound(spec.price_min), usable_bound(spec.price_max)),
            size: (usable_bound(spec.size_min), usable_bound(spec.size_max)),
        }
    }

    fn is_unconstrained(&self) -> bool {
        let spec = self.spec;
        spec.status.is_none()
            && spec.property_type.is_none()
            && self.neighborhood.is_none()
            && self.price == (None, None)
            && self.size == (None, None)
            && spec.rooms.is_empty()
            && spec.bathrooms.is_empty()
            && spec.boolean_features.is_empty()
            && self.free_text.is_none()
            && self.heating.is_none()
            && spec.max_building_age.is_none()
            && spec.featured.is_none()
            && spec.published.is_none()
    }

    fn matches(&self, listing: &Listing) -> bool {
        let spec = self.spec;
        passes_equal(spec.status, listing.status)
            && passes_equal(spec.property_type, listing.property_type)
            && passes_equal(spec.featured, listing.featured)
            && passes_equal(spec.published, listing.published)
            && self.passes_neighborhood(listing)
            && passes_range(listing.price, self.price)
            && passes_range(listing.size_m2(), self.size)
            && passes_membership(&spec.rooms, listing.features.room_count)
            && passes_membership(&spec.bathrooms, listing.features.bathroom_count)
            && passes_features(&spec.boolean_features, listing)
            && self.passes_free_text(listing)
            && self.passes_heating(listing)
            && passes_building_age(spec.max_building_age, listing.features.building_age)
    }

    /// Slug containment in either direction, so "yali" finds "Yalı Mahallesi"
    /// and "Yalıkavak Merkez" finds "Yalıkavak".
    fn passes_neighborhood(&self, listing: &Listing) -> bool {
        let Some(query) = &self.neighborhood else {
            return true;
        };
        let candidate = slugify(&listing.location.neighborhood);
        if candidate.is_empty() {
            return false;
        }
        candidate.contains(query.as_str()) || query.contains(candidate.as_str())
    }

    fn passes_free_text(&self, listing: &Listing) -> bool {
        let Some(query) = &self.free_text else {
            return true;
        };
        [
            listing.title.as_str(),
            listing.short_description.as_str(),
            listing.location.neighborhood.as_str(),
            listing.property_type.as_str(),
            listing.property_type.label(),
        ]
        .iter()
        .any(|field| fold(field).contains(query.as_str()))
    }

    fn passes_heating(&self, listing: &Listing) -> bool {
        match (&self.heating, &listing.features.heating) {
            (None, _) => true,
            (Some(wanted), Some(actual)) => fold(actual.trim()) == *wanted,
            (Some(_), None) => false,
        }
    }
}

/// Malformed bounds (NaN, infinite, negative) are treated as not set.
fn usable_bound(bound: Option<f64>) -> Option<f64> {
    bound.filter(|b| b.is_finite() && *b >= 0.0)
}

fn passes_equal<T: PartialEq>(wanted: Option<T>, actual: T) -> bool {
    wanted.map_or(true, |w| w == actual)
}

/// A present bound excludes listings whose value is unknown.
fn passes_range(value: Option<f64>, (min, max): (Option<f64>, Option<f64>)) -> bool {
    if min.is_none() && max.is_none() {
        return true;
    }
    let Some(value) = value else {
        return false;
    };
    min.map_or(true, |m| value >= m) && max.map_or(true, |m| value <= m)
}

fn passes_membership(accepted: &BTreeSet<u32>, value: Option<u32>) -> bool {
    accepted.is_empty() || value.map_or(false, |v| accepted.contains(&v))
}

fn passes_features(required: &BTreeSet<BooleanFeature>, listing: &Listing) -> bool {
    required
        .iter()
        .all(|feature| listing.features.flag(*feature) == Some(true))
}

fn passes_building_age(max_age: Option<u32>, age: Option<u32>) -> bool {
    match (max_age, age) {
        (None, _) => true,
        (Some(max), Some(age)) => age <= max,
        (Some(_), None) => false,
    }
}
