use serde::Deserialize;

use super::domain::{ListingRecord, ListingType, PropertyType};

/// Visitor-side filter over an already-fetched set of approved listings.
///
/// Filtering is pure and recomputed per call; the fetched set is never
/// mutated and no further queries run.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingFilter {
    #[serde(default)]
    pub listing_type: Option<String>,
    #[serde(default)]
    pub property_type: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub max_price: Option<u64>,
    #[serde(default)]
    pub q: Option<String>,
}

impl ListingFilter {
    pub fn is_empty(&self) -> bool {
        self.listing_type.is_none()
            && self.property_type.is_none()
            && self.city.is_none()
            && self.max_price.is_none()
            && self.q.is_none()
    }

    pub fn apply<'a>(&self, records: &'a [ListingRecord]) -> Vec<&'a ListingRecord> {
        records
            .iter()
            .filter(|record| self.matches(record))
            .collect()
    }

    fn matches(&self, record: &ListingRecord) -> bool {
        if let Some(wanted) = self.listing_type.as_deref().and_then(ListingType::parse) {
            if record.listing_type != wanted {
                return false;
            }
        }

        if let Some(wanted) = self.property_type.as_deref().and_then(PropertyType::parse) {
            if record.property_type != wanted {
                return false;
            }
        }

        if let Some(city) = self.city.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            if !contains_ignore_case(&record.city, city) {
                return false;
            }
        }

        if let Some(max_price) = self.max_price {
            if record.price > max_price {
                return false;
            }
        }

        if let Some(text) = self.q.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            let headline = record.headline();
            let location = record.location();
            if !contains_ignore_case(&headline, text) && !contains_ignore_case(&location, text) {
                return false;
            }
        }

        true
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
