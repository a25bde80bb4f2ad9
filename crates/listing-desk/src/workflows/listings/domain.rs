use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for stored listings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListingId(pub String);

/// Property categories offered on the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyType {
    HouseFlat,
    Tenament,
    Commercial,
    LandPlot,
}

impl PropertyType {
    pub const ALL: [PropertyType; 4] = [
        PropertyType::HouseFlat,
        PropertyType::Tenament,
        PropertyType::Commercial,
        PropertyType::LandPlot,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            PropertyType::HouseFlat => "House / Flat",
            PropertyType::Tenament => "Tenament",
            PropertyType::Commercial => "Commercial Shop/Office",
            PropertyType::LandPlot => "Land / Plot",
        }
    }

    pub const fn slug(self) -> &'static str {
        match self {
            PropertyType::HouseFlat => "house-flat",
            PropertyType::Tenament => "tenament",
            PropertyType::Commercial => "commercial",
            PropertyType::LandPlot => "land-plot",
        }
    }

    /// Accepts both the form slug and the display label, case-insensitively.
    pub fn parse(raw: &str) -> Option<Self> {
        let needle = raw.trim();
        Self::ALL.iter().copied().find(|candidate| {
            needle.eq_ignore_ascii_case(candidate.slug())
                || needle.eq_ignore_ascii_case(candidate.label())
        })
    }
}

/// Whether the owner wants to sell, rent out, or buy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListingType {
    Sell,
    Rent,
    Buy,
}

impl ListingType {
    pub const ALL: [ListingType; 3] = [ListingType::Sell, ListingType::Rent, ListingType::Buy];

    pub const fn label(self) -> &'static str {
        match self {
            ListingType::Sell => "Sell",
            ListingType::Rent => "Rent",
            ListingType::Buy => "Buy",
        }
    }

    pub const fn slug(self) -> &'static str {
        match self {
            ListingType::Sell => "sell",
            ListingType::Rent => "rent",
            ListingType::Buy => "buy",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let needle = raw.trim();
        Self::ALL.iter().copied().find(|candidate| {
            needle.eq_ignore_ascii_case(candidate.slug())
                || needle.eq_ignore_ascii_case(candidate.label())
        })
    }
}

/// Raw form fields exactly as the public form submits them.
///
/// Property and listing type arrive as free strings; the intake guard, not
/// serde, decides whether they name a known enumeration member so the caller
/// gets a field-level error instead of a deserialization failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingDetails {
    pub property_type: String,
    pub listing_type: String,
    pub city: String,
    pub area: String,
    pub price: u64,
    pub size: u64,
    pub description: String,
    #[serde(default)]
    pub owner_name: Option<String>,
    pub owner_mobile: String,
}

/// One attached photo, submitted as a data URI the way the web form encodes
/// file inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoUpload {
    pub file_name: String,
    pub data_uri: String,
}

/// A complete public submission: details plus an ordered set of photos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingSubmission {
    pub details: ListingDetails,
    pub photos: Vec<PhotoUpload>,
}

/// Decoded photo payload produced by the intake guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoBlob {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Submission after every field has passed validation. Only the intake
/// guard constructs this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedListing {
    pub property_type: PropertyType,
    pub listing_type: ListingType,
    pub city: String,
    pub area: String,
    pub price: u64,
    pub size: u64,
    pub description: String,
    pub owner_name: Option<String>,
    pub owner_mobile: String,
    pub photos: Vec<PhotoBlob>,
}

/// Stored listing record. Every field the repository persists is spelled out
/// here so nothing unexpected rides along from the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub id: ListingId,
    pub property_type: PropertyType,
    pub listing_type: ListingType,
    pub city: String,
    pub area: String,
    pub price: u64,
    pub size: u64,
    pub description: String,
    pub owner_name: Option<String>,
    pub owner_mobile: String,
    pub photo_urls: Vec<String>,
    pub approved: bool,
    pub created_at: DateTime<Utc>,
}

impl ListingRecord {
    /// Display location, `"{area}, {city}"`.
    pub fn location(&self) -> String {
        format!("{}, {}", self.area, self.city)
    }

    /// Derived card title; the form collects no title of its own.
    pub fn headline(&self) -> String {
        format!(
            "{} for {} in {}",
            self.property_type.label(),
            self.listing_type.label(),
            self.location()
        )
    }

    pub const fn status_label(&self) -> &'static str {
        if self.approved {
            "Approved"
        } else {
            "Pending"
        }
    }

    /// Public card projection. Owner contact details stay private.
    pub fn card_view(&self) -> ListingCardView {
        ListingCardView {
            id: self.id.clone(),
            title: self.headline(),
            property_type: self.property_type.label(),
            listing_type: self.listing_type.label(),
            location: self.location(),
            price: self.price,
            size: self.size,
            description: self.description.clone(),
            photo_urls: self.photo_urls.clone(),
            created_at: self.created_at,
        }
    }

    /// Moderation projection, including the fields the public view hides.
    pub fn admin_view(&self) -> AdminListingView {
        AdminListingView {
            id: self.id.clone(),
            title: self.headline(),
            property_type: self.property_type.label(),
            listing_type: self.listing_type.label(),
            location: self.location(),
            price: self.price,
            size: self.size,
            owner_name: self.owner_name.clone(),
            owner_mobile: self.owner_mobile.clone(),
            photo_urls: self.photo_urls.clone(),
            status: self.status_label(),
            created_at: self.created_at,
        }
    }
}

/// What a site visitor sees on the public listings page.
#[derive(Debug, Clone, Serialize)]
pub struct ListingCardView {
    pub id: ListingId,
    pub title: String,
    pub property_type: &'static str,
    pub listing_type: &'static str,
    pub location: String,
    pub price: u64,
    pub size: u64,
    pub description: String,
    pub photo_urls: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// What an operator sees in the moderation queue.
#[derive(Debug, Clone, Serialize)]
pub struct AdminListingView {
    pub id: ListingId,
    pub title: String,
    pub property_type: &'static str,
    pub listing_type: &'static str,
    pub location: String,
    pub price: u64,
    pub size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
    pub owner_mobile: String,
    pub photo_urls: Vec<String>,
    pub status: &'static str,
    pub created_at: DateTime<Utc>,
}
