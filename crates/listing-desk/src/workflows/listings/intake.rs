use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use super::domain::{
    ListingDetails, ListingSubmission, ListingType, PhotoBlob, PhotoUpload, PropertyType,
    ValidatedListing,
};

/// Field-level validation errors surfaced to the submitting user. No
/// repository or media call happens once any of these fire.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("unknown property type '{0}'")]
    UnknownPropertyType(String),
    #[error("unknown listing type '{0}'")]
    UnknownListingType(String),
    #[error("city must be at least {min} characters")]
    CityTooShort { min: usize },
    #[error("area or locality must be at least {min} characters")]
    AreaTooShort { min: usize },
    #[error("price must be positive")]
    PriceNotPositive,
    #[error("size must be positive")]
    SizeNotPositive,
    #[error("description must be at least {min} characters")]
    DescriptionTooShort { min: usize },
    #[error("a mobile number of at least {min} characters is required")]
    MobileTooShort { min: usize },
    #[error("at least one photo is required")]
    NoPhotos,
    #[error("at most {max} photos are allowed, got {found}")]
    TooManyPhotos { max: usize, found: usize },
    #[error("photo '{file_name}' is not an accepted image type ({content_type})")]
    UnacceptedPhotoType {
        file_name: String,
        content_type: String,
    },
    #[error("photo '{file_name}' is not a valid data URI")]
    MalformedPhoto { file_name: String },
}

impl ValidationError {
    /// Form field the error belongs to, for field-level display.
    pub const fn field(&self) -> &'static str {
        match self {
            ValidationError::UnknownPropertyType(_) => "property_type",
            ValidationError::UnknownListingType(_) => "listing_type",
            ValidationError::CityTooShort { .. } => "city",
            ValidationError::AreaTooShort { .. } => "area",
            ValidationError::PriceNotPositive => "price",
            ValidationError::SizeNotPositive => "size",
            ValidationError::DescriptionTooShort { .. } => "description",
            ValidationError::MobileTooShort { .. } => "owner_mobile",
            ValidationError::NoPhotos
            | ValidationError::TooManyPhotos { .. }
            | ValidationError::UnacceptedPhotoType { .. }
            | ValidationError::MalformedPhoto { .. } => "photos",
        }
    }
}

const DEFAULT_MAX_PHOTOS: usize = 3;
const DEFAULT_MIN_DESCRIPTION_CHARS: usize = 20;
const DEFAULT_MIN_MOBILE_CHARS: usize = 10;
const DEFAULT_MIN_LOCALITY_CHARS: usize = 2;

/// Dials backing submission validation. The photo cap and MIME set cover
/// the strictest published form; looser variants are a policy change.
#[derive(Debug, Clone)]
pub struct IntakePolicy {
    pub max_photos: usize,
    pub min_description_chars: usize,
    pub min_mobile_chars: usize,
    pub min_locality_chars: usize,
    pub accepted_photo_types: Vec<String>,
}

impl Default for IntakePolicy {
    fn default() -> Self {
        Self {
            max_photos: DEFAULT_MAX_PHOTOS,
            min_description_chars: DEFAULT_MIN_DESCRIPTION_CHARS,
            min_mobile_chars: DEFAULT_MIN_MOBILE_CHARS,
            min_locality_chars: DEFAULT_MIN_LOCALITY_CHARS,
            accepted_photo_types: vec![mime::IMAGE_JPEG.to_string()],
        }
    }
}

impl IntakePolicy {
    fn accepts_photo_type(&self, content_type: &str) -> bool {
        self.accepted_photo_types
            .iter()
            .any(|accepted| accepted.eq_ignore_ascii_case(content_type))
    }
}

/// Guard responsible for producing `ValidatedListing` instances.
#[derive(Debug, Clone, Default)]
pub struct IntakeGuard {
    policy: IntakePolicy,
}

impl IntakeGuard {
    pub fn with_policy(policy: IntakePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &IntakePolicy {
        &self.policy
    }

    /// Convert an inbound submission into a validated listing, or reject it
    /// with the first violated constraint.
    pub fn validate(
        &self,
        submission: ListingSubmission,
    ) -> Result<ValidatedListing, ValidationError> {
        let ListingSubmission { details, photos } = submission;
        let ListingDetails {
            property_type,
            listing_type,
            city,
            area,
            price,
            size,
            description,
            owner_name,
            owner_mobile,
        } = details;

        let property_type = PropertyType::parse(&property_type)
            .ok_or(ValidationError::UnknownPropertyType(property_type))?;
        let listing_type = ListingType::parse(&listing_type)
            .ok_or(ValidationError::UnknownListingType(listing_type))?;

        let min = self.policy.min_locality_chars;
        if city.trim().chars().count() < min {
            return Err(ValidationError::CityTooShort { min });
        }
        if area.trim().chars().count() < min {
            return Err(ValidationError::AreaTooShort { min });
        }

        if price == 0 {
            return Err(ValidationError::PriceNotPositive);
        }
        if size == 0 {
            return Err(ValidationError::SizeNotPositive);
        }

        let min = self.policy.min_description_chars;
        if description.trim().chars().count() < min {
            return Err(ValidationError::DescriptionTooShort { min });
        }

        let min = self.policy.min_mobile_chars;
        if owner_mobile.trim().chars().count() < min {
            return Err(ValidationError::MobileTooShort { min });
        }

        let photos = self.validate_photos(photos)?;

        Ok(ValidatedListing {
            property_type,
            listing_type,
            city: city.trim().to_string(),
            area: area.trim().to_string(),
            price,
            size,
            description: description.trim().to_string(),
            owner_name: owner_name
                .as_deref()
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string),
            owner_mobile: owner_mobile.trim().to_string(),
            photos,
        })
    }

    fn validate_photos(
        &self,
        photos: Vec<PhotoUpload>,
    ) -> Result<Vec<PhotoBlob>, ValidationError> {
        if photos.is_empty() {
            return Err(ValidationError::NoPhotos);
        }
        if photos.len() > self.policy.max_photos {
            return Err(ValidationError::TooManyPhotos {
                max: self.policy.max_photos,
                found: photos.len(),
            });
        }

        photos
            .into_iter()
            .map(|photo| self.decode_photo(photo))
            .collect()
    }

    fn decode_photo(&self, photo: PhotoUpload) -> Result<PhotoBlob, ValidationError> {
        let PhotoUpload {
            file_name,
            data_uri,
        } = photo;

        let (declared_type, payload) =
            split_data_uri(&data_uri).ok_or_else(|| ValidationError::MalformedPhoto {
                file_name: file_name.clone(),
            })?;

        // Browsers sometimes tag file inputs as octet-stream; fall back to
        // guessing from the file name before rejecting.
        let content_type = if declared_type == mime::APPLICATION_OCTET_STREAM.as_ref() {
            mime_guess::from_path(&file_name)
                .first_raw()
                .unwrap_or(declared_type)
                .to_string()
        } else {
            declared_type.to_string()
        };

        if !self.policy.accepts_photo_type(&content_type) {
            return Err(ValidationError::UnacceptedPhotoType {
                file_name,
                content_type,
            });
        }

        let bytes = BASE64
            .decode(payload)
            .map_err(|_| ValidationError::MalformedPhoto {
                file_name: file_name.clone(),
            })?;

        Ok(PhotoBlob {
            file_name,
            content_type,
            bytes,
        })
    }
}

/// Split `data:<mime>;base64,<payload>` into its MIME type and payload.
fn split_data_uri(uri: &str) -> Option<(&str, &str)> {
    let rest = uri.strip_prefix("data:")?;
    let (header, payload) = rest.split_once(',')?;
    let media_type = header.strip_suffix(";base64")?;
    if media_type.is_empty() {
        return None;
    }
    Some((media_type, payload))
}
