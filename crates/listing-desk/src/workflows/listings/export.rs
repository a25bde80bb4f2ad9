use super::domain::ListingRecord;

/// Error raised while rendering the moderation export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("csv serialization failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("csv buffer was not valid utf-8")]
    Encoding,
}

const EXPORT_HEADERS: [&str; 10] = [
    "ID",
    "Title",
    "Price",
    "Type",
    "Property Type",
    "Location",
    "Owner Name",
    "Owner Mobile",
    "Status",
    "Created At",
];

/// Render the currently loaded moderation queue as a CSV document.
///
/// This is a pure projection of in-memory state; it performs no queries.
pub fn export_csv(records: &[ListingRecord]) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(EXPORT_HEADERS)?;

    for record in records {
        let headline = record.headline();
        let price = record.price.to_string();
        let location = record.location();
        let created_at = record.created_at.to_rfc3339();
        writer.write_record([
            record.id.0.as_str(),
            headline.as_str(),
            price.as_str(),
            record.listing_type.label(),
            record.property_type.label(),
            location.as_str(),
            record.owner_name.as_deref().unwrap_or(""),
            record.owner_mobile.as_str(),
            record.status_label(),
            created_at.as_str(),
        ])?;
    }

    let buffer = writer.into_inner().map_err(|_| ExportError::Encoding)?;
    String::from_utf8(buffer).map_err(|_| ExportError::Encoding)
}
