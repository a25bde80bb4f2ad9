use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use clap::Args;

use crate::infra::{
    default_intake_policy, InMemoryListingRepository, InMemoryMediaStore, StaticContentGenerator,
};
use listing_desk::error::AppError;
use listing_desk::workflows::content::ServiceContentService;
use listing_desk::workflows::listings::{
    export_csv, ListingDetails, ListingService, ListingSubmission, PhotoUpload,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Also print the moderation CSV export
    #[arg(long)]
    pub(crate) export: bool,
    /// Render a sample service page at the end of the demo
    #[arg(long)]
    pub(crate) service_page: Option<String>,
}

/// Walk the full listing lifecycle against in-memory infrastructure:
/// two public submissions, one approval, one rejection, then the views an
/// operator and a visitor would see.
pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let repository = Arc::new(InMemoryListingRepository::default());
    let media = Arc::new(InMemoryMediaStore::default());
    let service = ListingService::new(repository, media, default_intake_policy());

    println!("== Listing Desk demo ==\n");

    let flat = service.submit(sample_flat()).map_err(AppError::from)?;
    println!(
        "submitted {} ({}) with {} photo(s), pending review",
        flat.id.0,
        flat.headline(),
        flat.photo_urls.len()
    );

    let office = service.submit(sample_office()).map_err(AppError::from)?;
    println!(
        "submitted {} ({}) with {} photo(s), pending review",
        office.id.0,
        office.headline(),
        office.photo_urls.len()
    );

    service.approve(&flat.id).map_err(AppError::from)?;
    println!("approved {}", flat.id.0);

    service.delete(&office.id).map_err(AppError::from)?;
    println!("deleted {} after review\n", office.id.0);

    let queue = service.moderation_queue().map_err(AppError::from)?;
    println!("moderation queue ({} record(s)):", queue.len());
    for record in &queue {
        println!(
            "  {:<16} {:<10} {}",
            record.id.0,
            record.status_label(),
            record.headline()
        );
    }

    let public = service.public_listings().map_err(AppError::from)?;
    println!("\npublic view ({} record(s)):", public.len());
    for record in &public {
        println!("  {} | ₹{} | {}", record.headline(), record.price, record.location());
    }

    if args.export {
        let document = export_csv(&queue)
            .map_err(|err| AppError::Io(std::io::Error::other(err.to_string())))?;
        println!("\n{document}");
    }

    if let Some(slug) = args.service_page {
        let content = ServiceContentService::new(Arc::new(StaticContentGenerator));
        match content.page(&slug) {
            Ok(page) => {
                println!("\n== {} ==\n{}", page.title, page.introduction);
                for benefit in &page.benefits {
                    println!("  - {benefit}");
                }
            }
            Err(error) => println!("\nservice page unavailable: {error}"),
        }
    }

    Ok(())
}

fn sample_flat() -> ListingSubmission {
    ListingSubmission {
        details: ListingDetails {
            property_type: "House / Flat".to_string(),
            listing_type: "Sell".to_string(),
            city: "Ahmedabad".to_string(),
            area: "Satellite".to_string(),
            price: 12_000_000,
            size: 1650,
            description: "A beautiful, well-ventilated 3BHK apartment with modern amenities and a great view.".to_string(),
            owner_name: Some("Ramesh Patel".to_string()),
            owner_mobile: "+919876543210".to_string(),
        },
        photos: vec![stub_photo("living-room.jpg"), stub_photo("balcony.jpg")],
    }
}

fn sample_office() -> ListingSubmission {
    ListingSubmission {
        details: ListingDetails {
            property_type: "Commercial Shop/Office".to_string(),
            listing_type: "Rent".to_string(),
            city: "Ahmedabad".to_string(),
            area: "SG Highway".to_string(),
            price: 75_000,
            size: 900,
            description: "Prime commercial office space ideal for startups and established businesses.".to_string(),
            owner_name: Some("Sunita Sharma".to_string()),
            owner_mobile: "+919876543211".to_string(),
        },
        photos: vec![stub_photo("workspace.jpg")],
    }
}

fn stub_photo(file_name: &str) -> PhotoUpload {
    let payload = BASE64.encode([0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10]);
    PhotoUpload {
        file_name: file_name.to_string(),
        data_uri: format!("data:image/jpeg;base64,{payload}"),
    }
}
