//! Service-page marketing content generation.
//!
//! Copy and preview images come from a generative backend behind the
//! [`ContentGenerator`] trait; every failure falls back to static
//! placeholder content so a service page always renders.

pub mod catalog;
pub mod generator;
pub mod pages;
pub mod router;


pub use catalog::{find_topic, ServiceTopic, CATALOG};
pub use generator::{ContentError, ContentGenerator, GeminiContentClient, ServiceCopy};
pub use pages::{
    fallback_copy, ServiceContentError, ServiceContentService, ServicePageContent,
    PLACEHOLDER_IMAGE_URL,
};
pub use router::content_router;
