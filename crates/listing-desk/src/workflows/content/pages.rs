use std::sync::Arc;

use serde::Serialize;
use tracing::warn;

use super::catalog::{find_topic, ServiceTopic};
use super::generator::{ContentGenerator, ServiceCopy};

/// Shown whenever image generation fails; the page must render regardless.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://placehold.co/800x450.png";

/// Fully assembled content for one service page.
#[derive(Debug, Clone, Serialize)]
pub struct ServicePageContent {
    pub slug: &'static str,
    pub title: &'static str,
    pub introduction: String,
    pub benefits: Vec<String>,
    pub market_value: String,
    pub why_us: String,
    pub preview_image: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceContentError {
    #[error("unknown service '{0}'")]
    UnknownService(String),
}

/// Assembles service pages from the generator, falling back to static
/// placeholder content whenever the backend misbehaves. Generator failures
/// never propagate past this service.
pub struct ServiceContentService<G> {
    generator: Arc<G>,
}

impl<G> ServiceContentService<G>
where
    G: ContentGenerator + 'static,
{
    pub fn new(generator: Arc<G>) -> Self {
        Self { generator }
    }

    pub fn page(&self, slug: &str) -> Result<ServicePageContent, ServiceContentError> {
        let topic =
            find_topic(slug).ok_or_else(|| ServiceContentError::UnknownService(slug.to_string()))?;

        let copy = match self.generator.generate_copy(topic) {
            Ok(copy) => copy,
            Err(error) => {
                warn!(%error, slug = topic.slug, "content generation failed, using fallback copy");
                fallback_copy(topic)
            }
        };

        let preview_image = self.image_or_placeholder(topic);

        Ok(ServicePageContent {
            slug: topic.slug,
            title: topic.title,
            introduction: copy.introduction,
            benefits: copy.benefits,
            market_value: copy.market_value,
            why_us: copy.why_us,
            preview_image,
        })
    }

    pub fn regenerate_image(&self, slug: &str) -> Result<String, ServiceContentError> {
        let topic =
            find_topic(slug).ok_or_else(|| ServiceContentError::UnknownService(slug.to_string()))?;
        Ok(self.image_or_placeholder(topic))
    }

    fn image_or_placeholder(&self, topic: &ServiceTopic) -> String {
        match self.generator.generate_preview_image(topic) {
            Ok(url) => url,
            Err(error) => {
                warn!(%error, slug = topic.slug, "image generation failed, using placeholder");
                PLACEHOLDER_IMAGE_URL.to_string()
            }
        }
    }
}

/// Deterministic copy used when the generator is unreachable.
pub fn fallback_copy(topic: &ServiceTopic) -> ServiceCopy {
    ServiceCopy {
        introduction: format!(
            "Discover the power of our {} service. We offer tailored solutions \
             to help your business thrive in the digital landscape.",
            topic.title
        ),
        benefits: vec![
            "Boost your brand visibility and reach.".to_string(),
            "Drive targeted traffic and increase conversions.".to_string(),
            "Gain a competitive edge with data-driven strategies.".to_string(),
            "Receive dedicated support from our team of experts.".to_string(),
        ],
        market_value: format!(
            "In today's competitive market, a strong digital presence is crucial. \
             Our {} service provides the essential tools and expertise to ensure \
             your business not only competes but excels.",
            topic.title
        ),
        why_us: "We combine innovative technology with a client-centric approach. \
                 Our team is dedicated to understanding your unique goals and \
                 delivering measurable results that drive growth."
            .to_string(),
    }
}
