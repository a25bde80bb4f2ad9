/// One marketing service the agency sells a page for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceTopic {
    pub slug: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
}

/// The agency's published service catalog. Page slugs are stable; the
/// content generator keys its prompts off them.
pub const CATALOG: [ServiceTopic; 12] = [
    ServiceTopic {
        slug: "ai-dashboard",
        title: "AI Dashboard",
        summary: "Intelligent, real-time data visualization and analytics platforms.",
    },
    ServiceTopic {
        slug: "digital-marketing",
        title: "Digital Marketing",
        summary: "Comprehensive strategies to boost your online presence and reach.",
    },
    ServiceTopic {
        slug: "google-ads",
        title: "Google Ads",
        summary: "Targeted ad campaigns that deliver measurable results and ROI.",
    },
    ServiceTopic {
        slug: "seo-optimization",
        title: "SEO Optimization",
        summary: "Enhancing your visibility on search engines to attract organic traffic.",
    },
    ServiceTopic {
        slug: "logo-and-branding",
        title: "Logo & Branding",
        summary: "Crafting unique brand identities that resonate with your audience.",
    },
    ServiceTopic {
        slug: "affiliate-marketing",
        title: "Affiliate Marketing",
        summary: "Building powerful affiliate networks to drive sales and partnerships.",
    },
    ServiceTopic {
        slug: "data-analysis",
        title: "Data Analysis",
        summary: "Uncovering actionable insights from your data to inform decisions.",
    },
    ServiceTopic {
        slug: "social-media",
        title: "Social Media",
        summary: "Engaging content and community management across all platforms.",
    },
    ServiceTopic {
        slug: "3d-design-animation",
        title: "3D Design & Animation",
        summary: "Bringing your ideas to life with stunning 3D visuals and animations.",
    },
    ServiceTopic {
        slug: "web-development",
        title: "Web Development",
        summary: "Building fast, responsive, and secure websites for modern businesses.",
    },
    ServiceTopic {
        slug: "whatsapp-chatbot",
        title: "WhatsApp Chatbot",
        summary: "Automating customer interactions with intelligent WhatsApp chatbots.",
    },
    ServiceTopic {
        slug: "brochure-creation",
        title: "Brochure Creation",
        summary: "Designing professional and compelling marketing materials.",
    },
];

pub fn find_topic(slug: &str) -> Option<&'static ServiceTopic> {
    CATALOG.iter().find(|topic| topic.slug == slug)
}
