//! Core library for the agency's listing desk: property listing intake and
//! moderation, service-page content generation, and contact intake.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
