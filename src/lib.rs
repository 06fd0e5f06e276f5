//! chart-analysis-service: stateless HTTP service that forwards uploaded
//! chart images to the Gemini vision API and relays a structured
//! market-analysis verdict.

pub mod config;
pub mod error;
pub mod handlers;
pub mod locale;
pub mod models;
pub mod observability;
pub mod services;
pub mod startup;
