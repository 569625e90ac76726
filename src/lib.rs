//! Theming - branding overrides with cache-busted derived output
//!
//! Resolves branding attributes as stored override or built-in default,
//! derives theme variables and image URLs from them, and invalidates every
//! derived value on each settings write.

pub mod audit;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod host;
pub mod store;
pub mod theming;
pub mod ui;

pub use error::{ThemingError, ThemingResult};
pub use theming::{create_theming, BrandingAttribute, Theming};
