//! UI module for consistent CLI output
//!
//! Uses `cliclack` for styled logging in interactive terminals with
//! automatic fallback to plain, prefixed lines in CI/non-interactive
//! environments. Machine-readable values (URLs, variables, footer HTML) are
//! printed directly by the commands and never pass through here.
//!
//! # Example
//!
//! ```rust,ignore
//! use theming::ui::{self, Status, UiContext};
//!
//! let ctx = UiContext::detect();
//!
//! ui::step(&ctx, Status::Ok, "Set color", Some("cache buster 4"));
//! ui::field(&ctx, "Icon replacement", "supported", Some(Status::Ok));
//! ```

mod context;
mod output;

pub use context::UiContext;
pub use output::{field, heading, remark, step, Status};
