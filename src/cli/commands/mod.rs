//! CLI command implementations

pub mod assets;
pub mod config;
pub mod settings;
pub mod show;

pub use assets::{footer, icons, image_path, logo, vars};
pub use config::execute as config;
pub use settings::{set, undo};
pub use show::execute as show;
pub use show::get;
