//! Set and undo commands - the only CLI paths that write overrides

use crate::cli::args::{SetArgs, UndoArgs};
use crate::error::{ThemingError, ThemingResult};
use crate::theming::{validate_setting, Theming, KNOWN_SETTINGS};
use crate::ui::{self, Status, UiContext};

/// Execute the set command
pub async fn set(args: SetArgs, theming: &Theming) -> ThemingResult<()> {
    let ctx = UiContext::detect();

    validate_setting(&args.key, &args.value)?;
    let version = theming.set(&args.key, &args.value).await?;

    ui::step(
        &ctx,
        Status::Ok,
        &format!("Set {}", args.key),
        Some(format!("cache buster {}", version).as_str()),
    );
    Ok(())
}

/// Execute the undo command
pub async fn undo(args: UndoArgs, theming: &Theming) -> ThemingResult<()> {
    let ctx = UiContext::detect();

    if !KNOWN_SETTINGS.contains(&args.key.as_str()) {
        return Err(ThemingError::invalid_setting(&args.key, "unknown setting"));
    }

    let value = theming.undo(&args.key).await?;

    ui::step(&ctx, Status::Ok, &format!("Reverted {}", args.key), None);
    if !value.is_empty() {
        ui::field(&ctx, "Now", &value, None);
    }
    Ok(())
}
