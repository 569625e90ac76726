//! Derived output commands - variables, image paths, footer, logo, icons

use crate::cli::args::{ImagePathArgs, LogoArgs, VarsArgs};
use crate::error::ThemingResult;
use crate::theming::Theming;
use crate::ui::{self, Status, UiContext};

/// Execute the vars command
pub async fn vars(args: VarsArgs, theming: &Theming) -> ThemingResult<()> {
    let variables = theming.scss_variables().await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&variables)?);
    } else {
        print!("{}", variables.to_scss());
    }
    Ok(())
}

/// Execute the image-path command
pub async fn image_path(args: ImagePathArgs, theming: &Theming) -> ThemingResult<()> {
    match theming.replace_image_path(&args.app, &args.file).await {
        Some(url) => println!("{}", url),
        None => {
            let ctx = UiContext::detect();
            ui::remark(&ctx, "Default asset is served unchanged");
        }
    }
    Ok(())
}

/// Execute the footer command
pub async fn footer(theming: &Theming) -> ThemingResult<()> {
    println!("{}", theming.resolver().short_footer().await);
    Ok(())
}

/// Execute the logo command
pub async fn logo(args: LogoArgs, theming: &Theming) -> ThemingResult<()> {
    println!("{}", theming.resolver().logo(!args.png).await);
    Ok(())
}

/// Execute the icons command
pub async fn icons(theming: &Theming) -> ThemingResult<()> {
    let ctx = UiContext::detect();
    let supported = theming.should_replace_icons().await;

    let (value, status) = if supported {
        ("supported", Status::Ok)
    } else {
        ("unsupported", Status::Warn)
    };
    ui::field(&ctx, "Icon replacement", value, Some(status));
    Ok(())
}
