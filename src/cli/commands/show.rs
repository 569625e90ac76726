//! Show and get commands - branding attributes in effect

use crate::cli::args::{GetArgs, OutputFormat, ShowArgs};
use crate::error::ThemingResult;
use crate::theming::{BrandingAttribute, Theming};
use crate::ui::{self, UiContext};
use console::style;
use serde::Serialize;

/// One row of the show output
#[derive(Debug, Serialize)]
struct AttributeRow {
    attribute: &'static str,
    setting: &'static str,
    overridden: bool,
    value: String,
}

/// Execute the show command
pub async fn execute(args: ShowArgs, theming: &Theming) -> ThemingResult<()> {
    let mut rows = Vec::with_capacity(BrandingAttribute::ALL.len());
    for attribute in BrandingAttribute::ALL {
        rows.push(AttributeRow {
            attribute: attribute.as_str(),
            setting: attribute.setting_key(),
            overridden: theming.resolver().is_overridden(attribute).await,
            value: theming.resolve(attribute).await,
        });
    }

    match args.format {
        OutputFormat::Table => print_table(&rows),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
        OutputFormat::Plain => {
            for row in &rows {
                println!("{}={}", row.attribute, row.value);
            }
        }
    }

    Ok(())
}

/// Execute the get command
pub async fn get(args: GetArgs, theming: &Theming) -> ThemingResult<()> {
    let attribute: BrandingAttribute = args.attribute.parse()?;
    println!("{}", theming.resolve(attribute).await);
    Ok(())
}

fn print_table(rows: &[AttributeRow]) {
    let ctx = UiContext::detect();
    ui::heading(&ctx, "Branding");

    println!(
        "{:<20} {:<18} {:<10} {}",
        style("ATTRIBUTE").bold(),
        style("SETTING").bold(),
        style("SOURCE").bold(),
        style("VALUE").bold()
    );
    println!("{}", "-".repeat(70));

    for row in rows {
        let source = if row.overridden {
            style("override").green()
        } else {
            style("default").dim()
        };
        println!(
            "{:<20} {:<18} {:<10} {}",
            row.attribute, row.setting, source, row.value
        );
    }
}
