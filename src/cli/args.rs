//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Theming - branding overrides for a web instance
///
/// Resolves branding attributes, manages overrides and prints the derived
/// theme variables and image URLs.
#[derive(Parser, Debug)]
#[command(name = "theming")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "THEMING_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show every branding attribute in effect
    Show(ShowArgs),

    /// Print one branding attribute
    Get(GetArgs),

    /// Store an override
    Set(SetArgs),

    /// Revert an override to its default
    Undo(UndoArgs),

    /// Print the derived theme variables
    Vars(VarsArgs),

    /// Resolve the themed replacement for an app image
    ImagePath(ImagePathArgs),

    /// Print the short footer HTML
    Footer,

    /// Print the logo URL in effect
    Logo(LogoArgs),

    /// Report whether icons can be rendered from vector sources
    Icons,

    /// Show or edit configuration
    Config(ConfigArgs),
}

/// Arguments for the show command
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the get command
#[derive(Parser, Debug)]
pub struct GetArgs {
    /// Attribute name (e.g. entity, slogan, color) or setting key
    pub attribute: String,
}

/// Arguments for the set command
#[derive(Parser, Debug)]
pub struct SetArgs {
    /// Setting key (e.g. name, url, slogan, color, imprintUrl)
    pub key: String,

    /// Value to store
    pub value: String,
}

/// Arguments for the undo command
#[derive(Parser, Debug)]
pub struct UndoArgs {
    /// Setting key to revert
    pub key: String,
}

/// Arguments for the vars command
#[derive(Parser, Debug)]
pub struct VarsArgs {
    /// Print as a JSON object instead of SCSS
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the image-path command
#[derive(Parser, Debug)]
pub struct ImagePathArgs {
    /// Requesting app ("core" or empty for core assets)
    pub app: String,

    /// Requested image file (e.g. favicon.ico, manifest.json)
    pub file: String,
}

/// Arguments for the logo command
#[derive(Parser, Debug)]
pub struct LogoArgs {
    /// Prefer the PNG fallback over SVG
    #[arg(long)]
    pub png: bool,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., defaults.entity)
        key: String,
        /// Value to set
        value: String,
    },
}

/// Output format for the show command
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
    /// Simple text (one per line)
    Plain,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_set() {
        let cli = Cli::parse_from(["theming", "set", "color", "#112233"]);
        match cli.command {
            Commands::Set(args) => {
                assert_eq!(args.key, "color");
                assert_eq!(args.value, "#112233");
            }
            _ => panic!("expected Set command"),
        }
    }

    #[test]
    fn cli_parses_image_path() {
        let cli = Cli::parse_from(["theming", "image-path", "core", "favicon.ico"]);
        match cli.command {
            Commands::ImagePath(args) => {
                assert_eq!(args.app, "core");
                assert_eq!(args.file, "favicon.ico");
            }
            _ => panic!("expected ImagePath command"),
        }
    }

    #[test]
    fn cli_parses_vars_json() {
        let cli = Cli::parse_from(["theming", "vars", "--json"]);
        assert!(matches!(cli.command, Commands::Vars(VarsArgs { json: true })));
    }

    #[test]
    fn cli_parses_show_format() {
        let cli = Cli::parse_from(["theming", "show", "--format", "json"]);
        match cli.command {
            Commands::Show(args) => assert!(matches!(args.format, OutputFormat::Json)),
            _ => panic!("expected Show command"),
        }
    }

    #[test]
    fn cli_parses_config_init_force() {
        let cli = Cli::parse_from(["theming", "config", "init", "--force"]);
        match cli.command {
            Commands::Config(ConfigArgs {
                action: Some(ConfigAction::Init { force }),
            }) => assert!(force),
            _ => panic!("expected Config Init command"),
        }
    }

    #[test]
    fn cli_verbose_levels() {
        let cli = Cli::parse_from(["theming", "footer"]);
        assert_eq!(cli.verbose, 0);

        let cli = Cli::parse_from(["theming", "-v", "footer"]);
        assert_eq!(cli.verbose, 1);

        let cli = Cli::parse_from(["theming", "-vv", "icons"]);
        assert_eq!(cli.verbose, 2);
    }
}
