//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

/// snaplink - a small URL shortener service
#[derive(Parser, Debug)]
#[command(name = "snaplink")]
#[command(version)]
#[command(about = "A small URL shortener service", long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file (default: config.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server (default when no command is given)
    Serve,

    /// Shorten a URL with a generated code
    Add {
        /// Target URL
        target_url: String,
    },

    /// List all short links
    List,

    /// Point an existing short code at a new URL
    Update {
        /// Short code to update
        short_code: String,

        /// New target URL
        target_url: String,
    },

    /// Remove a short link
    Remove {
        /// Short code to remove
        short_code: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: print to stdout)
        #[arg(long, short = 'o')]
        output_path: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_command_means_server() {
        let cli = Cli::parse_from(["snaplink"]);
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::parse_from(["snaplink", "serve", "-c", "custom.toml"]);
        assert!(matches!(cli.command, Some(Commands::Serve)));
        assert_eq!(cli.config.as_deref(), Some("custom.toml"));
    }

    #[test]
    fn test_update_args() {
        let cli = Cli::parse_from(["snaplink", "update", "abc1234", "https://example.com/b"]);
        match cli.command {
            Some(Commands::Update {
                short_code,
                target_url,
            }) => {
                assert_eq!(short_code, "abc1234");
                assert_eq!(target_url, "https://example.com/b");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_config_generate_output() {
        let cli = Cli::parse_from(["snaplink", "config", "generate", "-o", "out.toml"]);
        match cli.command {
            Some(Commands::Config {
                action: ConfigCommands::Generate { output_path, force },
            }) => {
                assert_eq!(output_path.as_deref(), Some("out.toml"));
                assert!(!force);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
