//! CLI command definitions for the `brandkit` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod chat;
pub mod extract;
pub mod generate;
pub mod output;
pub mod speak;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Build an MVNO brand kit by talking to it.
#[derive(Parser)]
#[command(name = "brandkit", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the brand wizard in the terminal.
    Chat {
        /// Speak replies into audio files in this directory and take answers
        /// as push-to-talk lines.
        #[arg(long)]
        voice_dir: Option<PathBuf>,

        /// Write the landing page HTML here once assets are ready.
        #[arg(long)]
        snapshot: Option<PathBuf>,
    },

    /// Generate the full asset bundle for a brand in one shot.
    Generate {
        /// Brand name (prompted if omitted).
        #[arg(long)]
        name: Option<String>,

        /// Brand description (prompted if omitted).
        #[arg(long)]
        description: Option<String>,

        /// Write the landing page HTML here.
        #[arg(long)]
        snapshot: Option<PathBuf>,
    },

    /// Extract a named property from free text.
    Extract {
        /// Property to extract, e.g. brandName or brandDescription.
        #[arg(long)]
        property: String,

        /// Extra guidance for the extraction.
        #[arg(long)]
        instructions: Option<String>,

        /// The text to read.
        text: String,
    },

    /// Synthesize speech into an audio file.
    Speak {
        /// Text to speak.
        text: String,

        /// Output file (MPEG audio).
        #[arg(short, long, default_value = "speech.mp3")]
        out: PathBuf,
    },

    /// Start the REST API server.
    Serve {
        /// Port to listen on (default from config.toml, else 3000).
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (default from config.toml, else 127.0.0.1).
        #[arg(long)]
        host: Option<String>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_generate_flags() {
        let cli = Cli::parse_from([
            "brandkit",
            "-vv",
            "generate",
            "--name",
            "Acme",
            "--description",
            "Prepaid plans",
            "--json",
        ]);
        assert_eq!(cli.verbose, 2);
        assert!(cli.json);
        match cli.command {
            Commands::Generate {
                name, description, ..
            } => {
                assert_eq!(name.as_deref(), Some("Acme"));
                assert_eq!(description.as_deref(), Some("Prepaid plans"));
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn serve_defaults_come_from_config() {
        let cli = Cli::parse_from(["brandkit", "serve"]);
        match cli.command {
            Commands::Serve { port, host } => {
                assert!(port.is_none());
                assert!(host.is_none());
            }
            _ => panic!("expected serve"),
        }
    }
}
