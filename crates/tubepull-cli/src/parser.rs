//! Main CLI parser and top-level argument handling.

use clap::Parser;

use crate::commands::Commands;

/// Download videos and playlists.
#[derive(Parser)]
#[command(name = "tubepull")]
#[command(about = "Download a video, or every video of a playlist")]
#[command(version)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_verbose() {
        let cli = Cli::parse_from([
            "tubepull",
            "download",
            "--url",
            "https://youtu.be/dQw4w9WgXcQ",
            "--verbose",
        ]);
        assert!(cli.verbose);
        assert!(cli.command.is_some());
    }

    #[test]
    fn test_no_command() {
        let cli = Cli::parse_from(["tubepull"]);
        assert!(cli.command.is_none());
    }
}
