//! Command-line interface definition.
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI entry point for the Baldur's Gate 3 mod installer.
#[derive(Parser, Debug)]
#[command(
    name = "bg3-mods",
    about = "Install and remove Baldur's Gate 3 mods under Steam/Proton",
    version
)]
pub struct Cli {
    /// Subcommand; absent for the bare `<PATH>` and menu forms.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Package to install (.zip archive or .pak file)
    pub package: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Location overrides shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Steam installation root (default: ~/.steam/steam)
    #[arg(long, global = true, value_name = "DIR")]
    pub steam_root: Option<PathBuf>,

    /// Steam application id of the game
    #[arg(long, global = true, value_name = "ID")]
    pub game_id: Option<String>,

    /// Configuration file (default: $XDG_CONFIG_HOME/bg3-mods/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Install a .zip or .pak package
    Install {
        /// Package to install
        path: PathBuf,
    },
    /// Remove a registered mod by the number shown by `list`
    Remove {
        /// 1-based position in the load order
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        number: u32,
    },
    /// List registered mods
    List,
    /// Run the interactive menu
    Menu,
    /// Print version information
    Version,
}

impl Cli {
    /// The command to run, folding the bare `<PATH>` form into `install`
    /// and the no-argument form into `menu`.
    #[must_use]
    pub fn resolved_command(&self) -> Command {
        match (&self.command, &self.package) {
            (Some(command), _) => command.clone(),
            (None, Some(path)) => Command::Install { path: path.clone() },
            (None, None) => Command::Menu,
        }
    }
}

impl Command {
    /// Short name used for the log file.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Install { .. } => "install",
            Self::Remove { .. } => "remove",
            Self::List => "list",
            Self::Menu => "menu",
            Self::Version => "version",
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn bare_path_means_install() {
        let cli = Cli::parse_from(["bg3-mods", "/tmp/mod.zip"]);
        assert_eq!(
            cli.resolved_command(),
            Command::Install {
                path: PathBuf::from("/tmp/mod.zip")
            }
        );
    }

    #[test]
    fn no_arguments_means_menu() {
        let cli = Cli::parse_from(["bg3-mods"]);
        assert_eq!(cli.resolved_command(), Command::Menu);
    }

    #[test]
    fn parse_install_subcommand() {
        let cli = Cli::parse_from(["bg3-mods", "install", "mod.pak"]);
        assert_eq!(
            cli.resolved_command(),
            Command::Install {
                path: PathBuf::from("mod.pak")
            }
        );
    }

    #[test]
    fn parse_remove_number() {
        let cli = Cli::parse_from(["bg3-mods", "remove", "3"]);
        assert_eq!(cli.resolved_command(), Command::Remove { number: 3 });
    }

    #[test]
    fn remove_rejects_zero() {
        assert!(Cli::try_parse_from(["bg3-mods", "remove", "0"]).is_err());
    }

    #[test]
    fn parse_list_and_version() {
        let cli = Cli::parse_from(["bg3-mods", "list"]);
        assert_eq!(cli.resolved_command(), Command::List);
        let cli = Cli::parse_from(["bg3-mods", "version"]);
        assert_eq!(cli.resolved_command(), Command::Version);
    }

    #[test]
    fn parse_global_overrides() {
        let cli = Cli::parse_from([
            "bg3-mods",
            "list",
            "--steam-root",
            "/games/steam",
            "--game-id",
            "42",
            "--config",
            "/etc/bg3.toml",
        ]);
        assert_eq!(cli.global.steam_root, Some(PathBuf::from("/games/steam")));
        assert_eq!(cli.global.game_id.as_deref(), Some("42"));
        assert_eq!(cli.global.config, Some(PathBuf::from("/etc/bg3.toml")));
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::parse_from(["bg3-mods", "-v", "menu"]);
        assert!(cli.verbose);
        let cli = Cli::parse_from(["bg3-mods", "--verbose", "mod.zip"]);
        assert!(cli.verbose);
    }

    #[test]
    fn command_names_are_log_file_stems() {
        assert_eq!(Command::Remove { number: 1 }.name(), "remove");
        assert_eq!(Command::Menu.name(), "menu");
    }
}
