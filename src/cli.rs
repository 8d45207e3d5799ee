//! Command-line surface: global options, subcommands, and their option sets.
use std::fmt;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{Args, Parser, Subcommand, ValueEnum};

/// Top-level CLI entry point.
#[derive(Parser, Debug)]
#[command(
    name = "no",
    about = "NixOS and Home Manager command-line helper",
    version = crate::commands::version::version(),
    disable_help_subcommand = true,
    after_help = "Run `no <command> --help` to get help for a specific command"
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Directory containing flake.nix [default: .]
    #[arg(short, long, global = true, value_name = "PATH")]
    pub directory: Option<PathBuf>,

    /// Print the commands that would run without running them
    #[arg(short = 'n', long, global = true)]
    pub dry_run: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Collect garbage and prune old system generations
    Garbage(GarbageOpts),
    /// Rebuild a Home Manager configuration
    Home(HomeOpts),
    /// Rebuild a NixOS configuration
    Rebuild(RebuildOpts),
    /// Update the flake.lock file
    Update(UpdateOpts),
    /// Print this help
    Help,
    /// Print a shell completion script
    Completions(CompletionsOpts),
    /// Print version information
    Version,
}

impl Command {
    /// Name of the log file kept for this command, if it keeps one.
    ///
    /// Only commands that run external programs are logged.
    #[must_use]
    pub const fn log_name(&self) -> Option<&'static str> {
        match self {
            Self::Garbage(_) => Some("garbage"),
            Self::Home(_) => Some("home"),
            Self::Rebuild(_) => Some("rebuild"),
            Self::Update(_) => Some("update"),
            Self::Help | Self::Completions(_) | Self::Version => None,
        }
    }
}

/// Options for the `garbage` subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct GarbageOpts {
    /// Delete every old generation and drop them from the boot menu now
    #[arg(short, long)]
    pub burn: bool,
}

/// Options for the `home` subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct HomeOpts {
    /// Home Manager operation to perform
    #[arg(short, long, value_enum, default_value_t)]
    pub operation: HomeOperation,

    /// Home Manager profile to use from the flake [default: <user>@<hostname>]
    #[arg(short, long, value_name = "NAME")]
    pub profile: Option<String>,
}

/// Options for the `rebuild` subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct RebuildOpts {
    /// NixOS configuration to use from the flake [default: <hostname>]
    #[arg(short, long, value_name = "NAME")]
    pub config: Option<String>,

    /// How the built configuration is activated
    #[arg(short, long, value_enum, default_value_t)]
    pub operation: RebuildOperation,
}

/// Options for the `update` subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct UpdateOpts {
    /// Rebuild the system for the next boot after a successful update
    #[arg(short, long)]
    pub rebuild: bool,

    /// Flake inputs to update [default: all]
    #[arg(value_name = "INPUT")]
    pub inputs: Vec<String>,
}

/// Options for the `completions` subcommand.
#[derive(Args, Debug, Clone)]
pub struct CompletionsOpts {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

/// Activation modes accepted by `nixos-rebuild`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RebuildOperation {
    /// Make the configuration the boot default without activating it
    Boot,
    /// Build the configuration only
    Build,
    /// Build a virtual machine running the configuration
    BuildVm,
    /// Build a virtual machine with a bootloader
    BuildVmWithBootloader,
    /// Show what activation would change
    DryActivate,
    /// Activate now and make it the boot default
    #[default]
    Switch,
    /// Activate now without changing the boot default
    Test,
}

impl RebuildOperation {
    /// Verb passed to `nixos-rebuild`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Boot => "boot",
            Self::Build => "build",
            Self::BuildVm => "build-vm",
            Self::BuildVmWithBootloader => "build-vm-with-bootloader",
            Self::DryActivate => "dry-activate",
            Self::Switch => "switch",
            Self::Test => "test",
        }
    }

    /// Whether the operation touches the running system or its bootloader.
    #[must_use]
    pub const fn requires_root(self) -> bool {
        matches!(
            self,
            Self::Boot | Self::DryActivate | Self::Switch | Self::Test
        )
    }
}

impl fmt::Display for RebuildOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operations accepted by `home-manager`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HomeOperation {
    /// Build the configuration only
    Build,
    /// Instantiate the configuration without building it
    Instantiate,
    /// Build and activate the configuration
    #[default]
    Switch,
}

impl HomeOperation {
    /// Verb passed to `home-manager`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Build => "build",
            Self::Instantiate => "instantiate",
            Self::Switch => "switch",
        }
    }
}

impl fmt::Display for HomeOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exit status for a failed parse.
///
/// Help and version requests succeed; unknown subcommands, invalid choices
/// and every other usage error exit with 1.
#[must_use]
pub fn parse_error_exit_code(err: &clap::Error) -> u8 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}

#[cfg(test)]
#[allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_rebuild_defaults() {
        let cli = Cli::parse_from(["no", "rebuild"]);
        let Command::Rebuild(opts) = cli.command else {
            panic!("expected rebuild");
        };
        assert_eq!(opts.config, None);
        assert_eq!(opts.operation, RebuildOperation::Switch);
    }

    #[test]
    fn parse_rebuild_all_operations() {
        for (flag, expected) in [
            ("boot", RebuildOperation::Boot),
            ("build", RebuildOperation::Build),
            ("build-vm", RebuildOperation::BuildVm),
            (
                "build-vm-with-bootloader",
                RebuildOperation::BuildVmWithBootloader,
            ),
            ("dry-activate", RebuildOperation::DryActivate),
            ("switch", RebuildOperation::Switch),
            ("test", RebuildOperation::Test),
        ] {
            let cli = Cli::parse_from(["no", "rebuild", "-o", flag]);
            let Command::Rebuild(opts) = cli.command else {
                panic!("expected rebuild");
            };
            assert_eq!(opts.operation, expected);
            assert_eq!(opts.operation.as_str(), flag);
        }
    }

    #[test]
    fn parse_rebuild_config_short_and_long() {
        for args in [
            ["no", "rebuild", "-c", "desk"],
            ["no", "rebuild", "--config", "desk"],
        ] {
            let cli = Cli::parse_from(args);
            let Command::Rebuild(opts) = cli.command else {
                panic!("expected rebuild");
            };
            assert_eq!(opts.config.as_deref(), Some("desk"));
        }
    }

    #[test]
    fn rebuild_rejects_unknown_operation() {
        let err = Cli::try_parse_from(["no", "rebuild", "-o", "badvalue"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
        assert_eq!(parse_error_exit_code(&err), 1);
        let rendered = err.render().to_string();
        for value in ["boot", "build-vm-with-bootloader", "dry-activate", "switch", "test"] {
            assert!(rendered.contains(value), "missing {value} in: {rendered}");
        }
    }

    #[test]
    fn home_rejects_rebuild_only_operation() {
        let err = Cli::try_parse_from(["no", "home", "--operation", "boot"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
        let rendered = err.render().to_string();
        assert!(rendered.contains("instantiate"), "{rendered}");
    }

    #[test]
    fn parse_home_options() {
        let cli = Cli::parse_from(["no", "home", "-o", "build", "-p", "bob@desk"]);
        let Command::Home(opts) = cli.command else {
            panic!("expected home");
        };
        assert_eq!(opts.operation, HomeOperation::Build);
        assert_eq!(opts.profile.as_deref(), Some("bob@desk"));
    }

    #[test]
    fn parse_home_defaults_to_switch() {
        let cli = Cli::parse_from(["no", "home"]);
        let Command::Home(opts) = cli.command else {
            panic!("expected home");
        };
        assert_eq!(opts.operation, HomeOperation::Switch);
        assert_eq!(opts.profile, None);
    }

    #[test]
    fn parse_update_inputs_and_rebuild() {
        let cli = Cli::parse_from(["no", "update", "-r", "nixpkgs", "nixpkgs-unstable"]);
        let Command::Update(opts) = cli.command else {
            panic!("expected update");
        };
        assert!(opts.rebuild);
        assert_eq!(opts.inputs, vec!["nixpkgs", "nixpkgs-unstable"]);
    }

    #[test]
    fn parse_update_without_inputs() {
        let cli = Cli::parse_from(["no", "update"]);
        let Command::Update(opts) = cli.command else {
            panic!("expected update");
        };
        assert!(!opts.rebuild);
        assert!(opts.inputs.is_empty());
    }

    #[test]
    fn parse_garbage_burn() {
        let cli = Cli::parse_from(["no", "garbage", "--burn"]);
        assert!(matches!(cli.command, Command::Garbage(GarbageOpts { burn: true })));
    }

    #[test]
    fn parse_help_subcommand() {
        let cli = Cli::parse_from(["no", "help"]);
        assert!(matches!(cli.command, Command::Help));
        assert_eq!(cli.command.log_name(), None);
    }

    #[test]
    fn parse_global_directory_after_subcommand() {
        let cli = Cli::parse_from(["no", "rebuild", "-d", "/etc/nixos"]);
        assert_eq!(cli.global.directory, Some(PathBuf::from("/etc/nixos")));
    }

    #[test]
    fn parse_global_directory_before_subcommand() {
        let cli = Cli::parse_from(["no", "--directory", "/etc/nixos", "update"]);
        assert_eq!(cli.global.directory, Some(PathBuf::from("/etc/nixos")));
    }

    #[test]
    fn parse_dry_run_and_verbose() {
        let cli = Cli::parse_from(["no", "-n", "-v", "garbage"]);
        assert!(cli.global.dry_run);
        assert!(cli.verbose);
    }

    #[test]
    fn unknown_subcommand_exits_one() {
        let err = Cli::try_parse_from(["no", "frobnicate"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSubcommand);
        assert_eq!(parse_error_exit_code(&err), 1);
        assert!(err.render().to_string().contains("Usage:"));
    }

    #[test]
    fn missing_subcommand_exits_one() {
        let err = Cli::try_parse_from(["no"]).unwrap_err();
        assert_eq!(parse_error_exit_code(&err), 1);
    }

    #[test]
    fn help_flag_exits_zero() {
        let err = Cli::try_parse_from(["no", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert_eq!(parse_error_exit_code(&err), 0);
    }

    #[test]
    fn version_flag_uses_build_version() {
        assert_eq!(
            Cli::command().get_version(),
            Some(crate::commands::version::version())
        );
    }

    #[test]
    fn log_names_for_process_commands() {
        assert_eq!(
            Cli::parse_from(["no", "garbage"]).command.log_name(),
            Some("garbage")
        );
        assert_eq!(
            Cli::parse_from(["no", "update"]).command.log_name(),
            Some("update")
        );
    }

    #[test]
    fn rebuild_operations_requiring_root() {
        assert!(RebuildOperation::Switch.requires_root());
        assert!(RebuildOperation::Boot.requires_root());
        assert!(!RebuildOperation::Build.requires_root());
        assert!(!RebuildOperation::BuildVm.requires_root());
    }
}
