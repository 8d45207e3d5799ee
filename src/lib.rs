//! NixOS and Home Manager command-line helper.
//!
//! `no` is a thin front-end over `nixos-rebuild`, `home-manager`, `nix` and
//! `nix-collect-garbage`. It validates options, builds the command lines, and
//! runs them one after another with their output forwarded live.
//!
//! - **[`cli`]**: clap definitions of every subcommand and option
//! - **[`commands`]**: dispatch and one handler per subcommand
//! - **[`exec`]**: [`exec::Invocation`] and the [`exec::Executor`] seam
//! - **[`context`]**: directory, identity, and settings passed to handlers
//! - **[`config`]**: the optional `config.toml` settings file
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod exec;
pub mod interrupt;
pub mod logging;
