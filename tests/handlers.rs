#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::wildcard_imports,
    clippy::indexing_slicing
)]
//! Integration tests for the command handlers.
//!
//! Each test drives a handler through the public API with a journaling
//! executor, verifying the exact command lines, their order, the directory
//! they run in, and how failures short-circuit later steps.

mod common;

use no_cli::cli::{GarbageOpts, HomeOperation, HomeOpts, RebuildOperation, RebuildOpts, UpdateOpts};
use no_cli::commands::{garbage, home, rebuild, update};
use no_cli::config::Settings;

// ---------------------------------------------------------------------------
// rebuild / home
// ---------------------------------------------------------------------------

#[test]
fn rebuild_runs_in_flake_directory() {
    let env = common::TestEnv::new(&[]);
    let ctx = env.context();

    rebuild::run(&RebuildOpts::default(), &ctx).unwrap();

    assert_eq!(
        env.journal.runs(),
        vec!["sudo nixos-rebuild switch --flake .#box"]
    );
    let expected = dunce::canonicalize(env.dir.path()).unwrap();
    assert_eq!(env.executor.dirs(), vec![expected]);
}

#[test]
fn rebuild_dry_activate_is_elevated() {
    let env = common::TestEnv::new(&[]);
    let opts = RebuildOpts {
        config: Some("desk".to_string()),
        operation: RebuildOperation::DryActivate,
    };

    rebuild::run(&opts, &env.context()).unwrap();

    assert_eq!(
        env.journal.runs(),
        vec!["sudo nixos-rebuild dry-activate --flake .#desk"]
    );
}

#[test]
fn home_uses_profile_flake_reference() {
    let env = common::TestEnv::new(&[]);
    let opts = HomeOpts {
        operation: HomeOperation::Switch,
        profile: None,
    };

    home::run(&opts, &env.context()).unwrap();

    assert_eq!(
        env.journal.runs(),
        vec!["home-manager switch --flake .#alice@box"]
    );
}

#[test]
fn home_failure_is_fatal() {
    let env = common::TestEnv::new(&[1]);

    let err = home::run(&HomeOpts::default(), &env.context()).unwrap_err();

    assert!(err.to_string().contains("home-manager"), "{err}");
}

// ---------------------------------------------------------------------------
// update
// ---------------------------------------------------------------------------

#[test]
fn update_without_inputs_appends_nothing() {
    let env = common::TestEnv::new(&[]);

    update::run(&UpdateOpts::default(), &env.context()).unwrap();

    assert_eq!(env.journal.runs(), vec!["nix flake update"]);
}

#[test]
fn update_with_inputs_appends_all_names() {
    let env = common::TestEnv::new(&[]);
    let opts = UpdateOpts {
        rebuild: false,
        inputs: vec!["nixpkgs".to_string(), "nixpkgs-unstable".to_string()],
    };

    update::run(&opts, &env.context()).unwrap();

    assert_eq!(
        env.journal.runs(),
        vec!["nix flake update nixpkgs nixpkgs-unstable"]
    );
}

#[test]
fn update_failure_skips_rebuild() {
    let env = common::TestEnv::new(&[1]);
    let opts = UpdateOpts {
        rebuild: true,
        inputs: Vec::new(),
    };

    assert!(update::run(&opts, &env.context()).is_err());

    assert_eq!(env.journal.runs(), vec!["nix flake update"]);
}

#[test]
fn update_rebuild_uses_configured_hostname() {
    let env = common::TestEnv::new(&[]);
    let settings = Settings {
        hostname: Some("desk".to_string()),
        ..Settings::default()
    };
    let opts = UpdateOpts {
        rebuild: true,
        inputs: Vec::new(),
    };

    update::run(&opts, &env.context_with(settings, false)).unwrap();

    assert_eq!(
        env.journal.runs(),
        vec![
            "nix flake update",
            "sudo nixos-rebuild boot --flake .#desk"
        ]
    );
}

// ---------------------------------------------------------------------------
// garbage
// ---------------------------------------------------------------------------

#[test]
fn garbage_default_runs_three_steps_in_order() {
    let env = common::TestEnv::new(&[]);

    garbage::run(&GarbageOpts { burn: false }, &env.context()).unwrap();

    assert_eq!(
        env.journal.runs(),
        vec![
            "sudo nix-collect-garbage",
            "nix-collect-garbage",
            "sudo nix profile wipe-history --profile /nix/var/nix/profiles/system --older-than 7d",
        ]
    );
}

#[test]
fn garbage_burn_warns_first_then_switches_boot() {
    let env = common::TestEnv::new(&[]);

    garbage::run(&GarbageOpts { burn: true }, &env.context()).unwrap();

    let entries = env.journal.entries();
    assert_eq!(entries[0], format!("warn: {}", garbage::BURN_WARNING));
    let runs = env.journal.runs();
    assert_eq!(runs.len(), 3);
    assert_eq!(
        runs[2],
        "sudo /run/current-system/bin/switch-to-configuration boot"
    );
}

#[test]
fn garbage_stops_after_failed_collection() {
    let env = common::TestEnv::new(&[0, 3]);

    let err = garbage::run(&GarbageOpts { burn: false }, &env.context()).unwrap_err();

    assert!(err.to_string().contains("exit 3"), "{err}");
    assert_eq!(env.journal.runs().len(), 2);
}

#[test]
fn dry_run_never_reaches_executor() {
    let env = common::TestEnv::new(&[]);
    let ctx = env.context_with(Settings::default(), true);

    garbage::run(&GarbageOpts { burn: false }, &ctx).unwrap();
    update::run(&UpdateOpts::default(), &ctx).unwrap();

    assert!(env.journal.runs().is_empty());
    let dry: Vec<String> = env
        .journal
        .entries()
        .into_iter()
        .filter(|e| e.starts_with("dry_run: "))
        .collect();
    assert_eq!(dry.len(), 4);
}
