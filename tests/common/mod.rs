// Shared helpers for integration tests.
//
// Provides a recording executor, a recording logger, and context builders so
// each integration test can drive handlers through the public API without
// spawning real Nix tools.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use no_cli::cli::GlobalOpts;
use no_cli::config::Settings;
use no_cli::context::{Context, Identity};
use no_cli::error::ExecError;
use no_cli::exec::{Executor, Invocation};
use no_cli::logging::Log;

/// Ordered record of everything that reached the log or the executor.
///
/// Sharing one journal between [`JournalExecutor`] and [`JournalLog`] lets
/// tests assert the relative order of warnings and process launches.
#[derive(Debug, Default)]
pub struct Journal {
    entries: Mutex<Vec<String>>,
}

impl Journal {
    pub fn push(&self, entry: String) {
        self.entries.lock().expect("journal lock").push(entry);
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().expect("journal lock").clone()
    }

    /// Entries recorded by the executor (`run: …`), prefix stripped.
    pub fn runs(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter_map(|e| e.strip_prefix("run: ").map(String::from))
            .collect()
    }
}

/// Executor that journals runs and answers with queued exit codes
/// (default 0).
#[derive(Debug)]
pub struct JournalExecutor {
    journal: Arc<Journal>,
    exit_codes: Mutex<VecDeque<i32>>,
    dirs: Mutex<Vec<PathBuf>>,
}

impl JournalExecutor {
    pub fn new(journal: Arc<Journal>, exit_codes: &[i32]) -> Self {
        Self {
            journal,
            exit_codes: Mutex::new(exit_codes.iter().copied().collect()),
            dirs: Mutex::new(Vec::new()),
        }
    }

    pub fn dirs(&self) -> Vec<PathBuf> {
        self.dirs.lock().expect("dirs lock").clone()
    }
}

impl Executor for JournalExecutor {
    fn run(&self, dir: &Path, invocation: &Invocation) -> Result<(), ExecError> {
        self.journal.push(format!("run: {invocation}"));
        self.dirs.lock().expect("dirs lock").push(dir.to_path_buf());
        let code = self
            .exit_codes
            .lock()
            .expect("exit code lock")
            .pop_front()
            .unwrap_or(0);
        if code == 0 {
            Ok(())
        } else {
            Err(ExecError::Failed {
                command: invocation.to_string(),
                code: Some(code),
            })
        }
    }

    fn which(&self, _program: &str) -> bool {
        true
    }

    fn interrupted(&self) -> bool {
        false
    }
}

/// Logger that journals `level: message` lines.
#[derive(Debug)]
pub struct JournalLog {
    journal: Arc<Journal>,
}

impl JournalLog {
    pub fn new(journal: Arc<Journal>) -> Self {
        Self { journal }
    }
}

impl Log for JournalLog {
    fn stage(&self, msg: &str) {
        self.journal.push(format!("stage: {msg}"));
    }
    fn info(&self, msg: &str) {
        self.journal.push(format!("info: {msg}"));
    }
    fn command(&self, msg: &str) {
        self.journal.push(format!("command: {msg}"));
    }
    fn debug(&self, _msg: &str) {}
    fn warn(&self, msg: &str) {
        self.journal.push(format!("warn: {msg}"));
    }
    fn error(&self, msg: &str) {
        self.journal.push(format!("error: {msg}"));
    }
    fn dry_run(&self, msg: &str) {
        self.journal.push(format!("dry_run: {msg}"));
    }
}

/// A handler test environment rooted in its own temporary flake directory.
pub struct TestEnv {
    pub dir: tempfile::TempDir,
    pub journal: Arc<Journal>,
    pub executor: Arc<JournalExecutor>,
}

impl TestEnv {
    /// Environment whose runs exit with `exit_codes` in order, then 0.
    pub fn new(exit_codes: &[i32]) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::write(dir.path().join("flake.nix"), "{ outputs = _: { }; }\n")
            .expect("write flake.nix");
        let journal = Arc::new(Journal::default());
        let executor = Arc::new(JournalExecutor::new(journal.clone(), exit_codes));
        Self {
            dir,
            journal,
            executor,
        }
    }

    /// Context for host `box` and user `alice`.
    pub fn context(&self) -> Context {
        self.context_with(Settings::default(), false)
    }

    pub fn context_with(&self, settings: Settings, dry_run: bool) -> Context {
        let global = GlobalOpts {
            directory: Some(self.dir.path().to_path_buf()),
            dry_run,
        };
        let identity = Identity {
            hostname: "box".to_string(),
            username: "alice".to_string(),
        };
        Context::new(
            &global,
            settings,
            identity,
            self.executor.clone(),
            Arc::new(JournalLog::new(self.journal.clone())),
        )
        .expect("build context")
    }
}
