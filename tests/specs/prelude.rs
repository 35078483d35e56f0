//! Test helpers for behavioral specifications.
//!
//! Provides a high-level DSL for testing `orc`/`orcd` CLI behavior.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::Duration;

/// Returns the path to a binary, checking the llvm-cov target directory
/// first (works under `cargo llvm-cov`), then the standard debug dir, then
/// falls back to resolving relative to the test binary itself.
fn binary_path(name: &str) -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));

    let llvm_cov_path = manifest_dir.join("target/llvm-cov-target/debug").join(name);
    if llvm_cov_path.exists() {
        return llvm_cov_path;
    }

    let standard = manifest_dir.join("target/debug").join(name);
    if standard.exists() {
        return standard;
    }

    if let Ok(exe) = std::env::current_exe() {
        if let Some(debug_dir) = exe.parent().and_then(|d| d.parent()) {
            let fallback = debug_dir.join(name);
            if fallback.exists() {
                return fallback;
            }
        }
    }

    standard
}

fn orc_binary() -> PathBuf {
    binary_path("orc")
}

pub fn orcd_binary() -> PathBuf {
    binary_path("orcd")
}

/// Panics if `tmux` isn't installed. Call at the top of any spec that
/// needs a real multiplexer (agent spawn/restart/kill, team broadcast).
pub fn require_tmux() {
    if !has_binary("tmux") {
        panic!("tmux not found in PATH — install it to run this spec");
    }
}

fn has_binary(name: &str) -> bool {
    Command::new(name)
        .arg("-V")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .is_ok()
}

pub fn cli() -> CliBuilder {
    CliBuilder::new()
}

/// High-level CLI builder for fluent test assertions.
pub struct CliBuilder {
    args: Vec<String>,
    dir: Option<PathBuf>,
    envs: Vec<(String, String)>,
}

impl CliBuilder {
    fn new() -> Self {
        Self { args: Vec::new(), dir: None, envs: Vec::new() }
    }

    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    pub fn pwd(mut self, path: impl Into<PathBuf>) -> Self {
        self.dir = Some(path.into());
        self
    }

    pub fn env(mut self, key: &str, value: impl AsRef<Path>) -> Self {
        self.envs.push((key.to_string(), value.as_ref().to_string_lossy().to_string()));
        self
    }

    pub fn command(self) -> Command {
        let mut cmd = Command::new(orc_binary());
        cmd.args(&self.args);

        if let Some(dir) = self.dir {
            cmd.current_dir(dir);
        }

        for (key, value) in self.envs {
            cmd.env(key, value);
        }

        cmd
    }

    pub fn run(self) -> RunAssert {
        let mut cmd = self.command();
        let output = cmd.output().expect("orc should spawn");
        RunAssert { output }
    }

    /// Run and expect success (exit code 0).
    pub fn passes(self) -> RunAssert {
        let assert = self.run();
        assert!(
            assert.output.status.success(),
            "expected command to pass, got exit code {:?}\nstdout: {}\nstderr: {}",
            assert.output.status.code(),
            assert.stdout(),
            assert.stderr()
        );
        assert
    }

    /// Run and expect failure (non-zero exit code).
    pub fn fails(self) -> RunAssert {
        let assert = self.run();
        assert!(
            !assert.output.status.success(),
            "expected command to fail, but it passed\nstdout: {}\nstderr: {}",
            assert.stdout(),
            assert.stderr()
        );
        assert
    }

    /// Run and expect a specific exit code.
    pub fn exits_with(self, code: i32) -> RunAssert {
        let assert = self.run();
        assert_eq!(
            assert.output.status.code(),
            Some(code),
            "stdout: {}\nstderr: {}",
            assert.stdout(),
            assert.stderr()
        );
        assert
    }
}

/// Result of a CLI run for chaining assertions.
pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn stdout_has(self, expected: &str) -> Self {
        let stdout = self.stdout();
        assert!(stdout.contains(expected), "stdout does not contain '{expected}'\nstdout: {stdout}");
        self
    }

    pub fn stderr_has(self, expected: &str) -> Self {
        let stderr = self.stderr();
        assert!(stderr.contains(expected), "stderr does not contain '{expected}'\nstderr: {stderr}");
        self
    }

    pub fn stdout_json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout())
            .unwrap_or_else(|e| panic!("stdout is not valid JSON: {e}\nstdout: {}", self.stdout()))
    }
}

/// Poll a condition until it returns true or the timeout is reached.
pub fn wait_for<F>(timeout_ms: u64, mut condition: F) -> bool
where
    F: FnMut() -> bool,
{
    let start = std::time::Instant::now();
    let timeout = Duration::from_millis(timeout_ms);
    let poll_interval = Duration::from_millis(20);

    while start.elapsed() < timeout {
        if condition() {
            return true;
        }
        std::thread::sleep(poll_interval);
    }
    false
}

/// An isolated install root (`$TMUX_ORC_HOME`) for one test, with a
/// `Drop` impl that stops any daemon it started.
pub struct Project {
    dir: tempfile::TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self { dir: tempfile::tempdir().expect("tempdir should create") }
    }

    pub fn home(&self) -> &Path {
        self.dir.path()
    }

    /// Run `orc` in this project's isolated install root.
    pub fn orc(&self) -> CliBuilder {
        cli().env("TMUX_ORC_HOME", self.home())
    }

    pub fn pid_file(&self) -> PathBuf {
        self.dir.path().join("daemon.pid")
    }

    pub fn pause_file(&self) -> PathBuf {
        self.dir.path().join("daemon.pause")
    }

    pub fn is_running(&self) -> bool {
        self.pid_file().exists()
    }
}

impl Drop for Project {
    fn drop(&mut self) {
        let mut cmd = self.orc().args(&["monitor", "stop"]).command();
        cmd.stdout(std::process::Stdio::null()).stderr(std::process::Stdio::null());
        let _ = cmd.status();
    }
}
