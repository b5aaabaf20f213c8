//! Private osascript client for desktop player communication
//!
//! This crate provides a minimal client for talking to scriptable desktop
//! media players (Spotify, Music, VLC) through the `osascript` interpreter.
//! It runs one script per call with a bounded timeout and parses record
//! replies into typed key/value data.

mod error;
pub mod record;

pub use error::ScriptError;
pub use record::{Record, Value};

use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use tracing::debug;

/// Default wall-clock bound on a single script call.
///
/// A hung or busy player application must not be able to starve the poll
/// loop, so every call is killed once this expires and reported as a
/// timeout (which callers treat as "player unavailable").
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Abstraction over "run this script, give me the reply text"
///
/// [`ScriptClient`] is the real implementation; tests substitute fakes with
/// canned replies so the command layer can be exercised without spawning
/// processes.
pub trait ScriptRunner: Send {
    fn run(&self, script: &str) -> Result<String, ScriptError>;
}

/// A minimal client that executes AppleScript via `osascript -e`
#[derive(Debug, Clone)]
pub struct ScriptClient {
    timeout: Duration,
}

impl ScriptClient {
    /// Create a client with the default timeout
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Create a client with a custom timeout
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Run a script and parse its reply as an AppleScript record
    pub fn run_record(&self, script: &str) -> Result<Record, ScriptError> {
        let reply = self.run(script)?;
        record::parse(&reply)
    }

    fn wait_bounded(&self, mut child: Child) -> Result<String, ScriptError> {
        let started = Instant::now();
        loop {
            match child.try_wait() {
                Ok(Some(status)) => {
                    let mut stdout = String::new();
                    if let Some(out) = child.stdout.as_mut() {
                        let _ = out.read_to_string(&mut stdout);
                    }
                    let mut stderr = String::new();
                    if let Some(err) = child.stderr.as_mut() {
                        let _ = err.read_to_string(&mut stderr);
                    }
                    if !stderr.trim().is_empty() {
                        debug!(stderr = %stderr.trim(), "osascript wrote to stderr");
                    }
                    if !status.success() {
                        return Err(ScriptError::Script(if stderr.trim().is_empty() {
                            format!("osascript exited with {}", status)
                        } else {
                            stderr.trim().to_string()
                        }));
                    }
                    return Ok(stdout.trim().to_string());
                }
                Ok(None) => {
                    if started.elapsed() >= self.timeout {
                        let _ = child.kill();
                        let _ = child.wait();
                        return Err(ScriptError::Timeout(self.timeout));
                    }
                    std::thread::sleep(Duration::from_millis(20));
                }
                Err(e) => {
                    let _ = child.kill();
                    return Err(ScriptError::Launch(e.to_string()));
                }
            }
        }
    }
}

impl ScriptRunner for ScriptClient {
    /// Run a script and return its trimmed stdout
    fn run(&self, script: &str) -> Result<String, ScriptError> {
        let child = Command::new("osascript")
            .arg("-e")
            .arg(script)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ScriptError::Launch(e.to_string()))?;

        self.wait_bounded(child)
    }
}

impl Default for ScriptClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timeout() {
        let client = ScriptClient::new();
        assert_eq!(client.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_custom_timeout() {
        let client = ScriptClient::with_timeout(Duration::from_secs(2));
        assert_eq!(client.timeout, Duration::from_secs(2));
    }

    struct CannedRunner(&'static str);

    impl ScriptRunner for CannedRunner {
        fn run(&self, _script: &str) -> Result<String, ScriptError> {
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn test_runner_trait_object() {
        let runner: Box<dyn ScriptRunner> = Box::new(CannedRunner("{volume:30}"));
        let reply = runner.run("tell application \"VLC\" to play").unwrap();
        let record = record::parse(&reply).unwrap();
        assert_eq!(record.i64_or("volume", 0), 30);
    }
}
