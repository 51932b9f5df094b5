//! Text generation collaborators.

use crate::error::{ProofwatchError, Result};
use std::collections::HashMap;
use std::io::{Read, Write};
use std::process::{Child, Command, Stdio};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use super::template::render_template;

/// Something that turns a prompt into generated text.
pub trait TextGenerator {
    fn generate(&self, prompt: &str, model: &str) -> Result<String>;
}

/// Runs an external command as the text generator.
///
/// The command template may reference `{model}`. The prompt is written to the
/// command's stdin and its stdout is the generated text.
#[derive(Debug, Clone)]
pub struct CommandGenerator {
    command: String,
    timeout: Duration,
}

impl CommandGenerator {
    pub fn new(command: impl Into<String>, timeout: Duration) -> Self {
        Self {
            command: command.into(),
            timeout,
        }
    }

    fn build_args(&self, model: &str) -> Result<Vec<String>> {
        let variables = HashMap::from([("model", model)]);
        let rendered = render_template(&self.command, &variables).map_err(|e| {
            ProofwatchError::UserError(format!(
                "invalid generator command '{}': {}",
                self.command, e
            ))
        })?;

        let args = shell_words::split(&rendered).map_err(|e| {
            ProofwatchError::UserError(format!(
                "failed to parse generator command '{}': {}\n\
                 Fix: check for unmatched quotes or invalid escape sequences.",
                rendered, e
            ))
        })?;

        if args.is_empty() {
            return Err(ProofwatchError::UserError(format!(
                "generator command is empty after parsing: '{}'",
                rendered
            )));
        }

        Ok(args)
    }
}

impl TextGenerator for CommandGenerator {
    fn generate(&self, prompt: &str, model: &str) -> Result<String> {
        let args = self.build_args(model)?;
        let program = &args[0];

        let mut child = Command::new(program)
            .args(&args[1..])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                ProofwatchError::GeneratorError(format!(
                    "failed to execute generator command '{}': {}\n\
                     Fix: ensure the command is installed and in PATH.",
                    program, e
                ))
            })?;

        let writer = child.stdin.take().map(|mut stdin| {
            let prompt = prompt.to_string();
            std::thread::spawn(move || {
                // The command may exit without reading all of stdin.
                let _ = stdin.write_all(prompt.as_bytes());
            })
        });
        let stdout = spawn_reader(child.stdout.take());
        let stderr = spawn_reader(child.stderr.take());

        let start = Instant::now();
        let exit_code = wait_with_timeout(&mut child, self.timeout)?;
        if let Some(writer) = writer {
            let _ = writer.join();
        }
        let stdout = join_reader(stdout);
        let stderr = join_reader(stderr);

        tracing::debug!(
            program = %program,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "generator command finished"
        );

        match exit_code {
            None => Err(ProofwatchError::GeneratorError(format!(
                "generator command '{}' timed out after {}s",
                program,
                self.timeout.as_secs()
            ))),
            Some(0) => Ok(stdout),
            Some(code) => Err(ProofwatchError::GeneratorError(format!(
                "generator command '{}' failed (exit code {}): {}",
                program,
                code,
                stderr.trim()
            ))),
        }
    }
}

fn spawn_reader<R: Read + Send + 'static>(source: Option<R>) -> Option<JoinHandle<String>> {
    source.map(|mut source| {
        std::thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = source.read_to_end(&mut buf);
            String::from_utf8_lossy(&buf).to_string()
        })
    })
}

fn join_reader(handle: Option<JoinHandle<String>>) -> String {
    handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default()
}

/// Wait for a child process with timeout.
///
/// Returns the exit code, or `None` if the process was killed. A process
/// terminated by a signal reports `-1`.
fn wait_with_timeout(child: &mut Child, timeout: Duration) -> Result<Option<i32>> {
    let start = Instant::now();
    let poll_interval = Duration::from_millis(50);

    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(Some(status.code().unwrap_or(-1))),
            Ok(None) => {
                if start.elapsed() >= timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Ok(None);
                }
                std::thread::sleep(poll_interval);
            }
            Err(e) => {
                return Err(ProofwatchError::GeneratorError(format!(
                    "failed to check generator process status: {}",
                    e
                )));
            }
        }
    }
}
