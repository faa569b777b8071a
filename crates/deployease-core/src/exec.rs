//! Process execution
//!
//! Every external tool (vendor CLIs, npm, git) is run through an [`Executor`].
//! Executors never fail: spawn errors and non-zero exits are both reported as
//! an [`ExecOutput`] with `success == false` and a populated `error`.

#[cfg(any(test, feature = "testing"))]
use std::collections::VecDeque;
use std::fmt;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
#[cfg(any(test, feature = "testing"))]
use std::sync::Mutex;
use std::thread::JoinHandle;
use std::time::Instant;

use tracing::{debug, instrument};

/// A program plus its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    /// Program name or path
    pub program: String,
    /// Arguments passed verbatim (no shell involved)
    pub args: Vec<String>,
}

impl CommandLine {
    /// Create a command line with no arguments
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append a single argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) || arg.contains('"') {
                write!(f, " \"{}\"", arg.replace('"', "\\\""))?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// How a command's standard streams are wired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecMode {
    /// Capture stdout/stderr silently, stdin closed
    #[default]
    Capture,
    /// Echo stdout/stderr to the terminal while capturing them
    Stream,
    /// Hand the terminal to the child (login flows, vendor prompts); nothing captured
    Interactive,
}

/// Result of running a command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecOutput {
    /// Whether the process ran and exited with status 0
    pub success: bool,
    /// Exit code, if the process exited normally
    pub exit_code: Option<i32>,
    /// Captured standard output (trimmed)
    pub output: String,
    /// Captured standard error (trimmed)
    pub stderr: String,
    /// Failure description, empty on success
    pub error: String,
}

impl ExecOutput {
    /// A successful run with the given stdout
    pub fn ok(output: impl Into<String>) -> Self {
        Self {
            success: true,
            exit_code: Some(0),
            output: output.into(),
            stderr: String::new(),
            error: String::new(),
        }
    }

    /// A failed run with the given error text
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            exit_code: Some(1),
            output: String::new(),
            stderr: String::new(),
            error: error.into(),
        }
    }

    /// Attach captured stdout
    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = output.into();
        self
    }

    fn from_status(command: &CommandLine, status: ExitStatus, stdout: String, stderr: String) -> Self {
        let output = stdout.trim().to_string();
        let stderr = stderr.trim().to_string();
        let success = status.success();

        let error = if success {
            String::new()
        } else if stderr.is_empty() {
            format!("'{}' exited with {}", command, status)
        } else {
            format!("'{}' exited with {}: {}", command, status, stderr)
        };

        Self {
            success,
            exit_code: status.code(),
            output,
            stderr,
            error,
        }
    }

    /// Everything the process printed, stdout first
    pub fn combined(&self) -> String {
        match (self.output.is_empty(), self.stderr.is_empty()) {
            (_, true) => self.output.clone(),
            (true, false) => self.stderr.clone(),
            (false, false) => format!("{}\n{}", self.output, self.stderr),
        }
    }

    /// Best description of why the command failed
    pub fn failure_reason(&self) -> String {
        if !self.error.trim().is_empty() {
            self.error.clone()
        } else if !self.output.trim().is_empty() {
            self.output.clone()
        } else {
            "unknown error".to_string()
        }
    }
}

/// Runs external commands
pub trait Executor: Send + Sync {
    /// Run `command` in `dir`. Never fails; see [`ExecOutput`].
    fn exec(&self, dir: &Path, command: &CommandLine, mode: ExecMode) -> ExecOutput;

    /// Whether `program` can be found on the PATH
    fn is_installed(&self, program: &str) -> bool;
}

/// Where a child's standard output is shown while it runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EchoTarget {
    #[default]
    Stdout,
    /// Keeps our own stdout free for machine-readable output
    Stderr,
}

impl EchoTarget {
    fn stdio(self) -> Stdio {
        match self {
            Self::Stdout => Stdio::inherit(),
            Self::Stderr => Stdio::from(std::io::stderr()),
        }
    }
}

/// Executor backed by real child processes
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemExecutor {
    echo: EchoTarget,
}

impl SystemExecutor {
    /// Create a new system executor
    pub fn new() -> Self {
        Self::default()
    }

    /// Show child stdout on `echo` instead of our stdout
    pub fn echo_to(mut self, echo: EchoTarget) -> Self {
        self.echo = echo;
        self
    }

    /// Where child stdout is shown
    pub fn echo(&self) -> EchoTarget {
        self.echo
    }

    fn command(dir: &Path, command: &CommandLine) -> Command {
        // Resolve through PATH so npm.cmd and friends work on Windows
        let program =
            which::which(&command.program).unwrap_or_else(|_| PathBuf::from(&command.program));
        let mut cmd = Command::new(program);
        cmd.args(&command.args).current_dir(dir);
        cmd
    }

    fn run(&self, dir: &Path, command: &CommandLine, mode: ExecMode) -> std::io::Result<ExecOutput> {
        let mut cmd = Self::command(dir, command);

        match mode {
            ExecMode::Capture => {
                let output = cmd
                    .stdin(Stdio::null())
                    .stdout(Stdio::piped())
                    .stderr(Stdio::piped())
                    .output()?;
                Ok(ExecOutput::from_status(
                    command,
                    output.status,
                    String::from_utf8_lossy(&output.stdout).to_string(),
                    String::from_utf8_lossy(&output.stderr).to_string(),
                ))
            }
            ExecMode::Stream => {
                let mut child = cmd
                    .stdin(Stdio::inherit())
                    .stdout(Stdio::piped())
                    .stderr(Stdio::piped())
                    .spawn()?;

                let stdout = child.stdout.take().map(|s| tee(s, self.echo));
                let stderr = child.stderr.take().map(|s| tee(s, EchoTarget::Stderr));
                let status = child.wait()?;

                Ok(ExecOutput::from_status(
                    command,
                    status,
                    stdout.map(join_captured).unwrap_or_default(),
                    stderr.map(join_captured).unwrap_or_default(),
                ))
            }
            ExecMode::Interactive => {
                let status = cmd
                    .stdin(Stdio::inherit())
                    .stdout(self.echo.stdio())
                    .stderr(Stdio::inherit())
                    .status()?;
                Ok(ExecOutput::from_status(
                    command,
                    status,
                    String::new(),
                    String::new(),
                ))
            }
        }
    }
}

impl Executor for SystemExecutor {
    #[instrument(skip(self, dir, command), fields(command = %command))]
    fn exec(&self, dir: &Path, command: &CommandLine, mode: ExecMode) -> ExecOutput {
        let start = Instant::now();

        let output = self
            .run(dir, command, mode)
            .unwrap_or_else(|e| ExecOutput::failed(format!("Failed to run '{}': {}", command, e)));

        debug!(
            success = output.success,
            exit_code = ?output.exit_code,
            duration_ms = start.elapsed().as_millis() as u64,
            "command finished"
        );
        output
    }

    fn is_installed(&self, program: &str) -> bool {
        !program.trim().is_empty() && which::which(program).is_ok()
    }
}

/// Copy a child's pipe to our terminal line by line, keeping a copy
fn tee<R: Read + Send + 'static>(reader: R, echo: EchoTarget) -> JoinHandle<String> {
    std::thread::spawn(move || {
        let mut captured = String::new();
        for line in BufReader::new(reader).lines().map_while(std::result::Result::ok) {
            match echo {
                EchoTarget::Stdout => println!("{}", line),
                EchoTarget::Stderr => eprintln!("{}", line),
            }
            captured.push_str(&line);
            captured.push('\n');
        }
        captured
    })
}

fn join_captured(handle: JoinHandle<String>) -> String {
    handle.join().unwrap_or_default()
}

#[cfg(any(test, feature = "testing"))]
/// Executor that replays canned results and records every call (useful for testing)
///
/// Responses are matched by the longest registered prefix of the rendered
/// command line. A prefix with several queued responses hands them out in
/// order and then keeps repeating the last one. Unmatched commands succeed
/// with empty output.
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    responses: Mutex<Vec<(String, VecDeque<ExecOutput>)>>,
    installed: Mutex<Vec<String>>,
    calls: Mutex<Vec<(String, ExecMode)>>,
}

#[cfg(any(test, feature = "testing"))]
impl RecordingExecutor {
    /// Create an executor where every command succeeds and nothing is installed
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for commands starting with `prefix`
    pub fn respond(self, prefix: impl Into<String>, output: ExecOutput) -> Self {
        let prefix = prefix.into();
        {
            let mut responses = self.responses.lock().unwrap();
            match responses.iter_mut().find(|(p, _)| *p == prefix) {
                Some((_, queue)) => queue.push_back(output),
                None => responses.push((prefix, VecDeque::from([output]))),
            }
        }
        self
    }

    /// Mark a program as present on the PATH
    pub fn with_installed(self, program: impl Into<String>) -> Self {
        self.installed.lock().unwrap().push(program.into());
        self
    }

    /// Rendered command lines, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(c, _)| c.clone())
            .collect()
    }

    /// Rendered command lines with the mode they ran in
    pub fn calls_with_mode(&self) -> Vec<(String, ExecMode)> {
        self.calls.lock().unwrap().clone()
    }

    /// Whether any call started with `prefix`
    pub fn was_called(&self, prefix: &str) -> bool {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .any(|(c, _)| c.starts_with(prefix))
    }
}

#[cfg(any(test, feature = "testing"))]
impl Executor for RecordingExecutor {
    fn exec(&self, _dir: &Path, command: &CommandLine, mode: ExecMode) -> ExecOutput {
        let rendered = command.to_string();
        self.calls.lock().unwrap().push((rendered.clone(), mode));

        let mut responses = self.responses.lock().unwrap();
        let matched = responses
            .iter_mut()
            .filter(|(prefix, _)| rendered.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len());

        match matched {
            Some((_, queue)) if queue.len() > 1 => queue.pop_front().unwrap_or_default(),
            Some((_, queue)) => queue.front().cloned().unwrap_or_default(),
            None => ExecOutput::ok(""),
        }
    }

    fn is_installed(&self, program: &str) -> bool {
        self.installed.lock().unwrap().iter().any(|p| p == program)
    }
}
