//! Per-run deployment context and plan

use std::path::{Path, PathBuf};

use deployease_core::config::Config;
use deployease_core::{CommandLine, ExecMode, ExecOutput, Executor, Notice, Prompt, Reporter};

use crate::installer::{CliInvocation, CliTool};

/// Capabilities and settings shared by every stage of a run
///
/// Everything here is borrowed from the caller; a context never outlives
/// the run it was built for.
pub struct DeployContext<'a> {
    /// Project root; every command runs here and every relative path resolves here
    pub root: &'a Path,
    /// Loaded (or default) configuration
    pub config: &'a Config,
    /// Runs external commands
    pub executor: &'a dyn Executor,
    /// Asks the user questions
    pub prompt: &'a dyn Prompt,
    /// Receives progress notices
    pub reporter: &'a dyn Reporter,
}

impl<'a> DeployContext<'a> {
    /// Create a new context
    pub fn new(
        root: &'a Path,
        config: &'a Config,
        executor: &'a dyn Executor,
        prompt: &'a dyn Prompt,
        reporter: &'a dyn Reporter,
    ) -> Self {
        Self {
            root,
            config,
            executor,
            prompt,
            reporter,
        }
    }

    /// Resolve a project-relative path
    pub fn path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }

    /// Run a command in the project root
    pub fn run(&self, command: &CommandLine, mode: ExecMode) -> ExecOutput {
        self.executor.exec(self.root, command, mode)
    }

    pub fn info(&self, message: impl Into<String>) {
        self.reporter.report(&Notice::Info(message.into()));
    }

    pub fn step(&self, message: impl Into<String>) {
        self.reporter.report(&Notice::Step(message.into()));
    }

    pub fn success(&self, message: impl Into<String>) {
        self.reporter.report(&Notice::Success(message.into()));
    }

    pub fn warn(&self, message: impl Into<String>) {
        self.reporter.report(&Notice::Warning(message.into()));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.reporter.report(&Notice::Error(message.into()));
    }
}

/// Which Cloudflare product a run targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployMode {
    /// Cloudflare Workers, driven by `wrangler.toml`
    Worker,
    /// Cloudflare Pages, uploading a static directory
    Pages,
}

/// Choices made while a run is in progress
///
/// A fresh plan is created for every run and threaded through the stages:
/// `authenticate` and `configure` fill it in, `build` and `deploy` read it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeployPlan {
    /// How the vendor CLI is invoked, once ensured
    pub cli: Option<CliInvocation>,
    /// Directory holding the built site
    pub publish_dir: Option<String>,
    /// Cloudflare product
    pub deploy_mode: Option<DeployMode>,
    /// Workers entry script
    pub entry_point: Option<String>,
    /// Hosting project name
    pub project_name: Option<String>,
    /// Branch to push for git-driven platforms
    pub git_branch: Option<String>,
}

impl DeployPlan {
    /// Create an empty plan
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a command for `tool`, honouring the npx fallback chosen for this run
    pub fn command(&self, tool: &CliTool, args: &[&str]) -> CommandLine {
        self.cli.unwrap_or_default().command(tool, args)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use deployease_core::{CollectingReporter, RecordingExecutor, ScriptedPrompt};
    use tempfile::TempDir;

    /// A temporary project plus recording capabilities
    pub(crate) struct TestHarness {
        pub temp: TempDir,
        pub config: Config,
        pub executor: RecordingExecutor,
        pub prompt: ScriptedPrompt,
        pub reporter: CollectingReporter,
    }

    impl TestHarness {
        pub fn new() -> Self {
            Self {
                temp: TempDir::new().unwrap(),
                config: Config::default(),
                executor: RecordingExecutor::new(),
                prompt: ScriptedPrompt::default(),
                reporter: CollectingReporter::default(),
            }
        }

        pub fn executor(mut self, f: impl FnOnce(RecordingExecutor) -> RecordingExecutor) -> Self {
            self.executor = f(std::mem::take(&mut self.executor));
            self
        }

        pub fn config(mut self, f: impl FnOnce(&mut Config)) -> Self {
            f(&mut self.config);
            self
        }

        pub fn answers<I, S>(mut self, answers: I) -> Self
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            self.prompt = ScriptedPrompt::new(answers);
            self
        }

        pub fn root(&self) -> &Path {
            self.temp.path()
        }

        pub fn write(&self, relative: &str, content: &str) -> &Self {
            let path = self.root().join(relative);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).unwrap();
            }
            std::fs::write(path, content).unwrap();
            self
        }

        pub fn mkdir(&self, relative: &str) -> &Self {
            std::fs::create_dir_all(self.root().join(relative)).unwrap();
            self
        }

        pub fn read(&self, relative: &str) -> String {
            std::fs::read_to_string(self.root().join(relative)).unwrap()
        }

        pub fn context(&self) -> DeployContext<'_> {
            DeployContext::new(
                self.temp.path(),
                &self.config,
                &self.executor,
                &self.prompt,
                &self.reporter,
            )
        }
    }

    #[test]
    fn test_plan_command_defaults_to_global() {
        let tool = CliTool::new("vercel", "vercel");
        let mut plan = DeployPlan::new();
        assert_eq!(plan.command(&tool, &["whoami"]).to_string(), "vercel whoami");

        plan.cli = Some(CliInvocation::Npx);
        assert_eq!(plan.command(&tool, &["whoami"]).to_string(), "npx vercel whoami");
    }

    #[test]
    fn test_context_runs_in_root_and_reports() {
        let harness = TestHarness::new();
        let ctx = harness.context();

        assert_eq!(ctx.path("dist"), harness.root().join("dist"));
        ctx.run(&CommandLine::new("git").arg("status"), ExecMode::Capture);
        ctx.warn("careful");

        assert_eq!(harness.executor.calls(), vec!["git status"]);
        assert_eq!(harness.reporter.notices(), vec![Notice::Warning("careful".to_string())]);
    }
}
