use crate::GitCliOpsError;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

/// External tools the gateway knows how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Git,
    Patch,
}

impl Tool {
    pub fn name(self) -> &'static str {
        match self {
            Self::Git => "git",
            Self::Patch => "patch",
        }
    }

    fn env_override(self) -> &'static str {
        match self {
            Self::Git => "VERSIONS_GIT_PATH",
            Self::Patch => "VERSIONS_PATCH_PATH",
        }
    }

    fn candidates(self) -> &'static [&'static str] {
        match self {
            Self::Git => &["/opt/homebrew/bin/git", "/usr/local/bin/git", "/usr/bin/git"],
            Self::Patch => &[
                "/opt/homebrew/bin/gpatch",
                "/usr/local/bin/patch",
                "/usr/bin/patch",
            ],
        }
    }

    fn not_installed(self) -> GitCliOpsError {
        match self {
            Self::Git => GitCliOpsError::GitNotInstalled,
            Self::Patch => GitCliOpsError::PatchToolNotInstalled,
        }
    }
}

/// Raw output of a successful subprocess. Stdout is kept byte-exact (lossy
/// UTF-8) because patch text is whitespace sensitive.
#[derive(Debug, Clone)]
pub struct CommandRunOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Locates one external tool and runs it non-interactively.
#[derive(Debug, Clone)]
pub struct CommandRunner {
    tool: Tool,
    executable: String,
    env: Vec<(String, String)>,
}

impl CommandRunner {
    pub fn new(tool: Tool, configured: Option<&str>) -> Self {
        Self {
            tool,
            executable: resolve_executable(tool, configured),
            env: Vec::new(),
        }
    }

    /// Adds an environment variable passed to every invocation.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }

    pub async fn run(
        &self,
        args: &[String],
        working_dir: &Path,
        timeout_secs: u64,
    ) -> Result<CommandRunOutput, GitCliOpsError> {
        let command_repr = format!("{} {}", self.executable, args.join(" "));
        tracing::debug!(
            command = %command_repr,
            working_dir = %working_dir.display(),
            "running backend command"
        );

        let mut cmd = Command::new(&self.executable);
        cmd.args(args);
        cmd.current_dir(working_dir);
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        cmd.kill_on_drop(true);
        apply_non_interactive_env(&mut cmd);
        for (key, value) in &self.env {
            cmd.env(key, value);
        }

        let output = match timeout(Duration::from_secs(timeout_secs), cmd.output()).await {
            Err(_) => {
                return Err(GitCliOpsError::Timeout {
                    tool: self.tool.name(),
                    command: command_repr,
                    timeout_secs,
                });
            }
            Ok(Err(err)) => {
                return if err.kind() == std::io::ErrorKind::NotFound {
                    Err(self.tool.not_installed())
                } else {
                    Err(GitCliOpsError::CommandFailed {
                        tool: self.tool.name(),
                        message: format!("failed to execute {}: {err}", self.tool.name()),
                        exit_code: None,
                        stderr: String::new(),
                        stdout: String::new(),
                    })
                };
            }
            Ok(Ok(output)) => output,
        };

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        let exit_code = output.status.code();

        if output.status.success() {
            return Ok(CommandRunOutput { stdout, stderr });
        }

        tracing::debug!(
            command = %command_repr,
            exit_code = ?exit_code,
            stderr = %stderr.trim(),
            "backend command failed"
        );
        Err(classify_failed_command(
            self.tool,
            exit_code,
            stdout.trim(),
            stderr.trim(),
        ))
    }
}

fn apply_non_interactive_env(cmd: &mut Command) {
    // Classification below matches on English messages.
    cmd.env("LC_ALL", "C");
    cmd.env("GIT_TERMINAL_PROMPT", "0");
    cmd.env("GIT_PAGER", "cat");
    cmd.env("PAGER", "cat");
    cmd.env("NO_COLOR", "1");
}

fn resolve_executable(tool: Tool, configured: Option<&str>) -> String {
    if let Ok(path) = std::env::var(tool.env_override()) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    if let Some(path) = configured.map(str::trim).filter(|p| !p.is_empty()) {
        return path.to_string();
    }

    for candidate in tool.candidates() {
        if Path::new(candidate).exists() {
            return candidate.to_string();
        }
    }

    tool.name().to_string()
}

fn classify_failed_command(
    tool: Tool,
    exit_code: Option<i32>,
    stdout: &str,
    stderr: &str,
) -> GitCliOpsError {
    let combined = format!("{stderr}\n{stdout}").to_ascii_lowercase();

    if tool == Tool::Git {
        if combined.contains("not a git repository") {
            return GitCliOpsError::NotARepository {
                message: non_empty(stderr, stdout, "not a git repository"),
            };
        }

        if combined.contains("unknown revision")
            || combined.contains("bad revision")
            || combined.contains("bad object")
            || combined.contains("invalid object name")
            || combined.contains("not a valid object name")
            || combined.contains("ambiguous argument")
        {
            return GitCliOpsError::RevisionNotFound {
                message: non_empty(stderr, stdout, "revision not found"),
            };
        }

        if combined.contains("did not match any files")
            || combined.contains("bad source")
            || combined.contains("not under version control")
        {
            return GitCliOpsError::PathNotFound {
                message: non_empty(stderr, stdout, "path not found"),
            };
        }

        if combined.contains("nothing to commit") || combined.contains("no changes added to commit")
        {
            return GitCliOpsError::NothingToCommit {
                message: non_empty(stdout, stderr, "nothing to commit"),
            };
        }
    }

    GitCliOpsError::CommandFailed {
        tool: tool.name(),
        message: non_empty(
            stderr,
            stdout,
            &format!("{} exited with code {:?}", tool.name(), exit_code),
        ),
        exit_code,
        stderr: stderr.to_string(),
        stdout: stdout.to_string(),
    }
}

fn non_empty(primary: &str, secondary: &str, fallback: &str) -> String {
    if !primary.trim().is_empty() {
        primary.to_string()
    } else if !secondary.trim().is_empty() {
        secondary.to_string()
    } else {
        fallback.to_string()
    }
}
