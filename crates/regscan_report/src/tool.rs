//! Invocation of the external tree-printing tool.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use regscan_config::ToolConfig;

use crate::error::ToolError;

/// How often a running tool is checked for exit.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// The captured result of one tool run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// Exit code, or `None` if the process was ended by a signal.
    pub exit_code: Option<i32>,
    /// Everything the tool wrote to standard output.
    pub stdout: String,
    /// Everything the tool wrote to standard error.
    pub stderr: String,
}

impl ToolOutput {
    /// Returns `true` if the tool exited with status 0.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// A source of parse tree dumps.
///
/// Implementations are shared across the worker threads of a batch.
pub trait SyntaxTool: Send + Sync {
    /// Produces the tree dump of the file at `path`.
    fn print_tree(&self, path: &Path) -> Result<ToolOutput, ToolError>;

    /// Describes the settings that shape the dump, for cache fingerprints.
    fn signature(&self) -> String {
        String::new()
    }
}

/// Runs an external program as `<program> <args>... <file>`.
#[derive(Debug, Clone)]
pub struct CommandTool {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandTool {
    /// Creates a tool that runs `program` with `args` before the file path.
    pub fn new(program: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args,
            timeout,
        }
    }

    /// Creates a tool from the `[tool]` configuration section.
    pub fn from_config(config: &ToolConfig) -> Self {
        Self::new(
            config.program.clone(),
            config.args.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }
}

impl SyntaxTool for CommandTool {
    fn print_tree(&self, path: &Path) -> Result<ToolOutput, ToolError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| ToolError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        // Drain both pipes while the tool runs.
        let stdout = child.stdout.take().map(|pipe| thread::spawn(move || read_all(pipe)));
        let stderr = child.stderr.take().map(|pipe| thread::spawn(move || read_all(pipe)));

        let deadline = Instant::now().checked_add(self.timeout);
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) if deadline.is_some_and(|d| Instant::now() >= d) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(ToolError::Timeout {
                        program: self.program.clone(),
                        timeout: self.timeout,
                    });
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(source) => {
                    let _ = child.kill();
                    return Err(ToolError::Wait {
                        program: self.program.clone(),
                        source,
                    });
                }
            }
        };

        let join = |handle: Option<thread::JoinHandle<String>>| {
            handle
                .map(|h| h.join().unwrap_or_default())
                .unwrap_or_default()
        };
        Ok(ToolOutput {
            exit_code: status.code(),
            stdout: join(stdout),
            stderr: join(stderr),
        })
    }

    fn signature(&self) -> String {
        let mut parts = vec![self.program.as_str()];
        parts.extend(self.args.iter().map(String::as_str));
        parts.join(" ")
    }
}

fn read_all(mut pipe: impl Read) -> String {
    let mut buf = Vec::new();
    let _ = pipe.read_to_end(&mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Serves a previously saved dump instead of running a tool.
///
/// Every requested file gets the same dump, so this is meant for analyzing a
/// single source file.
#[derive(Debug, Clone)]
pub struct SavedDump {
    path: PathBuf,
}

impl SavedDump {
    /// Serves the dump stored at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SyntaxTool for SavedDump {
    fn print_tree(&self, _path: &Path) -> Result<ToolOutput, ToolError> {
        let stdout =
            std::fs::read_to_string(&self.path).map_err(|source| ToolError::DumpUnreadable {
                path: self.path.display().to_string(),
                source,
            })?;
        Ok(ToolOutput {
            exit_code: Some(0),
            stdout,
            stderr: String::new(),
        })
    }

    fn signature(&self) -> String {
        format!("saved dump {}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_lists_program_and_args() {
        let tool = CommandTool::from_config(&ToolConfig::default());
        assert_eq!(tool.signature(), "verible-verilog-syntax --printtree");
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let tool = CommandTool::new("regscan-no-such-tool", Vec::new(), Duration::from_secs(5));
        let err = tool.print_tree(Path::new("top.sv")).unwrap_err();
        assert!(matches!(err, ToolError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn captures_stdout_and_exit_code() {
        let tool = CommandTool::new("echo", vec!["Node".to_string()], Duration::from_secs(5));
        let output = tool.print_tree(Path::new("top.sv")).unwrap();
        assert!(output.success());
        assert_eq!(output.stdout, "Node top.sv\n");
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_is_reported() {
        let tool = CommandTool::new("false", Vec::new(), Duration::from_secs(5));
        let output = tool.print_tree(Path::new("top.sv")).unwrap();
        assert!(!output.success());
        assert_eq!(output.exit_code, Some(1));
    }

    #[cfg(unix)]
    #[test]
    fn slow_tool_is_killed() {
        let tool = CommandTool::new("sleep", vec!["5".to_string()], Duration::from_millis(200));
        let started = Instant::now();
        let err = tool.print_tree(Path::new("0")).unwrap_err();
        assert!(matches!(
            err,
            ToolError::Timeout { timeout, .. } if timeout == Duration::from_millis(200)
        ));
        assert!(err.to_string().ends_with("within 200ms"));
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[test]
    fn saved_dump_is_served() {
        let dir = tempfile::tempdir().unwrap();
        let dump = dir.path().join("top.tree");
        std::fs::write(&dump, "Node @0 (tag: kDescriptionList) {\n}\n").unwrap();

        let tool = SavedDump::new(&dump);
        let output = tool.print_tree(Path::new("top.sv")).unwrap();
        assert!(output.success());
        assert!(output.stdout.starts_with("Node @0"));

        let missing = SavedDump::new(dir.path().join("absent.tree"));
        assert!(matches!(
            missing.print_tree(Path::new("top.sv")),
            Err(ToolError::DumpUnreadable { .. })
        ));
    }
}
