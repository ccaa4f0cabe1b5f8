//! Launching the user's text editor on a local file.

use std::io;
use std::path::Path;
use std::process::Command;

use tabedit_result::{Error, Result};

pub const DEFAULT_EDITOR: &str = "vi";

/// Applies the user's modifications to a local file.
pub trait Editor {
    fn edit(&self, path: &Path) -> Result<()>;
}

impl<F> Editor for F
where
    F: Fn(&Path) -> Result<()>,
{
    fn edit(&self, path: &Path) -> Result<()> {
        self(path)
    }
}

/// Runs an external command with the file path appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandEditor {
    program: String,
    args: Vec<String>,
}

impl CommandEditor {
    /// Split a command line such as `code --wait` on whitespace. Returns
    /// `None` for a blank command.
    pub fn parse(command: &str) -> Option<Self> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }

    /// The explicit command if given, else `$EDITOR`, else `vi`.
    pub fn resolve(explicit: Option<&str>) -> Self {
        let from_env = std::env::var("EDITOR").ok();
        explicit
            .and_then(Self::parse)
            .or_else(|| from_env.as_deref().and_then(Self::parse))
            .unwrap_or_else(|| Self {
                program: DEFAULT_EDITOR.to_string(),
                args: Vec::new(),
            })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl Editor for CommandEditor {
    fn edit(&self, path: &Path) -> Result<()> {
        tracing::debug!("[EDITOR] running {} on {}", self.program, path.display());
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .status()?;
        if status.success() {
            Ok(())
        } else {
            Err(Error::Io(io::Error::other(format!(
                "editor '{}' exited with {status}",
                self.program
            ))))
        }
    }
}
