//! Equation typesetting through the external `katex` CLI.
//!
//! The binary is resolved once per conversion, then invoked per
//! equation block with the TeX source on stdin. A failed invocation is
//! not fatal; the equation rule falls back to the raw source.

use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::RenderError;

/// Failure of a single typesetting run. Recovered inside the equation
/// rule, so it never crosses the crate boundary.
#[derive(Debug)]
pub(crate) enum KatexError {
    Io(std::io::Error),
    Exit(std::process::ExitStatus),
    Output(std::string::FromUtf8Error),
}

impl fmt::Display for KatexError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            KatexError::Io(err) => write!(f, "failed to run katex: {err}"),
            KatexError::Exit(status) => write!(f, "katex exited with {status}"),
            KatexError::Output(err) => write!(f, "katex produced invalid utf-8: {err}"),
        }
    }
}

impl std::error::Error for KatexError {}

impl From<std::io::Error> for KatexError {
    fn from(err: std::io::Error) -> KatexError {
        KatexError::Io(err)
    }
}

/// Resolves the katex binary before any rendering starts. An explicitly
/// configured path wins when it exists; otherwise PATH is searched.
pub(crate) fn resolve_binary(configured: Option<&Path>) -> Result<PathBuf, RenderError> {
    if let Some(path) = configured {
        if path.exists() {
            return Ok(path.to_path_buf());
        }
    }
    match which::which("katex") {
        Ok(path) => Ok(path),
        Err(_) => Err(match configured {
            Some(path) => RenderError::Config(format!(
                "equation rendering is enabled but the configured katex path '{}' does not exist",
                path.display()
            )),
            None => RenderError::Config(
                "equation rendering is enabled but no katex binary was found; \
                 install it with `npm install -g katex` or configure katex_path"
                    .to_string(),
            ),
        }),
    }
}

/// Typesets one equation, returning the HTML katex prints on stdout.
pub(crate) fn typeset(binary: &Path, equation: &str) -> Result<String, KatexError> {
    let mut child = Command::new(binary)
        .arg("-d")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()?;
    let write_result = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(equation.as_bytes()),
        None => Ok(()),
    };
    if let Err(err) = write_result {
        let _ = child.kill();
        let _ = child.wait();
        return Err(KatexError::Io(err));
    }
    let output = child.wait_with_output()?;
    if !output.status.success() {
        return Err(KatexError::Exit(output.status));
    }
    String::from_utf8(output.stdout).map_err(KatexError::Output)
}
