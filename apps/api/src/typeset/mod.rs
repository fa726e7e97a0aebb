//! Typesetting: LaTeX source to PDF bytes.
//!
//! `AppState` holds an `Arc<dyn DocumentCompiler>`. The default
//! [`PdfLatexCompiler`] shells out to a TeX engine in a scratch directory that
//! is removed when the compile finishes, whatever the outcome.

pub mod handlers;

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use serde::Serialize;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::render::REQUIRED_PACKAGES;

/// Lines of compiler log returned with a failed compile.
const LOG_TAIL_LINES: usize = 40;

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("LaTeX compiler '{command}' not found")]
    CompilerNotFound { command: String },

    #[error("LaTeX compiler exited with {status}")]
    Failed { status: String, log_tail: String },

    #[error("LaTeX compiler produced no PDF")]
    NoOutput { log_tail: String },

    #[error("LaTeX compilation timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Serialize)]
pub struct InstallGuide {
    pub macos: &'static str,
    pub ubuntu: &'static str,
    pub windows: &'static str,
}

pub const INSTALL_GUIDE: InstallGuide = InstallGuide {
    macos: "Install BasicTeX (https://www.tug.org/mactex/morepackages.html) or MacTeX (https://www.tug.org/mactex/)",
    ubuntu: "sudo apt-get install texlive-latex-base texlive-fonts-recommended texlive-latex-extra",
    windows: "Install MiKTeX: https://miktex.org/download",
};

/// What the local TeX installation can do for the preamble.
#[derive(Debug, Clone, Serialize)]
pub struct ToolchainReport {
    /// `"ready"` when the compiler runs, `"missing"` otherwise.
    pub status: &'static str,
    pub compiler: String,
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub packages: Vec<String>,
    pub missing_packages: Vec<String>,
    pub errors: Vec<String>,
    pub installation_guide: InstallGuide,
}

/// Compiles a complete LaTeX document.
#[async_trait]
pub trait DocumentCompiler: Send + Sync {
    async fn compile(&self, latex: &str) -> Result<Bytes, CompileError>;

    async fn check(&self) -> ToolchainReport;
}

/// Runs `pdflatex` (or a compatible engine) as a child process.
pub struct PdfLatexCompiler {
    command: String,
    passes: u32,
    timeout: Duration,
}

impl PdfLatexCompiler {
    pub fn new(command: impl Into<String>, passes: u32, timeout: Duration) -> Self {
        Self {
            command: command.into(),
            passes: passes.max(1),
            timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.latex_cmd.clone(),
            config.latex_passes,
            Duration::from_secs(config.latex_timeout_secs),
        )
    }

    async fn run_pass(&self, dir: &Path, job: &str) -> Result<std::process::Output, CompileError> {
        let mut cmd = Command::new(&self.command);
        cmd.arg("-interaction=nonstopmode")
            .arg("-halt-on-error")
            .arg(format!("-jobname={job}"))
            .arg(format!("{job}.tex"))
            .current_dir(dir)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        match tokio::time::timeout(self.timeout, cmd.output()).await {
            Err(_) => Err(CompileError::Timeout {
                secs: self.timeout.as_secs(),
            }),
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(CompileError::CompilerNotFound {
                    command: self.command.clone(),
                })
            }
            Ok(Err(e)) => Err(CompileError::Io(e)),
            Ok(Ok(output)) => Ok(output),
        }
    }
}

/// Last [`LOG_TAIL_LINES`] lines of a compiler log.
pub fn log_tail(log: &str) -> String {
    let lines: Vec<&str> = log.lines().collect();
    let start = lines.len().saturating_sub(LOG_TAIL_LINES);
    lines[start..].join("\n")
}

/// The compiler's log file, or its stdout when no log was written.
async fn read_log(dir: &Path, job: &str, stdout: &[u8]) -> String {
    match tokio::fs::read(dir.join(format!("{job}.log"))).await {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(_) => String::from_utf8_lossy(stdout).into_owned(),
    }
}

/// Resolves a bare command name against `PATH`.
fn find_on_path(command: &str) -> Option<PathBuf> {
    let candidate = Path::new(command);
    if candidate.components().count() > 1 {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }
    let paths = std::env::var_os("PATH")?;
    std::env::split_paths(&paths)
        .map(|dir| dir.join(command))
        .find(|p| p.is_file())
}

#[async_trait]
impl DocumentCompiler for PdfLatexCompiler {
    async fn compile(&self, latex: &str) -> Result<Bytes, CompileError> {
        let dir = tempfile::tempdir()?;
        let job = format!("cv-{}", Uuid::new_v4().simple());
        tokio::fs::write(dir.path().join(format!("{job}.tex")), latex).await?;

        let mut last_stdout = Vec::new();
        for pass in 1..=self.passes {
            let output = self.run_pass(dir.path(), &job).await?;
            if !output.status.success() {
                let log = read_log(dir.path(), &job, &output.stdout).await;
                warn!(pass, status = %output.status, "LaTeX pass failed");
                return Err(CompileError::Failed {
                    status: output.status.to_string(),
                    log_tail: log_tail(&log),
                });
            }
            debug!(pass, "LaTeX pass finished");
            last_stdout = output.stdout;
        }

        match tokio::fs::read(dir.path().join(format!("{job}.pdf"))).await {
            Ok(pdf) if !pdf.is_empty() => {
                info!(bytes = pdf.len(), passes = self.passes, "Compiled PDF");
                Ok(Bytes::from(pdf))
            }
            _ => {
                let log = read_log(dir.path(), &job, &last_stdout).await;
                Err(CompileError::NoOutput {
                    log_tail: log_tail(&log),
                })
            }
        }
    }

    async fn check(&self) -> ToolchainReport {
        let mut report = ToolchainReport {
            status: "missing",
            compiler: self.command.clone(),
            found: false,
            path: find_on_path(&self.command).map(|p| p.display().to_string()),
            version: None,
            packages: Vec::new(),
            missing_packages: Vec::new(),
            errors: Vec::new(),
            installation_guide: INSTALL_GUIDE,
        };

        match Command::new(&self.command)
            .arg("--version")
            .stdin(Stdio::null())
            .output()
            .await
        {
            Ok(output) if output.status.success() => {
                report.found = true;
                report.status = "ready";
                report.version = String::from_utf8_lossy(&output.stdout)
                    .lines()
                    .next()
                    .map(str::to_string);
            }
            Ok(output) => report.errors.push(format!(
                "'{} --version' exited with {}",
                self.command, output.status
            )),
            Err(e) => report
                .errors
                .push(format!("{} not found: {e}", self.command)),
        }

        if !report.found {
            return report;
        }

        for pkg in REQUIRED_PACKAGES {
            let found = Command::new("kpsewhich")
                .arg(format!("{pkg}.sty"))
                .stdin(Stdio::null())
                .output()
                .await
                .is_ok_and(|o| o.status.success() && !o.stdout.is_empty());
            if found {
                report.packages.push(pkg.to_string());
            } else {
                report.missing_packages.push(pkg.to_string());
            }
        }

        info!(
            status = report.status,
            packages = report.packages.len(),
            missing = report.missing_packages.len(),
            "LaTeX toolchain checked"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MISSING_BINARY: &str = "cvtex-test-no-such-latex-engine";

    #[test]
    fn test_log_tail_keeps_last_lines() {
        let log: String = (1..=100).map(|i| format!("line {i}\n")).collect();
        let tail = log_tail(&log);
        assert_eq!(tail.lines().count(), LOG_TAIL_LINES);
        assert!(tail.starts_with("line 61"));
        assert!(tail.ends_with("line 100"));
        assert_eq!(log_tail("short\nlog"), "short\nlog");
    }

    #[test]
    fn test_passes_are_at_least_one() {
        let compiler = PdfLatexCompiler::new("pdflatex", 0, Duration::from_secs(1));
        assert_eq!(compiler.passes, 1);
    }

    #[tokio::test]
    async fn test_missing_compiler_is_reported() {
        let compiler = PdfLatexCompiler::new(MISSING_BINARY, 1, Duration::from_secs(5));
        let err = compiler.compile("\\documentclass{article}").await.unwrap_err();
        assert!(matches!(err, CompileError::CompilerNotFound { .. }));
    }

    #[tokio::test]
    async fn test_check_without_compiler() {
        let compiler = PdfLatexCompiler::new(MISSING_BINARY, 1, Duration::from_secs(5));
        let report = compiler.check().await;
        assert_eq!(report.status, "missing");
        assert!(!report.found);
        assert!(report.path.is_none());
        assert_eq!(report.errors.len(), 1);
        assert!(report.packages.is_empty());
    }
}
