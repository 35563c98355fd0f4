//! mcporter invocation building and execution.
//!
//! Template --expand--> ExpandedTemplate --add_invocation--> Invocation --run--> RunOutput
//!
//! `ExpandedTemplate` can only be produced by placeholder expansion, so an
//! `add` invocation never carries raw `${NAME}` text that was resolvable.

use anyhow::{Context, Result};
use std::fmt;
use tokio::process::Command;

use crate::expand::{EnvMap, expand_placeholders};
use crate::template::Template;

/// Default configuration-manager executable.
pub const DEFAULT_PROGRAM: &str = "mcporter";

/// Where a registration is persisted.
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Scope {
    /// Current project only
    #[default]
    Project,
    /// User-global configuration
    User,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Project => "project",
            Scope::User => "user",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A template whose command and arguments went through placeholder expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandedTemplate {
    pub key: String,
    pub command: String,
    pub args: Vec<String>,
}

impl ExpandedTemplate {
    pub fn expand(template: &Template, vars: &EnvMap) -> Self {
        Self {
            key: template.key.clone(),
            command: expand_placeholders(&template.command, vars),
            args: template
                .args
                .iter()
                .map(|a| expand_placeholders(a, vars))
                .collect(),
        }
    }
}

/// Program plus argument vector, ready to spawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    /// Shell-quoted single-line rendering (for dry runs).
    pub fn display_line(&self) -> String {
        let mut words = Vec::with_capacity(self.args.len() + 1);
        words.push(self.program.as_str());
        words.extend(self.args.iter().map(String::as_str));
        shell_words::join(words)
    }
}

/// `<program> config add <name> --command <cmd> [--arg <a>]... --scope <scope> --output json`
pub fn add_invocation(
    program: &str,
    template: &ExpandedTemplate,
    name: &str,
    scope: Scope,
) -> Invocation {
    let mut args: Vec<String> = vec![
        "config".into(),
        "add".into(),
        name.to_string(),
        "--command".into(),
        template.command.clone(),
    ];
    for a in &template.args {
        args.push("--arg".into());
        args.push(a.clone());
    }
    args.extend([
        "--scope".into(),
        scope.as_str().to_string(),
        "--output".into(),
        "json".into(),
    ]);
    Invocation {
        program: program.to_string(),
        args,
    }
}

/// `<program> list <name> --schema --output json`
pub fn list_invocation(program: &str, name: &str) -> Invocation {
    Invocation {
        program: program.to_string(),
        args: vec![
            "list".into(),
            name.to_string(),
            "--schema".into(),
            "--output".into(),
            "json".into(),
        ],
    }
}

/// Captured result of a finished child process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl RunOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Trimmed stderr, or trimmed stdout when stderr is empty.
    pub fn failure_text(&self) -> &str {
        let err = self.stderr.trim();
        if err.is_empty() {
            self.stdout.trim()
        } else {
            err
        }
    }
}

/// Spawn the invocation and wait for it. A non-zero exit is returned as data;
/// only a failure to spawn is an error. No timeout, no retries.
pub fn run(inv: &Invocation) -> Result<RunOutput> {
    crate::log_debug!(
        "spawning {} ({} args)",
        inv.program,
        inv.args.len()
    );
    crate::utils::block_on(run_async(inv))?
}

pub async fn run_async(inv: &Invocation) -> Result<RunOutput> {
    let output = Command::new(&inv.program)
        .args(&inv.args)
        .stdin(std::process::Stdio::null())
        .output()
        .await
        .with_context(|| format!("Failed to run '{}'", inv.program))?;

    // Killed by a signal: no code, report generic failure.
    let exit_code = output.status.code().unwrap_or(1);
    crate::log_trace!("'{}' exited with {}", inv.program, exit_code);

    Ok(RunOutput {
        exit_code,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}
