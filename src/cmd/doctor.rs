/*!
`doctor.rs` - prerequisite check.

Looks up each required executable on PATH and prints one line per tool:

  [doctor] checking tools...
  - python3: OK (/usr/bin/python3)
  - mcporter: MISSING
  - uv/uvx: OK (/home/me/.local/bin/uv)

Exit status 0 only when every entry is present. A missing tool never
aborts the report.
*/

use anyhow::Result;
use std::path::PathBuf;

use crate::cmd::format::{Role, StyleOptions, color, emoji};

/// Package runner accepted under either name.
const PACKAGE_RUNNERS: [&str; 2] = ["uv", "uvx"];

/// One row of the doctor report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCheck {
    pub label: String,
    pub found: Option<PathBuf>,
}

impl ToolCheck {
    pub fn ok(&self) -> bool {
        self.found.is_some()
    }
}

fn lookup(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}

/// Run the checks; `program` is the configured mcporter executable.
pub fn check_tools(program: &str) -> Vec<ToolCheck> {
    let mut checks: Vec<ToolCheck> = ["python3", program]
        .iter()
        .map(|name| ToolCheck {
            label: name.to_string(),
            found: lookup(name),
        })
        .collect();

    checks.push(ToolCheck {
        label: PACKAGE_RUNNERS.join("/"),
        found: PACKAGE_RUNNERS.iter().find_map(|n| lookup(n)),
    });
    checks
}

pub fn execute_doctor(program: &str) -> Result<i32> {
    let style = StyleOptions::detect();
    println!("[doctor] checking tools...");

    let checks = check_tools(program);
    for c in &checks {
        crate::log_debug!("lookup {} -> {:?}", c.label, c.found);
        let status = match &c.found {
            Some(p) => color(
                Role::Success,
                format!("{}OK ({})", emoji("success", &style), p.display()),
                &style,
            ),
            None => color(
                Role::Error,
                format!("{}MISSING", emoji("error", &style)),
                &style,
            ),
        };
        println!("- {}: {status}", c.label);
    }

    Ok(if checks.iter().all(ToolCheck::ok) { 0 } else { 1 })
}
