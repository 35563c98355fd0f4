//! `${NAME}` placeholder expansion against an injected variable map.
//!
//! Single left-to-right pass. Unknown names, empty names (`${}`) and an
//! unterminated `${` are kept as literal text. A `${` followed by another
//! `${` before its `}` is literal too, and scanning resumes right after it.
//! Replacement values are never re-scanned.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;

/// Variables visible to placeholder expansion.
pub type EnvMap = HashMap<String, String>;

/// Snapshot of the process environment, optionally overlaid with a dotenv file.
///
/// Process variables win over file entries, matching `dotenvy`'s
/// non-overriding load semantics.
pub fn load_env(env_file: Option<&Path>) -> Result<EnvMap> {
    let mut vars = EnvMap::new();
    if let Some(path) = env_file {
        let iter = dotenvy::from_path_iter(path)
            .with_context(|| format!("Failed to open env file: {}", path.display()))?;
        for item in iter {
            let (k, v) =
                item.with_context(|| format!("Failed to parse env file: {}", path.display()))?;
            vars.insert(k, v);
        }
    }
    // non-UTF-8 entries cannot appear in a `${NAME}` token or a String arg
    vars.extend(
        std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?))),
    );
    Ok(vars)
}

/// Replace every `${NAME}` whose NAME is present in `vars`.
pub fn expand_placeholders(input: &str, vars: &EnvMap) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];
        let Some(end) = after_open.find('}') else {
            // unterminated: keep the remainder verbatim
            out.push_str(&rest[start..]);
            return out;
        };
        let name = &after_open[..end];
        if name.contains("${") {
            out.push_str("${");
            rest = after_open;
            continue;
        }
        match vars.get(name) {
            Some(value) if !name.is_empty() => out.push_str(value),
            _ => out.push_str(&rest[start..start + 2 + end + 1]),
        }
        rest = &after_open[end + 1..];
    }

    out.push_str(rest);
    out
}

/// Names of `${NAME}` tokens still present in `input` (after expansion these are the unset ones).
pub fn unresolved_placeholders(input: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut rest = input;
    while let Some(start) = rest.find("${") {
        let after_open = &rest[start + 2..];
        let Some(end) = after_open.find('}') else {
            break;
        };
        let name = &after_open[..end];
        if name.contains("${") {
            rest = after_open;
            continue;
        }
        if !name.is_empty() {
            names.push(name.to_string());
        }
        rest = &after_open[end + 1..];
    }
    names
}
