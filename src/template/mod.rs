//! Built-in MCP server templates.
//!
//! registry(project_dir) -> Registry { filesystem | nocodb | custom-stdio | telegram-mcp | hyperliquid-info }
//!
//! The catalog is rebuilt on every call; the only input is the project
//! directory, which some templates pass to the server as an absolute path.

use anyhow::Result;
use serde::Serialize;
use std::path::Path;

use crate::utils::resolve_path;

/// A named description of how to launch one kind of MCP server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Template {
    pub key: String,
    pub command: String,
    pub args: Vec<String>,
    /// Example `.env` contents; placeholder names only, no values for secrets.
    #[serde(skip)]
    pub env_template: String,
}

impl Template {
    fn new(key: &str, command: &str, args: Vec<String>, env_template: &str) -> Self {
        Self {
            key: key.to_string(),
            command: command.to_string(),
            args,
            env_template: env_template.to_string(),
        }
    }
}

/// Ordered snapshot of the catalog for one project directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    templates: Vec<Template>,
}

impl Registry {
    pub fn get(&self, key: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.key == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.templates.iter().map(|t| t.key.as_str())
    }

    /// Comma-separated keys, for error messages.
    pub fn key_list(&self) -> String {
        self.keys().collect::<Vec<_>>().join(", ")
    }

    pub fn iter(&self) -> impl Iterator<Item = &Template> {
        self.templates.iter()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }
}

const FILESYSTEM_ENV: &str = "\
# Filesystem MCP server
# The project directory is passed as the only allowed root.
# No credentials required.
";

const NOCODB_ENV: &str = "\
# NocoDB MCP credentials
NOCODB_URL=https://app.nocodb.com
NOCODB_PROJECT_ID=
NOCODB_API_TOKEN=
# Optional workspace id for direct UI links
NOCODB_WORKSPACE_ID=
";

const CUSTOM_STDIO_ENV: &str = "\
# Custom stdio MCP server
# Launcher executable (e.g. uv, node, python3)
MCP_STDIO_COMMAND=
# Entry point run inside the project directory
MCP_STDIO_ENTRYPOINT=main.py
";

const TELEGRAM_ENV: &str = "\
# Telegram API credentials
TELEGRAM_API_ID=
TELEGRAM_API_HASH=
TELEGRAM_PHONE=
TELEGRAM_SESSION_NAME=./telegram_session
";

const HYPERLIQUID_ENV: &str = "\
# Usually no auth required for read-only info server
# HYPERLIQUID_NETWORK=mainnet
";

/// Build the template catalog for `project_dir` (`~` and relative segments resolved).
pub fn registry(project_dir: &str) -> Result<Registry> {
    let dir = resolve_path(project_dir)?;
    Ok(registry_for(&dir))
}

fn registry_for(dir: &Path) -> Registry {
    let dir = dir.to_string_lossy().into_owned();
    let uv_run = |entry: &str| -> Vec<String> {
        vec![
            "--directory".into(),
            dir.clone(),
            "run".into(),
            entry.to_string(),
        ]
    };

    let templates = vec![
        Template::new(
            "filesystem",
            "npx",
            vec![
                "-y".into(),
                "@modelcontextprotocol/server-filesystem".into(),
                dir.clone(),
            ],
            FILESYSTEM_ENV,
        ),
        Template::new(
            "nocodb",
            "npx",
            vec![
                "-y".into(),
                "nocodb-mcp-server".into(),
                "${NOCODB_URL}".into(),
                "${NOCODB_PROJECT_ID}".into(),
                "${NOCODB_API_TOKEN}".into(),
            ],
            NOCODB_ENV,
        ),
        Template::new(
            "custom-stdio",
            "${MCP_STDIO_COMMAND}",
            uv_run("${MCP_STDIO_ENTRYPOINT}"),
            CUSTOM_STDIO_ENV,
        ),
        Template::new("telegram-mcp", "uv", uv_run("main.py"), TELEGRAM_ENV),
        Template::new("hyperliquid-info", "uv", uv_run("main.py"), HYPERLIQUID_ENV),
    ];

    Registry { templates }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_keys_present() {
        let reg = registry("/tmp/proj").unwrap();
        let keys: Vec<&str> = reg.keys().collect();
        assert_eq!(
            keys,
            vec![
                "filesystem",
                "nocodb",
                "custom-stdio",
                "telegram-mcp",
                "hyperliquid-info"
            ]
        );
        assert_eq!(reg.len(), 5);
    }

    #[test]
    fn keys_are_unique() {
        let reg = registry_for(Path::new("/p"));
        let mut keys: Vec<&str> = reg.keys().collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), reg.len());
    }

    #[test]
    fn rebuild_is_idempotent() {
        let a = registry("/tmp/proj/../proj").unwrap();
        let b = registry("/tmp/proj/../proj").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn project_dir_is_resolved_into_args() {
        let reg = registry_for(Path::new("/work/demo"));
        let fs = reg.get("filesystem").unwrap();
        assert_eq!(fs.args.last().map(String::as_str), Some("/work/demo"));

        let tg = reg.get("telegram-mcp").unwrap();
        assert_eq!(tg.command, "uv");
        assert_eq!(tg.args, vec!["--directory", "/work/demo", "run", "main.py"]);
    }

    #[test]
    fn relative_project_dir_becomes_absolute() {
        let reg = registry("rel/../proj-x").unwrap();
        let fs = reg.get("filesystem").unwrap();
        let arg = fs.args.last().unwrap();
        assert!(Path::new(arg).is_absolute());
        assert!(!arg.contains(".."));
    }

    #[test]
    fn unknown_key_is_none() {
        let reg = registry_for(Path::new("/p"));
        assert!(reg.get("does-not-exist").is_none());
    }

    #[test]
    fn nocodb_uses_env_placeholders() {
        let reg = registry_for(Path::new("/p"));
        let t = reg.get("nocodb").unwrap();
        assert!(t.args.contains(&"${NOCODB_URL}".to_string()));
        assert!(t.args.contains(&"${NOCODB_PROJECT_ID}".to_string()));
        assert!(t.args.contains(&"${NOCODB_API_TOKEN}".to_string()));
        assert!(t.env_template.contains("NOCODB_API_TOKEN=\n"));
    }
}
