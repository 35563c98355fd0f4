/*!
`templates.rs` - catalog listing and `.env` scaffolding.

  mcp-onboarder templates [--project-dir DIR] [--json]
  mcp-onboarder env-template <KEY> [--project-dir DIR] --output PATH

`env-template` creates missing parent directories and overwrites any
existing file.
*/

use anyhow::{Context, Result};
use clap::Args;

use crate::cmd::format::{StyleOptions, table};
use crate::template::registry;
use crate::utils::resolve_path;

#[derive(Args, Debug)]
pub struct TemplatesArgs {
    /// Project directory used to resolve template arguments
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub project_dir: String,

    /// Output JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct EnvTemplateArgs {
    /// Template key (see `templates`)
    #[arg(value_name = "TEMPLATE")]
    pub template: String,

    /// Project directory used to resolve template arguments
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub project_dir: String,

    /// Destination file (parent directories are created)
    #[arg(long, value_name = "PATH")]
    pub output: String,
}

pub fn execute_templates(args: TemplatesArgs) -> Result<i32> {
    let reg = registry(&args.project_dir)?;

    if args.json {
        let items: Vec<_> = reg.iter().collect();
        println!(
            "{}",
            serde_json::json!({
                "status": "ok",
                "count": reg.len(),
                "templates": items,
            })
        );
        return Ok(0);
    }

    println!("Available templates:");
    let style = StyleOptions::detect();
    let rows: Vec<Vec<String>> = reg
        .iter()
        .map(|t| vec![t.key.clone(), t.command.clone(), t.args.join(" ")])
        .collect();
    println!("{}", table(&["KEY", "COMMAND", "ARGS"], &rows, &style));
    Ok(0)
}

pub fn execute_env_template(args: EnvTemplateArgs) -> Result<i32> {
    let reg = registry(&args.project_dir)?;
    let Some(tpl) = reg.get(&args.template) else {
        eprintln!(
            "Unknown template: {} (available: {})",
            args.template,
            reg.key_list()
        );
        return Ok(1);
    };

    let out = resolve_path(&args.output)?;
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    std::fs::write(&out, &tpl.env_template)
        .with_context(|| format!("Failed to write {}", out.display()))?;

    println!("Written: {}", out.display());
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_template_writes_exact_text_and_parents() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested/deeper/custom.env");
        let code = execute_env_template(EnvTemplateArgs {
            template: "custom-stdio".into(),
            project_dir: dir.path().to_string_lossy().into_owned(),
            output: out.to_string_lossy().into_owned(),
        })
        .unwrap();
        assert_eq!(code, 0);

        let reg = registry(&dir.path().to_string_lossy()).unwrap();
        let expected = &reg.get("custom-stdio").unwrap().env_template;
        assert_eq!(&std::fs::read_to_string(&out).unwrap(), expected);
    }

    #[test]
    fn env_template_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("x.env");
        std::fs::write(&out, "OLD=1\n").unwrap();
        execute_env_template(EnvTemplateArgs {
            template: "nocodb".into(),
            project_dir: ".".into(),
            output: out.to_string_lossy().into_owned(),
        })
        .unwrap();
        let text = std::fs::read_to_string(&out).unwrap();
        assert!(!text.contains("OLD=1"));
        assert!(text.starts_with("# NocoDB MCP credentials"));
    }

    #[test]
    fn env_template_unknown_key() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("x.env");
        let code = execute_env_template(EnvTemplateArgs {
            template: "nope".into(),
            project_dir: ".".into(),
            output: out.to_string_lossy().into_owned(),
        })
        .unwrap();
        assert_eq!(code, 1);
        assert!(!out.exists());
    }

    #[test]
    fn env_template_unwritable_destination_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();
        // parent is a regular file, so directory creation fails
        let out = blocker.join("sub/x.env");
        let res = execute_env_template(EnvTemplateArgs {
            template: "nocodb".into(),
            project_dir: ".".into(),
            output: out.to_string_lossy().into_owned(),
        });
        assert!(res.is_err());
    }
}
