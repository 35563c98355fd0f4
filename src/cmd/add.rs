/*!
`add.rs` - register a template with mcporter.

  mcp-onboarder add <KEY> --project-dir DIR --name NAME [--scope project|user] [--dry-run]

Flow: registry lookup -> placeholder expansion (command + every arg) ->
`mcporter config add ...` -> print mcporter's JSON, or surface its error
text and propagate its exit code.
*/

use anyhow::Result;
use clap::Args;

use crate::expand::{EnvMap, unresolved_placeholders};
use crate::mcporter::{self, ExpandedTemplate, Scope, add_invocation};
use crate::template::registry;

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Template key (see `templates`)
    #[arg(value_name = "TEMPLATE")]
    pub template: String,

    /// Project directory used to resolve template arguments
    #[arg(long, value_name = "DIR")]
    pub project_dir: String,

    /// Registration name in mcporter
    #[arg(long)]
    pub name: String,

    /// Registration scope
    #[arg(long, value_enum, default_value_t = Scope::Project)]
    pub scope: Scope,

    /// Print the mcporter command instead of running it
    #[arg(long)]
    pub dry_run: bool,
}

pub fn execute_add(args: AddArgs, program: &str, vars: &EnvMap) -> Result<i32> {
    let reg = registry(&args.project_dir)?;
    let Some(tpl) = reg.get(&args.template) else {
        eprintln!(
            "Unknown template: {} (available: {})",
            args.template,
            reg.key_list()
        );
        return Ok(1);
    };

    let expanded = ExpandedTemplate::expand(tpl, vars);
    let unresolved: Vec<String> = std::iter::once(&expanded.command)
        .chain(expanded.args.iter())
        .flat_map(|s| unresolved_placeholders(s))
        .collect();
    if !unresolved.is_empty() {
        crate::log_info!(
            "unset variables passed through literally: {}",
            unresolved.join(", ")
        );
    }

    let inv = add_invocation(program, &expanded, &args.name, args.scope);
    if args.dry_run {
        println!("{}", inv.display_line());
        return Ok(0);
    }

    let out = mcporter::run(&inv)?;
    if !out.success() {
        eprintln!("{}", out.failure_text());
        return Ok(out.exit_code);
    }
    println!("{}", out.stdout.trim());
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(subcommand)]
        cmd: TestSub,
    }

    #[derive(clap::Subcommand, Debug)]
    enum TestSub {
        Add(AddArgs),
    }

    #[test]
    fn scope_defaults_to_project() {
        let cli = TestCli::try_parse_from([
            "t", "add", "nocodb", "--project-dir", "/tmp/proj", "--name", "mydb",
        ])
        .unwrap();
        let TestSub::Add(a) = cli.cmd;
        assert_eq!(a.scope, Scope::Project);
        assert!(!a.dry_run);
    }

    #[test]
    fn invalid_scope_rejected_at_parse() {
        let err = TestCli::try_parse_from([
            "t", "add", "nocodb", "--project-dir", "/tmp/proj", "--name", "mydb", "--scope",
            "global",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn name_and_project_dir_required() {
        assert!(TestCli::try_parse_from(["t", "add", "nocodb", "--name", "x"]).is_err());
        assert!(TestCli::try_parse_from(["t", "add", "nocodb", "--project-dir", "."]).is_err());
    }

    #[test]
    fn unknown_template_returns_one_without_spawning() {
        let args = AddArgs {
            template: "nope".into(),
            project_dir: "/tmp/proj".into(),
            name: "x".into(),
            scope: Scope::User,
            dry_run: false,
        };
        // a program that cannot exist: reaching the spawn would be an Err
        let code = execute_add(args, "definitely-not-a-real-binary-onboarder", &EnvMap::new())
            .unwrap();
        assert_eq!(code, 1);
    }

    #[cfg(unix)]
    #[test]
    fn tool_exit_code_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let fake = dir.path().join("fake-mcporter");
        std::fs::write(&fake, "#!/bin/sh\necho 'already exists' >&2\nexit 4\n").unwrap();
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&fake, std::fs::Permissions::from_mode(0o755)).unwrap();

        let args = AddArgs {
            template: "filesystem".into(),
            project_dir: dir.path().to_string_lossy().into_owned(),
            name: "fs".into(),
            scope: Scope::Project,
            dry_run: false,
        };
        let code = execute_add(args, &fake.to_string_lossy(), &EnvMap::new()).unwrap();
        assert_eq!(code, 4);
    }
}
