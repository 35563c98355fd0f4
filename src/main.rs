use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cmd;
mod expand;
mod mcporter;
mod nocodb;
mod template;
mod utils;

use cmd::{AddArgs, CreateTokenArgs, EnvTemplateArgs, LinkArgs, TemplatesArgs, VerifyArgs};

/// MCP Onboarder - set up MCP server entries through mcporter.
///
///   mcp-onboarder doctor
///   mcp-onboarder templates [--project-dir DIR] [--json]
///   mcp-onboarder env-template <KEY> --output PATH [--project-dir DIR]
///   mcp-onboarder add <KEY> --project-dir DIR --name NAME [--scope project|user] [--dry-run]
///   mcp-onboarder verify <NAME> [--json]
///   mcp-onboarder nocodb-link --url URL --workspace-id W --project-id P
///   mcp-onboarder nocodb-create-token --url URL --project-id P --xc-token T [--name N]
///
/// Global flags / env:
///   -v / -vv         Log to stderr (info, debug)
///   -q / --quiet     Errors only
///   --mcporter       mcporter executable (or MCPORTER_BIN)
///   --env-file       dotenv file merged under the process env for `${VAR}` expansion
#[derive(Parser, Debug)]
#[command(
    name = "mcp-onboarder",
    version,
    about = "MCP Onboarder - templates, .env scaffolding and mcporter registration",
    propagate_version = true,
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Silence all non-error logging
    #[arg(short, long, global = true)]
    quiet: bool,

    /// mcporter executable
    #[arg(
        long,
        global = true,
        env = "MCPORTER_BIN",
        default_value = mcporter::DEFAULT_PROGRAM,
        value_name = "PROGRAM"
    )]
    mcporter: String,

    /// dotenv file used for `${VAR}` expansion (process env takes precedence)
    #[arg(long, global = true, value_name = "PATH")]
    env_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check that required tools are on PATH
    Doctor,

    /// List built-in templates
    Templates(TemplatesArgs),

    /// Write a template's example .env file
    EnvTemplate(EnvTemplateArgs),

    /// Register a template with mcporter
    Add(AddArgs),

    /// Verify a registration by listing its tools
    Verify(VerifyArgs),

    /// Print a NocoDB UI deep link
    NocodbLink(LinkArgs),

    /// Create a NocoDB API token
    NocodbCreateToken(CreateTokenArgs),
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Doctor => cmd::execute_doctor(&cli.mcporter),
        Commands::Templates(args) => cmd::execute_templates(args),
        Commands::EnvTemplate(args) => cmd::execute_env_template(args),
        Commands::Add(args) => {
            let vars = expand::load_env(cli.env_file.as_deref())?;
            cmd::execute_add(args, &cli.mcporter, &vars)
        }
        Commands::Verify(args) => cmd::execute_verify(args, &cli.mcporter),
        Commands::NocodbLink(args) => cmd::execute_link(args),
        Commands::NocodbCreateToken(args) => cmd::execute_create_token(args),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = utils::derive_level(cli.verbose, cli.quiet);
    utils::init_logging(level);

    let code = run(cli)?;
    std::process::exit(code);
}
