/*!
`nocodb.rs` - NocoDB subcommands.

  mcp-onboarder nocodb-link --url URL --workspace-id W --project-id P
  mcp-onboarder nocodb-create-token --url URL --project-id P --xc-token T [--name N]

Flags fall back to NOCODB_URL / NOCODB_WORKSPACE_ID / NOCODB_PROJECT_ID /
NOCODB_API_TOKEN.
*/

use anyhow::Result;
use clap::Args;

use crate::nocodb::{self, DEFAULT_TOKEN_NAME, PERMISSION_HINT};

#[derive(Args, Debug)]
pub struct LinkArgs {
    /// NocoDB base URL
    #[arg(long, env = "NOCODB_URL")]
    pub url: String,

    /// Workspace id
    #[arg(long, env = "NOCODB_WORKSPACE_ID")]
    pub workspace_id: String,

    /// Project (base) id
    #[arg(long, env = "NOCODB_PROJECT_ID")]
    pub project_id: String,
}

#[derive(Args, Debug)]
pub struct CreateTokenArgs {
    /// NocoDB base URL
    #[arg(long, env = "NOCODB_URL")]
    pub url: String,

    /// Project (base) id
    #[arg(long, env = "NOCODB_PROJECT_ID")]
    pub project_id: String,

    /// Existing token with meta/project admin rights
    #[arg(long, env = "NOCODB_API_TOKEN", hide_env_values = true)]
    pub xc_token: String,

    /// Description for the new token
    #[arg(long, default_value = DEFAULT_TOKEN_NAME)]
    pub name: String,
}

pub fn execute_link(args: LinkArgs) -> Result<i32> {
    println!(
        "{}",
        nocodb::deep_link(&args.url, &args.workspace_id, &args.project_id)
    );
    Ok(0)
}

pub fn execute_create_token(args: CreateTokenArgs) -> Result<i32> {
    let res = crate::utils::block_on(nocodb::create_token(
        &args.url,
        &args.project_id,
        &args.xc_token,
        &args.name,
    ))?;

    match res {
        Ok(body) => {
            println!("{body}");
            Ok(0)
        }
        Err(e) => {
            eprintln!("Token creation failed: {e}");
            eprintln!("{PERMISSION_HINT}");
            Ok(1)
        }
    }
}
