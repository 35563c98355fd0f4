/*!
`verify.rs` - confirm a registration by asking mcporter to list its tools.

  mcp-onboarder verify <NAME> [--json]

Success output is `OK: tools=<n>` when mcporter returns a JSON object, or
plain `OK` when its output is not parseable. `n` counts array items or
object entries under `tools`; anything else counts as 0.
*/

use anyhow::Result;
use clap::Args;

use crate::mcporter::{self, list_invocation};

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Registration name in mcporter
    pub name: String,

    /// Print mcporter's JSON unchanged on success
    #[arg(long)]
    pub json: bool,
}

/// Summary line for a successful `list` response.
pub fn summarize(stdout: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(stdout) {
        Ok(serde_json::Value::Object(obj)) => {
            let count = match obj.get("tools") {
                Some(serde_json::Value::Array(a)) => a.len(),
                Some(serde_json::Value::Object(m)) => m.len(),
                _ => 0,
            };
            format!("OK: tools={count}")
        }
        _ => "OK".to_string(),
    }
}

pub fn execute_verify(args: VerifyArgs, program: &str) -> Result<i32> {
    let out = mcporter::run(&list_invocation(program, &args.name))?;
    if !out.success() {
        eprintln!("{}", out.failure_text());
        return Ok(out.exit_code);
    }

    if args.json {
        println!("{}", out.stdout.trim());
    } else {
        println!("{}", summarize(&out.stdout));
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_tools() {
        assert_eq!(
            summarize(r#"{"tools":[{"name":"a"},{"name":"b"}]}"#),
            "OK: tools=2"
        );
    }

    #[test]
    fn counts_tools_keyed_by_name() {
        assert_eq!(
            summarize(r#"{"tools":{"a":{},"b":{},"c":{}}}"#),
            "OK: tools=3"
        );
    }

    #[test]
    fn missing_tools_key_is_zero() {
        assert_eq!(summarize(r#"{"server":"x"}"#), "OK: tools=0");
    }

    #[test]
    fn malformed_json_is_generic_ok() {
        assert_eq!(summarize("not json at all"), "OK");
        assert_eq!(summarize(""), "OK");
        assert_eq!(summarize("[1,2]"), "OK");
    }
}
