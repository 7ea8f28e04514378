//! `sprintload config` -- inspect the effective configuration.

use anyhow::{Context, Result};

use crate::cli::{ConfigArgs, ConfigCommands};
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `sprintload config` command.
pub fn run(ctx: &RuntimeContext, args: &ConfigArgs) -> Result<()> {
    match &args.command {
        ConfigCommands::Show => {
            let (_dir, config) = ctx.config()?;
            if ctx.json {
                output_json(&config);
            } else {
                let yaml = serde_yaml::to_string(&config).context("failed to render config")?;
                print!("{}", yaml);
            }
        }

        ConfigCommands::Path => {
            let dir = ctx.require_dir()?;
            if ctx.json {
                output_json(&serde_json::json!({ "dir": dir.display().to_string() }));
            } else {
                println!("{}", dir.display());
            }
        }
    }
    Ok(())
}
