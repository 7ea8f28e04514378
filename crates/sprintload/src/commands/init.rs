//! `sprintload init` -- create a `.sprintload/` directory with a default config.

use std::env;
use std::fs;

use anyhow::{Context, Result, bail};
use sprintload_config::{CONFIG_FILE, SprintloadConfig, ensure_dir, save_config};
use sprintload_store::RosterStore;
use sprintload_ui::styles::{render_accent, render_pass_icon};

use crate::cli::InitArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `sprintload init` command.
pub fn run(ctx: &RuntimeContext, args: &InitArgs) -> Result<()> {
    let dir = match &ctx.dir {
        Some(dir) => {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create directory: {}", dir.display()))?;
            dir.clone()
        }
        None => {
            let cwd = env::current_dir().context("failed to get current directory")?;
            ensure_dir(&cwd)
                .with_context(|| format!("failed to create directory under {}", cwd.display()))?
        }
    };

    let config_path = dir.join(CONFIG_FILE);
    if config_path.exists() && !args.force {
        bail!(
            "{} already exists\nHint: use --force to overwrite it",
            config_path.display()
        );
    }

    let mut config = SprintloadConfig {
        default_project: args.project.clone(),
        ..SprintloadConfig::default()
    };
    if let Some(url) = &args.tracker_url {
        config.tracker.base_url = url.trim().to_string();
    }
    if let Some(email) = &args.email {
        config.tracker.email = email.trim().to_string();
    }
    save_config(&dir, &config)
        .with_context(|| format!("failed to write {}", config_path.display()))?;

    let roster = RosterStore::open_in(&dir)?;
    if !roster.path().exists() {
        roster
            .save()
            .with_context(|| format!("failed to create {}", roster.path().display()))?;
    }

    if ctx.json {
        output_json(&serde_json::json!({
            "dir": dir.display().to_string(),
            "config": config,
        }));
    } else if !ctx.quiet {
        println!(
            "{} Initialized sprintload in {}",
            render_pass_icon(),
            render_accent(&dir.display().to_string())
        );
        println!("  Next: sprintload team add <PROJECT> <MEMBER>...");
    }
    Ok(())
}
