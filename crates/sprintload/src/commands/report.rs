//! `sprintload report` -- build the time-allocation CSV for a sprint.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use sprintload_engine::{ReportEngine, build_report};
use sprintload_ui::styles::{render_accent, render_pass_icon, render_warn_icon};
use tracing::debug;

use crate::cli::ReportArgs;
use crate::commands::inputs;
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `sprintload report` command.
pub fn run(ctx: &RuntimeContext, args: &ReportArgs) -> Result<()> {
    let mut inputs = inputs::resolve(ctx, &args.source)?;

    let rows = ReportEngine::new(&inputs.team, &inputs.overrides, inputs.now)
        .rows(&inputs.sprint, &inputs.items);
    debug!(rows = rows.len(), "normalised report rows");

    if ctx.json {
        output_json(&rows);
    } else {
        let csv = build_report(&inputs.team, &rows);
        let destination = args.output.clone().or_else(|| {
            inputs
                .config
                .output_dir_in(&inputs.dir)
                .map(|dir| dir.join(format!("{}.csv", inputs.sprint)))
        });

        match destination {
            Some(path) => {
                write_report(&path, &csv)?;
                if !ctx.quiet {
                    println!(
                        "{} Wrote {} row(s) for sprint {} to {}",
                        render_pass_icon(),
                        rows.len(),
                        render_accent(&inputs.sprint),
                        path.display()
                    );
                }
            }
            None => {
                let stdout = io::stdout();
                let mut handle = stdout.lock();
                // Ignore broken pipe errors (e.g., piped to `head`)
                let _ = handle.write_all(csv.as_bytes());
            }
        }

        if rows.is_empty() && !ctx.quiet {
            eprintln!(
                "{} No team work found in sprint {} for project {}",
                render_warn_icon(),
                inputs.sprint,
                inputs.project
            );
        }
    }

    inputs::record_last_sprint(&mut inputs)?;
    Ok(())
}

fn write_report(path: &Path, csv: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, csv).with_context(|| format!("failed to write report: {}", path.display()))
}
