//! `sprintload totals` -- raw per-person hours for a sprint.
//!
//! These are the unfloored totals: unstarted items are skipped and still-open
//! items run until now. Members are listed in roster order.

use anyhow::Result;
use sprintload_engine::ReportEngine;
use sprintload_ui::styles::{render_heading, render_hours};

use crate::cli::TotalsArgs;
use crate::commands::inputs;
use crate::context::RuntimeContext;
use crate::output::{output_json, output_table};

/// Execute the `sprintload totals` command.
pub fn run(ctx: &RuntimeContext, args: &TotalsArgs) -> Result<()> {
    let inputs = inputs::resolve(ctx, &args.source)?;
    let engine = ReportEngine::new(&inputs.team, &inputs.overrides, inputs.now);
    let totals = engine.totals(&inputs.items);

    let ordered: Vec<(&str, f64)> = inputs
        .team
        .members
        .iter()
        .map(|m| (m.as_str(), totals.get(m).copied().unwrap_or(0.0)))
        .collect();

    if ctx.json {
        let entries: Vec<serde_json::Value> = ordered
            .iter()
            .map(|(member, hours)| serde_json::json!({ "member": member, "hours": hours }))
            .collect();
        output_json(&serde_json::json!({
            "project": inputs.project,
            "sprint": inputs.sprint,
            "totals": entries,
        }));
        return Ok(());
    }

    if !ctx.quiet {
        println!(
            "{}\n",
            render_heading(&format!(
                "Sprint {} / {} ({} items)",
                inputs.sprint,
                inputs.project,
                inputs.items.len()
            ))
        );
    }
    let plain: Vec<Vec<String>> = ordered
        .iter()
        .map(|(member, hours)| vec![member.to_string(), format!("{hours:.2}")])
        .collect();
    let styled: Vec<Vec<String>> = ordered
        .iter()
        .map(|(member, hours)| vec![member.to_string(), render_hours(*hours)])
        .collect();
    output_table(&["MEMBER", "HOURS"], &plain, &styled);
    Ok(())
}
