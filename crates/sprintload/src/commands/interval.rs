//! `sprintload interval` -- show how one item's work interval was reconstructed.

use anyhow::{Context, Result};
use sprintload_engine::{WalkState, item_load, walk};
use sprintload_tracker::{IssueSource, SnapshotSource};
use sprintload_ui::styles::{EMPTY_CELL, render_bold, render_hours, render_muted, render_status, render_type};

use crate::cli::IntervalArgs;
use crate::commands::inputs;
use crate::context::RuntimeContext;
use crate::output::{format_timestamp, output_json};

/// Execute the `sprintload interval` command.
pub fn run(ctx: &RuntimeContext, args: &IntervalArgs) -> Result<()> {
    let snapshot = match &args.snapshot {
        Some(path) => path.clone(),
        None => {
            let (dir, config) = ctx.config()?;
            inputs::configured_snapshot(&dir, &config)
                .context("no snapshot given: pass --snapshot or set snapshot in config.yaml")?
        }
    };
    let overrides = inputs::parse_overrides(args.overrides.as_deref())?;
    let now = inputs::parse_as_of(args.as_of.as_deref())?;

    let items = SnapshotSource::new(&snapshot).sprint_items("")?;
    let item = items
        .iter()
        .find(|i| i.key == args.key)
        .with_context(|| format!("item {} not found in {}", args.key, snapshot.display()))?;

    let walked = walk(item);
    let load = item_load(item, &overrides, now);

    if ctx.json {
        output_json(&serde_json::json!({
            "key": item.key,
            "status": item.status,
            "type": item.item_type,
            "assignee": item.assignee,
            "walk": walked,
            "load": {
                "start": load.start,
                "end": load.end,
                "hours": load.hours,
            },
            "override": overrides.get(&item.key),
        }));
        return Ok(());
    }

    let stamp = |at: Option<chrono::DateTime<chrono::Utc>>| {
        at.map(format_timestamp)
            .unwrap_or_else(|| render_muted(EMPTY_CELL))
    };
    let state = match walked.state {
        WalkState::Idle => "idle".to_string(),
        WalkState::Active { since } => format!("active since {}", format_timestamp(since)),
        WalkState::Completed => "completed".to_string(),
    };

    println!(
        "{} [{}] {}  {}",
        render_bold(&item.key),
        render_type(&item.item_type),
        render_status(&item.status),
        item.title
    );
    println!(
        "  Assignee:  {}",
        if item.assignee.is_empty() {
            render_muted("unassigned")
        } else {
            item.assignee.clone()
        }
    );
    println!("  Started:   {}", stamp(walked.interval.start));
    println!("  Completed: {}", stamp(walked.interval.end));
    println!("  State:     {}", state);

    if walked.spans.is_empty() {
        println!("  Spans:     {}", render_muted("none"));
    } else {
        println!("  Spans:");
        for span in &walked.spans {
            println!(
                "    {} -> {}",
                format_timestamp(span.start),
                stamp(span.end)
            );
        }
    }

    let credited = if overrides.get(&item.key).is_some() {
        format!("{}h (manual override)", render_hours(load.hours))
    } else {
        format!(
            "{}h ({} -> {})",
            render_hours(load.hours),
            format_timestamp(load.start),
            format_timestamp(load.end)
        )
    };
    println!("  Credited:  {}", credited);
    Ok(())
}
