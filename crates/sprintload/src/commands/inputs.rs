//! Input resolution shared by `report`, `totals`, and `interval`.
//!
//! The order is fixed: roster first, then overrides, then the sprint items,
//! so a missing project or malformed overrides fail before any fetch.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use sprintload_config::SprintloadConfig;
use sprintload_core::snapshot::write_jsonl;
use sprintload_core::{Item, Overrides, Team};
use sprintload_store::RosterStore;
use sprintload_timeparsing::parse_changelog_timestamp;
use sprintload_tracker::{IssueSource, JiraAuth, JiraSource, SnapshotSource};
use tracing::debug;

use crate::cli::SourceArgs;
use crate::context::RuntimeContext;

/// Everything one report run needs.
pub struct ReportInputs {
    pub project: String,
    pub sprint: String,
    pub team: Team,
    pub overrides: Overrides,
    pub items: Vec<Item>,
    pub now: DateTime<Utc>,
    pub roster: RosterStore,
    pub dir: PathBuf,
    pub config: SprintloadConfig,
}

/// Resolves roster, overrides, clock and items for a sprint.
pub fn resolve(ctx: &RuntimeContext, args: &SourceArgs) -> Result<ReportInputs> {
    let (dir, config) = ctx.config()?;
    let roster = ctx.roster()?;

    let project = args
        .project
        .clone()
        .or_else(|| config.default_project.clone())
        .context("no project given: pass --project or set default_project in config.yaml")?;
    let team = roster.team(&project)?;
    let overrides = parse_overrides(args.overrides.as_deref())?;
    let now = parse_as_of(args.as_of.as_deref())?;

    let sprint = match &args.sprint {
        Some(sprint) => sprint.clone(),
        None => roster
            .get::<String>(&last_sprint_key(&project))
            .context("failed to read last reported sprint")?
            .context("no sprint given: pass --sprint")?,
    };

    let source = issue_source(&dir, &config, args.snapshot.as_deref())?;
    let items = source
        .sprint_items(&sprint)
        .with_context(|| format!("failed to fetch items for sprint {sprint}"))?;
    if let Some(path) = &args.save_snapshot {
        save_snapshot(path, &items)?;
    }
    debug!(
        project = %project,
        sprint = %sprint,
        members = team.len(),
        overrides = overrides.len(),
        items = items.len(),
        "resolved report inputs"
    );

    Ok(ReportInputs {
        project,
        sprint,
        team,
        overrides,
        items,
        now,
        roster,
        dir,
        config,
    })
}

/// Writes `items` to `path` as JSON Lines.
pub fn save_snapshot(path: &Path, items: &[Item]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create snapshot: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_jsonl(&mut writer, items)
        .with_context(|| format!("failed to write snapshot: {}", path.display()))?;
    debug!(path = %path.display(), items = items.len(), "saved snapshot");
    Ok(())
}

/// Parses `--overrides`: inline JSON, or `@FILE`. Absent means no overrides.
pub fn parse_overrides(raw: Option<&str>) -> Result<Overrides> {
    let Some(raw) = raw else {
        return Ok(Overrides::new());
    };
    match raw.strip_prefix('@') {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("failed to read overrides file {path}"))?;
            Ok(Overrides::from_json(&content)?)
        }
        None => Ok(Overrides::from_json(raw)?),
    }
}

/// Parses `--as-of`, defaulting to the current time.
pub fn parse_as_of(raw: Option<&str>) -> Result<DateTime<Utc>> {
    match raw {
        Some(raw) => parse_changelog_timestamp(raw).with_context(|| format!("invalid --as-of '{raw}'")),
        None => Ok(Utc::now()),
    }
}

/// Picks the item source: `--snapshot`, then config `snapshot`, then the tracker.
pub fn issue_source(
    dir: &Path,
    config: &SprintloadConfig,
    snapshot: Option<&Path>,
) -> Result<Box<dyn IssueSource>> {
    if let Some(path) = snapshot {
        return Ok(Box::new(SnapshotSource::new(path)));
    }
    if let Some(path) = configured_snapshot(dir, config) {
        return Ok(Box::new(SnapshotSource::new(path)));
    }

    let tracker = &config.tracker;
    if !tracker.is_configured() {
        bail!("no issue source: pass --snapshot or set tracker.base_url in config.yaml");
    }
    let auth = if tracker.email.trim().is_empty() {
        None
    } else {
        Some(JiraAuth::from_env(tracker.email.trim(), &tracker.token_env)?)
    };
    debug!(base_url = %tracker.base_url, "using tracker source");
    Ok(Box::new(JiraSource::new(
        &tracker.base_url,
        auth,
        tracker.page_size,
    )?))
}

/// Config `snapshot`, resolved against the directory holding `.sprintload/`.
pub fn configured_snapshot(dir: &Path, config: &SprintloadConfig) -> Option<PathBuf> {
    let path = PathBuf::from(config.snapshot.as_deref()?);
    if path.is_absolute() {
        return Some(path);
    }
    Some(dir.parent().unwrap_or(dir).join(path))
}

/// Roster key-value slot remembering the last sprint reported per project.
pub fn last_sprint_key(project: &str) -> String {
    format!("last_sprint.{project}")
}

/// Remembers `sprint` as the project's default for the next run.
pub fn record_last_sprint(inputs: &mut ReportInputs) -> Result<()> {
    let key = last_sprint_key(&inputs.project);
    inputs.roster.set(&key, &inputs.sprint)?;
    inputs
        .roster
        .save()
        .with_context(|| format!("failed to save {}", inputs.roster.path().display()))
}
