//! `sprintload team` -- manage project rosters.

use anyhow::{Context, Result};
use sprintload_store::RosterStore;
use sprintload_ui::styles::{render_accent, render_bold, render_muted, render_pass_icon};

use crate::cli::{TeamArgs, TeamCommands};
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `sprintload team` command.
pub fn run(ctx: &RuntimeContext, args: &TeamArgs) -> Result<()> {
    let mut roster = ctx.roster()?;

    match &args.command {
        TeamCommands::Add { project, members } => {
            let added = roster.add_members(project, members.iter().map(|m| m.trim()));
            save(&roster)?;
            if ctx.json {
                output_json(&roster.team(project)?);
            } else if !ctx.quiet {
                println!(
                    "{} Added {} member(s) to {}",
                    render_pass_icon(),
                    added,
                    render_accent(project)
                );
            }
        }

        TeamCommands::Remove { project, members } if members.is_empty() => {
            let removed = roster.remove_team(project)?;
            save(&roster)?;
            if ctx.json {
                output_json(&removed);
            } else if !ctx.quiet {
                println!(
                    "{} Removed roster {} ({} member(s))",
                    render_pass_icon(),
                    render_accent(project),
                    removed.len()
                );
            }
        }

        TeamCommands::Remove { project, members } => {
            let removed = roster.remove_members(project, members.iter().map(String::as_str))?;
            save(&roster)?;
            if ctx.json {
                output_json(&roster.team(project)?);
            } else if !ctx.quiet {
                println!(
                    "{} Removed {} member(s) from {}",
                    render_pass_icon(),
                    removed,
                    render_accent(project)
                );
            }
        }

        TeamCommands::Show { project } => {
            let team = roster.team(project)?;
            if ctx.json {
                output_json(&team);
            } else {
                println!("{}", render_bold(&team.project));
                if team.is_empty() {
                    println!("  {}", render_muted("(no members)"));
                }
                for (i, member) in team.members.iter().enumerate() {
                    println!("  {}. {}", i + 1, member);
                }
            }
        }

        TeamCommands::List => {
            let teams = roster
                .projects()
                .into_iter()
                .map(|p| roster.team(p))
                .collect::<Result<Vec<_>, _>>()?;
            if ctx.json {
                output_json(&teams);
            } else if teams.is_empty() {
                if !ctx.quiet {
                    println!("No team rosters. Add one with 'sprintload team add <PROJECT> <MEMBER>...'");
                }
            } else {
                for team in &teams {
                    println!(
                        "{}  {}",
                        render_accent(&team.project),
                        render_muted(&format!("{} member(s)", team.len()))
                    );
                }
            }
        }
    }

    Ok(())
}

fn save(roster: &RosterStore) -> Result<()> {
    roster
        .save()
        .with_context(|| format!("failed to save {}", roster.path().display()))
}
