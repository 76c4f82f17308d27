use std::path::Path;

use anyhow::{Context as _, Result};
use chrono::NaiveDate;
use clap::ArgMatches;
use liftlog_core::{load_config, ExerciseId, SetField, SetId, WorkoutId};
use tracing::debug;

use crate::commands::{self, Context};

pub async fn dispatch(matches: &ArgMatches) -> Result<()> {
    // Static catalogs need no configuration
    if let Some(("options", sub_m)) = matches.subcommand() {
        return commands::options::run(sub_m.get_flag("json"));
    }

    let config = load_config().await?;
    debug!(user = %config.user_id, database = %config.database, "configuration loaded");
    let ctx = Context::new(config);

    match matches.subcommand() {
        Some(("draft", sub_m)) => handle_draft(&ctx, sub_m).await,
        Some(("exercise", sub_m)) => handle_exercise(&ctx, sub_m).await,
        Some(("set", sub_m)) => handle_set(&ctx, sub_m).await,
        Some(("apply", sub_m)) => {
            let file = required(sub_m, "file")?;
            commands::apply::run(&ctx, Path::new(file)).await
        }
        Some(("submit", sub_m)) => commands::submit::run(&ctx, sub_m.get_flag("dry-run")).await,
        Some(("workouts", sub_m)) => {
            let month = sub_m
                .get_one::<String>("month")
                .map(|m| commands::workouts::parse_month(m))
                .transpose()?;
            commands::workouts::run(&ctx, month, sub_m.get_flag("json")).await
        }
        _ => anyhow::bail!("Unknown command. Run 'liftlog --help' for usage."),
    }
}

async fn handle_draft(ctx: &Context, matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("new", sub_m)) => {
            let date = sub_m
                .get_one::<String>("date")
                .map(|d| {
                    d.parse::<NaiveDate>()
                        .with_context(|| format!("Invalid date '{d}' (expected YYYY-MM-DD)"))
                })
                .transpose()?;
            let options = commands::draft::NewOptions {
                date,
                force: sub_m.get_flag("force"),
            };
            commands::draft::run_new(ctx, &options).await
        }
        Some(("edit", sub_m)) => {
            let options = commands::draft::EditOptions {
                workout: parse_id::<WorkoutId>(sub_m, "workout")?,
                force: sub_m.get_flag("force"),
            };
            commands::draft::run_edit(ctx, &options).await
        }
        Some(("show", sub_m)) => commands::draft::run_show(ctx, sub_m.get_flag("json")).await,
        Some(("set", sub_m)) => {
            commands::draft::run_set(ctx, required(sub_m, "field")?, required(sub_m, "value")?)
                .await
        }
        Some(("discard", _)) => commands::draft::run_discard(ctx).await,
        _ => anyhow::bail!("Unknown draft subcommand. Run 'liftlog draft --help' for usage."),
    }
}

async fn handle_exercise(ctx: &Context, matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("add", sub_m)) => {
            let name = sub_m.get_one::<String>("name").map(String::as_str);
            commands::exercise::run_add(ctx, name).await
        }
        Some(("remove", sub_m)) => {
            commands::exercise::run_remove(ctx, parse_id(sub_m, "exercise")?).await
        }
        Some(("rename", sub_m)) => {
            let exercise = parse_id(sub_m, "exercise")?;
            commands::exercise::run_rename(ctx, exercise, required(sub_m, "name")?).await
        }
        Some(("reset", sub_m)) => {
            commands::exercise::run_reset(ctx, parse_id(sub_m, "exercise")?).await
        }
        _ => anyhow::bail!("Unknown exercise subcommand. Run 'liftlog exercise --help' for usage."),
    }
}

async fn handle_set(ctx: &Context, matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("add", sub_m)) => {
            let optional = |id: &str| sub_m.get_one::<String>(id).cloned();
            let options = commands::set::AddOptions {
                exercise: parse_id::<ExerciseId>(sub_m, "exercise")?,
                weight: optional("weight"),
                reps: optional("reps"),
                unit: optional("unit"),
            };
            commands::set::run_add(ctx, &options).await
        }
        Some(("remove", sub_m)) => {
            let exercise = parse_id::<ExerciseId>(sub_m, "exercise")?;
            let set = parse_id::<SetId>(sub_m, "set")?;
            commands::set::run_remove(ctx, exercise, set).await
        }
        Some(("update", sub_m)) => {
            let exercise = parse_id::<ExerciseId>(sub_m, "exercise")?;
            let set = parse_id::<SetId>(sub_m, "set")?;
            let field_name = required(sub_m, "field")?;
            let field: SetField = field_name.parse().map_err(|_| {
                anyhow::anyhow!("Unknown set field '{field_name}' (expected weight, reps or unit)")
            })?;
            commands::set::run_update(ctx, exercise, set, field, required(sub_m, "value")?).await
        }
        _ => anyhow::bail!("Unknown set subcommand. Run 'liftlog set --help' for usage."),
    }
}

fn required<'a>(matches: &'a ArgMatches, id: &str) -> Result<&'a str> {
    matches
        .get_one::<String>(id)
        .map(String::as_str)
        .ok_or_else(|| anyhow::anyhow!("Missing required argument '{id}'"))
}

fn parse_id<T>(matches: &ArgMatches, id: &str) -> Result<T>
where
    T: std::str::FromStr<Err = liftlog_core::Error>,
{
    Ok(required(matches, id)?.parse()?)
}
