pub mod handlers;
pub mod setup;

use clap::{Arg, ArgAction, Command};

pub fn build_cli() -> Command {
    Command::new("liftlog")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Edit workout drafts and save them to a local workout log")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log debug output to stderr"),
        )
        .subcommand(cmd_draft())
        .subcommand(cmd_exercise())
        .subcommand(cmd_set())
        .subcommand(cmd_apply())
        .subcommand(cmd_submit())
        .subcommand(cmd_workouts())
        .subcommand(cmd_options())
}

fn force_arg() -> Arg {
    Arg::new("force")
        .long("force")
        .action(ArgAction::SetTrue)
        .help("Replace the open draft")
}

fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print JSON instead of text")
}

fn exercise_arg() -> Arg {
    Arg::new("exercise")
        .required(true)
        .help("Exercise id, e.g. 12 or new-3")
}

fn set_arg() -> Arg {
    Arg::new("set").required(true).help("Set id, e.g. 40 or new-5")
}

fn cmd_draft() -> Command {
    Command::new("draft")
        .about("Open, inspect and discard the workout draft")
        .subcommand_required(true)
        .subcommand(
            Command::new("new")
                .about("Start a draft for a new workout")
                .arg(
                    Arg::new("date")
                        .long("date")
                        .value_name("YYYY-MM-DD")
                        .help("Workout date (default: today)"),
                )
                .arg(force_arg()),
        )
        .subcommand(
            Command::new("edit")
                .about("Start a draft editing a saved workout")
                .arg(Arg::new("workout").required(true).help("Workout id"))
                .arg(force_arg()),
        )
        .subcommand(Command::new("show").about("Show the open draft").arg(json_arg()))
        .subcommand(
            Command::new("set")
                .about("Change a workout field")
                .arg(
                    Arg::new("field")
                        .required(true)
                        .help("name, type, time, duration, date or notes"),
                )
                .arg(Arg::new("value").required(true).help("New value")),
        )
        .subcommand(Command::new("discard").about("Throw the open draft away"))
}

fn cmd_exercise() -> Command {
    Command::new("exercise")
        .about("Edit the exercises of the draft")
        .subcommand_required(true)
        .subcommand(
            Command::new("add").about("Append an exercise").arg(
                Arg::new("name")
                    .long("name")
                    .help("Pick the exercise right away"),
            ),
        )
        .subcommand(
            Command::new("remove")
                .about("Remove an exercise (the last one stays)")
                .arg(exercise_arg()),
        )
        .subcommand(
            Command::new("rename")
                .about("Pick or change the exercise")
                .arg(exercise_arg())
                .arg(Arg::new("name").required(true)),
        )
        .subcommand(
            Command::new("reset")
                .about("Clear the exercise choice, keeping its sets")
                .arg(exercise_arg()),
        )
}

fn cmd_set() -> Command {
    Command::new("set")
        .about("Edit the sets of an exercise")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .about("Append a blank set")
                .arg(exercise_arg())
                .arg(Arg::new("weight").long("weight").help("Weight amount"))
                .arg(Arg::new("reps").long("reps").help("Repetitions"))
                .arg(Arg::new("unit").long("unit").help("Weight unit")),
        )
        .subcommand(
            Command::new("remove")
                .about("Remove a set (the last one stays)")
                .arg(exercise_arg())
                .arg(set_arg()),
        )
        .subcommand(
            Command::new("update")
                .about("Change one field of a set")
                .arg(exercise_arg())
                .arg(set_arg())
                .arg(
                    Arg::new("field")
                        .required(true)
                        .help("weight, reps or unit"),
                )
                .arg(Arg::new("value").required(true)),
        )
}

fn cmd_apply() -> Command {
    Command::new("apply")
        .about("Apply a JSON list of draft commands")
        .arg(Arg::new("file").required(true).help("Path to the command file"))
}

fn cmd_submit() -> Command {
    Command::new("submit")
        .about("Validate and save the draft")
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .action(ArgAction::SetTrue)
                .help("Print the payload without saving"),
        )
}

fn cmd_workouts() -> Command {
    Command::new("workouts")
        .about("List saved workouts for a month")
        .arg(
            Arg::new("month")
                .long("month")
                .value_name("YYYY-MM")
                .help("Month to list (default: current month)"),
        )
        .arg(json_arg())
}

fn cmd_options() -> Command {
    Command::new("options")
        .about("List workout type, time of day and duration choices")
        .arg(json_arg())
}
