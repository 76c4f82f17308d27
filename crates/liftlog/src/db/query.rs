//! Query execution and row parsing for database operations

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};
use itertools::Itertools;
use liftlog_core::{
    ExercisePayload, GatewayError, PersistedExercise, PersistedSet, PersistedWorkout, SetPayload,
    WorkoutId, WorkoutPayload,
};
use sqlx::{sqlite::SqliteRow, Row, SqliteConnection};

type QueryResult<T> = std::result::Result<T, GatewayError>;

fn storage(context: &'static str) -> impl Fn(sqlx::Error) -> GatewayError {
    move |e| GatewayError::Storage(format!("{context}: {e}"))
}

fn column<'r, T>(row: &'r SqliteRow, name: &str) -> QueryResult<T>
where
    T: sqlx::Decode<'r, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite>,
{
    row.try_get(name)
        .map_err(|e| GatewayError::Storage(format!("Failed to read {name}: {e}")))
}

const WORKOUT_COLUMNS: &str =
    "id, user_id, name, time, type, duration, notes, date, created_at";

/// Parse a workouts row; exercises are filled in separately
pub(crate) fn parse_workout_row(row: &SqliteRow) -> QueryResult<PersistedWorkout> {
    let date: String = column(row, "date")?;
    let date = date
        .parse::<NaiveDate>()
        .map_err(|e| GatewayError::Storage(format!("Invalid date '{date}': {e}")))?;
    let created_at: Option<String> = column(row, "created_at")?;
    let created_at = created_at
        .map(|s| {
            s.parse::<DateTime<Utc>>()
                .map_err(|e| GatewayError::Storage(format!("Invalid created_at '{s}': {e}")))
        })
        .transpose()?;

    Ok(PersistedWorkout {
        id: WorkoutId::new(column(row, "id")?),
        user_id: column(row, "user_id")?,
        name: column(row, "name")?,
        time: column(row, "time")?,
        workout_type: column(row, "type")?,
        duration: column(row, "duration")?,
        notes: column(row, "notes")?,
        date,
        created_at,
        exercises: Vec::new(),
    })
}

fn parse_set_row(row: &SqliteRow) -> QueryResult<(i64, PersistedSet)> {
    let exercise_id: i64 = column(row, "exercise_id")?;
    Ok((
        exercise_id,
        PersistedSet {
            id: column(row, "id")?,
            set_number: column(row, "set_number")?,
            weight_amount: column(row, "weight_amount")?,
            weight_unit: column(row, "weight_unit")?,
            rep_amount: column(row, "rep_amount")?,
        },
    ))
}

// ═══════════════════════════════════════════════════════════════════════════
// READS
// ═══════════════════════════════════════════════════════════════════════════

pub(crate) async fn fetch_workout(
    conn: &mut SqliteConnection,
    workout_id: WorkoutId,
) -> QueryResult<Option<PersistedWorkout>> {
    let row = sqlx::query(&format!(
        "SELECT {WORKOUT_COLUMNS} FROM workouts WHERE id = ?"
    ))
    .bind(workout_id.get())
    .fetch_optional(&mut *conn)
    .await
    .map_err(storage("Failed to query workout"))?;

    match row {
        Some(row) => {
            let mut workout = parse_workout_row(&row)?;
            workout.exercises = fetch_exercises(conn, workout_id).await?;
            Ok(Some(workout))
        }
        None => Ok(None),
    }
}

pub(crate) async fn fetch_workouts_between(
    conn: &mut SqliteConnection,
    user_id: &str,
    from: NaiveDate,
    to: NaiveDate,
) -> QueryResult<Vec<PersistedWorkout>> {
    let rows = sqlx::query(&format!(
        "SELECT {WORKOUT_COLUMNS} FROM workouts
         WHERE user_id = ? AND date BETWEEN ? AND ?
         ORDER BY date, id"
    ))
    .bind(user_id)
    .bind(from.to_string())
    .bind(to.to_string())
    .fetch_all(&mut *conn)
    .await
    .map_err(storage("Failed to query workouts"))?;

    let mut workouts = rows
        .iter()
        .map(parse_workout_row)
        .collect::<QueryResult<Vec<_>>>()?;
    for workout in &mut workouts {
        workout.exercises = fetch_exercises(conn, workout.id).await?;
    }
    Ok(workouts)
}

/// Exercises of a workout in saved order, each with its sets
async fn fetch_exercises(
    conn: &mut SqliteConnection,
    workout_id: WorkoutId,
) -> QueryResult<Vec<PersistedExercise>> {
    let exercise_rows = sqlx::query(
        "SELECT id, name FROM exercises WHERE workout_id = ? ORDER BY position, id",
    )
    .bind(workout_id.get())
    .fetch_all(&mut *conn)
    .await
    .map_err(storage("Failed to query exercises"))?;

    let set_rows = sqlx::query(
        "SELECT s.id, s.exercise_id, s.set_number, s.weight_amount, s.weight_unit, s.rep_amount
         FROM sets s JOIN exercises e ON e.id = s.exercise_id
         WHERE e.workout_id = ?
         ORDER BY s.exercise_id, s.set_number, s.id",
    )
    .bind(workout_id.get())
    .fetch_all(&mut *conn)
    .await
    .map_err(storage("Failed to query sets"))?;

    let mut sets_by_exercise = set_rows
        .iter()
        .map(parse_set_row)
        .collect::<QueryResult<Vec<_>>>()?
        .into_iter()
        .into_group_map();

    exercise_rows
        .iter()
        .map(|row| {
            let id: i64 = column(row, "id")?;
            Ok(PersistedExercise {
                id,
                name: column(row, "name")?,
                sets: sets_by_exercise.remove(&id).unwrap_or_default(),
            })
        })
        .collect()
}

async fn child_ids(
    conn: &mut SqliteConnection,
    sql: &'static str,
    parent: i64,
) -> QueryResult<HashSet<i64>> {
    let rows = sqlx::query(sql)
        .bind(parent)
        .fetch_all(&mut *conn)
        .await
        .map_err(storage("Failed to query child ids"))?;
    rows.iter().map(|row| column::<i64>(row, "id")).collect()
}

// ═══════════════════════════════════════════════════════════════════════════
// WRITES
// ═══════════════════════════════════════════════════════════════════════════

pub(crate) async fn insert_workout(
    conn: &mut SqliteConnection,
    payload: &WorkoutPayload,
) -> QueryResult<WorkoutId> {
    let id = sqlx::query(
        "INSERT INTO workouts (user_id, name, time, type, duration, notes, date)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&payload.user_id)
    .bind(&payload.name)
    .bind(&payload.time)
    .bind(&payload.workout_type)
    .bind(&payload.duration)
    .bind(&payload.notes)
    .bind(payload.date.to_string())
    .execute(&mut *conn)
    .await
    .map_err(storage("Failed to insert workout"))?
    .last_insert_rowid();

    for (position, exercise) in (0_i64..).zip(&payload.exercises) {
        insert_exercise(conn, id, position, exercise).await?;
    }
    Ok(WorkoutId::new(id))
}

/// Overwrite the workout row and reconcile its exercises and sets.
///
/// Stored children missing from the payload are deleted, children with an
/// id are updated in place and children without one are inserted.
pub(crate) async fn update_workout(
    conn: &mut SqliteConnection,
    workout_id: WorkoutId,
    payload: &WorkoutPayload,
) -> QueryResult<()> {
    let updated = sqlx::query(
        "UPDATE workouts SET name = ?, time = ?, type = ?, duration = ?, notes = ?, date = ?
         WHERE id = ? AND user_id = ?",
    )
    .bind(&payload.name)
    .bind(&payload.time)
    .bind(&payload.workout_type)
    .bind(&payload.duration)
    .bind(&payload.notes)
    .bind(payload.date.to_string())
    .bind(workout_id.get())
    .bind(&payload.user_id)
    .execute(&mut *conn)
    .await
    .map_err(storage("Failed to update workout"))?
    .rows_affected();
    if updated == 0 {
        return Err(GatewayError::NotFound(workout_id));
    }

    let existing = child_ids(
        conn,
        "SELECT id FROM exercises WHERE workout_id = ?",
        workout_id.get(),
    )
    .await?;
    let kept: HashSet<i64> = payload.exercises.iter().filter_map(|e| e.id).collect();

    if let Some(stray) = kept.difference(&existing).next() {
        return Err(GatewayError::Rejected(format!(
            "exercise {stray} does not belong to workout {workout_id}"
        )));
    }
    for dropped in existing.difference(&kept) {
        delete_exercise(conn, *dropped).await?;
    }

    for (position, exercise) in (0_i64..).zip(&payload.exercises) {
        match exercise.id {
            Some(id) => update_exercise(conn, id, position, exercise).await?,
            None => {
                insert_exercise(conn, workout_id.get(), position, exercise).await?;
            }
        }
    }
    Ok(())
}

async fn insert_exercise(
    conn: &mut SqliteConnection,
    workout_id: i64,
    position: i64,
    exercise: &ExercisePayload,
) -> QueryResult<i64> {
    let id = sqlx::query("INSERT INTO exercises (workout_id, name, position) VALUES (?, ?, ?)")
        .bind(workout_id)
        .bind(&exercise.name)
        .bind(position)
        .execute(&mut *conn)
        .await
        .map_err(storage("Failed to insert exercise"))?
        .last_insert_rowid();

    for set in &exercise.sets {
        insert_set(conn, id, set).await?;
    }
    Ok(id)
}

async fn update_exercise(
    conn: &mut SqliteConnection,
    exercise_id: i64,
    position: i64,
    exercise: &ExercisePayload,
) -> QueryResult<()> {
    sqlx::query("UPDATE exercises SET name = ?, position = ? WHERE id = ?")
        .bind(&exercise.name)
        .bind(position)
        .bind(exercise_id)
        .execute(&mut *conn)
        .await
        .map_err(storage("Failed to update exercise"))?;

    let existing = child_ids(conn, "SELECT id FROM sets WHERE exercise_id = ?", exercise_id).await?;
    let kept: HashSet<i64> = exercise.sets.iter().filter_map(|s| s.id).collect();

    if let Some(stray) = kept.difference(&existing).next() {
        return Err(GatewayError::Rejected(format!(
            "set {stray} does not belong to exercise {exercise_id}"
        )));
    }
    for dropped in existing.difference(&kept) {
        sqlx::query("DELETE FROM sets WHERE id = ?")
            .bind(*dropped)
            .execute(&mut *conn)
            .await
            .map_err(storage("Failed to delete set"))?;
    }

    for set in &exercise.sets {
        match set.id {
            Some(id) => update_set(conn, id, set).await?,
            None => insert_set(conn, exercise_id, set).await?,
        }
    }
    Ok(())
}

async fn delete_exercise(conn: &mut SqliteConnection, exercise_id: i64) -> QueryResult<()> {
    sqlx::query("DELETE FROM sets WHERE exercise_id = ?")
        .bind(exercise_id)
        .execute(&mut *conn)
        .await
        .map_err(storage("Failed to delete sets"))?;
    sqlx::query("DELETE FROM exercises WHERE id = ?")
        .bind(exercise_id)
        .execute(&mut *conn)
        .await
        .map(|_| ())
        .map_err(storage("Failed to delete exercise"))
}

async fn insert_set(
    conn: &mut SqliteConnection,
    exercise_id: i64,
    set: &SetPayload,
) -> QueryResult<()> {
    sqlx::query(
        "INSERT INTO sets (exercise_id, set_number, weight_amount, weight_unit, rep_amount)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(exercise_id)
    .bind(i64::from(set.set_number))
    .bind(set.weight())
    .bind(&set.weight_unit)
    .bind(set.reps())
    .execute(&mut *conn)
    .await
    .map(|_| ())
    .map_err(storage("Failed to insert set"))
}

async fn update_set(conn: &mut SqliteConnection, set_id: i64, set: &SetPayload) -> QueryResult<()> {
    sqlx::query(
        "UPDATE sets SET set_number = ?, weight_amount = ?, weight_unit = ?, rep_amount = ?
         WHERE id = ?",
    )
    .bind(i64::from(set.set_number))
    .bind(set.weight())
    .bind(&set.weight_unit)
    .bind(set.reps())
    .bind(set_id)
    .execute(&mut *conn)
    .await
    .map(|_| ())
    .map_err(storage("Failed to update set"))
}
