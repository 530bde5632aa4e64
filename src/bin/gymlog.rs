// ABOUTME: gymlog CLI - workout logging and review against the remote sheet
// ABOUTME: Handles setup, listing, AI log extraction, deletion, and library management
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 gymlog contributors
//!
//! Usage:
//! ```bash
//! # First-run configuration
//! gymlog setup --api-key KEY --sheet-id SHEET --script-url URL
//!
//! # List logged workouts, newest first
//! gymlog list
//!
//! # Show one workout in full
//! gymlog show <workout-id>
//!
//! # Parse a free-text log with the AI interpreter and save it
//! gymlog log path/to/session.txt
//!
//! # Delete a workout
//! gymlog delete <workout-id>
//!
//! # Exercise library
//! gymlog exercises list
//! gymlog exercises add --name "Flat Barbell Press" --primary-muscle Chest --equipment barbell
//!
//! # Progression of one exercise across history
//! gymlog stats "Flat Barbell Press"
//! ```

use clap::{Parser, Subcommand};
use gymlog::config::SheetsConfig;
use gymlog::errors::{AppError, AppResult};
use gymlog::llm::{GeminiInterpreter, WorkoutInterpreter};
use gymlog::logging::LoggingConfig;
use gymlog::metrics::{exercise_history, total_sets, total_volume};
use gymlog::models::NewPrefabExercise;
use gymlog::repository::{ExerciseLibrary, WorkoutRepository};
use gymlog::sheets::SheetsStore;

#[derive(Parser)]
#[command(
    name = "gymlog",
    about = "Workout tracking against a Google Sheet",
    long_about = "Log workouts manually or from free text via AI extraction, with all storage in a remote Google Sheet."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Store the sheet configuration (first-run setup)
    Setup {
        /// Public read-only Sheets API key
        #[arg(long)]
        api_key: String,

        /// Spreadsheet id
        #[arg(long)]
        sheet_id: String,

        /// Apps Script web-app URL
        #[arg(long)]
        script_url: String,
    },

    /// List logged workouts, newest first
    List,

    /// Show one workout in full
    Show {
        /// Workout id
        id: String,
    },

    /// Parse a free-text workout log with the AI interpreter and save it
    Log {
        /// Path to the log text file
        file: String,

        /// Gemini model override
        #[arg(long)]
        model: Option<String>,
    },

    /// Delete a workout by id
    Delete {
        /// Workout id
        id: String,
    },

    /// Exercise library commands
    Exercises {
        #[command(subcommand)]
        action: ExercisesCommand,
    },

    /// Show the progression of one exercise across history
    Stats {
        /// Exercise name, exactly as in the library
        name: String,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum ExercisesCommand {
    /// List library entries
    List,

    /// Add a library entry
    Add {
        /// Exercise name (unique, used for AI matching)
        #[arg(long)]
        name: String,

        /// Primary muscle worked
        #[arg(long, default_value = "")]
        primary_muscle: String,

        /// Secondary muscles, comma-joined
        #[arg(long, default_value = "")]
        secondary_muscles: String,

        /// Implement used (barbell, dumbbell, machine, ...)
        #[arg(long, default_value = "")]
        equipment: String,

        /// Body position / form description
        #[arg(long, default_value = "")]
        form: String,
    },

    /// Remove a library entry by id
    Remove {
        /// Entry id
        id: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging = logging.with_level("debug");
    }
    if let Err(error) = logging.init() {
        eprintln!("warning: {error}");
    }

    if let Err(error) = run(cli.command).await {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

async fn run(command: Command) -> AppResult<()> {
    match command {
        Command::Setup {
            api_key,
            sheet_id,
            script_url,
        } => {
            let config = SheetsConfig {
                api_key,
                sheet_id,
                script_url,
            };
            config.save()?;
            println!("Configuration saved.");
            Ok(())
        }
        Command::List => list_workouts().await,
        Command::Show { id } => show_workout(&id).await,
        Command::Log { file, model } => log_from_text(&file, model).await,
        Command::Delete { id } => {
            let mut repository = WorkoutRepository::new(SheetsStore::new(load_config()?));
            repository.refresh().await?;
            repository.delete(&id).await?;
            println!("Deleted {id}.");
            Ok(())
        }
        Command::Exercises { action } => run_exercises(action).await,
        Command::Stats { name } => show_stats(&name).await,
    }
}

fn load_config() -> AppResult<SheetsConfig> {
    let config = SheetsConfig::load()?;
    if !config.is_complete() {
        return Err(AppError::config(
            "configuration incomplete; run `gymlog setup` first",
        ));
    }
    Ok(config)
}

async fn list_workouts() -> AppResult<()> {
    let mut repository = WorkoutRepository::new(SheetsStore::new(load_config()?));
    repository.refresh().await?;

    if repository.workouts().is_empty() {
        println!("No workouts logged yet.");
        return Ok(());
    }
    for workout in repository.workouts() {
        println!(
            "{}  {}  {} ({} sets, {} kg volume)  [{}]",
            workout.date,
            workout.title,
            workout.muscle_groups.join(", "),
            total_sets(workout),
            total_volume(workout),
            workout.id,
        );
    }
    Ok(())
}

async fn show_workout(id: &str) -> AppResult<()> {
    let mut repository = WorkoutRepository::new(SheetsStore::new(load_config()?));
    repository.refresh().await?;

    let workout = repository
        .find(id)
        .ok_or_else(|| AppError::invalid_input(format!("no workout with id {id}")))?;

    println!("{} - {}", workout.date, workout.title);
    if !workout.muscle_groups.is_empty() {
        println!("Muscle groups: {}", workout.muscle_groups.join(", "));
    }
    for exercise in &workout.exercises {
        let sets: Vec<String> = exercise
            .sets
            .iter()
            .map(|s| format!("{}x{}", s.weight, s.reps))
            .collect();
        println!("  {}: {}", exercise.name, sets.join(", "));
    }
    if let Some(notes) = &workout.notes {
        println!("Notes: {notes}");
    }
    Ok(())
}

async fn log_from_text(file: &str, model: Option<String>) -> AppResult<()> {
    let text = tokio::fs::read_to_string(file)
        .await
        .map_err(|e| AppError::invalid_input(format!("cannot read {file}: {e}")))?;

    let config = load_config()?;
    let mut library = ExerciseLibrary::new(SheetsStore::new(config.clone()));
    library.refresh().await?;

    let mut interpreter = GeminiInterpreter::from_env()?;
    if let Some(model) = model {
        interpreter = interpreter.with_model(model);
    }

    let parsed = interpreter.interpret(&text, library.entries()).await?;
    println!(
        "Parsed: {} - {} ({} exercises)",
        parsed.date,
        parsed.title,
        parsed.exercises.len()
    );

    let mut repository = WorkoutRepository::new(SheetsStore::new(config));
    let id = repository.add(parsed).await?;
    println!("Saved workout {id}.");
    Ok(())
}

async fn run_exercises(action: ExercisesCommand) -> AppResult<()> {
    let mut library = ExerciseLibrary::new(SheetsStore::new(load_config()?));
    library.refresh().await?;

    match action {
        ExercisesCommand::List => {
            if library.entries().is_empty() {
                println!("The exercise library is empty.");
            }
            for entry in library.entries() {
                println!(
                    "{}  {} / {}  ({})  [{}]",
                    entry.name, entry.primary_muscle, entry.secondary_muscles, entry.equipment,
                    entry.id,
                );
            }
            Ok(())
        }
        ExercisesCommand::Add {
            name,
            primary_muscle,
            secondary_muscles,
            equipment,
            form,
        } => {
            let id = library
                .add(NewPrefabExercise {
                    name,
                    primary_muscle,
                    secondary_muscles,
                    equipment,
                    form,
                })
                .await?;
            println!("Added exercise {id}.");
            Ok(())
        }
        ExercisesCommand::Remove { id } => {
            library.remove(&id).await?;
            println!("Removed {id}.");
            Ok(())
        }
    }
}

async fn show_stats(name: &str) -> AppResult<()> {
    let mut repository = WorkoutRepository::new(SheetsStore::new(load_config()?));
    repository.refresh().await?;

    let series = exercise_history(repository.workouts(), name);
    if series.is_empty() {
        println!("No sessions recorded for {name}.");
        return Ok(());
    }
    println!("{name}:");
    for session in &series {
        println!(
            "{}  max {} kg  volume {} kg  est. 1RM {} kg",
            session.date, session.max_weight, session.total_volume, session.estimated_one_rm,
        );
    }
    Ok(())
}
