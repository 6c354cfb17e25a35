mod terminal;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use terminal::{TerminalList, TerminalMap};
use wm_app::{AppError, AppResult, Controller, Settings, StaticPosition, Update, WorkoutForm};
use wm_core::{Coords, WorkoutId, parse_number};
use wm_model::{SortKey, ValidationError, WorkoutType};
use wm_storage::{DirStore, Persistence};

const DEFAULT_DATA_DIR: &str = ".waymark";

#[derive(Parser)]
#[command(name = "wm-cli")]
#[command(about = "Waymark CLI - Log runs and rides against map positions", long_about = None)]
struct Cli {
    /// Directory holding the stored workouts
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// Settings file (YAML)
    #[arg(long, global = true, default_value = "waymark.yaml")]
    config: PathBuf,
    /// Current map position as LAT,LNG
    #[arg(long, global = true, value_parser = parse_coords, allow_hyphen_values = true)]
    position: Option<Coords>,
    /// Also print marker instructions
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List workouts in the current sort order
    List,
    /// Record a new workout
    #[command(subcommand)]
    Add(AddCommands),
    /// Show the editable values of a workout
    Show {
        /// Workout ID
        id: String,
    },
    /// Change distance, duration or the type-specific field of a workout
    Edit {
        /// Workout ID
        id: String,
        /// Distance in km
        #[arg(long)]
        distance: Option<String>,
        /// Duration in minutes
        #[arg(long)]
        duration: Option<String>,
        /// Cadence in steps per minute (runs)
        #[arg(long, conflicts_with = "elevation")]
        cadence: Option<String>,
        /// Elevation gain in meters (rides)
        #[arg(long)]
        elevation: Option<String>,
    },
    /// Delete a workout
    Delete {
        /// Workout ID
        id: String,
    },
    /// Set the list order (none, distance, duration)
    Sort {
        key: SortKey,
    },
    /// Center the map on a workout
    Focus {
        /// Workout ID
        id: String,
    },
    /// Remove every stored workout and the sort preference
    Reset,
}

#[derive(Subcommand)]
enum AddCommands {
    /// Record a run
    Running {
        /// Where the run happened as LAT,LNG (defaults to the map position)
        #[arg(long, value_parser = parse_coords, allow_hyphen_values = true)]
        at: Option<Coords>,
        /// Distance in km
        #[arg(long)]
        distance: String,
        /// Duration in minutes
        #[arg(long)]
        duration: String,
        /// Cadence in steps per minute
        #[arg(long)]
        cadence: String,
    },
    /// Record a ride
    Cycling {
        /// Where the ride happened as LAT,LNG (defaults to the map position)
        #[arg(long, value_parser = parse_coords, allow_hyphen_values = true)]
        at: Option<Coords>,
        /// Distance in km
        #[arg(long)]
        distance: String,
        /// Duration in minutes
        #[arg(long)]
        duration: String,
        /// Elevation gain in meters
        #[arg(long, allow_hyphen_values = true)]
        elevation: String,
    },
}

fn parse_coords(input: &str) -> Result<Coords, String> {
    let (lat, lng) = input
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LNG, got '{input}'"))?;
    let lat = parse_number(lat, "latitude").map_err(|e| e.to_string())?;
    let lng = parse_number(lng, "longitude").map_err(|e| e.to_string())?;
    Coords::new(lat, lng).map_err(|e| e.to_string())
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let settings = Settings::load_or_default(&cli.config)?;
    let data_dir = cli
        .data_dir
        .clone()
        .or_else(|| settings.data_dir.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
    tracing::debug!(data_dir = %data_dir.display(), "opening workout store");
    let persistence = Persistence::with_keys(DirStore::new(data_dir)?, settings.storage_keys());
    let mut controller = Controller::new(persistence).with_zoom(settings.map_zoom);
    let mut position = StaticPosition(cli.position.or(settings.position));
    let startup = controller.start(&mut position)?;

    let mut out = Output::new(cli.verbose);
    match cli.command {
        Commands::List => cmd_list(&controller, &startup, &mut out),
        Commands::Add(add_cmd) => match add_cmd {
            AddCommands::Running {
                at,
                distance,
                duration,
                cadence,
            } => cmd_add(
                &mut controller,
                WorkoutType::Running,
                at.or(position.0),
                WorkoutForm::new(distance, duration, cadence),
                &mut out,
            ),
            AddCommands::Cycling {
                at,
                distance,
                duration,
                elevation,
            } => cmd_add(
                &mut controller,
                WorkoutType::Cycling,
                at.or(position.0),
                WorkoutForm::new(distance, duration, elevation),
                &mut out,
            ),
        },
        Commands::Show { id } => cmd_show(&controller, &WorkoutId::from(id)),
        Commands::Edit {
            id,
            distance,
            duration,
            cadence,
            elevation,
        } => cmd_edit(
            &mut controller,
            &WorkoutId::from(id),
            distance,
            duration,
            ExtraFlags {
                cadence,
                elevation,
            },
            &mut out,
        ),
        Commands::Delete { id } => cmd_delete(&mut controller, &WorkoutId::from(id), &mut out),
        Commands::Sort { key } => cmd_sort(&mut controller, key, &mut out),
        Commands::Focus { id } => cmd_focus(&controller, &WorkoutId::from(id), &mut out),
        Commands::Reset => cmd_reset(&mut controller, &mut out),
    }
}

type Cmd = Controller<DirStore>;

struct Output {
    list: TerminalList,
    map: TerminalMap,
}

impl Output {
    fn new(verbose: bool) -> Self {
        Self {
            list: TerminalList,
            map: TerminalMap { verbose },
        }
    }

    fn show(&mut self, update: &Update) {
        update.apply(&mut self.list, &mut self.map);
    }
}

fn cmd_list(controller: &Cmd, startup: &Update, out: &mut Output) -> AppResult<()> {
    println!(
        "{} workout(s), sorted by {}",
        controller.workouts().len(),
        controller.sort_key()
    );
    out.show(startup);
    Ok(())
}

fn cmd_add(
    controller: &mut Cmd,
    workout_type: WorkoutType,
    coords: Option<Coords>,
    form: WorkoutForm,
    out: &mut Output,
) -> AppResult<()> {
    let coords = coords.ok_or(AppError::PositionUnavailable)?;
    let update = controller.create(workout_type, coords, &form)?;
    println!("✓ {} recorded", workout_type.label());
    out.show(&update);
    Ok(())
}

fn cmd_show(controller: &Cmd, id: &WorkoutId) -> AppResult<()> {
    match controller.open_edit(id) {
        Some(draft) => {
            println!("{} {}", draft.workout_type.icon(), draft.id);
            println!("  distance: {}", draft.form.distance);
            println!("  duration: {}", draft.form.duration);
            println!("  {}: {}", draft.workout_type.extra_field(), draft.form.extra);
        }
        None => println!("No workout with ID {}", id),
    }
    Ok(())
}

/// Type-specific edit flags; at most one is set.
struct ExtraFlags {
    cadence: Option<String>,
    elevation: Option<String>,
}

impl ExtraFlags {
    /// The value for `workout_type`'s extra field, rejecting the other type's flag.
    fn for_type(self, workout_type: WorkoutType) -> Result<Option<String>, ValidationError> {
        let (wanted, other, other_field) = match workout_type {
            WorkoutType::Running => (self.cadence, self.elevation, "elevation_gain"),
            WorkoutType::Cycling => (self.elevation, self.cadence, "cadence"),
        };
        match other {
            Some(value) => Err(ValidationError::InvalidValue {
                field: other_field,
                value,
                reason: "not a field of this workout type",
            }),
            None => Ok(wanted),
        }
    }
}

fn cmd_edit(
    controller: &mut Cmd,
    id: &WorkoutId,
    distance: Option<String>,
    duration: Option<String>,
    extra: ExtraFlags,
    out: &mut Output,
) -> AppResult<()> {
    let Some(draft) = controller.open_edit(id) else {
        println!("No workout with ID {}", id);
        return Ok(());
    };
    let extra = extra.for_type(draft.workout_type)?;
    let form = WorkoutForm {
        distance: distance.unwrap_or(draft.form.distance),
        duration: duration.unwrap_or(draft.form.duration),
        extra: extra.unwrap_or(draft.form.extra),
    };
    let update = controller.edit(id, &form)?;
    out.show(&update);
    Ok(())
}

fn cmd_delete(controller: &mut Cmd, id: &WorkoutId, out: &mut Output) -> AppResult<()> {
    let update = controller.delete(id)?;
    if update.is_empty() {
        println!("No workout with ID {}", id);
    }
    out.show(&update);
    Ok(())
}

fn cmd_sort(controller: &mut Cmd, key: SortKey, out: &mut Output) -> AppResult<()> {
    let update = controller.set_sort(key)?;
    println!("✓ Sorted by {}", key);
    out.show(&update);
    Ok(())
}

fn cmd_focus(controller: &Cmd, id: &WorkoutId, out: &mut Output) -> AppResult<()> {
    let update = controller.focus(id);
    if update.is_empty() {
        println!("Nothing to focus: map unavailable or no workout with ID {}", id);
    }
    out.show(&update);
    Ok(())
}

fn cmd_reset(controller: &mut Cmd, out: &mut Output) -> AppResult<()> {
    let update = controller.reset()?;
    println!("✓ All workouts removed");
    out.show(&update);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_coordinates() {
        let coords = parse_coords("51.5,-0.12").unwrap();
        assert_eq!(coords, Coords { lat: 51.5, lng: -0.12 });
        assert_eq!(parse_coords(" -3 , 4 ").unwrap(), Coords { lat: -3.0, lng: 4.0 });
    }

    #[test]
    fn rejects_malformed_coordinates() {
        assert!(parse_coords("51.5").is_err());
        assert!(parse_coords("north,east").is_err());
        assert!(parse_coords("inf,0").is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn extra_flag_must_match_workout_type() {
        let elevation = || ExtraFlags {
            cadence: None,
            elevation: Some("50".to_string()),
        };
        let err = elevation().for_type(WorkoutType::Running).unwrap_err();
        assert_eq!(err.field(), "elevation_gain");
        assert_eq!(
            elevation().for_type(WorkoutType::Cycling).unwrap().as_deref(),
            Some("50")
        );

        let cadence = ExtraFlags {
            cadence: Some("170".to_string()),
            elevation: None,
        };
        assert_eq!(cadence.for_type(WorkoutType::Cycling).unwrap_err().field(), "cadence");

        let neither = ExtraFlags {
            cadence: None,
            elevation: None,
        };
        assert_eq!(neither.for_type(WorkoutType::Running).unwrap(), None);
    }

    #[test]
    fn edit_rejects_both_extra_fields() {
        let parsed = Cli::try_parse_from([
            "wm-cli", "edit", "abc", "--cadence", "150", "--elevation", "20",
        ]);
        assert!(parsed.is_err());
    }
}
