use clap::{Parser, Subcommand};
use fastcast_core::*;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "fastcast")]
#[command(about = "Intermittent fasting body-composition forecaster", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a forecast from the stored profile (default)
    Forecast {
        /// Profile file to use instead of the stored one
        #[arg(long)]
        profile: Option<PathBuf>,

        /// Override the number of weeks to simulate
        #[arg(long)]
        weeks: Option<u32>,

        /// Goal weight in kg; reports the first week at or below it
        #[arg(long)]
        goal_weight: Option<f64>,

        /// Write the full forecast as JSON
        #[arg(long)]
        json: Option<PathBuf>,

        /// Write the weekly trajectory as CSV
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Record this run in the forecast journal
        #[arg(long)]
        save: bool,
    },

    /// Write a sample profile to the data directory
    Init {
        /// Overwrite an existing profile
        #[arg(long)]
        force: bool,
    },

    /// List recent forecast runs from the journal
    History {
        /// Days of history to show
        #[arg(long, default_value_t = 30)]
        days: i64,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    fastcast_core::logging::init();

    let cli = Cli::parse();

    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());

    match cli.command {
        Some(Commands::Forecast {
            profile,
            weeks,
            goal_weight,
            json,
            csv,
            save,
        }) => cmd_forecast(data_dir, profile, weeks, goal_weight, json, csv, save),
        Some(Commands::Init { force }) => cmd_init(data_dir, force, &config),
        Some(Commands::History { days }) => cmd_history(data_dir, days),
        None => {
            // Default to "forecast" command
            cmd_forecast(data_dir, None, None, None, None, None, false)
        }
    }
}

fn profile_path(data_dir: &Path) -> PathBuf {
    data_dir.join("profile.json")
}

fn journal_path(data_dir: &Path) -> PathBuf {
    data_dir.join("journal").join("runs.jsonl")
}

#[allow(clippy::too_many_arguments)]
fn cmd_forecast(
    data_dir: PathBuf,
    profile: Option<PathBuf>,
    weeks: Option<u32>,
    goal_weight: Option<f64>,
    json: Option<PathBuf>,
    csv: Option<PathBuf>,
    save: bool,
) -> Result<()> {
    let path = profile.unwrap_or_else(|| profile_path(&data_dir));
    let mut request = ForecastRequest::load(&path)?;
    tracing::debug!("Loaded profile from {:?}", path);

    if let Some(weeks) = weeks {
        request.weeks = weeks;
    }

    let forecast = run_forecast(&request)?;
    display_forecast(&forecast);

    if let Some(goal_kg) = goal_weight {
        match weeks_to_goal(&forecast, goal_kg) {
            Some(0) => println!("  Goal {:.1} kg: already reached at start", goal_kg),
            Some(week) => println!("  Goal {:.1} kg: reached in week {}", goal_kg, week),
            None => println!(
                "  Goal {:.1} kg: not reached within {} weeks",
                goal_kg, forecast.summary.total_weeks
            ),
        }
        println!();
    }

    if let Some(ref json_path) = json {
        write_forecast_json(json_path, &forecast)?;
        println!("✓ Forecast JSON written to {}", json_path.display());
    }

    if let Some(ref csv_path) = csv {
        write_weekly_csv(csv_path, &forecast)?;
        println!("✓ Weekly CSV written to {}", csv_path.display());
    }

    if save {
        let run = ForecastRun::from_forecast(&forecast);
        let mut sink = JsonlSink::new(journal_path(&data_dir));
        sink.append(&run)?;
        println!("✓ Run recorded in journal ({})", run.id);
    }

    Ok(())
}

fn cmd_init(data_dir: PathBuf, force: bool, config: &Config) -> Result<()> {
    let path = profile_path(&data_dir);

    if path.exists() && !force {
        eprintln!(
            "Profile already exists at {} (use --force to overwrite)",
            path.display()
        );
        return Err(Error::Other("profile already exists".into()));
    }

    let mut sample = sample_profile();
    sample.weeks = config.simulation.default_weeks;
    sample.save(&path)?;

    println!("✓ Sample profile written to {}", path.display());
    println!("  Edit it with your numbers, then run `fastcast forecast`.");
    Ok(())
}

fn cmd_history(data_dir: PathBuf, days: i64) -> Result<()> {
    let runs = fastcast_core::journal::recent_runs(&journal_path(&data_dir), days)?;

    if runs.is_empty() {
        println!("No forecast runs recorded in the last {} days.", days);
        return Ok(());
    }

    println!("Forecast runs (last {} days):", days);
    for run in &runs {
        let age_days = (chrono::Utc::now() - run.created_at).num_days();
        println!(
            "  {}  {} week(s)  {:.1} kg -> {:.1} kg  ({} day(s) ago)",
            run.created_at.format("%Y-%m-%d %H:%M"),
            run.weeks,
            run.initial_weight_kg,
            run.final_weight_kg,
            age_days
        );
    }

    Ok(())
}

fn display_forecast(forecast: &Forecast) {
    let initial = &forecast.initial_stats;
    let summary = &forecast.summary;

    println!("\n╭─────────────────────────────────────────╮");
    println!("│  FASTING FORECAST");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!(
        "  Start: {:.1} kg at {:.1}% body fat",
        initial.weight_kg, initial.body_fat_percent
    );
    println!(
        "  BMR {:.0} kcal/day · TDEE {:.0} kcal/day",
        initial.bmr, initial.daily_tdee
    );
    println!();
    println!("  Week   Weight   BodyFat   FatLost   LeanLost   Dominant phase");

    for result in &forecast.weekly_results {
        println!(
            "  {:>4}  {:>6.1}  {:>7.1}%  {:>7.3}  {:>8.3}   {}",
            result.week,
            result.weight_kg,
            result.body_fat_percent,
            result.fat_loss_kg,
            result.ffm_loss_kg,
            result.dominant_phase.label()
        );
    }

    println!();
    println!(
        "  Final: {:.1} kg at {:.1}% body fat after {} week(s)",
        summary.final_weight_kg, summary.final_body_fat_percent, summary.total_weeks
    );
    println!(
        "  Lost: {:.1} kg total ({:.1} kg fat, {:.1} kg lean)",
        summary.total_weight_lost_kg, summary.total_fat_lost_kg, summary.total_ffm_lost_kg
    );
    println!();
}
