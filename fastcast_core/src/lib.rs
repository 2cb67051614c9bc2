#![forbid(unsafe_code)]

//! Core domain model and simulation engine for the fastcast system.
//!
//! This crate provides:
//! - Domain types (profiles, ketosis phases, simulation state, results)
//! - The metabolic phase simulation engine (resolver, classifier,
//!   partitioner, weekly driver, aggregator)
//! - Input validation at the engine boundary
//! - Persistence (profile store, run journal, CSV/JSON export)

pub mod types;
pub mod error;
pub mod validate;
pub mod config;
pub mod logging;
pub mod params;
pub mod phases;
pub mod partition;
pub mod driver;
pub mod engine;
pub mod profile;
pub mod journal;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use params::{resolve, SimulationParams};
pub use phases::{classify, PhaseResult};
pub use partition::{partition_energy, BodyFatMode, HourDelta};
pub use driver::{run_week, WeekOutcome, HOURS_PER_WEEK};
pub use engine::{run_forecast, weeks_to_goal};
pub use profile::sample_profile;
pub use journal::{ForecastRun, JsonlSink, RunSink};
pub use export::{write_forecast_json, write_weekly_csv};
