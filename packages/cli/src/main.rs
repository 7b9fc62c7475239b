#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for jurisdiction lookups and beat auto-assignment.
//!
//! Every command prints JSON on stdout; logs go to stderr and are
//! controlled with `RUST_LOG`.

mod input;

use std::path::PathBuf;

use beat_roster_assignment::{AutoAssignScheduler, RuleSet, SchedulerConfig, registry};
use beat_roster_geography_models::Coordinate;
use beat_roster_spatial::{
    JurisdictionIndex, JurisdictionMatch, NearestFacility, load_facilities, nearest, within_radius,
};
use clap::{Parser, Subcommand};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "beat_roster", about = "Beat jurisdiction and welfare visit assignment tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a point to its station, beat, district, sub-division and range
    Resolve {
        /// Directory holding `station.geojson`, `beat.geojson`, ... layer files
        #[arg(long)]
        boundaries: PathBuf,
        /// Latitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        /// Longitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
        /// Also report the nearest facility from this JSON file
        #[arg(long)]
        facilities: Option<PathBuf>,
    },
    /// Find the nearest police station or post to a point
    Nearest {
        /// JSON array of `{id, name, coordinates: {lat, lng}}`
        #[arg(long)]
        facilities: PathBuf,
        /// Latitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        /// Longitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
        /// List every facility within this many kilometres instead
        #[arg(long)]
        radius_km: Option<f64>,
    },
    /// Assign the unassigned roster backlog to beats with spare capacity
    Schedule {
        /// JSON array of roster items
        #[arg(long)]
        roster: PathBuf,
        /// JSON array of beats with their capacity counters
        #[arg(long)]
        beats: PathBuf,
        /// TOML rule file (defaults to the embedded `default` rule set)
        #[arg(long)]
        rules: Option<PathBuf>,
        /// TOML file with a `[scheduler]` table
        #[arg(long)]
        config: Option<PathBuf>,
        /// Run time as RFC 3339 (defaults to the current time)
        #[arg(long)]
        now: Option<String>,
    },
    /// Print a rule set in evaluation order
    Rules {
        /// TOML rule file (defaults to the embedded `default` rule set)
        #[arg(long)]
        rules: Option<PathBuf>,
    },
}

/// Output of the `resolve` command.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResolveReport<'a> {
    point: Coordinate,
    jurisdiction: JurisdictionMatch<'a>,
    nearest_facility: Option<NearestFacility<'a>>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve {
            boundaries,
            lat,
            lng,
            facilities,
        } => {
            let point = input::coordinate(lat, lng)?;
            let index = JurisdictionIndex::load_dir(&boundaries)?;
            let jurisdiction = index.resolve(point);

            let facilities = facilities.map(|path| load_facilities(&path)).transpose()?;
            let nearest_facility = facilities
                .as_deref()
                .and_then(|facilities| nearest(point, facilities));

            print_json(&ResolveReport {
                point,
                jurisdiction,
                nearest_facility,
            })?;
        }
        Commands::Nearest {
            facilities,
            lat,
            lng,
            radius_km,
        } => {
            let point = input::coordinate(lat, lng)?;
            let facilities = load_facilities(&facilities)?;

            if let Some(radius_km) = radius_km {
                print_json(&within_radius(point, &facilities, radius_km))?;
            } else {
                let found = nearest(point, &facilities);
                if found.is_none() {
                    log::warn!("No facilities to search");
                }
                print_json(&found)?;
            }
        }
        Commands::Schedule {
            roster,
            beats,
            rules,
            config,
            now,
        } => {
            let rules = load_rules(rules.as_deref())?;
            let config = config
                .as_deref()
                .map(SchedulerConfig::load)
                .transpose()?
                .unwrap_or_default();
            let now = input::parse_now(now.as_deref())?;

            let items = input::load_roster(&roster)?;
            let beats = input::load_beats(&beats)?;
            log::info!(
                "Loaded {} roster items and {} beats",
                items.len(),
                beats.len()
            );

            let outcome =
                AutoAssignScheduler::new(rules, config).schedule_with_outcome(&items, &beats, now)?;
            print_json(&outcome)?;
        }
        Commands::Rules { rules } => {
            let rules = load_rules(rules.as_deref())?;
            print_json(&rules.rules())?;
        }
    }

    Ok(())
}

fn load_rules(path: Option<&std::path::Path>) -> Result<RuleSet, Box<dyn std::error::Error>> {
    Ok(match path {
        Some(path) => RuleSet::load(path)?,
        None => {
            log::info!("Using embedded default rule set");
            registry::default_rules()
        }
    })
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_definitions_are_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn negative_coordinates_parse() {
        let cli = Cli::try_parse_from([
            "beat_roster",
            "nearest",
            "--facilities",
            "stations.json",
            "--lat",
            "-33.86",
            "--lng",
            "151.21",
        ])
        .unwrap();

        match cli.command {
            Commands::Nearest { lat, radius_km, .. } => {
                assert!((lat + 33.86).abs() < f64::EPSILON);
                assert!(radius_km.is_none());
            }
            _ => panic!("expected nearest"),
        }
    }

    #[test]
    fn schedule_optional_paths_default_to_none() {
        let cli = Cli::try_parse_from([
            "beat_roster",
            "schedule",
            "--roster",
            "roster.json",
            "--beats",
            "beats.json",
        ])
        .unwrap();

        match cli.command {
            Commands::Schedule {
                rules, config, now, ..
            } => {
                assert!(rules.is_none());
                assert!(config.is_none());
                assert!(now.is_none());
            }
            _ => panic!("expected schedule"),
        }
    }

    #[test]
    fn missing_required_argument_is_rejected() {
        assert!(Cli::try_parse_from(["beat_roster", "schedule", "--roster", "roster.json"]).is_err());
    }

    #[test]
    fn rules_without_a_path_use_the_embedded_set() {
        let rules = load_rules(None).unwrap();
        assert_eq!(rules.rules(), registry::default_rules().rules());
    }
}
