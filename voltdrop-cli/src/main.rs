//! VoltDrop CLI - conductor sizing and path length from the command line.

use clap::{Parser, Subcommand, ValueEnum};
use std::process;
use voltdrop::geo::path_length;
use voltdrop::params::keys;
use voltdrop::prelude::*;

#[derive(Parser)]
#[command(name = "voltdrop")]
#[command(about = "Voltage-drop wire sizing and geodesic path length tool", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Size the smallest adequate conductor for a circuit run
    Size {
        /// Load current in amperes
        #[arg(long)]
        amps: String,

        /// Supply voltage in volts
        #[arg(long)]
        volts: String,

        /// One-way circuit length in meters
        #[arg(long)]
        length: String,

        /// Allowed voltage drop percentage
        #[arg(long, default_value = "3")]
        percent_drop: String,

        /// Phase count: 1 or 3
        #[arg(long, default_value = "1")]
        phase: String,

        /// Conductor material: copper or aluminum
        #[arg(long, default_value = "copper")]
        material: String,

        /// Wiring method: raceway or cable
        #[arg(long, default_value = "raceway")]
        method: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// Compute the geodesic length of a drawn path
    Length {
        /// JSON array of {"lat":..,"lng":..} vertices
        #[arg(long, value_name = "JSON", conflicts_with = "query_string")]
        path: Option<String>,

        /// Serialized application state carrying a path key
        #[arg(long, value_name = "QUERY")]
        query_string: Option<String>,
    },

    /// Normalize a serialized application state (round-trips the path)
    State {
        /// Serialized application state, e.g. "amps=15&volts=120&path=..."
        #[arg(value_name = "QUERY")]
        query: String,
    },

    /// List the wire table for a material and wiring method
    Gauges {
        /// Conductor material: copper or aluminum
        #[arg(long, default_value = "copper")]
        material: String,

        /// Wiring method: raceway or cable
        #[arg(long, default_value = "raceway")]
        method: String,
    },
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output for scripting
    Json,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Size {
            amps,
            volts,
            length,
            percent_drop,
            phase,
            material,
            method,
            format,
        } => handle_size(
            &amps,
            &volts,
            &length,
            &percent_drop,
            &phase,
            &material,
            &method,
            format,
        ),
        Commands::Length { path, query_string } => {
            handle_length(path.as_deref(), query_string.as_deref())
        }
        Commands::State { query } => handle_state(&query),
        Commands::Gauges { material, method } => handle_gauges(&material, &method),
    };

    process::exit(exit_code);
}

#[allow(clippy::too_many_arguments)]
fn handle_size(
    amps: &str,
    volts: &str,
    length: &str,
    percent_drop: &str,
    phase: &str,
    material: &str,
    method: &str,
    format: OutputFormat,
) -> i32 {
    let mut store = ParamStore::new();
    store.set(keys::AMPS, amps);
    store.set(keys::VOLTS, volts);
    store.set(keys::LENGTH, length);
    store.set(keys::PERCENTAGE_DROP, percent_drop);
    store.set(keys::PHASE, phase);
    store.set(keys::MATERIAL, material);
    store.set(keys::WIRING_METHOD, method);

    let outcome = evaluate_params(&store);

    match format {
        OutputFormat::Json => match serde_json::to_string_pretty(&outcome) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to serialize outcome: {}", e);
                return 1;
            }
        },
        OutputFormat::Human => match &outcome {
            SizingOutcome::Sized(sized) => {
                println!("Wire size:    #{}", sized.gauge);
                println!("K-factor:     {}", sized.k_factor);
                println!("Voltage drop: {:.2} V", sized.drop_volts);
            }
            SizingOutcome::NoAdequateGauge => {
                println!("Voltage drop too large: no listed conductor is adequate.");
            }
            SizingOutcome::InsufficientInput => {
                println!("Insufficient input: amps, volts, length and percent-drop must be positive numbers.");
            }
        },
    }

    match outcome {
        SizingOutcome::Sized(_) => 0,
        SizingOutcome::InsufficientInput => 2,
        SizingOutcome::NoAdequateGauge => 3,
    }
}

fn handle_length(path_json: Option<&str>, query_string: Option<&str>) -> i32 {
    let length_m = if let Some(json) = path_json {
        match serde_json::from_str::<Vec<GeoPoint>>(json) {
            Ok(path) => path_length(&path),
            Err(e) => {
                eprintln!("Invalid path JSON: {}", e);
                return 2;
            }
        }
    } else if let Some(query) = query_string {
        let params = ParamStore::from_query_string(query).shared();
        PathStore::new(params).load().length_m
    } else {
        eprintln!("Provide either --path or --query-string.");
        return 2;
    };

    println!("{:.2}", length_m);
    0
}

fn handle_state(query: &str) -> i32 {
    let params = ParamStore::from_query_string(query).shared();
    let store = PathStore::new(params.clone());
    // Re-saving the loaded state normalizes the path and length keys and
    // drops a malformed path entirely. With no path key present the
    // length may be hand-typed, so there is nothing to normalize and a
    // save would overwrite it with "0.00".
    let has_path = params
        .lock()
        .map(|guard| guard.get(keys::PATH).is_some())
        .unwrap_or(false);
    if has_path {
        let state = store.load();
        store.save(&state);
    }

    let normalized = match params.lock() {
        Ok(guard) => guard.to_query_string(),
        Err(_) => {
            eprintln!("State store poisoned.");
            return 1;
        }
    };
    println!("{}", normalized);
    0
}

fn handle_gauges(material: &str, method: &str) -> i32 {
    let material = ConductorMaterial::from_param(material);
    let method = WiringMethod::from_param(method);
    let entries = WireTable::global().entries(material, method);

    println!("K-factors for {} in {}:", material.as_str(), method.as_str());
    for entry in entries {
        println!("  #{:<4} {}", entry.gauge, entry.k);
    }
    0
}
