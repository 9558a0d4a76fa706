//! VoltDrop - voltage-drop conductor sizing and map-measured circuit length
//!
//! This library answers two questions for an electrician planning a
//! circuit run:
//!
//! - given the load, supply, length and installation, what is the
//!   smallest safe wire gauge? (the sizing engine, table-driven)
//! - how long is the run, measured by drawing it on a map instead of
//!   typing it? (the path editor, kept in sync with shareable state)
//!
//! # Quick Start
//!
//! ```
//! use voltdrop::core::{evaluate_params, SizingOutcome};
//! use voltdrop::params::ParamStore;
//!
//! let store = ParamStore::from_query_string(
//!     "amps=15&volts=120&length=10&percentage_drop=3&phase=1",
//! );
//! match evaluate_params(&store) {
//!     SizingOutcome::Sized(sized) => println!("#{} ({:.2} V drop)", sized.gauge, sized.drop_volts),
//!     SizingOutcome::NoAdequateGauge => println!("voltage drop too large for any listed wire"),
//!     SizingOutcome::InsufficientInput => println!("fill in the remaining fields"),
//! }
//! ```
//!
//! # Features
//!
//! - **Sizing engine**: K-factor method, copper/aluminum, raceway/cable,
//!   single and three phase
//! - **Path editing**: gesture-driven polyline with geodesic length,
//!   persisted to a bookmarkable query string
//! - **Place search**: optional HTTP text lookup to recenter the map

pub mod core;
pub mod geo;
pub mod geocode;
pub mod map;
pub mod params;
pub mod path;
pub mod sizing;

// Re-export main types
pub use crate::core::{evaluate_params, parse_optional_positive, SizedCircuit, SizingOutcome};
pub use crate::geo::{path_length, GeoPoint};
pub use crate::params::ParamStore;
pub use crate::path::{EditorMode, PathEditor, PathState, PathStore};
pub use crate::sizing::engine::{select_gauge, GaugeSelection, SizingRequest};
pub use crate::sizing::table::{ConductorMaterial, Phase, WireTable, WiringMethod};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        evaluate_params, ConductorMaterial, EditorMode, GeoPoint, ParamStore, PathEditor,
        PathState, PathStore, Phase, SizedCircuit, SizingOutcome, SizingRequest, WireTable,
        WiringMethod,
    };
}
