//! Sizing Engine
//!
//! Pure calculation layer over the wire table. Converts a circuit's
//! electrical parameters into the maximum admissible K-factor and
//! resolves it to the smallest adequate gauge, or reports that no
//! listed conductor keeps the drop within bound.
//!
//! The engine holds no state and is referentially transparent; input
//! validation (positive finite numerics) is the caller's job, see
//! [`crate::core`].

use serde::Serialize;

use crate::sizing::table::{
    correction_factor, ConductorMaterial, Phase, TempRating, WireTable, WiringMethod,
};

/// Three-phase circuits use sqrt(3) to three decimals. The constant is
/// applied identically in both directions of the calculation, so a
/// gauge's reported drop always stays consistent with its selection.
pub const THREE_PHASE_FACTOR: f64 = 1.732;

/// Phase multiplier in the K-factor relation.
pub fn phase_factor(phase: Phase) -> f64 {
    match phase {
        Phase::Single => 2.0,
        Phase::Three => THREE_PHASE_FACTOR,
    }
}

/// Validated inputs for a single sizing computation.
#[derive(Debug, Clone, Copy)]
pub struct SizingRequest {
    /// Allowed voltage drop as a percentage of supply voltage, in (0, 100].
    pub percent_drop: f64,
    /// Supply voltage in volts, positive.
    pub voltage: f64,
    /// Load current in amperes, positive.
    pub current: f64,
    /// One-way circuit length in meters, positive.
    pub length: f64,
    pub phase: Phase,
    pub method: WiringMethod,
    pub material: ConductorMaterial,
}

/// The selected gauge and its table K-factor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GaugeSelection {
    pub gauge: String,
    pub k_factor: f64,
}

/// Maximum per-unit-length K-factor a conductor may exhibit while the
/// drop stays within `voltage_drop` volts.
///
/// `K = drop * 1000 / (f * I * L)` with `f = 2` single phase,
/// `f = 1.732` three phase.
pub fn required_k_factor(voltage_drop: f64, current: f64, length: f64, phase: Phase) -> f64 {
    (voltage_drop * 1000.0) / (phase_factor(phase) * current * length)
}

/// Actual voltage drop in volts for a conductor with the given K-factor.
///
/// Inverse of [`required_k_factor`]; the drop reported for a selected
/// gauge may be strictly less than the requested maximum.
pub fn voltage_drop_from_k(k_factor: f64, current: f64, length: f64, phase: Phase) -> f64 {
    (k_factor * phase_factor(phase) * current * length) / 1000.0
}

/// Select the smallest adequate conductor for the request.
///
/// Scans the (descending-K) table column for the material/method pair
/// and returns the first entry whose K-factor does not exceed the
/// allowed maximum, i.e. the thinnest wire that still keeps the drop
/// within bound. `None` means even the thickest listed gauge drops too
/// much voltage; callers must surface that distinctly from invalid
/// input.
pub fn select_gauge(request: &SizingRequest) -> Option<GaugeSelection> {
    let voltage_drop = request.voltage * request.percent_drop / 100.0;
    let max_k = required_k_factor(voltage_drop, request.current, request.length, request.phase)
        * correction_factor(TempRating::T90);

    let entries = WireTable::global().entries(request.material, request.method);
    entries
        .iter()
        .find(|entry| entry.k <= max_k)
        .map(|entry| GaugeSelection {
            gauge: entry.gauge.clone(),
            k_factor: entry.k,
        })
}
