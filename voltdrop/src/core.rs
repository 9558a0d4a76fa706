//! Calculator orchestration shared by GUI glue and CLI.
//!
//! Validates the raw textual parameters before the sizing engine ever
//! runs, so "insufficient input" is an explicit state instead of a NaN
//! leaking through arithmetic, and "no adequate gauge" stays distinct
//! from bad input.

use serde::Serialize;

use crate::params::{keys, ParamStore};
use crate::sizing::engine::{
    select_gauge, voltage_drop_from_k, SizingRequest,
};
use crate::sizing::table::{ConductorMaterial, Phase, WiringMethod};

/// Parse a user-entered numeric field.
///
/// Empty, non-numeric, non-finite and non-positive values all mean the
/// field is not usable; the distinction does not matter to the
/// calculator, only "usable positive number or not".
pub fn parse_optional_positive(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() && n > 0.0 => Some(n),
        _ => None,
    }
}

/// A sized circuit: the selected gauge and its realized drop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SizedCircuit {
    pub gauge: String,
    pub k_factor: f64,
    /// Actual drop in volts for the selected gauge, which may be
    /// strictly less than the requested maximum.
    pub drop_volts: f64,
}

/// Outcome of one calculator evaluation.
///
/// All three variants are expected states, not errors; the two failure
/// shapes must be presented differently to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SizingOutcome {
    /// One or more numeric inputs missing or unusable; nothing was
    /// computed.
    InsufficientInput,
    /// Inputs were valid but even the thickest listed conductor exceeds
    /// the allowed drop.
    NoAdequateGauge,
    Sized(SizedCircuit),
}

/// Size a circuit from already-validated inputs.
pub fn evaluate(request: &SizingRequest) -> SizingOutcome {
    match select_gauge(request) {
        Some(selection) => {
            let drop_volts = voltage_drop_from_k(
                selection.k_factor,
                request.current,
                request.length,
                request.phase,
            );
            SizingOutcome::Sized(SizedCircuit {
                gauge: selection.gauge,
                k_factor: selection.k_factor,
                drop_volts,
            })
        }
        None => SizingOutcome::NoAdequateGauge,
    }
}

/// Evaluate the calculator against the shared parameter store.
///
/// Reads the same keys the form writes (`amps`, `volts`, `length`,
/// `percentage_drop`, and the enum-like fields with their defaults) so
/// a bookmarked query string is a complete calculator state. The
/// `length` value may equally come from manual entry or from the path
/// editor's last save; the engine cannot tell and does not care.
pub fn evaluate_params(params: &ParamStore) -> SizingOutcome {
    let current = params.get(keys::AMPS).and_then(|v| parse_optional_positive(v));
    let voltage = params.get(keys::VOLTS).and_then(|v| parse_optional_positive(v));
    let length = params.get(keys::LENGTH).and_then(|v| parse_optional_positive(v));
    let percent_drop = params
        .get(keys::PERCENTAGE_DROP)
        .and_then(|v| parse_optional_positive(v));

    let (Some(current), Some(voltage), Some(length), Some(percent_drop)) =
        (current, voltage, length, percent_drop)
    else {
        return SizingOutcome::InsufficientInput;
    };

    let phase = Phase::from_param(params.get(keys::PHASE).unwrap_or(""));
    let material = ConductorMaterial::from_param(params.get(keys::MATERIAL).unwrap_or(""));
    let method = WiringMethod::from_param(params.get(keys::WIRING_METHOD).unwrap_or(""));

    evaluate(&SizingRequest {
        percent_drop,
        voltage,
        current,
        length,
        phase,
        method,
        material,
    })
}
