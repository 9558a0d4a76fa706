//! Wire Constants Table
//!
//! Static reference data mapping {material, wiring method, gauge} to a
//! per-unit-length K-factor, plus temperature-rating correction
//! multipliers. The table is loaded once from an embedded JSON file and
//! never mutated.
//!
//! Within a column (fixed material and method) entries are ordered
//! thinnest conductor first, so K-factors strictly decrease down the
//! column: a thicker wire always drops less voltage.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

// Embedded as a fallback-free data source; users size circuits against
// the same table the tests pin down.
const EMBEDDED_WIRE_TABLE: &str = include_str!("../../tables/wire_k_factors.json");

/// Conductor material of the circuit run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConductorMaterial {
    Copper,
    Aluminum,
}

impl ConductorMaterial {
    /// Parse a query-parameter value with the calculator's default.
    /// Anything other than `"aluminum"` is treated as copper.
    pub fn from_param(value: &str) -> Self {
        match value.trim() {
            "aluminum" => ConductorMaterial::Aluminum,
            _ => ConductorMaterial::Copper,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConductorMaterial::Copper => "copper",
            ConductorMaterial::Aluminum => "aluminum",
        }
    }
}

/// How the conductors are installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WiringMethod {
    Raceway,
    Cable,
}

impl WiringMethod {
    /// Parse a query-parameter value; anything other than `"cable"` is
    /// treated as raceway.
    pub fn from_param(value: &str) -> Self {
        match value.trim() {
            "cable" => WiringMethod::Cable,
            _ => WiringMethod::Raceway,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WiringMethod::Raceway => "raceway",
            WiringMethod::Cable => "cable",
        }
    }
}

/// Number of AC phases in the circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Single,
    Three,
}

impl Phase {
    /// Parse a query-parameter value; anything other than `"3"` is
    /// treated as single phase.
    pub fn from_param(value: &str) -> Self {
        match value.trim() {
            "3" => Phase::Three,
            _ => Phase::Single,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Single => "1",
            Phase::Three => "3",
        }
    }
}

/// Insulation/temperature rating class for the correction multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TempRating {
    T60,
    T75,
    T90,
}

/// Correction multiplier applied once per computation against the
/// required K-factor. T90 is the table's baseline rating.
pub fn correction_factor(rating: TempRating) -> f64 {
    match rating {
        TempRating::T60 => 0.88,
        TempRating::T75 => 0.95,
        TempRating::T90 => 1.0,
    }
}

/// One table row: a gauge identifier and its K-factor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireEntry {
    pub gauge: String,
    pub k: f64,
}

#[derive(Debug, Clone, Deserialize)]
struct MethodColumns {
    raceway: Vec<WireEntry>,
    cable: Vec<WireEntry>,
}

/// Immutable K-factor table for all material/method combinations.
#[derive(Debug, Clone, Deserialize)]
pub struct WireTable {
    copper: MethodColumns,
    aluminum: MethodColumns,
}

static WIRE_TABLE: OnceLock<WireTable> = OnceLock::new();

impl WireTable {
    /// The process-wide table, parsed from the embedded JSON on first use.
    ///
    /// The embedded table is validated by the test suite; a parse failure
    /// here means a corrupted build, so it is not a recoverable error.
    pub fn global() -> &'static WireTable {
        WIRE_TABLE.get_or_init(|| {
            let mut table: WireTable = serde_json::from_str(EMBEDDED_WIRE_TABLE)
                .unwrap_or_else(|e| panic!("embedded wire table is invalid JSON: {}", e));
            table.sort_columns();
            tracing::debug!(
                "wire table loaded: {} copper raceway entries",
                table.copper.raceway.len()
            );
            table
        })
    }

    /// Entries for a material/method column, thinnest gauge (largest K)
    /// first.
    pub fn entries(&self, material: ConductorMaterial, method: WiringMethod) -> &[WireEntry] {
        let columns = match material {
            ConductorMaterial::Copper => &self.copper,
            ConductorMaterial::Aluminum => &self.aluminum,
        };
        match method {
            WiringMethod::Raceway => &columns.raceway,
            WiringMethod::Cable => &columns.cable,
        }
    }

    // The JSON ships pre-sorted; re-sorting keeps the descending-K
    // selection invariant independent of the data file's row order.
    fn sort_columns(&mut self) {
        for column in [
            &mut self.copper.raceway,
            &mut self.copper.cable,
            &mut self.aluminum.raceway,
            &mut self.aluminum.cable,
        ] {
            column.sort_by(|a, b| b.k.total_cmp(&a.k));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_loads() {
        let table = WireTable::global();
        assert!(!table.entries(ConductorMaterial::Copper, WiringMethod::Raceway).is_empty());
    }

    #[test]
    fn test_columns_strictly_descending() {
        let table = WireTable::global();
        for material in [ConductorMaterial::Copper, ConductorMaterial::Aluminum] {
            for method in [WiringMethod::Raceway, WiringMethod::Cable] {
                let entries = table.entries(material, method);
                for pair in entries.windows(2) {
                    assert!(
                        pair[0].k > pair[1].k,
                        "{}/{}: {} ({}) should exceed {} ({})",
                        material.as_str(),
                        method.as_str(),
                        pair[0].k,
                        pair[0].gauge,
                        pair[1].k,
                        pair[1].gauge
                    );
                }
            }
        }
    }

    #[test]
    fn test_aluminum_less_conductive_than_copper() {
        let table = WireTable::global();
        let copper = table.entries(ConductorMaterial::Copper, WiringMethod::Raceway);
        let aluminum = table.entries(ConductorMaterial::Aluminum, WiringMethod::Raceway);
        for (cu, al) in copper.iter().zip(aluminum.iter()) {
            assert_eq!(cu.gauge, al.gauge);
            assert!(al.k > cu.k, "gauge {}: aluminum K should exceed copper", cu.gauge);
        }
    }

    #[test]
    fn test_param_parsing_defaults() {
        assert_eq!(ConductorMaterial::from_param("aluminum"), ConductorMaterial::Aluminum);
        assert_eq!(ConductorMaterial::from_param("copper"), ConductorMaterial::Copper);
        assert_eq!(ConductorMaterial::from_param("steel"), ConductorMaterial::Copper);
        assert_eq!(ConductorMaterial::from_param(""), ConductorMaterial::Copper);

        assert_eq!(WiringMethod::from_param("cable"), WiringMethod::Cable);
        assert_eq!(WiringMethod::from_param("raceway"), WiringMethod::Raceway);
        assert_eq!(WiringMethod::from_param("conduit"), WiringMethod::Raceway);

        assert_eq!(Phase::from_param("3"), Phase::Three);
        assert_eq!(Phase::from_param("1"), Phase::Single);
        assert_eq!(Phase::from_param("2"), Phase::Single);
        assert_eq!(Phase::from_param(""), Phase::Single);
    }

    #[test]
    fn test_correction_factors() {
        assert_eq!(correction_factor(TempRating::T90), 1.0);
        assert!(correction_factor(TempRating::T75) < 1.0);
        assert!(correction_factor(TempRating::T60) < correction_factor(TempRating::T75));
    }
}
