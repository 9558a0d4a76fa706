//! Size a circuit from a shareable query string and print the result.

use voltdrop::prelude::*;

fn main() {
    let query = std::env::args().nth(1).unwrap_or_else(|| {
        "amps=50&volts=240&length=50&percentage_drop=3&phase=1&material=copper&wiring_method=raceway"
            .to_string()
    });

    let store = ParamStore::from_query_string(&query);
    match evaluate_params(&store) {
        SizingOutcome::Sized(sized) => {
            println!("Wire size: #{}", sized.gauge);
            println!("K-factor:  {}", sized.k_factor);
            println!("Voltage drop: {:.2} V", sized.drop_volts);
        }
        SizingOutcome::NoAdequateGauge => {
            println!("Voltage drop too large: no listed conductor is adequate.");
        }
        SizingOutcome::InsufficientInput => {
            println!("Missing or unusable inputs; need amps, volts, length and percentage_drop.");
            eprintln!("Usage: cargo run --example size_a_circuit ['amps=..&volts=..&length=..&percentage_drop=..']");
        }
    }
}
