//! Application-Layer: Use-Cases fuer Netzdateien und Ausgleichungslaeufe.

pub mod use_cases;

pub use use_cases::adjust::{adjust, AdjustmentOutcome};
pub use use_cases::file_io::{load_network, parse_network_toml, write_coordinates_json, LoadedNetwork};
