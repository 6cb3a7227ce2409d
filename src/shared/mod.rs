//! Geteilte Typen fuer modul-uebergreifende Vertraege.

pub mod options;

pub use options::AdjustOptions;
pub use options::{OPTIONS_FILE_NAME, SOLVER_TIMEOUT_SECS};
