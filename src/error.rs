//! Fehlertypen eines Ausgleichungslaufs.

use std::time::Duration;

/// Abbruchgruende fuer `adjust()`.
///
/// Alle Varianten beenden einen Lauf endgueltig; es wird nicht automatisch wiederholt.
#[derive(Debug, thiserror::Error)]
pub enum AdjustmentError {
    #[error("Netz nicht ausgleichbar: {free_points} Neupunkte, {observations} Beobachtungen")]
    DegenerateNetwork {
        free_points: usize,
        observations: usize,
    },

    #[error("Messung zu Punkt '{target}' ohne vorausgehenden Standpunkt")]
    UngroupedObservation { target: String },

    #[error("Nicht unterstuetzte Netzdimension: {0}")]
    UnsupportedDimension(u8),

    #[error("Ausgleichungsprogramm nicht gefunden: {0}")]
    SolverUnavailable(String),

    #[error("Ausgleichungsprogramm mit Status {0} beendet")]
    SolverExecutionFailed(i32),

    #[error("Ausgleichungsprogramm nach {0:?} abgebrochen")]
    SolverTimeout(Duration),

    #[error("Ergebnisdatei fehlerhaft: {0}")]
    MalformedResult(String),

    #[error("Ein-/Ausgabefehler: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AdjustmentError>;
