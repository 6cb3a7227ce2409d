//! Anbindung des externen Ausgleichungsprogramms.
//!
//! Die Ausgleichung selbst ist eine Blackbox: Eingabedokument rein, Exit-Status,
//! Ergebnis-XML und Textprotokoll raus.

pub mod gama_local;

pub use gama_local::GamaLocalSolver;

use crate::error::Result;

/// Rohergebnis eines Programmlaufs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolverOutput {
    /// Exit-Status des Programms (-1 bei Abbruch durch Signal)
    pub exit_status: i32,
    /// Inhalt der Ergebnis-XML, falls erzeugt
    pub result_xml: Option<String>,
    /// Inhalt des Textprotokolls, falls erzeugt
    pub report: Option<String>,
}

impl SolverOutput {
    /// Lauf erfolgreich beendet?
    pub fn succeeded(&self) -> bool {
        self.exit_status == 0
    }
}

/// Fuehrt eine Ausgleichung fuer ein serialisiertes Eingabedokument aus
pub trait AdjustmentSolver {
    /// Startet den Lauf und wartet auf sein Ende
    fn run(&self, request_xml: &str) -> Result<SolverOutput>;

    /// Name fuer Log-Ausgaben
    fn name(&self) -> &str;
}
