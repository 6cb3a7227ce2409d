//! Zentrale Konfiguration fuer survey-adjust.
//!
//! `AdjustOptions` enthaelt alle zur Laufzeit aenderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use crate::core::AdjustmentParameters;
use crate::solver::GamaLocalSolver;
use crate::xml::RoleMarking;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Standard-Zeitlimit fuer gama-local in Sekunden.
pub const SOLVER_TIMEOUT_SECS: u64 = 300;
/// Dateiname der Optionen-Datei neben der Binary.
pub const OPTIONS_FILE_NAME: &str = "survey_adjust.toml";

/// Alle zur Laufzeit aenderbaren Optionen.
/// Wird als `survey_adjust.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjustOptions {
    // ── Solver ──────────────────────────────────────────────────
    /// Expliziter Pfad zu gama-local (sonst Suche neben Binary und im PATH)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solver_path: Option<PathBuf>,
    /// Zeitlimit fuer einen Lauf in Sekunden
    pub solver_timeout_secs: u64,
    /// Austauschdateien nach dem Lauf behalten
    pub keep_scratch_files: bool,

    // ── Protokoll ───────────────────────────────────────────────
    /// Schreibweise der fix/adj-Attribute
    pub role_marking: RoleMarking,

    // ── Ausgleichung ────────────────────────────────────────────
    /// Standardparameter, wenn die Netzdatei keine eigenen angibt
    pub parameters: AdjustmentParameters,
}

impl Default for AdjustOptions {
    fn default() -> Self {
        Self {
            solver_path: None,
            solver_timeout_secs: SOLVER_TIMEOUT_SECS,
            keep_scratch_files: false,
            role_marking: RoleMarking::default(),
            parameters: AdjustmentParameters::default(),
        }
    }
}

impl AdjustOptions {
    /// Laedt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("survey-adjust"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join(OPTIONS_FILE_NAME)
    }

    /// Zeitlimit als `Duration`
    pub fn solver_timeout(&self) -> Duration {
        Duration::from_secs(self.solver_timeout_secs)
    }

    /// Sucht gama-local gemaess den Optionen und konfiguriert den Solver.
    pub fn solver(&self) -> crate::error::Result<GamaLocalSolver> {
        Ok(GamaLocalSolver::locate(self.solver_path.as_deref())?
            .with_timeout(self.solver_timeout())
            .with_keep_scratch_files(self.keep_scratch_files))
    }
}
