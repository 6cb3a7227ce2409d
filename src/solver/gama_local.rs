//! Prozess-Anbindung von gama-local ueber temporaere Austauschdateien.

use super::{AdjustmentSolver, SolverOutput};
use crate::error::{AdjustmentError, Result};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

/// Dateiname des Programms (ohne Endung)
pub const GAMA_LOCAL_PROGRAM: &str = "gama-local";
/// Standard-Zeitlimit fuer einen Lauf
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

const INPUT_FILE: &str = "network.xml";
const REPORT_FILE: &str = "report.txt";
const RESULT_FILE: &str = "result.xml";
const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Fuehrt gama-local als Kindprozess aus
#[derive(Debug, Clone)]
pub struct GamaLocalSolver {
    program: PathBuf,
    timeout: Duration,
    keep_scratch_files: bool,
}

impl GamaLocalSolver {
    /// Erstellt einen Solver fuer das angegebene Programm
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            timeout: DEFAULT_TIMEOUT,
            keep_scratch_files: false,
        }
    }

    /// Sucht gama-local und erstellt den Solver.
    ///
    /// Reihenfolge: konfigurierter Pfad, Verzeichnis der laufenden Binary, `PATH`.
    pub fn locate(configured: Option<&Path>) -> Result<Self> {
        locate_program(configured).map(Self::new)
    }

    /// Setzt das Zeitlimit; danach wird der Prozess beendet
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Austauschdateien nach dem Lauf nicht loeschen (Fehlersuche)
    pub fn with_keep_scratch_files(mut self, keep: bool) -> Self {
        self.keep_scratch_files = keep;
        self
    }

    /// Pfad des Programms
    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl AdjustmentSolver for GamaLocalSolver {
    fn run(&self, request_xml: &str) -> Result<SolverOutput> {
        if !self.program.is_file() {
            return Err(AdjustmentError::SolverUnavailable(
                self.program.display().to_string(),
            ));
        }

        let scratch = tempfile::Builder::new()
            .prefix("survey-adjust-")
            .tempdir()?;
        let input_path = scratch.path().join(INPUT_FILE);
        let report_path = scratch.path().join(REPORT_FILE);
        let result_path = scratch.path().join(RESULT_FILE);
        std::fs::write(&input_path, request_xml)?;

        log::info!(
            "Starte {} mit {}",
            self.program.display(),
            input_path.display()
        );

        let mut child = Command::new(&self.program)
            .arg(&input_path)
            .arg("--text")
            .arg(&report_path)
            .arg("--xml")
            .arg(&result_path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        let status = wait_with_timeout(&mut child, self.timeout)?;
        let exit_status = status.code().unwrap_or(-1);
        log::info!("{} beendet mit Status {}", GAMA_LOCAL_PROGRAM, exit_status);

        let output = if status.success() {
            SolverOutput {
                exit_status,
                result_xml: std::fs::read_to_string(&result_path).ok(),
                report: std::fs::read_to_string(&report_path).ok(),
            }
        } else {
            SolverOutput {
                exit_status,
                result_xml: None,
                report: None,
            }
        };

        if self.keep_scratch_files {
            let kept = scratch.keep();
            log::info!("Austauschdateien behalten in {}", kept.display());
        } else if let Err(e) = scratch.close() {
            log::warn!("Austauschdateien konnten nicht entfernt werden: {}", e);
        }

        Ok(output)
    }

    fn name(&self) -> &str {
        GAMA_LOCAL_PROGRAM
    }
}

/// Wartet auf das Prozessende; nach Ablauf von `timeout` wird der Prozess beendet
fn wait_with_timeout(child: &mut Child, timeout: Duration) -> Result<ExitStatus> {
    let started = Instant::now();
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(status);
        }

        let elapsed = started.elapsed();
        if elapsed >= timeout {
            log::warn!(
                "{} nach {:?} nicht beendet, Prozess wird abgebrochen",
                GAMA_LOCAL_PROGRAM,
                timeout
            );
            if let Err(e) = child.kill() {
                log::warn!("Prozess konnte nicht beendet werden: {}", e);
            }
            // Zombie vermeiden
            let _ = child.wait();
            return Err(AdjustmentError::SolverTimeout(timeout));
        }

        std::thread::sleep(POLL_INTERVAL.min(timeout - elapsed));
    }
}

fn locate_program(configured: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = configured {
        if path.is_file() {
            return Ok(path.to_path_buf());
        }
        return Err(AdjustmentError::SolverUnavailable(
            path.display().to_string(),
        ));
    }

    let file_names = [
        GAMA_LOCAL_PROGRAM.to_string(),
        format!("{}.exe", GAMA_LOCAL_PROGRAM),
    ];

    let mut search_dirs: Vec<PathBuf> = Vec::new();
    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        search_dirs.push(exe_dir);
    }
    if let Some(path_var) = std::env::var_os("PATH") {
        search_dirs.extend(std::env::split_paths(&path_var));
    }

    search_dirs
        .iter()
        .flat_map(|dir| file_names.iter().map(move |name| dir.join(name)))
        .find(|candidate| candidate.is_file())
        .inspect(|found| log::debug!("{} gefunden: {}", GAMA_LOCAL_PROGRAM, found.display()))
        .ok_or_else(|| AdjustmentError::SolverUnavailable(GAMA_LOCAL_PROGRAM.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_configured_program_is_unavailable() {
        let missing = Path::new("/nonexistent/dir/gama-local");
        assert!(matches!(
            GamaLocalSolver::locate(Some(missing)),
            Err(AdjustmentError::SolverUnavailable(_))
        ));
    }

    #[test]
    fn test_run_without_program_does_not_spawn() {
        let solver = GamaLocalSolver::new("/nonexistent/dir/gama-local");
        let result = solver.run("<gama-local/>");
        assert!(matches!(result, Err(AdjustmentError::SolverUnavailable(_))));
    }

    #[test]
    fn test_builder_settings() {
        let solver = GamaLocalSolver::new("/opt/gama/gama-local")
            .with_timeout(Duration::from_secs(5))
            .with_keep_scratch_files(true);
        assert_eq!(solver.program(), Path::new("/opt/gama/gama-local"));
        assert_eq!(solver.timeout, Duration::from_secs(5));
        assert!(solver.keep_scratch_files);
        assert_eq!(solver.name(), "gama-local");
    }
}
