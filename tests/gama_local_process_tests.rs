//! Integration-Tests fuer die Prozess-Anbindung.
//! Ein Shell-Skript ersetzt gama-local und simuliert Erfolg, Fehler und Haenger.
#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use survey_adjust::{
    adjust, AdjustmentError, AdjustmentParameters, AdjustmentSolver, Dimension,
    GamaLocalSolver, MemoryCoordinateStore, NetworkModel, Observation, Point, PointRole,
    RoleMarking,
};
use tempfile::TempDir;

// Skripte nicht schreiben, waehrend ein anderer Test einen Prozess startet (ETXTBSY)
static SPAWN_LOCK: Mutex<()> = Mutex::new(());

const RESULT_XML: &str = r#"<?xml version="1.0"?>
<gama-local-adjustment version="2.0">
  <coordinates>
    <adjusted>
      <point><id>1</id><Y>0.001</Y><X>-0.002</X></point>
      <point><id>2</id><Y>211.699</Y><X>0.003</X></point>
    </adjusted>
  </coordinates>
</gama-local-adjustment>
"#;

/// Schreibt ein ausfuehrbares Skript; Argumente: $1 Eingabe, $3 Protokoll, $5 Ergebnis
fn write_script(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("gama-local");
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).expect("Skript schreiben");
    let mut perms = std::fs::metadata(&path).expect("Metadaten").permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).expect("Rechte setzen");
    path
}

fn small_network() -> NetworkModel {
    let mut model = NetworkModel::new(Dimension::Two);
    model.add_point(Point::planar("1", 0.0, 0.0), PointRole::Free);
    model.add_point(Point::planar("2", 211.7, 0.0), PointRole::Free);
    model.add_observation(Observation::station("1", 0.0));
    model
}

fn run_adjust(
    solver: &GamaLocalSolver,
    store: &mut MemoryCoordinateStore,
) -> survey_adjust::error::Result<survey_adjust::AdjustmentOutcome> {
    adjust(
        &small_network(),
        &AdjustmentParameters::default(),
        RoleMarking::default(),
        solver,
        store,
    )
}

#[test]
fn test_successful_run_reads_both_artifacts_and_cleans_up() {
    let _guard = SPAWN_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let dir = TempDir::new().expect("Temp-Verzeichnis erwartet");
    let marker = dir.path().join("input_path.txt");
    let copy = dir.path().join("request_copy.xml");
    let script = write_script(
        dir.path(),
        &format!(
            "echo \"$1\" > '{marker}'\ncp \"$1\" '{copy}'\n\
             [ \"$2\" = \"--text\" ] || exit 3\n[ \"$4\" = \"--xml\" ] || exit 4\n\
             cat > \"$5\" <<'EOF'\n{RESULT_XML}EOF\necho 'Protokoll OK' > \"$3\"\nexit 0",
            marker = marker.display(),
            copy = copy.display(),
        ),
    );

    let solver = GamaLocalSolver::new(&script).with_timeout(Duration::from_secs(30));
    let mut store = MemoryCoordinateStore::new();
    let outcome = run_adjust(&solver, &mut store).expect("Lauf sollte gelingen");

    assert_eq!(outcome.report.trim(), "Protokoll OK");
    assert_eq!(outcome.updated_points, 2);
    assert_eq!(
        store.get("2").and_then(|p| p.planar_coordinates()),
        Some((211.699, 0.003))
    );

    let request = std::fs::read_to_string(&copy).expect("Anfrage-Kopie erwartet");
    assert!(request.contains("<obs from=\"1\"/>"));
    assert!(request.contains("adj=\"XY\""));

    // Austauschverzeichnis ist nach dem Lauf entfernt
    let input_path = std::fs::read_to_string(&marker).expect("Marker erwartet");
    let scratch_dir = Path::new(input_path.trim())
        .parent()
        .expect("Eingabedatei liegt in einem Verzeichnis");
    assert!(!scratch_dir.exists());
}

#[test]
fn test_nonzero_exit_status_is_reported_without_parsing() {
    let _guard = SPAWN_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let dir = TempDir::new().expect("Temp-Verzeichnis erwartet");
    let script = write_script(
        dir.path(),
        &format!("cat > \"$5\" <<'EOF'\n{RESULT_XML}EOF\necho fehler > \"$3\"\nexit 1"),
    );

    let solver = GamaLocalSolver::new(&script);
    let mut store = MemoryCoordinateStore::new();
    let result = run_adjust(&solver, &mut store);

    assert!(matches!(
        result,
        Err(AdjustmentError::SolverExecutionFailed(1))
    ));
    assert!(store.is_empty());

    let output = solver.run("<gama-local/>").expect("Prozess sollte laufen");
    assert_eq!(output.exit_status, 1);
    assert_eq!(output.result_xml, None);
    assert_eq!(output.report, None);
}

#[test]
fn test_hanging_solver_is_killed_after_timeout() {
    let _guard = SPAWN_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let dir = TempDir::new().expect("Temp-Verzeichnis erwartet");
    let script = write_script(dir.path(), "exec sleep 30");

    let solver = GamaLocalSolver::new(&script).with_timeout(Duration::from_millis(200));
    let started = Instant::now();
    let result = solver.run("<gama-local/>");

    assert!(matches!(result, Err(AdjustmentError::SolverTimeout(_))));
    assert!(started.elapsed() < Duration::from_secs(10));
}

#[test]
fn test_missing_outputs_yield_empty_report() {
    let _guard = SPAWN_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let dir = TempDir::new().expect("Temp-Verzeichnis erwartet");
    let script = write_script(dir.path(), "exit 0");

    let solver = GamaLocalSolver::new(&script);
    let mut store = MemoryCoordinateStore::new();
    let outcome = run_adjust(&solver, &mut store).expect("Lauf sollte gelingen");

    assert_eq!(outcome.report, "");
    assert!(!outcome.adjusted_section_found);
    assert!(store.is_empty());
}

#[test]
fn test_locate_configured_program() {
    let _guard = SPAWN_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let dir = TempDir::new().expect("Temp-Verzeichnis erwartet");
    let script = write_script(dir.path(), "exit 0");

    let solver =
        GamaLocalSolver::locate(Some(script.as_path())).expect("Programm sollte gefunden werden");
    assert_eq!(solver.program(), script.as_path());
}
