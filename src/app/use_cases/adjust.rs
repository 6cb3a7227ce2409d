//! Use-Case: einen kompletten Ausgleichungslauf durchfuehren.
//!
//! Ablauf: Netz pruefen und Anfrage bauen → gama-local ausfuehren → Status pruefen →
//! Ergebnis parsen → Koordinaten uebergeben. Der Lauf blockiert bis zum Ende.

use crate::core::{AdjustmentParameters, CoordinateStore, NetworkModel};
use crate::error::{AdjustmentError, Result};
use crate::solver::AdjustmentSolver;
use crate::xml::{self, RequestBuilder, RoleMarking};

/// Ergebnis eines erfolgreichen Laufs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdjustmentOutcome {
    /// Textprotokoll von gama-local (unveraendert)
    pub report: String,
    /// Ob die Ergebnisdatei einen `<adjusted>`-Abschnitt enthielt
    pub adjusted_section_found: bool,
    /// Anzahl an die Ablage uebergebener Punkte
    pub updated_points: usize,
    /// Nicht ausgewertete Orientierungen
    pub ignored_orientations: usize,
}

/// Gleicht das Netz aus und uebergibt die neuen Koordinaten an `store`.
///
/// Ein ausgleichbares Netz braucht mindestens einen Neupunkt und eine Beobachtung,
/// sonst wird der Solver gar nicht erst gestartet. Bei Exit-Status ungleich 0 wird
/// nichts geparst und `store` nicht aufgerufen.
pub fn adjust(
    model: &NetworkModel,
    parameters: &AdjustmentParameters,
    role_marking: RoleMarking,
    solver: &dyn AdjustmentSolver,
    store: &mut dyn CoordinateStore,
) -> Result<AdjustmentOutcome> {
    let document = RequestBuilder::new(model, parameters)
        .with_role_marking(role_marking)
        .build()?;
    let request_xml = xml::write_document(&document);

    log::info!(
        "Ausgleichung mit {}: {} Punkte, {} Beobachtungen, {}D",
        solver.name(),
        model.point_count(),
        model.observation_count(),
        model.dimension().as_u8()
    );

    let output = solver.run(&request_xml)?;
    if !output.succeeded() {
        log::error!(
            "{} fehlgeschlagen (Status {})",
            solver.name(),
            output.exit_status
        );
        return Err(AdjustmentError::SolverExecutionFailed(output.exit_status));
    }

    let report = output.report.unwrap_or_else(|| {
        log::warn!("{} hat kein Textprotokoll erzeugt", solver.name());
        String::new()
    });

    let Some(result_xml) = output.result_xml else {
        log::warn!("{} hat keine Ergebnisdatei erzeugt", solver.name());
        return Ok(AdjustmentOutcome {
            report,
            ..AdjustmentOutcome::default()
        });
    };

    let result = xml::parse_adjustment_result(&result_xml)
        .map_err(|e| AdjustmentError::MalformedResult(format!("{e:#}")))?;

    if result.ignored_orientations > 0 {
        log::warn!(
            "Teilweise ausgewertet: {} Orientierungen werden nicht uebernommen",
            result.ignored_orientations
        );
    }

    let updated_points = xml::apply_adjusted_points(&result, model.dimension(), store);
    if result.adjusted.is_none() {
        log::info!("Kein <adjusted>-Abschnitt im Ergebnis, nur Protokoll");
    } else {
        log::info!("{} Punkte ausgeglichen", updated_points);
    }

    Ok(AdjustmentOutcome {
        report,
        adjusted_section_found: result.adjusted.is_some(),
        updated_points,
        ignored_orientations: result.ignored_orientations,
    })
}
