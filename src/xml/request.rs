//! Aufbau des gama-local Eingabedokuments aus einem Netzmodell.

use super::document::{XmlDocument, XmlElement};
use super::writer::format_value;
use crate::core::{AdjustmentParameters, Dimension, NetworkModel, NetworkPoint, PointRole};
use crate::error::{AdjustmentError, Result};
use serde::{Deserialize, Serialize};

/// Kommentar am Dokumentanfang
pub const REQUEST_COMMENT: &str = "Gama XML created by survey-adjust";

/// Gross- oder Kleinschreibung der Achsbuchstaben
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LetterCase {
    Upper,
    Lower,
}

impl LetterCase {
    fn apply(self, letters: &str) -> String {
        match self {
            LetterCase::Upper => letters.to_uppercase(),
            LetterCase::Lower => letters.to_lowercase(),
        }
    }
}

/// Schreibweise der Rollen-Attribute (`fix`/`adj`) im gama-local-Protokoll.
///
/// gama-local unterscheidet ueber die Schreibweise zwischen Neupunkten im freien Netz
/// (Grossbuchstaben, Datum ueber die Beobachtungen) und Neupunkten im angeschlossenen
/// Netz (Kleinbuchstaben).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleMarking {
    /// Festpunkte
    pub fixed: LetterCase,
    /// Neupunkte in einem Netz mit mindestens einem Festpunkt
    pub constrained: LetterCase,
    /// Neupunkte in einem freien Netz
    pub free_network: LetterCase,
}

impl Default for RoleMarking {
    fn default() -> Self {
        Self {
            fixed: LetterCase::Lower,
            constrained: LetterCase::Lower,
            free_network: LetterCase::Upper,
        }
    }
}

impl RoleMarking {
    /// Attributname und -wert fuer einen Punkt
    pub fn attribute(
        &self,
        role: PointRole,
        dimension: Dimension,
        free_network: bool,
    ) -> (&'static str, String) {
        let letters = dimension.axis_letters();
        match role {
            PointRole::Fixed => ("fix", self.fixed.apply(letters)),
            PointRole::Free if free_network => ("adj", self.free_network.apply(letters)),
            PointRole::Free => ("adj", self.constrained.apply(letters)),
        }
    }
}

/// Baut das Eingabedokument fuer gama-local
#[derive(Debug, Clone)]
pub struct RequestBuilder<'a> {
    model: &'a NetworkModel,
    parameters: &'a AdjustmentParameters,
    role_marking: RoleMarking,
}

impl<'a> RequestBuilder<'a> {
    /// Erstellt einen Builder mit Standard-Rollenschreibweise
    pub fn new(model: &'a NetworkModel, parameters: &'a AdjustmentParameters) -> Self {
        Self {
            model,
            parameters,
            role_marking: RoleMarking::default(),
        }
    }

    /// Ersetzt die Rollenschreibweise
    pub fn with_role_marking(mut self, role_marking: RoleMarking) -> Self {
        self.role_marking = role_marking;
        self
    }

    /// Erzeugt das Dokument oder meldet, warum das Netz nicht ausgleichbar ist
    pub fn build(&self) -> Result<XmlDocument> {
        let counts = self.model.role_counts();
        let observations = self.model.observation_count();
        if counts.free == 0 || observations == 0 {
            return Err(AdjustmentError::DegenerateNetwork {
                free_points: counts.free,
                observations,
            });
        }

        let free_network = counts.is_free_network();
        let dimension = self.model.dimension();
        let stations = self.model.stations()?;

        log::debug!(
            "Baue {}D-Anfrage: {} Festpunkte, {} Neupunkte, {} Standpunkte, freies Netz: {}",
            dimension.as_u8(),
            counts.fixed,
            counts.free,
            stations.len(),
            free_network
        );

        let mut points_observations = self.points_observations_element();

        for entry in self.model.points() {
            points_observations.push(self.point_element(entry, free_network));
        }

        for station in &stations {
            let mut obs = XmlElement::new("obs").with_attr("from", &station.marker.point_id);

            match dimension {
                Dimension::Two => {
                    for measurement in &station.measurements {
                        if let Some(angle) = measurement.horizontal_angle {
                            obs.push(
                                XmlElement::new("direction")
                                    .with_attr("to", &measurement.target_id)
                                    .with_attr("val", format_value(angle.gon())),
                            );
                        }
                        if measurement.distance.is_some() {
                            match measurement.horizontal_distance() {
                                Some(hd) => obs.push(
                                    XmlElement::new("distance")
                                        .with_attr("to", &measurement.target_id)
                                        .with_attr("val", format_value(hd)),
                                ),
                                None => log::debug!(
                                    "Strecke {} -> {} nicht horizontal reduzierbar, ausgelassen",
                                    station.marker.point_id,
                                    measurement.target_id
                                ),
                            }
                        }
                    }
                }
                Dimension::One | Dimension::Three => {
                    if !station.measurements.is_empty() {
                        log::debug!(
                            "{}D-Messungen von Standpunkt {} werden nicht exportiert",
                            dimension.as_u8(),
                            station.marker.point_id
                        );
                    }
                }
            }

            points_observations.push(obs);
        }

        let mut network = XmlElement::new("network")
            .with_attr("axes-xy", "ne")
            .with_attr("angles", "left-handed");
        network.push(
            XmlElement::new("description")
                .with_text(format!("GNU Gama {}D network", dimension.as_u8())),
        );
        network.push(self.parameters_element());
        network.push(points_observations);

        let mut root = XmlElement::new("gama-local").with_attr("version", "2.0");
        root.push(network);

        Ok(XmlDocument {
            comment: Some(REQUEST_COMMENT.to_string()),
            root,
        })
    }

    fn parameters_element(&self) -> XmlElement {
        XmlElement::new("parameters")
            .with_attr("sigma-apr", "1")
            .with_attr("conf-pr", format_value(self.parameters.probability))
            .with_attr("tol-abs", "1000")
            .with_attr("sigma-act", "aposteriori")
            .with_attr("update-constrained-coordinates", "yes")
    }

    fn points_observations_element(&self) -> XmlElement {
        let p = self.parameters;
        XmlElement::new("points-observations")
            .with_attr(
                "distance-stdev",
                format!("{} {}", format_value(p.stdev_dist), format_value(p.stdev_dist1)),
            )
            .with_attr("direction-stdev", format_value(p.stdev_angle))
            .with_attr("angle-stdev", format_value((p.stdev_angle * 2.0).sqrt()))
            .with_attr("zenith-angle-stdev", format_value(p.stdev_angle))
    }

    fn point_element(&self, entry: &NetworkPoint, free_network: bool) -> XmlElement {
        let dimension = self.model.dimension();
        let point = &entry.point;
        let mut element = XmlElement::new("point").with_attr("id", &point.id);

        if dimension.has_planar() {
            if let Some((easting, northing)) = point.planar_coordinates() {
                element.set_attr("y", format_value(easting));
                element.set_attr("x", format_value(northing));
            }
        }
        if dimension.has_elevation() {
            if let Some(elevation) = point.elevation {
                element.set_attr("z", format_value(elevation));
            }
        }

        let (key, value) = self
            .role_marking
            .attribute(entry.role, dimension, free_network);
        element.set_attr(key, value);
        element
    }
}

/// Kurzform: Dokument mit Standard-Rollenschreibweise bauen
pub fn build_request(
    model: &NetworkModel,
    parameters: &AdjustmentParameters,
) -> Result<XmlDocument> {
    RequestBuilder::new(model, parameters).build()
}
