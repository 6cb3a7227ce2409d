//! Netzpunkte und ihre Rolle in der Ausgleichung.

use serde::{Deserialize, Serialize};

/// Ein Vermessungspunkt mit optionalen Koordinaten.
///
/// Die Koordinaten sind unabhaengig voneinander optional: ein 1D-Netz braucht nur
/// die Hoehe, ein 2D-Netz Rechts- und Hochwert, ein 3D-Netz alle drei.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Punktnummer (eindeutig im Netz)
    pub id: String,
    /// Rechtswert (Easting)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub easting: Option<f64>,
    /// Hochwert (Northing)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub northing: Option<f64>,
    /// Hoehe
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation: Option<f64>,
}

impl Point {
    /// Erstellt einen Punkt ohne Koordinaten
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            easting: None,
            northing: None,
            elevation: None,
        }
    }

    /// Erstellt einen Lagepunkt (Rechtswert, Hochwert)
    pub fn planar(id: impl Into<String>, easting: f64, northing: f64) -> Self {
        Self {
            easting: Some(easting),
            northing: Some(northing),
            ..Self::new(id)
        }
    }

    /// Erstellt einen Hoehenpunkt
    pub fn with_elevation(mut self, elevation: f64) -> Self {
        self.elevation = Some(elevation);
        self
    }

    /// Liefert (Rechtswert, Hochwert) nur wenn beide vorhanden sind
    pub fn planar_coordinates(&self) -> Option<(f64, f64)> {
        match (self.easting, self.northing) {
            (Some(e), Some(n)) => Some((e, n)),
            _ => None,
        }
    }
}

/// Rolle eines Punkts in der Ausgleichung
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointRole {
    /// Festpunkt: Koordinaten sind bekannte Zwangsbedingungen
    Fixed,
    /// Neupunkt: Koordinaten sind Unbekannte
    #[default]
    Free,
}
