//! Beobachtungen: Standpunkt-Marker und gerichtete Messungen.

use super::Angle;
use serde::{Deserialize, Serialize};

/// Art der gemessenen Strecke
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DistanceMode {
    /// Schraegstrecke
    #[default]
    #[serde(rename = "SD")]
    Slope,
    /// Horizontalstrecke
    #[serde(rename = "HD")]
    Horizontal,
    /// Hoehenunterschied
    #[serde(rename = "VD")]
    Vertical,
}

/// Gemessene Strecke mit Reduktionsart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Distance {
    /// Streckenwert in Metern
    pub value: f64,
    /// Art der Strecke
    pub mode: DistanceMode,
}

impl Distance {
    /// Erstellt eine Strecke
    pub fn new(value: f64, mode: DistanceMode) -> Self {
        Self { value, mode }
    }
}

/// Standpunkt: alle folgenden Messungen wurden von diesem Punkt aus gemessen
#[derive(Debug, Clone, PartialEq)]
pub struct StationMarker {
    /// Punktnummer des Standpunkts
    pub point_id: String,
    /// Instrumentenhoehe
    pub instrument_height: f64,
}

/// Gerichtete Messung zu einem Zielpunkt
#[derive(Debug, Clone, PartialEq)]
pub struct DirectedMeasurement {
    /// Punktnummer des Zielpunkts
    pub target_id: String,
    /// Horizontalrichtung
    pub horizontal_angle: Option<Angle>,
    /// Zenitwinkel
    pub zenith_angle: Option<Angle>,
    /// Strecke
    pub distance: Option<Distance>,
}

impl DirectedMeasurement {
    /// Erstellt eine Messung ohne Messwerte
    pub fn new(target_id: impl Into<String>) -> Self {
        Self {
            target_id: target_id.into(),
            horizontal_angle: None,
            zenith_angle: None,
            distance: None,
        }
    }

    /// Setzt die Horizontalrichtung
    pub fn with_horizontal_angle(mut self, angle: Angle) -> Self {
        self.horizontal_angle = Some(angle);
        self
    }

    /// Setzt den Zenitwinkel
    pub fn with_zenith_angle(mut self, angle: Angle) -> Self {
        self.zenith_angle = Some(angle);
        self
    }

    /// Setzt die Strecke
    pub fn with_distance(mut self, distance: Distance) -> Self {
        self.distance = Some(distance);
        self
    }

    /// Reduziert die gemessene Strecke auf die Horizontale.
    ///
    /// Schraegstrecken brauchen einen Zenitwinkel, Hoehenunterschiede liefern nie
    /// eine Horizontalstrecke.
    pub fn horizontal_distance(&self) -> Option<f64> {
        let distance = self.distance?;
        match distance.mode {
            DistanceMode::Horizontal => Some(distance.value),
            DistanceMode::Slope => self
                .zenith_angle
                .map(|zenith| distance.value * zenith.rad().sin()),
            DistanceMode::Vertical => None,
        }
    }
}

/// Eintrag der Beobachtungsfolge
#[derive(Debug, Clone, PartialEq)]
pub enum Observation {
    /// Beginn eines neuen Standpunkts
    Station(StationMarker),
    /// Messung vom zuletzt begonnenen Standpunkt
    Measurement(DirectedMeasurement),
}

impl Observation {
    /// Erstellt einen Standpunkt-Marker
    pub fn station(point_id: impl Into<String>, instrument_height: f64) -> Self {
        Observation::Station(StationMarker {
            point_id: point_id.into(),
            instrument_height,
        })
    }

    /// Prueft ob der Eintrag ein Standpunkt-Marker ist
    pub fn is_station(&self) -> bool {
        matches!(self, Observation::Station(_))
    }

    /// Punktnummer, auf die sich der Eintrag bezieht
    pub fn point_id(&self) -> &str {
        match self {
            Observation::Station(station) => &station.point_id,
            Observation::Measurement(measurement) => &measurement.target_id,
        }
    }
}

impl From<DirectedMeasurement> for Observation {
    fn from(measurement: DirectedMeasurement) -> Self {
        Observation::Measurement(measurement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::AngleUnit;
    use approx::assert_relative_eq;

    #[test]
    fn test_horizontal_distance_from_slope() {
        let measurement = DirectedMeasurement::new("2")
            .with_zenith_angle(Angle::from_value(60.0, AngleUnit::Deg).unwrap())
            .with_distance(Distance::new(100.0, DistanceMode::Slope));
        let hd = measurement.horizontal_distance().expect("Horizontalstrecke erwartet");
        assert_relative_eq!(hd, 100.0 * 60.0_f64.to_radians().sin(), epsilon = 1e-12);
    }

    #[test]
    fn test_slope_without_zenith_is_not_reducible() {
        let measurement =
            DirectedMeasurement::new("2").with_distance(Distance::new(100.0, DistanceMode::Slope));
        assert_eq!(measurement.horizontal_distance(), None);
    }

    #[test]
    fn test_horizontal_and_vertical_modes() {
        let hd = DirectedMeasurement::new("2")
            .with_distance(Distance::new(12.5, DistanceMode::Horizontal));
        assert_eq!(hd.horizontal_distance(), Some(12.5));

        let vd = DirectedMeasurement::new("2")
            .with_zenith_angle(Angle::from_value(100.0, AngleUnit::Gon).unwrap())
            .with_distance(Distance::new(1.2, DistanceMode::Vertical));
        assert_eq!(vd.horizontal_distance(), None);
    }
}
