//! Das Netzmodell: Punkte mit Rolle und die geordnete Beobachtungsfolge.

use super::{Dimension, DirectedMeasurement, Observation, Point, PointRole, StationMarker};
use crate::error::{AdjustmentError, Result};
use indexmap::IndexMap;

/// Ein Punkt zusammen mit seiner Rolle in der Ausgleichung
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkPoint {
    /// Der Punkt selbst
    pub point: Point,
    /// Festpunkt oder Neupunkt
    pub role: PointRole,
}

/// Anzahl der Fest- und Neupunkte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoleCounts {
    pub fixed: usize,
    pub free: usize,
}

impl RoleCounts {
    /// Freies Netz: keine Festpunkte, Datum nur aus den Beobachtungen
    pub fn is_free_network(&self) -> bool {
        self.fixed == 0
    }
}

/// Ein Standpunkt mit allen ihm zugeordneten Messungen
#[derive(Debug, Clone, PartialEq)]
pub struct StationGroup<'a> {
    /// Der Standpunkt-Marker
    pub marker: &'a StationMarker,
    /// Messungen in Aufnahmereihenfolge
    pub measurements: Vec<&'a DirectedMeasurement>,
}

/// Vermessungsnetz fuer einen Ausgleichungslauf.
///
/// Die Reihenfolge der Beobachtungen ist bedeutungstragend: jede Messung gehoert zum
/// naechsten vorausgehenden Standpunkt.
#[derive(Debug, Clone)]
pub struct NetworkModel {
    dimension: Dimension,
    points: IndexMap<String, NetworkPoint>,
    observations: Vec<Observation>,
}

impl NetworkModel {
    /// Erstellt ein leeres Netz der angegebenen Dimension
    pub fn new(dimension: Dimension) -> Self {
        Self {
            dimension,
            points: IndexMap::new(),
            observations: Vec::new(),
        }
    }

    /// Dimension des Netzes
    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Fuegt einen Punkt hinzu. Eine bereits vorhandene Punktnummer bleibt unveraendert.
    pub fn add_point(&mut self, point: Point, role: PointRole) {
        if self.points.contains_key(&point.id) {
            log::debug!("Punkt {} bereits im Netz, ignoriert", point.id);
            return;
        }
        self.points
            .insert(point.id.clone(), NetworkPoint { point, role });
    }

    /// Haengt eine Beobachtung an (ohne Pruefung des Zielpunkts)
    pub fn add_observation(&mut self, observation: impl Into<Observation>) {
        self.observations.push(observation.into());
    }

    /// Entfernt die letzte Beobachtung oder den ganzen letzten Standpunkt.
    ///
    /// Mit `remove_whole_station` wird so lange entfernt, bis ein Standpunkt-Marker
    /// (inklusive) entfernt wurde oder die Folge leer ist.
    pub fn remove_last_observation(&mut self, remove_whole_station: bool) {
        while let Some(removed) = self.observations.pop() {
            if !remove_whole_station || removed.is_station() {
                break;
            }
        }
    }

    /// Punkte in Einfuegereihenfolge
    pub fn points(&self) -> impl Iterator<Item = &NetworkPoint> {
        self.points.values()
    }

    /// Sucht einen Punkt ueber seine Nummer
    pub fn point(&self, id: &str) -> Option<&NetworkPoint> {
        self.points.get(id)
    }

    /// Anzahl der Punkte
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Beobachtungsfolge
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Anzahl der Beobachtungen (inklusive Standpunkt-Marker)
    pub fn observation_count(&self) -> usize {
        self.observations.len()
    }

    /// Zaehlt Fest- und Neupunkte
    pub fn role_counts(&self) -> RoleCounts {
        self.points
            .values()
            .fold(RoleCounts::default(), |mut counts, entry| {
                match entry.role {
                    PointRole::Fixed => counts.fixed += 1,
                    PointRole::Free => counts.free += 1,
                }
                counts
            })
    }

    /// Gruppiert die Beobachtungsfolge nach Standpunkten.
    ///
    /// Eine Messung vor dem ersten Standpunkt-Marker ergibt `UngroupedObservation`.
    pub fn stations(&self) -> Result<Vec<StationGroup<'_>>> {
        let mut groups: Vec<StationGroup<'_>> = Vec::new();

        for observation in &self.observations {
            match observation {
                Observation::Station(marker) => groups.push(StationGroup {
                    marker,
                    measurements: Vec::new(),
                }),
                Observation::Measurement(measurement) => match groups.last_mut() {
                    Some(group) => group.measurements.push(measurement),
                    None => {
                        return Err(AdjustmentError::UngroupedObservation {
                            target: measurement.target_id.clone(),
                        })
                    }
                },
            }
        }

        Ok(groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measurement(target: &str) -> Observation {
        DirectedMeasurement::new(target).into()
    }

    fn ids(model: &NetworkModel) -> Vec<&str> {
        model.observations().iter().map(|o| o.point_id()).collect()
    }

    #[test]
    fn test_add_point_keeps_first() {
        let mut model = NetworkModel::new(Dimension::Two);
        model.add_point(Point::planar("1", 10.0, 20.0), PointRole::Fixed);
        model.add_point(Point::planar("1", 99.0, 99.0), PointRole::Free);

        assert_eq!(model.point_count(), 1);
        let entry = model.point("1").expect("Punkt 1 erwartet");
        assert_eq!(entry.point.easting, Some(10.0));
        assert_eq!(entry.role, PointRole::Fixed);
    }

    #[test]
    fn test_remove_single_observation() {
        let mut model = NetworkModel::new(Dimension::Two);
        model.remove_last_observation(false);
        assert_eq!(model.observation_count(), 0);

        model.add_observation(Observation::station("A", 0.0));
        model.add_observation(measurement("B"));
        model.remove_last_observation(false);
        assert_eq!(ids(&model), vec!["A"]);
    }

    #[test]
    fn test_remove_whole_station() {
        let mut model = NetworkModel::new(Dimension::Two);
        model.add_observation(Observation::station("A", 0.0));
        model.add_observation(measurement("B"));
        model.add_observation(measurement("C"));
        model.add_observation(Observation::station("D", 0.0));
        model.add_observation(measurement("E"));

        model.remove_last_observation(true);
        assert_eq!(ids(&model), vec!["A", "B", "C"]);

        model.remove_last_observation(true);
        assert_eq!(model.observation_count(), 0);

        model.remove_last_observation(true);
        assert_eq!(model.observation_count(), 0);
    }

    #[test]
    fn test_remove_whole_station_on_trailing_marker() {
        let mut model = NetworkModel::new(Dimension::Two);
        model.add_observation(Observation::station("A", 0.0));
        model.add_observation(measurement("B"));
        model.add_observation(Observation::station("D", 0.0));

        model.remove_last_observation(true);
        assert_eq!(ids(&model), vec!["A", "B"]);
    }

    #[test]
    fn test_stations_grouping() {
        let mut model = NetworkModel::new(Dimension::Two);
        model.add_observation(Observation::station("A", 1.5));
        model.add_observation(measurement("B"));
        model.add_observation(measurement("C"));
        model.add_observation(Observation::station("D", 1.6));

        let groups = model.stations().unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].marker.point_id, "A");
        assert_eq!(groups[0].measurements.len(), 2);
        assert!(groups[1].measurements.is_empty());
    }

    #[test]
    fn test_ungrouped_measurement_is_rejected() {
        let mut model = NetworkModel::new(Dimension::Two);
        model.add_observation(measurement("B"));
        model.add_observation(Observation::station("A", 0.0));

        match model.stations() {
            Err(AdjustmentError::UngroupedObservation { target }) => assert_eq!(target, "B"),
            other => panic!("UngroupedObservation erwartet, erhalten: {:?}", other),
        }
    }

    #[test]
    fn test_role_counts() {
        let mut model = NetworkModel::new(Dimension::One);
        model.add_point(Point::new("1").with_elevation(100.0), PointRole::Fixed);
        model.add_point(Point::new("2"), PointRole::Free);
        model.add_point(Point::new("3"), PointRole::Free);

        let counts = model.role_counts();
        assert_eq!(counts, RoleCounts { fixed: 1, free: 2 });
        assert!(!counts.is_free_network());
    }
}
