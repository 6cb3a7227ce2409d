//! Schnittstelle zur Koordinatenablage des Aufrufers.

use super::{Dimension, Point};
use indexmap::IndexMap;

/// Speichert ausgeglichene Koordinaten.
///
/// Wird pro ausgeglichenem Punkt einmal aufgerufen. `dimension` gibt an, welche
/// Koordinaten des Punkts zu uebernehmen sind.
pub trait CoordinateStore {
    fn store_coordinates(&mut self, point: &Point, dimension: Dimension);
}

/// Einfache Ablage im Speicher, z.B. fuer die Kommandozeile und Tests
#[derive(Debug, Clone, Default)]
pub struct MemoryCoordinateStore {
    points: IndexMap<String, Point>,
}

impl MemoryCoordinateStore {
    /// Erstellt eine leere Ablage
    pub fn new() -> Self {
        Self::default()
    }

    /// Gespeicherte Punkte in Speicherreihenfolge
    pub fn points(&self) -> impl Iterator<Item = &Point> {
        self.points.values()
    }

    /// Sucht einen gespeicherten Punkt
    pub fn get(&self, id: &str) -> Option<&Point> {
        self.points.get(id)
    }

    /// Anzahl gespeicherter Punkte
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Ist die Ablage leer?
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl CoordinateStore for MemoryCoordinateStore {
    fn store_coordinates(&mut self, point: &Point, dimension: Dimension) {
        let entry = self
            .points
            .entry(point.id.clone())
            .or_insert_with(|| Point::new(point.id.clone()));

        if dimension.has_planar() {
            entry.easting = point.easting.or(entry.easting);
            entry.northing = point.northing.or(entry.northing);
        }
        if dimension.has_elevation() {
            entry.elevation = point.elevation.or(entry.elevation);
        }
    }
}
