//! Use-Case-Funktionen fuer Dateiaktionen.
//! Alle Dateisystem-Operationen (I/O) der Kommandozeile sind hier zentralisiert.
//!
//! Netzdateien sind TOML: Punkte mit Rolle, Standpunkte mit ihren Messungen.

use crate::core::{
    AdjustmentParameters, Angle, AngleUnit, Dimension, DirectedMeasurement, Distance,
    DistanceMode, MemoryCoordinateStore, NetworkModel, Observation, Point, PointRole,
};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Geladenes Netz samt optionaler Parameter aus der Datei
#[derive(Debug, Clone)]
pub struct LoadedNetwork {
    pub model: NetworkModel,
    pub parameters: Option<AdjustmentParameters>,
}

#[derive(Debug, Deserialize)]
struct NetworkFile {
    dimension: u8,
    #[serde(default)]
    parameters: Option<AdjustmentParameters>,
    #[serde(default)]
    points: Vec<PointEntry>,
    #[serde(default)]
    stations: Vec<StationEntry>,
}

#[derive(Debug, Deserialize)]
struct PointEntry {
    #[serde(flatten)]
    point: Point,
    #[serde(default)]
    role: PointRole,
}

#[derive(Debug, Deserialize)]
struct StationEntry {
    id: String,
    #[serde(default)]
    instrument_height: f64,
    #[serde(default)]
    observations: Vec<MeasurementEntry>,
}

#[derive(Debug, Deserialize)]
struct MeasurementEntry {
    target: String,
    #[serde(default)]
    hz: Option<String>,
    #[serde(default)]
    zenith: Option<String>,
    #[serde(default)]
    angle_unit: AngleUnit,
    #[serde(default)]
    distance: Option<f64>,
    #[serde(default)]
    distance_mode: DistanceMode,
}

impl MeasurementEntry {
    fn to_measurement(&self, station: &str) -> Result<DirectedMeasurement> {
        let mut measurement = DirectedMeasurement::new(self.target.clone());
        if let Some(ref hz) = self.hz {
            let angle = Angle::parse(hz, self.angle_unit).with_context(|| {
                format!("Richtung {} -> {} ungueltig", station, self.target)
            })?;
            measurement = measurement.with_horizontal_angle(angle);
        }
        if let Some(ref zenith) = self.zenith {
            let angle = Angle::parse(zenith, self.angle_unit).with_context(|| {
                format!("Zenitwinkel {} -> {} ungueltig", station, self.target)
            })?;
            measurement = measurement.with_zenith_angle(angle);
        }
        if let Some(value) = self.distance {
            measurement = measurement.with_distance(Distance::new(value, self.distance_mode));
        }
        Ok(measurement)
    }
}

/// Parsed eine Netzdatei aus einem TOML-String
pub fn parse_network_toml(content: &str) -> Result<LoadedNetwork> {
    let file: NetworkFile = toml::from_str(content).context("Netzdatei ist kein gueltiges TOML")?;
    let dimension = Dimension::try_from(file.dimension)?;

    let mut model = NetworkModel::new(dimension);
    for entry in file.points {
        model.add_point(entry.point, entry.role);
    }

    for station in &file.stations {
        model.add_observation(Observation::station(
            station.id.clone(),
            station.instrument_height,
        ));
        for entry in &station.observations {
            model.add_observation(entry.to_measurement(&station.id)?);
        }
    }

    Ok(LoadedNetwork {
        model,
        parameters: file.parameters,
    })
}

/// Laedt eine Netzdatei
pub fn load_network(path: &Path) -> Result<LoadedNetwork> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Netzdatei {} nicht lesbar", path.display()))?;
    let loaded = parse_network_toml(&content)
        .with_context(|| format!("Fehler in Netzdatei {}", path.display()))?;

    log::info!(
        "Netz geladen: {} Punkte, {} Beobachtungen",
        loaded.model.point_count(),
        loaded.model.observation_count()
    );
    Ok(loaded)
}

/// Schreibt die ausgeglichenen Koordinaten als JSON-Liste
pub fn write_coordinates_json(store: &MemoryCoordinateStore, path: &Path) -> Result<()> {
    let points: Vec<&Point> = store.points().collect();
    let content = serde_json::to_string_pretty(&points)?;
    std::fs::write(path, content)
        .with_context(|| format!("Koordinaten nach {} nicht schreibbar", path.display()))?;
    log::info!("{} Koordinaten gespeichert nach: {}", points.len(), path.display());
    Ok(())
}
