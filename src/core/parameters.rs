//! Netzdimension und netzweite Ausgleichungsparameter.

use crate::error::AdjustmentError;
use serde::{Deserialize, Serialize};

/// Dimension des Netzes. Bestimmt, welche Koordinaten gelesen und geschrieben werden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    /// Hoehennetz
    One,
    /// Lagenetz
    Two,
    /// Raeumliches Netz
    Three,
}

impl Dimension {
    /// Anzahl der Koordinatenachsen
    pub fn as_u8(self) -> u8 {
        match self {
            Dimension::One => 1,
            Dimension::Two => 2,
            Dimension::Three => 3,
        }
    }

    /// Achsbuchstaben in gama-local-Notation (Kleinschreibung)
    pub fn axis_letters(self) -> &'static str {
        match self {
            Dimension::One => "z",
            Dimension::Two => "xy",
            Dimension::Three => "xyz",
        }
    }

    /// Enthaelt die Dimension Lagekoordinaten?
    pub fn has_planar(self) -> bool {
        matches!(self, Dimension::Two | Dimension::Three)
    }

    /// Enthaelt die Dimension Hoehen?
    pub fn has_elevation(self) -> bool {
        matches!(self, Dimension::One | Dimension::Three)
    }
}

impl TryFrom<u8> for Dimension {
    type Error = AdjustmentError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Dimension::One),
            2 => Ok(Dimension::Two),
            3 => Ok(Dimension::Three),
            other => Err(AdjustmentError::UnsupportedDimension(other)),
        }
    }
}

impl From<Dimension> for u8 {
    fn from(dimension: Dimension) -> Self {
        dimension.as_u8()
    }
}

/// Netzweite A-priori-Genauigkeiten und Konfidenzniveau
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjustmentParameters {
    /// Wahrscheinlichkeit fuer Konfidenzbereiche
    pub probability: f64,
    /// Standardabweichung der Richtungen (cc)
    pub stdev_angle: f64,
    /// Konstanter Anteil der Streckengenauigkeit (mm)
    pub stdev_dist: f64,
    /// Streckenproportionaler Anteil (mm/km)
    pub stdev_dist1: f64,
}

impl Default for AdjustmentParameters {
    fn default() -> Self {
        Self {
            probability: 0.95,
            stdev_angle: 3.0,
            stdev_dist: 3.0,
            stdev_dist1: 3.0,
        }
    }
}
