//! Winkelwert mit Einheitenumrechnung.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Winkeleinheit fuer Ein- und Ausgabe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AngleUnit {
    /// Radiant
    Rad,
    /// Dezimalgrad
    Deg,
    /// Neugrad (400 gon = Vollkreis)
    Gon,
    /// Grad-Minuten-Sekunden als Text, z.B. `42-56-02`
    #[default]
    Dms,
}

/// Ein Winkel, intern in Radiant gespeichert
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Angle {
    rad: f64,
}

impl Angle {
    /// Erstellt einen Winkel aus Radiant
    pub fn from_rad(rad: f64) -> Self {
        Self { rad }
    }

    /// Erstellt einen Winkel aus einem Zahlenwert in der angegebenen Einheit.
    ///
    /// `AngleUnit::Dms` wird hier als Pseudo-Dezimalzahl `ddd.mmss` interpretiert;
    /// Minuten oder Sekunden ab 60 sind ein Fehler.
    pub fn from_value(value: f64, unit: AngleUnit) -> Result<Self> {
        let rad = match unit {
            AngleUnit::Rad => value,
            AngleUnit::Deg => value.to_radians(),
            AngleUnit::Gon => value * PI / 200.0,
            AngleUnit::Dms => pseudo_dms_to_deg(value)?.to_radians(),
        };
        Ok(Self { rad })
    }

    /// Parst einen Winkel aus Text in der angegebenen Einheit
    pub fn parse(text: &str, unit: AngleUnit) -> Result<Self> {
        let trimmed = text.trim();
        if unit != AngleUnit::Dms {
            let value = trimmed
                .parse::<f64>()
                .with_context(|| format!("Winkel '{}' ist keine gueltige Zahl", trimmed))?;
            return Self::from_value(value, unit);
        }

        let (negative, body) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let parts: Vec<&str> = body.split('-').collect();
        if parts.is_empty() || parts.len() > 3 || parts.iter().any(|p| p.is_empty()) {
            bail!("Ungueltiger DMS-Winkel '{}'", trimmed);
        }

        let mut fields = [0.0_f64; 3];
        for (slot, part) in fields.iter_mut().zip(&parts) {
            *slot = part
                .parse::<f64>()
                .with_context(|| format!("Ungueltiger DMS-Winkel '{}'", trimmed))?;
        }
        let [degrees, minutes, seconds] = fields;
        if minutes >= 60.0 || seconds >= 60.0 {
            bail!("Minuten/Sekunden ausserhalb 0..60 in '{}'", trimmed);
        }

        let value = degrees + minutes / 60.0 + seconds / 3600.0;
        let value = if negative { -value } else { value };
        Self::from_value(value, AngleUnit::Deg)
    }

    /// Winkel in Radiant
    pub fn rad(&self) -> f64 {
        self.rad
    }

    /// Winkel in Dezimalgrad
    pub fn deg(&self) -> f64 {
        self.rad.to_degrees()
    }

    /// Winkel in Neugrad
    pub fn gon(&self) -> f64 {
        self.rad * 200.0 / PI
    }
}

/// Zerlegt `ddd.mmss[ss..]` in Grad, Minuten und Sekunden.
///
/// Das Skalieren auf Sekunden wird auf 1e-6 gerundet, sonst wird z.B. aus
/// `10.59` durch Darstellungsfehler 10 Grad 58 Minuten 99.99 Sekunden.
fn pseudo_dms_to_deg(value: f64) -> Result<f64> {
    if !value.is_finite() {
        bail!("Winkel {} ist keine endliche Zahl", value);
    }
    let scaled = (value.abs() * 10_000.0 * 1e6).round() / 1e6;
    let degrees = (scaled / 10_000.0).trunc();
    let rest = scaled - degrees * 10_000.0;
    let minutes = (rest / 100.0).trunc();
    let seconds = rest - minutes * 100.0;
    if minutes >= 60.0 || seconds >= 60.0 {
        bail!("Minuten/Sekunden ausserhalb 0..60 in {}", value);
    }

    let deg = degrees + minutes / 60.0 + seconds / 3600.0;
    Ok(if value.is_sign_negative() { -deg } else { deg })
}
