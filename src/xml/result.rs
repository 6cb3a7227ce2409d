//! Parser fuer das XML-Ergebnis von gama-local.

use crate::core::{CoordinateStore, Dimension, Point};
use anyhow::{bail, Context, Result};
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::Event;
use quick_xml::Reader;

/// Ausgeglichene Punkte aus der Ergebnisdatei
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdjustmentResult {
    /// Punkte des ersten `<adjusted>`-Abschnitts; `None` wenn es keinen gibt
    pub adjusted: Option<Vec<Point>>,
    /// Anzahl uebergangener `<orientation>`-Eintraege
    pub ignored_orientations: usize,
}

/// Parsed eine gama-local Ergebnisdatei aus einem XML-String
pub fn parse_adjustment_result(xml_content: &str) -> Result<AdjustmentResult> {
    let mut reader = Reader::from_str(xml_content);
    // Nicht trimmen: Entities teilen den Text in mehrere Events, Leerzeichen
    // an den Teilgrenzen gehoeren zum Wert. Getrimmt wird der ganze Feldinhalt.
    reader.config_mut().trim_text(false);

    let mut buffer = Vec::new();

    let mut adjusted: Option<Vec<Point>> = None;
    let mut in_adjusted = false;
    let mut in_point = false;
    let mut current_tag: Option<String> = None;
    let mut current_text = String::new();
    let mut current_point: Option<PointFields> = None;
    let mut ignored_orientations = 0usize;

    loop {
        match reader.read_event_into(&mut buffer) {
            Ok(Event::Start(ref e)) => {
                let name = e.name();
                let tag = reader.decoder().decode(name.as_ref())?;

                if tag == "adjusted" && adjusted.is_none() {
                    in_adjusted = true;
                    adjusted = Some(Vec::new());
                } else if tag == "orientation" {
                    ignored_orientations += 1;
                } else if in_adjusted && tag == "point" {
                    in_point = true;
                    current_point = Some(PointFields::default());
                } else if in_point {
                    current_tag = Some(tag.to_string());
                    current_text.clear();
                }
            }
            Ok(Event::Empty(ref e)) => {
                let name = e.name();
                let tag = reader.decoder().decode(name.as_ref())?;
                if tag == "adjusted" && adjusted.is_none() {
                    adjusted = Some(Vec::new());
                } else if tag == "orientation" {
                    ignored_orientations += 1;
                }
            }
            Ok(Event::Text(e)) => {
                if in_point && current_tag.is_some() {
                    current_text.push_str(&e.xml_content()?);
                }
            }
            Ok(Event::GeneralRef(e)) => {
                if in_point && current_tag.is_some() {
                    if let Some(ch) = e.resolve_char_ref()? {
                        current_text.push(ch);
                    } else {
                        let entity = e.decode()?;
                        let resolved = resolve_predefined_entity(&entity)
                            .with_context(|| format!("Unbekannte Entity &{};", entity))?;
                        current_text.push_str(resolved);
                    }
                }
            }
            Ok(Event::End(ref e)) => {
                let name = e.name();
                let tag = reader.decoder().decode(name.as_ref())?;
                if in_adjusted && tag == "adjusted" {
                    in_adjusted = false;
                } else if in_point && tag == "point" {
                    in_point = false;
                    current_tag = None;
                    if let (Some(fields), Some(points)) = (current_point.take(), adjusted.as_mut()) {
                        points.push(fields.into_point()?);
                    }
                } else if current_tag.as_deref() == Some(tag.as_ref()) {
                    if let Some(fields) = current_point.as_mut() {
                        fields.assign(&tag, &current_text)?;
                    }
                    current_tag = None;
                    current_text.clear();
                }
            }
            Ok(Event::Eof) => break,
            Err(err) => return Err(err).context("Fehler beim Parsen der Ergebnisdatei"),
            _ => {}
        }

        buffer.clear();
    }

    if in_adjusted {
        bail!("Abschnitt <adjusted> nicht geschlossen");
    }

    Ok(AdjustmentResult {
        adjusted,
        ignored_orientations,
    })
}

/// Uebergibt alle ausgeglichenen Punkte an die Koordinatenablage.
///
/// Liefert die Anzahl der uebergebenen Punkte.
pub fn apply_adjusted_points(
    result: &AdjustmentResult,
    dimension: Dimension,
    store: &mut dyn CoordinateStore,
) -> usize {
    let Some(points) = result.adjusted.as_ref() else {
        return 0;
    };

    for point in points {
        log::debug!(
            "Ausgeglichen: {} (y={:?}, x={:?}, z={:?})",
            point.id,
            point.easting,
            point.northing,
            point.elevation
        );
        store.store_coordinates(point, dimension);
    }

    points.len()
}

#[derive(Debug, Default)]
struct PointFields {
    id: Option<String>,
    easting: Option<f64>,
    northing: Option<f64>,
    elevation: Option<f64>,
}

impl PointFields {
    fn assign(&mut self, tag: &str, text: &str) -> Result<()> {
        match tag {
            "id" => self.id = Some(text.trim().to_string()),
            "y" | "Y" => self.easting = Some(parse_coordinate(tag, text)?),
            "x" | "X" => self.northing = Some(parse_coordinate(tag, text)?),
            "z" | "Z" => self.elevation = Some(parse_coordinate(tag, text)?),
            _ => {}
        }
        Ok(())
    }

    fn into_point(self) -> Result<Point> {
        let id = self
            .id
            .filter(|id| !id.is_empty())
            .context("Ausgeglichener Punkt ohne <id>")?;
        Ok(Point {
            id,
            easting: self.easting,
            northing: self.northing,
            elevation: self.elevation,
        })
    }
}

fn parse_coordinate(tag: &str, text: &str) -> Result<f64> {
    let trimmed = text.trim();
    let value = trimmed
        .parse::<f64>()
        .with_context(|| format!("Koordinate <{}> '{}' ist keine gueltige Zahl", tag, trimmed))?;
    if !value.is_finite() {
        bail!("Koordinate <{}> muss endlich sein", tag);
    }
    Ok(value)
}
