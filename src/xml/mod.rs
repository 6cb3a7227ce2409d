//! XML Import/Export fuer GNU Gama (gama-local).
//!
//! Export: Netzmodell → Dokumentbaum → XML-Text.
//! Import: Ergebnis-XML → ausgeglichene Punkte.

pub mod document;
pub mod request;
pub mod result;
pub mod writer;

pub use document::{XmlDocument, XmlElement, XmlNode};
pub use request::{build_request, LetterCase, RequestBuilder, RoleMarking};
pub use result::{apply_adjusted_points, parse_adjustment_result, AdjustmentResult};
pub use writer::write_document;
