//! survey-adjust Library.
//! Netzmodell, gama-local XML-Export/-Import und Prozess-Anbindung als Library
//! exportiert fuer Tests und Wiederverwendung in Host-Anwendungen.

pub mod app;
pub mod core;
pub mod error;
pub mod shared;
pub mod solver;
pub mod xml;

pub use app::{adjust, AdjustmentOutcome};
pub use core::{
    AdjustmentParameters, Angle, AngleUnit, CoordinateStore, Dimension, DirectedMeasurement,
    Distance, DistanceMode, MemoryCoordinateStore, NetworkModel, Observation, Point, PointRole,
    StationMarker,
};
pub use error::AdjustmentError;
pub use shared::AdjustOptions;
pub use solver::{AdjustmentSolver, GamaLocalSolver, SolverOutput};
pub use xml::{build_request, parse_adjustment_result, write_document, RequestBuilder, RoleMarking};
