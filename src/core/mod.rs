//! Core-Domaenentypen: Punkte, Winkel, Beobachtungen, Netzmodell.

pub mod angle;
pub mod network;
pub mod observation;
pub mod parameters;
pub mod point;
pub mod store;

pub use angle::{Angle, AngleUnit};
pub use network::{NetworkModel, NetworkPoint, RoleCounts, StationGroup};
pub use observation::{DirectedMeasurement, Distance, DistanceMode, Observation, StationMarker};
pub use parameters::{AdjustmentParameters, Dimension};
pub use point::{Point, PointRole};
pub use store::{CoordinateStore, MemoryCoordinateStore};
