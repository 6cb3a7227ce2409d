//! Use-Cases der Application-Layer-Orchestrierung.

pub mod adjust;
pub mod file_io;
