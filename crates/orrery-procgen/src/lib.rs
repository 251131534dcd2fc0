//! Orrery Procgen - Procedural mesh generation
//!
//! Deterministic geometry built without file I/O, currently the subdivided
//! icosphere.

mod icosphere;

pub use icosphere::Icosphere;
