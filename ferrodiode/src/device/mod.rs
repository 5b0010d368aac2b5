//! Controls the construction and storage of the layered device structure,
//! and the `MaterialInfoDesk` trait which yields the material information necessary
//! to run a calculation

/// The info-desk trait and the built-in material table
pub mod info_desk;
/// Deserialization of device description files
pub mod reader;
/// The immutable layer stack and its builder
pub mod stack;

pub use info_desk::{Material, MaterialDatabase, MaterialInfoDesk};
pub use reader::Device;
pub use stack::{Layer, LayerRole, LayerStack, LayerStackBuilder, StandardStructure};
