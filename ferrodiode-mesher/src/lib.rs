//! One-dimensional meshes for piecewise homogeneous layered structures.
//!
//! A layered device is described by the widths of its regions. The mesher distributes a fixed
//! number of cells over those regions in proportion to their width, placing a vertex exactly on
//! every region boundary so that no material interface is smeared by the discretisation.

mod error;
mod generate;
mod mesh;
mod primitives;

pub use error::MeshError;
pub use generate::*;
pub use mesh::*;
pub use primitives::*;
