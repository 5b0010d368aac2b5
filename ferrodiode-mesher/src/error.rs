/// Errors raised when a mesh cannot be generated from the requested regions
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    #[error("a mesh needs at least one region")]
    NoRegions,
    #[error("region {region} has width {width}, widths must be positive and finite")]
    InvalidWidth { region: usize, width: f64 },
    #[error("{cells} cells cannot cover {regions} regions, each region needs at least one cell")]
    TooFewCells { cells: usize, regions: usize },
}
