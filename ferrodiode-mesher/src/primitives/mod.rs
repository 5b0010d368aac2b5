use nalgebra::{Point1, RealField};

/// The region(s) a vertex belongs to
///
/// A `Core` vertex lies inside a single piecewise homogeneous region, a `Boundary` vertex sits on
/// the interface between the listed regions, in ascending order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assignment {
    Core(usize),
    Boundary(Vec<usize>),
}

impl Assignment {
    /// The region lying to the right of the vertex, or containing it
    pub fn region_to_the_right(&self) -> usize {
        match self {
            Assignment::Core(region) => *region,
            Assignment::Boundary(regions) => regions.iter().copied().max().unwrap_or_default(),
        }
    }
}

/// A single cell of a 1D mesh, which always lies entirely inside one region
#[derive(Debug, Clone)]
pub struct LineSegment1d<T>
where
    T: RealField,
{
    vertices: [Point1<T>; 2],
    region: usize,
}

impl<T> LineSegment1d<T>
where
    T: Copy + RealField,
{
    pub fn from_vertices(vertices: [Point1<T>; 2], region: usize) -> Self {
        Self { vertices, region }
    }

    pub fn region(&self) -> usize {
        self.region
    }

    pub fn width(&self) -> T {
        self.vertices[1].x - self.vertices[0].x
    }
}
