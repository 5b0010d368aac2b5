use crate::{Assignment, LineSegment1d};
use nalgebra::{allocator::Allocator, DefaultAllocator, DimName, OPoint, RealField, U1};

/// A generic `Mesh` object valid in all dimensions
#[derive(Debug, Clone)]
pub struct Mesh<T: RealField, D>
where
    D: DimName,
    DefaultAllocator: Allocator<T, D>,
{
    vertices: Vec<(OPoint<T, D>, Assignment)>,
}

/// Type alias for the line-segment mesh of a layered structure
pub type Mesh1d<T> = Mesh<T, U1>;

impl<T, D> Mesh<T, D>
where
    T: RealField,
    D: DimName,
    DefaultAllocator: Allocator<T, D>,
{
    /// Every vertex with the region(s) it is assigned to
    pub fn vertices(&self) -> &[(OPoint<T, D>, Assignment)] {
        &self.vertices
    }

    pub(crate) fn from_vertices(vertices: Vec<(OPoint<T, D>, Assignment)>) -> Self {
        Self { vertices }
    }
}

impl<T> Mesh1d<T>
where
    T: Copy + RealField,
{
    /// The coordinate of every vertex, in ascending order
    pub fn coordinates(&self) -> Vec<T> {
        self.vertices.iter().map(|(point, _)| point.x).collect()
    }

    /// The cells of the mesh, each tagged with the region it lies in
    pub fn elements(&self) -> Vec<LineSegment1d<T>> {
        self.vertices
            .windows(2)
            .map(|pair| {
                LineSegment1d::from_vertices(
                    [pair[0].0, pair[1].0],
                    pair[0].1.region_to_the_right(),
                )
            })
            .collect()
    }
}

