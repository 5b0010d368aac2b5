use crate::{Assignment, Mesh1d, MeshError};
use nalgebra::{Point1, RealField, Vector1};
use std::cmp::Ordering;

/// Creates a uniform mesh of `cells` cells spanning `[left, left + length]`
///
/// The final vertex is placed at exactly `left + length`.
pub fn create_line_segment_mesh_1d<T>(length: T, cells: usize, left: &Vector1<T>) -> Mesh1d<T>
where
    T: Copy + RealField,
{
    if cells == 0 {
        return Mesh1d::from_vertices(Vec::new());
    }
    let start = left.x;
    let end = start + length;
    let cell_size = length / nalgebra::convert::<f64, T>(cells as f64);
    let mut vertices = Vec::with_capacity(cells + 1);
    for i in 0..cells {
        let i_as_t = nalgebra::convert::<f64, T>(i as f64);
        vertices.push((Point1::new(start + i_as_t * cell_size), Assignment::Core(0)));
    }
    vertices.push((Point1::new(end), Assignment::Core(0)));
    Mesh1d::from_vertices(vertices)
}

/// Splits `total_cells` between regions of the given widths
///
/// Each region receives a share proportional to its width, rounded by the largest-remainder
/// method, and never less than one cell. The shares always sum to `total_cells`.
pub fn apportion_cells<T>(widths: &[T], total_cells: usize) -> Result<Vec<usize>, MeshError>
where
    T: Copy + RealField,
{
    if widths.is_empty() {
        return Err(MeshError::NoRegions);
    }
    for (region, &width) in widths.iter().enumerate() {
        if !(width.is_finite() && width > T::zero()) {
            return Err(MeshError::InvalidWidth {
                region,
                width: nalgebra::try_convert::<T, f64>(width).unwrap_or(f64::NAN),
            });
        }
    }
    if total_cells < widths.len() {
        return Err(MeshError::TooFewCells {
            cells: total_cells,
            regions: widths.len(),
        });
    }

    let total_width = widths.iter().fold(T::zero(), |acc, &width| acc + width);
    let quotas: Vec<f64> = widths
        .iter()
        .map(|&width| {
            nalgebra::try_convert::<T, f64>(width / total_width).unwrap_or(0.0) * total_cells as f64
        })
        .collect();
    let mut cells: Vec<usize> = quotas
        .iter()
        .map(|quota| (quota.floor() as usize).max(1))
        .collect();

    let remainder = |cells: &[usize], region: usize| quotas[region] - cells[region] as f64;
    let mut assigned: usize = cells.iter().sum();
    while assigned < total_cells {
        let region = (0..cells.len())
            .max_by(|&a, &b| {
                remainder(&cells, a)
                    .partial_cmp(&remainder(&cells, b))
                    .unwrap_or(Ordering::Equal)
            })
            .unwrap_or_default();
        cells[region] += 1;
        assigned += 1;
    }
    // The one-cell floor can overshoot when a region is very thin
    while assigned > total_cells {
        let region = (0..cells.len())
            .filter(|&region| cells[region] > 1)
            .min_by(|&a, &b| {
                remainder(&cells, a)
                    .partial_cmp(&remainder(&cells, b))
                    .unwrap_or(Ordering::Equal)
            })
            .ok_or(MeshError::TooFewCells {
                cells: total_cells,
                regions: widths.len(),
            })?;
        cells[region] -= 1;
        assigned -= 1;
    }
    Ok(cells)
}

/// Creates a mesh with `total_cells` cells covering consecutive regions of the given widths
///
/// Every region boundary is a vertex located at exactly the cumulative width, and is assigned
/// to both adjacent regions. Repeated boundary vertices are not emitted.
pub fn create_line_segment_mesh_1d_from_regions<T>(
    widths: &[T],
    total_cells: usize,
    left: &Vector1<T>,
) -> Result<Mesh1d<T>, MeshError>
where
    T: Copy + RealField,
{
    let cells_per_region = apportion_cells(widths, total_cells)?;
    let num_regions = widths.len();

    let mut vertices = Vec::with_capacity(total_cells + 1);
    let mut start = left.x;
    vertices.push((Point1::new(start), Assignment::Core(0)));

    for (region, (&width, &cells)) in widths.iter().zip(cells_per_region.iter()).enumerate() {
        let end = start + width;
        let region_mesh = create_line_segment_mesh_1d(width, cells, &Vector1::new(start));
        let interior = region_mesh.vertices().len().saturating_sub(1);
        vertices.extend(
            region_mesh.vertices()[1..interior]
                .iter()
                .map(|(point, _)| (*point, Assignment::Core(region))),
        );
        let assignment = if region + 1 < num_regions {
            Assignment::Boundary(vec![region, region + 1])
        } else {
            Assignment::Core(region)
        };
        vertices.push((Point1::new(end), assignment));
        start = end;
    }

    Ok(Mesh1d::from_vertices(vertices))
}
