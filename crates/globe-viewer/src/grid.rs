//! Regular latitude/longitude grid tessellation of the visible sector.

use glam::DVec3;
use globe_frame::{BoxError, GlobeModel, Tessellation, Tessellator, View};
use globe_math::{Aabb, Angle, Region};
use globe_projection::MapProjection;
use tracing::debug;

/// Vertex grid covering one sector, in model coordinates of one world copy.
#[derive(Debug, Clone, PartialEq)]
pub struct GridMesh {
    /// Row-major, south to north, west to east.
    pub vertices: Vec<DVec3>,
    pub rows: usize,
    pub columns: usize,
    pub bounds: Aabb,
}

impl GridMesh {
    pub fn vertex(&self, row: usize, column: usize) -> Option<DVec3> {
        if row > self.rows || column > self.columns {
            return None;
        }
        self.vertices.get(row * (self.columns + 1) + column).copied()
    }
}

/// Tessellates the part of the projection's domain under the view into a
/// `rows` x `columns` grid of cells at sea level.
#[derive(Debug, Clone)]
pub struct GridTessellator {
    rows: usize,
    columns: usize,
    built: usize,
}

impl GridTessellator {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows: rows.max(1),
            columns: columns.max(1),
            built: 0,
        }
    }

    /// Number of meshes produced so far.
    pub fn built(&self) -> usize {
        self.built
    }
}

impl Default for GridTessellator {
    fn default() -> Self {
        Self::new(16, 16)
    }
}

impl Tessellator for GridTessellator {
    type Geometry = GridMesh;

    fn tessellate(&mut self, model: &GlobeModel, view: &View) -> Result<Tessellation<GridMesh>, BoxError> {
        // The bounding box can overlap the view where the map itself does not,
        // e.g. the corners beyond a curved outline.
        let sector: Region = match model.visible_sector(view) {
            Some(sector) => sector,
            None => {
                debug!(offset = %model.offset, "No visible sector, covering projection limits");
                model.projection.limits()
            }
        };

        let mut vertices = Vec::with_capacity((self.rows + 1) * (self.columns + 1));
        for row in 0..=self.rows {
            let latitude = sector.min_latitude + sector.delta_lat() * (row as f64 / self.rows as f64);
            for column in 0..=self.columns {
                let longitude: Angle =
                    sector.min_longitude + sector.delta_lon() * (column as f64 / self.columns as f64);
                vertices.push(model.geographic_to_cartesian(latitude, longitude, 0.0));
            }
        }
        let bounds = Aabb::from_points(vertices.iter().copied()).ok_or("empty terrain grid")?;

        self.built += 1;
        Ok(Tessellation {
            geometry: GridMesh {
                vertices,
                rows: self.rows,
                columns: self.columns,
                bounds,
            },
            sector,
        })
    }
}
