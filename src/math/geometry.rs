use std::f32::consts::{PI, TAU};
use std::sync::Arc;

use glam::Vec3;

use super::aabb::AABB;

/// Indexed triangle list, counter-clockwise front faces
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub positions: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>) -> Self {
        Self { positions, indices }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate triangles as vertex triples, skipping out-of-range indices
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).filter_map(move |tri| {
            let a = *self.positions.get(tri[0] as usize)?;
            let b = *self.positions.get(tri[1] as usize)?;
            let c = *self.positions.get(tri[2] as usize)?;
            Some([a, b, c])
        })
    }

    pub fn bounds(&self) -> AABB {
        AABB::from_points(&self.positions)
    }
}

/// Shape descriptions, expanded to triangles on demand
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Box { width: f32, height: f32, depth: f32 },
    Sphere { radius: f32, width_segments: u32, height_segments: u32 },
    Plane { width: f32, height: f32 },
    Custom(Arc<MeshData>),
}

impl Geometry {
    pub fn cube(size: f32) -> Self {
        Geometry::Box { width: size, height: size, depth: size }
    }

    pub fn sphere(radius: f32) -> Self {
        Geometry::Sphere { radius, width_segments: 16, height_segments: 12 }
    }

    /// Triangles for this shape. Custom meshes are shared, not copied.
    pub fn to_mesh(&self) -> Arc<MeshData> {
        match self {
            Geometry::Box { width, height, depth } => Arc::new(box_mesh(*width, *height, *depth)),
            Geometry::Sphere { radius, width_segments, height_segments } => {
                Arc::new(sphere_mesh(*radius, (*width_segments).max(3), (*height_segments).max(2)))
            }
            Geometry::Plane { width, height } => Arc::new(plane_mesh(*width, *height)),
            Geometry::Custom(mesh) => Arc::clone(mesh),
        }
    }
}

fn box_mesh(width: f32, height: f32, depth: f32) -> MeshData {
    let h = Vec3::new(width, height, depth) * 0.5;

    // Each face: outward normal axis and two tangents, wound CCW seen from outside
    let faces: [(Vec3, Vec3, Vec3); 6] = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];

    let mut positions = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (normal, u, v) in faces {
        let base = positions.len() as u32;
        let center = normal * h;
        let du = u * h;
        let dv = v * h;
        positions.extend([
            center - du - dv,
            center + du - dv,
            center + du + dv,
            center - du + dv,
        ]);
        indices.extend([base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    MeshData::new(positions, indices)
}

fn sphere_mesh(radius: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let mut positions = Vec::new();
    let mut indices = Vec::new();

    for iy in 0..=height_segments {
        let v = iy as f32 / height_segments as f32;
        let theta = v * PI;
        for ix in 0..=width_segments {
            let u = ix as f32 / width_segments as f32;
            let phi = u * TAU;
            positions.push(Vec3::new(
                -radius * phi.cos() * theta.sin(),
                radius * theta.cos(),
                radius * phi.sin() * theta.sin(),
            ));
        }
    }

    let stride = width_segments + 1;
    for iy in 0..height_segments {
        for ix in 0..width_segments {
            let a = iy * stride + ix + 1;
            let b = iy * stride + ix;
            let c = (iy + 1) * stride + ix;
            let d = (iy + 1) * stride + ix + 1;
            if iy != 0 {
                indices.extend([a, b, d]);
            }
            if iy != height_segments - 1 {
                indices.extend([b, c, d]);
            }
        }
    }

    MeshData::new(positions, indices)
}

fn plane_mesh(width: f32, height: f32) -> MeshData {
    let hw = width * 0.5;
    let hh = height * 0.5;
    MeshData::new(
        vec![
            Vec3::new(-hw, -hh, 0.0),
            Vec3::new(hw, -hh, 0.0),
            Vec3::new(hw, hh, 0.0),
            Vec3::new(-hw, hh, 0.0),
        ],
        vec![0, 1, 2, 0, 2, 3],
    )
}
