//! Blob mesh generation: a subdivided icosahedron projected onto a sphere.
//!
//! Faces are split into `(detail + 1)^2` triangles each, UVs are spherical
//! with the wrap seam corrected per triangle, and vertices are merged by
//! position and UV so the displacement shader sees a closed surface.

use fnv::{FnvHashMap, FnvHashSet};
use glam::{Vec2, Vec3};
use std::f32::consts::PI;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BlobVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
    pub tangent: [f32; 3],
}

pub struct MeshData {
    pub vertices: Vec<BlobVertex>,
    /// Triangle list.
    pub indices: Vec<u32>,
    /// Line list over unique triangle edges, for wireframe drawing.
    pub edges: Vec<u32>,
}

impl MeshData {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

const PHI: f32 = 1.618_034;

const ICOSAHEDRON_VERTICES: [[f32; 3]; 12] = [
    [-1.0, PHI, 0.0],
    [1.0, PHI, 0.0],
    [-1.0, -PHI, 0.0],
    [1.0, -PHI, 0.0],
    [0.0, -1.0, PHI],
    [0.0, 1.0, PHI],
    [0.0, -1.0, -PHI],
    [0.0, 1.0, -PHI],
    [PHI, 0.0, -1.0],
    [PHI, 0.0, 1.0],
    [-PHI, 0.0, -1.0],
    [-PHI, 0.0, 1.0],
];

const ICOSAHEDRON_FACES: [[usize; 3]; 20] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

// Merge tolerance, in units of 1/QUANT
const QUANT: f32 = 10_000.0;

pub fn icosphere(radius: f32, detail: u32) -> MeshData {
    let cols = detail as usize + 1;
    let mut soup: Vec<Vec3> = Vec::with_capacity(20 * 3 * cols * cols);
    for face in ICOSAHEDRON_FACES {
        let [a, b, c] = face.map(|i| Vec3::from_array(ICOSAHEDRON_VERTICES[i]));
        subdivide_face(a, b, c, cols, &mut soup);
    }

    let mut uvs: Vec<Vec2> = soup
        .iter_mut()
        .map(|p| {
            *p = p.normalize();
            spherical_uv(*p)
        })
        .collect();
    for tri in uvs.chunks_exact_mut(3) {
        correct_seam(tri);
    }

    let mut lookup: FnvHashMap<[i32; 5], u32> = FnvHashMap::default();
    let mut vertices = Vec::new();
    let mut indices = Vec::with_capacity(soup.len());
    for (p, uv) in soup.iter().zip(&uvs) {
        let key = [
            (p.x * QUANT).round() as i32,
            (p.y * QUANT).round() as i32,
            (p.z * QUANT).round() as i32,
            (uv.x * QUANT).round() as i32,
            (uv.y * QUANT).round() as i32,
        ];
        let idx = *lookup.entry(key).or_insert_with(|| {
            vertices.push(BlobVertex {
                position: (*p * radius).to_array(),
                normal: p.to_array(),
                uv: uv.to_array(),
                tangent: tangent_for(*p).to_array(),
            });
            (vertices.len() - 1) as u32
        });
        indices.push(idx);
    }

    let edges = unique_edges(&indices);
    MeshData {
        vertices,
        indices,
        edges,
    }
}

fn subdivide_face(a: Vec3, b: Vec3, c: Vec3, cols: usize, out: &mut Vec<Vec3>) {
    let mut grid: Vec<Vec<Vec3>> = Vec::with_capacity(cols + 1);
    for i in 0..=cols {
        let aj = a.lerp(c, i as f32 / cols as f32);
        let bj = b.lerp(c, i as f32 / cols as f32);
        let rows = cols - i;
        let row = (0..=rows)
            .map(|j| {
                if rows == 0 {
                    aj
                } else {
                    aj.lerp(bj, j as f32 / rows as f32)
                }
            })
            .collect();
        grid.push(row);
    }
    for i in 0..cols {
        for j in 0..(2 * (cols - i) - 1) {
            let k = j / 2;
            if j % 2 == 0 {
                out.extend([grid[i][k + 1], grid[i + 1][k], grid[i][k]]);
            } else {
                out.extend([grid[i][k + 1], grid[i + 1][k + 1], grid[i + 1][k]]);
            }
        }
    }
}

/// Equirectangular UV of a unit direction; u wraps around Y, v runs top to bottom.
#[inline]
pub fn spherical_uv(p: Vec3) -> Vec2 {
    let azimuth = p.z.atan2(-p.x);
    let inclination = (-p.y).atan2((p.x * p.x + p.z * p.z).sqrt());
    Vec2::new(azimuth / (2.0 * PI) + 0.5, 1.0 - (inclination / PI + 0.5))
}

/// Unwrap triangles that straddle u = 0/1 so they don't smear the whole map.
pub fn correct_seam(tri: &mut [Vec2]) {
    let max = tri.iter().map(|uv| uv.x).fold(f32::MIN, f32::max);
    let min = tri.iter().map(|uv| uv.x).fold(f32::MAX, f32::min);
    if max > 0.9 && min < 0.1 {
        for uv in tri.iter_mut() {
            if uv.x < 0.2 {
                uv.x += 1.0;
            }
        }
    }
}

#[inline]
pub fn tangent_for(normal: Vec3) -> Vec3 {
    let reference = if normal.y.abs() > 0.99 { Vec3::X } else { Vec3::Y };
    reference.cross(normal).normalize()
}

fn unique_edges(indices: &[u32]) -> Vec<u32> {
    let mut seen: FnvHashSet<(u32, u32)> = FnvHashSet::default();
    let mut edges = Vec::new();
    for tri in indices.chunks_exact(3) {
        for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
            let key = (a.min(b), a.max(b));
            if seen.insert(key) {
                edges.extend([key.0, key.1]);
            }
        }
    }
    edges
}
