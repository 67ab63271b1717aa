//! Low-poly tessellation of the primitive shapes the rose is built from.
//!
//! Meshes are generated once in local space; the scene composes transforms
//! on top of them every frame.

use std::f32::consts::TAU;

use glam::Vec3;

/// A local-space triangle and the outward surface normal at its centroid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Facet {
    pub vertices: [Vec3; 3],
    pub normal: Vec3,
}

#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub facets: Vec<Facet>,
}

impl Mesh {
    pub fn len(&self) -> usize {
        self.facets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facets.is_empty()
    }

    fn push(&mut self, vertices: [Vec3; 3], normal: Vec3) {
        let [a, b, c] = vertices;
        // Quads that touch a pole collapse into zero-area triangles.
        if (b - a).cross(c - a).length_squared() <= f32::EPSILON * f32::EPSILON {
            return;
        }
        self.facets.push(Facet { vertices, normal });
    }

    /// A band of a sphere centred on the origin, starting at the +y pole.
    ///
    /// `theta_length` is the polar extent: `π` is a full sphere, `π/2` a
    /// dome, small values a shallow cap.
    pub fn sphere_segment(radius: f32, width_segments: usize, height_segments: usize, theta_length: f32) -> Mesh {
        let ws = width_segments.max(3);
        let hs = height_segments.max(1);

        let vertex = |ix: usize, iy: usize| {
            let phi = ix as f32 / ws as f32 * TAU;
            let theta = iy as f32 / hs as f32 * theta_length;
            Vec3::new(
                -radius * phi.cos() * theta.sin(),
                radius * theta.cos(),
                radius * phi.sin() * theta.sin(),
            )
        };

        let mut mesh = Mesh::default();
        for iy in 0..hs {
            for ix in 0..ws {
                let a = vertex(ix, iy);
                let b = vertex(ix + 1, iy);
                let c = vertex(ix + 1, iy + 1);
                let d = vertex(ix, iy + 1);

                for tri in [[a, d, b], [b, d, c]] {
                    let centroid = (tri[0] + tri[1] + tri[2]) / 3.0;
                    mesh.push(tri, centroid.normalize_or(Vec3::Y));
                }
            }
        }
        mesh
    }

    pub fn sphere(radius: f32, width_segments: usize, height_segments: usize) -> Mesh {
        Self::sphere_segment(radius, width_segments, height_segments, std::f32::consts::PI)
    }

    /// A closed, possibly tapered cylinder centred on the origin along y.
    pub fn cylinder(radius_top: f32, radius_bottom: f32, height: f32, radial_segments: usize) -> Mesh {
        let segs = radial_segments.max(3);
        let half = height / 2.0;
        let ring = |i: usize, r: f32, y: f32| {
            let a = i as f32 / segs as f32 * TAU;
            Vec3::new(r * a.sin(), y, r * a.cos())
        };

        let mut mesh = Mesh::default();
        for i in 0..segs {
            let t0 = ring(i, radius_top, half);
            let t1 = ring(i + 1, radius_top, half);
            let b0 = ring(i, radius_bottom, -half);
            let b1 = ring(i + 1, radius_bottom, -half);

            let mid = (t0 + t1 + b0 + b1) / 4.0;
            let side = Vec3::new(mid.x, 0.0, mid.z).normalize_or(Vec3::Z);
            mesh.push([t0, b0, t1], side);
            mesh.push([t1, b0, b1], side);

            mesh.push([Vec3::new(0.0, half, 0.0), t0, t1], Vec3::Y);
            mesh.push([Vec3::new(0.0, -half, 0.0), b1, b0], Vec3::NEG_Y);
        }
        mesh
    }
}
