//! Torus knot geometry for the core mesh
//!
//! The tube follows a (p, q) torus knot. Vertices are laid out ring by ring:
//! `tubular_segments + 1` rings of `radial_segments + 1` vertices each, with
//! the closing ring and seam duplicated so texture-style indexing stays
//! rectangular.

use std::f32::consts::TAU;

use glam::Vec3;

use crate::config::SceneConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TorusKnot {
    pub radius: f32,
    pub tube: f32,
    pub tubular_segments: u32,
    pub radial_segments: u32,
    pub p: u32,
    pub q: u32,
}

impl TorusKnot {
    pub fn from_config(config: &SceneConfig) -> Self {
        Self {
            radius: config.knot_radius,
            tube: config.knot_tube,
            tubular_segments: config.tubular_segments,
            radial_segments: config.radial_segments,
            p: config.knot_p,
            q: config.knot_q,
        }
    }

    pub fn vertex_count(&self) -> usize {
        (self.tubular_segments as usize + 1) * (self.radial_segments as usize + 1)
    }

    /// Point on the knot's center curve at parameter `u`
    fn curve_point(&self, u: f32) -> Vec3 {
        let (p, q) = (self.p as f32, self.q as f32);
        let qu_over_p = q / p * u;
        let cs = qu_over_p.cos();
        Vec3::new(
            self.radius * (2.0 + cs) * 0.5 * u.cos(),
            self.radius * (2.0 + cs) * 0.5 * u.sin(),
            self.radius * qu_over_p.sin() * 0.5,
        )
    }

    /// Vertex positions, ring by ring
    pub fn positions(&self) -> Vec<Vec3> {
        let mut positions = Vec::with_capacity(self.vertex_count());
        let p = self.p as f32;

        for i in 0..=self.tubular_segments {
            let u = i as f32 / self.tubular_segments as f32 * p * TAU;
            let p1 = self.curve_point(u);
            let p2 = self.curve_point(u + 0.01);

            // Moving frame around the curve
            let t = p2 - p1;
            let b = t.cross(p2 + p1).normalize_or_zero();
            let n = b.cross(t).normalize_or_zero();

            for j in 0..=self.radial_segments {
                let v = j as f32 / self.radial_segments as f32 * TAU;
                let cx = -self.tube * v.cos();
                let cy = self.tube * v.sin();
                positions.push(p1 + cx * n + cy * b);
            }
        }

        positions
    }

    /// Line-list indices for the triangle edges of every quad
    ///
    /// Each quad `a b c d` is split along `b-d`, so it contributes its tube
    /// edge, its ring edge and that diagonal. The remaining two sides belong
    /// to the neighbouring quads.
    pub fn edge_indices(&self) -> Vec<u32> {
        let ring = self.radial_segments + 1;
        let mut indices =
            Vec::with_capacity((self.tubular_segments * self.radial_segments * 6) as usize);

        for i in 1..=self.tubular_segments {
            for j in 1..=self.radial_segments {
                let a = ring * (i - 1) + (j - 1);
                let b = ring * i + (j - 1);
                let d = ring * (i - 1) + j;
                indices.extend_from_slice(&[a, b, a, d, b, d]);
            }
        }

        indices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn core_knot() -> TorusKnot {
        TorusKnot::from_config(&SceneConfig::default())
    }

    #[test]
    fn test_counts() {
        let knot = core_knot();
        assert_eq!(knot.vertex_count(), 101 * 17);
        assert_eq!(knot.positions().len(), knot.vertex_count());

        let indices = knot.edge_indices();
        assert_eq!(indices.len(), 100 * 16 * 6);
        assert!(indices.iter().all(|&i| (i as usize) < knot.vertex_count()));
    }

    #[test]
    fn test_quads_include_diagonal() {
        let knot = core_knot();
        let indices = knot.edge_indices();
        let ring = knot.radial_segments + 1;

        // First quad: tube edge, ring edge, then the b-d diagonal
        assert_eq!(&indices[..6], &[0, ring, 0, 1, ring, 1]);
        let diagonals = indices
            .chunks(2)
            .filter(|edge| edge[0] == ring * 5 + 3 && edge[1] == ring * 4 + 4)
            .count();
        assert_eq!(diagonals, 1);
    }

    #[test]
    fn test_tube_surrounds_curve() {
        let knot = core_knot();
        let positions = knot.positions();
        let center = knot.curve_point(0.0);
        for vertex in &positions[..17] {
            assert!((vertex.distance(center) - knot.tube).abs() < 1e-3);
        }
    }

    #[test]
    fn test_knot_closes() {
        let knot = core_knot();
        let positions = knot.positions();
        assert!(positions[0].distance(positions[100 * 17]) < 1e-2);
    }

    #[test]
    fn test_fits_within_bounds() {
        let knot = core_knot();
        // Curve reaches radius * 1.5 from the origin; the tube adds at most `tube`
        let limit = knot.radius * 1.5 + knot.tube + 1e-3;
        for v in knot.positions() {
            assert!(v.length() <= limit);
        }
    }
}
