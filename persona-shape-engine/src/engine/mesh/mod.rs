//! Mesh generation for shape specs.
//!
//! Builds Bevy meshes for every geometry kind a shape spec can name, plus the
//! merged sprite mesh used by the particle field. All shape meshes carry
//! positions, normals and UVs so a pattern texture can be bound later.

/// Flat-shaded platonic solids with optional sphere-projected subdivision.
pub mod polyhedron;

/// Particle field merged into a single mesh of small octahedral sprites.
pub mod particles;

/// (p, q) torus knot tube generator.
pub mod torus_knot;

use bevy::prelude::*;
use constants::shape_tuning::MAX_SPHERE_SEGMENTS;

use crate::shape::GeometrySpec;

pub use particles::create_particle_mesh;

/// Failure to turn a geometry spec into a mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshBuildError(pub String);

impl std::fmt::Display for MeshBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Mesh build failed: {}", self.0)
    }
}

impl std::error::Error for MeshBuildError {}

pub fn build_shape_mesh(geometry: &GeometrySpec) -> Result<Mesh, MeshBuildError> {
    let mesh = match *geometry {
        GeometrySpec::Octahedron { radius, detail } => polyhedron::create_polyhedron_mesh(
            &polyhedron::OCTAHEDRON_VERTICES,
            &polyhedron::OCTAHEDRON_FACES,
            radius,
            detail,
        ),
        GeometrySpec::Icosahedron { radius, detail } => polyhedron::create_polyhedron_mesh(
            &polyhedron::icosahedron_vertices(),
            &polyhedron::ICOSAHEDRON_FACES,
            radius,
            detail,
        ),
        GeometrySpec::Dodecahedron { radius, detail } => polyhedron::create_polyhedron_mesh(
            &polyhedron::dodecahedron_vertices(),
            &polyhedron::DODECAHEDRON_FACES,
            radius,
            detail,
        ),
        GeometrySpec::TorusKnot {
            radius,
            tube,
            tubular_segments,
            radial_segments,
            p,
            q,
        } => torus_knot::create_torus_knot_mesh(
            radius,
            tube,
            tubular_segments,
            radial_segments,
            p,
            q,
        ),
        GeometrySpec::Sphere {
            radius,
            width_segments,
            height_segments,
        } => Sphere::new(radius)
            .mesh()
            .uv(
                width_segments.clamp(3, MAX_SPHERE_SEGMENTS),
                height_segments.clamp(2, MAX_SPHERE_SEGMENTS),
            ),
        GeometrySpec::Box {
            width,
            height,
            depth,
        } => Mesh::from(Cuboid::new(width, height, depth)),
    };

    if mesh.count_vertices() == 0 {
        return Err(MeshBuildError(format!(
            "{:?} produced no vertices",
            geometry.kind()
        )));
    }
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(mesh: &Mesh) -> Vec<[f32; 3]> {
        mesh.attribute(Mesh::ATTRIBUTE_POSITION)
            .and_then(|values| values.as_float3())
            .map(|values| values.to_vec())
            .unwrap_or_default()
    }

    #[test]
    fn every_geometry_kind_builds_with_uvs_and_normals() {
        let specs = [
            GeometrySpec::Octahedron {
                radius: 2.0,
                detail: 0,
            },
            GeometrySpec::Icosahedron {
                radius: 2.0,
                detail: 1,
            },
            GeometrySpec::Dodecahedron {
                radius: 1.5,
                detail: 0,
            },
            GeometrySpec::TorusKnot {
                radius: 2.0,
                tube: 0.4,
                tubular_segments: 64,
                radial_segments: 8,
                p: 2,
                q: 3,
            },
            GeometrySpec::Sphere {
                radius: 1.0,
                width_segments: 24,
                height_segments: 12,
            },
            GeometrySpec::Box {
                width: 1.0,
                height: 2.0,
                depth: 3.0,
            },
        ];

        for spec in specs {
            let mesh = build_shape_mesh(&spec).unwrap();
            assert!(mesh.count_vertices() > 0, "{:?}", spec.kind());
            assert!(mesh.attribute(Mesh::ATTRIBUTE_NORMAL).is_some());
            assert!(mesh.attribute(Mesh::ATTRIBUTE_UV_0).is_some());
            assert!(
                positions(&mesh)
                    .iter()
                    .all(|p| p.iter().all(|c| c.is_finite())),
                "{:?}",
                spec.kind()
            );
        }
    }
}
