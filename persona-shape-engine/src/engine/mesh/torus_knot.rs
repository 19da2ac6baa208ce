use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use constants::shape_tuning::{MAX_KNOT_WINDING, MAX_RADIAL_SEGMENTS, MAX_TUBULAR_SEGMENTS};
use std::f32::consts::TAU;

/// Offset along the curve used to estimate the tangent.
const TANGENT_STEP: f32 = 0.01;

/// Tube of radius `tube` swept along a (p, q) torus knot of size `radius`.
///
/// The knot winds `p` times around the axis of rotational symmetry and `q`
/// times around the interior of the torus.
pub fn create_torus_knot_mesh(
    radius: f32,
    tube: f32,
    tubular_segments: u32,
    radial_segments: u32,
    p: u32,
    q: u32,
) -> Mesh {
    let tubular_segments = tubular_segments.clamp(3, MAX_TUBULAR_SEGMENTS);
    let radial_segments = radial_segments.clamp(3, MAX_RADIAL_SEGMENTS);
    let (p, q) = (
        p.clamp(1, MAX_KNOT_WINDING) as f32,
        q.clamp(1, MAX_KNOT_WINDING) as f32,
    );

    let ring = (radial_segments + 1) as usize;
    let vertex_count = (tubular_segments as usize + 1) * ring;
    let mut positions = Vec::with_capacity(vertex_count);
    let mut normals = Vec::with_capacity(vertex_count);
    let mut uvs = Vec::with_capacity(vertex_count);

    for j in 0..=tubular_segments {
        let u = j as f32 / tubular_segments as f32 * p * TAU;
        let p1 = curve_point(u, p, q, radius);
        let p2 = curve_point(u + TANGENT_STEP, p, q, radius);

        // Frenet-like frame: tangent, then binormal and normal around it.
        let tangent = p2 - p1;
        let binormal = tangent.cross(p2 + p1).normalize_or_zero();
        let normal = binormal.cross(tangent).normalize_or_zero();

        for i in 0..=radial_segments {
            let v = i as f32 / radial_segments as f32 * TAU;
            let cx = -tube * v.cos();
            let cy = tube * v.sin();

            let vertex = p1 + normal * cx + binormal * cy;
            positions.push(vertex.to_array());
            normals.push((vertex - p1).normalize_or_zero().to_array());
            uvs.push([
                i as f32 / radial_segments as f32,
                j as f32 / tubular_segments as f32,
            ]);
        }
    }

    let mut indices = Vec::with_capacity(tubular_segments as usize * radial_segments as usize * 6);
    let ring = ring as u32;
    for j in 1..=tubular_segments {
        for i in 1..=radial_segments {
            let a = ring * (j - 1) + (i - 1);
            let b = ring * j + (i - 1);
            let c = ring * j + i;
            let d = ring * (j - 1) + i;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
        .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
        .with_inserted_indices(Indices::U32(indices))
}

fn curve_point(u: f32, p: f32, q: f32, radius: f32) -> Vec3 {
    let q_over_p = q / p * u;
    let cs = q_over_p.cos();
    Vec3::new(
        radius * (2.0 + cs) * 0.5 * u.cos(),
        radius * (2.0 + cs) * 0.5 * u.sin(),
        radius * q_over_p.sin() * 0.5,
    )
}
