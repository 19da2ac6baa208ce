use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};

const SPRITE_DIRECTIONS: [Vec3; 6] = [
    Vec3::X,
    Vec3::NEG_X,
    Vec3::Y,
    Vec3::NEG_Y,
    Vec3::Z,
    Vec3::NEG_Z,
];

const SPRITE_FACES: [[u32; 3]; 8] = [
    [0, 2, 4],
    [0, 4, 3],
    [0, 3, 5],
    [0, 5, 2],
    [1, 5, 2],
    [1, 3, 5],
    [1, 4, 3],
    [1, 2, 4],
];

/// Merge every particle into one mesh: a small octahedron of diameter `size`
/// per position, so the whole field is one draw with one material.
pub fn create_particle_mesh(positions: &[Vec3], size: f32) -> Mesh {
    let half = size * 0.5;
    let mut vertices = Vec::with_capacity(positions.len() * SPRITE_DIRECTIONS.len());
    let mut normals = Vec::with_capacity(vertices.capacity());
    let mut indices = Vec::with_capacity(positions.len() * SPRITE_FACES.len() * 3);

    for (particle, center) in positions.iter().enumerate() {
        let base = (particle * SPRITE_DIRECTIONS.len()) as u32;
        for direction in SPRITE_DIRECTIONS {
            vertices.push((*center + direction * half).to_array());
            normals.push(direction.to_array());
        }
        for face in SPRITE_FACES {
            indices.extend(face.iter().map(|corner| base + corner));
        }
    }

    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, vertices)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
        .with_inserted_indices(Indices::U32(indices))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_sprite_per_particle() {
        let positions = vec![Vec3::ZERO, Vec3::ONE, Vec3::new(-3.0, 2.0, 0.5)];
        let mesh = create_particle_mesh(&positions, 0.1);

        assert_eq!(mesh.count_vertices(), 3 * 6);
        assert_eq!(mesh.indices().map(|i| i.len()), Some(3 * 8 * 3));
    }

    #[test]
    fn sprites_surround_their_centres() {
        let mesh = create_particle_mesh(&[Vec3::new(1.0, 1.0, 1.0)], 0.2);
        let vertices = mesh
            .attribute(Mesh::ATTRIBUTE_POSITION)
            .and_then(|values| values.as_float3())
            .unwrap();
        for vertex in vertices {
            let offset = Vec3::from(*vertex) - Vec3::ONE;
            assert!((offset.length() - 0.1).abs() < 1e-5);
        }
    }

    #[test]
    fn empty_field_builds_an_empty_mesh() {
        let mesh = create_particle_mesh(&[], 0.1);
        assert_eq!(mesh.count_vertices(), 0);
    }
}
