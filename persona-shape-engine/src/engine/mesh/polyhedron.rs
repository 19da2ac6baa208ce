use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::mesh::PrimitiveTopology;
use std::f32::consts::{PI, TAU};

const GOLDEN_RATIO: f32 = 1.618_034;

pub const OCTAHEDRON_VERTICES: [[f32; 3]; 6] = [
    [1.0, 0.0, 0.0],
    [-1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, -1.0, 0.0],
    [0.0, 0.0, 1.0],
    [0.0, 0.0, -1.0],
];

pub const OCTAHEDRON_FACES: [[usize; 3]; 8] = [
    [0, 2, 4],
    [0, 4, 3],
    [0, 3, 5],
    [0, 5, 2],
    [1, 2, 5],
    [1, 5, 3],
    [1, 3, 4],
    [1, 4, 2],
];

pub fn icosahedron_vertices() -> [[f32; 3]; 12] {
    let t = GOLDEN_RATIO;
    [
        [-1.0, t, 0.0],
        [1.0, t, 0.0],
        [-1.0, -t, 0.0],
        [1.0, -t, 0.0],
        [0.0, -1.0, t],
        [0.0, 1.0, t],
        [0.0, -1.0, -t],
        [0.0, 1.0, -t],
        [t, 0.0, -1.0],
        [t, 0.0, 1.0],
        [-t, 0.0, -1.0],
        [-t, 0.0, 1.0],
    ]
}

pub const ICOSAHEDRON_FACES: [[usize; 3]; 20] = [
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

/// Cube corners, then the three golden rectangles.
pub fn dodecahedron_vertices() -> [[f32; 3]; 20] {
    let t = GOLDEN_RATIO;
    let r = 1.0 / t;
    [
        [-1.0, -1.0, -1.0],
        [-1.0, -1.0, 1.0],
        [-1.0, 1.0, -1.0],
        [-1.0, 1.0, 1.0],
        [1.0, -1.0, -1.0],
        [1.0, -1.0, 1.0],
        [1.0, 1.0, -1.0],
        [1.0, 1.0, 1.0],
        [0.0, -r, -t],
        [0.0, -r, t],
        [0.0, r, -t],
        [0.0, r, t],
        [-r, -t, 0.0],
        [-r, t, 0.0],
        [r, -t, 0.0],
        [r, t, 0.0],
        [-t, 0.0, -r],
        [t, 0.0, -r],
        [-t, 0.0, r],
        [t, 0.0, r],
    ]
}

/// Twelve pentagons, each fanned into three triangles.
pub const DODECAHEDRON_FACES: [[usize; 3]; 36] = [
    [3, 11, 7],
    [3, 7, 15],
    [3, 15, 13],
    [7, 19, 17],
    [7, 17, 6],
    [7, 6, 15],
    [17, 4, 8],
    [17, 8, 10],
    [17, 10, 6],
    [8, 0, 16],
    [8, 16, 2],
    [8, 2, 10],
    [0, 12, 1],
    [0, 1, 18],
    [0, 18, 16],
    [6, 10, 2],
    [6, 2, 13],
    [6, 13, 15],
    [2, 16, 18],
    [2, 18, 3],
    [2, 3, 13],
    [18, 1, 9],
    [18, 9, 11],
    [18, 11, 3],
    [4, 14, 12],
    [4, 12, 0],
    [4, 0, 8],
    [11, 9, 5],
    [11, 5, 19],
    [11, 19, 7],
    [19, 5, 14],
    [19, 14, 4],
    [19, 4, 17],
    [1, 12, 14],
    [1, 14, 5],
    [1, 5, 9],
];

/// Build a flat-shaded convex polyhedron inscribed in a sphere of `radius`.
///
/// Every base face is split into `(detail + 1)^2` triangles whose corners are
/// pushed out onto the sphere. Faces are re-wound to point outward, so the
/// winding of the input tables does not matter.
pub fn create_polyhedron_mesh(
    vertices: &[[f32; 3]],
    faces: &[[usize; 3]],
    radius: f32,
    detail: u32,
) -> Mesh {
    let mut triangles = Vec::with_capacity(faces.len() * ((detail + 1) * (detail + 1)) as usize);
    for face in faces {
        let [a, b, c] = face.map(|index| Vec3::from(vertices[index]));
        subdivide_face(a, b, c, detail, &mut triangles);
    }

    let vertex_count = triangles.len() * 3;
    let mut positions = Vec::with_capacity(vertex_count);
    let mut normals = Vec::with_capacity(vertex_count);
    let mut uvs = Vec::with_capacity(vertex_count);

    for [a, b, c] in triangles {
        let [a, b, c] = [a, b, c].map(|v| v.normalize_or_zero() * radius);
        let mut normal = (b - a).cross(c - a).normalize_or_zero();
        let (b, c) = if normal.dot(a + b + c) < 0.0 {
            normal = -normal;
            (c, b)
        } else {
            (b, c)
        };

        for corner in [a, b, c] {
            positions.push(corner.to_array());
            normals.push(normal.to_array());
            uvs.push(spherical_uv(corner, radius));
        }
    }

    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
        .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
}

/// Split triangle `abc` into a `(detail + 1)`-row grid of smaller triangles.
fn subdivide_face(a: Vec3, b: Vec3, c: Vec3, detail: u32, out: &mut Vec<[Vec3; 3]>) {
    let n = detail + 1;
    let point = |row: u32, col: u32| {
        a + (b - a) * (col as f32 / n as f32) + (c - a) * (row as f32 / n as f32)
    };

    for row in 0..n {
        for col in 0..(n - row) {
            out.push([point(row, col), point(row, col + 1), point(row + 1, col)]);
            if col + 1 < n - row {
                out.push([
                    point(row, col + 1),
                    point(row + 1, col + 1),
                    point(row + 1, col),
                ]);
            }
        }
    }
}

fn spherical_uv(point: Vec3, radius: f32) -> [f32; 2] {
    let u = 0.5 + point.z.atan2(point.x) / TAU;
    let v = 0.5 + (point.y / radius).clamp(-1.0, 1.0).asin() / PI;
    [u, v]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn float3(mesh: &Mesh, attribute: bevy::render::mesh::MeshVertexAttribute) -> Vec<Vec3> {
        mesh.attribute(attribute)
            .and_then(|values| values.as_float3())
            .map(|values| values.iter().map(|v| Vec3::from(*v)).collect())
            .unwrap_or_default()
    }

    #[test]
    fn base_solids_have_expected_triangle_counts() {
        let octahedron = create_polyhedron_mesh(&OCTAHEDRON_VERTICES, &OCTAHEDRON_FACES, 2.0, 0);
        assert_eq!(octahedron.count_vertices(), 8 * 3);

        let icosahedron =
            create_polyhedron_mesh(&icosahedron_vertices(), &ICOSAHEDRON_FACES, 2.0, 0);
        assert_eq!(icosahedron.count_vertices(), 20 * 3);

        let dodecahedron =
            create_polyhedron_mesh(&dodecahedron_vertices(), &DODECAHEDRON_FACES, 2.0, 0);
        assert_eq!(dodecahedron.count_vertices(), 36 * 3);
    }

    #[test]
    fn detail_multiplies_triangles() {
        let detail_two = create_polyhedron_mesh(&OCTAHEDRON_VERTICES, &OCTAHEDRON_FACES, 1.0, 2);
        assert_eq!(detail_two.count_vertices(), 8 * 9 * 3);
    }

    #[test]
    fn corners_lie_on_the_sphere() {
        let mesh = create_polyhedron_mesh(&icosahedron_vertices(), &ICOSAHEDRON_FACES, 2.0, 1);
        for position in float3(&mesh, Mesh::ATTRIBUTE_POSITION) {
            assert!((position.length() - 2.0).abs() < 1e-4);
        }
    }

    #[test]
    fn normals_point_outward() {
        let mesh = create_polyhedron_mesh(&dodecahedron_vertices(), &DODECAHEDRON_FACES, 1.0, 0);
        let positions = float3(&mesh, Mesh::ATTRIBUTE_POSITION);
        let normals = float3(&mesh, Mesh::ATTRIBUTE_NORMAL);

        for (position, normal) in positions.iter().zip(&normals) {
            assert!((normal.length() - 1.0).abs() < 1e-4);
            assert!(normal.dot(*position) > 0.0);
        }
    }
}
