//! Derived geometry for triangle meshes.
//!
//! Computes per face-vertex normals, and tangents and binormals for bump
//! mapping, from a decoded `TriangleMesh`. Each face contributes a unit vector
//! to its corners; a corner then sums the vectors of every face around its
//! vertex that shares a smoothing group with the corner's own face. Meshes
//! without smoothing groups get hard edges everywhere.
//!
//! Degenerate faces (zero area, or zero UV area for tangents) contribute zero
//! vectors instead of failing.

mod adjacency;

use self::adjacency::Adjacency;
use cgmath::{vec3, InnerSpace, Vector3, Zero};
use crate::discreet::scene::{ObjectMesh, TriangleMesh};

/// Computes normals and tangent frames, keeping its scratch buffers between
/// meshes.
#[derive(Debug, Default)]
pub struct NormalGenerator {
    adjacency: Adjacency,
    face_normals: Vec<Vector3<f32>>,
    face_tangents: Vec<Vector3<f32>>,
    face_binormals: Vec<Vector3<f32>>,
}

impl NormalGenerator {
    pub fn new() -> NormalGenerator {
        NormalGenerator::default()
    }

    /// Fills `mesh.normals`.
    ///
    /// Every face index must be less than the vertex count; meshes from the
    /// reader always satisfy this.
    pub fn calc_normals(&mut self, mesh: &mut TriangleMesh) {
        substitute_tex_coords(mesh);

        let num_faces = mesh.num_faces();
        self.face_normals.clear();
        self.face_normals.extend((0..num_faces).map(|i| face_normal(mesh, i)));

        self.adjacency.rebuild(&mesh.faces, mesh.num_vertices());
        accumulate(
            &self.adjacency,
            &self.face_normals,
            &mesh.faces,
            mesh.smoothgroups.as_ref().map(|sg| &sg[..]),
            &mut mesh.normals,
        );

        trace!("generated normals for {} faces", num_faces);
    }

    /// Fills `mesh.tangents` and `mesh.binormals`. A mesh without texture
    /// coordinates gets zero coordinates first, and so all-zero tangents.
    pub fn calc_tangents(&mut self, mesh: &mut TriangleMesh) {
        substitute_tex_coords(mesh);

        let num_faces = mesh.num_faces();
        self.face_tangents.clear();
        self.face_binormals.clear();
        for i in 0..num_faces {
            let (t, b) = face_tangent_frame(mesh, i);
            self.face_tangents.push(t);
            self.face_binormals.push(b);
        }

        self.adjacency.rebuild(&mesh.faces, mesh.num_vertices());
        let smoothgroups = mesh.smoothgroups.as_ref().map(|sg| &sg[..]);
        accumulate(
            &self.adjacency,
            &self.face_tangents,
            &mesh.faces,
            smoothgroups,
            &mut mesh.tangents,
        );
        accumulate(
            &self.adjacency,
            &self.face_binormals,
            &mesh.faces,
            smoothgroups,
            &mut mesh.binormals,
        );

        trace!("generated tangents for {} faces", num_faces);
    }
}

/// Generates normals for every mesh in the scene.
pub fn calc_all_normals(scene: &mut ObjectMesh) {
    let mut gen = NormalGenerator::new();
    for mesh in scene.meshes_mut() {
        gen.calc_normals(mesh);
    }
}

/// Generates tangents and binormals for every mesh in the scene.
pub fn calc_all_tangents(scene: &mut ObjectMesh) {
    let mut gen = NormalGenerator::new();
    for mesh in scene.meshes_mut() {
        gen.calc_tangents(mesh);
    }
}

fn substitute_tex_coords(mesh: &mut TriangleMesh) {
    if mesh.tex_coords.is_none() {
        mesh.tex_coords = Some(vec![0.0; 2 * mesh.num_vertices()]);
    }
}

fn vertex(mesh: &TriangleMesh, v: u16) -> Vector3<f32> {
    let i = 3 * v as usize;
    vec3(mesh.vertices[i], mesh.vertices[i + 1], mesh.vertices[i + 2])
}

/// Texture coordinate of a vertex; zero if the mesh has fewer texture
/// coordinates than vertices.
fn tex_coord(mesh: &TriangleMesh, v: u16) -> (f32, f32) {
    let i = 2 * v as usize;
    match mesh.tex_coords {
        Some(ref tc) if i + 1 < tc.len() => (tc[i], tc[i + 1]),
        _ => (0.0, 0.0),
    }
}

fn normalize_or_zero(v: Vector3<f32>) -> Vector3<f32> {
    let len2 = v.magnitude2();
    if len2 > 0.0 {
        v / len2.sqrt()
    } else {
        Vector3::zero()
    }
}

fn face_normal(mesh: &TriangleMesh, i: usize) -> Vector3<f32> {
    let [a, b, c] = mesh.face(i);
    let (v0, v1, v2) = (vertex(mesh, a), vertex(mesh, b), vertex(mesh, c));
    normalize_or_zero((v0 - v2).cross(v1 - v0))
}

/// Tangent and binormal of a face, orthonormalized against each other.
fn face_tangent_frame(mesh: &TriangleMesh, i: usize) -> (Vector3<f32>, Vector3<f32>) {
    let [a, b, c] = mesh.face(i);
    let v0 = vertex(mesh, a);
    let e0 = vertex(mesh, b) - v0;
    let e1 = vertex(mesh, c) - v0;

    let (u0, w0) = tex_coord(mesh, a);
    let (u1, w1) = tex_coord(mesh, b);
    let (u2, w2) = tex_coord(mesh, c);
    let (du0, dv0) = (u1 - u0, w1 - w0);
    let (du1, dv1) = (u2 - u0, w2 - w0);

    // For each axis, solve for how that coordinate changes along U and V.
    let mut t: Vector3<f32> = Vector3::zero();
    let mut b: Vector3<f32> = Vector3::zero();
    for k in 0..3 {
        let cp = vec3(e0[k], du0, dv0).cross(vec3(e1[k], du1, dv1));
        if cp.x != 0.0 {
            t[k] = -cp.y / cp.x;
            b[k] = -cp.z / cp.x;
        }
    }

    let t = normalize_or_zero(t);
    let b = normalize_or_zero(b);
    let n = normalize_or_zero(t.cross(b));
    let b = n.cross(t);
    (t, b)
}

/// Sums face vectors into face-vertex slots (`9 * num_faces` floats in
/// `out`) and normalizes them.
fn accumulate(
    adjacency: &Adjacency,
    face_vecs: &[Vector3<f32>],
    faces: &[u16],
    smoothgroups: Option<&[u32]>,
    out: &mut Vec<f32>,
) {
    let group = |f: usize| smoothgroups.and_then(|sg| sg.get(f).cloned()).unwrap_or(0);

    out.clear();
    out.reserve(3 * faces.len());
    for (corner, &v) in faces.iter().enumerate() {
        let i = corner / 3;
        let groups = group(i);
        let mut sum: Vector3<f32> = Vector3::zero();
        for &l in adjacency.faces_of(v as usize) {
            let l = l as usize;
            if l == i || groups & group(l) != 0 {
                sum += face_vecs[l];
            }
        }
        let n = normalize_or_zero(sum);
        out.extend_from_slice(&[n.x, n.y, n.z]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mesh(vertices: &[f32], faces: &[u16], smoothgroups: Option<Vec<u32>>) -> TriangleMesh {
        TriangleMesh {
            vertices: vertices.to_vec(),
            faces: faces.to_vec(),
            smoothgroups,
            ..TriangleMesh::default()
        }
    }

    fn unit_square() -> TriangleMesh {
        mesh(
            &[
                0.0, 0.0, 0.0,
                1.0, 0.0, 0.0,
                1.0, 1.0, 0.0,
                0.0, 1.0, 0.0,
            ],
            &[0, 1, 2, 0, 2, 3],
            None,
        )
    }

    /// Two triangles sharing the edge AB, one facing +z, one facing +y.
    fn tent(groups: [u32; 2]) -> TriangleMesh {
        mesh(
            &[
                0.0, 0.0, 0.0, // A
                1.0, 0.0, 0.0, // B
                0.0, 1.0, 0.0, // C
                0.0, 0.0, 1.0, // D
            ],
            &[0, 1, 2, 1, 0, 3],
            Some(groups.to_vec()),
        )
    }

    fn slot(v: &[f32], face: usize, corner: usize) -> [f32; 3] {
        let i = 9 * face + 3 * corner;
        [v[i], v[i + 1], v[i + 2]]
    }

    fn assert_close(a: [f32; 3], b: [f32; 3]) {
        for k in 0..3 {
            assert!((a[k] - b[k]).abs() < 1e-5, "{:?} != {:?}", a, b);
        }
    }

    #[test]
    fn test_flat_square() {
        let mut m = unit_square();
        NormalGenerator::new().calc_normals(&mut m);
        assert_eq!(m.normals.len(), 9 * 2);
        for face in 0..2 {
            for corner in 0..3 {
                assert_close(slot(&m.normals, face, corner), [0.0, 0.0, 1.0]);
            }
        }
        // Zero texture coordinates were put in
        assert_eq!(m.tex_coords, Some(vec![0.0; 8]));
    }

    #[test]
    fn test_unit_length() {
        let mut m = mesh(
            &[
                0.0, 0.0, 0.0,
                3.0, 0.5, 0.0,
                0.2, 2.0, 1.0,
                -1.0, 0.7, 4.0,
            ],
            &[0, 1, 2, 0, 2, 3, 1, 3, 2],
            Some(vec![1, 1, 1]),
        );
        NormalGenerator::new().calc_normals(&mut m);
        for n in m.normals.chunks(3) {
            let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            assert!((len - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_hard_edge() {
        let mut m = tent([0b01, 0b10]);
        NormalGenerator::new().calc_normals(&mut m);
        for corner in 0..3 {
            assert_close(slot(&m.normals, 0, corner), [0.0, 0.0, 1.0]);
            assert_close(slot(&m.normals, 1, corner), [0.0, 1.0, 0.0]);
        }
    }

    #[test]
    fn test_smooth_edge() {
        let mut m = tent([0b01, 0b01]);
        NormalGenerator::new().calc_normals(&mut m);
        let s = 1.0 / 2.0f32.sqrt();
        // A and B are shared
        assert_close(slot(&m.normals, 0, 0), [0.0, s, s]);
        assert_close(slot(&m.normals, 0, 1), [0.0, s, s]);
        assert_close(slot(&m.normals, 1, 0), [0.0, s, s]);
        assert_close(slot(&m.normals, 1, 1), [0.0, s, s]);
        // C and D are not
        assert_close(slot(&m.normals, 0, 2), [0.0, 0.0, 1.0]);
        assert_close(slot(&m.normals, 1, 2), [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_degenerate_face() {
        let mut m = mesh(&[0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 2.0, 2.0, 2.0], &[0, 1, 2], None);
        NormalGenerator::new().calc_normals(&mut m);
        assert_eq!(m.normals, vec![0.0; 9]);
    }

    #[test]
    fn test_tangents_follow_uvs() {
        let mut m = unit_square();
        m.tex_coords = Some(vec![0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0]);
        NormalGenerator::new().calc_tangents(&mut m);
        assert_eq!(m.tangents.len(), 18);
        for face in 0..2 {
            for corner in 0..3 {
                assert_close(slot(&m.tangents, face, corner), [1.0, 0.0, 0.0]);
                assert_close(slot(&m.binormals, face, corner), [0.0, 1.0, 0.0]);
            }
        }
    }

    /// A fan of four triangles around vertex 0 in the z = 0 plane, with
    /// skewed texture coordinates that differ in slope from face to face.
    /// Faces 0-1 and 1-2 share a smoothing group; face 3 shares none.
    fn skewed_fan() -> TriangleMesh {
        let mut m = mesh(
            &[
                0.0, 0.0, 0.0,
                1.0, 0.0, 0.0,
                0.0, 1.0, 0.0,
                -1.0, 0.0, 0.0,
                0.0, -1.0, 0.0,
            ],
            &[0, 1, 2, 0, 2, 3, 0, 3, 4, 0, 4, 1],
            Some(vec![1, 3, 2, 4]),
        );
        m.tex_coords = Some(vec![
            0.5, 0.5,
            1.0, 0.6,
            0.4, 1.0,
            0.1, 0.3,
            0.8, 0.1,
        ]);
        m
    }

    fn arr(v: Vector3<f32>) -> [f32; 3] {
        [v.x, v.y, v.z]
    }

    #[test]
    fn test_tangents_with_smoothing_groups() {
        let mut m = skewed_fan();
        NormalGenerator::new().calc_tangents(&mut m);

        let frames: Vec<_> = (0..4).map(|i| face_tangent_frame(&m, i)).collect();
        let t = |faces: &[usize]| {
            arr(normalize_or_zero(faces.iter().map(|&i| frames[i].0).fold(Vector3::zero(), |a, b| a + b)))
        };
        let b = |faces: &[usize]| {
            arr(normalize_or_zero(faces.iter().map(|&i| frames[i].1).fold(Vector3::zero(), |a, b| a + b)))
        };

        // The faces really do have different tangents
        for i in 0..4 {
            for j in 0..i {
                assert!((frames[i].0 - frames[j].0).magnitude() > 1e-2);
            }
        }

        // Vertex 0 is in every face, but each corner only sums the faces
        // sharing a group with its own.
        assert_close(slot(&m.tangents, 0, 0), t(&[0, 1]));
        assert_close(slot(&m.tangents, 1, 0), t(&[0, 1, 2]));
        assert_close(slot(&m.tangents, 2, 0), t(&[1, 2]));
        assert_close(slot(&m.tangents, 3, 0), t(&[3]));
        assert_close(slot(&m.binormals, 1, 0), b(&[0, 1, 2]));

        // Vertex 2 is shared by faces 0 and 1 (group 1 in common)
        assert_close(slot(&m.tangents, 0, 2), t(&[0, 1]));
        assert_close(slot(&m.tangents, 1, 1), t(&[0, 1]));
        assert_close(slot(&m.binormals, 0, 2), b(&[0, 1]));

        // Vertex 3 by faces 1 and 2 (group 2 in common)
        assert_close(slot(&m.tangents, 1, 2), t(&[1, 2]));
        assert_close(slot(&m.tangents, 2, 1), t(&[1, 2]));

        // Vertex 1 by faces 0 and 3, which have no group in common
        assert_close(slot(&m.tangents, 0, 1), t(&[0]));
        assert_close(slot(&m.binormals, 0, 1), b(&[0]));
        let (hard0, hard3) = (slot(&m.tangents, 0, 1), slot(&m.tangents, 3, 2));
        assert!((hard0[0] - hard3[0]).abs() + (hard0[1] - hard3[1]).abs() > 1e-2);
        for corner in 0..3 {
            assert_close(slot(&m.tangents, 3, corner), t(&[3]));
            assert_close(slot(&m.binormals, 3, corner), b(&[3]));
        }

        // Every output frame is orthonormal and lies in the plane
        for (tc, bc) in m.tangents.chunks(3).zip(m.binormals.chunks(3)) {
            let tv = vec3(tc[0], tc[1], tc[2]);
            let bv = vec3(bc[0], bc[1], bc[2]);
            assert!((tv.magnitude() - 1.0).abs() < 1e-5);
            assert!((bv.magnitude() - 1.0).abs() < 1e-5);
            assert!(tv.dot(bv).abs() < 1e-5, "{:?} . {:?}", tv, bv);
            assert!(tv.z.abs() < 1e-6 && bv.z.abs() < 1e-6);
        }
    }

    #[test]
    fn test_tangents_without_uvs() {
        let mut m = unit_square();
        NormalGenerator::new().calc_tangents(&mut m);
        assert_eq!(m.tangents, vec![0.0; 18]);
        assert_eq!(m.binormals, vec![0.0; 18]);
    }

    #[test]
    fn test_generator_reuse() {
        let mut big = tent([1, 1]);
        let mut small = unit_square();

        let mut gen = NormalGenerator::new();
        gen.calc_normals(&mut big);
        gen.calc_normals(&mut small);
        gen.calc_normals(&mut big);

        let mut fresh_small = unit_square();
        NormalGenerator::new().calc_normals(&mut fresh_small);
        let mut fresh_big = tent([1, 1]);
        NormalGenerator::new().calc_normals(&mut fresh_big);

        assert_eq!(small.normals, fresh_small.normals);
        assert_eq!(big.normals, fresh_big.normals);
    }

    #[test]
    fn test_all_meshes() {
        use crate::discreet::scene::ObjectBlock;

        let mut scene = ObjectMesh::default();
        for name in &["a", "b"] {
            let mut block = ObjectBlock::new(name.to_string());
            block.meshes.push(unit_square());
            scene.blocks.push(block);
        }
        calc_all_normals(&mut scene);
        assert!(scene.meshes().all(|m| m.normals.len() == 18));
    }
}
