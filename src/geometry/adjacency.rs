/// Which faces use each vertex, in compressed-row form: the faces of vertex
/// `v` are `faces[offsets[v] .. offsets[v+1]]`.
///
/// Rebuilding keeps the buffers around, so a generator that processes many
/// meshes only allocates when it sees a bigger one than before.
#[derive(Debug, Default)]
pub struct Adjacency {
    counts: Vec<u32>,
    offsets: Vec<u32>,
    faces: Vec<u32>,
}

impl Adjacency {
    /// Rebuilds for a mesh. Every index in `faces` must be less than
    /// `num_vertices`.
    pub fn rebuild(&mut self, faces: &[u16], num_vertices: usize) {
        self.counts.clear();
        self.counts.resize(num_vertices, 0);
        for &v in faces {
            self.counts[v as usize] += 1;
        }

        self.offsets.clear();
        self.offsets.reserve(num_vertices + 1);
        let mut total = 0;
        self.offsets.push(0);
        for &count in &self.counts {
            total += count;
            self.offsets.push(total);
        }

        // Fill back-to-front using the counts as cursors; this leaves each
        // vertex's faces in ascending order.
        self.faces.clear();
        self.faces.resize(faces.len(), 0);
        for (corner, &v) in faces.iter().enumerate().rev() {
            let v = v as usize;
            self.counts[v] -= 1;
            let slot = self.offsets[v] + self.counts[v];
            self.faces[slot as usize] = (corner / 3) as u32;
        }
    }

    pub fn faces_of(&self, v: usize) -> &[u32] {
        let start = self.offsets[v] as usize;
        let end = self.offsets[v + 1] as usize;
        &self.faces[start..end]
    }

    #[cfg(test)]
    pub fn capacity(&self) -> usize {
        self.faces.capacity()
    }
}

#[test]
fn test() {
    let mut adj = Adjacency::default();
    adj.rebuild(&[0, 1, 2, 0, 2, 3], 5);
    assert_eq!(adj.faces_of(0), &[0, 1]);
    assert_eq!(adj.faces_of(1), &[0]);
    assert_eq!(adj.faces_of(2), &[0, 1]);
    assert_eq!(adj.faces_of(3), &[1]);
    assert_eq!(adj.faces_of(4), &[] as &[u32]);

    // Smaller mesh reuses the storage
    let cap = adj.capacity();
    adj.rebuild(&[1, 0, 2], 3);
    assert_eq!(adj.faces_of(0), &[0]);
    assert_eq!(adj.capacity(), cap);
}
