error_chain! {
    foreign_links {
        Fmt(::std::fmt::Error);
        Io(::std::io::Error);
    }

    errors {
        UnexpectedEof(needed: usize, available: usize) {
            description("unexpected end of stream")
            display("unexpected end of stream: needed {} bytes, {} available",
                needed, available)
        }
        NotA3dsFile(found: u16) {
            description("not a 3DS file")
            display("not a 3DS file: expected main chunk 0x4d4d, found {:#06x}", found)
        }
        ChunkSizeMismatch(what: &'static str, read: usize, required: usize) {
            description("chunk sizes don't add up")
            display("incorrect bytes read for {}: read {}, required {}",
                what, read, required)
        }
        BadFaceIndex(face: usize, index: u16, num_vertices: usize) {
            description("face references a vertex that doesn't exist")
            display("face {} references vertex {}, but the mesh only has {} vertices",
                face, index, num_vertices)
        }
    }
}
