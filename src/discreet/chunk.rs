//! Walking the chunk tree.
//!
//! Every chunk starts with a six byte header: a `u16` id and a `u32` size
//! which counts the header itself. A container chunk's payload is just more
//! chunks, sometimes after a few fields of its own. `walk_children` hands each
//! child to a handler with a cursor bounded to that child's payload; anything
//! the handler doesn't know is skipped by size.
//!
//! The sizes in real files don't always add up (trailing padding is common).
//! What to do about that is up to `ReadOptions`.

use crate::errors::{ErrorKind, Result};
use crate::util::cur::Cur;

pub const HEADER_SIZE: usize = 6;

/// What to do when the sizes of a container's children don't add up to the
/// container's own size.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SizeMismatch {
    /// Log a warning and trust the container's size.
    Warn,
    /// Fail the whole read.
    Fail,
}

#[derive(Debug, Copy, Clone)]
pub struct ReadOptions {
    pub size_mismatch: SizeMismatch,
}

impl Default for ReadOptions {
    fn default() -> ReadOptions {
        ReadOptions { size_mismatch: SizeMismatch::Warn }
    }
}

impl ReadOptions {
    pub fn strict() -> ReadOptions {
        ReadOptions { size_mismatch: SizeMismatch::Fail }
    }

    /// Reports a chunk whose sizes don't add up.
    pub fn mismatch(&self, what: &'static str, read: usize, required: usize) -> Result<()> {
        match self.size_mismatch {
            SizeMismatch::Warn => {
                warn!("incorrect bytes read for {}: read {}, required {}",
                    what, read, required);
                Ok(())
            }
            SizeMismatch::Fail => {
                Err(ErrorKind::ChunkSizeMismatch(what, read, required).into())
            }
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ChunkHeader {
    pub id: u16,
    pub size: u32,
}

impl ChunkHeader {
    pub fn read(cur: &mut Cur) -> Result<ChunkHeader> {
        fields!(cur, chunk_header {
            id: u16,
            size: u32,
        });
        Ok(ChunkHeader { id, size })
    }

    pub fn payload_len(&self) -> usize {
        (self.size as usize).saturating_sub(HEADER_SIZE)
    }
}

/// Returned by chunk handlers.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// The handler read the chunk.
    Read,
    /// The handler doesn't know this chunk; skip it.
    Skip,
}

/// Walks the chunks in what is left of `cur`, calling `handler` on each.
///
/// Afterwards `cur` is always exhausted: the container's size is the ground
/// truth for how far to advance, no matter what the children claimed.
pub fn walk_children<'a, F>(
    cur: &mut Cur<'a>,
    opts: &ReadOptions,
    what: &'static str,
    mut handler: F,
) -> Result<()>
where
    F: FnMut(ChunkHeader, &mut Cur<'a>) -> Result<Dispatch>,
{
    let bytes_to_read = cur.bytes_remaining();
    let mut bytes_read = 0;
    let mut reported = false;

    while bytes_read < bytes_to_read {
        if cur.bytes_remaining() < HEADER_SIZE {
            // Padding too short to be another chunk
            trace!("{} trailing bytes in {}", cur.bytes_remaining(), what);
            break;
        }

        let header = ChunkHeader::read(cur)?;
        let size = header.size as usize;
        if size < HEADER_SIZE {
            warn!("chunk {:#06x} in {} has impossible size {}", header.id, what, size);
            opts.mismatch(what, bytes_read + HEADER_SIZE, bytes_to_read)?;
            reported = true;
            break;
        }

        let payload_len = header.payload_len();
        let mut body = if payload_len <= cur.bytes_remaining() {
            cur.split_off(payload_len)?
        } else if payload_len > cur.input_remaining() {
            // Not just bad bookkeeping; the input really ends here.
            return Err(ErrorKind::UnexpectedEof(payload_len, cur.input_remaining()).into());
        } else {
            // Overruns the container; clamp it to the container's end.
            opts.mismatch(what, bytes_read + size, bytes_to_read)?;
            reported = true;
            let rest = cur.bytes_remaining();
            cur.split_off(rest)?
        };

        match handler(header, &mut body)? {
            Dispatch::Read => {
                if body.bytes_remaining() != 0 {
                    trace!("{} unread bytes at the end of chunk {:#06x} in {}",
                        body.bytes_remaining(), header.id, what);
                }
            }
            Dispatch::Skip => {
                debug!("skipping unknown chunk {:#06x} in {} ({} bytes)",
                    header.id, what, payload_len);
            }
        }

        bytes_read += size;
    }

    if bytes_read != bytes_to_read && !reported {
        opts.mismatch(what, bytes_read, bytes_to_read)?;
    }

    cur.skip_rest();
    Ok(())
}

#[cfg(test)]
mod test_walk {
    use super::*;
    use crate::discreet::test_bytes::chunk;

    fn ids(buf: &[u8], opts: &ReadOptions) -> Result<Vec<(u16, Vec<u8>)>> {
        let mut cur = Cur::new(buf);
        let mut seen = vec![];
        walk_children(&mut cur, opts, "test", |header, body| {
            if header.id == 0xFFFF {
                return Ok(Dispatch::Skip);
            }
            let rest = body.bytes_remaining();
            seen.push((header.id, body.next_n_u8s(rest)?.to_vec()));
            Ok(Dispatch::Read)
        })?;
        assert_eq!(cur.bytes_remaining(), 0);
        Ok(seen)
    }

    #[test]
    fn test_skips_unknown_by_size() {
        let mut buf = chunk(0x0001, &[1, 2]);
        buf.extend(chunk(0xFFFF, &[9; 11]));
        buf.extend(chunk(0x0002, &[3]));

        let seen = ids(&buf, &ReadOptions::default()).unwrap();
        assert_eq!(seen, vec![(0x0001, vec![1, 2]), (0x0002, vec![3])]);
    }

    #[test]
    fn test_trailing_padding() {
        let mut buf = chunk(0x0001, &[1, 2]);
        buf.extend(&[0, 0, 0]);

        let seen = ids(&buf, &ReadOptions::default()).unwrap();
        assert_eq!(seen, vec![(0x0001, vec![1, 2])]);

        match ids(&buf, &ReadOptions::strict()) {
            Err(e) => match *e.kind() {
                ErrorKind::ChunkSizeMismatch("test", 8, 11) => (),
                ref k => panic!("wrong error: {:?}", k),
            },
            Ok(_) => panic!("strict mode accepted padding"),
        }
    }

    #[test]
    fn test_child_overruns_container() {
        // The second child claims 20 bytes but the container only has 7 left.
        let mut inner = chunk(0x0001, &[1]);
        inner.extend(&[0x02, 0x00, 20, 0, 0, 0, 5]);
        let mut buf = inner.clone();
        buf.extend(&[0xAA; 32]);

        let mut cur = Cur::new(&buf);
        let mut container = cur.split_off(inner.len()).unwrap();
        let mut seen = vec![];
        walk_children(&mut container, &ReadOptions::default(), "test", |header, body| {
            seen.push((header.id, body.bytes_remaining()));
            Ok(Dispatch::Read)
        }).unwrap();
        assert_eq!(seen, vec![(0x0001, 1), (0x0002, 1)]);
        // The bytes after the container were not touched.
        assert_eq!(cur.bytes_remaining(), 32);
    }

    #[test]
    fn test_truncated_child() {
        let mut buf = chunk(0x0001, &[1, 2, 3, 4]);
        buf.truncate(8);
        match ids(&buf, &ReadOptions::default()) {
            Err(e) => match *e.kind() {
                ErrorKind::UnexpectedEof(4, 2) => (),
                ref k => panic!("wrong error: {:?}", k),
            },
            Ok(_) => panic!("read a truncated chunk"),
        }
    }
}
