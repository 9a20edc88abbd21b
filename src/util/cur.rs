use crate::errors::{ErrorKind, Result};
use crate::util::view::{View, Viewable};
use std::fmt;

/// A pointer into a buffer of bytes, bounded to a window of it. Used for
/// binary file parsing.
///
/// The window ends either at the end of the input or at the end of the chunk
/// the cursor was split off for, so a handler can never read into the bytes
/// of a sibling chunk.
#[derive(Copy, Clone)]
pub struct Cur<'a> {
    buf: &'a [u8],
    pos: usize,
    end: usize,
}

impl<'a> Cur<'a> {
    pub fn new(buf: &'a [u8]) -> Cur<'a> {
        Cur { buf, pos: 0, end: buf.len() }
    }

    /// Absolute offset into the input.
    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn bytes_remaining(&self) -> usize {
        self.end - self.pos
    }

    /// Bytes left in the whole input, ignoring this cursor's end bound.
    pub fn input_remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn next<T: Viewable>(&mut self) -> Result<T> {
        let buf = self.next_n_u8s(<T as Viewable>::size())?;
        Ok(<T as Viewable>::view(buf))
    }

    pub fn next_n<T: Viewable>(&mut self, n: usize) -> Result<View<'a, T>> {
        let size = <T as Viewable>::size();
        let buf = self.next_n_u8s(size * n)?;
        Ok(View::from_buf(buf))
    }

    pub fn next_n_u8s(&mut self, n: usize) -> Result<&'a [u8]> {
        if n > self.bytes_remaining() {
            return Err(ErrorKind::UnexpectedEof(n, self.bytes_remaining()).into());
        }
        let res = &self.buf[self.pos .. self.pos + n];
        self.pos += n;
        Ok(res)
    }

    /// Reads a NUL-terminated string. Stops early, without error, if the
    /// window runs out before the terminator. Bytes are taken as Latin-1.
    pub fn next_cstr(&mut self) -> String {
        let window = &self.buf[self.pos .. self.end];
        let len = window.iter().position(|&b| b == 0).unwrap_or(window.len());
        let s = window[..len].iter().map(|&b| b as char).collect();
        // Consume the terminator too, if there was one
        self.pos += (len + 1).min(window.len());
        s
    }

    /// Skip whatever is left in the window.
    pub fn skip_rest(&mut self) {
        self.pos = self.end;
    }

    /// Returns a cursor over the next `n` bytes and moves this one past them.
    pub fn split_off(&mut self, n: usize) -> Result<Cur<'a>> {
        if n > self.bytes_remaining() {
            return Err(ErrorKind::UnexpectedEof(n, self.bytes_remaining()).into());
        }
        let child = Cur { buf: self.buf, pos: self.pos, end: self.pos + n };
        self.pos += n;
        Ok(child)
    }
}

impl<'a> fmt::Debug for Cur<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Cur {{ pos: {}, end: {} }}", self.pos, self.end)
    }
}

#[test]
fn test_split_off_is_bounded() {
    let buf = [1, 0, 2, 0, 3, 0];
    let mut cur = Cur::new(&buf);
    let mut child = cur.split_off(4).unwrap();
    assert_eq!(cur.pos(), 4);
    assert_eq!(child.next::<u16>().unwrap(), 1);
    assert_eq!(child.next::<u16>().unwrap(), 2);
    // The third u16 belongs to the parent, not the child
    assert!(child.next::<u16>().is_err());
    assert_eq!(child.input_remaining(), 2);
    assert_eq!(cur.next::<u16>().unwrap(), 3);
}

#[test]
fn test_cstr() {
    let buf = b"Cube\0Box";
    let mut cur = Cur::new(&buf[..]);
    assert_eq!(cur.next_cstr(), "Cube");
    assert_eq!(cur.pos(), 5);
    // Unterminated: returns what was there
    assert_eq!(cur.next_cstr(), "Box");
    assert_eq!(cur.bytes_remaining(), 0);
    assert_eq!(cur.next_cstr(), "");
}

#[test]
fn test_eof() {
    use crate::errors::ErrorKind;
    let buf = [0xff, 0xff, 0xff];
    let mut cur = Cur::new(&buf);
    match cur.next::<u32>() {
        Err(e) => match *e.kind() {
            ErrorKind::UnexpectedEof(4, 3) => (),
            ref k => panic!("wrong error: {:?}", k),
        },
        Ok(_) => panic!("read past the end"),
    }
}
