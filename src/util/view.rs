use std::fmt;
use std::fmt::Debug;
use std::marker::PhantomData;

/// Types that can be read from a fixed-length little-endian byte sequence.
pub trait Viewable: Sized {
    fn size() -> usize;
    fn view(buf: &[u8]) -> Self;
}

impl Viewable for u8 {
    fn size() -> usize { 1 }
    fn view(buf: &[u8]) -> u8 { buf[0] }
}

impl Viewable for u16 {
    fn size() -> usize { 2 }
    fn view(buf: &[u8]) -> u16 {
        buf[0] as u16 | (buf[1] as u16) << 8
    }
}

impl Viewable for u32 {
    fn size() -> usize { 4 }
    fn view(buf: &[u8]) -> u32 {
        buf[0] as u32 | (buf[1] as u32) << 8 | (buf[2] as u32) << 16 | (buf[3] as u32) << 24
    }
}

impl Viewable for f32 {
    fn size() -> usize { 4 }
    fn view(buf: &[u8]) -> f32 {
        f32::from_bits(<u32 as Viewable>::view(buf))
    }
}

/// A point or direction: three consecutive floats.
impl Viewable for [f32; 3] {
    fn size() -> usize { 12 }
    fn view(buf: &[u8]) -> [f32; 3] {
        [
            <f32 as Viewable>::view(&buf[0..4]),
            <f32 as Viewable>::view(&buf[4..8]),
            <f32 as Viewable>::view(&buf[8..12]),
        ]
    }
}

impl<T,S> Viewable for (T,S) where
    T: Viewable,
    S: Viewable
{
    fn size() -> usize { <T as Viewable>::size() + <S as Viewable>::size() }
    fn view(buf: &[u8]) -> (T,S) {
        let split = <T as Viewable>::size();
        let t = <T as Viewable>::view(&buf[..split]);
        let s = <S as Viewable>::view(&buf[split..]);
        (t,s)
    }
}

impl<T,S,P,Q> Viewable for (T,S,P,Q) where
    T: Viewable,
    S: Viewable,
    P: Viewable,
    Q: Viewable,
{
    fn size() -> usize { <((T,S),(P,Q)) as Viewable>::size() }
    fn view(buf: &[u8]) -> (T,S,P,Q) {
        let ((t,s),(p,q)) = <((T,S),(P,Q)) as Viewable>::view(buf);
        (t,s,p,q)
    }
}

/// A byte buffer interpreted as an array of Viewable elements.
pub struct View<'a, T> {
    buf: &'a [u8],
    _marker: PhantomData<fn() -> T>,
}

// Not derived: that would require T: Copy.
impl<'a, T> Clone for View<'a, T> {
    fn clone(&self) -> Self { *self }
}
impl<'a, T> Copy for View<'a, T> {}

impl<'a, T: Viewable> View<'a, T> {
    pub fn from_buf(buf: &'a [u8]) -> View<'a, T> {
        let size = <T as Viewable>::size();
        assert!(size == 0 || buf.len() % size == 0);
        View { buf, _marker: PhantomData }
    }

    pub fn len(&self) -> usize {
        let size = <T as Viewable>::size();
        self.buf.len() / size
    }
}

impl<'a, T: Viewable + Debug> Debug for View<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(*self).finish()
    }
}

impl<'a, T: Viewable> Iterator for View<'a, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.buf.is_empty() {
            None
        } else {
            let size = <T as Viewable>::size();
            let item = <T as Viewable>::view(&self.buf[0..size]);
            self.buf = &self.buf[size..];
            Some(item)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }
}

impl<'a, T: Viewable> ExactSizeIterator for View<'a, T> {}

#[test]
fn test_little_endian() {
    let buf = [0x4d, 0x4d, 0x78, 0x56, 0x34, 0x12, 0x00, 0x00, 0x80, 0x3f];
    assert_eq!(<u16 as Viewable>::view(&buf[0..2]), 0x4d4d);
    assert_eq!(<u32 as Viewable>::view(&buf[2..6]), 0x12345678);
    assert_eq!(<f32 as Viewable>::view(&buf[6..10]), 1.0);

    let pairs: View<(u8, u8)> = View::from_buf(&buf[0..4]);
    assert_eq!(pairs.len(), 2);
    assert_eq!(pairs.collect::<Vec<_>>(), vec![(0x4d, 0x4d), (0x78, 0x56)]);
}
