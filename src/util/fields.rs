//! The `fields!` macro reads a run of fields from a `&mut Cur`, binding each
//! one to a local and tracing it with its offset.
//!
//! ```ignore
//! fields!(cur, camera {
//!     location: Point,
//!     target: Point,
//!     bank_angle: f32,
//!     focus: f32,
//! });
//! ```
//!
//! `(cstr)` reads a NUL-terminated string and `[T; n]` reads a `View` of
//! `n` elements.

macro_rules! field_helper2 {
    ($cur:ident, [u8; $n:expr]) => { $cur.next_n_u8s($n as usize)? };
    ($cur:ident, [$t:ty; $n:expr]) => { $cur.next_n::<$t>($n as usize)? };
    ($cur:ident, (cstr)) => { $cur.next_cstr() };
    ($cur:ident, $t:ty) => { $cur.next::<$t>()? };
}

macro_rules! field_helper {
    ($c:ident, $name:ident, $field:ident, $ty:tt) => {
        let pos = $c.pos();
        let $field = field_helper2!($c, $ty);
        trace!("{}.{}@{:#x}: {:?}",
            stringify!($name),
            stringify!($field),
            pos,
            $field,
        );
    }
}

macro_rules! fields {
    ($cur:expr, $name:ident { $($field:ident : $ty:tt,)* }) => {
        let c: &mut $crate::util::cur::Cur = $cur;
        $(field_helper!(c, $name, $field, $ty);)*
    };
    ($cur:expr, $name:ident { $($field:ident : $ty:tt),* }) => {
        fields!($cur, $name { $($field : $ty,)* });
    };
}
