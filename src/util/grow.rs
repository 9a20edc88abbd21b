//! Growable record arrays.
//!
//! Record lists in a decoded scene start with room for `GROW_BY` entries and
//! gain another `GROW_BY` slots whenever they fill up, rather than doubling.
//! The `Vec` length is always the number of populated entries.

pub const GROW_BY: usize = 8;

/// Makes an empty list with the initial padding.
pub fn padded<T>() -> Vec<T> {
    Vec::with_capacity(GROW_BY)
}

/// Pushes `item`, growing the backing storage by `GROW_BY` if it is full,
/// and returns a reference to the new entry so it can be filled in.
pub fn push_padded<T>(v: &mut Vec<T>, item: T) -> &mut T {
    if v.len() == v.capacity() {
        v.reserve_exact(GROW_BY);
    }
    let idx = v.len();
    v.push(item);
    &mut v[idx]
}

#[test]
fn test() {
    let mut v = padded();
    assert!(v.capacity() >= GROW_BY);
    for i in 0..GROW_BY + 1 {
        *push_padded(&mut v, 0) = i;
    }
    assert_eq!(v.len(), GROW_BY + 1);
    assert!(v.capacity() >= 2 * GROW_BY);
    assert_eq!(v[GROW_BY], GROW_BY);
}
