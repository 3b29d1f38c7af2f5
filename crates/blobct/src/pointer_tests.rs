use crate::test_utils::{Node, array};
use crate::{Arena, BlobError, Pointer};

#[test]
fn null_pointer() {
    let p = Pointer::<u32>::null();

    assert!(p.is_null());
    assert_eq!(p, Pointer::default());
    assert_eq!(format!("{p:?}"), "Pointer(null)");
}

#[test]
fn null_dereference() {
    let mut arena = Arena::new();
    let p = Pointer::<u32>::null();

    assert!(matches!(p.get(&arena, 0), Err(BlobError::NullDereference)));
    assert!(matches!(
        p.set(&mut arena, 0, 1),
        Err(BlobError::NullDereference)
    ));
    assert!(matches!(p.add(&arena, 1), Err(BlobError::NullDereference)));
}

#[test]
fn get_and_set_through_pointer() {
    let mut arena = Arena::new();
    let values = arena.alloc(array([1u32, 2, 3]));
    let p = arena.elem_pointer(values, 1).unwrap();

    assert_eq!(*p.get(&arena, 0).unwrap(), 2);
    assert_eq!(*p.get(&arena, 1).unwrap(), 3);

    p.set(&mut arena, 1, 30).unwrap();
    *p.get_mut(&mut arena, 0).unwrap() = 20;
    assert_eq!(arena[values].as_slice(), &[1, 20, 30]);
}

#[test]
fn get_out_of_range() {
    let mut arena = Arena::new();
    let values = arena.alloc(array([1u32, 2, 3]));
    let p = arena.elem_pointer(values, 2).unwrap();

    let err = p.get(&arena, 1).unwrap_err();
    assert!(matches!(err, BlobError::BoundsViolation { index: 3, len: 3 }));
}

#[test]
fn offset_overflow_is_out_of_range() {
    let mut arena = Arena::new();
    let values = arena.alloc(array([1u32, 2, 3]));
    let p = Pointer::to(values).add(&arena, 1).unwrap();

    assert!(matches!(
        p.add(&arena, usize::MAX),
        Err(BlobError::BoundsViolation { index: usize::MAX, len: 3 })
    ));
    assert!(matches!(
        p.get(&arena, usize::MAX),
        Err(BlobError::BoundsViolation { index: usize::MAX, len: 3 })
    ));
    assert!(matches!(
        p.set(&mut arena, usize::MAX, 0),
        Err(BlobError::BoundsViolation { index: usize::MAX, len: 3 })
    ));
}

#[test]
fn add_allows_end_position() {
    let mut arena = Arena::new();
    let values = arena.alloc(array([1u32, 2, 3]));
    let p = Pointer::to(values);

    let end = p.add(&arena, 3).unwrap();
    assert_eq!(end, arena.end_pointer(values));
    assert!(matches!(
        p.add(&arena, 4),
        Err(BlobError::BoundsViolation { index: 4, len: 3 })
    ));
}

#[test]
fn composite_offsets_stop_at_one() {
    let mut arena = Arena::new();
    let node = arena.alloc(Node {
        value: 1,
        next: Pointer::null(),
    });
    let p = Pointer::to(node);

    assert_eq!(p.add(&arena, 1).unwrap().offset(), 1);
    assert!(matches!(
        p.add(&arena, 2),
        Err(BlobError::BoundsViolation { index: 2, len: 1 })
    ));
}

#[test]
fn equality_is_by_identity() {
    let mut arena = Arena::new();
    let a = arena.alloc(array([1u32]));
    let b = arena.alloc(array([1u32]));

    assert_eq!(Pointer::to(a), Pointer::to(a));
    assert_ne!(Pointer::to(a), Pointer::to(b));
}

#[test]
fn foreign_target_is_unknown() {
    let mut other = Arena::new();
    let values = other.alloc(array([1u32]));
    let arena = Arena::new();

    let err = Pointer::to(values).get(&arena, 0).unwrap_err();
    assert!(matches!(err, BlobError::UnknownTarget(_)));
}
