use crate::{BlobError, Endian, Locator, SegmentId, SegmentStore};

#[test]
fn starts_at_root() {
    let store = SegmentStore::new(0);

    assert_eq!(store.len(), 1);
    assert_eq!(store.current_segment(), SegmentId::Object(0));
    assert_eq!(
        store.current_position(),
        Locator::new(SegmentId::Object(0), 0)
    );
}

#[test]
fn every_push_allocates() {
    let mut store = SegmentStore::new(0);

    store.push_child_segment();
    store.write_bytes(&[1, 2]);
    store.pop_to_parent_segment();
    store.push_child_segment();

    assert_eq!(store.len(), 3);
    assert_eq!(
        store.current_position(),
        Locator::new(SegmentId::Object(2), 0)
    );
}

#[test]
fn pop_returns_to_parent() {
    let mut store = SegmentStore::new(0);

    store.push_child_segment();
    store.push_child_segment();
    assert_eq!(store.current_segment(), SegmentId::Object(2));
    assert_eq!(store.depth(), 2);

    store.pop_to_parent_segment();
    store.push_child_segment();
    assert_eq!(store.current_segment(), SegmentId::Object(3));
    assert_eq!(store.depth(), 2);

    store.pop_to_parent_segment();
    store.pop_to_parent_segment();
    assert_eq!(store.current_segment(), SegmentId::Object(0));
    assert_eq!(store.len(), 4);
}

#[test]
#[should_panic(expected = "cannot pop the root segment")]
fn pop_at_root_panics() {
    let mut store = SegmentStore::new(0);
    store.pop_to_parent_segment();
}

#[test]
fn align_pads_with_padding_byte() {
    let mut store = SegmentStore::new(0xaa);

    store.write_bytes(&[1]);
    store.align(4).unwrap();
    store.write_bytes(&[2]);

    assert_eq!(store.segments()[0].bytes(), &[1, 0xaa, 0xaa, 0xaa, 2]);
}

#[test]
fn align_records_strictest_request() {
    let mut store = SegmentStore::new(0);

    assert_eq!(store.segments()[0].align(), 0);
    store.align(2).unwrap();
    assert_eq!(store.segments()[0].align(), 2);
    store.align(8).unwrap();
    store.align(4).unwrap();
    assert_eq!(store.segments()[0].align(), 8);
}

#[test]
fn align_when_already_aligned_adds_nothing() {
    let mut store = SegmentStore::new(0xff);

    store.write_bytes(&[0; 4]);
    store.align(4).unwrap();
    store.align(1).unwrap();

    assert_eq!(store.segments()[0].len(), 4);
}

#[test]
fn align_rejects_non_power_of_two() {
    let mut store = SegmentStore::new(0);

    assert!(matches!(store.align(6), Err(BlobError::InvalidAlignment(6))));
}

#[test]
fn writes_go_to_current_segment() {
    let mut store = SegmentStore::new(0);

    store.write_bytes(&[1]);
    store.push_child_segment();
    store.put_uint(Endian::Big, 0x0102, 2);
    store.write_zeros(2);
    store.pop_to_parent_segment();
    store.write_bytes(&[3]);

    let segments = store.into_segments();
    assert_eq!(segments[0].bytes(), &[1, 3]);
    assert_eq!(segments[1].bytes(), &[1, 2, 0, 0]);
}

#[test]
fn segment_id_display() {
    assert_eq!(SegmentId::Object(3).to_string(), "G3");
    assert_eq!(SegmentId::Strings.to_string(), "S");
    assert_eq!(Locator::new(SegmentId::Strings, 16).to_string(), "S@0x10");
}
