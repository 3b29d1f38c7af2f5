use crate::test_utils::{Labeled, Node, array, le};
use crate::{Arena, BlobWriter, Colors, Config, Pointer, dump};

#[test]
fn dump_pointer_and_string() {
    let mut arena = Arena::new();
    let values = arena.alloc(array([89u32, 99, 109]));
    let root = Labeled {
        values: Pointer::to(values),
        name: "A string!".to_owned(),
    };

    let mut w = BlobWriter::new(le(), &arena).unwrap();
    w.write(&root).unwrap();
    let blob = w.finish().unwrap();

    insta::assert_snapshot!(dump(&blob, Colors::OFF), @r#"
    [layout]
    G0 0000 len 8 align 4
    G1 0008 len 12 align 4
    S  0014 len 10

    [data]
    0000  08 00 00 00 10 00 00 00  59 00 00 00 63 00 00 00
    0010  6d 00 00 00 41 20 73 74  72 69 6e 67 21 00

    [strings]
    0014 "A string!"

    [relocs]
    R0 0000 -> 0008 (+8)
    R1 0004 -> 0014 (+16)
    "#);
}

#[test]
fn dump_cycle() {
    let mut arena = Arena::new();
    let n1 = arena.alloc(Node {
        value: 1,
        next: Pointer::null(),
    });
    let n2 = arena.alloc(Node {
        value: 2,
        next: Pointer::to(n1),
    });
    arena[n1].next = Pointer::to(n2);

    let mut w = BlobWriter::new(Config::new(), &arena).unwrap();
    w.write(&Pointer::<Node>::to(n1)).unwrap();
    let blob = w.finish().unwrap();

    insta::assert_snapshot!(dump(&blob, Colors::OFF), @r"
    [layout]
    G0 0000 len 4 align 4
    G1 0004 len 8 align 4
    G2 000c len 8 align 4

    [data]
    0000  00 00 00 04 00 00 00 01  00 00 00 04 00 00 00 02
    0010  ff ff ff f4

    [relocs]
    R0 0010 -> 0004 (-12)
    R1 0008 -> 000c (+4)
    R2 0000 -> 0004 (+4)
    ");
}

#[test]
fn dump_empty_strings_are_listed() {
    let arena = Arena::new();
    let mut w = BlobWriter::new(Config::new(), &arena).unwrap();
    w.write(&array([String::new(), "x".to_owned()])).unwrap();
    let blob = w.finish().unwrap();

    let out = dump(&blob, Colors::OFF);
    assert!(out.contains("[strings]\n0008 \"\"\n0009 \"x\"\n"));
}

#[test]
fn dump_colors_mark_pointers_and_gaps() {
    let mut arena = Arena::new();
    let values = arena.alloc(array([1u32]));
    let config = Config::new().padding_byte(0xee);

    let mut w = BlobWriter::new(config, &arena).unwrap();
    w.write(&Pointer::to(values)).unwrap();
    w.write(&7u8).unwrap();
    let blob = w.finish().unwrap();

    let out = dump(&blob, Colors::ON);
    assert!(out.contains("\x1b[32m08\x1b[0m"));
    assert!(out.contains("\x1b[2mee\x1b[0m"));
    assert!(!dump(&blob, Colors::OFF).contains('\x1b'));
}

#[test]
fn dump_interior_nul_stays_one_string() {
    let arena = Arena::new();
    let mut w = BlobWriter::new(Config::new(), &arena).unwrap();
    w.write(&array(["a\0b".to_owned(), "c".to_owned()])).unwrap();
    let blob = w.finish().unwrap();

    let out = dump(&blob, Colors::OFF);
    assert!(out.contains("[strings]\n0008 \"a\\0b\"\n000c \"c\"\n"));
}

#[test]
fn dump_colors_mark_headers_and_strings() {
    let arena = Arena::new();
    let mut w = BlobWriter::new(Config::new(), &arena).unwrap();
    w.write(&"hi".to_owned()).unwrap();
    let blob = w.finish().unwrap();

    let out = dump(&blob, Colors::ON);
    assert!(out.starts_with("\x1b[1m[layout]\x1b[0m\n"));
    assert!(out.contains("\x1b[33m\"hi\"\x1b[0m"));
}
