use crate::{Endian, align_up, fits_signed, is_power_of_two, padding_for};

#[test]
fn put_uint_big_endian() {
    let mut out = Vec::new();
    Endian::Big.put_uint(&mut out, 0x0102_0304, 4);
    Endian::Big.put_uint(&mut out, 0xbeef, 2);

    assert_eq!(out, [0x01, 0x02, 0x03, 0x04, 0xbe, 0xef]);
}

#[test]
fn put_uint_little_endian() {
    let mut out = Vec::new();
    Endian::Little.put_uint(&mut out, 0x0102_0304, 4);
    Endian::Little.put_uint(&mut out, 0xbeef, 2);

    assert_eq!(out, [0x04, 0x03, 0x02, 0x01, 0xef, 0xbe]);
}

#[test]
fn put_uint_truncates_to_width() {
    let mut out = Vec::new();
    Endian::Big.put_uint(&mut out, 0x1122_3344_5566, 3);

    assert_eq!(out, [0x44, 0x55, 0x66]);
}

#[test]
fn patch_negative_value_is_twos_complement() {
    let mut buf = [0u8; 4];
    Endian::Big.patch_uint(&mut buf, -12i64 as u64);
    assert_eq!(buf, [0xff, 0xff, 0xff, 0xf4]);

    let mut buf = [0u8; 3];
    Endian::Little.patch_uint(&mut buf, -2i64 as u64);
    assert_eq!(buf, [0xfe, 0xff, 0xff]);
}

#[test]
fn read_int_sign_extends() {
    assert_eq!(Endian::Big.read_int(&[0xff, 0xff, 0xff, 0xf4]), -12);
    assert_eq!(Endian::Little.read_int(&[0xfe, 0xff]), -2);
    assert_eq!(Endian::Big.read_int(&[0x00, 0x10]), 16);
    assert_eq!(Endian::Little.read_int(&[0x80]), -128);
}

#[test]
fn read_uint_eight_bytes() {
    let bytes = 0x0102_0304_0506_0708u64.to_le_bytes();
    assert_eq!(Endian::Little.read_uint(&bytes), 0x0102_0304_0506_0708);
    assert_eq!(Endian::Big.read_uint(&bytes), 0x0807_0605_0403_0201);
}

#[test]
fn power_of_two() {
    assert!(is_power_of_two(1));
    assert!(is_power_of_two(2));
    assert!(is_power_of_two(64));
    assert!(!is_power_of_two(0));
    assert!(!is_power_of_two(3));
    assert!(!is_power_of_two(12));
}

#[test]
fn align_up_and_padding() {
    assert_eq!(align_up(0, 4), 0);
    assert_eq!(align_up(1, 4), 4);
    assert_eq!(align_up(8, 8), 8);
    assert_eq!(align_up(9, 8), 16);

    assert_eq!(padding_for(5, 4), 3);
    assert_eq!(padding_for(6, 2), 0);
    assert_eq!(padding_for(7, 1), 0);
}

#[test]
fn fits_signed_bounds() {
    assert!(fits_signed(127, 1));
    assert!(fits_signed(-128, 1));
    assert!(!fits_signed(128, 1));
    assert!(!fits_signed(-129, 1));

    assert!(fits_signed(32767, 2));
    assert!(!fits_signed(32768, 2));

    assert!(fits_signed(i64::MIN, 8));
    assert!(fits_signed(i64::MAX, 8));
}
