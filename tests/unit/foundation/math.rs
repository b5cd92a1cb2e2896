use super::*;

#[test]
fn fnv_matches_reference_vectors() {
    assert_eq!(Fnv1a64::new_default().finish(), 0xcbf2_9ce4_8422_2325);

    let mut h = Fnv1a64::new_default();
    h.write_bytes(b"a");
    assert_eq!(h.finish(), 0xaf63_dc4c_8601_ec8c);
}

#[test]
fn fnv_is_incremental() {
    let mut a = Fnv1a64::new_default();
    a.write_bytes(b"podium");
    let mut b = Fnv1a64::new_default();
    b.write_bytes(b"pod");
    b.write_bytes(b"ium");
    assert_eq!(a.finish(), b.finish());
}

#[test]
fn premultiply_then_unpremultiply_keeps_opaque_and_clears_transparent() {
    let mut px = vec![10u8, 20, 30, 255, 200, 100, 50, 0];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[0..4], &[10, 20, 30, 255]);
    assert_eq!(&px[4..8], &[0, 0, 0, 0]);
    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[0..4], &[10, 20, 30, 255]);
}

#[test]
fn half_alpha_survives_within_rounding() {
    let mut px = vec![200u8, 100, 0, 128];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(px, vec![100, 50, 0, 128]);
    unpremultiply_rgba8_in_place(&mut px);
    assert!((i16::from(px[0]) - 200).abs() <= 2);
    assert!((i16::from(px[1]) - 100).abs() <= 2);
    assert_eq!(px[3], 128);
}
