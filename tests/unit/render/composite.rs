use super::*;

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    assert_eq!(over(dst, [0, 0, 0, 0]), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src), src);
}

#[test]
fn over_dst_transparent_returns_src() {
    let src = [100, 110, 120, 200];
    assert_eq!(over([0, 0, 0, 0], src), src);
}

#[test]
fn over_half_alpha_blends() {
    // 50% white over opaque black.
    let out = over([0, 0, 0, 255], [128, 128, 128, 128]);
    assert_eq!(out, [128, 128, 128, 255]);
}

#[test]
fn over_in_place_checks_lengths_and_skips_transparent() {
    let mut dst = vec![1, 2, 3, 4, 5, 6, 7, 8];
    let src = vec![0, 0, 0, 0, 9, 9, 9, 255];
    over_in_place(&mut dst, &src).unwrap();
    assert_eq!(dst, vec![1, 2, 3, 4, 9, 9, 9, 255]);

    assert!(over_in_place(&mut dst, &[0, 0, 0]).is_err());
}
