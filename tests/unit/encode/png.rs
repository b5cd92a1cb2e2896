use super::*;

#[test]
fn encodes_and_unpremultiplies() {
    // One opaque red pixel and one half-transparent white pixel (premultiplied).
    let px = vec![255, 0, 0, 255, 128, 128, 128, 128];
    let out = encode_png(2, 1, px).unwrap();
    assert_eq!((out.width, out.height), (2, 1));
    assert!(out.png.starts_with(&[0x89, b'P', b'N', b'G']));

    let back = image::load_from_memory(&out.png).unwrap().to_rgba8();
    assert_eq!(back.get_pixel(0, 0).0, [255, 0, 0, 255]);
    assert_eq!(back.get_pixel(1, 0).0, [255, 255, 255, 128]);
}

#[test]
fn rejects_wrong_buffer_length() {
    let err = encode_png(2, 2, vec![0; 4]).unwrap_err();
    assert!(err.to_string().contains("render error:"));
}

#[test]
fn data_uri_has_png_prefix_and_decodes() {
    let out = encode_png(1, 1, vec![0, 0, 0, 255]).unwrap();
    let uri = out.to_data_uri();
    let payload = uri.strip_prefix("data:image/png;base64,").unwrap();
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .unwrap();
    assert_eq!(bytes, out.as_bytes());
}

#[test]
fn fingerprint_tracks_bytes() {
    let a = encode_png(1, 1, vec![0, 0, 0, 255]).unwrap();
    let b = encode_png(1, 1, vec![0, 0, 0, 255]).unwrap();
    let c = encode_png(1, 1, vec![255, 255, 255, 255]).unwrap();
    assert_eq!(a.fingerprint(), b.fingerprint());
    assert_ne!(a.fingerprint(), c.fingerprint());
}

#[test]
fn write_to_creates_parent_dirs() {
    let dir = std::env::temp_dir().join(format!("podium_png_{}", std::process::id()));
    let path = dir.join("nested").join("out.png");
    let out = encode_png(1, 1, vec![0, 0, 0, 255]).unwrap();
    out.write_to(&path).unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), out.png);
    let _ = std::fs::remove_dir_all(&dir);
}
