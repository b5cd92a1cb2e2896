use super::*;

fn temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("podium_uploads_{tag}_{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

#[test]
fn sanitizes_names() {
    assert_eq!(sanitize_file_name("ada.png"), "ada.png");
    assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
    assert_eq!(sanitize_file_name("C:\\pics\\my photo.jpg"), "my_photo.jpg");
    assert_eq!(sanitize_file_name(".hidden"), "hidden");
    assert_eq!(sanitize_file_name(""), "upload");
    assert_eq!(sanitize_file_name("..."), "upload");
}

#[test]
fn accepts_and_returns_prefixed_url() {
    let root = temp_dir("accept");
    let store = DirUploadStore::new(root.join("uploads"));
    let receipt = store.accept("ada.png", b"pngbytes").unwrap();

    assert!(receipt.url.starts_with("/uploads/"));
    assert!(receipt.url.ends_with("-ada.png"));
    let stamp = receipt
        .url
        .trim_start_matches("/uploads/")
        .trim_end_matches("-ada.png");
    assert!(stamp.parse::<u128>().is_ok(), "{stamp}");
    assert_eq!(std::fs::read(&receipt.path).unwrap(), b"pngbytes");

    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn same_name_twice_gets_distinct_files() {
    let root = temp_dir("twice");
    let store = DirUploadStore::new(&root);
    let a = store.accept("x.png", b"a").unwrap();
    let b = store.accept("x.png", b"b").unwrap();
    assert_ne!(a.url, b.url);
    assert_eq!(std::fs::read(&a.path).unwrap(), b"a");
    assert_eq!(std::fs::read(&b.path).unwrap(), b"b");
    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn rejects_empty_and_oversized() {
    let root = temp_dir("limits");
    let mut store = DirUploadStore::new(&root);

    let err = store.accept("x.png", b"").unwrap_err();
    assert!(err.to_string().contains("no file uploaded"));

    store.max_bytes = 4;
    let err = store.accept("x.png", b"12345").unwrap_err();
    assert!(matches!(err, PodiumError::Validation(_)));
    assert!(store.accept("x.png", b"1234").is_ok());

    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn default_limit_is_five_mib() {
    assert_eq!(DirUploadStore::new("u").max_bytes, 5 * 1024 * 1024);
}

#[test]
fn custom_prefix_without_double_slash() {
    let root = temp_dir("prefix");
    let store = DirUploadStore {
        url_prefix: "/media/".to_string(),
        ..DirUploadStore::new(&root)
    };
    let receipt = store.accept("b.png", b"b").unwrap();
    assert!(receipt.url.starts_with("/media/"));
    assert!(!receipt.url.contains("//"));
    let _ = std::fs::remove_dir_all(&root);
}
