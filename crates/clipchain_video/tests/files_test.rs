use clipchain_video::{cleanup, validate_files};
use std::path::PathBuf;

#[tokio::test]
async fn test_validate_empty_list_is_true() {
    assert!(validate_files(&[]).await);
}

#[tokio::test]
async fn test_validate_missing_file_is_false() {
    let dir = tempfile::tempdir().unwrap();
    assert!(!validate_files(&[dir.path().join("missing.mp4")]).await);
}

#[tokio::test]
async fn test_validate_rejects_zero_length() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.mp4");
    let empty = dir.path().join("empty.mp4");
    std::fs::write(&good, b"data").unwrap();
    std::fs::write(&empty, b"").unwrap();

    assert!(validate_files(std::slice::from_ref(&good)).await);
    assert!(!validate_files(&[good, empty]).await);
}

#[tokio::test]
async fn test_cleanup_is_best_effort() {
    let dir = tempfile::tempdir().unwrap();
    let paths: Vec<PathBuf> = (0..3).map(|i| dir.path().join(format!("c{}.mp4", i))).collect();
    for path in &paths[..2] {
        std::fs::write(path, b"x").unwrap();
    }

    let removed = cleanup(&paths).await;

    assert_eq!(removed, 2);
    assert!(paths.iter().all(|p| !p.exists()));
}
