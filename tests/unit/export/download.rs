use super::*;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "photobooth-download-{name}-{}",
        std::process::id()
    ));
    let _ = fs::remove_dir_all(&dir);
    dir
}

#[test]
fn filenames_follow_export_convention() {
    assert_eq!(composite_filename(1_700_000_000_123), "photobooth-1700000000123.jpg");
    assert_eq!(photo_filename(0, 42), "photo-1-42.jpg");
    assert_eq!(photo_filename(3, 42), "photo-4-42.jpg");
}

#[test]
fn directory_download_creates_dir_and_writes_bytes() {
    let dir = scratch_dir("write");
    let download = DirectoryDownload::new(dir.join("nested"));
    let image = EncodedImage::new(2, 2, vec![0xFF, 0xD8, 0xFF, 0xD9]);

    download.persist(&image, "photobooth-1.jpg");

    let written = fs::read(dir.join("nested").join("photobooth-1.jpg")).unwrap();
    assert_eq!(written, vec![0xFF, 0xD8, 0xFF, 0xD9]);
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn directory_download_failure_is_absorbed() {
    let dir = scratch_dir("blocked");
    fs::create_dir_all(&dir).unwrap();
    let blocker = dir.join("file");
    fs::write(&blocker, b"x").unwrap();

    let download = DirectoryDownload::new(blocker.join("sub"));
    download.persist(&EncodedImage::new(1, 1, vec![1]), "a.jpg");
    assert!(!blocker.join("sub").exists());
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn memory_download_records_in_order() {
    let download = MemoryDownload::new();
    download.persist(&EncodedImage::new(1, 1, vec![1]), "a.jpg");
    download.persist(&EncodedImage::new(1, 1, vec![2]), "b.jpg");
    let names: Vec<_> = download.saved().into_iter().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["a.jpg", "b.jpg"]);
}
