use super::*;

#[test]
fn memory_source_returns_inserted_bytes() {
    let src = MemorySource::new().with("bg", vec![1, 2, 3]);
    assert_eq!(src.fetch("bg").unwrap(), vec![1, 2, 3]);
    assert!(src.fetch("missing").is_err());
}

#[test]
fn closures_are_sources() {
    let src = |loc: &str| -> RankCardResult<Vec<u8>> { Ok(loc.as_bytes().to_vec()) };
    assert_eq!(src.fetch("ab").unwrap(), b"ab".to_vec());
}

#[test]
fn fs_source_reads_relative_to_root() {
    let dir = std::env::temp_dir().join(format!("rankcard_fs_source_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("a.bin"), [9u8, 8, 7]).unwrap();

    let src = FsSource::new(&dir);
    assert_eq!(src.fetch("a.bin").unwrap(), vec![9, 8, 7]);

    let err = src.fetch("nope.bin").unwrap_err();
    assert!(err.to_string().contains("nope.bin"));

    let _ = std::fs::remove_dir_all(&dir);
}
