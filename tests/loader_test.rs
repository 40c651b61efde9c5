//! Integration tests for loading documents from disk

mod common;

use common::{RecordingRenderer, sample_building};
use gbxml_scene::{Error, FsLoader, LoadOutcome, SceneSession, TextLoader};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_fs_loader_reads_whole_document() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(sample_building().as_bytes()).unwrap();
    file.flush().unwrap();

    let text = FsLoader.load(file.path().to_str().unwrap()).unwrap();
    assert_eq!(text, sample_building());
}

#[test]
fn test_session_loads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("office.xml");
    std::fs::write(&path, sample_building()).unwrap();

    let mut session = SceneSession::new(RecordingRenderer::new());
    let outcome = session.load(&FsLoader, path.to_str().unwrap()).unwrap();

    assert!(matches!(outcome, LoadOutcome::Applied(ref s) if s.surfaces == 4));
    assert!(session.tick());
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.xml");

    let err = FsLoader.load(path.to_str().unwrap()).unwrap_err();
    assert!(matches!(err, Error::Io(ref e) if e.kind() == std::io::ErrorKind::NotFound));
}
