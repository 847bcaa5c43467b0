#[cfg(test)]
mod tests {
    use crate::progress::ProgressDocument;
    use crate::progress::store::atomic_write;

    #[test]
    fn test_normalize_drops_repeated_ids() {
        let mut doc = ProgressDocument {
            solved: vec!["p1".into(), "p2".into(), "p1".into(), "p3".into(), "p2".into()],
            attempts: Vec::new(),
        };
        doc.normalize();
        assert_eq!(doc.solved, vec!["p1", "p2", "p3"]);
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");

        atomic_write(&path, b"first").unwrap();
        atomic_write(&path, b"second").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
        assert!(!dir.path().join("nested").join("state.json.tmp").exists());
    }
}
