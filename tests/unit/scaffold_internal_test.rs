#[cfg(test)]
mod tests {
    use crate::error::ErrorStage;
    use crate::scaffold::fill_new_file;
    use std::io::{self, Write};

    /// Accepts a few bytes, then fails like a full disk.
    struct FailingWriter {
        written: usize,
    }

    impl Write for FailingWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.written >= 4 {
                return Err(io::Error::new(io::ErrorKind::Other, "no space left on device"));
            }
            let n = buf.len().min(4 - self.written);
            self.written += n;
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_failed_write_removes_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sp_001.py");
        std::fs::write(&path, "\"\"\"\n").unwrap();

        let err = fill_new_file(FailingWriter { written: 0 }, &path, b"\"\"\"\nsp_001: stub\n").unwrap_err();
        assert_eq!(err.stage, ErrorStage::Scaffold);
        assert!(err.message.contains("no space left"));
        assert!(!path.exists());
    }

    #[test]
    fn test_successful_write_keeps_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pd_001.py");
        let file = std::fs::File::create(&path).unwrap();
        fill_new_file(file, &path, b"pass\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "pass\n");
    }
}
