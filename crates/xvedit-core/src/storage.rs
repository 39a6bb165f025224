//! Loading and saving whole files.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::buffer::TextBuffer;
use crate::config::BufferConfig;
use crate::error::{validation, EditError, EditResult};

/// Read the file at `path` into a clean buffer.
///
/// The file size is checked against the configured capacity before any
/// content is read.
pub fn load(path: &Path, config: &BufferConfig) -> EditResult<TextBuffer> {
    let metadata = fs::metadata(path).map_err(|e| EditError::io(path, e))?;
    let size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
    validation::validate_capacity(size, config.capacity())?;

    let content = fs::read(path).map_err(|e| EditError::io(path, e))?;
    let buffer = TextBuffer::from_bytes(content, config)?;

    info!(
        path = %path.display(),
        lines = buffer.num_lines(),
        bytes = buffer.len(),
        "loaded file"
    );
    Ok(buffer)
}

/// Write the buffer to `path`, replacing its previous content.
///
/// The bytes go to a temporary file in the same directory which is then
/// renamed over `path`, so readers see either the old or the new file.
/// When `path` is a symlink the file it points to is rewritten and the
/// link is kept; a dangling link is an error. Existing permissions are
/// carried over. On success the buffer is marked clean.
pub fn save(buffer: &mut TextBuffer, path: &Path) -> EditResult<()> {
    let target = resolve_target(path)?;
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir).map_err(|e| EditError::io(path, e))?;
    if let Ok(metadata) = fs::metadata(&target) {
        temp.as_file()
            .set_permissions(metadata.permissions())
            .map_err(|e| EditError::io(path, e))?;
    }

    temp.write_all(buffer.as_bytes())
        .map_err(|e| EditError::io(path, e))?;
    temp.as_file()
        .sync_all()
        .map_err(|e| EditError::io(path, e))?;
    debug!(temp = %temp.path().display(), "wrote temporary file");

    temp.persist(&target).map_err(|e| EditError::io(path, e.error))?;
    buffer.mark_clean();

    info!(
        path = %path.display(),
        target = %target.display(),
        lines = buffer.num_lines(),
        bytes = buffer.len(),
        "saved file"
    );
    Ok(())
}

/// The file a save should replace: `path` itself, or where it links to.
fn resolve_target(path: &Path) -> EditResult<PathBuf> {
    match fs::symlink_metadata(path) {
        Ok(metadata) if metadata.file_type().is_symlink() => {
            fs::canonicalize(path).map_err(|e| EditError::io(path, e))
        }
        _ => Ok(path.to_path_buf()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_counts_lines() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "notes.txt", b"alpha\nbeta\ngamma\n");

        let buffer = load(&path, &BufferConfig::default()).unwrap();
        assert_eq!(buffer.num_lines(), 3);
        assert_eq!(buffer.line(2), Some(&b"beta"[..]));
        assert!(!buffer.is_dirty());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.txt");

        let result = load(&path, &BufferConfig::default());
        match result {
            Err(EditError::Io { path: failed, .. }) => assert_eq!(failed, path),
            other => panic!("Expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_rejects_oversize_file() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "big.txt", &[b'x'; 64]);

        let result = load(&path, &BufferConfig::new(8, 4));
        assert!(matches!(
            result,
            Err(EditError::Capacity {
                requested: 64,
                capacity: 32
            })
        ));
    }

    #[test]
    fn test_save_round_trip_is_byte_exact() {
        let dir = TempDir::new().unwrap();
        let original: &[u8] = b"first\n\nthird line\nno newline at end";
        let path = write_file(&dir, "doc.txt", original);

        let mut buffer = load(&path, &BufferConfig::default()).unwrap();
        save(&mut buffer, &path).unwrap();

        assert_eq!(fs::read(&path).unwrap(), original);
    }

    #[test]
    fn test_save_writes_edits_and_marks_clean() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "doc.txt", b"a\nb\n");

        let mut buffer = load(&path, &BufferConfig::default()).unwrap();
        buffer.replace(2, "B").unwrap();
        buffer.append("c").unwrap();
        assert!(buffer.is_dirty());

        save(&mut buffer, &path).unwrap();
        assert!(!buffer.is_dirty());
        assert_eq!(fs::read(&path).unwrap(), b"a\nB\nc\n");
    }

    #[test]
    fn test_save_creates_new_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fresh.txt");

        let mut buffer = TextBuffer::new(&BufferConfig::default());
        buffer.append("hello").unwrap();
        save(&mut buffer, &path).unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"hello\n");
        // Only the target remains; the temporary file was renamed.
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no-such-dir").join("doc.txt");

        let mut buffer = TextBuffer::new(&BufferConfig::default());
        buffer.append("x").unwrap();

        assert!(matches!(save(&mut buffer, &path), Err(EditError::Io { .. })));
        assert!(buffer.is_dirty());
    }

    #[cfg(unix)]
    #[test]
    fn test_save_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "script.sh", b"echo hi\n");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();

        let mut buffer = load(&path, &BufferConfig::default()).unwrap();
        buffer.append("echo bye").unwrap();
        save(&mut buffer, &path).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[cfg(unix)]
    #[test]
    fn test_save_through_symlink_keeps_link() {
        use std::os::unix::fs::symlink;

        let dir = TempDir::new().unwrap();
        let real = write_file(&dir, "real.txt", b"old\n");
        let link = dir.path().join("link.txt");
        symlink(&real, &link).unwrap();

        let mut buffer = load(&link, &BufferConfig::default()).unwrap();
        buffer.replace(1, "new").unwrap();
        save(&mut buffer, &link).unwrap();

        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(fs::read(&real).unwrap(), b"new\n");
        assert_eq!(fs::read(&link).unwrap(), b"new\n");
        assert!(!buffer.is_dirty());
    }

    #[cfg(unix)]
    #[test]
    fn test_save_through_dangling_symlink_fails() {
        use std::os::unix::fs::symlink;

        let dir = TempDir::new().unwrap();
        let link = dir.path().join("link.txt");
        symlink(dir.path().join("gone.txt"), &link).unwrap();

        let mut buffer = TextBuffer::from_bytes(b"a\n".to_vec(), &BufferConfig::default()).unwrap();
        buffer.append("b").unwrap();
        assert!(matches!(save(&mut buffer, &link), Err(EditError::Io { .. })));
        assert!(buffer.is_dirty());
        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
    }
}
