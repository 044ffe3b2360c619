use std::fs::{File, OpenOptions, create_dir_all};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Write `path` through `write`, into a temporary sibling that is synced
/// and renamed over `path` only once `write` succeeds.
pub fn write_atomic_with<T, E, F>(path: &Path, write: F) -> Result<T, E>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<T, E>,
    E: From<io::Error>,
{
    let parent = path.parent().filter(|parent| !parent.as_os_str().is_empty());
    if let Some(parent) = parent {
        create_dir_all(parent)?;
    }

    let tmp_path = temp_path(path)?;
    let file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(&tmp_path)?;
    let mut writer = BufWriter::new(file);

    let value = match write(&mut writer) {
        Ok(value) => value,
        Err(err) => {
            drop(writer);
            let _ = std::fs::remove_file(&tmp_path);
            return Err(err);
        }
    };

    if let Err(err) = commit(writer, &tmp_path, path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(err.into());
    }
    if let Some(parent) = parent {
        sync_dir(parent)?;
    }

    Ok(value)
}

fn commit(writer: BufWriter<File>, tmp_path: &Path, path: &Path) -> io::Result<()> {
    let file = writer.into_inner().map_err(|err| err.into_error())?;
    file.sync_all()?;
    drop(file);
    std::fs::rename(tmp_path, path)
}

pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> io::Result<()> {
    write_atomic_with(path, |writer| {
        serde_json::to_writer_pretty(writer, value).map_err(io::Error::from)
    })
}

fn temp_path(path: &Path) -> io::Result<PathBuf> {
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("invalid path for atomic write: {}", path.display()),
        )
    })?;
    let tmp_name = format!("{}.tmp", file_name.to_string_lossy());
    Ok(path.with_file_name(tmp_name))
}

fn sync_dir(path: &Path) -> io::Result<()> {
    let dir = OpenOptions::new().read(true).open(path)?;
    dir.sync_all()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn temp_dir(label: &str) -> PathBuf {
        let mut dir = std::env::temp_dir();
        dir.push(format!("dmpgen_atomic_{label}_{}", uuid::Uuid::new_v4()));
        dir
    }

    #[test]
    fn writes_and_creates_parent_dirs() {
        let path = temp_dir("ok").join("nested").join("seed.js");
        let written = write_atomic_with(&path, |writer| -> io::Result<usize> {
            writer.write_all(b"db=connect(\"x\");\n")?;
            Ok(17)
        })
        .expect("write");

        assert_eq!(written, 17);
        assert_eq!(
            std::fs::read_to_string(&path).expect("read"),
            "db=connect(\"x\");\n"
        );
        assert!(!path.with_file_name("seed.js.tmp").exists());
    }

    #[test]
    fn failed_write_leaves_previous_file() {
        let dir = temp_dir("fail");
        std::fs::create_dir_all(&dir).expect("dir");
        let path = dir.join("seed.js");
        std::fs::write(&path, "previous").expect("seed file");

        let result = write_atomic_with(&path, |writer| -> io::Result<()> {
            writer.write_all(b"partial")?;
            Err(io::Error::other("boom"))
        });

        assert!(result.is_err());
        assert_eq!(std::fs::read_to_string(&path).expect("read"), "previous");
        assert!(!dir.join("seed.js.tmp").exists());
    }

    #[test]
    fn directory_target_fails_without_leftover() {
        let dir = temp_dir("isdir");
        let path = dir.join("out.js");
        std::fs::create_dir_all(&path).expect("target dir");

        let result = write_atomic_with(&path, |writer| -> io::Result<()> {
            writer.write_all(b"db=connect(\"x\");\n")
        });

        assert!(result.is_err());
        assert!(path.is_dir());
        assert!(!dir.join("out.js.tmp").exists());
    }

    #[test]
    fn json_is_pretty_printed() {
        let path = temp_dir("json").join("report.json");
        write_json_atomic(&path, &serde_json::json!({"datasets": 1})).expect("write");
        assert_eq!(
            std::fs::read_to_string(&path).expect("read"),
            "{\n  \"datasets\": 1\n}"
        );
    }
}
