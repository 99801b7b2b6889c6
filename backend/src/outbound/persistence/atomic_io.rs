//! Atomic file writes for the snapshot store.
//!
//! The record collection is rewritten wholesale on every mutation. Writing
//! to a temporary file and renaming it over the target keeps a crash from
//! leaving a half-written document behind.

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};

use cap_std::fs::{Dir, OpenOptions};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Write `contents` to `file_name` inside `dir` via a temp file and rename.
///
/// The temporary file is hidden, named from the process id plus a counter so
/// concurrent writers in the same directory never collide, and fsynced
/// before the rename.
pub(crate) fn write_atomic(dir: &Dir, file_name: &str, contents: &str) -> io::Result<()> {
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let tmp_name = format!(".{file_name}.tmp.{}.{counter}", std::process::id());

    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir.open_with(&tmp_name, &options)?;

    if let Err(err) = file
        .write_all(contents.as_bytes())
        .and_then(|()| file.sync_all())
    {
        drop(file);
        let _ = dir.remove_file(&tmp_name);
        return Err(err);
    }
    drop(file);

    if let Err(err) = rename_over_target(dir, &tmp_name, file_name) {
        let _ = dir.remove_file(&tmp_name);
        return Err(err);
    }

    // Best-effort directory sync; ignore failures.
    let _ = dir.open(".").and_then(|d| d.sync_all());
    Ok(())
}

#[cfg(windows)]
fn rename_over_target(dir: &Dir, tmp_name: &str, target: &str) -> io::Result<()> {
    // Windows rename fails if the target exists, so remove it first.
    match dir.remove_file(target) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    dir.rename(tmp_name, dir, target)
}

#[cfg(not(windows))]
fn rename_over_target(dir: &Dir, tmp_name: &str, target: &str) -> io::Result<()> {
    dir.rename(tmp_name, dir, target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cap_std::ambient_authority;

    fn scratch_dir() -> (tempfile::TempDir, Dir) {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let dir = Dir::open_ambient_dir(tmp.path(), ambient_authority()).expect("open temp dir");
        (tmp, dir)
    }

    #[test]
    fn writes_contents_to_target() {
        let (_tmp, dir) = scratch_dir();
        write_atomic(&dir, "snapshot.json", r#"{"criminals":[]}"#).expect("write");
        let contents = dir.read_to_string("snapshot.json").expect("read back");
        assert_eq!(contents, r#"{"criminals":[]}"#);
    }

    #[test]
    fn replaces_existing_target() {
        let (_tmp, dir) = scratch_dir();
        write_atomic(&dir, "snapshot.json", "first").expect("first write");
        write_atomic(&dir, "snapshot.json", "second").expect("second write");
        assert_eq!(dir.read_to_string("snapshot.json").expect("read"), "second");
    }

    #[test]
    fn leaves_no_temp_files_behind() {
        let (_tmp, dir) = scratch_dir();
        write_atomic(&dir, "snapshot.json", "payload").expect("write");
        let names: Vec<String> = dir
            .entries()
            .expect("list dir")
            .map(|entry| {
                entry
                    .expect("dir entry")
                    .file_name()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        assert_eq!(names, vec!["snapshot.json".to_owned()]);
    }
}
