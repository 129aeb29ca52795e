//! Output file lifecycle.
//!
//! Plan artifacts are written to a `.part` temp file next to the final path,
//! synced, then renamed into place so a reader never sees a half-written file.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `plan.txt` → `plan.txt.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Write `contents` to `final_path` atomically, creating parent directories.
pub fn write_atomic(final_path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = final_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let temp = temp_path(final_path);
    let mut file =
        File::create(&temp).with_context(|| format!("create temp file {}", temp.display()))?;
    file.write_all(contents)
        .with_context(|| format!("write {}", temp.display()))?;
    file.sync_all()
        .with_context(|| format!("sync {}", temp.display()))?;
    drop(file);
    fs::rename(&temp, final_path).with_context(|| {
        format!(
            "rename {} to {}",
            temp.display(),
            final_path.display()
        )
    })?;
    Ok(())
}

/// Mark a file as executable for its owner (no-op off Unix).
#[cfg(unix)]
pub fn set_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = fs::metadata(path)
        .with_context(|| format!("stat {}", path.display()))?
        .permissions();
    perms.set_mode(perms.mode() | 0o755);
    fs::set_permissions(path, perms).with_context(|| format!("chmod {}", path.display()))?;
    Ok(())
}

#[cfg(not(unix))]
pub fn set_executable(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_path_appends_part() {
        let p = temp_path(Path::new("rename_mapping.txt"));
        assert_eq!(p.to_string_lossy(), "rename_mapping.txt.part");
        let p2 = temp_path(Path::new("/tmp/plan/fix_repository.sh"));
        assert_eq!(p2.to_string_lossy(), "/tmp/plan/fix_repository.sh.part");
    }

    #[test]
    fn write_atomic_creates_parents_and_leaves_no_temp() {
        let dir = tempfile::tempdir().unwrap();
        let final_path = dir.path().join("out").join("plan.txt");
        write_atomic(&final_path, b"a? -> a_\n").unwrap();
        assert_eq!(fs::read_to_string(&final_path).unwrap(), "a? -> a_\n");
        assert!(!temp_path(&final_path).exists());

        write_atomic(&final_path, b"replaced").unwrap();
        assert_eq!(fs::read_to_string(&final_path).unwrap(), "replaced");
    }

    #[cfg(unix)]
    #[test]
    fn set_executable_adds_mode_bits() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.sh");
        write_atomic(&path, b"#!/bin/sh\n").unwrap();
        set_executable(&path).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o100, 0o100);
    }
}
