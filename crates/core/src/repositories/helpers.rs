//! Filesystem helpers shared by the triage store and the audit log.

use crate::{TriageError, TriageResult};
use std::{
    fs,
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};
use triage_uuid::ShardableUuid;

/// Creates a unique sharded directory within `base_dir`.
///
/// Generates identifiers with `uuid_source` and creates the matching sharded directory,
/// retrying up to 5 times if a directory already exists (collision or external interference).
///
/// # Errors
///
/// Returns [`TriageError::RecordDirCreation`] if directory creation fails or no free
/// identifier is found after 5 attempts.
pub(crate) fn create_unique_sharded_dir(
    base_dir: &Path,
    mut uuid_source: impl FnMut() -> ShardableUuid,
) -> TriageResult<(ShardableUuid, PathBuf)> {
    for _attempt in 0..5 {
        let uuid = uuid_source();
        let candidate = uuid.sharded_dir(base_dir);

        if candidate.exists() {
            continue;
        }

        if let Some(parent) = candidate.parent() {
            fs::create_dir_all(parent).map_err(TriageError::RecordDirCreation)?;
        }

        match fs::create_dir(&candidate) {
            Ok(()) => return Ok((uuid, candidate)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(TriageError::RecordDirCreation(e)),
        }
    }

    Err(TriageError::RecordDirCreation(io::Error::new(
        ErrorKind::AlreadyExists,
        "failed to allocate a unique triage directory after 5 attempts",
    )))
}

/// Replaces `path` with `contents` by writing a sibling temp file and renaming it over.
///
/// Readers see either the old file or the new one, never a partial write.
pub(crate) fn write_atomic(path: &Path, contents: &str) -> TriageResult<()> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tmp_path = path.with_file_name(format!(".{}.tmp", file_name));

    fs::write(&tmp_path, contents).map_err(TriageError::FileWrite)?;
    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(TriageError::FileWrite(e));
    }
    Ok(())
}

/// Lists `<base_dir>/<s1>/<s2>/<id>/<file_name>` for every record that has the file.
///
/// Unreadable directories are skipped; a missing `base_dir` yields an empty list.
pub(crate) fn sharded_files(base_dir: &Path, file_name: &str) -> Vec<PathBuf> {
    let mut files = Vec::new();

    let s1_iter = match fs::read_dir(base_dir) {
        Ok(it) => it,
        Err(_) => return files,
    };
    for s1 in s1_iter.flatten() {
        let s1_path = s1.path();
        if !s1_path.is_dir() {
            continue;
        }

        let s2_iter = match fs::read_dir(&s1_path) {
            Ok(it) => it,
            Err(_) => continue,
        };
        for s2 in s2_iter.flatten() {
            let s2_path = s2.path();
            if !s2_path.is_dir() {
                continue;
            }

            let id_iter = match fs::read_dir(&s2_path) {
                Ok(it) => it,
                Err(_) => continue,
            };
            for id_ent in id_iter.flatten() {
                let candidate = id_ent.path().join(file_name);
                if candidate.is_file() {
                    files.push(candidate);
                }
            }
        }
    }

    files
}

/// Removes `dir` and then any shard directories left empty above it, stopping at `base_dir`.
pub(crate) fn remove_record_dir(base_dir: &Path, dir: &Path) -> TriageResult<()> {
    fs::remove_dir_all(dir).map_err(TriageError::FileDelete)?;

    let mut current = dir.parent();
    while let Some(parent) = current {
        if parent == base_dir || !parent.starts_with(base_dir) {
            break;
        }
        // Fails when not empty, which ends the walk.
        if fs::remove_dir(parent).is_err() {
            break;
        }
        current = parent.parent();
    }
    Ok(())
}
