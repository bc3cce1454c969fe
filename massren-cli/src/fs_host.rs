use massren_core::{Host, HostError, ResolvedItem};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Host renaming files on disk. Files are always assets; renames stay in the
/// file's own directory.
#[derive(Debug, Default)]
pub struct FsHost;

impl FsHost {
    pub fn new() -> Self {
        Self
    }
}

fn file_name(path: &Path) -> Result<&str, HostError> {
    path.file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| HostError::InvalidName {
            name: path.display().to_string(),
            reason: "not a UTF-8 file name".to_string(),
        })
}

fn check_name(name: &str) -> Result<(), HostError> {
    let reason = if name.trim().is_empty() {
        "file names cannot be empty"
    } else if name == "." || name == ".." {
        "reserved file name"
    } else if name.contains(['/', '\\']) {
        "file names cannot contain path separators"
    } else {
        return Ok(());
    };

    Err(HostError::InvalidName {
        name: name.to_string(),
        reason: reason.to_string(),
    })
}

#[cfg(unix)]
fn same_file(a: &Path, b: &Path) -> io::Result<bool> {
    use std::os::unix::fs::MetadataExt;
    let (a, b) = (fs::metadata(a)?, fs::metadata(b)?);
    Ok(a.dev() == b.dev() && a.ino() == b.ino())
}

#[cfg(not(unix))]
fn same_file(a: &Path, b: &Path) -> io::Result<bool> {
    Ok(fs::canonicalize(a)? == fs::canonicalize(b)?)
}

impl Host for FsHost {
    type Item = PathBuf;

    fn resolve(&self, item: &PathBuf) -> Result<ResolvedItem, HostError> {
        if fs::symlink_metadata(item).is_err() {
            return Err(HostError::NotFound(item.display().to_string()));
        }

        Ok(ResolvedItem {
            name: file_name(item)?.to_string(),
            is_asset: true,
        })
    }

    fn rename_asset(&mut self, item: &PathBuf, new_full_name: &str) -> Result<(), HostError> {
        check_name(new_full_name)?;
        let current = file_name(item)?;
        if current == new_full_name {
            return Ok(());
        }

        let target = item.with_file_name(new_full_name);
        let case_only = current.to_lowercase() == new_full_name.to_lowercase();

        if fs::symlink_metadata(&target).is_ok() {
            // A case-insensitive filesystem reports the file itself under its new spelling
            if !(case_only && same_file(item, &target)?) {
                return Err(HostError::TargetExists {
                    from: current.to_string(),
                    to: new_full_name.to_string(),
                });
            }
        }

        if case_only {
            let temp = item.with_file_name(format!(".{}.massren-tmp", new_full_name));
            fs::rename(item, &temp)?;
            if let Err(e) = fs::rename(&temp, &target) {
                let _ = fs::rename(&temp, item);
                return Err(e.into());
            }
        } else {
            fs::rename(item, &target)?;
        }

        tracing::debug!(from = %item.display(), to = %target.display(), "file renamed");
        Ok(())
    }

    fn set_display_name(&mut self, item: &PathBuf, _new_base_name: &str) -> Result<(), HostError> {
        Err(HostError::InvalidName {
            name: item.display().to_string(),
            reason: "files have no separate display name".to_string(),
        })
    }
}
