use crate::models::error::SError;
use camino::Utf8Path;
use std::fs::{self, File};
use std::io::{ErrorKind, Read, Write};
use tracing::debug;

pub struct FileUtils;

impl FileUtils {
    /// Streams `content` into `dst`, creating parent directories and truncating any existing file.
    /// Read failures are reported as [`SError::ArchiveRead`], everything else as
    /// [`SError::FilesystemWrite`]. A copy that fails halfway leaves no file at `dst`.
    pub fn write_entry(entry: &str, content: &mut dyn Read, dst: &Utf8Path) -> Result<(), SError> {
        if let Some(parent) = dst.parent() {
            fs::create_dir_all(parent).map_err(|e| SError::fs_write(parent, e))?;
        }

        let mut out = File::create(dst).map_err(|e| SError::fs_write(dst, e))?;
        let copied = copy_stream(entry, content, &mut out, dst);

        if copied.is_err() {
            drop(out);
            // Don't leave a truncated file behind.
            let _ = fs::remove_file(dst);
        }
        copied
    }

    pub fn is_dir_empty(path: &Utf8Path) -> bool {
        fs::read_dir(path)
            .map(|mut i| i.next().is_none())
            .unwrap_or(false)
    }

    /// True when `path` lies below `root`, never when it is `root` itself.
    /// Component-wise, so trailing separators don't matter; case-insensitive on Windows.
    pub fn is_strictly_within(path: &Utf8Path, root: &Utf8Path) -> bool {
        let path: Vec<_> = path.components().map(|c| fold_case(c.as_str())).collect();
        let root: Vec<_> = root.components().map(|c| fold_case(c.as_str())).collect();

        path.len() > root.len() && path.starts_with(&root)
    }

    /// Removes now-empty directories from `file`'s parent upward, stopping at the first
    /// non-empty one or at `root`, which is never removed. Failures end the ascent quietly.
    pub fn prune_empty_ancestors(file: &Utf8Path, root: &Utf8Path) {
        let mut current = file.parent();

        while let Some(dir) = current {
            if !Self::is_strictly_within(dir, root) || !Self::is_dir_empty(dir) {
                break;
            }
            if let Err(e) = fs::remove_dir(dir) {
                debug!("stopped pruning at {dir}: {e}");
                break;
            }
            debug!("removed empty directory {dir}");
            current = dir.parent();
        }
    }
}

fn copy_stream(entry: &str, content: &mut dyn Read, out: &mut dyn Write, dst: &Utf8Path) -> Result<(), SError> {
    let mut buf = vec![0u8; 64 * 1024];

    loop {
        let n = match content.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(SError::archive_read(entry, e)),
        };
        out.write_all(&buf[..n]).map_err(|e| SError::fs_write(dst, e))?;
    }

    out.flush().map_err(|e| SError::fs_write(dst, e))
}

#[cfg(windows)]
fn fold_case(s: &str) -> String {
    s.to_lowercase()
}

#[cfg(not(windows))]
fn fold_case(s: &str) -> String {
    s.to_owned()
}
