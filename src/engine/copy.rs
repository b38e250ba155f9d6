//! Copying matched replays into a destination directory.

use std::fs::{self, File};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

/// Destination path for `replay` inside `dir`.
pub fn destination(replay: &Path, dir: &Path) -> PathBuf {
    match replay.file_name() {
        Some(name) => dir.join(name),
        None => dir.join(replay),
    }
}

/// Copy a regular file to `dst`, replacing any regular file already there.
///
/// Copying a file onto itself is a no-op. Non-regular sources or
/// destinations (directories, devices) are refused.
pub fn copy_file(src: &Path, dst: &Path) -> io::Result<()> {
    let src_meta = fs::metadata(src)?;
    if !src_meta.is_file() {
        return Err(io::Error::new(
            ErrorKind::InvalidInput,
            format!("non-regular source file {}", src.display()),
        ));
    }

    match fs::metadata(dst) {
        Ok(dst_meta) => {
            if !dst_meta.is_file() {
                return Err(io::Error::new(
                    ErrorKind::InvalidInput,
                    format!("non-regular destination file {}", dst.display()),
                ));
            }
            if fs::canonicalize(src)? == fs::canonicalize(dst)? {
                return Ok(());
            }
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }

    let mut input = File::open(src)?;
    let mut output = File::create(dst)?;
    io::copy(&mut input, &mut output)?;
    output.sync_all()
}
