//! Stand-in ffmpeg executables for process-level tests.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

static PROCESS_LOCK: Mutex<()> = Mutex::new(());

/// Serialises tests that write and then execute scripts. A script still open
/// for writing in one thread while another thread forks fails with ETXTBSY.
pub fn process_lock() -> MutexGuard<'static, ()> {
    PROCESS_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}

/// Accepts `-version`; fails like ffmpeg does on an empty input file, otherwise
/// writes a small file at the output path (the last argument).
const FAKE_FFMPEG: &str = r#"#!/bin/sh
if [ "$1" = "-version" ]; then
  echo "ffmpeg version 0.0-fake"
  exit 0
fi
for last; do :; done
if [ ! -s "$2" ]; then
  echo "$2: Invalid data found when processing input" >&2
  exit 1
fi
echo "frame=   15 fps=0.0 q=-0.0 size=N/A" >&2
printf 'APNG' > "$last"
exit 0
"#;

const BROKEN_FFMPEG: &str = r#"#!/bin/sh
echo "ffmpeg: error while loading shared libraries" >&2
exit 127
"#;

fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

pub fn fake_ffmpeg(dir: &Path) -> PathBuf {
    write_script(dir, "fake-ffmpeg", FAKE_FFMPEG)
}

pub fn broken_ffmpeg(dir: &Path) -> PathBuf {
    write_script(dir, "broken-ffmpeg", BROKEN_FFMPEG)
}

/// Creates an input the stand-in tool accepts.
pub fn touch(path: &Path) {
    write_input(path, b"not really a video");
}

/// Creates an input the stand-in tool rejects.
pub fn touch_empty(path: &Path) {
    write_input(path, b"");
}

fn write_input(path: &Path, content: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}
