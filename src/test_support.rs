//! Shared helpers for tests that launch real processes

use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

static PROCESS_LOCK: Mutex<()> = Mutex::new(());

/// Serialize tests that write and then execute scripts.
///
/// A script written while another test forks can be inherited as an open
/// file and fail to exec with "text file busy".
pub(crate) fn process_lock() -> MutexGuard<'static, ()> {
    PROCESS_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Write an executable shell script standing in for scdl
pub(crate) fn fake_tool(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("fake-scdl");
    {
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "#!/bin/sh").unwrap();
        writeln!(file, "{}", body).unwrap();
        file.sync_all().unwrap();
    }
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}
