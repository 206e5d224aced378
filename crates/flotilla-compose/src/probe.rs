//! Executable probing and the file-move primitive used by plugin install.

use std::path::{Path, PathBuf};

fn os_program(program: &str) -> String {
    if cfg!(windows) {
        format!("{program}.exe")
    } else {
        program.to_owned()
    }
}

/// Path of `program` under `root`. An empty root yields the bare program
/// name, which `is_program_present` then resolves against the search path.
pub fn program_path(root: &Path, program: &str) -> PathBuf {
    root.join(os_program(program))
}

/// Whether `program` names a runnable executable. A bare name is looked up
/// in every `PATH` directory; a path with components is checked directly.
pub fn is_program_present(program: &Path) -> bool {
    if program.components().count() > 1 {
        return is_executable(program);
    }
    let Some(search_path) = std::env::var_os("PATH") else {
        return false;
    };
    std::env::split_paths(&search_path).any(|dir| is_executable(&dir.join(program)))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Move `from` to `to`, falling back to copy-and-delete when a plain rename
/// fails (the bundled plugin and the plugin directory may live on different
/// filesystems).
pub fn move_file(from: &Path, to: &Path) -> std::io::Result<()> {
    if std::fs::rename(from, to).is_ok() {
        return Ok(());
    }
    std::fs::copy(from, to)?;
    std::fs::remove_file(from)
}
