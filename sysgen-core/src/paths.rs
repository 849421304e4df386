//! Well-known file and directory names inside a project directory.

use std::path::{Path, PathBuf};

pub const STORE_FILE: &str = "system.json";
pub const STORE_TMP_FILE: &str = "system.json.tmp";
pub const GENERATED_DIR: &str = "generated";
pub const STAGING_DIR: &str = "generated.tmp";
pub const RETIRED_DIR: &str = "generated.old";
pub const TEMPLATES_DIR: &str = "templates";

/// Where `install.sh` copies unit files on the target host.
pub const UNIT_INSTALL_DIR: &str = "/etc/systemd/system";

pub fn store_path(dir: &Path) -> PathBuf {
    dir.join(STORE_FILE)
}

pub fn generated_dir(dir: &Path) -> PathBuf {
    dir.join(GENERATED_DIR)
}

pub fn staging_dir(dir: &Path) -> PathBuf {
    dir.join(STAGING_DIR)
}

pub fn retired_dir(dir: &Path) -> PathBuf {
    dir.join(RETIRED_DIR)
}

pub fn templates_dir(dir: &Path) -> PathBuf {
    dir.join(TEMPLATES_DIR)
}
