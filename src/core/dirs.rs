use crate::core::error::SkillsmithError;
use std::path::PathBuf;

/// Per-user configuration directory for skillsmith
pub fn get_config_directory() -> Result<PathBuf, SkillsmithError> {
    let base = match std::env::consts::OS {
        "linux" | "freebsd" | "netbsd" | "openbsd" => std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .ok()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config"))),
        "macos" => dirs::home_dir().map(|home| home.join("Library/Application Support")),
        _ => dirs::config_dir(),
    };

    base.map(|dir| dir.join("skillsmith"))
        .ok_or(SkillsmithError::ConfigDirectoryNotFound)
}
