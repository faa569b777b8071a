//! Default configuration values

/// Config file names, in lookup order. TOML beats YAML, visible beats dotfile.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    "deployease.toml",
    "deployease.yaml",
    ".deployease.toml",
    ".deployease.yaml",
];

/// Directory under a project root that may hold the config instead of the root itself
pub const CONFIG_SUBDIR: &str = ".github";
