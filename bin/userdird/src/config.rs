//! Server configuration file handling.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Contents of the server's TOML config file.
///
/// All fields are optional; CLI flags override them and built-in
/// defaults fill the rest.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerConfig {
    /// Listen address, e.g. "0.0.0.0:8080".
    #[serde(default)]
    pub listen: Option<String>,

    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
    /// Directory holding all persistent state.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Explicit SQLite database path, overriding `{data_dir}/data.sqlite`.
    #[serde(default)]
    pub sqlite_path: Option<PathBuf>,
}

impl ServerConfig {
    /// Resolve a context name or path to a config file path.
    ///
    /// A bare name resolves to `/etc/userdir/<name>.toml`; anything
    /// containing `/` or `.` is used as a path directly.
    pub fn resolve_path(name_or_path: &str) -> PathBuf {
        if name_or_path.contains('/') || name_or_path.contains('.') {
            PathBuf::from(name_or_path)
        } else {
            PathBuf::from(format!("/etc/userdir/{}.toml", name_or_path))
        }
    }

    /// Load and parse the config file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read {}: {}", path.display(), e))?;
        let config = toml::from_str(&raw)
            .map_err(|e| anyhow::anyhow!("failed to parse {}: {}", path.display(), e))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_resolve_path() {
        assert_eq!(
            ServerConfig::resolve_path("prod"),
            PathBuf::from("/etc/userdir/prod.toml")
        );
        assert_eq!(
            ServerConfig::resolve_path("./local.toml"),
            PathBuf::from("./local.toml")
        );
        assert_eq!(
            ServerConfig::resolve_path("/opt/userdir/cfg.toml"),
            PathBuf::from("/opt/userdir/cfg.toml")
        );
    }

    #[test]
    fn test_load() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "listen = \"127.0.0.1:9000\"\n\n[storage]\ndata_dir = \"/var/lib/userdir\""
        )
        .unwrap();

        let config = ServerConfig::load(file.path()).unwrap();
        assert_eq!(config.listen.as_deref(), Some("127.0.0.1:9000"));
        assert_eq!(
            config.storage.data_dir,
            Some(PathBuf::from("/var/lib/userdir"))
        );
        assert_eq!(config.storage.sqlite_path, None);
    }

    #[test]
    fn test_load_empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let config = ServerConfig::load(file.path()).unwrap();
        assert_eq!(config.listen, None);
        assert_eq!(config.storage.data_dir, None);
    }
}
