//! Configuration loading and data folder resolution
//!
//! Configuration comes from a TOML file with environment variable
//! overrides, resolved in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. Default per-platform config location
//!
//! The data folder (holding the SQLite database) resolves the same way,
//! falling back to an OS-dependent default.

use crate::{Error, Result};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "KLUSSITE_CONFIG";
/// Environment variable overriding the data folder
pub const DATA_DIR_ENV: &str = "KLUSSITE_DATA";

/// Image CDN (Cloudinary-style unsigned upload) settings
#[derive(Debug, Clone, Deserialize)]
pub struct ImageHostConfig {
    /// Cloud name, forms the upload URL path segment
    pub cloud_name: String,
    /// Unsigned upload preset configured on the CDN side
    pub upload_preset: String,
    /// Folder prefix; album name is appended per upload
    #[serde(default = "default_folder_root")]
    pub folder_root: String,
}

fn default_folder_root() -> String {
    "klussite/portfolio".to_string()
}

impl ImageHostConfig {
    /// Upload endpoint URL for this cloud
    pub fn upload_url(&self) -> String {
        format!(
            "https://api.cloudinary.com/v1_1/{}/image/upload",
            self.cloud_name
        )
    }
}

/// Service configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Bind host for the HTTP server
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port for the HTTP server
    #[serde(default = "default_port")]
    pub port: u16,
    /// Data folder; defaults to the OS-dependent location when absent
    pub data_dir: Option<PathBuf>,
    /// Hex SHA-256 of the admin password
    pub admin_password_hash: String,
    /// Image CDN settings
    pub image_host: ImageHostConfig,
    /// Optional webhook notified about new quote requests
    pub notify_webhook: Option<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8420
}

impl SiteConfig {
    /// Load configuration, resolving the file path per the priority order
    pub fn load(cli_path: Option<&Path>) -> Result<Self> {
        let path = resolve_config_path(cli_path)?;
        info!("Loading configuration: {}", path.display());
        Self::load_from(&path)
    }

    /// Load configuration from an explicit file path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Cannot read config file {}: {}", path.display(), e))
        })?;
        let config: SiteConfig = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Invalid config file: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.admin_password_hash.len() != 64
            || !self.admin_password_hash.bytes().all(|b| b.is_ascii_hexdigit())
        {
            return Err(Error::Config(
                "admin_password_hash must be a 64-char hex SHA-256 digest".to_string(),
            ));
        }
        if self.image_host.cloud_name.trim().is_empty() {
            return Err(Error::Config("image_host.cloud_name must be set".to_string()));
        }
        Ok(())
    }

    /// Data folder, with environment override and OS default fallback
    pub fn data_dir(&self) -> PathBuf {
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            return PathBuf::from(dir);
        }
        if let Some(dir) = &self.data_dir {
            return dir.clone();
        }
        default_data_dir()
    }

    /// Path of the SQLite database inside the data folder
    pub fn database_path(&self) -> PathBuf {
        self.data_dir().join("klussite.db")
    }

    /// Check a submitted admin password against the configured hash
    pub fn verify_admin_password(&self, password: &str) -> bool {
        hash_password(password) == self.admin_password_hash.to_lowercase()
    }
}

/// Hex SHA-256 digest of a password, as stored in the config file
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    let digest = hasher.finalize();
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

fn resolve_config_path(cli_path: Option<&Path>) -> Result<PathBuf> {
    // Priority 1: command-line argument
    if let Some(path) = cli_path {
        return Ok(path.to_path_buf());
    }

    // Priority 2: environment variable
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        return Ok(PathBuf::from(path));
    }

    // Priority 3: per-platform default location
    let default = dirs::config_dir()
        .map(|d| d.join("klussite").join("config.toml"))
        .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;
    if default.exists() {
        return Ok(default);
    }
    Err(Error::Config(format!(
        "No config file found. Provide --config, set {}, or create {}",
        CONFIG_ENV,
        default.display()
    )))
}

/// OS-dependent default data folder
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("klussite"))
        .unwrap_or_else(|| PathBuf::from("./klussite_data"))
}

/// Create the data folder if missing
pub fn ensure_data_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        std::fs::create_dir_all(dir)?;
        info!("Created data folder: {}", dir.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    const VALID: &str = r#"
        admin_password_hash = "2bb80d537b1da3e38bd30361aa855686bde0eacd7162fef6a25fe97bf527a25b"

        [image_host]
        cloud_name = "demo"
        upload_preset = "site_portfolio"
    "#;

    #[test]
    fn test_load_valid_config() {
        let file = write_config(VALID);
        let config = SiteConfig::load_from(file.path()).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8420);
        assert_eq!(config.image_host.folder_root, "klussite/portfolio");
        assert_eq!(
            config.image_host.upload_url(),
            "https://api.cloudinary.com/v1_1/demo/image/upload"
        );
    }

    #[test]
    fn test_password_verification() {
        let file = write_config(VALID);
        let config = SiteConfig::load_from(file.path()).unwrap();
        // Hash above is sha256("secret")
        assert!(config.verify_admin_password("secret"));
        assert!(!config.verify_admin_password("wrong"));
    }

    #[test]
    fn test_rejects_bad_password_hash() {
        let file = write_config(
            r#"
            admin_password_hash = "not-hex"

            [image_host]
            cloud_name = "demo"
            upload_preset = "p"
            "#,
        );
        let err = SiteConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_hash_password_is_stable() {
        assert_eq!(
            hash_password("secret"),
            "2bb80d537b1da3e38bd30361aa855686bde0eacd7162fef6a25fe97bf527a25b"
        );
    }
}
