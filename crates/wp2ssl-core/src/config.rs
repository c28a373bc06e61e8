use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Global configuration loaded from `~/.config/wp2ssl/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Wp2sslConfig {
    /// WP-CLI executable (name on PATH or absolute path).
    pub wp_binary: String,
    /// `zip` executable used to archive the database export.
    pub zip_binary: String,
    /// Optional WordPress root passed to WP-CLI as `--path`.
    pub wp_path: Option<PathBuf>,
    /// Prepend the forced-HTTPS block to `.htaccess` after the URL update.
    pub update_htaccess: bool,
}

impl Default for Wp2sslConfig {
    fn default() -> Self {
        Self {
            wp_binary: "wp".to_string(),
            zip_binary: "zip".to_string(),
            wp_path: None,
            update_htaccess: true,
        }
    }
}

impl Wp2sslConfig {
    /// WordPress root the migration works on: `wp_path` when set (relative
    /// paths resolve against `cwd`), otherwise `cwd`.
    pub fn site_root(&self, cwd: &Path) -> PathBuf {
        match self.wp_path {
            Some(ref path) => cwd.join(path),
            None => cwd.to_path_buf(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("wp2ssl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<Wp2sslConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = Wp2sslConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: Wp2sslConfig = toml::from_str(&data)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = Wp2sslConfig::default();
        assert_eq!(cfg.wp_binary, "wp");
        assert_eq!(cfg.zip_binary, "zip");
        assert!(cfg.wp_path.is_none());
        assert!(cfg.update_htaccess);
    }

    #[test]
    fn site_root_prefers_wp_path() {
        let cwd = Path::new("/home/admin");
        assert_eq!(Wp2sslConfig::default().site_root(cwd), cwd);

        let absolute = Wp2sslConfig {
            wp_path: Some(PathBuf::from("/var/www/html")),
            ..Wp2sslConfig::default()
        };
        assert_eq!(absolute.site_root(cwd), Path::new("/var/www/html"));

        let relative = Wp2sslConfig {
            wp_path: Some(PathBuf::from("sites/blog")),
            ..Wp2sslConfig::default()
        };
        assert_eq!(relative.site_root(cwd), Path::new("/home/admin/sites/blog"));
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = Wp2sslConfig {
            wp_path: Some(PathBuf::from("/var/www/html")),
            ..Wp2sslConfig::default()
        };
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Wp2sslConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_toml_partial_uses_defaults() {
        let toml = r#"
            wp_binary = "/usr/local/bin/wp"
            update_htaccess = false
        "#;
        let cfg: Wp2sslConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.wp_binary, "/usr/local/bin/wp");
        assert_eq!(cfg.zip_binary, "zip");
        assert!(!cfg.update_htaccess);
        assert!(cfg.wp_path.is_none());
    }

    #[test]
    fn config_toml_empty_is_default() {
        let cfg: Wp2sslConfig = toml::from_str("").unwrap();
        assert_eq!(cfg, Wp2sslConfig::default());
    }
}
