use crate::package_manager::{canonical_set, PackageError, ProtectedSet};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

fn home_dir() -> PathBuf {
    PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
}

fn default_protected() -> Vec<String> {
    vec!["pip".to_string(), "setuptools".to_string(), "wheel".to_string()]
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// 用来运行 `-m pip` 的解释器
    pub python: String,
    /// 升级/卸载时丢弃 pip 输出
    pub quiet: bool,
    pub log_file: PathBuf,
    /// 永远不会被卸载的包
    pub protected: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            python: "python3".to_string(),
            quiet: true,
            log_file: home_dir().join(".lian/pip/lian-pip.log"),
            protected: default_protected(),
        }
    }
}

impl Config {
    pub fn default_path() -> PathBuf {
        home_dir().join(".config/lian-pip/config.toml")
    }

    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }
}

/// 只关心配置文件中的 `protected` 字段
#[derive(Deserialize)]
struct ProtectedSection {
    #[serde(default = "default_protected")]
    protected: Vec<String>,
}

/// 从配置文件读取受保护包列表，每次调用都重新读盘，
/// 修改配置后下一次按 Delete 即生效。
#[derive(Debug, Clone)]
pub struct ProtectedList {
    path: PathBuf,
}

impl ProtectedList {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ProtectedSet for ProtectedList {
    fn protected_names(&self) -> Result<HashSet<String>, PackageError> {
        if !self.path.exists() {
            return Ok(canonical_set(default_protected()));
        }
        let content = fs::read_to_string(&self.path)?;
        let section: ProtectedSection = toml::from_str(&content)?;
        Ok(canonical_set(section.protected))
    }
}
