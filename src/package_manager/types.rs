//! PackageManager 相关数据类型定义

use serde::Deserialize;

/// `pip list --format=json` 的单条记录
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct InstalledPackage {
    pub name: String,
    pub version: String,
}

/// 列表中的一个软件包条目
///
/// `selected` 只能通过 [`crate::tui::selection`] 中的操作修改。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageEntry {
    pub name: String,
    pub current_version: String,
    /// 最新可用版本，`None` 表示无法确定
    pub latest_version: Option<String>,
    pub(crate) selected: bool,
}

impl PackageEntry {
    pub fn new(name: impl Into<String>, current: impl Into<String>, latest: Option<String>) -> Self {
        Self {
            name: name.into(),
            current_version: current.into(),
            latest_version: latest,
            selected: false,
        }
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// 有已知的新版本且与当前版本不同
    pub fn is_upgradable(&self) -> bool {
        match &self.latest_version {
            Some(latest) => latest != &self.current_version,
            None => false,
        }
    }

    /// 渲染用的最新版本文本
    pub fn latest_display(&self) -> &str {
        self.latest_version.as_deref().unwrap_or("n/a")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_latest_is_never_upgradable() {
        let e = PackageEntry::new("flask", "1.0.0", None);
        assert!(!e.is_upgradable());
        assert_eq!(e.latest_display(), "n/a");
    }

    #[test]
    fn same_version_is_not_upgradable() {
        let e = PackageEntry::new("pip", "9.0.3", Some("9.0.3".into()));
        assert!(!e.is_upgradable());
        let e = PackageEntry::new("pip", "9.0.3", Some("9.9.0".into()));
        assert!(e.is_upgradable());
        assert!(!e.is_selected());
    }
}
