//! 输出解析函数

use super::error::PackageError;
use super::types::InstalledPackage;
use std::collections::BTreeMap;

/// pip 的包名规范化（对应 pip 的 key）
pub fn canonical_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// 解析 `pip list --format=json` 的输出
///
/// 结果按规范化后的包名升序排列并去重，同名取第一次出现的版本。
pub fn parse_pip_list(json: &str) -> Result<Vec<InstalledPackage>, PackageError> {
    let raw: Vec<InstalledPackage> = serde_json::from_str(json)?;
    let mut by_name: BTreeMap<String, String> = BTreeMap::new();
    for pkg in raw {
        let name = canonical_name(&pkg.name);
        if name.is_empty() {
            continue;
        }
        by_name.entry(name).or_insert(pkg.version);
    }
    Ok(by_name
        .into_iter()
        .map(|(name, version)| InstalledPackage { name, version })
        .collect())
}

/// 从 `pip install <name>==` 的错误输出中提取最新版本。
///
/// pip 会打印形如
///   `Could not find a version that satisfies the requirement pip== (from versions: 9.0.3, 10.0.0b2, 10.0.1)`
/// 的行。优先取最后一个稳定版本（只由数字和点组成），
/// 没有稳定版本时取最后一个版本，列表为空时返回 `None`。
pub fn parse_newest_version(output: &str) -> Option<String> {
    let line = output.lines().find(|l| l.contains("from versions:"))?;
    let list = line.rsplit('(').next()?;
    let list = list.trim_start_matches("from versions:");

    let versions: Vec<&str> = list
        .split([',', ' ', ')'])
        .map(str::trim)
        .filter(|v| v.chars().next().is_some_and(|c| c.is_ascii_digit()))
        .collect();

    versions
        .iter()
        .rev()
        .find(|v| is_stable(v))
        .or_else(|| versions.last())
        .map(|v| v.to_string())
}

fn is_stable(version: &str) -> bool {
    version.chars().all(|c| c.is_ascii_digit() || c == '.')
        && version.chars().any(|c| c.is_ascii_digit())
}
