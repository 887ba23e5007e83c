//! 包管理器模块 — 对 `python -m pip` 的封装

pub mod error;
pub mod parser;
pub mod types;

pub use error::PackageError;
pub use types::{InstalledPackage, PackageEntry};

use duct::Expression;
use parser::{canonical_name, parse_newest_version, parse_pip_list};
use std::collections::HashSet;

/// 列出已安装的包，按名称升序且无重复
pub trait PackageLister {
    fn list(&self) -> Result<Vec<InstalledPackage>, PackageError>;
}

/// 查询包的最新版本，无法确定时返回 `None`
pub trait VersionResolver {
    fn latest(&self, name: &str) -> Option<String>;
}

/// 对单个包执行升级或卸载，失败以返回值报告
pub trait ActionExecutor {
    fn upgrade(&self, name: &str) -> Result<(), PackageError>;
    fn remove(&self, name: &str) -> Result<(), PackageError>;
}

/// 禁止卸载的包名集合，每次调用都重新读取
pub trait ProtectedSet {
    fn protected_names(&self) -> Result<HashSet<String>, PackageError>;
}

#[derive(Debug, Clone)]
pub struct PipManager {
    pub python: String,
    /// 执行升级/卸载时丢弃 pip 的 stdout/stderr
    pub quiet: bool,
}

impl PipManager {
    pub fn detect(python: &str, quiet: bool) -> Result<Self, PackageError> {
        let output = duct::cmd(python, ["-m", "pip", "--version"])
            .stdout_capture()
            .stderr_null()
            .unchecked()
            .run();
        match output {
            Ok(o) if o.status.success() => {
                log::debug!("检测到 {}", String::from_utf8_lossy(&o.stdout).trim());
                Ok(PipManager {
                    python: python.to_string(),
                    quiet,
                })
            }
            _ => Err(PackageError::ToolUnavailable {
                python: python.to_string(),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.python
    }

    fn pip(&self, args: &[&str]) -> Expression {
        let mut full = vec!["-m", "pip", "--disable-pip-version-check"];
        full.extend_from_slice(args);
        duct::cmd(self.python.as_str(), full)
    }

    fn describe(&self, args: &[&str]) -> String {
        format!("{} -m pip {}", self.python, args.join(" "))
    }

    /// 执行升级/卸载命令，按 quiet 配置决定输出去向
    ///
    /// 返回 pip 的输出（stderr 合并进 stdout）；quiet 时输出被丢弃，返回空串。
    fn run_action(&self, args: &[&str]) -> Result<String, PackageError> {
        let command = self.describe(args);
        log::debug!("执行: {}", command);

        let expr = if self.quiet {
            self.pip(args).stdout_null().stderr_null()
        } else {
            self.pip(args).stderr_to_stdout().stdout_capture()
        };
        let output = expr
            .unchecked()
            .run()
            .map_err(|source| PackageError::Spawn {
                command: command.clone(),
                source,
            })?;

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        for line in text.lines() {
            log::debug!("pip: {}", line);
        }

        if output.status.success() {
            Ok(text)
        } else {
            Err(PackageError::CommandFailed {
                command,
                code: output.status.code(),
            })
        }
    }
}

impl PackageLister for PipManager {
    fn list(&self) -> Result<Vec<InstalledPackage>, PackageError> {
        let args = ["list", "--format=json"];
        let command = self.describe(&args);
        let output = self
            .pip(&args)
            .stdout_capture()
            .stderr_null()
            .unchecked()
            .run()
            .map_err(|source| PackageError::Spawn {
                command: command.clone(),
                source,
            })?;
        if !output.status.success() {
            return Err(PackageError::CommandFailed {
                command,
                code: output.status.code(),
            });
        }
        parse_pip_list(&String::from_utf8_lossy(&output.stdout))
    }
}

impl VersionResolver for PipManager {
    fn latest(&self, name: &str) -> Option<String> {
        // 故意请求一个空版本，pip 会在错误信息里列出全部可用版本
        let requirement = format!("{}==", name);
        let output = self
            .pip(&["install", requirement.as_str()])
            .stderr_to_stdout()
            .stdout_capture()
            .unchecked()
            .run();
        match output {
            Ok(o) => parse_newest_version(&String::from_utf8_lossy(&o.stdout)),
            Err(e) => {
                log::warn!("查询 {} 最新版本失败: {}", name, e);
                None
            }
        }
    }
}

impl ActionExecutor for PipManager {
    fn upgrade(&self, name: &str) -> Result<(), PackageError> {
        self.run_action(&["install", "--upgrade", name]).map(drop)
    }

    fn remove(&self, name: &str) -> Result<(), PackageError> {
        self.run_action(&["uninstall", "--yes", name]).map(drop)
    }
}

/// 把任意包名集合规范化成 pip key
pub fn canonical_set<I, S>(names: I) -> HashSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .map(|n| canonical_name(n.as_ref()))
        .filter(|n| !n.is_empty())
        .collect()
}
