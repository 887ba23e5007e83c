use crate::package_manager::PackageEntry;

// ========== 枚举 ==========

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerState {
    /// 正在获取包列表和最新版本
    Loading,
    Browsing,
    /// 等待 y/N，`names` 为将要卸载的包（列表顺序）
    ConfirmingRemoval { names: Vec<String> },
    /// 终端太小，等待下一次 resize
    Resizing,
    Exited,
}

// ========== 渲染快照 ==========

pub const RESIZE_PROMPT: &str = "Please resize the terminal.";

/// 控制器交给渲染层的只读快照
#[derive(Debug, Clone)]
pub struct View<'a> {
    pub page: &'a [PackageEntry],
    /// 当前页为空时没有光标
    pub cursor: Option<usize>,
    pub page_index: usize,
    pub page_count: usize,
    pub popup: Option<String>,
    /// 终端太小，只能显示 resize 提示
    pub degraded: bool,
}

/// 渲染层，只消费快照，不向控制器返回任何东西
pub trait RenderSink {
    fn render(&mut self, view: &View<'_>);
}

pub fn confirm_prompt(count: usize) -> String {
    let noun = if count == 1 { "package" } else { "packages" };
    format!("Do you really want to remove {count} selected {noun}? [y/N]")
}
