//! 列表控制器：持有包列表、页码和光标，把按键翻译成状态迁移和包管理操作
//!
//! 整个循环是单线程同步的，升级/卸载期间界面不响应输入，
//! 所以每个阻塞调用前都会先画一个状态弹窗。

use super::cursor;
use super::input::{InputSource, Key};
use super::layout::{self, CHROME_ROWS};
use super::pagination;
use super::selection;
use super::state::{confirm_prompt, ControllerState, RenderSink, View, RESIZE_PROMPT};
use crate::package_manager::parser::canonical_name;
use crate::package_manager::{
    ActionExecutor, PackageEntry, PackageError, PackageLister, ProtectedSet, VersionResolver,
};

/// 浏览阶段用到的外部协作者
pub struct Services<'a> {
    pub executor: &'a dyn ActionExecutor,
    pub protected: &'a dyn ProtectedSet,
}

pub struct ListController {
    state: ControllerState,
    entries: Vec<PackageEntry>,
    page: usize,
    cursor: usize,
    cols: u16,
    rows: u16,
    /// 批量操作后的非阻塞提示，下一次按键时清除
    status: Option<String>,
}

impl ListController {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            state: ControllerState::Loading,
            entries: Vec::new(),
            page: 0,
            cursor: 0,
            cols,
            rows,
            status: None,
        }
    }

    // ===== 查询 =====

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn is_exited(&self) -> bool {
        self.state == ControllerState::Exited
    }

    pub fn entries(&self) -> &[PackageEntry] {
        &self.entries
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn page_capacity(&self) -> usize {
        layout::capacity(self.rows, self.cols, CHROME_ROWS).0
    }

    pub fn page_count(&self) -> usize {
        pagination::page_count(self.entries.len(), self.page_capacity())
    }

    fn visible(&self) -> &[PackageEntry] {
        pagination::visible_slice(&self.entries, self.page, self.page_capacity())
    }

    fn current_index(&self) -> usize {
        pagination::page_start(self.page, self.page_capacity()) + self.cursor
    }

    pub fn view(&self) -> View<'_> {
        self.view_with(None)
    }

    fn view_with(&self, popup: Option<String>) -> View<'_> {
        let page = self.visible();
        let popup = popup.or_else(|| match &self.state {
            ControllerState::ConfirmingRemoval { names } => Some(confirm_prompt(names.len())),
            ControllerState::Resizing => Some(RESIZE_PROMPT.to_string()),
            _ => self.status.clone(),
        });
        View {
            page,
            cursor: (!page.is_empty()).then_some(self.cursor),
            page_index: self.page,
            page_count: self.page_count(),
            popup,
            degraded: self.page_capacity() == 0,
        }
    }

    fn show_popup(&self, sink: &mut dyn RenderSink, msg: String) {
        sink.render(&self.view_with(Some(msg)));
    }

    // ===== Loading =====

    /// 获取包列表并逐个查询最新版本，完成后进入 Browsing（终端太小则进入 Resizing）
    ///
    /// 每次查询之前检查一次输入：q 或 Ctrl+C 立即进入 Exited，剩下的包不再查询。
    pub fn load(
        &mut self,
        lister: &dyn PackageLister,
        resolver: &dyn VersionResolver,
        input: &mut dyn InputSource,
        sink: &mut dyn RenderSink,
    ) -> Result<(), PackageError> {
        self.show_popup(sink, "Listing installed packages".to_string());
        let mut installed = lister.list()?;
        // 不信任调用方的排序与去重
        installed.sort_by(|a, b| a.name.cmp(&b.name));
        installed.dedup_by(|a, b| a.name == b.name);

        let mut entries = Vec::with_capacity(installed.len());
        for pkg in installed {
            if self.drain_loading_input(input)? {
                log::info!("加载被中断");
                self.state = ControllerState::Exited;
                return Ok(());
            }
            self.show_popup(sink, format!("Checking the newest version for {}", pkg.name));
            let latest = resolver.latest(&pkg.name);
            log::debug!("{} {} -> {:?}", pkg.name, pkg.version, latest);
            entries.push(PackageEntry::new(pkg.name, pkg.version, latest));
        }

        self.entries = entries;
        self.page = 0;
        self.cursor = 0;
        self.state = if self.page_capacity() == 0 {
            ControllerState::Resizing
        } else {
            ControllerState::Browsing
        };
        Ok(())
    }

    /// 读掉加载期间积压的按键，返回是否要求退出；resize 只记录新尺寸
    fn drain_loading_input(&mut self, input: &mut dyn InputSource) -> Result<bool, PackageError> {
        while let Some(key) = input.poll_key()? {
            match key {
                Key::Interrupt | Key::Char('q' | 'Q') => return Ok(true),
                Key::Resize { cols, rows } => {
                    self.cols = cols;
                    self.rows = rows;
                }
                _ => {}
            }
        }
        Ok(false)
    }

    // ===== 按键处理 =====

    pub fn handle(&mut self, key: Key, services: &Services<'_>, sink: &mut dyn RenderSink) {
        if key == Key::Interrupt {
            self.state = ControllerState::Exited;
            return;
        }
        let state = std::mem::replace(&mut self.state, ControllerState::Browsing);
        self.state = match state {
            ControllerState::Browsing => {
                self.status = None;
                self.handle_browsing(key, services, sink)
            }
            ControllerState::ConfirmingRemoval { names } => {
                self.handle_confirm(key, names, services, sink)
            }
            ControllerState::Resizing => match key {
                Key::Resize { cols, rows } => self.resize(cols, rows),
                _ => ControllerState::Resizing,
            },
            other => other,
        };
    }

    fn handle_browsing(
        &mut self,
        key: Key,
        services: &Services<'_>,
        sink: &mut dyn RenderSink,
    ) -> ControllerState {
        let page_len = self.visible().len();
        match key {
            Key::Up => self.cursor = cursor::step(self.cursor, -1, page_len),
            Key::Down => self.cursor = cursor::step(self.cursor, 1, page_len),
            Key::PageUp => self.cursor = cursor::step(self.cursor, -cursor::PAGE_JUMP, page_len),
            Key::PageDown => self.cursor = cursor::step(self.cursor, cursor::PAGE_JUMP, page_len),
            Key::Home => self.cursor = cursor::jump_to_start(),
            Key::End => self.cursor = cursor::jump_to_end(page_len),
            Key::Left => {
                self.page = self.page.saturating_sub(1);
                self.reclamp();
            }
            Key::Right => {
                self.page = pagination::clamp_page(self.page + 1, self.page_count());
                self.reclamp();
            }
            Key::Space => {
                if page_len > 0 {
                    let idx = self.current_index();
                    selection::toggle_one(&mut self.entries, idx);
                }
            }
            Key::Char('a' | 'A') => selection::toggle_all(&mut self.entries),
            Key::Enter => self.upgrade_selected(services, sink),
            Key::Delete => return self.begin_removal(services),
            Key::Resize { cols, rows } => return self.resize(cols, rows),
            Key::Char('q' | 'Q') => return ControllerState::Exited,
            _ => {}
        }
        ControllerState::Browsing
    }

    fn handle_confirm(
        &mut self,
        key: Key,
        names: Vec<String>,
        services: &Services<'_>,
        sink: &mut dyn RenderSink,
    ) -> ControllerState {
        match key {
            Key::Char('y' | 'Y') => {
                self.remove_all(names, services, sink);
                ControllerState::Browsing
            }
            // resize 也算取消，但新的尺寸要生效
            Key::Resize { cols, rows } => self.resize(cols, rows),
            _ => ControllerState::Browsing,
        }
    }

    fn resize(&mut self, cols: u16, rows: u16) -> ControllerState {
        self.cols = cols;
        self.rows = rows;
        if self.page_capacity() == 0 {
            return ControllerState::Resizing;
        }
        self.reclamp();
        ControllerState::Browsing
    }

    /// 列表、容量或页码变化后把页码和光标拉回有效范围
    fn reclamp(&mut self) {
        self.page = pagination::clamp_page(self.page, self.page_count());
        self.cursor = cursor::clamp(self.cursor, self.visible().len());
    }

    // ===== 批量操作 =====

    /// 升级所有选中且有新版本的包，结束后清空全部选择
    fn upgrade_selected(&mut self, services: &Services<'_>, sink: &mut dyn RenderSink) {
        let targets: Vec<usize> = selection::selected_indices(&self.entries)
            .into_iter()
            .filter(|&i| self.entries[i].is_upgradable())
            .collect();
        if targets.is_empty() {
            return;
        }

        let total = targets.len();
        let mut upgraded = 0;
        for idx in targets {
            let name = self.entries[idx].name.clone();
            self.show_popup(sink, format!("Upgrading {}", name));
            match services.executor.upgrade(&name) {
                Ok(()) => {
                    let entry = &mut self.entries[idx];
                    if let Some(latest) = entry.latest_version.clone() {
                        entry.current_version = latest;
                    }
                    upgraded += 1;
                }
                Err(e) => log::warn!("升级 {} 失败: {}", name, e),
            }
        }

        selection::clear_all(&mut self.entries);
        self.status = Some(format!("{upgraded} of {total} upgraded"));
    }

    /// 计算可卸载的包；为空（包括只选中了受保护的包）时什么都不做
    fn begin_removal(&mut self, services: &Services<'_>) -> ControllerState {
        let protected = match services.protected.protected_names() {
            Ok(set) => set,
            Err(e) => {
                log::error!("读取受保护包列表失败: {}", e);
                self.status = Some("Could not read the protected package list".to_string());
                return ControllerState::Browsing;
            }
        };

        let names: Vec<String> = selection::selected_indices(&self.entries)
            .into_iter()
            .map(|i| &self.entries[i].name)
            .filter(|name| !protected.contains(&canonical_name(name)))
            .cloned()
            .collect();

        if names.is_empty() {
            ControllerState::Browsing
        } else {
            ControllerState::ConfirmingRemoval { names }
        }
    }

    fn remove_all(&mut self, names: Vec<String>, services: &Services<'_>, sink: &mut dyn RenderSink) {
        let total = names.len();
        let mut removed = 0;
        for name in names {
            self.show_popup(sink, format!("Removing {}", name));
            match services.executor.remove(&name) {
                Ok(()) => {
                    selection::remove_and_forget(&mut self.entries, &name);
                    self.reclamp();
                    removed += 1;
                }
                Err(e) => log::warn!("卸载 {} 失败: {}", name, e),
            }
        }
        self.status = Some(format!("{removed} of {total} removed"));
    }
}
