pub mod controller;
pub mod cursor;
pub mod input;
pub mod layout;
mod list;
pub mod pagination;
pub mod selection;
pub mod state;
mod theme;

use crate::config::ProtectedList;
use crate::package_manager::PipManager;
use anyhow::Result;
use controller::{ListController, Services};
use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use input::{CrosstermInput, InputSource};
use list::TerminalRenderer;
use ratatui::{backend::CrosstermBackend, Terminal};
use state::RenderSink;
use std::io;
use std::path::Path;

/// 终端会话：获取时进入 raw mode 和备用屏幕，drop 时无条件恢复
struct TerminalSession;

impl TerminalSession {
    fn acquire() -> Result<Self> {
        // 先构造守卫，后续任何一步失败都会经由 Drop 恢复终端
        let session = TerminalSession;
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(session)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        restore_terminal();
    }
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
}

/// panic 时先恢复终端，再交给默认 hook 打印信息
fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore_terminal();
        previous(info);
    }));
}

pub fn run(pm: PipManager, config_path: &Path) -> Result<()> {
    install_panic_hook();
    let _session = TerminalSession::acquire()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;
    let size = terminal.size()?;

    let title = format!("lian-pip v{} ({})", env!("CARGO_PKG_VERSION"), pm.name());
    let mut renderer = TerminalRenderer::new(terminal, title);
    let mut controller = ListController::new(size.width, size.height);

    let mut input = CrosstermInput;

    // Loading，期间 q / Ctrl+C 直接退出，不进入主循环
    controller.load(&pm, &pm, &mut input, &mut renderer)?;
    if controller.is_exited() {
        return Ok(());
    }
    log::info!("已加载 {} 个包", controller.entries().len());

    let protected = ProtectedList::new(config_path);
    let services = Services {
        executor: &pm,
        protected: &protected,
    };

    // 主循环
    while !controller.is_exited() {
        renderer.render(&controller.view());
        let key = input.next_key()?;
        controller.handle(key, &services, &mut renderer);
    }

    Ok(())
}
