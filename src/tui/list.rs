use super::layout::{self, MENU_OPTIONS};
use super::state::{RenderSink, View, RESIZE_PROMPT};
use super::theme::{CURSOR_BG, MUTED, NAME, SELECTED, UPGRADABLE};
use crate::package_manager::PackageEntry;
use ratatui::{
    backend::Backend,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use unicode_width::UnicodeWidthStr;

/// 基于 ratatui 的渲染层
pub struct TerminalRenderer<B: Backend> {
    terminal: Terminal<B>,
    title: String,
}

impl<B: Backend> TerminalRenderer<B> {
    pub fn new(terminal: Terminal<B>, title: String) -> Self {
        Self { terminal, title }
    }

    #[cfg(test)]
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

impl<B: Backend> RenderSink for TerminalRenderer<B> {
    fn render(&mut self, view: &View<'_>) {
        let title = &self.title;
        if let Err(e) = self.terminal.draw(|f| draw(f, title, view)) {
            log::error!("绘制界面失败: {}", e);
        }
    }
}

/// 绘制一帧
pub fn draw(f: &mut Frame, title: &str, view: &View<'_>) {
    let area = f.area();

    if view.degraded {
        render_header(f, title, Rect::new(area.x, area.y, area.width, area.height.min(1)));
        render_popup(f, view.popup.as_deref().unwrap_or(RESIZE_PROMPT), area);
        return;
    }

    let chunks = layout::main_layout(area);
    render_header(f, title, chunks[0]);
    render_package_list(f, view, chunks[1]);
    render_page_indicator(f, view, chunks[2]);
    render_menu(f, chunks[3]);

    if let Some(msg) = &view.popup {
        render_popup(f, msg, area);
    }
}

fn render_header(f: &mut Frame, title: &str, area: Rect) {
    let header = Paragraph::new(title).style(Style::default().add_modifier(Modifier::BOLD));
    f.render_widget(header, area);
}

fn render_page_indicator(f: &mut Frame, view: &View<'_>, area: Rect) {
    let text = format!("Page: {}/{}", view.page_index + 1, view.page_count);
    f.render_widget(Paragraph::new(text), area);
}

fn render_menu(f: &mut Frame, area: Rect) {
    let mut lines = vec![Line::from(Span::styled(
        "Options:",
        Style::default().add_modifier(Modifier::UNDERLINED),
    ))];
    for (opt, desc) in MENU_OPTIONS {
        lines.push(Line::from(vec![
            Span::styled(opt, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(desc),
        ]));
    }
    f.render_widget(Paragraph::new(lines), area);
}

/// 当前页的包列表：`[x] name  version  latest`
fn render_package_list(f: &mut Frame, view: &View<'_>, area: Rect) {
    let name_width = column_width(view.page, |e| &e.name);
    let version_width = column_width(view.page, |e| &e.current_version);

    let lines: Vec<Line> = view
        .page
        .iter()
        .enumerate()
        .map(|(row, entry)| {
            package_line(entry, view.cursor == Some(row), name_width, version_width)
        })
        .collect();

    f.render_widget(Paragraph::new(lines), area);
}

fn column_width(page: &[PackageEntry], field: impl Fn(&PackageEntry) -> &String) -> usize {
    page.iter()
        .map(|e| UnicodeWidthStr::width(field(e).as_str()))
        .max()
        .unwrap_or(0)
}

fn pad(text: &str, width: usize) -> String {
    let padding = width.saturating_sub(UnicodeWidthStr::width(text)) + 2;
    format!("{}{}", text, " ".repeat(padding))
}

fn package_line(
    entry: &PackageEntry,
    is_cursor: bool,
    name_width: usize,
    version_width: usize,
) -> Line<'static> {
    let mark = if entry.is_selected() { "[x]" } else { "[ ]" };
    let mark_style = if is_cursor {
        Style::default()
            .bg(CURSOR_BG)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else if entry.is_selected() {
        Style::default().fg(SELECTED)
    } else {
        Style::default()
    };
    let name_style = if entry.is_selected() {
        Style::default().fg(SELECTED)
    } else {
        Style::default().fg(NAME)
    };
    let latest_style = if entry.is_upgradable() {
        Style::default().fg(UPGRADABLE).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(MUTED).add_modifier(Modifier::DIM)
    };

    Line::from(vec![
        Span::styled(mark, mark_style),
        Span::raw(" "),
        Span::styled(pad(&entry.name, name_width), name_style),
        Span::raw(pad(&entry.current_version, version_width)),
        Span::styled(entry.latest_display().to_string(), latest_style),
    ])
}

/// 带边框的小弹窗，覆盖在列表上方
fn render_popup(f: &mut Frame, msg: &str, area: Rect) {
    let popup = layout::popup_area(area, UnicodeWidthStr::width(msg));
    if popup.width == 0 || popup.height == 0 {
        return;
    }
    f.render_widget(Clear, popup);
    let paragraph = Paragraph::new(msg.to_string())
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, popup);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::layout::CHROME_ROWS;
    use crate::tui::state::confirm_prompt;
    use ratatui::backend::TestBackend;

    fn renderer(cols: u16, rows: u16) -> TerminalRenderer<TestBackend> {
        let terminal = Terminal::new(TestBackend::new(cols, rows)).unwrap();
        TerminalRenderer::new(terminal, "lian-pip test".to_string())
    }

    fn screen(r: &TerminalRenderer<TestBackend>) -> Vec<String> {
        let buffer = r.terminal().backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect()
    }

    fn entries() -> Vec<PackageEntry> {
        let mut list = vec![
            PackageEntry::new("flask", "1.0.0", None),
            PackageEntry::new("pip", "9.0.3", Some("9.9.0".into())),
        ];
        list[1].selected = true;
        list
    }

    #[test]
    fn draws_rows_page_indicator_and_menu() {
        let list = entries();
        let mut r = renderer(50, CHROME_ROWS + 3);
        r.render(&View {
            page: &list,
            cursor: Some(0),
            page_index: 1,
            page_count: 3,
            popup: None,
            degraded: false,
        });
        let rows = screen(&r);

        assert!(rows[0].starts_with("lian-pip test"));
        assert!(rows[1].starts_with("[ ] flask  1.0.0  n/a"));
        assert!(rows[2].starts_with("[x] pip    9.0.3  9.9.0"));
        assert!(rows[4].starts_with("Page: 2/3"));
        assert!(rows[5].starts_with("Options:"));
        assert!(rows.last().unwrap().starts_with("Q - exit"));
    }

    #[test]
    fn popup_overlays_the_list() {
        let list = entries();
        let mut r = renderer(50, CHROME_ROWS + 3);
        r.render(&View {
            page: &list,
            cursor: Some(0),
            page_index: 0,
            page_count: 1,
            popup: Some("Upgrading pip".to_string()),
            degraded: false,
        });
        let rows = screen(&r);
        assert!(rows[2].contains("Upgrading pip"));
    }

    #[test]
    fn confirm_prompt_wraps_on_narrow_terminals() {
        let list = entries();
        let mut r = renderer(30, CHROME_ROWS + 6);
        r.render(&View {
            page: &list,
            cursor: Some(0),
            page_index: 0,
            page_count: 1,
            popup: Some(confirm_prompt(1)),
            degraded: false,
        });
        let rows = screen(&r);
        assert!(rows.iter().any(|row| row.contains("Do you really")));
        assert!(rows.iter().any(|row| row.contains("[y/N]")));
    }

    #[test]
    fn degraded_view_only_asks_for_resize() {
        let list = entries();
        let mut r = renderer(40, 6);
        r.render(&View {
            page: &list,
            cursor: None,
            page_index: 0,
            page_count: 1,
            popup: None,
            degraded: true,
        });
        let rows = screen(&r);
        assert!(rows[2].contains(RESIZE_PROMPT));
        assert!(!rows.iter().any(|row| row.contains("flask")));
        assert!(!rows.iter().any(|row| row.contains("Page:")));
    }
}
