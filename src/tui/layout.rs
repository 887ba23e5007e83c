use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// 底部菜单中的按键说明
pub const MENU_OPTIONS: [(&str, &str); 9] = [
    ("Up/Down", " - prev/next package"),
    ("Left/Right", " - prev/next page"),
    ("PgUp/PgDn", " - jump up/down by 5"),
    ("Home/End", " - jump to top/bottom"),
    ("Space", " - (un)select package"),
    ("A", " - toggle all"),
    ("Enter", " - upgrade selected"),
    ("Delete", " - uninstall selected"),
    ("Q", " - exit"),
];

pub const HEADER_ROWS: u16 = 1;
pub const PAGE_INDICATOR_ROWS: u16 = 1;
/// 菜单选项加一行 "Options:" 标题
pub const MENU_ROWS: u16 = MENU_OPTIONS.len() as u16 + 1;
/// 列表以外固定占用的行数
pub const CHROME_ROWS: u16 = HEADER_ROWS + PAGE_INDICATOR_ROWS + MENU_ROWS;

/// 根据终端尺寸计算列表区域 (行数, 列数)
///
/// 行数为 0 表示终端太小，此时不能绘制列表。
pub fn capacity(total_rows: u16, total_cols: u16, chrome_rows: u16) -> (usize, usize) {
    (
        total_rows.saturating_sub(chrome_rows) as usize,
        total_cols as usize,
    )
}

/// 四段式布局：Header(1) + 列表(弹性) + 页码(1) + 菜单
pub fn main_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_ROWS),
            Constraint::Min(0),
            Constraint::Length(PAGE_INDICATOR_ROWS),
            Constraint::Length(MENU_ROWS),
        ])
        .split(area)
        .to_vec()
}

/// 弹窗位置：列表区域左上角，宽度至少 35
///
/// 终端比消息窄时消息会换行，高度随行数增加（不超出终端）。
pub fn popup_area(area: Rect, msg_width: usize) -> Rect {
    let width = (msg_width as u16).saturating_add(3).max(35).min(area.width);
    let inner = width.saturating_sub(2).max(1) as usize;
    let mut lines = msg_width.div_ceil(inner).max(1);
    // 按词换行可能比按字符多占一行
    if lines > 1 {
        lines += 1;
    }
    let y = area.y + HEADER_ROWS.min(area.height);
    let height = (lines as u16)
        .saturating_add(2)
        .min(area.height.saturating_sub(y - area.y));
    Rect::new(area.x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chrome_is_header_page_and_menu() {
        assert_eq!(CHROME_ROWS, 12);
    }

    #[test]
    fn capacity_never_goes_negative() {
        assert_eq!(capacity(30, 80, CHROME_ROWS), (18, 80));
        assert_eq!(capacity(13, 80, CHROME_ROWS), (1, 80));
        assert_eq!(capacity(12, 80, CHROME_ROWS), (0, 80));
        assert_eq!(capacity(5, 80, CHROME_ROWS), (0, 80));
    }

    #[test]
    fn layout_list_height_matches_capacity() {
        let area = Rect::new(0, 0, 80, 30);
        let chunks = main_layout(area);
        assert_eq!(chunks[1].height as usize, capacity(30, 80, CHROME_ROWS).0);
        assert_eq!(chunks[2].y, 1 + chunks[1].height);
    }

    #[test]
    fn popup_fits_small_terminals() {
        let area = Rect::new(0, 0, 20, 3);
        let popup = popup_area(area, 40);
        assert_eq!(popup.width, 20);
        assert_eq!(popup.y, 1);
        assert_eq!(popup.height, 2);
    }

    #[test]
    fn popup_grows_when_message_wraps() {
        let area = Rect::new(0, 0, 30, 20);
        assert_eq!(popup_area(area, 20).height, 3);

        // 内宽 28，54 列的消息至少两行，再留一行给按词换行
        let popup = popup_area(area, 54);
        assert_eq!(popup.width, 30);
        assert_eq!(popup.height, 5);
    }
}
