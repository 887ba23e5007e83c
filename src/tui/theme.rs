//! 配色：取自 Python 徽标的蓝/黄

use ratatui::style::Color;

/// 已选中的包
pub const SELECTED: Color = Color::Rgb(255, 212, 59);
/// 包名
pub const NAME: Color = Color::Rgb(75, 139, 190);
/// 光标所在的选择框
pub const CURSOR_BG: Color = Color::Rgb(48, 105, 152);
/// 有新版本可用
pub const UPGRADABLE: Color = Color::Rgb(120, 200, 120);
/// 已是最新 / 版本未知
pub const MUTED: Color = Color::Rgb(110, 110, 110);
