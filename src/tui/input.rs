//! 按键输入：把 crossterm 事件转换成控制器使用的 [`Key`]

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Home,
    End,
    Space,
    Enter,
    Delete,
    Escape,
    Char(char),
    /// 终端尺寸变化
    Resize { cols: u16, rows: u16 },
    /// Ctrl+C
    Interrupt,
}

pub trait InputSource {
    /// 阻塞读取下一个按键
    fn next_key(&mut self) -> io::Result<Key>;

    /// 不阻塞：没有已到达的按键时返回 `None`
    fn poll_key(&mut self) -> io::Result<Option<Key>>;
}

pub struct CrosstermInput;

impl InputSource for CrosstermInput {
    fn next_key(&mut self) -> io::Result<Key> {
        loop {
            if let Some(key) = map_event(event::read()?) {
                return Ok(key);
            }
        }
    }

    fn poll_key(&mut self) -> io::Result<Option<Key>> {
        while event::poll(Duration::ZERO)? {
            if let Some(key) = map_event(event::read()?) {
                return Ok(Some(key));
            }
        }
        Ok(None)
    }
}

/// 无法识别的事件返回 `None`，调用方继续读取
pub fn map_event(event: Event) -> Option<Key> {
    match event {
        Event::Resize(cols, rows) => Some(Key::Resize { cols, rows }),
        Event::Key(key) if key.kind != KeyEventKind::Release => map_key(key),
        _ => None,
    }
}

fn map_key(key: KeyEvent) -> Option<Key> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Key::Interrupt),
            _ => None,
        };
    }
    let mapped = match key.code {
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::Enter => Key::Enter,
        KeyCode::Delete => Key::Delete,
        KeyCode::Esc => Key::Escape,
        KeyCode::Char(' ') => Key::Space,
        KeyCode::Char(c) => Key::Char(c),
        _ => return None,
    };
    Some(mapped)
}
