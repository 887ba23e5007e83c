//! 光标在当前页内的移动，所有结果都限制在页内，不会跨页

/// PageUp / PageDown 的跳跃行数
pub const PAGE_JUMP: isize = 5;

/// `min(cursor, max(page_len - 1, 0))`
pub fn clamp(cursor: usize, page_len: usize) -> usize {
    cursor.min(page_len.saturating_sub(1))
}

/// 按 delta 移动光标并限制在 `[0, page_len - 1]`
pub fn step(cursor: usize, delta: isize, page_len: usize) -> usize {
    let moved = if delta < 0 {
        cursor.saturating_sub(delta.unsigned_abs())
    } else {
        cursor.saturating_add(delta as usize)
    };
    clamp(moved, page_len)
}

pub fn jump_to_start() -> usize {
    0
}

pub fn jump_to_end(page_len: usize) -> usize {
    page_len.saturating_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_is_clamped_to_page() {
        assert_eq!(step(0, -1, 4), 0);
        assert_eq!(step(3, 1, 4), 3);
        assert_eq!(step(1, PAGE_JUMP, 4), 3);
        assert_eq!(step(3, -PAGE_JUMP, 4), 0);
        assert_eq!(step(6, -1, 10), 5);
    }

    #[test]
    fn empty_page_keeps_cursor_at_zero() {
        assert_eq!(step(0, 1, 0), 0);
        assert_eq!(step(0, PAGE_JUMP, 0), 0);
        assert_eq!(jump_to_end(0), 0);
        assert_eq!(clamp(7, 0), 0);
    }

    #[test]
    fn clamp_shrinks_to_last_row() {
        assert_eq!(clamp(7, 3), 2);
        assert_eq!(clamp(1, 3), 1);
        assert_eq!(jump_to_end(3), 2);
        assert_eq!(jump_to_start(), 0);
    }
}
