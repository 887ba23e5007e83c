//! 分页计算
//!
//! 每页容量随终端尺寸变化，这里不缓存任何边界，每次都按当前容量重新计算。

/// 总页数，至少为 1（空列表也显示 "Page: 1/1"）
pub fn page_count(total_entries: usize, page_capacity: usize) -> usize {
    if page_capacity == 0 {
        return 1;
    }
    total_entries.div_ceil(page_capacity).max(1)
}

/// 把页码限制在 `[0, page_count - 1]`
pub fn clamp_page(page: usize, page_count: usize) -> usize {
    page.min(page_count.saturating_sub(1))
}

/// 某一页第一个条目在完整列表中的下标
pub fn page_start(page: usize, page_capacity: usize) -> usize {
    page.saturating_mul(page_capacity)
}

/// 当前页可见的条目，越界时截断为空而不是 panic
pub fn visible_slice<T>(entries: &[T], page: usize, page_capacity: usize) -> &[T] {
    let start = page_start(page, page_capacity).min(entries.len());
    let end = start.saturating_add(page_capacity).min(entries.len());
    &entries[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_is_ceil_with_minimum_one() {
        for capacity in 1..=7 {
            for total in 0..=40 {
                let expected = ((total + capacity - 1) / capacity).max(1);
                assert_eq!(page_count(total, capacity), expected, "{total}/{capacity}");
            }
        }
        assert_eq!(page_count(0, 0), 1);
    }

    #[test]
    fn clamp_page_stays_in_range() {
        assert_eq!(clamp_page(0, 1), 0);
        assert_eq!(clamp_page(5, 3), 2);
        assert_eq!(clamp_page(1, 3), 1);
        assert_eq!(clamp_page(3, 0), 0);
    }

    #[test]
    fn visible_slice_truncates() {
        let items = ["flask", "pip", "pytest"];
        assert_eq!(visible_slice(&items, 0, 2), ["flask", "pip"]);
        assert_eq!(visible_slice(&items, 1, 2), ["pytest"]);
        assert!(visible_slice(&items, 2, 2).is_empty());
        assert!(visible_slice(&items, 0, 0).is_empty());
        assert!(visible_slice(&items, usize::MAX, 2).is_empty());
        assert_eq!(visible_slice(&items, 0, 3), items);
        assert_eq!(visible_slice(&items, 2, 1), ["pytest"]);
    }
}
