//! 多选状态，保存在每个 [`PackageEntry`] 内
//!
//! 选择与分页无关：翻页不会影响任何条目的 `selected`，
//! 全选作用于完整列表而不是当前页。

use crate::package_manager::PackageEntry;

/// 切换单个条目（按完整列表下标），下标越界时返回 false
pub fn toggle_one(entries: &mut [PackageEntry], index: usize) -> bool {
    match entries.get_mut(index) {
        Some(entry) => {
            entry.selected = !entry.selected;
            true
        }
        None => false,
    }
}

/// 空列表视为"全部已选中"
pub fn all_selected(entries: &[PackageEntry]) -> bool {
    entries.iter().all(|e| e.selected)
}

/// 全部已选中则全部取消，否则全部选中
pub fn toggle_all(entries: &mut [PackageEntry]) {
    let target = !all_selected(entries);
    for entry in entries.iter_mut() {
        entry.selected = target;
    }
}

pub fn clear_all(entries: &mut [PackageEntry]) {
    for entry in entries.iter_mut() {
        entry.selected = false;
    }
}

/// 按列表顺序返回已选中条目的下标
pub fn selected_indices(entries: &[PackageEntry]) -> Vec<usize> {
    entries
        .iter()
        .enumerate()
        .filter(|(_, e)| e.selected)
        .map(|(i, _)| i)
        .collect()
}

/// 从列表中删除条目，选择状态随条目一起丢弃；其余条目保持相对顺序
pub fn remove_and_forget(entries: &mut Vec<PackageEntry>, name: &str) -> Option<PackageEntry> {
    let idx = entries.iter().position(|e| e.name == name)?;
    Some(entries.remove(idx))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries() -> Vec<PackageEntry> {
        vec![
            PackageEntry::new("flask", "1.0.0", Some("1.0.0".into())),
            PackageEntry::new("pip", "9.0.3", Some("9.0.3".into())),
            PackageEntry::new("pytest", "3.5.0", Some("3.5.0".into())),
        ]
    }

    #[test]
    fn toggle_one_flips_and_ignores_out_of_range() {
        let mut list = entries();
        assert!(toggle_one(&mut list, 0));
        assert!(list[0].is_selected());
        assert!(toggle_one(&mut list, 0));
        assert!(!list[0].is_selected());
        assert!(!toggle_one(&mut list, 3));
    }

    #[test]
    fn toggle_all_selects_unless_everything_is_selected() {
        let mut list = entries();
        toggle_all(&mut list);
        assert!(list.iter().all(|e| e.is_selected()));
        toggle_all(&mut list);
        assert!(list.iter().all(|e| !e.is_selected()));

        toggle_one(&mut list, 0);
        toggle_all(&mut list);
        assert!(list.iter().all(|e| e.is_selected()));
    }

    #[test]
    fn toggle_all_twice_restores_uniform_state() {
        let mut list = entries();
        toggle_all(&mut list);
        toggle_all(&mut list);
        assert!(list.iter().all(|e| !e.is_selected()));

        toggle_all(&mut list);
        toggle_all(&mut list);
        toggle_all(&mut list);
        assert!(list.iter().all(|e| e.is_selected()));
    }

    #[test]
    fn toggle_all_from_partial_ends_in_clear() {
        // 部分选中 → 全选 → 全不选
        let mut list = entries();
        toggle_one(&mut list, 1);
        toggle_all(&mut list);
        toggle_all(&mut list);
        assert!(selected_indices(&list).is_empty());
    }

    #[test]
    fn empty_list_is_vacuously_all_selected() {
        let mut list: Vec<PackageEntry> = Vec::new();
        assert!(all_selected(&list));
        toggle_all(&mut list);
        assert!(all_selected(&list));
    }

    #[test]
    fn removal_drops_selection_and_keeps_order() {
        let mut list = entries();
        toggle_one(&mut list, 1);
        let removed = remove_and_forget(&mut list, "pip").unwrap();
        assert!(removed.is_selected());
        assert_eq!(
            list.iter().map(|e| e.name.as_str()).collect::<Vec<_>>(),
            ["flask", "pytest"]
        );
        assert!(selected_indices(&list).is_empty());
        assert!(remove_and_forget(&mut list, "pip").is_none());

        // 新会话中同名条目从未选中状态开始
        list.push(PackageEntry::new("pip", "9.0.3", None));
        assert!(!list[2].is_selected());
    }
}
