/// Offset pagination over an already-filtered, already-sorted result set:
/// `(page - 1) * page_size` slicing, with the total taken before slicing.
pub fn paginate<T>(items: Vec<T>, page: i64, page_size: i64) -> (Vec<T>, i64) {
    let total = items.len() as i64;
    let start = (page - 1).saturating_mul(page_size).max(0) as usize;
    let paged = items
        .into_iter()
        .skip(start)
        .take(page_size.max(0) as usize)
        .collect();
    (paged, total)
}

pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(1).max(1)
}

pub fn clamp_page_size(page_size: Option<i64>, default: i64) -> i64 {
    page_size.unwrap_or(default).clamp(1, 2000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slices_by_offset_and_reports_total() {
        let (page, total) = paginate((1..=7).collect::<Vec<_>>(), 2, 3);
        assert_eq!(page, vec![4, 5, 6]);
        assert_eq!(total, 7);
    }

    #[test]
    fn page_past_the_end_is_empty_but_total_stands() {
        let (page, total) = paginate(vec![1, 2], 5, 10);
        assert!(page.is_empty());
        assert_eq!(total, 2);
    }

    #[test]
    fn clamps_to_sane_bounds() {
        assert_eq!(clamp_page(None), 1);
        assert_eq!(clamp_page(Some(-3)), 1);
        assert_eq!(clamp_page_size(None, 10), 10);
        assert_eq!(clamp_page_size(Some(0), 10), 1);
        assert_eq!(clamp_page_size(Some(1_000_000), 10), 2000);
    }
}
