use super::{LISTING_PAGE_SIZE, PageParam, PageWindow, page_count};

#[test]
fn absent_page_means_page_one() {
    assert_eq!(PageParam::parse(None), PageParam::Number(1));
}

#[test]
fn non_numeric_and_non_positive_pages_normalize_to_page_one() {
    for raw in ["", "abc", "0", "-3", "2.5", "1e3"] {
        assert_eq!(PageParam::parse(Some(raw)), PageParam::Number(1), "{raw}");
    }
}

#[test]
fn numeric_pages_parse_verbatim() {
    assert_eq!(PageParam::parse(Some("7")), PageParam::Number(7));
}

#[test]
fn all_disables_pager_and_offset() {
    assert_eq!(PageParam::parse(Some("all")), PageParam::All);

    let window = PageWindow::resolve(PageParam::All, LISTING_PAGE_SIZE);
    assert_eq!(window.page, None);
    assert_eq!(window.limit, None);
    assert_eq!(window.offset, 0);
    assert_eq!(page_count(1_000, window.limit), None);
}

#[test]
fn page_zero_clamps_to_page_one() {
    let window = PageWindow::resolve(PageParam::Number(0), 5);
    assert_eq!(window.page, Some(1));
    assert_eq!(window.offset, 0);
}

#[test]
fn first_page_starts_at_offset_zero() {
    let window = PageWindow::resolve(PageParam::parse(None), 5);
    assert_eq!(window.page, Some(1));
    assert_eq!(window.offset, 0);
    assert_eq!(page_count(12, window.limit), Some(3));
}

#[test]
fn later_pages_skip_earlier_rows() {
    let window = PageWindow::resolve(PageParam::Number(2), 5);
    assert_eq!(window.offset, 5);
    assert_eq!(page_count(12, window.limit), Some(3));
}

#[test]
fn page_count_rounds_up() {
    assert_eq!(page_count(0, Some(5)), Some(0));
    assert_eq!(page_count(1, Some(5)), Some(1));
    assert_eq!(page_count(5, Some(5)), Some(1));
    assert_eq!(page_count(6, Some(5)), Some(2));
    assert_eq!(page_count(6, None), None);
}

#[test]
fn range_carries_limit_and_offset() {
    let range = PageWindow::resolve(PageParam::Number(3), 16).range();
    assert_eq!(range.limit, Some(16));
    assert_eq!(range.offset, 32);
}
