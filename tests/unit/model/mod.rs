mod order_detail;

use warehouse::model::PageWindow;

#[test]
fn page_window_defaults() {
    let page = PageWindow::new(None, None);
    assert_eq!(page.index, 1);
    assert_eq!(page.size, 10);
    assert_eq!(page.limit(), 10u64);
    assert_eq!(page.offset(), 0u64);
}

#[test]
fn page_window_clamp() {
    let page = PageWindow::new(Some(0), Some(0));
    assert_eq!(page.index, 1);
    assert_eq!(page.size, 1);
    let page = PageWindow::new(Some(4), Some(25));
    assert_eq!(page.offset(), 75u64);
    let page = PageWindow::new(Some(1), Some(70000));
    assert_eq!(page.size, 500);
}
