use super::*;

#[test]
fn can_check_time_window_intersection() {
    let window = TimeWindow::new(5, 10);

    assert!(window.intersects(&TimeWindow::new(10, 12)));
    assert!(window.intersects(&TimeWindow::new(0, 5)));
    assert!(window.intersects(&TimeWindow::new(6, 8)));
    assert!(!window.intersects(&TimeWindow::new(11, 20)));
    assert!(!window.intersects(&TimeWindow::new(0, 4)));
}

#[test]
fn can_compute_time_window_distance() {
    let window = TimeWindow::new(5, 10);

    assert_eq!(window.distance(&TimeWindow::new(6, 8)), 0);
    assert_eq!(window.distance(&TimeWindow::new(0, 2)), 3);
    assert_eq!(window.distance(&TimeWindow::new(14, 20)), 4);
}

#[test]
fn can_validate_time_window() {
    assert!(TimeWindow::new(0, 0).is_valid());
    assert!(TimeWindow::new(2, 5).is_valid());
    assert!(!TimeWindow::new(5, 2).is_valid());

    assert_eq!(TimeWindow::default(), TimeWindow::unbounded());
    assert!(TimeWindow::unbounded().is_valid());
}
