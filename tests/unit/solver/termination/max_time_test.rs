use super::*;

#[test]
fn can_stop_once_limit_elapsed() {
    let mut termination = MaxTime::new(0.);

    std::thread::sleep(std::time::Duration::from_millis(1));
    assert!(termination.is_termination(None));
    assert!(termination.is_termination(None));
}

#[test]
fn can_keep_running_within_limit() {
    let mut termination = MaxTime::new(1_000.);

    assert!(!termination.is_termination(None));
}
