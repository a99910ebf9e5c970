use super::*;

#[test]
fn can_stop_after_generation_limit() {
    let mut termination = MaxGeneration::new(2);

    assert!(!termination.is_termination(None));
    assert!(!termination.is_termination(None));
    assert!(termination.is_termination(None));
    assert!(termination.is_termination(None));
}

#[test]
fn can_stop_immediately_with_zero_limit() {
    let mut termination = MaxGeneration::new(0);

    assert!(termination.is_termination(Some(1)));
}
