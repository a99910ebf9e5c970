use super::*;

#[test]
fn can_create_single_visit_summary() {
    let segment = LoadSegment::new(5, 3);

    assert_eq!(segment.delivery(), 5);
    assert_eq!(segment.pickup(), 3);
    assert_eq!(segment.load(), 5);
}

#[test]
fn can_merge_delivery_before_pickup() {
    let delivery = LoadSegment::new(5, 0);
    let pickup = LoadSegment::new(0, 4);

    let merged = delivery.merge(&pickup);

    assert_eq!(merged.delivery(), 5);
    assert_eq!(merged.pickup(), 4);
    // Deliver first, then pick up: at most five units are on board at once.
    assert_eq!(merged.load(), 5);
}

#[test]
fn can_merge_pickup_before_delivery() {
    let pickup = LoadSegment::new(0, 4);
    let delivery = LoadSegment::new(5, 0);

    let merged = pickup.merge(&delivery);

    // The delivery is on board while the pickup is already collected.
    assert_eq!(merged.load(), 9);
}

#[test]
fn can_compute_excess_over_capacity() {
    let segment = LoadSegment::new(12, 0);

    assert_eq!(segment.excess(10), 2);
    assert_eq!(segment.excess(12), 0);
    assert_eq!(segment.excess(15), 0);
}

#[test]
fn can_merge_associatively() {
    let first = LoadSegment::new(3, 1);
    let second = LoadSegment::new(0, 6);
    let third = LoadSegment::new(2, 2);

    assert_eq!(first.merge(&second).merge(&third), first.merge(&second.merge(&third)));
}
