use super::*;

#[test]
fn can_produce_repeatable_sequences_from_same_seed() {
    let first = DefaultRandom::new_with_seed(42);
    let second = DefaultRandom::new_with_seed(42);

    let firsts: Vec<i32> = (0..16).map(|_| first.uniform_int(0, 100)).collect();
    let seconds: Vec<i32> = (0..16).map(|_| second.uniform_int(0, 100)).collect();

    assert_eq!(firsts, seconds);
}

#[test]
fn can_respect_uniform_int_bounds() {
    let random = DefaultRandom::new_with_seed(0);

    for _ in 0..100 {
        let value = random.uniform_int(3, 7);
        assert!((3..=7).contains(&value));
    }

    assert_eq!(random.uniform_int(5, 5), 5);
}

#[test]
fn can_handle_degenerate_probabilities() {
    let random = DefaultRandom::new_with_seed(0);

    assert!(random.is_hit(1.));
    assert!(!random.is_hit(0.));
}

#[test]
fn can_shuffle_repeatably() {
    let first = DefaultRandom::new_with_seed(7);
    let second = DefaultRandom::new_with_seed(7);

    let mut one: Vec<usize> = (0..32).collect();
    let mut two: Vec<usize> = (0..32).collect();

    first.shuffle(&mut one);
    second.shuffle(&mut two);

    assert_eq!(one, two);

    let mut sorted = one.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, (0..32).collect::<Vec<_>>());
}
