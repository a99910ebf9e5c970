use super::*;
use crate::helpers::*;
use crate::models::problem::VehicleType;

fn params_with_window(window: usize) -> PenaltyParams {
    PenaltyParams { solutions_between_updates: window, ..PenaltyParams::default() }
}

#[test]
fn can_increase_penalties_when_too_few_feasible() {
    let data = create_line_data(4, 5, VehicleType::new(1, vec![10]));
    let infeasible = make_solution(&data, vec![(0, vec![1, 2, 3, 4])]);

    let mut manager = PenaltyManager::new(vec![10, 10, 10, 10], params_with_window(2));

    manager.register(&infeasible);
    assert_eq!(manager.penalties(), &[10, 10, 10, 10]);

    manager.register(&infeasible);

    // Load feasibility is 0 in the window while the other dimensions were satisfied.
    assert_eq!(manager.penalties()[0], 13);
    assert_eq!(manager.penalties()[1], 7);
    assert_eq!(manager.penalties()[2], 7);
    assert_eq!(manager.penalties()[3], 7);
}

#[test]
fn can_decrease_penalties_when_enough_feasible() {
    let data = create_line_data(4, 5, VehicleType::new(2, vec![10]));
    let feasible = make_solution(&data, vec![(0, vec![1, 2]), (0, vec![3, 4])]);

    let mut manager = PenaltyManager::new(vec![13, 13, 13, 13], params_with_window(2));

    manager.register(&feasible);
    manager.register(&feasible);

    assert_eq!(manager.penalties(), &[10, 10, 10, 10]);
}

#[test]
fn can_clamp_penalties() {
    let data = create_line_data(4, 5, VehicleType::new(1, vec![10]));
    let infeasible = make_solution(&data, vec![(0, vec![1, 2, 3, 4])]);

    let params = PenaltyParams { solutions_between_updates: 1, max_penalty: 12, ..PenaltyParams::default() };
    let mut manager = PenaltyManager::new(vec![10, 1, 1, 1], params);

    manager.register(&infeasible);
    assert_eq!(manager.penalties()[0], 12);

    manager.register(&infeasible);
    assert_eq!(manager.penalties()[0], 12);

    // Feasible dimensions never drop below the lower clamp.
    assert_eq!(manager.penalties()[1], 1);
}

#[test]
fn can_reset_to_initial_penalties() {
    let data = create_line_data(4, 5, VehicleType::new(1, vec![10]));
    let infeasible = make_solution(&data, vec![(0, vec![1, 2, 3, 4])]);

    let mut manager = PenaltyManager::new(vec![10, 10, 10, 10], params_with_window(1));
    manager.register(&infeasible);
    assert_ne!(manager.penalties(), &[10, 10, 10, 10]);

    manager.reset();
    assert_eq!(manager.penalties(), &[10, 10, 10, 10]);
}

#[test]
fn can_boost_penalties_for_repair() {
    let manager = PenaltyManager::new(vec![10, 10, 10, 10], PenaltyParams::default());

    let data = create_line_data(4, 5, VehicleType::new(1, vec![10]));
    let infeasible = make_solution(&data, vec![(0, vec![1, 2, 3, 4])]);

    let plain = manager.cost_evaluator().penalised_cost(&infeasible);
    let boosted = manager.booster_cost_evaluator().penalised_cost(&infeasible);

    // Distance stays, the load penalty term is boosted twelvefold.
    assert_eq!(plain, 8 + 10 * 10);
    assert_eq!(boosted, 8 + 12 * 10 * 10);
}

#[test]
fn can_scale_initial_penalties_from_instance() {
    let data = create_line_data(4, 5, VehicleType::new(1, vec![10]));
    let manager = PenaltyManager::init_from(&data, PenaltyParams::default());

    assert_eq!(manager.penalties().len(), 4);
    assert!(manager.penalties().iter().all(|&penalty| penalty >= 1));
}
