#[cfg(test)]
#[path = "../../tests/unit/search/neighbourhood_test.rs"]
mod neighbourhood_test;

use crate::models::common::*;
use crate::models::problem::ProblemData;

/// Granular neighbourhood parameters.
#[derive(Clone, Debug)]
pub struct NeighbourhoodParams {
    /// Number of neighbours per client.
    pub num_neighbours: usize,
    /// Weight of the waiting time term in the proximity measure.
    pub weight_wait_time: f64,
    /// Weight of the time warp term in the proximity measure.
    pub weight_time_warp: f64,
}

impl Default for NeighbourhoodParams {
    fn default() -> Self {
        Self { num_neighbours: 20, weight_wait_time: 0.2, weight_time_warp: 1.0 }
    }
}

/// Computes for each client an ordered list of its nearest other clients under a weighted
/// proximity which blends distance, duration, and time window compatibility. The relation
/// is not symmetric. Depots get empty lists.
pub fn compute_neighbours(data: &ProblemData, params: &NeighbourhoodParams) -> Vec<Vec<Location>> {
    let min_edge = |matrix: fn(&ProblemData, usize, Location, Location) -> i64, from, to| {
        (0..data.num_profiles()).map(|profile| matrix(data, profile, from, to)).min().unwrap_or_default()
    };

    let mut neighbours = vec![vec![]; data.num_locations()];

    for from in data.client_locations() {
        let client = data.client(from);
        let ready = client.tw.early + client.service_duration;
        let deadline = client.tw.late + client.service_duration;

        let mut weighted: Vec<(f64, Location)> = data
            .client_locations()
            .filter(|&to| to != from)
            .map(|to| {
                let other = data.client(to);
                let distance = min_edge(ProblemData::distance, from, to);
                let duration = min_edge(ProblemData::duration, from, to);

                let wait = (other.tw.early - duration - deadline).max(0);
                let time_warp = (ready + duration - other.tw.late).max(0);

                let proximity = (distance + duration) as f64
                    + params.weight_wait_time * wait as f64
                    + params.weight_time_warp * time_warp as f64;

                (proximity, to)
            })
            .collect();

        weighted.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        weighted.truncate(params.num_neighbours);

        neighbours[from] = weighted.into_iter().map(|(_, to)| to).collect();
    }

    neighbours
}
