//! A crate which implements a hybrid genetic search metaheuristic for rich variants of the
//! [`Vehicle Routing Problem`](https://en.wikipedia.org/wiki/Vehicle_routing_problem).
//!
//! # Key points
//!
//! The solver discovers low cost routings for fleets of vehicles serving geographically
//! distributed clients subject to capacity, time window, duration, multi depot, optional visit
//! (prize collecting), pickup and delivery, heterogeneous profile, and reloading constraints.
//!
//! It consists of three tightly coupled subsystems:
//!
//! - solution representation with incremental cost evaluation: route data structures, their
//!   segment concatenation algebra, and constant time feasibility/cost delta queries used to
//!   explore neighbourhoods efficiently. See [`models`] and [`search`] modules.
//! - local search engine: a best improvement descent over a bounded granular neighbour list,
//!   combining node exchange and segment exchange operators with a route pair stage. See
//!   [`search`] module.
//! - population based genetic orchestrator: crossover, education via local search, diversity
//!   management through biased fitness, restarts, and penalty self adaptation. See [`solver`]
//!   module.
//!
//! All numeric inputs are signed 64-bit integers, callers are expected to scale fractional
//! values. The core is strictly single threaded and deterministic given a seeded random
//! generator.
//!
//! [`models`]: ./models/index.html
//! [`search`]: ./search/index.html
//! [`solver`]: ./solver/index.html

#![warn(missing_docs)]
#![forbid(unsafe_code)]

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
#[macro_use]
pub mod helpers;

pub mod prelude;

pub mod models;
pub mod search;
pub mod solver;
pub mod utils;
