//! This module reimports commonly used types.

pub use crate::models::common::{Cost, Distance, Duration, LoadValue, Location, TimeWindow, MAX_VALUE};
pub use crate::models::problem::{Client, ClientGroup, Depot, Matrix, ProblemData, VehicleType};
pub use crate::models::solution::{Route, Solution};

pub use crate::search::{compute_neighbours, LocalSearch, NeighbourhoodParams, SearchMode};

pub use crate::solver::termination::{
    CompositeTermination, CompositionMode, MaxGeneration, MaxNoImprovement, MaxTime, Termination,
};
pub use crate::solver::{
    CostEvaluator, PenaltyManager, PenaltyParams, Population, PopulationParams, SolveResult, Solver,
    SolverConfig, TelemetryMode,
};

pub use crate::utils::{DefaultRandom, GenericError, GenericResult, InfoLogger, Random};
