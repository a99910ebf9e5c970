//! Solution domain models: immutable snapshots of routes and complete solutions.

mod route;
pub use self::route::Route;

mod solution;
pub use self::solution::Solution;
