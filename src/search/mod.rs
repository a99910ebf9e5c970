//! Local search engine: granular neighbourhoods, a mutable route representation with
//! cached segment summaries, and node/route improvement operators.

mod neighbourhood;
pub use self::neighbourhood::{compute_neighbours, NeighbourhoodParams};

mod route;
pub use self::route::Route;

mod node_ops;
pub use self::node_ops::{NodeOperator, NODE_OPERATORS};

mod route_ops;
pub use self::route_ops::{RouteOperator, ROUTE_OPERATORS};

mod local_search;
pub use self::local_search::{LocalSearch, SearchMode};
