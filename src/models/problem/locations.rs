use crate::models::common::{Cost, Duration, LoadValue, TimeWindow};

/// Represents a depot: a location where routes start, end, and may reload.
#[derive(Clone, Debug, Default)]
pub struct Depot {
    /// A x coordinate.
    pub x: i64,
    /// A y coordinate.
    pub y: i64,
    /// Time window in which the depot can be visited.
    pub tw: TimeWindow,
}

impl Depot {
    /// Creates a new instance of `Depot` at the given coordinates with an unbounded window.
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y, tw: TimeWindow::unbounded() }
    }
}

/// Represents a client to be visited by some vehicle.
#[derive(Clone, Debug)]
pub struct Client {
    /// A x coordinate.
    pub x: i64,
    /// A y coordinate.
    pub y: i64,
    /// Amounts delivered from the depot to the client, one per capacity dimension.
    pub delivery: Vec<LoadValue>,
    /// Amounts picked up at the client and returned to the depot, one per capacity dimension.
    pub pickup: Vec<LoadValue>,
    /// Time needed to serve the client.
    pub service_duration: Duration,
    /// Time window in which service must start.
    pub tw: TimeWindow,
    /// Earliest moment the client's goods are available at the depot.
    pub release_time: Duration,
    /// Reward collected when the client is served. Only meaningful for optional clients.
    pub prize: Cost,
    /// Whether the client must be part of a feasible solution.
    pub required: bool,
    /// Index of the mutually exclusive client group the client belongs to, if any.
    pub group: Option<usize>,
    /// Indices of vehicle types allowed to serve the client; `None` permits all.
    pub allowed_vehicle_types: Option<Vec<usize>>,
}

impl Client {
    /// Creates a new required client at the given coordinates with no demand and an
    /// unbounded time window.
    pub fn new(x: i64, y: i64) -> Self {
        Self {
            x,
            y,
            delivery: vec![],
            pickup: vec![],
            service_duration: 0,
            tw: TimeWindow::unbounded(),
            release_time: 0,
            prize: 0,
            required: true,
            group: None,
            allowed_vehicle_types: None,
        }
    }
}

/// A mutually exclusive set of clients: at most one member may appear in a solution.
#[derive(Clone, Debug, Default)]
pub struct ClientGroup {
    /// Locations of the member clients.
    pub clients: Vec<usize>,
}

impl ClientGroup {
    /// Creates a new instance of `ClientGroup`.
    pub fn new(clients: Vec<usize>) -> Self {
        Self { clients }
    }
}
