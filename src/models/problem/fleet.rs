use crate::models::common::{Cost, Distance, Duration, LoadValue, Location, TimeWindow, MAX_VALUE};

/// Represents a group of identical vehicles.
#[derive(Clone, Debug)]
pub struct VehicleType {
    /// Number of identical vehicles of this type.
    pub num_available: usize,
    /// Capacity per dimension.
    pub capacity: Vec<LoadValue>,
    /// Location where routes of this type start.
    pub start_depot: Location,
    /// Location where routes of this type end.
    pub end_depot: Location,
    /// Shift window: earliest departure and latest return.
    pub tw: TimeWindow,
    /// Maximum route duration.
    pub max_duration: Duration,
    /// Maximum route distance.
    pub max_distance: Distance,
    /// Cost incurred when a vehicle of this type serves at least one client.
    pub fixed_cost: Cost,
    /// Cost per unit of distance travelled.
    pub unit_distance_cost: Cost,
    /// Cost per unit of route duration.
    pub unit_duration_cost: Cost,
    /// Index of the routing profile whose matrices apply to this type.
    pub profile: usize,
    /// Depots at which vehicles of this type may reload mid route.
    pub reload_depots: Vec<Location>,
    /// Maximum number of reload visits per route.
    pub max_reloads: usize,
}

impl VehicleType {
    /// Creates a new instance of `VehicleType` with the given fleet size and capacity,
    /// starting and ending at the first depot, with no ceilings and unit distance cost.
    pub fn new(num_available: usize, capacity: Vec<LoadValue>) -> Self {
        Self {
            num_available,
            capacity,
            start_depot: 0,
            end_depot: 0,
            tw: TimeWindow::unbounded(),
            max_duration: MAX_VALUE,
            max_distance: MAX_VALUE,
            fixed_cost: 0,
            unit_distance_cost: 1,
            unit_duration_cost: 0,
            profile: 0,
            reload_depots: vec![],
            max_reloads: 0,
        }
    }
}
