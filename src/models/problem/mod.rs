//! Problem domain models: an immutable instance definition with clients, depots, fleet,
//! and per-profile routing matrices.

mod locations;
pub use self::locations::*;

mod fleet;
pub use self::fleet::VehicleType;

mod matrix;
pub use self::matrix::Matrix;

mod data;
pub use self::data::ProblemData;
