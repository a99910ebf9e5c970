//! Utility helpers.

mod error;
pub use self::error::{GenericError, GenericResult};

mod random;
pub use self::random::{DefaultRandom, Random};

mod timing;
pub use self::timing::Timer;

use std::sync::Arc;

/// A logger type which is called with various information.
pub type InfoLogger = Arc<dyn Fn(&str)>;
