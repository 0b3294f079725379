//! Domain types for the feed records this crate canonicalizes.
//!
//! All types enforce their invariants at construction time, so code that
//! receives a `RouteId` or `StopId` can trust it came from a numeric code.

mod color;
mod direction;
mod route;
mod stop;

pub use color::{HexColor, InvalidColor};
pub use direction::{Direction, InvalidDirection};
pub use route::{InvalidRouteCode, RouteId};
pub use stop::{InvalidStopCode, StopId};
