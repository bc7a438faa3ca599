#![forbid(unsafe_code)]

//! Stateful sheet controller and host coordination.
//!
//! [`Sheet`] owns one presentation of a draggable bottom sheet: it attaches
//! to a host [`PresentingSurface`], animates between discrete positions,
//! interprets drag events, and notifies subscribers. [`SheetHost`] enforces
//! the one-sheet-at-a-time selection policy on top of it.
//!
//! Everything here is single-threaded. Time only advances through
//! [`Sheet::tick`] / [`Sheet::tick_at`], which the host calls once per frame.

pub mod sheet;

pub use sheet::controller::{Sheet, SheetPhase, SheetSnapshot};
pub use sheet::header::{SheetAction, SheetHeader};
pub use sheet::host::{Selection, SheetHost};
pub use sheet::notify::{Notifier, Subscription};
pub use sheet::surface::{PresentingSurface, SheetId, SurfaceHandle};
