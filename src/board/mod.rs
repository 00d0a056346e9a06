//! Board representation.
//!
//! Contains the point states, the grid itself, and the pure connectivity
//! queries (groups, liberties, enclosed territory) the playouts rely on.

pub mod grid;
pub mod group;
pub mod point;
pub mod territory;

pub use grid::Board;
pub use group::{group_at, Group};
pub use point::{Player, PointState};
pub use territory::{enclosing_owner, ownership_snapshot};
