//! External formats.
//!
//! Converts between caller-side representations (flat integer buffers, text
//! diagrams, SGF-style coordinate lists) and the board and ownership types.

pub mod coords;
pub mod diagram;
pub mod flat;

pub use coords::{parse_coords, place_stones, CoordError};
pub use diagram::{parse_diagram, DiagramError};
pub use flat::{estimate_in_place, FlatRequest, UNDETERMINED_CODE};
