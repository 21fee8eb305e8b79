//! Solution representation.
//!
//! A solution is a flat [`MoveList`] of fixed-size [`Move`] records. The
//! objective is [`MoveList::objective`]; [`MoveList::compact`] merges
//! duplicate moves and hands surplus users back to the pool.

mod compact;
mod list;
mod types;

pub use list::MoveList;
pub use types::Move;
