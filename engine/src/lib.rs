//! # Gambito engine library
//!
//! Evaluation, static exchange evaluation, the transposition table and the
//! iterative-deepening Negamax search. Builds on the `chess` crate for
//! position representation and move generation.
pub mod eval;
pub mod search;
pub mod see;
pub mod tt;

pub use eval::{Eval, evaluate};
pub use search::{MAX_PLY, SearchReport, Searcher};
pub use see::see;
pub use tt::{TT, TTBound, TTEntry};
