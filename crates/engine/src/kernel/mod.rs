//! Kernel
//!
//! Auction history and what it reveals about each hand, the constraint
//! solver, memoized priority queries, and selection of the best call.

pub mod cache;
pub mod hand_bounds;
pub mod history;
pub mod selector;
pub mod solver;

pub use cache::{PriorityCache, PriorityKey};
pub use hand_bounds::{Bound, HandBounds};
pub use history::{CallRecord, History, HistoryBuilder, Position, PositionView};
pub use selector::{compare_ranked, resolve, Bidder, Candidate, Decision, Evaluation};
pub use solver::{HandSolver, SolveResult, Solver};
