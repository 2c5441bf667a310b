//! Оценка силы покерных рук (Texas Hold'em) для шоудауна.
//!
//! Основная функция:
//!   `evaluate_best_hand(hole, board) -> Option<HandRank>`

pub mod evaluator;
pub mod hand_rank;

pub use evaluator::evaluate_best_hand;
pub use hand_rank::{describe_hand, HandCategory, HandRank};
