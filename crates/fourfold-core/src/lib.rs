//! Fourfold Core - board logic and lifecycle model
//!
//! Pure functions over a 7x6 gravity-drop grid plus the [`Phase`] enum shared
//! by the codec and the state machine. Nothing here owns game state beyond
//! the grid passed in.
//!
//! ```rust
//! use fourfold_core::{Board, ROWS};
//!
//! let mut board = Board::new();
//! for _ in 0..4 {
//!     assert!(board.drop_stone(0, 1));
//! }
//! assert_eq!(board.get(0, ROWS - 1), Some(1));
//! assert!(board.evaluate(1));
//! ```

pub mod board;
pub mod phase;

pub use board::{Board, CellChange, COLUMNS, EMPTY, ROWS, RUN_LENGTH};
pub use phase::Phase;
