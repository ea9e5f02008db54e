//! Fourfold Delta - binary state diffs between replicas
//!
//! A replica that executes a transition emits a minimal delta; every other
//! replica decodes it and applies it to reach the same state. Three variants
//! exist:
//!
//! - [`InitDelta`]: roster, starting player and the `Initialized` phase
//! - [`RunningDelta`]: the `Initialized -> Running` transition
//! - [`ActionDelta`]: the cells changed by one move plus the next turn pointer
//!
//! Decoding is the exact inverse of encoding and never reads past the end
//! of the supplied buffer.
//!
//! # Example
//!
//! ```rust
//! use fourfold_core::{CellChange, Phase};
//! use fourfold_delta::{ActionDelta, Delta};
//!
//! let delta = ActionDelta::new(
//!     Phase::Running,
//!     2,
//!     vec![CellChange { column: 0, row: 5, stone: 1 }],
//! );
//! let bytes = delta.encode().unwrap();
//! assert_eq!(Delta::decode(&bytes).unwrap(), Delta::Action(delta));
//! ```

pub mod codec;
pub mod error;

pub use codec::{
    ActionDelta,
    Delta,
    InitDelta,
    RunningDelta,
    ACTION_HEADER_LEN,
    CELL_WIDTH,
    INIT_HEADER_LEN,
};

pub use error::{DecodeError, DecodeResult, EncodeError, EncodeResult};
