//! Fourfold Engine - replicated Connect Four state machine
//!
//! Each node runs its own [`GameEngine`] for a game. A node validates and
//! executes a move locally and emits a compact delta. Every other node
//! applies that delta and reaches the same state. No central arbiter
//! decides individual moves.
//!
//! # Protocol
//!
//! ```text
//! Originator:                          Followers:
//!   initialize(players, rng) -> Init     apply_sync(Init)
//!   begin_running()          -> Running  apply_sync(Running)
//!   execute_move(p, col)     -> Action   apply_sync(Action)
//! ```
//!
//! Deltas must be applied in the order they were produced. Ordering,
//! deduplication and authenticity belong to the transport.
//!
//! # Example
//!
//! ```rust
//! use fourfold_engine::{seeded_rng, GameEngine};
//!
//! let mut origin = GameEngine::new(vec![1, 2, 3, 4]);
//! let mut follower = GameEngine::new(vec![1, 2, 3, 4]);
//!
//! let init = origin
//!     .initialize(vec![vec![1], vec![2]], &mut seeded_rng([0, 0, 0, 1]))
//!     .unwrap();
//! follower.apply_sync(&init.encode().unwrap()).unwrap();
//!
//! let running = origin.begin_running().unwrap();
//! follower.apply_sync(&running.encode()).unwrap();
//!
//! let mover = origin.current_player_id().unwrap().to_vec();
//! let action = origin.execute_move(&mover, 3).unwrap();
//! follower.apply_sync(&action.encode().unwrap()).unwrap();
//!
//! assert!(origin.structurally_eq(&follower));
//! ```

pub mod cluster;
pub mod config;
pub mod engine;
pub mod error;
pub mod host;
pub mod seed;
pub mod snapshot;

pub use cluster::{Network, ReplicaCluster, SeqNo, SyncMessage};
pub use config::{ClusterConfig, ClusterConfigBuilder};
pub use engine::{GameEngine, PlayerId};
pub use error::{EngineError, ErrorKind, Result};
pub use host::HostEngine;
pub use seed::seeded_rng;
pub use snapshot::{Snapshot, SNAPSHOT_LEN};
