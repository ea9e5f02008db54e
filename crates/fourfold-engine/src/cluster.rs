//! Replica cluster for convergence testing
//!
//! Holds several [`GameEngine`] replicas of one game and a FIFO network of
//! encoded deltas between them. Any replica may originate a transition;
//! its delta is broadcast to every other replica and delivered in the
//! order it was produced.
//!
//! The network never drops, duplicates or reorders. Action deltas are not
//! commutative, so ordered delivery is a precondition, not something this
//! cluster repairs.

use crate::config::ClusterConfig;
use crate::engine::{GameEngine, PlayerId};
use crate::error::{EngineError, Result};
use crate::seed::seeded_rng;
use fourfold_delta::{ActionDelta, InitDelta, RunningDelta};
use rand::rngs::StdRng;
use std::collections::VecDeque;
use tracing::trace;

/// Sequence number of a broadcast delta
pub type SeqNo = u64;

/// One encoded delta addressed to one replica.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyncMessage {
    pub from: usize,
    pub to: usize,
    pub seq: SeqNo,
    pub payload: Vec<u8>,
}

/// In-order message queue between replicas.
#[derive(Debug, Default)]
pub struct Network {
    in_flight: VecDeque<SyncMessage>,
    delivered: u64,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn send(&mut self, msg: SyncMessage) {
        self.in_flight.push_back(msg);
    }

    pub fn receive(&mut self) -> Option<SyncMessage> {
        let msg = self.in_flight.pop_front()?;
        self.delivered += 1;
        Some(msg)
    }

    pub fn is_empty(&self) -> bool {
        self.in_flight.is_empty()
    }

    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }

    pub fn delivered_count(&self) -> u64 {
        self.delivered
    }
}

#[derive(Debug)]
pub struct ReplicaCluster {
    replicas: Vec<GameEngine>,
    network: Network,
    rng: StdRng,
    next_seq: SeqNo,
}

impl ReplicaCluster {
    pub fn new(config: ClusterConfig) -> Self {
        let replicas = (0..config.replicas)
            .map(|_| GameEngine::new(config.game_id.clone()))
            .collect();

        Self {
            replicas,
            network: Network::new(),
            rng: seeded_rng(config.seed),
            next_seq: 0,
        }
    }

    /// # Panics
    ///
    /// Panics if `idx` is not below [`len`](Self::len).
    pub fn replica(&self, idx: usize) -> &GameEngine {
        &self.replicas[idx]
    }

    pub fn replicas(&self) -> &[GameEngine] {
        &self.replicas
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    /// Initialize the game on `origin` and broadcast the Init delta.
    pub fn initialize(&mut self, origin: usize, players: Vec<PlayerId>) -> Result<InitDelta> {
        let delta = replica_at(&mut self.replicas, origin)?.initialize(players, &mut self.rng)?;
        self.broadcast(origin, delta.encode()?);
        Ok(delta)
    }

    /// Start the game on `origin` and broadcast the Running delta.
    pub fn begin_running(&mut self, origin: usize) -> Result<RunningDelta> {
        let delta = replica_at(&mut self.replicas, origin)?.begin_running()?;
        self.broadcast(origin, delta.encode());
        Ok(delta)
    }

    /// Execute a move on `origin` and broadcast the Action delta.
    pub fn execute_move(&mut self, origin: usize, player: &[u8], column: u8) -> Result<ActionDelta> {
        let delta = replica_at(&mut self.replicas, origin)?.execute_move(player, column)?;
        self.broadcast(origin, delta.encode()?);
        Ok(delta)
    }

    /// Queue `payload` for every replica except `from`.
    pub fn broadcast(&mut self, from: usize, payload: Vec<u8>) {
        self.next_seq += 1;
        for to in (0..self.replicas.len()).filter(|&to| to != from) {
            self.network.send(SyncMessage {
                from,
                to,
                seq: self.next_seq,
                payload: payload.clone(),
            });
        }
    }

    /// Deliver one queued message. Returns false when the network is idle.
    pub fn process_one(&mut self) -> Result<bool> {
        let Some(msg) = self.network.receive() else {
            return Ok(false);
        };
        trace!(from = msg.from, to = msg.to, seq = msg.seq, "delivering delta");
        self.replicas[msg.to].apply_sync(&msg.payload)?;
        Ok(true)
    }

    /// Deliver everything queued; returns the number of messages applied.
    pub fn drain_network(&mut self) -> Result<usize> {
        let mut applied = 0;
        while self.process_one()? {
            applied += 1;
        }
        Ok(applied)
    }

    /// All replicas structurally equal
    pub fn is_converged(&self) -> bool {
        match self.replicas.split_first() {
            Some((first, rest)) => rest.iter().all(|r| r.structurally_eq(first)),
            None => true,
        }
    }

    pub fn len(&self) -> usize {
        self.replicas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.replicas.is_empty()
    }
}

fn replica_at(replicas: &mut [GameEngine], index: usize) -> Result<&mut GameEngine> {
    let count = replicas.len();
    replicas.get_mut(index).ok_or(EngineError::UnknownReplica {
        index,
        replicas: count,
    })
}
