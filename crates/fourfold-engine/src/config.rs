//! Configuration for simulated replica clusters.

/// Settings for a [`ReplicaCluster`](crate::cluster::ReplicaCluster).
#[derive(Clone, Debug)]
pub struct ClusterConfig {
    /// Number of replicas of the single game.
    pub replicas: usize,
    /// Opaque game identifier shared by every replica.
    pub game_id: Vec<u8>,
    /// Seed for the starting-player draw.
    pub seed: [u8; 4],
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            replicas: 2,
            game_id: vec![1, 2, 3, 4],
            seed: [0, 0, 0, 1],
        }
    }
}

impl ClusterConfig {
    pub fn builder() -> ClusterConfigBuilder {
        ClusterConfigBuilder::new()
    }
}

/// Builder for cluster configuration.
pub struct ClusterConfigBuilder {
    config: ClusterConfig,
}

impl ClusterConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: ClusterConfig::default(),
        }
    }

    pub fn replicas(mut self, count: usize) -> Self {
        self.config.replicas = count;
        self
    }

    pub fn game_id(mut self, game_id: impl Into<Vec<u8>>) -> Self {
        self.config.game_id = game_id.into();
        self
    }

    pub fn seed(mut self, seed: [u8; 4]) -> Self {
        self.config.seed = seed;
        self
    }

    /// Seed from a `u32`, big-endian.
    pub fn seed_u32(self, seed: u32) -> Self {
        self.seed(seed.to_be_bytes())
    }

    pub fn build(self) -> ClusterConfig {
        self.config
    }
}

impl Default for ClusterConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
