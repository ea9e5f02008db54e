use async_stream::stream;
use fourfold_core::{Phase, COLUMNS};
use fourfold_engine::{ClusterConfig, ReplicaCluster, Result};
use futures::stream::Stream;
use futures::stream::StreamExt;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Statistics collected during stress testing
#[derive(Clone, Debug)]
pub struct StressTestStats {
    pub num_games: usize,
    pub num_replicas: usize,
    pub total_moves: usize,
    pub decisive_games: usize,
    pub drawn_games: usize,
    pub diverged_games: usize,
    pub total_time: Duration,
    pub moves_per_second: f64,
}

impl StressTestStats {
    pub fn print(&self) {
        println!("\n╔════════════════════════════════════════════════════════════╗");
        println!("║              Stress Test Statistics                        ║");
        println!("╠════════════════════════════════════════════════════════════╣");
        println!("║  Games Played:              {:>30} ║", self.num_games);
        println!("║  Replicas per Game:         {:>30} ║", self.num_replicas);
        println!("║  Total Moves:               {:>30} ║", self.total_moves);
        println!("║  Decisive / Drawn:          {:>30} ║", format!("{} / {}", self.decisive_games, self.drawn_games));
        println!("║  Diverged Games:            {:>30} ║", self.diverged_games);
        println!("║  Total Time:                {:>29}s ║", format!("{:.3}", self.total_time.as_secs_f64()));
        println!("║  Moves/Second:              {:>30.0} ║", self.moves_per_second);
        println!("╚════════════════════════════════════════════════════════════╝");
    }
}

/// Outcome of one simulated game
#[derive(Clone, Debug)]
struct GameReport {
    moves: usize,
    decisive: bool,
    converged: bool,
}

/// Generator that yields (origin replica, column preference) picks
fn move_picks(num_replicas: usize, seed: u64) -> impl Stream<Item = (usize, usize)> {
    stream! {
        let mut rng = StdRng::seed_from_u64(seed);
        loop {
            let origin = rng.gen_range(0..num_replicas);
            let column = rng.gen_range(0..COLUMNS);
            yield (origin, column);
        }
    }
}

/// Play one random game, checking convergence after every delivered move
async fn play_game(num_replicas: usize, seed: u64) -> Result<GameReport> {
    let config = ClusterConfig::builder()
        .replicas(num_replicas)
        .game_id(seed.to_be_bytes())
        .seed_u32(seed as u32)
        .build();
    let mut cluster = ReplicaCluster::new(config);

    cluster.initialize(0, vec![b"red".to_vec(), b"yel".to_vec()])?;
    cluster.drain_network()?;
    cluster.begin_running(num_replicas - 1)?;
    cluster.drain_network()?;

    let mut picks = Box::pin(move_picks(num_replicas, seed));
    let mut moves = 0;
    let mut converged = true;

    while cluster.replica(0).phase() == Phase::Running {
        let Some((origin, preferred)) = picks.next().await else {
            break;
        };

        let engine = cluster.replica(origin);
        // First legal column at or after the preferred one
        let column = (0..COLUMNS)
            .map(|offset| (preferred + offset) % COLUMNS)
            .find(|&c| engine.board().can_drop(c));
        let (Some(column), Some(mover)) = (column, engine.current_player_id()) else {
            break;
        };
        let mover = mover.to_vec();

        cluster.execute_move(origin, &mover, column as u8)?;
        cluster.drain_network()?;
        moves += 1;

        if !cluster.is_converged() {
            warn!(seed, moves, "replicas diverged");
            converged = false;
            break;
        }

        if moves % 8 == 0 {
            tokio::task::yield_now().await;
        }
    }

    let last = cluster.replica(0);
    let decisive = last.board().evaluate(last.current_player());
    debug!(seed, moves, decisive, "game finished");

    Ok(GameReport {
        moves,
        decisive,
        converged,
    })
}

/// Stress test playing `num_games` random games concurrently
pub async fn stress_test_games(num_games: usize, num_replicas: usize, seed: u64) -> StressTestStats {
    println!("\n╔════════════════════════════════════════════════════════════╗");
    println!("║        Replicated Game Stress Test (Async)                 ║");
    println!("║  Games: {} | Replicas: {} | Seed: {} ║", num_games, num_replicas, seed);
    println!("╚════════════════════════════════════════════════════════════╝");

    let num_replicas = num_replicas.max(1);
    let start = Instant::now();

    let mut handles = Vec::with_capacity(num_games);
    for game in 0..num_games {
        let game_seed = seed.wrapping_add(game as u64);
        handles.push(tokio::spawn(play_game(num_replicas, game_seed)));
    }

    let mut total_moves = 0;
    let mut decisive_games = 0;
    let mut drawn_games = 0;
    let mut diverged_games = 0;

    for handle in handles {
        match handle.await {
            Ok(Ok(report)) => {
                total_moves += report.moves;
                if !report.converged {
                    diverged_games += 1;
                } else if report.decisive {
                    decisive_games += 1;
                } else {
                    drawn_games += 1;
                }
            }
            Ok(Err(err)) => {
                warn!(error = %err, "game aborted");
                diverged_games += 1;
            }
            Err(err) => {
                warn!(error = %err, "game task panicked");
                diverged_games += 1;
            }
        }
    }

    let total_time = start.elapsed();
    let moves_per_second = total_moves as f64 / total_time.as_secs_f64().max(f64::EPSILON);

    info!(
        games = num_games,
        total_moves, diverged_games, "stress test completed"
    );

    StressTestStats {
        num_games,
        num_replicas,
        total_moves,
        decisive_games,
        drawn_games,
        diverged_games,
        total_time,
        moves_per_second,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_random_games_converge() {
        let stats = stress_test_games(8, 3, 7).await;
        assert_eq!(stats.num_games, 8);
        assert_eq!(stats.diverged_games, 0);
        assert_eq!(stats.decisive_games + stats.drawn_games, 8);
        assert!(stats.total_moves >= 8 * 7);
    }
}
