//! # Fourfold
//!
//! Command-line driver for the replicated Connect-Four engine. Simulates
//! several nodes of one game exchanging binary deltas and checks that they
//! converge after every move.

use clap::{Parser, Subcommand};
use fourfold_core::{Board, COLUMNS, ROWS};
use fourfold_engine::{ClusterConfig, GameEngine, ReplicaCluster, Result};
use stress_test::stress_test_games;
use tracing_subscriber::EnvFilter;

pub mod stress_test;

// ─── CLI ───────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "fourfold")]
#[command(about = "Replicated Connect-Four engine driven by binary deltas")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scripted game: two replicas, vertical win in column 0
    Demo {
        /// Seed for the starting-player draw
        #[arg(long, default_value_t = 1)]
        seed: u32,
    },
    /// Play many random games concurrently and verify convergence
    Stress {
        /// Replicas per game
        #[arg(long, default_value_t = 3)]
        replicas: usize,
        /// Number of games
        #[arg(long, default_value_t = 100)]
        games: usize,
        /// Base seed; game `i` uses `seed + i`
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn render(board: &Board) -> String {
    let mut out = String::new();
    for row in 0..ROWS {
        out.push('|');
        for column in 0..COLUMNS {
            let glyph = match board.get(column, row) {
                Some(0) | None => '.',
                Some(1) => 'X',
                Some(2) => 'O',
                Some(_) => '#',
            };
            out.push(glyph);
        }
        out.push_str("|\n");
    }
    out.push_str(&format!("+{}+", "-".repeat(COLUMNS)));
    out
}

fn print_replica(label: &str, engine: &GameEngine) {
    println!(
        "{} [phase: {}, turn: {}]\n{}",
        label,
        engine.phase(),
        engine.current_player(),
        render(engine.board())
    );
}

fn run_demo(seed: u32) -> Result<()> {
    println!("╔════════════════════════════════════════════════════════════╗");
    println!("║          Fourfold - Replicated Connect Four Demo           ║");
    println!("╚════════════════════════════════════════════════════════════╝");

    let config = ClusterConfig::builder().replicas(2).seed_u32(seed).build();
    let mut cluster = ReplicaCluster::new(config);

    let init = cluster.initialize(0, vec![vec![1], vec![2]])?;
    cluster.drain_network()?;
    println!("\nInit delta:    {:?}", init.encode()?);
    println!("Starting player: {}", init.starting_player);

    let running = cluster.begin_running(0)?;
    cluster.drain_network()?;
    println!("Running delta: {:?}", running.encode());

    // The starting player stacks column 0; the other player stacks column 1.
    let first = cluster.replica(0).current_player();
    while !cluster.replica(0).phase().is_terminal() {
        let engine = cluster.replica(0);
        let column = if engine.current_player() == first { 0 } else { 1 };
        let mover = match engine.current_player_id() {
            Some(id) => id.to_vec(),
            None => break,
        };

        let delta = cluster.execute_move(0, &mover, column)?;
        cluster.drain_network()?;
        println!(
            "\nPlayer {:?} -> column {}: delta {:?}, converged: {}",
            mover,
            column,
            delta.encode()?,
            cluster.is_converged()
        );
    }

    println!();
    print_replica("Replica 0", cluster.replica(0));
    print_replica("Replica 1", cluster.replica(1));

    let snapshot = cluster.replica(1).snapshot_state()?;
    match serde_json::to_string(&snapshot) {
        Ok(json) => println!("\nSnapshot: {}", json),
        Err(err) => tracing::warn!(error = %err, "snapshot serialization failed"),
    }

    println!("\n✓ Demo completed, replicas converged: {}", cluster.is_converged());
    Ok(())
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Demo { seed } => {
            if let Err(err) = run_demo(seed) {
                tracing::error!(error = %err, "demo failed");
                std::process::exit(1);
            }
        }
        Commands::Stress { replicas, games, seed } => {
            let rt = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt,
                Err(err) => {
                    tracing::error!(error = %err, "failed to start runtime");
                    std::process::exit(1);
                }
            };
            let stats = rt.block_on(stress_test_games(games, replicas, seed));
            stats.print();
            if stats.diverged_games > 0 {
                std::process::exit(1);
            }
            println!("\n✓ All games converged!");
        }
    }
}
