// src/bin/surfrank.rs
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use surfrank::{
    iterate_pagerank_run, load_corpus, render, sample_pagerank_seeded, top_k, IterateConfig,
    RankResult, SamplingConfig,
};

/// Rank the pages of an HTML corpus by random-surfer PageRank, estimated by sampling
/// and by iteration.
#[derive(Debug, Parser)]
#[command(name = "surfrank", version)]
struct Cli {
    /// Directory containing the corpus `.html` pages
    corpus: PathBuf,

    /// Probability of following a link instead of teleporting
    #[arg(long, default_value_t = 0.85)]
    damping: f64,

    /// Number of random-surfer steps for the sampling estimate
    #[arg(short = 'n', long, default_value_t = 10_000)]
    samples: usize,

    /// Seed for the sampling walk (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// L1 change below which iteration stops
    #[arg(long, default_value_t = 1e-3)]
    tolerance: f64,

    /// Iteration cap before reporting non-convergence
    #[arg(long, default_value_t = 1_000)]
    max_iterations: usize,

    /// Also list the K highest-ranked pages of each estimate
    #[arg(long, value_name = "K")]
    top: Option<usize>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&Cli::parse()) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let seed = cli.seed.unwrap_or_else(rand::random);
    debug!(seed, "sampling seed");
    let sampling = SamplingConfig {
        damping: cli.damping,
        samples: cli.samples,
        seed,
    };
    let iterate = IterateConfig {
        damping: cli.damping,
        tolerance: cli.tolerance,
        max_iterations: cli.max_iterations,
    };
    sampling.validate()?;
    iterate.validate()?;

    let graph = load_corpus(&cli.corpus)
        .with_context(|| format!("loading corpus {}", cli.corpus.display()))?;

    let sampled = sample_pagerank_seeded(&graph, sampling)?;
    print!(
        "{}",
        render(
            &format!("PageRank Results from Sampling (n = {})", cli.samples),
            &sampled
        )
    );
    print_top(cli.top, "Sampling", &sampled);

    let iterated = iterate_pagerank_run(&graph, iterate)?;
    debug!(
        iterations = iterated.iterations,
        diff_l1 = iterated.diff_l1,
        "iteration finished"
    );
    print!("{}", render("PageRank Results from Iteration", &iterated.ranks));
    print_top(cli.top, "Iteration", &iterated.ranks);
    Ok(())
}

fn print_top(k: Option<usize>, label: &str, ranks: &RankResult) {
    let Some(k) = k else { return };
    println!("Top {k} from {label}");
    for (page, value) in top_k(ranks, k) {
        println!("  {page}: {value:.4}");
    }
}
