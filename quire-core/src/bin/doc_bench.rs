//! Document Tokenizer Benchmarking Tool
//!
//! This binary measures the tokenizer and the indexing pipeline on large
//! document collections, like TREC-style XML dumps or Wikipedia abstracts.
//! Input is read as raw bytes; it does not have to be valid UTF-8.
//!
//! ## What It Benchmarks
//!
//! 1. **Tokenization**: Pulling every token out of the file as one document
//! 2. **Indexing**: Tokenization plus posting list accumulation, one document
//!    per line
//!
//! ## Usage
//!
//! ```bash
//! # Default 1 KiB token buffer
//! ./target/release/doc_bench /path/to/collection.xml
//!
//! # Cap token text at 64 bytes
//! ./target/release/doc_bench /path/to/collection.xml 64
//! ```
//!
//! ## Example Output
//!
//! ```text
//! === Tokenize ===
//! --------------------------------
//! Mode        : Tokenize
//! Elapsed     : 0.452 s
//! Throughput  : 0.418 GiB/s
//! Tokens      : 54_892_341
//! Tokens/sec  : 121_443_232
//! --------------------------------
//! ```
//!
//! Build with `--release`; debug builds are an order of magnitude slower.

use std::env;
use std::fs;
use std::process;
use std::time::{Duration, Instant};

use quire_core::analyzer::tokenizer::{Tokenizer, TokenizerConfig, DEFAULT_BUFFER_CAPACITY};
use quire_core::index::{Indexer, IndexerConfig};
use quire_types::TokenKind;

const WARMUP_RUNS: usize = 1;
const MEASURE_RUNS: usize = 5;

fn main() -> std::io::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: doc_bench <path> [capacity]");
        process::exit(1);
    }

    let path = &args[1];

    let capacity = match args.get(2).map(|s| s.parse::<usize>()) {
        None => DEFAULT_BUFFER_CAPACITY,
        Some(Ok(n)) => n,
        Some(Err(e)) => {
            eprintln!("invalid capacity {:?}: {}", args[2], e);
            process::exit(1);
        }
    };
    let config = TokenizerConfig {
        buffer_capacity: capacity,
    };

    println!("Loading file...");
    let input = fs::read(path)?;

    println!("File size: {}", fmt_bytes(input.len() as u64));
    println!("Capacity:  {} B\n", config.buffer_capacity.max(1));

    bench_tokenize(&input, config);
    bench_index(&input, config);

    Ok(())
}

fn bench_tokenize(input: &[u8], config: TokenizerConfig) {
    let mut tokenizer = Tokenizer::new(config);

    println!("=== Tokenize ===");

    warmup(|| {
        let mut sink = 0u64;
        tokenizer.tokenize(input, |_t| {
            sink += 1;
        });
        std::hint::black_box(sink);
    });

    let mut per_kind = [0u64; TokenKind::COUNT];
    let elapsed = measure(|| {
        let mut local = [0u64; TokenKind::COUNT];
        tokenizer.tokenize(input, |t| {
            local[t.kind.index()] += 1;
        });
        per_kind = local;
        std::hint::black_box(&per_kind);
    });

    print_perf("Tokenize", input.len(), elapsed, per_kind.iter().sum());

    for kind in TokenKind::ALL {
        let n = per_kind[kind.index()];
        if n > 0 {
            println!("  {:<28}: {}", kind.as_str(), fmt_count(n));
        }
    }
    println!();
}

fn bench_index(input: &[u8], config: TokenizerConfig) {
    let config = IndexerConfig {
        tokenizer: config,
        ..Default::default()
    };

    println!("=== Index (one document per line) ===");

    warmup(|| {
        let mut indexer = Indexer::with_config(config);
        index_lines(&mut indexer, input);
        std::hint::black_box(indexer.len());
    });

    let mut stats = None;
    let elapsed = measure(|| {
        let mut indexer = Indexer::with_config(config);
        index_lines(&mut indexer, input);
        stats = Some(indexer.stats());
    });

    match stats {
        Some(stats) => {
            print_perf("Index", input.len(), elapsed, stats.tokens_seen);
            println!("{stats}\n");
        }
        None => print_perf("Index", input.len(), elapsed, 0),
    }
}

fn index_lines(indexer: &mut Indexer, input: &[u8]) {
    let lines = input.split(|&b| b == b'\n').filter(|line| !line.is_empty());
    let (_, failed, last_error) = indexer.add_batch(lines);
    if let Some(e) = last_error {
        eprintln!("{failed} documents rejected: {e}");
    }
}

fn warmup<F: FnMut()>(mut f: F) {
    for _ in 0..WARMUP_RUNS {
        f();
    }
}

fn measure<F: FnMut()>(mut f: F) -> Duration {
    let mut total = Duration::ZERO;

    for _ in 0..MEASURE_RUNS {
        let start = Instant::now();
        f();
        total += start.elapsed();
    }

    total / MEASURE_RUNS as u32
}

fn print_perf(label: &str, input_bytes: usize, elapsed: Duration, tokens: u64) {
    let secs = elapsed.as_secs_f64();
    let gib = input_bytes as f64 / (1024.0 * 1024.0 * 1024.0);

    println!("--------------------------------");
    println!("Mode        : {}", label);
    println!("Elapsed     : {:.3} s", secs);
    println!("Throughput  : {:.3} GiB/s", gib / secs);

    if tokens > 0 {
        println!("Tokens      : {}", fmt_count(tokens));
        println!("Tokens/sec  : {}", fmt_count((tokens as f64 / secs) as u64));
    }

    println!("--------------------------------");
}

fn fmt_bytes(b: u64) -> String {
    if b >= 1024 * 1024 * 1024 {
        format!("{:.2} GiB", b as f64 / (1024.0 * 1024.0 * 1024.0))
    } else if b >= 1024 * 1024 {
        format!("{:.2} MiB", b as f64 / (1024.0 * 1024.0))
    } else if b >= 1024 {
        format!("{:.2} KiB", b as f64 / 1024.0)
    } else {
        format!("{} B", b)
    }
}

fn fmt_count(n: u64) -> String {
    let s = n.to_string();
    let mut out = String::with_capacity(s.len() + s.len() / 3);

    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push('_');
        }
        out.push(ch);
    }

    out.chars().rev().collect()
}
