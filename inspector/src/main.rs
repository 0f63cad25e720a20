use clap::Parser;
use index_engine::index::{BPlusTree, IndexKey};

/// Builds a B+ tree from the given keys and prints its shape and
/// structural statistics.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Maximum number of keys per node
    #[arg(short, long, default_value_t = 3)]
    capacity: usize,

    /// Keys to insert, in order; defaults to a mixed sample workload
    keys: Vec<i64>,
}

// Mixed workload with duplicates, useful for eyeballing splits
const SAMPLE_WORKLOAD: [i64; 30] = [
    3, 8, 15, 32, 4, 11, 21, 2, 4, 34, 6, 13, 25, 16, 30, 1, 17, 18, 24, 9, 22, 23, 5, 7, 19, 20,
    39, 26, 31, 30,
];

fn main() {
    let args = Args::parse();

    if args.capacity < 1 {
        eprintln!("Capacity must be at least 1, got {}", args.capacity);
        std::process::exit(1);
    }

    let keys: Vec<i64> = if args.keys.is_empty() {
        SAMPLE_WORKLOAD.to_vec()
    } else {
        args.keys.clone()
    };

    println!(
        "Building B+ tree with capacity {} from {} inserts.",
        args.capacity,
        keys.len()
    );

    let mut tree = BPlusTree::new(args.capacity);
    for key in keys {
        tree.insert(IndexKey::Integer(key));
    }

    println!("\n{}", tree);

    let stats = tree.stats();
    println!("--- Tree Statistics ---");
    println!("| Height         | {:<6} |", stats.height);
    println!("| Internal nodes | {:<6} |", stats.num_nodes);
    println!("| Leaves         | {:<6} |", stats.num_leaves);
    println!("| Keys           | {:<6} |", stats.num_keys);
}
