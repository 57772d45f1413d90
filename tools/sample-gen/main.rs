use clap::Parser;
use procflow::catalog::{HANDLE_NO, HANDLE_YES};
use procflow::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;

/// Kinds placed between the start and end nodes.
const STEP_KINDS: [NodeKind; 8] = [
    NodeKind::Process,
    NodeKind::Decision,
    NodeKind::Data,
    NodeKind::Approval,
    NodeKind::Document,
    NodeKind::Notification,
    NodeKind::Report,
    NodeKind::Assignment,
];

const ROW_SPACING: f64 = 120.0;
const BRANCH_SPACING: f64 = 220.0;

/// Generates random process graphs for demos and load testing
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Output directory
    #[arg(short, long, default_value = "tmp/processes")]
    out: PathBuf,

    /// Number of processes to generate
    #[arg(short, long, default_value_t = 5)]
    count: usize,

    /// Minimum number of steps between start and end
    #[arg(long, default_value_t = 3)]
    min_steps: usize,

    /// Maximum number of steps between start and end
    #[arg(long, default_value_t = 12)]
    max_steps: usize,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Write compact binary snapshots instead of JSON
    #[arg(long)]
    binary: bool,
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let args = Args::parse();

    if args.min_steps > args.max_steps {
        eprintln!("--min-steps must not exceed --max-steps");
        std::process::exit(1);
    }

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let format = if args.binary {
        SnapshotFormat::Binary
    } else {
        SnapshotFormat::Json
    };
    let repository = FileRepository::new(args.out.clone(), format);

    for index in 0..args.count {
        let process_id = ProcessId::new(format!("sample-{:03}", index + 1));
        let steps = rng.random_range(args.min_steps..=args.max_steps);
        let store = generate_process(&mut rng, process_id.clone(), steps);

        if let Err(e) = repository.save(&store.serialize()).await {
            eprintln!("Failed to write '{}': {}", process_id, e);
            std::process::exit(1);
        }
        println!(
            "-> Generated '{}' with {} node(s) and {} edge(s).",
            process_id,
            store.nodes().len(),
            store.edges().len()
        );
    }
    println!("Wrote {} process(es) to '{}'", args.count, args.out.display());
}

/// Builds start -> steps -> end. Decisions send "yes" down the main line and
/// "no" to a side step that rejoins it.
fn generate_process(rng: &mut StdRng, process_id: ProcessId, steps: usize) -> GraphStore {
    let mut store = GraphStore::new(process_id);
    let mut row = 0.0;
    let mut previous = HandleRef::node(store.add_node(NodeKind::Start, "Start", Position::new(0.0, row)));

    for step in 0..steps {
        row += ROW_SPACING;
        let kind = STEP_KINDS[rng.random_range(0..STEP_KINDS.len())];
        let label = format!("{} {}", kind.default_label(), step + 1);
        let id = store.add_node(kind, label, Position::new(0.0, row));
        connect(&mut store, previous, HandleRef::node(id.clone()));

        if kind == NodeKind::Approval {
            let patch = AttributePatch::default()
                .assignee(Some(format!("reviewer-{}", rng.random_range(1..=9))))
                .time_limit_hours(Some(rng.random_range(4..=72)));
            if let Err(e) = store.update_node(&id, &patch) {
                log::warn!("Could not configure approval '{}': {}", id, e);
            }
        }
        if rng.random_bool(0.3) {
            let patch = AttributePatch::default().required(true);
            if let Err(e) = store.update_node(&id, &patch) {
                log::warn!("Could not mark '{}' required: {}", id, e);
            }
        }

        previous = if kind == NodeKind::Decision {
            let side = store.add_node(
                NodeKind::Notification,
                format!("Rejected at step {}", step + 1),
                Position::new(BRANCH_SPACING, row + ROW_SPACING / 2.0),
            );
            connect(
                &mut store,
                HandleRef::with_handle(id.clone(), HANDLE_NO),
                HandleRef::node(side),
            );
            HandleRef::with_handle(id, HANDLE_YES)
        } else {
            HandleRef::node(id)
        };
    }

    row += ROW_SPACING;
    let end = store.add_node(NodeKind::End, "End", Position::new(0.0, row));
    connect(&mut store, previous, HandleRef::node(end.clone()));

    // Side branches rejoin at the end node.
    let dangling: Vec<NodeId> = store
        .nodes()
        .iter()
        .filter(|n| n.kind() == NodeKind::Notification && store.outgoing(n.id()).next().is_none())
        .map(|n| n.id().clone())
        .collect();
    for id in dangling {
        connect(&mut store, HandleRef::node(id), HandleRef::node(end.clone()));
    }

    store
}

fn connect(store: &mut GraphStore, source: HandleRef, target: HandleRef) {
    if let Err(e) = store.connect(source, target) {
        log::warn!("Skipping edge: {}", e);
    }
}
