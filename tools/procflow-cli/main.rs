use clap::{Parser, Subcommand, ValueEnum};
use procflow::catalog;
use procflow::prelude::*;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

/// Storage format flag, mapped onto `SnapshotFormat`.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatCli {
    Json,
    Binary,
}

impl From<FormatCli> for SnapshotFormat {
    fn from(format: FormatCli) -> Self {
        match format {
            FormatCli::Json => SnapshotFormat::Json,
            FormatCli::Binary => SnapshotFormat::Binary,
        }
    }
}

/// Inspect and edit process workflow graphs stored on disk
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Directory holding one file per process
    #[arg(short, long, default_value = "processes")]
    store: PathBuf,

    /// On-disk snapshot format
    #[arg(short, long, value_enum, default_value = "json")]
    format: FormatCli,

    /// Optional editor config JSON file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List stored processes
    List,
    /// Show the node palette
    Kinds,
    /// Create an empty process
    New { process: String },
    /// Print a process graph and its structural warnings
    Show { process: String },
    /// Add a node to a process
    AddNode {
        process: String,
        /// Node kind, e.g. start, process, decision, approval
        #[arg(short, long)]
        kind: String,
        /// Display label (defaults to the kind's label)
        #[arg(short, long)]
        label: Option<String>,
        /// Position; a random point in the viewport when omitted
        #[arg(long, requires = "y")]
        x: Option<f64>,
        #[arg(long, requires = "x")]
        y: Option<f64>,
    },
    /// Connect two nodes
    Connect {
        process: String,
        source: String,
        target: String,
        /// Outgoing handle of the source (e.g. yes / no on decisions)
        #[arg(long)]
        source_handle: Option<String>,
        #[arg(long)]
        target_handle: Option<String>,
    },
    /// Remove a node and every edge attached to it
    RemoveNode { process: String, node: String },
    /// Replace a process graph with a canvas JSON export
    Import { process: String, file: PathBuf },
    /// Print a process graph as canvas JSON
    Export { process: String },
    /// Delete a process
    Delete { process: String },
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => EditorConfig::from_file(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load config: {}", e))),
        None => EditorConfig::default(),
    };
    let repository = Arc::new(FileRepository::new(cli.store.clone(), cli.format.into()));

    if let Err(e) = run(cli.command, repository, &config).await {
        exit_with_error(&e.to_string());
    }
}

async fn run(
    command: Command,
    repository: Arc<FileRepository>,
    config: &EditorConfig,
) -> Result<()> {
    match command {
        Command::List => {
            let ids = repository.list().await?;
            if ids.is_empty() {
                println!("No processes in '{}'", repository.root().display());
            }
            for id in ids {
                println!("{}", id);
            }
        }
        Command::Kinds => {
            for entry in catalog::entries() {
                let outgoing: Vec<&str> = entry.handles.outgoing.iter().map(|h| h.id).collect();
                println!(
                    "{:<13} {:<13} in: {:<3} out: [{}]",
                    entry.kind.as_str(),
                    entry.default_label,
                    if entry.handles.accepts_incoming() { "yes" } else { "no" },
                    outgoing.join(", ")
                );
            }
        }
        Command::New { process } => {
            let mut session = open(&process, repository, config).await?;
            finish(&mut session).await?;
        }
        Command::Show { process } => {
            let session = open(&process, repository, config).await?;
            print_graph(session.surface().store());
        }
        Command::AddNode {
            process,
            kind,
            label,
            x,
            y,
        } => {
            let kind: NodeKind = kind.parse()?;
            let mut session = open(&process, repository, config).await?;
            let surface = session.surface_mut();
            let id = match (x, y) {
                (Some(x), Some(y)) => surface.add_node_at(kind, Position::new(x, y)),
                _ => surface.add_node_anywhere(kind),
            };
            if let Some(label) = label {
                surface.update_node(&id, &AttributePatch::default().label(label))?;
            }
            println!("{}", id);
            finish(&mut session).await?;
        }
        Command::Connect {
            process,
            source,
            target,
            source_handle,
            target_handle,
        } => {
            let mut session = open(&process, repository, config).await?;
            let edge = session.surface_mut().connect(
                HandleRef {
                    node: NodeId::new(source),
                    handle: source_handle,
                },
                HandleRef {
                    node: NodeId::new(target),
                    handle: target_handle,
                },
            )?;
            println!("{}", edge);
            finish(&mut session).await?;
        }
        Command::RemoveNode { process, node } => {
            let mut session = open(&process, repository, config).await?;
            let node = NodeId::new(node);
            if session.surface_mut().delete_node(&node).is_none() {
                return Err(GraphError::NodeNotFound(node).into());
            }
            finish(&mut session).await?;
        }
        Command::Import { process, file } => {
            let json = fs::read_to_string(&file)?;
            let graph = UiGraph::from_json(&json)?.into_graph()?;
            let snapshot = ProcessSnapshot::new(ProcessId::new(process.clone()), graph);
            repository.save(&snapshot).await?;
            println!(
                "Imported {} node(s) and {} edge(s) into '{}'",
                snapshot.nodes.len(),
                snapshot.edges.len(),
                process
            );
        }
        Command::Export { process } => {
            let graph = repository.load(&ProcessId::new(process)).await?;
            println!("{}", UiGraph::from(&graph).to_json_pretty()?);
        }
        Command::Delete { process } => {
            let session = open(&process, repository, config).await?;
            match session.delete_process().await {
                Ok(id) => println!("Deleted '{}'", id),
                Err(session) => {
                    report_notifications(&session);
                    return Err("delete failed".into());
                }
            }
        }
    }
    Ok(())
}

async fn open(
    process: &str,
    repository: Arc<FileRepository>,
    config: &EditorConfig,
) -> std::result::Result<EditorSession<FileRepository>, PersistenceError> {
    EditorSession::open(ProcessId::new(process), repository, config).await
}

/// Saves the session and fails if the save did not go through.
async fn finish(session: &mut EditorSession<FileRepository>) -> Result<()> {
    if session.save().await {
        Ok(())
    } else {
        report_notifications(session);
        Err("save failed".into())
    }
}

fn report_notifications(session: &EditorSession<FileRepository>) {
    for notification in session.surface().notifications().iter() {
        eprintln!("[{:?}] {}", notification.level, notification.message);
    }
}

fn print_graph(store: &GraphStore) {
    println!("Process '{}'", store.process_id());
    println!("\nNodes ({}):", store.nodes().len());
    for node in store.nodes() {
        println!(
            "  {:<44} {:<13} {:<24} {}",
            node.id(),
            node.kind(),
            node.label,
            node.position
        );
    }
    println!("\nEdges ({}):", store.edges().len());
    for edge in store.edges() {
        println!("  {:<44} {} -> {}", edge.id, edge.source, edge.target);
    }

    let report = analyze(store);
    if report.is_clean() {
        println!("\nNo structural warnings.");
        return;
    }
    println!("\nWarnings:");
    if !report.has_start {
        println!("  - no start node");
    }
    for id in &report.unreachable {
        println!("  - '{}' is unreachable from a start node", id);
    }
    for id in &report.dead_ends {
        println!("  - '{}' has no outgoing connection", id);
    }
    for id in &report.self_loops {
        println!("  - edge '{}' is a self-loop", id);
    }
    for group in &report.parallel_edges {
        let ids: Vec<String> = group.iter().map(|id| id.to_string()).collect();
        println!("  - parallel edges: {}", ids.join(", "));
    }
    if report.has_cycle {
        println!("  - the graph contains a cycle");
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn repository(dir: &TempDir) -> Arc<FileRepository> {
        Arc::new(FileRepository::new(dir.path(), SnapshotFormat::Json))
    }

    #[tokio::test]
    async fn test_delete_of_unknown_process_fails() {
        let dir = TempDir::new().unwrap();
        let result = run(
            Command::Delete {
                process: "ghost".to_string(),
            },
            repository(&dir),
            &EditorConfig::default(),
        )
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_new_then_delete_succeeds() {
        let dir = TempDir::new().unwrap();
        let config = EditorConfig::default();
        let new = Command::New {
            process: "onboarding".to_string(),
        };
        assert!(run(new, repository(&dir), &config).await.is_ok());
        assert!(dir.path().join("onboarding.json").exists());

        let delete = Command::Delete {
            process: "onboarding".to_string(),
        };
        assert!(run(delete, repository(&dir), &config).await.is_ok());
        assert!(!dir.path().join("onboarding.json").exists());
    }
}
