// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// This is the entry point for all user interaction.
// It uses the `clap` crate to parse command line arguments.
// All business logic is delegated to Layer 2 (application).
//
// Four commands are supported:
//   1. `inspect`  — validates a dataset and shows its framing
//   2. `train`    — trains a classifier and reports results
//   3. `graph`    — emits a trained network as node-link JSON
//   4. `bookmark` — saves/lists/removes named run configs
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

// Declare the commands submodule
pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{BookmarkAction, BookmarkArgs, Commands, GraphArgs, InspectArgs, TrainArgs};

/// The main CLI struct — clap reads the fields and generates
/// argument parsing code automatically via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "dnn-playground",
    version = "0.1.0",
    about = "Frame JSON datasets as tensors, train small classifiers, and inspect the resulting network."
)]
pub struct Cli {
    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    /// This keeps the CLI layer thin — it only routes, never computes.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Inspect(args) => Self::run_inspect(args),
            Commands::Train(args) => Self::run_train(args),
            Commands::Graph(args) => Self::run_graph(args),
            Commands::Bookmark(args) => Self::run_bookmark(args),
        }
    }

    /// Handles the `inspect` subcommand.
    /// Frames the dataset without training and prints the report.
    fn run_inspect(args: InspectArgs) -> Result<()> {
        use crate::application::inspect_use_case::InspectUseCase;

        let report = InspectUseCase::new(args.into()).execute()?;

        println!("Dataset: {}", report.name);
        if let Some(description) = &report.description {
            println!("  {}", description);
        }
        println!("Records:  {}", report.record_count);
        println!("Features: {}", report.feature_schema.join(", "));
        println!("Labels:   {}", report.label_schema.join(", "));
        println!(
            "Split:    {} train / {} test",
            report.train_count, report.test_count
        );
        Ok(())
    }

    /// Handles the `train` subcommand.
    /// Converts CLI args into a RunConfig and hands off to Layer 2.
    fn run_train(args: TrainArgs) -> Result<()> {
        use crate::application::train_use_case::TrainUseCase;

        tracing::info!("Starting training on dataset: {}", args.dataset);

        // Convert CLI args → application config (separates presentation from domain)
        let report = TrainUseCase::new(args.into()).execute()?;

        println!("\nTraining complete.");
        println!("Model id:   {}", report.model_id);
        println!(
            "Final loss: train={:.4} test={:.4}",
            report.final_train_loss, report.final_test_loss
        );
        println!("Accuracy:   {:.1}%", report.accuracy * 100.0);
        println!("{}", report.confusion_table);
        println!("Metrics:    {}", report.metrics_csv);
        Ok(())
    }

    /// Handles the `graph` subcommand.
    /// Prints the network JSON, or writes it to --out.
    fn run_graph(args: GraphArgs) -> Result<()> {
        use crate::application::graph_use_case::{GraphConfig, GraphUseCase};

        let json = GraphUseCase::new(GraphConfig {
            checkpoint_dir: args.checkpoint_dir,
            model_id: args.model_id,
        })
        .execute()?;

        match args.out {
            Some(path) => {
                std::fs::write(&path, json)?;
                println!("Network graph written to {}", path);
            }
            None => println!("{}", json),
        }
        Ok(())
    }

    /// Handles the `bookmark` subcommand group.
    fn run_bookmark(args: BookmarkArgs) -> Result<()> {
        use crate::infra::bookmarks::{Bookmark, BookmarkStore};

        let mut store = BookmarkStore::open(&args.file)?;
        match args.action {
            BookmarkAction::Add { name, run } => {
                // Route through RunConfig so defaulting rules
                // (e.g. implicit activations) apply here too.
                let cfg: crate::application::train_use_case::RunConfig = run.into();
                store.add(Bookmark {
                    name: name.clone(),
                    dataset: cfg.dataset,
                    hidden_layers: cfg.hidden_layers,
                    activations: cfg.activations.iter().map(|a| a.to_string()).collect(),
                    batch_size: cfg.batch_size,
                    train_percent: cfg.train_percent,
                    shuffle_seed: cfg.shuffle_seed,
                })?;
                println!("Saved bookmark \"{}\"", name);
            }
            BookmarkAction::List => {
                if store.list().is_empty() {
                    println!("No bookmarks.");
                }
                for entry in store.list() {
                    println!(
                        "{}: {} hidden={:?} activations={} batch={} split={}% seed={}",
                        entry.name,
                        entry.dataset,
                        entry.hidden_layers,
                        entry.activations.join(","),
                        entry.batch_size,
                        entry.train_percent,
                        entry.shuffle_seed,
                    );
                }
            }
            BookmarkAction::Remove { name } => {
                if store.remove(&name)? {
                    println!("Removed bookmark \"{}\"", name);
                } else {
                    println!("No bookmark named \"{}\"", name);
                }
            }
        }
        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::bookmarks::BookmarkStore;

    fn run_args(args: &[&str]) -> Result<()> {
        Cli::try_parse_from(args).unwrap().run()
    }

    #[test]
    fn test_run_dispatches_bookmark_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("bookmarks.json");
        let file = file.to_str().unwrap();

        run_args(&[
            "dnn-playground",
            "bookmark",
            "--file",
            file,
            "add",
            "--name",
            "iris-run",
            "--dataset",
            "data/iris.json",
            "--hidden",
            "8,4",
        ])
        .unwrap();
        run_args(&["dnn-playground", "bookmark", "--file", file, "list"]).unwrap();

        let store = BookmarkStore::open(file).unwrap();
        assert_eq!(store.list().len(), 1);
        assert_eq!(store.list()[0].name, "iris-run");
        // defaulted activations were filled in before saving
        assert_eq!(
            store.list()[0].activations,
            vec!["tanh", "tanh", "softmax"]
        );

        run_args(&[
            "dnn-playground",
            "bookmark",
            "--file",
            file,
            "remove",
            "--name",
            "iris-run",
        ])
        .unwrap();
        let store = BookmarkStore::open(file).unwrap();
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_unknown_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["dnn-playground", "paint"]).is_err());
    }
}
