// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the subcommands: `inspect`, `train`, `graph` and
// `bookmark`, and all their configurable flags.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for missing args
//   - type conversion (string → usize, f64, etc.)
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};

use crate::application::inspect_use_case::InspectConfig;
use crate::application::train_use_case::RunConfig;
use crate::ml::model::Activation;

/// The top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a dataset and show schemas and split counts
    Inspect(InspectArgs),

    /// Train a classifier and report loss and confusion matrix
    Train(TrainArgs),

    /// Emit a trained model's node-link graph as JSON
    Graph(GraphArgs),

    /// Manage saved run configurations
    Bookmark(BookmarkArgs),
}

/// Arguments for the `inspect` command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Dataset JSON: a file path or an http(s) URL
    #[arg(long)]
    pub dataset: String,

    /// Name of the string-valued label attribute
    #[arg(long, default_value = "label")]
    pub label_name: String,

    /// Percentage of records that go to the train set
    #[arg(long, default_value_t = 80.0)]
    pub train_percent: f64,

    /// Shuffle seed; 0 or negative keeps the original order
    #[arg(long, default_value_t = 0)]
    pub seed: i64,
}

impl From<InspectArgs> for InspectConfig {
    fn from(a: InspectArgs) -> Self {
        InspectConfig {
            dataset: a.dataset,
            label_name: a.label_name,
            train_percent: a.train_percent,
            shuffle_seed: a.seed,
        }
    }
}

/// All arguments for the `train` command.
/// Each field becomes a --flag on the command line.
#[derive(Args, Debug, Clone)]
pub struct TrainArgs {
    /// Dataset JSON: a file path or an http(s) URL
    #[arg(long)]
    pub dataset: String,

    /// Name of the string-valued label attribute
    #[arg(long, default_value = "label")]
    pub label_name: String,

    /// Hidden layer widths, e.g. --hidden 8,4.
    /// Input/output widths come from the dataset schemas.
    #[arg(long, value_delimiter = ',', default_value = "8")]
    pub hidden: Vec<usize>,

    /// One activation per non-input layer, e.g.
    /// --activations tanh,softmax. Defaults to tanh for every
    /// hidden layer and softmax for the output layer.
    #[arg(long, value_delimiter = ',')]
    pub activations: Vec<Activation>,

    /// Number of samples per optimizer step
    #[arg(long, default_value_t = 16)]
    pub batch_size: usize,

    /// Number of full passes through the training data
    #[arg(long, default_value_t = 50)]
    pub epochs: usize,

    /// Adam learning rate
    #[arg(long, default_value_t = 1e-2)]
    pub lr: f64,

    /// Percentage of records that go to the train set
    #[arg(long, default_value_t = 80.0)]
    pub train_percent: f64,

    /// Shuffle seed; 0 or negative keeps the original order
    #[arg(long, default_value_t = 0)]
    pub seed: i64,

    /// Directory for checkpoints and the metrics CSV
    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: String,

    /// Continue training from this configuration's checkpoint
    #[arg(long, default_value_t = false)]
    pub resume: bool,
}

/// Convert CLI TrainArgs into the application-layer RunConfig.
/// This is the boundary between Layer 1 and Layer 2 —
/// the application layer never sees clap types.
impl From<TrainArgs> for RunConfig {
    fn from(a: TrainArgs) -> Self {
        let activations = if a.activations.is_empty() {
            let mut acts = vec![Activation::Tanh; a.hidden.len()];
            acts.push(Activation::Softmax);
            acts
        } else {
            a.activations
        };
        RunConfig {
            dataset: a.dataset,
            label_name: a.label_name,
            hidden_layers: a.hidden,
            activations,
            batch_size: a.batch_size,
            epochs: a.epochs,
            lr: a.lr,
            train_percent: a.train_percent,
            shuffle_seed: a.seed,
            checkpoint_dir: a.checkpoint_dir,
            resume: a.resume,
        }
    }
}

/// Arguments for the `graph` command
#[derive(Args, Debug)]
pub struct GraphArgs {
    /// Directory where checkpoints were saved during training
    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: String,

    /// Model id to render; defaults to the latest checkpoint
    #[arg(long)]
    pub model_id: Option<String>,

    /// Write the JSON here instead of stdout
    #[arg(long)]
    pub out: Option<String>,
}

/// Arguments for the `bookmark` command group
#[derive(Args, Debug)]
pub struct BookmarkArgs {
    /// Path of the bookmark file
    #[arg(long, default_value = "bookmarks.json")]
    pub file: String,

    #[command(subcommand)]
    pub action: BookmarkAction,
}

#[derive(Subcommand, Debug)]
pub enum BookmarkAction {
    /// Save a run configuration under a name
    Add {
        /// Bookmark name; an existing bookmark with the same
        /// name is replaced
        #[arg(long)]
        name: String,

        #[command(flatten)]
        run: TrainArgs,
    },

    /// List all saved bookmarks
    List,

    /// Remove a bookmark by name
    Remove {
        #[arg(long)]
        name: String,
    },
}
