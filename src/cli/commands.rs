use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "punch", about = concat!("[/] punchlist v", env!("CARGO_PKG_VERSION"), " - a local task list with undo"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different workspace root
    #[arg(short = 'C', long = "dir", global = true)]
    pub dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a punchlist workspace in the current directory
    Init(InitArgs),
    /// Add a task
    Add(AddArgs),
    /// List tasks, optionally filtered
    List(ListArgs),
    /// Flip a task between todo and done
    Toggle(ToggleArgs),
    /// Delete a task (recoverable with undo)
    Delete(DeleteArgs),
    /// Restore the most recently deleted task
    Undo,
}

#[derive(Args)]
pub struct InitArgs {
    /// Workspace name (default: inferred from directory name)
    #[arg(long)]
    pub name: Option<String>,
    /// Reinitialize even if .punch/ already exists
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct AddArgs {
    /// Task title
    pub title: String,
    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    pub due: Option<String>,
    /// Effort estimate in minutes
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub estimate: Option<u32>,
    /// Keep this task out of shared/email views
    #[arg(long)]
    pub private: bool,
}

#[derive(Args)]
pub struct ListArgs {
    /// Show only tasks whose title contains this text (case-insensitive)
    #[arg(long, short)]
    pub query: Option<String>,
    /// Filter by status (todo, doing, done, all)
    #[arg(long, short)]
    pub status: Option<String>,
}

#[derive(Args)]
pub struct ToggleArgs {
    /// Task id (a unique prefix is enough)
    pub id: String,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Task id (a unique prefix is enough)
    pub id: String,
    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}
