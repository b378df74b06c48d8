use std::error::Error;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::store::{Store, TASKS_KEY, UNDO_KEY};
use crate::model::config::WorkspaceConfig;
use crate::ops::repository::TaskRepository;
use crate::ops::undo_log::UndoLog;
use crate::ops::undo_ops;
use crate::ops::view::{StatusFilter, project};

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn Error>> {
    let json = cli.json;
    let dir = cli.dir.as_deref();

    match cli.command {
        None => {
            // TUI launch is handled in main.rs
            Ok(())
        }
        Some(Commands::Init(args)) => cmd_init(args, dir),
        Some(Commands::Add(args)) => cmd_add(args, dir, json),
        Some(Commands::List(args)) => cmd_list(args, dir, json),
        Some(Commands::Toggle(args)) => cmd_toggle(args, dir),
        Some(Commands::Delete(args)) => cmd_delete(args, dir),
        Some(Commands::Undo) => cmd_undo(dir),
    }
}

/// Resolve the workspace root: the `-C` override, or the cwd.
fn workspace_root(dir: Option<&str>) -> Result<PathBuf, Box<dyn Error>> {
    match dir {
        Some(d) => std::fs::canonicalize(d)
            .map_err(|e| format!("cannot resolve -C path '{}': {}", d, e).into()),
        None => Ok(std::env::current_dir()?),
    }
}

fn open_store(dir: Option<&str>) -> Result<Store, Box<dyn Error>> {
    let root = workspace_root(dir)?;
    let store = match dir {
        Some(_) => Store::open(&root)?,
        None => Store::discover(&root)?,
    };
    Ok(store)
}

fn open_repo(dir: Option<&str>) -> Result<TaskRepository, Box<dyn Error>> {
    Ok(TaskRepository::load(open_store(dir)?))
}

/// Resolve a user-supplied id, accepting any unique prefix.
/// Ok(None) means no task matched (a no-op for the caller, not an error).
fn resolve_id(repo: &TaskRepository, given: &str) -> Result<Option<String>, Box<dyn Error>> {
    if let Some(task) = repo.get(given) {
        return Ok(Some(task.id.clone()));
    }
    let needle = given.to_ascii_uppercase();
    let matches: Vec<&str> = repo
        .tasks()
        .iter()
        .filter(|t| t.id.to_ascii_uppercase().starts_with(&needle))
        .map(|t| t.id.as_str())
        .collect();
    match matches.len() {
        0 => Ok(None),
        1 => Ok(Some(matches[0].to_string())),
        n => Err(format!("ambiguous id prefix '{}' (matches {} tasks)", given, n).into()),
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

fn cmd_init(args: InitArgs, dir: Option<&str>) -> Result<(), Box<dyn Error>> {
    let root = workspace_root(dir)?;
    let store = Store::init(&root, args.force)?;

    let mut config = WorkspaceConfig::default();
    config.workspace.name = args.name.unwrap_or_else(|| dir_name(&root));
    config_io::write_config(store.dir(), &config)?;

    // Seed both slots so a fresh workspace lists cleanly
    store.save(TASKS_KEY, &Vec::<serde_json::Value>::new())?;
    store.save(UNDO_KEY, &Vec::<serde_json::Value>::new())?;

    println!(
        "initialized punchlist workspace '{}' in .punch/",
        config.workspace.name
    );
    Ok(())
}

fn dir_name(root: &Path) -> String {
    root.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "punchlist".to_string())
}

fn cmd_add(args: AddArgs, dir: Option<&str>, json: bool) -> Result<(), Box<dyn Error>> {
    let mut repo = open_repo(dir)?;

    let due = match args.due.as_deref() {
        Some(s) => Some(
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map_err(|_| format!("invalid due date '{}' (expected YYYY-MM-DD)", s))?,
        ),
        None => None,
    };

    match repo.add(&args.title, due, args.estimate, args.private) {
        Some(task) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&TaskJson::from(&task))?);
            } else {
                println!("added {}", task_line(&task));
            }
        }
        None => {
            // Blank titles are rejected without creating anything;
            // this is feedback, not a failure
            println!("nothing added: title is empty");
        }
    }
    Ok(())
}

fn cmd_list(args: ListArgs, dir: Option<&str>, json: bool) -> Result<(), Box<dyn Error>> {
    let repo = open_repo(dir)?;

    let filter = match args.status.as_deref() {
        Some(s) => StatusFilter::parse(s)
            .ok_or_else(|| format!("unknown status '{}' (todo, doing, done, all)", s))?,
        None => StatusFilter::All,
    };
    let query = args.query.as_deref().unwrap_or("");
    let visible = project(repo.tasks(), query, filter);

    if json {
        let out = TaskListJson {
            query: query.to_string(),
            filter: filter.label().to_string(),
            tasks: visible.iter().map(|t| TaskJson::from(*t)).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print_task_list(&visible);
    }
    Ok(())
}

fn cmd_toggle(args: ToggleArgs, dir: Option<&str>) -> Result<(), Box<dyn Error>> {
    let mut repo = open_repo(dir)?;
    let Some(id) = resolve_id(&repo, &args.id)? else {
        println!("no task matching '{}'", args.id);
        return Ok(());
    };
    if let Some(status) = repo.toggle_status(&id) {
        println!("{} is now {}", id, status.label());
    }
    Ok(())
}

fn cmd_delete(args: DeleteArgs, dir: Option<&str>) -> Result<(), Box<dyn Error>> {
    let store = open_store(dir)?;
    let mut repo = TaskRepository::load(store.clone());
    let mut log = UndoLog::load(store);

    let Some(id) = resolve_id(&repo, &args.id)? else {
        println!("no task matching '{}'", args.id);
        return Ok(());
    };

    if !args.yes {
        // Interactive confirmation; delete is the one destructive action
        let title = repo.get(&id).map(|t| t.title.clone()).unwrap_or_default();
        eprint!("delete \"{}\"? [y/n] ", title);
        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;
        if !input.trim().eq_ignore_ascii_case("y") {
            println!("cancelled");
            return Ok(());
        }
    }

    if let Some(task) = undo_ops::delete_task(&mut repo, &mut log, &id) {
        println!("deleted \"{}\" (restore with `punch undo`)", task.title);
    }
    Ok(())
}

fn cmd_undo(dir: Option<&str>) -> Result<(), Box<dyn Error>> {
    let store = open_store(dir)?;
    let mut repo = TaskRepository::load(store.clone());
    let mut log = UndoLog::load(store);

    match undo_ops::undo(&mut repo, &mut log) {
        Some(task) => println!("restored \"{}\"", task.title),
        None => println!("nothing to undo"),
    }
    Ok(())
}
