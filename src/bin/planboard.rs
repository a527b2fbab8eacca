//! Filter, sort and print the content of a planner snapshot

use std::path::PathBuf;

use clap::Parser;

use planboard::{DateRange, FilterOptions, Priority, Snapshot, SortKey, SortOrder, TaskStatus};
use planboard::validation::validate_filter_options;

/// Search the tasks and events of a planner snapshot
#[derive(Parser, Debug)]
#[command(name = "planboard")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the JSON snapshot
    #[arg(short = 'f', long, env = "PLANBOARD_SNAPSHOT", default_value = "planboard.json")]
    snapshot: PathBuf,

    /// Case-insensitive text to look for
    #[arg(short, long, default_value = "")]
    search: String,

    /// Only show tasks with one of these statuses (e.g. "todo", "in-progress", "done")
    #[arg(long)]
    status: Vec<TaskStatus>,

    /// Only show tasks with one of these priorities
    #[arg(long)]
    priority: Vec<Priority>,

    /// Only show tasks (and events) involving one of these people
    #[arg(short, long)]
    assignee: Vec<String>,

    /// First day of the date range
    #[arg(long)]
    from: Option<String>,

    /// Last day of the date range (defaults to --from)
    #[arg(long)]
    to: Option<String>,

    #[arg(long)]
    hide_completed: bool,

    #[arg(long)]
    hide_personal: bool,

    /// dueDate, priority, name or status
    #[arg(long, default_value_t = SortKey::DueDate)]
    sort_by: SortKey,

    /// asc or desc
    #[arg(long, default_value_t = SortOrder::Asc)]
    order: SortOrder,

    /// Reject the snapshot and the filters if they contain malformed data, instead of ignoring it
    #[arg(long)]
    validate: bool,
}

impl Cli {
    fn filter_options(&self) -> FilterOptions {
        FilterOptions {
            status: self.status.clone(),
            priority: self.priority.clone(),
            assignees: self.assignee.clone(),
            date_range: DateRange { from: self.from.clone(), to: self.to.clone() },
            show_completed: !self.hide_completed,
            show_personal_tasks: !self.hide_personal,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = Snapshot::from_file(&cli.snapshot)?;
    let filters = cli.filter_options();

    if cli.validate {
        snapshot.validate()?;
        validate_filter_options(&filters)?;
    }

    let all_tasks: Vec<_> = snapshot.all_tasks().collect();
    let tasks = planboard::filter_tasks(all_tasks.iter().copied(), &cli.search, &filters);
    let tasks = planboard::sort_tasks(tasks, cli.sort_by, cli.order);
    let events = planboard::filter_events(&snapshot.events, &cli.search, &filters);

    println!("---- Tasks ({} by {}) -----", cli.order, cli.sort_by);
    for task in &tasks {
        planboard::utils::print_task(task);
    }

    println!("---- Events -----");
    for event in &events {
        planboard::utils::print_event(event);
    }

    let stats = planboard::search_stats(all_tasks.len(), tasks.len(), snapshot.events.len(), events.len());
    println!("---- Showing {}/{} tasks ({}%), {}/{} events ({}%) -----",
        stats.tasks.showing, stats.tasks.total, stats.tasks.percentage,
        stats.events.showing, stats.events.total, stats.events.percentage);

    let people = planboard::all_assignees(all_tasks.iter().copied(), &snapshot.events);
    if !people.is_empty() {
        println!("People: {}", people.join(", "));
    }

    Ok(())
}
