use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new task
    ///
    /// Example: tasktrack add "Rapport urgent" --description "A rendre demain" --due 2025-07-10 --priority HIGH
    Add {
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        due: Option<String>,
        #[arg(long)]
        priority: Option<String>,
    },
    /// Show details of a task
    ///
    /// Example: tasktrack show 1
    Show {
        id: String,
    },
    /// Update a task's title and/or description
    ///
    /// Example: tasktrack update 1 --title "Rapport mensuel"
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Change a task's status (TODO, ONGOING, DONE)
    ///
    /// Example: tasktrack status 1 DONE
    Status {
        id: String,
        status: String,
    },
    /// Delete a task
    ///
    /// Example: tasktrack delete 1
    Delete {
        id: String,
    },
    /// Assign a task to a user, or clear the assignment
    ///
    /// Example: tasktrack assign 1 2
    /// Example: tasktrack assign 1
    Assign {
        id: String,
        user: Option<String>,
    },
    /// Set or clear a task's due date
    ///
    /// Example: tasktrack due 1 2025-07-10
    /// Example: tasktrack due 1 "2025-07-10T18:00:00"
    /// Example: tasktrack due 1
    Due {
        id: String,
        date: Option<String>,
    },
    /// Set a task's priority (LOW, NORMAL, HIGH, CRITICAL)
    ///
    /// Example: tasktrack priority 1 CRITICAL
    Priority {
        id: String,
        priority: String,
    },
    /// Manage a task's tags
    Tag {
        #[command(subcommand)]
        tag: TagCommand,
    },
    /// Show every tag with its usage count
    ///
    /// Example: tasktrack tags
    Tags,
    /// List overdue tasks
    ///
    /// Example: tasktrack overdue
    Overdue,
    /// List tasks, filtered, sorted and paginated
    ///
    /// Example: tasktrack list --status TODO --sort-by priority --order asc
    List {
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        tag: Option<String>,
        /// Only tasks assigned to this user id
        #[arg(long, conflicts_with = "unassigned")]
        user: Option<String>,
        /// Only tasks with no assignee
        #[arg(long)]
        unassigned: bool,
        #[arg(long, default_value = "created_at")]
        sort_by: String,
        #[arg(long, default_value = "desc")]
        order: String,
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long)]
        page_size: Option<usize>,
    },
    /// Search tasks by keyword in the title or description
    ///
    /// Example: tasktrack search rapport
    Search {
        keyword: String,
        #[arg(long, default_value = "created_at")]
        sort_by: String,
        #[arg(long, default_value = "desc")]
        order: String,
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long, default_value_t = 10)]
        page_size: usize,
    },
    /// Manage users
    User {
        #[command(subcommand)]
        user: UserCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum TagCommand {
    /// Add one or more tags to a task
    ///
    /// Example: tasktrack tag add 1 projet urgent
    Add {
        id: String,
        #[arg(required = true)]
        tags: Vec<String>,
    },
    /// Remove a tag from a task
    ///
    /// Example: tasktrack tag remove 1 projet
    Remove {
        id: String,
        tag: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    /// Create a new user
    ///
    /// Example: tasktrack user add "Jean" jean@example.com
    Add {
        name: String,
        email: String,
    },
    /// List users sorted by name
    ///
    /// Example: tasktrack user list
    List {
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long, default_value_t = 20)]
        page_size: usize,
    },
}
