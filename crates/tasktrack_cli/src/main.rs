use clap::Parser;
use tabled::{Table, Tabled};
use tasktrack_cli::cli::{Cli, Command, TagCommand, UserCommand};
use tasktrack_core::clock;
use tasktrack_core::config;
use tasktrack_core::error::AppError;
use tasktrack_core::model::{Task, User};
use tasktrack_core::query::{AssigneeFilter, Pagination, TaskQuery, query_tasks};
use tasktrack_core::storage::json_store;
use tasktrack_core::store::{NewTask, TaskStore};
use tasktrack_core::users::UserStore;

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Priority")]
    priority: &'static str,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Assignee")]
    assignee: String,
    #[tabled(rename = "Tags")]
    tags: String,
    #[tabled(rename = "Created")]
    created_at: String,
}

impl TaskRow {
    fn from_task(task: &Task) -> Self {
        let overdue = tasktrack_core::store::is_overdue(task, clock::today());
        let status = if overdue {
            format!("{} (overdue)", task.status.as_str())
        } else {
            task.status.as_str().to_string()
        };
        Self {
            id: task.id,
            status,
            priority: task.priority.as_str(),
            title: task.title.clone(),
            due: task.due_date.clone().unwrap_or_else(|| "-".to_string()),
            assignee: task
                .assignee_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "-".to_string()),
            tags: task.tags.iter().cloned().collect::<Vec<_>>().join(", "),
            created_at: task.created_at.clone(),
        }
    }
}

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Created")]
    created_at: String,
}

fn print_tasks_plain(tasks: &[Task], meta: Option<&Pagination>) {
    if tasks.is_empty() {
        println!("No tasks found.");
    } else {
        let rows: Vec<TaskRow> = tasks.iter().map(TaskRow::from_task).collect();
        println!("{}", Table::new(rows));
    }
    if let Some(meta) = meta {
        println!(
            "Page {}/{} ({} items)",
            meta.current_page, meta.total_pages, meta.total_items
        );
    }
}

fn task_value(task: &Task) -> serde_json::Value {
    serde_json::json!({
        "id": task.id,
        "title": task.title,
        "description": task.description,
        "status": task.status,
        "priority": task.priority,
        "created_at": task.created_at,
        "due_date": task.due_date,
        "assignee_id": task.assignee_id,
        "tags": task.tags,
    })
}

fn print_tasks_json(tasks: &[Task], meta: Option<&Pagination>) {
    let tasks: Vec<serde_json::Value> = tasks.iter().map(task_value).collect();
    let payload = match meta {
        Some(meta) => serde_json::json!({ "tasks": tasks, "pagination": meta }),
        None => serde_json::json!({ "tasks": tasks }),
    };
    println!("{payload}");
}

fn print_task_json(task: &Task) {
    println!("{}", task_value(task));
}

fn print_task_detail(task: &Task) {
    println!("ID:          {}", task.id);
    println!("Title:       {}", task.title);
    println!("Description: {}", task.description);
    println!("Status:      {}", task.status.as_str());
    println!("Priority:    {}", task.priority.as_str());
    println!("Created:     {}", task.created_at);
    println!("Due:         {}", task.due_date.as_deref().unwrap_or("-"));
    println!(
        "Assignee:    {}",
        task.assignee_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string())
    );
    println!(
        "Tags:        {}",
        task.tags.iter().cloned().collect::<Vec<_>>().join(", ")
    );
}

fn print_users_plain(users: Vec<User>, meta: &Pagination) {
    if users.is_empty() {
        println!("No users found.");
    } else {
        let rows: Vec<UserRow> = users
            .into_iter()
            .map(|user| UserRow {
                id: user.id,
                name: user.name,
                email: user.email,
                created_at: user.created_at,
            })
            .collect();
        println!("{}", Table::new(rows));
    }
    println!(
        "Page {}/{} ({} items)",
        meta.current_page, meta.total_pages, meta.total_items
    );
}

fn print_user_json(user: &User) {
    println!("{}", serde_json::json!(user));
}

fn warn(warning: Option<&str>) {
    if let Some(warning) = warning {
        eprintln!("WARNING: {warning}");
    }
}

fn run_command(cli: Cli) -> Result<(), AppError> {
    let config_load = config::load_config_with_fallback();
    warn(config_load.warning.as_deref());
    let config = config_load.config;

    // Task mutations live only for this invocation: the task document
    // is read once here and never written back.
    let mut store = TaskStore::load(&json_store::tasks_path(&config));
    let users = UserStore::new(json_store::users_path(&config));

    match cli.command {
        Command::Add {
            title,
            description,
            due,
            priority,
        } => {
            let outcome = store.create(NewTask {
                title: &title,
                description: &description,
                due_date: due.as_deref(),
                priority: priority.as_deref(),
            })?;
            warn(outcome.warning.as_deref());
            if cli.json {
                print_task_json(&outcome.task);
            } else {
                println!("Added task: {} ({})", outcome.task.title, outcome.task.id);
            }
        }
        Command::Show { id } => {
            let task = store.get(&id)?;
            if cli.json {
                print_task_json(&task);
            } else {
                print_task_detail(&task);
            }
        }
        Command::Update {
            id,
            title,
            description,
        } => {
            let task = store.update(&id, title.as_deref(), description.as_deref())?;
            if cli.json {
                print_task_json(&task);
            } else {
                println!("Updated task: {} ({})", task.title, task.id);
            }
        }
        Command::Status { id, status } => {
            let task = store.change_status(&id, &status)?;
            if cli.json {
                print_task_json(&task);
            } else {
                println!(
                    "Changed status of task {} to {}",
                    task.id,
                    task.status.as_str()
                );
            }
        }
        Command::Delete { id } => {
            store.delete(&id)?;
            if cli.json {
                println!("{}", serde_json::json!({ "deleted": id.trim() }));
            } else {
                println!("Deleted task {}", id.trim());
            }
        }
        Command::Assign { id, user } => {
            let task = store.assign(&id, user.as_deref(), &users)?;
            if cli.json {
                print_task_json(&task);
            } else {
                match task.assignee_id {
                    Some(user_id) => println!("Assigned task {} to user {}", task.id, user_id),
                    None => println!("Cleared assignee of task {}", task.id),
                }
            }
        }
        Command::Due { id, date } => {
            let outcome = store.set_due_date(&id, date.as_deref())?;
            warn(outcome.warning.as_deref());
            if cli.json {
                print_task_json(&outcome.task);
            } else {
                let due = outcome.task.due_date.as_deref().unwrap_or("-");
                println!("Set due date of task {} to {}", outcome.task.id, due);
            }
        }
        Command::Priority { id, priority } => {
            let task = store.set_priority(&id, &priority)?;
            if cli.json {
                print_task_json(&task);
            } else {
                println!(
                    "Set priority of task {} to {}",
                    task.id,
                    task.priority.as_str()
                );
            }
        }
        Command::Tag { tag } => match tag {
            TagCommand::Add { id, tags } => {
                let task = store.add_tags(&id, &tags)?;
                if cli.json {
                    print_task_json(&task);
                } else {
                    println!(
                        "Tags of task {}: {}",
                        task.id,
                        task.tags.iter().cloned().collect::<Vec<_>>().join(", ")
                    );
                }
            }
            TagCommand::Remove { id, tag } => {
                let task = store.remove_tag(&id, &tag)?;
                if cli.json {
                    print_task_json(&task);
                } else {
                    println!(
                        "Tags of task {}: {}",
                        task.id,
                        task.tags.iter().cloned().collect::<Vec<_>>().join(", ")
                    );
                }
            }
        },
        Command::Tags => {
            let counts = store.all_tag_counts();
            if cli.json {
                println!("{}", serde_json::json!(counts));
            } else if counts.is_empty() {
                println!("No tags.");
            } else {
                for (tag, count) in counts {
                    println!("{tag}: {count}");
                }
            }
        }
        Command::Overdue => {
            let tasks = store.overdue_tasks(clock::today());
            if cli.json {
                print_tasks_json(&tasks, None);
            } else {
                print_tasks_plain(&tasks, None);
            }
        }
        Command::List {
            status,
            priority,
            tag,
            user,
            unassigned,
            sort_by,
            order,
            page,
            page_size,
        } => {
            let assignee = if unassigned {
                Some(AssigneeFilter::Unassigned)
            } else {
                user.map(AssigneeFilter::User)
            };
            let query = TaskQuery {
                status,
                priority,
                assignee,
                keyword: None,
                tag,
                sort_by,
                order,
                page,
                page_size: page_size.or(config.default_page_size).unwrap_or(20),
            };
            let (tasks, meta) = query_tasks(&store, &users, &query)?;
            if cli.json {
                print_tasks_json(&tasks, Some(&meta));
            } else {
                print_tasks_plain(&tasks, Some(&meta));
            }
        }
        Command::Search {
            keyword,
            sort_by,
            order,
            page,
            page_size,
        } => {
            let query = TaskQuery {
                keyword: Some(keyword),
                sort_by,
                order,
                page,
                page_size,
                ..TaskQuery::default()
            };
            let (tasks, meta) = query_tasks(&store, &users, &query)?;
            if cli.json {
                print_tasks_json(&tasks, Some(&meta));
            } else {
                print_tasks_plain(&tasks, Some(&meta));
            }
        }
        Command::User { user } => match user {
            UserCommand::Add { name, email } => {
                let user = users.create(&name, &email)?;
                if cli.json {
                    print_user_json(&user);
                } else {
                    println!("Added user: {} <{}> ({})", user.name, user.email, user.id);
                }
            }
            UserCommand::List { page, page_size } => {
                let (listed, meta) = users.list(page, page_size)?;
                if cli.json {
                    println!(
                        "{}",
                        serde_json::json!({ "users": listed, "pagination": meta })
                    );
                } else {
                    print_users_plain(listed, &meta);
                }
            }
        },
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run_command(cli) {
        eprintln!("ERROR: {}", err);
        std::process::exit(1);
    }
}
