//! `todo-view`: terminal front end for the todo server.
//!
//! ```bash
//! todo-view                      # show the list
//! todo-view add "Buy milk"       # create, then show
//! todo-view toggle 3             # flip completion of #3, then show
//! todo-view delete 3             # delete #3, then show
//! ```
//!
//! When the server cannot be reached the list falls back to demo data and
//! the command is applied locally.

use clap::{Parser, Subcommand};
use todo_manager_core::TodoId;
use todo_manager_view::{TodoViewAction, ViewConfig, connect, render};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "todo-view")]
#[command(about = "Show and edit the todo list", long_about = None)]
#[command(version)]
struct Cli {
    /// Server base URL (overrides TODO_SERVER_URL)
    #[arg(long, value_name = "URL")]
    server: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Create a todo
    Add {
        /// Title of the new todo
        #[arg(value_name = "TITLE", num_args = 1.., required = true)]
        title: Vec<String>,
    },
    /// Flip the completion flag of a todo
    Toggle {
        /// Todo id
        id: i32,
    },
    /// Delete a todo
    Delete {
        /// Todo id
        id: i32,
    },
}

impl Command {
    fn into_action(self) -> TodoViewAction {
        match self {
            Self::Add { title } => TodoViewAction::CreateTodo {
                title: title.join(" "),
            },
            Self::Toggle { id } => TodoViewAction::ToggleTodo {
                id: TodoId::new(id),
            },
            Self::Delete { id } => TodoViewAction::DeleteTodo {
                id: TodoId::new(id),
            },
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; the environment alone is enough.
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_view=warn,todo_manager_view=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = ViewConfig::from_env();
    if let Some(server) = cli.server {
        config.server_url = server;
    }
    tracing::debug!(server = %config.server_url, "Configuration loaded");

    let view = connect(&config)?;
    view.send(TodoViewAction::Load).await;

    if let Some(command) = cli.command {
        view.send(command.into_action()).await;
    }

    print!("{}", view.state(render).await);
    Ok(())
}
