use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use study_sheet::client::SheetClient;
use study_sheet::config::{ClientConfig, ServerConfig};
use study_sheet::models::{Difficulty, NewQuestion, QuestionPatch, Sheet};
use study_sheet::session::{SheetStore, SyncTicket};
use study_sheet::store::{self, DocumentStore};
use study_sheet::{api, render};

#[derive(Parser)]
#[command(name = "sheet")]
#[command(about = "Checklist of study topics, sub-topics and questions")]
struct Cli {
    /// Server URL for client commands (default: $STUDY_SHEET_URL or http://localhost:5000)
    #[arg(long, global = true)]
    url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the sheet server
    Serve(ServeArgs),
    /// Check server liveness
    Status,
    /// Print the sheet as a tree
    Show {
        /// Append entity ids to every line
        #[arg(long)]
        ids: bool,
    },
    /// Manage topics
    #[command(subcommand)]
    Topic(TopicCommand),
    /// Manage sub-topics of a topic
    #[command(subcommand, name = "sub")]
    SubTopic(SubTopicCommand),
    /// Manage questions of a sub-topic
    #[command(subcommand)]
    Question(QuestionCommand),
}

#[derive(Args, Default)]
struct ServeArgs {
    /// Port for HTTP API
    #[arg(short, long)]
    port: Option<u16>,

    /// Bind address
    #[arg(long)]
    host: Option<String>,

    /// JSON document to start from instead of the built-in seed
    #[arg(long, conflicts_with = "empty")]
    seed: Option<PathBuf>,

    /// Start from an empty sheet
    #[arg(long)]
    empty: bool,
}

#[derive(Subcommand)]
enum TopicCommand {
    Add {
        title: String,
    },
    Delete {
        topic_id: String,
    },
    Edit {
        topic_id: String,
        title: String,
    },
    /// Move the topic at position FROM to position TO (0-based)
    Move {
        from: usize,
        to: usize,
    },
}

#[derive(Subcommand)]
enum SubTopicCommand {
    Add {
        topic_id: String,
        title: String,
    },
    Delete {
        topic_id: String,
        sub_id: String,
    },
    Edit {
        topic_id: String,
        sub_id: String,
        title: String,
    },
    /// Move the sub-topic at position FROM to position TO (0-based)
    Move {
        topic_id: String,
        from: usize,
        to: usize,
    },
}

#[derive(Subcommand)]
enum QuestionCommand {
    Add {
        topic_id: String,
        sub_id: String,
        title: String,
        #[arg(short, long, default_value = "easy")]
        difficulty: Difficulty,
        #[arg(short, long, default_value = "")]
        link: String,
    },
    Delete {
        topic_id: String,
        sub_id: String,
        question_id: String,
    },
    /// Overwrite any of title, difficulty and link
    Edit {
        topic_id: String,
        sub_id: String,
        question_id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(short, long)]
        difficulty: Option<Difficulty>,
        #[arg(short, long)]
        link: Option<String>,
    },
    /// Flip the completion flag
    Toggle {
        topic_id: String,
        sub_id: String,
        question_id: String,
    },
    /// Move the question at position FROM to position TO (0-based)
    Move {
        topic_id: String,
        sub_id: String,
        from: usize,
        to: usize,
    },
}

/// Initialize tracing with output to stderr (client commands) or stdout
fn init_tracing(use_stderr: bool) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "study_sheet=debug,tower_http=debug".into()),
    );

    if use_stderr {
        // Client mode: stdout carries the rendered sheet
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let use_stderr = !matches!(cli.command, None | Some(Commands::Serve(_)));
    init_tracing(use_stderr);

    let client_config = match cli.url {
        Some(base_url) => ClientConfig { base_url },
        None => ClientConfig::from_env(),
    };

    match cli.command {
        None => serve(ServeArgs::default()).await,
        Some(Commands::Serve(args)) => serve(args).await,
        Some(Commands::Status) => {
            let client = SheetClient::from_config(&client_config);
            let message = client
                .ping()
                .await
                .with_context(|| format!("Server at {} is not reachable", client.base_url()))?;
            println!("{}", message);
            Ok(())
        }
        Some(Commands::Show { ids }) => {
            let store = load_store(&client_config).await?;
            print_sheet(&store, ids);
            Ok(())
        }
        Some(Commands::Topic(cmd)) => edit(&client_config, |store| run_topic(store, cmd)).await,
        Some(Commands::SubTopic(cmd)) => {
            edit(&client_config, |store| run_sub_topic(store, cmd)).await
        }
        Some(Commands::Question(cmd)) => {
            edit(&client_config, |store| run_question(store, cmd)).await
        }
    }
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = ServerConfig::from_env();
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(host) = args.host {
        config.host = host;
    }
    if args.seed.is_some() {
        config.seed_path = args.seed;
    }

    let initial = if args.empty {
        Sheet::empty()
    } else if let Some(path) = &config.seed_path {
        store::load_seed(path)?
    } else {
        store::seed_sheet()
    };

    tracing::info!(
        "Starting sheet server with {} topics on {}",
        initial.topics.len(),
        config.bind_addr()
    );

    let app = api::create_router(DocumentStore::new(initial));

    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr()))?;
    tracing::info!("Sheet server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

async fn load_store(config: &ClientConfig) -> anyhow::Result<SheetStore<SheetClient>> {
    let mut store = SheetStore::new(SheetClient::from_config(config));
    store
        .load()
        .await
        .with_context(|| format!("Failed to load sheet from {}", config.base_url))?;
    Ok(store)
}

fn print_sheet(store: &SheetStore<SheetClient>, ids: bool) {
    if let Some(sheet) = store.sheet() {
        print!("{}", render::render_sheet(sheet, ids));
    }
}

/// Load, apply one mutation, wait for its submission, then print the result.
async fn edit(
    config: &ClientConfig,
    op: impl FnOnce(&mut SheetStore<SheetClient>) -> anyhow::Result<Option<SyncTicket>>,
) -> anyhow::Result<()> {
    let mut store = load_store(config).await?;
    if let Some(ticket) = op(&mut store)? {
        ticket.wait().await.context("Failed to sync sheet")?;
    }
    print_sheet(&store, true);
    Ok(())
}

fn require_title(title: &str) -> anyhow::Result<()> {
    if title.trim().is_empty() {
        bail!("Title must not be empty");
    }
    Ok(())
}

fn require_move(len: Option<usize>, from: usize, to: usize) -> anyhow::Result<()> {
    let Some(len) = len else {
        bail!("Nothing to reorder: parent not found");
    };
    if from >= len || to >= len {
        bail!("Positions must be below {}", len);
    }
    Ok(())
}

fn run_topic(
    store: &mut SheetStore<SheetClient>,
    cmd: TopicCommand,
) -> anyhow::Result<Option<SyncTicket>> {
    Ok(match cmd {
        TopicCommand::Add { title } => {
            require_title(&title)?;
            store.add_topic(&title)
        }
        TopicCommand::Delete { topic_id } => store.delete_topic(&topic_id),
        TopicCommand::Edit { topic_id, title } => {
            require_title(&title)?;
            store.edit_topic(&topic_id, &title)
        }
        TopicCommand::Move { from, to } => {
            require_move(store.sheet().map(|s| s.topics.len()), from, to)?;
            store.reorder_topics(from, to)
        }
    })
}

fn run_sub_topic(
    store: &mut SheetStore<SheetClient>,
    cmd: SubTopicCommand,
) -> anyhow::Result<Option<SyncTicket>> {
    Ok(match cmd {
        SubTopicCommand::Add { topic_id, title } => {
            require_title(&title)?;
            store.add_sub_topic(&topic_id, &title)
        }
        SubTopicCommand::Delete { topic_id, sub_id } => store.delete_sub_topic(&topic_id, &sub_id),
        SubTopicCommand::Edit {
            topic_id,
            sub_id,
            title,
        } => {
            require_title(&title)?;
            store.edit_sub_topic(&topic_id, &sub_id, &title)
        }
        SubTopicCommand::Move { topic_id, from, to } => {
            let len = store
                .sheet()
                .and_then(|s| s.topic(&topic_id))
                .map(|t| t.sub_topics.len());
            require_move(len, from, to)?;
            store.reorder_sub_topics(&topic_id, from, to)
        }
    })
}

fn run_question(
    store: &mut SheetStore<SheetClient>,
    cmd: QuestionCommand,
) -> anyhow::Result<Option<SyncTicket>> {
    Ok(match cmd {
        QuestionCommand::Add {
            topic_id,
            sub_id,
            title,
            difficulty,
            link,
        } => {
            require_title(&title)?;
            let fields = NewQuestion::new(title, difficulty, link);
            store.add_question(&topic_id, &sub_id, &fields)
        }
        QuestionCommand::Delete {
            topic_id,
            sub_id,
            question_id,
        } => store.delete_question(&topic_id, &sub_id, &question_id),
        QuestionCommand::Edit {
            topic_id,
            sub_id,
            question_id,
            title,
            difficulty,
            link,
        } => {
            if let Some(title) = &title {
                require_title(title)?;
            }
            let patch = QuestionPatch {
                title,
                difficulty,
                link,
            };
            if patch.is_empty() {
                bail!("Nothing to edit: pass --title, --difficulty or --link");
            }
            store.edit_question(&topic_id, &sub_id, &question_id, &patch)
        }
        QuestionCommand::Toggle {
            topic_id,
            sub_id,
            question_id,
        } => store.toggle_question_completion(&topic_id, &sub_id, &question_id),
        QuestionCommand::Move {
            topic_id,
            sub_id,
            from,
            to,
        } => {
            let len = store
                .sheet()
                .and_then(|s| s.topic(&topic_id))
                .and_then(|t| t.sub_topic(&sub_id))
                .map(|s| s.questions.len());
            require_move(len, from, to)?;
            store.reorder_questions(&topic_id, &sub_id, from, to)
        }
    })
}
