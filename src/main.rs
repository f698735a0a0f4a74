use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod analytics;
mod auth;
mod engine;
mod models;
mod replies;
mod report;
mod roster;
mod router;
mod session;

use auth::LoginScreen;
use engine::{ChatSession, Timings};
use models::{Author, MoodCategory, Role, Turn};
use replies::CannedReplyPolicy;
use router::{Router, Screen};
use session::FileSessionStore;

#[derive(Parser)]
#[command(name = "mindmate")]
#[command(about = "MindMate wellness companion for students and teachers", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in as a student or teacher
    Login {
        #[arg(long, value_enum)]
        role: Role,
        #[arg(long)]
        name: String,
    },
    /// Log out and clear the saved session
    Logout,
    /// Show who is logged in and which screen would open
    Status,
    /// Chat with the companion: send a message and/or share a mood (student session)
    Chat {
        #[arg(long)]
        message: Option<String>,
        #[arg(long, value_enum)]
        mood: Option<MoodCategory>,
    },
    /// Render the class wellness dashboard (teacher session)
    Dashboard {
        /// Drill down into one student by id
        #[arg(long)]
        student: Option<String>,
        /// Load mood records from a CSV file instead of the built-in sample
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Write the dashboard to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let timings = Timings::default();
    let mut router = Router::startup(FileSessionStore::from_env())?;

    match cli.command {
        Commands::Login { role, name } => {
            if *router.screen() != Screen::Login {
                bail!("a session is already active; run `mindmate logout` first");
            }

            let mut login = LoginScreen::new(timings.login);
            login.set_candidate(role, name);

            println!("Connecting...");
            match login.submit(role).await {
                Some((role, username)) => {
                    router.authenticate(role, username.clone())?;
                    println!("Welcome, {username}!");
                }
                None => println!("Enter a name to log in."),
            }
        }
        Commands::Logout => match router.screen() {
            Screen::Login => println!("No one is logged in."),
            _ => {
                router.logout()?;
                println!("Logged out.");
            }
        },
        Commands::Status => match router.screen() {
            Screen::Login => println!("Not logged in."),
            Screen::Student(identity) => {
                println!("Logged in as {} (student chat).", identity.username)
            }
            Screen::Teacher(identity) => {
                println!("Logged in as {} (teacher dashboard).", identity.username)
            }
        },
        Commands::Chat { message, mood } => {
            let identity = match router.screen() {
                Screen::Student(identity) => identity.clone(),
                Screen::Login => bail!("log in as a student first"),
                Screen::Teacher(_) => bail!("the chat screen is for student sessions"),
            };
            if message.is_none() && mood.is_none() {
                bail!("pass --message and/or --mood");
            }

            let chat = ChatSession::start(&identity, Arc::new(CannedReplyPolicy), timings);
            if let Some(mood) = mood {
                chat.select_mood(mood);
            }
            if let Some(message) = &message {
                if !chat.send_text(message) {
                    println!("(empty message ignored)");
                }
            }

            // Wait out the slowest scheduled reply before printing.
            tokio::time::sleep(timings.reply + Duration::from_millis(100)).await;

            for turn in chat.transcript() {
                print_turn(&identity.username, &turn);
            }
            chat.close();
        }
        Commands::Dashboard { student, csv, out } => {
            match router.screen() {
                Screen::Teacher(_) => {}
                Screen::Login => bail!("log in as a teacher first"),
                Screen::Student(_) => bail!("the dashboard is for teacher sessions"),
            }

            let roster = match csv {
                Some(path) => roster::load_csv(&path)?,
                None => roster::sample_roster()?,
            };
            let rendered = report::build_dashboard(&roster, student.as_deref());

            match out {
                Some(path) => {
                    std::fs::write(&path, rendered)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    println!("Dashboard written to {}.", path.display());
                }
                None => print!("{rendered}"),
            }
        }
    }

    Ok(())
}

fn print_turn(username: &str, turn: &Turn) {
    let who = match turn.author {
        Author::User => username,
        Author::Assistant => "MindMate",
    };
    println!("[{}] {who}: {}", turn.sent_at.format("%H:%M"), turn.text);
}
