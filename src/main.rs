use anyhow::Result;
use ccna_course::admin::SortKey;
use ccna_course::app::command::AnswerArg;
use ccna_course::{App, Config};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "ccna-course")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and remember the account
    Login {
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Forget the stored account and token
    Logout,
    /// Create a learner account
    Signup {
        username: String,
        email: String,
        #[arg(short, long)]
        password: String,
        /// Repeat the password
        #[arg(short, long)]
        confirm: String,
    },
    /// Create an admin account
    AdminSignup {
        name: String,
        email: String,
        #[arg(short, long)]
        password: String,
        /// Repeat the password
        #[arg(short, long)]
        confirm: String,
    },
    /// Request a password reset
    ForgotPassword { email: String },
    /// Set a new password
    ChangePassword {
        email: String,
        #[arg(short, long)]
        password: String,
        /// Repeat the password
        #[arg(short, long)]
        confirm: String,
    },
    /// Show the curriculum with lock and completion status
    Status,
    /// Open a section
    Open { section: String },
    /// Mark a section completed (the open one by default)
    Complete { section: Option<String> },
    /// Take a quiz
    Quiz {
        /// Quiz section name, e.g. "Module 1 Quiz"
        section: String,
        /// Answer as QUESTION=OPTION (e.g. Q3=B); omit to answer interactively
        #[arg(short, long = "answer")]
        answers: Vec<AnswerArg>,
    },
    /// Admin dashboard
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },
}

#[derive(Subcommand)]
enum AdminCommands {
    /// Headline numbers across all learners
    Summary,
    /// Learner table
    Users {
        /// Filter by name or email
        #[arg(short, long)]
        search: Option<String>,
        /// name, email, last-login, progress or logins
        #[arg(long)]
        sort: Option<SortKey>,
        #[arg(long)]
        desc: bool,
    },
    /// One learner's progress and login history
    User { email: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ccna_course=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let mut app = App::new(config)?;

    match cli.command.unwrap_or(Commands::Status) {
        Commands::Login { email, password } => app.login(&email, &password).await?,
        Commands::Logout => app.logout()?,
        Commands::Signup { username, email, password, confirm } => {
            app.signup(&username, &email, &password, &confirm).await?
        }
        Commands::AdminSignup { name, email, password, confirm } => {
            app.admin_signup(&name, &email, &password, &confirm).await?
        }
        Commands::ForgotPassword { email } => app.forgot_password(&email).await?,
        Commands::ChangePassword { email, password, confirm } => {
            app.change_password(&email, &password, &confirm).await?
        }
        Commands::Status => app.status().await?,
        Commands::Open { section } => app.open(&section).await?,
        Commands::Complete { section } => app.complete(section.as_deref()).await?,
        Commands::Quiz { section, answers } => app.quiz(&section, &answers).await?,
        Commands::Admin { command } => match command {
            AdminCommands::Summary => app.admin_summary().await?,
            AdminCommands::Users { search, sort, desc } => {
                app.admin_users(search.as_deref(), sort, desc).await?
            }
            AdminCommands::User { email } => app.admin_user(&email).await?,
        },
    }

    Ok(())
}
