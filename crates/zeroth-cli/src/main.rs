use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use zeroth_infrastructure::ZerothPaths;

mod app;
mod commands;
mod logging;
mod prompt;

use app::GlobalOptions;

#[derive(Parser)]
#[command(name = "zeroth")]
#[command(about = "0thOpinion - a second look at your pet's symptoms, from the terminal", long_about = None)]
#[command(version)]
struct Cli {
    /// Root URL of the 0thOpinion API
    #[arg(long, global = true, env = "ZEROTH_API_BASE_URL")]
    api_url: Option<String>,

    /// Directory holding config.toml, the saved token and logs
    #[arg(long, global = true, env = "ZEROTH_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    /// More terminal logging (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account (prompts for anything not given)
    Register(RegisterArgs),
    /// Log in and remember the session
    Login {
        #[arg(long)]
        email: Option<String>,
        #[arg(long, env = "ZEROTH_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Forget the saved session
    Logout,
    /// Show the logged-in account
    Whoami,
    /// Manage your pets
    Pets {
        #[command(subcommand)]
        action: PetsAction,
    },
    /// List the chronic conditions a pet can be registered with
    Diseases,
    /// Ask about symptoms in your own words
    Ask {
        /// Pet id (asks interactively when omitted)
        #[arg(long)]
        pet: Option<i64>,
        /// Symptom description
        #[arg(required = true, num_args = 1..)]
        content: Vec<String>,
    },
    /// Answer a short symptom questionnaire and get an opinion
    Interview {
        /// Pet id (asks interactively when omitted)
        #[arg(long)]
        pet: Option<i64>,
    },
    /// Show or change client settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args)]
struct RegisterArgs {
    /// Real name
    #[arg(long)]
    name: Option<String>,
    /// Public name shown after login
    #[arg(long)]
    screen_name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long, env = "ZEROTH_PASSWORD", hide_env_values = true)]
    password: Option<String>,
    /// M, F or N (prefer not to answer)
    #[arg(long)]
    sex: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    birth_date: Option<String>,
    /// Prefecture
    #[arg(long)]
    address: Option<String>,
}

#[derive(Subcommand)]
enum PetsAction {
    /// List your pets
    List,
    /// Register a pet
    Add(PetAddArgs),
    /// Delete a pet
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// Upload or replace a pet's photo
    Image { id: i64, path: PathBuf },
}

#[derive(Args)]
struct PetAddArgs {
    #[arg(long)]
    name: String,
    /// M or F
    #[arg(long)]
    sex: String,
    /// YYYY-MM-DD
    #[arg(long)]
    birth_date: String,
    /// Spayed or neutered
    #[arg(long)]
    neutered: bool,
    /// Chronic condition id (see `zeroth diseases`)
    #[arg(long)]
    disease: Option<i64>,
    /// Photo to upload with the registration
    #[arg(long)]
    image: Option<PathBuf>,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective settings
    Show,
    /// Save the API base URL to config.toml
    SetUrl {
        #[arg(required_unless_present = "reset")]
        url: Option<String>,
        /// Remove the saved URL and use the default again
        #[arg(long, conflicts_with = "url")]
        reset: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        eprintln!("{} {:#}", "error:".red().bold(), err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let paths = ZerothPaths::new(cli.config_dir.as_deref())?;
    let _log_guard = logging::init(&paths.logs_dir(), cli.verbose)?;

    let options = GlobalOptions { api_url: cli.api_url };
    let ctx = app::bootstrap(paths, &options).context("Failed to start")?;

    match cli.command {
        Commands::Register(args) => commands::account::register(&ctx, args.into()).await,
        Commands::Login { email, password } => {
            commands::account::login(&ctx, email, password).await
        }
        Commands::Logout => commands::account::logout(&ctx),
        Commands::Whoami => commands::account::whoami(&ctx).await,
        Commands::Pets { action } => match action {
            PetsAction::List => commands::pets::list(&ctx).await,
            PetsAction::Add(args) => commands::pets::add(&ctx, args.into()).await,
            PetsAction::Delete { id, yes } => commands::pets::delete(&ctx, id, yes).await,
            PetsAction::Image { id, path } => commands::pets::upload_image(&ctx, id, &path).await,
        },
        Commands::Diseases => commands::pets::diseases(&ctx).await,
        Commands::Ask { pet, content } => {
            commands::consult::ask(&ctx, pet, &content.join(" ")).await
        }
        Commands::Interview { pet } => commands::consult::interview(&ctx, pet).await,
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(&ctx),
            ConfigAction::SetUrl { url, reset } => {
                commands::config::set_url(&ctx, if reset { None } else { url })
            }
        },
    }
}

impl From<RegisterArgs> for commands::account::RegisterInput {
    fn from(args: RegisterArgs) -> Self {
        Self {
            user_name: args.name,
            screen_name: args.screen_name,
            email: args.email,
            password: args.password,
            sex: args.sex,
            birth_date: args.birth_date,
            address: args.address,
        }
    }
}

impl From<PetAddArgs> for commands::pets::PetInput {
    fn from(args: PetAddArgs) -> Self {
        Self {
            name: args.name,
            sex: args.sex,
            birth_date: args.birth_date,
            neutered: args.neutered,
            disease_id: args.disease,
            image: args.image,
        }
    }
}
