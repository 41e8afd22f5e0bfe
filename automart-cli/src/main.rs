//! Main entry point for the `AutoMart` command-line client.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![deny(warnings, clippy::pedantic)]
#![allow(clippy::multiple_crate_versions)]

use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use dotenv::dotenv;
use shared::config::client::Config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod context;
mod navigator;
mod toast;

use commands::{Halted, account, admin, cars, offers};
use context::AppContext;

/// `AutoMart` CLI
#[derive(Debug, Parser)]
#[command(name = "automart")]
#[command(about = "Command-line client for the AutoMart car marketplace", long_about = None)]
struct Cli {
    /// Path to the configuration file (yaml, json or toml)
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// API root to talk to, e.g. `http://localhost:5000/api/v1`
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Subcommands for the `AutoMart` CLI
#[derive(Debug, Subcommand)]
enum Commands {
    /// Sign in with your email and password
    Login(account::LoginArgs),
    /// Create an account and sign in
    Register(account::RegisterArgs),
    /// Sign out and forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Email yourself a password reset link
    ForgotPassword(account::ForgotPasswordArgs),
    /// Choose a new password using a reset link
    ResetPassword(account::ResetPasswordArgs),
    /// Change the password of the signed-in user
    UpdatePassword,
    /// Browse, list and edit cars
    #[command(subcommand)]
    Cars(cars::CarsCommand),
    /// Make or revise an offer on a car
    #[command(subcommand)]
    Offer(offers::OfferCommand),
    /// Report a listing
    Flag(offers::FlagArgs),
    /// Moderate listings (admins only)
    #[command(subcommand)]
    Admin(admin::AdminCommand),

    /// Generate shell completion scripts for the CLI
    Completion {
        /// The shell to generate the completion script for
        #[arg(long, short, value_enum)]
        shell: Shell,
    },

    /// Generate a configuration file
    Config {
        /// Format of the configuration file to generate (yaml, json or toml)
        #[arg(long, short, default_value = "yaml")]
        format: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Guards have already told the user where to go.
            if !err.is::<Halted>() {
                toast::show_error(&format!("{err:#}"));
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let Cli {
        config,
        api_url,
        command,
    } = cli;

    let command = match command {
        Commands::Completion { shell } => {
            commands::completion::generate_completion(shell);
            return Ok(());
        }
        Commands::Config { format } => return commands::config::generate_config(&format),
        other => other,
    };

    let config = Config::load_config(config, api_url).context("failed to load configuration")?;
    init_tracing(&config.log_level);

    let ctx = AppContext::new(config)?;
    ctx.session.verify().await;

    match command {
        Commands::Login(args) => account::login(&ctx, args).await,
        Commands::Register(args) => account::register(&ctx, args).await,
        Commands::Logout => {
            account::logout(&ctx);
            Ok(())
        }
        Commands::Whoami => account::whoami(&ctx),
        Commands::ForgotPassword(args) => account::forgot_password(&ctx, args).await,
        Commands::ResetPassword(args) => account::reset_password(&ctx, args).await,
        Commands::UpdatePassword => account::update_password(&ctx).await,
        Commands::Cars(command) => cars::run(&ctx, command).await,
        Commands::Offer(command) => offers::run(&ctx, command).await,
        Commands::Flag(args) => offers::flag(&ctx, args).await,
        Commands::Admin(command) => admin::run(&ctx, command).await,
        Commands::Completion { .. } | Commands::Config { .. } => Ok(()),
    }
}

/// Logs go to stderr so command output stays clean. `RUST_LOG` wins over the
/// configured level.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}
