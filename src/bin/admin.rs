//! CLI administration tool for the wedding invitation site.
//!
//! Talks to the invitation API directly, with the same services the admin
//! panel uses.
//!
//! # Usage
//!
//! ```bash
//! # Log in (token is stored in ADMIN_TOKEN_FILE)
//! cargo run --bin admin -- login
//!
//! # List guests with a summary
//! cargo run --bin admin -- guests list
//!
//! # Add a guest with the next sequential code
//! cargo run --bin admin -- guests add --name "Familia Pérez" --adults 2 --children 1
//!
//! # Reset a guest's answer
//! cargo run --bin admin -- guests edit 12 --status pendiente
//!
//! # Time left until the ceremony
//! cargo run --bin admin -- countdown
//! ```
//!
//! # Environment Variables
//!
//! - `API_BASE_URL` (required): Base URL of the invitation API
//! - `ADMIN_TOKEN_FILE`: Where the session token is kept (default: `.admin_token`)
//! - `CODE_PREFIX`, `EVENT_STARTS_AT`, `PUBLIC_BASE_URL`: as for the server
//!
//! A `401` from the API deletes the token file; log in again afterwards.

use wedding_invite::application::services::{AdminService, AdminSession, GuestDraft};
use wedding_invite::config::{self, Config};
use wedding_invite::domain::countdown::Countdown;
use wedding_invite::domain::entities::{Guest, GuestPatch, GuestStats, GuestStatus};
use wedding_invite::domain::repositories::{AdminRepository, Credentials};
use wedding_invite::error::AppError;
use wedding_invite::infrastructure::http::{ApiClient, HttpAdminRepository};
use wedding_invite::utils::links::share_link;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use std::path::PathBuf;
use std::sync::Arc;

const DEFAULT_TOKEN_FILE: &str = ".admin_token";

/// CLI tool for managing the guest list.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Log in to the invitation API
    Login {
        #[arg(short, long)]
        username: Option<String>,
    },

    /// Forget the stored session token
    Logout,

    /// Manage guests
    Guests {
        #[command(subcommand)]
        action: GuestAction,
    },

    /// Show RSVP statistics
    Stats,

    /// Show the time left until the ceremony
    Countdown,
}

/// Guest management subcommands.
#[derive(Subcommand)]
enum GuestAction {
    /// List all guests
    List,

    /// Add a guest
    Add {
        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        adults: Option<u32>,

        #[arg(short, long)]
        children: Option<u32>,

        /// Custom code (next sequential code if omitted)
        #[arg(long)]
        code: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Edit a guest
    Edit {
        id: i64,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        adults: Option<u32>,

        #[arg(short, long)]
        children: Option<u32>,

        /// pendiente, confirmado or rechazado
        #[arg(short, long)]
        status: Option<GuestStatus>,
    },

    /// Delete a guest
    Delete {
        id: i64,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Session token stored on disk between invocations.
struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    fn from_env() -> Self {
        let path = std::env::var("ADMIN_TOKEN_FILE").unwrap_or_else(|_| DEFAULT_TOKEN_FILE.to_string());
        Self { path: path.into() }
    }

    fn load(&self) -> Result<AdminSession> {
        let token = std::fs::read_to_string(&self.path)
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .with_context(|| "Not logged in. Run `admin login` first")?;

        Ok(AdminSession::new(token))
    }

    fn save(&self, session: &AdminSession) -> Result<()> {
        std::fs::write(&self.path, &session.token)
            .with_context(|| format!("Failed to write {}", self.path.display()))
    }

    fn clear(&self) -> Result<bool> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e).with_context(|| format!("Failed to remove {}", self.path.display())),
        }
    }

    /// Turns an API error into a CLI error, dropping the token on `401`.
    fn check(&self, err: AppError) -> anyhow::Error {
        if err.is_unauthorized() {
            if let Err(e) = self.clear() {
                return e;
            }
            return anyhow::anyhow!("Session expired. Run `admin login` again");
        }

        match err.upstream_detail() {
            Some(detail) => anyhow::anyhow!("{err}: {detail}"),
            None => anyhow::Error::new(err),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let store = TokenStore::from_env();

    if let Commands::Logout = cli.command {
        return logout(&store);
    }

    let config = config::load_from_env().context("Invalid configuration")?;

    if let Commands::Countdown = cli.command {
        print_countdown(&config);
        return Ok(());
    }

    let client = ApiClient::new(&config.api_base_url).context("Failed to create API client")?;
    let repository: Arc<dyn AdminRepository> = Arc::new(HttpAdminRepository::new(client));
    let service = AdminService::new(repository, config.code_prefix.clone());

    match cli.command {
        Commands::Login { username } => login(&service, &store, username).await?,
        Commands::Guests { action } => handle_guest_action(action, &service, &store, &config).await?,
        Commands::Stats => handle_stats(&service, &store).await?,
        Commands::Logout | Commands::Countdown => {}
    }

    Ok(())
}

type Service = AdminService<dyn AdminRepository>;

/// Prompts for credentials and stores the issued token.
async fn login(service: &Service, store: &TokenStore, username: Option<String>) -> Result<()> {
    println!("{}", "🔑 Admin login".bright_blue().bold());
    println!();

    let username = match username {
        Some(u) => u,
        None => Input::new().with_prompt("Username").interact_text()?,
    };
    let password = Password::new().with_prompt("Password").interact()?;
    let secret_code = Password::new().with_prompt("Secret code").interact()?;

    let credentials = Credentials {
        username,
        password,
        secret_code,
    };

    let session = service.login(&credentials).await.map_err(|e| {
        let message = e
            .upstream_detail()
            .map(str::to_string)
            .unwrap_or_else(|| e.to_string());
        anyhow::anyhow!("Login failed: {message}")
    })?;
    store.save(&session)?;

    println!();
    println!("{}", "✅ Logged in".green().bold());
    println!("  Token stored in {}", store.path.display().to_string().bright_black());

    Ok(())
}

fn logout(store: &TokenStore) -> Result<()> {
    if store.clear()? {
        println!("{}", "👋 Logged out".green());
    } else {
        println!("{}", "  Not logged in".yellow());
    }
    Ok(())
}

/// Dispatches guest management commands.
async fn handle_guest_action(
    action: GuestAction,
    service: &Service,
    store: &TokenStore,
    config: &Config,
) -> Result<()> {
    let session = store.load()?;

    match action {
        GuestAction::List => list_guests(service, store, &session, config).await?,
        GuestAction::Add {
            name,
            adults,
            children,
            code,
            yes,
        } => {
            add_guest(service, store, &session, name, adults, children, code, yes).await?;
        }
        GuestAction::Edit {
            id,
            name,
            adults,
            children,
            status,
        } => {
            let patch = GuestPatch {
                name,
                adults,
                children,
                status,
            };
            let updated = service
                .update_guest(&session, id, patch)
                .await
                .map_err(|e| store.check(e))?;

            println!("{}", "✅ Guest updated".green().bold());
            print_guest_line(&updated);
        }
        GuestAction::Delete { id, yes } => delete_guest(service, store, &session, id, yes).await?,
    }

    Ok(())
}

/// Lists guests with a summary computed from the list itself.
///
/// # Output Format
///
/// ```text
/// 📋 Guests
///
///   ID   Code         Name                           Adults Children Status
///   ────────────────────────────────────────────────────────────────────────
///   1    FM2026-001   Familia Pérez                  2      1        confirmado
/// ```
async fn list_guests(
    service: &Service,
    store: &TokenStore,
    session: &AdminSession,
    config: &Config,
) -> Result<()> {
    println!("{}", "📋 Guests".bright_blue().bold());
    println!();

    let guests = service
        .list_guests(session)
        .await
        .map_err(|e| store.check(e))?;

    if guests.is_empty() {
        println!("{}", "  No guests yet".yellow());
        println!();
        println!(
            "  Add one with: {} admin guests add",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<4} {:<12} {:<30} {:<6} {:<8} {}",
        "ID".bright_white().bold(),
        "Code".bright_white().bold(),
        "Name".bright_white().bold(),
        "Adults".bright_white().bold(),
        "Children".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for guest in &guests {
        print_guest_line(guest);
    }

    let summary = GuestStats::from_guests(&guests);
    println!();
    print_stats(&summary);

    if let Some(first) = guests.first() {
        println!();
        println!(
            "  Share links look like: {}",
            share_link(&config.public_base_url, &first.uuid).bright_cyan()
        );
    }
    println!();

    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn add_guest(
    service: &Service,
    store: &TokenStore,
    session: &AdminSession,
    name: Option<String>,
    adults: Option<u32>,
    children: Option<u32>,
    code: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "➕ Add guest".bright_blue().bold());
    println!();

    let name = match name {
        Some(n) => n,
        None => Input::new().with_prompt("Name").interact_text()?,
    };
    let adults = match adults {
        Some(n) => n,
        None => Input::new().with_prompt("Adults").default(1).interact_text()?,
    };
    let children = match children {
        Some(n) => n,
        None => Input::new().with_prompt("Children").default(0).interact_text()?,
    };

    let known = service
        .list_guests(session)
        .await
        .map_err(|e| store.check(e))?;

    println!();
    println!("  Name:     {}", name.cyan());
    println!("  Adults:   {adults}");
    println!("  Children: {children}");
    println!(
        "  Code:     {}",
        code.as_deref().unwrap_or("(next in sequence)").bright_yellow()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this guest?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let draft = GuestDraft {
        name,
        adults,
        children,
        code,
    };
    let created = service
        .create_guest(session, draft, &known)
        .await
        .map_err(|e| store.check(e))?;

    println!(
        "{} {}",
        "✅ Guest created with code".green().bold(),
        created.code.bright_yellow().bold()
    );

    Ok(())
}

async fn delete_guest(
    service: &Service,
    store: &TokenStore,
    session: &AdminSession,
    id: i64,
    skip_confirm: bool,
) -> Result<()> {
    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete guest {id}?"))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service
        .delete_guest(session, id)
        .await
        .map_err(|e| store.check(e))?;

    println!("{}", "✅ Guest deleted".green().bold());
    Ok(())
}

/// Displays the statistics computed by the API.
async fn handle_stats(service: &Service, store: &TokenStore) -> Result<()> {
    let session = store.load()?;

    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let stats = service.stats(&session).await.map_err(|e| store.check(e))?;
    print_stats(&stats);
    println!();

    Ok(())
}

fn print_countdown(config: &Config) {
    let countdown = Countdown::between(config.event_starts_at, chrono::Utc::now());

    if countdown.finished {
        println!("{}", "🎉 The big day is here".bright_magenta().bold());
    } else {
        println!(
            "⏳ {} {}",
            countdown.to_string().bright_yellow().bold(),
            "(days:hours:minutes:seconds)".bright_black()
        );
    }
}

fn print_guest_line(guest: &Guest) {
    let status = match guest.status {
        GuestStatus::Confirmed => guest.status.as_str().green(),
        GuestStatus::Declined => guest.status.as_str().red(),
        GuestStatus::Pending => guest.status.as_str().yellow(),
    };

    println!(
        "  {:<4} {:<12} {:<30} {:<6} {:<8} {}",
        guest.id.to_string().bright_black(),
        guest.code.cyan(),
        guest.name,
        guest.capacity.adults,
        guest.capacity.children,
        status
    );
}

fn print_stats(stats: &GuestStats) {
    println!("  Invitations: {}", stats.total.to_string().bright_white().bold());
    println!("  Confirmed:   {}", stats.confirmed.to_string().green());
    println!("  Pending:     {}", stats.pending.to_string().yellow());
    println!("  Declined:    {}", stats.declined.to_string().red());
    println!(
        "  Attending:   {} ({} adults, {} children)",
        stats.confirmed_people().to_string().bright_white().bold(),
        stats.confirmed_adults,
        stats.confirmed_children
    );
}
