//! Operator CLI for the executive dashboard API.
//!
//! Signs in, then queries the read endpoints from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Store a session token
//! cargo run -- login
//!
//! # Overview panels for a day
//! cargo run -- overview --date 2024-03-05
//!
//! # Incidents, calendar counters and reservoir metrics
//! cargo run -- incidents --date 2024-03-05
//! cargo run -- incidents --from 2024-03-01 --to 2024-03-07
//! cargo run -- calendar --year 2024 --month 3
//! cargo run -- reservoir --date 2024-03-05
//!
//! # Remove a contact
//! cargo run -- contacts delete 12
//! ```
//!
//! # Environment Variables
//!
//! See [`hydro_dashboard::config`]. `.env` files are honoured.
//!
//! Query commands can be interrupted with Ctrl-C; the pending request is
//! dropped and nothing is printed for it.

use hydro_dashboard::api::dto::{EventType, NewsItem, PastEvent, SnowCoverDay};
use hydro_dashboard::application::Dashboard;
use hydro_dashboard::application::services::{
    CalendarService, ContactService, IncidentService, NewsService, PastEventsService,
    ReservoirService, SnowCoverService, UserService,
};
use hydro_dashboard::config::{self, Config};
use hydro_dashboard::domain::{Call, DateRange, Session};
use hydro_dashboard::infrastructure::http::{ApiClient, ResourceClient};
use hydro_dashboard::infrastructure::session::FileTokenStore;
use hydro_dashboard::{ApiError, ApiResult, telemetry};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Password};
use std::sync::Arc;
use tokio::sync::oneshot;

/// CLI tool for the executive dashboard.
#[derive(Parser)]
#[command(name = "dashboard")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Store a session token
    Login {
        /// Token value (prompted if omitted)
        #[arg(short, long)]
        token: Option<String>,
    },

    /// Remove the stored session token
    Logout {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show configuration and session status
    Status,

    /// Incidents, reservoir metrics and snow cover for one day
    Overview {
        /// Day to show (default: today)
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// List incidents
    Incidents {
        /// Only incidents of this day (YYYY-MM-DD)
        #[arg(short, long, conflicts_with_all = ["from", "to"])]
        date: Option<NaiveDate>,

        /// First day of a range (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Last day of a range, inclusive (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
    },

    /// Per-day event counters for a month
    Calendar {
        #[arg(long)]
        year: i32,

        #[arg(long)]
        month: u32,
    },

    /// Reservoir metrics for a day
    Reservoir {
        #[arg(short, long)]
        date: NaiveDate,
    },

    /// Snow cover report
    Snow {
        /// Report day (default: server today)
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// Paginated news feed
    News {
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },

    /// Contact directory
    Contacts {
        #[command(subcommand)]
        action: ContactAction,
    },

    /// Dashboard users
    Users {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Past events of a day
    PastEvents {
        #[arg(short, long)]
        date: NaiveDate,

        /// Group by category, optionally a single one
        #[arg(short = 't', long = "type")]
        event_type: Option<EventType>,
    },
}

/// Contact directory subcommands.
#[derive(Subcommand)]
enum ContactAction {
    /// List contacts
    List {
        /// Free-text search
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Delete a contact
    Delete {
        id: i64,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// User subcommands.
#[derive(Subcommand)]
enum UserAction {
    /// List users
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    telemetry::init(&config);
    config.print_summary();

    let session = Session::new(Arc::new(FileTokenStore::new(config.token_file.clone())));
    let api = ApiClient::from_config(&config, session.clone())
        .context("Failed to build API client")?;

    match cli.command {
        Commands::Login { token } => login(&session, token).await?,
        Commands::Logout { yes } => logout(&session, yes).await?,
        Commands::Status => status(&config, &session).await,
        Commands::Overview { date } => overview(api, date).await?,
        Commands::Incidents { date, from, to } => {
            incidents(api, date, DateRange::new(from, to)).await?
        }
        Commands::Calendar { year, month } => calendar(api, year, month).await?,
        Commands::Reservoir { date } => reservoir(api, date).await?,
        Commands::Snow { date } => snow(api, date).await?,
        Commands::News { page } => news(api, page).await?,
        Commands::Contacts { action } => handle_contact_action(action, api).await?,
        Commands::Users { action } => handle_user_action(action, api).await?,
        Commands::PastEvents { date, event_type } => past_events(api, date, event_type).await?,
    }

    Ok(())
}

/// Runs a call until it resolves or the user presses Ctrl-C.
///
/// Returns `None` when interrupted.
async fn interruptible<T: Send + 'static>(call: Call<T>) -> Result<Option<T>> {
    let (tx, rx) = oneshot::channel();
    let subscription = call.subscribe(move |result| {
        let _ = tx.send(result);
    });

    tokio::select! {
        result = rx => {
            let value = result.context("Request was dropped before completing")?;
            Ok(Some(value.map_err(explain)?))
        }
        _ = tokio::signal::ctrl_c() => {
            subscription.unsubscribe();
            println!("{}", "❌ Cancelled".red());
            Ok(None)
        }
    }
}

/// Adds a hint for errors the operator can act on.
fn explain(error: ApiError) -> anyhow::Error {
    match error {
        ApiError::Unauthorized => {
            anyhow::anyhow!("{error}. Run `dashboard login` to store a new token.")
        }
        other => other.into(),
    }
}

/// Spawns `future` as an interruptible call.
async fn run<T, F>(future: F) -> Result<Option<T>>
where
    T: Send + 'static,
    F: Future<Output = ApiResult<T>> + Send + 'static,
{
    interruptible(Call::spawn(future)).await
}

async fn login(session: &Session, token: Option<String>) -> Result<()> {
    println!("{}", "🔑 Sign in".bright_blue().bold());
    println!();

    let token = match token {
        Some(t) => t,
        None => Password::new().with_prompt("API token").interact()?,
    };
    let token = token.trim();
    if token.is_empty() {
        anyhow::bail!("Token must not be empty");
    }

    session
        .login(token)
        .await
        .context("Failed to store session token")?;

    println!("{}", "✅ Token stored".green().bold());
    Ok(())
}

async fn logout(session: &Session, skip_confirm: bool) -> Result<()> {
    if !session.is_authenticated().await {
        println!("{}", "⚠️  Not signed in".yellow());
        return Ok(());
    }

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Remove the stored token?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    session
        .logout()
        .await
        .context("Failed to clear session token")?;

    println!("{}", "✅ Signed out".green().bold());
    Ok(())
}

async fn status(config: &Config, session: &Session) {
    println!("{}", "📡 Status".bright_blue().bold());
    println!();
    println!("  API:        {}", config.api_url.cyan());
    println!("  Timeout:    {}s", config.request_timeout_secs);
    println!("  Token file: {}", config.token_file.display().to_string().bright_black());

    let state = if session.is_authenticated().await {
        "SIGNED IN".green()
    } else {
        "ANONYMOUS".yellow()
    };
    println!("  Session:    {state}");
    println!();
}

async fn overview(api: ApiClient, date: Option<NaiveDate>) -> Result<()> {
    let date = date.unwrap_or_else(|| Local::now().date_naive());
    println!("{} {}", "📊 Overview".bright_blue().bold(), date.to_string().cyan());
    println!();

    let mut dashboard = Dashboard::new(api);
    let refresh = dashboard.start(date);

    let cancel = refresh.cancellation();
    let interrupt = cancel.clone();
    let watcher = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            interrupt.cancel();
        }
    });
    dashboard.finish(refresh).await;
    watcher.abort();

    if cancel.is_cancelled() {
        println!("{}", "❌ Cancelled".red());
        return Ok(());
    }

    print_panel("Incidents", dashboard.incidents.error(), || {
        dashboard
            .incidents
            .data()
            .map_or(0, Vec::len)
            .to_string()
    });
    print_panel("Reservoirs", dashboard.reservoirs.error(), || {
        dashboard
            .reservoirs
            .data()
            .map_or(0, Vec::len)
            .to_string()
    });
    print_panel("Snow cover", dashboard.snow_cover.error(), || {
        dashboard
            .snow_cover
            .data()
            .and_then(|r| r.today.as_ref())
            .map_or(0, |d| d.basins.len())
            .to_string()
            + " basins"
    });
    println!();

    if dashboard.has_errors() {
        anyhow::bail!("Some panels failed to load");
    }
    Ok(())
}

fn print_panel(name: &str, error: Option<&str>, summary: impl FnOnce() -> String) {
    match error {
        Some(message) => println!("  {:<12} {}", name.bright_white().bold(), message.red()),
        None => println!("  {:<12} {}", name.bright_white().bold(), summary().green()),
    }
}

async fn incidents(api: ApiClient, date: Option<NaiveDate>, range: DateRange) -> Result<()> {
    println!("{}", "🚨 Incidents".bright_blue().bold());
    if let (Some(start), Some(end), Some(days)) = (range.start, range.end, range.days()) {
        println!("  {start} .. {end} ({days} days)");
    }
    println!();

    let service = IncidentService::new(api);
    let fetched = if range.is_empty() {
        run(async move { service.list(date).await }).await?
    } else {
        run(async move { service.between(&range).await }).await?
    };
    let Some(incidents) = fetched else {
        return Ok(());
    };

    if incidents.is_empty() {
        println!("{}", "  No incidents found".yellow());
        return Ok(());
    }

    println!(
        "  {:<5} {:<17} {:<28} {}",
        "ID".bright_white().bold(),
        "Time".bright_white().bold(),
        "Organization".bright_white().bold(),
        "Description".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for incident in &incidents {
        let description = if incident.is_shutdown {
            format!("{} {}", "[SHUTDOWN]".red(), incident.description)
        } else {
            incident.description.clone()
        };
        println!(
            "  {:<5} {:<17} {:<28} {}",
            incident.id.to_string().bright_black(),
            incident.incident_time.format("%Y-%m-%d %H:%M").to_string(),
            incident.organization_name.cyan(),
            description
        );
    }

    println!();
    println!("  Total: {}", incidents.len().to_string().bright_white().bold());
    println!();
    Ok(())
}

async fn calendar(api: ApiClient, year: i32, month: u32) -> Result<()> {
    println!("{} {year}-{month:02}", "📅 Calendar".bright_blue().bold());
    println!();

    let service = CalendarService::new(api);
    let Some(calendar) = run(async move { service.events(year, month).await }).await? else {
        return Ok(());
    };

    let mut active = calendar.active_days().peekable();
    if active.peek().is_none() {
        println!("{}", "  No events this month".yellow());
        return Ok(());
    }

    println!(
        "  {:<11} {:>9} {:>9} {:>10} {:>6}",
        "Date".bright_white().bold(),
        "Incidents".bright_white().bold(),
        "Shutdowns".bright_white().bold(),
        "Discharges".bright_white().bold(),
        "Visits".bright_white().bold()
    );
    println!("  {}", "─".repeat(50).bright_black());

    for day in active {
        println!(
            "  {:<11} {:>9} {:>9} {:>10} {:>6}",
            day.date.to_string().cyan(),
            day.incidents,
            day.shutdowns,
            day.discharges,
            day.visits
        );
    }
    println!();
    Ok(())
}

async fn reservoir(api: ApiClient, date: NaiveDate) -> Result<()> {
    println!("{} {}", "💧 Reservoirs".bright_blue().bold(), date.to_string().cyan());
    println!();

    let service = ReservoirService::new(api);
    let Some(summaries) = run(async move { service.summary(date).await }).await? else {
        return Ok(());
    };

    if summaries.is_empty() {
        println!("{}", "  No reservoir data for this day".yellow());
        return Ok(());
    }

    println!(
        "  {:<28} {:>9} {:>9} {:>9} {:>9}",
        "Organization".bright_white().bold(),
        "Level".bright_white().bold(),
        "Volume".bright_white().bold(),
        "Inflow".bright_white().bold(),
        "Outflow".bright_white().bold()
    );
    println!("  {}", "─".repeat(70).bright_black());

    for summary in &summaries {
        println!(
            "  {:<28} {:>9} {:>9} {:>9} {:>9}",
            summary.organization_name.cyan(),
            metric(summary.level),
            metric(summary.volume),
            metric(summary.income),
            metric(summary.release)
        );
    }
    println!();
    Ok(())
}

fn metric(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"))
}

async fn snow(api: ApiClient, date: Option<NaiveDate>) -> Result<()> {
    println!("{}", "❄️  Snow cover".bright_blue().bold());
    println!();

    let service = SnowCoverService::new(api);
    let Some(report) = run(async move { service.report(date).await }).await? else {
        return Ok(());
    };

    let Some(today) = report.today.as_ref() else {
        println!("{}", "  No snow cover data".yellow());
        return Ok(());
    };

    print_snow_day("Today", today);
    for basin in &today.basins {
        let change = report
            .change_since_yesterday(&basin.name)
            .map_or_else(|| "-".to_string(), |c| format!("{c:+.1}"));
        println!("    {:<24} {:>6.1}%  {}", basin.name, basin.cover, change.bright_black());
    }

    if let Some(year_ago) = report.year_ago.as_ref() {
        println!();
        print_snow_day("Year ago", year_ago);
        for basin in &year_ago.basins {
            println!("    {:<24} {:>6.1}%", basin.name, basin.cover);
        }
    }
    println!();
    Ok(())
}

fn print_snow_day(label: &str, day: &SnowCoverDay) {
    println!("  {} {}", label.bright_white().bold(), day.date.to_string().cyan());
}

async fn news(api: ApiClient, page: u32) -> Result<()> {
    println!("{}", "📰 News".bright_blue().bold());
    println!();

    let service = NewsService::new(api);
    let Some(feed) = run(async move { service.page(page).await }).await? else {
        return Ok(());
    };

    if feed.items.is_empty() {
        println!("{}", "  No news".yellow());
        return Ok(());
    }

    for item in &feed.items {
        print_news_item(item);
    }

    println!(
        "  Page {} of {} ({} total)",
        feed.meta.current_page.to_string().bright_white().bold(),
        feed.meta.page_count,
        feed.meta.total
    );
    if let Some(next) = feed.next_page() {
        println!("  Next: {} news --page {next}", "dashboard".bright_cyan());
    }
    println!();
    Ok(())
}

fn print_news_item(item: &NewsItem) {
    println!(
        "  {} {}",
        item.published_at.format("%Y-%m-%d").to_string().bright_black(),
        item.title.bright_white().bold()
    );
    if let Some(text) = &item.short_description {
        println!("    {text}");
    }
}

/// Dispatches contact directory commands.
async fn handle_contact_action(action: ContactAction, api: ApiClient) -> Result<()> {
    let service = Arc::new(ContactService::new(Arc::new(ResourceClient::new(api))));

    match action {
        ContactAction::List { search } => list_contacts(service, search).await,
        ContactAction::Delete { id, yes } => delete_contact(service, id, yes).await,
    }
}

type ContactDirectory = ContactService<ResourceClient<hydro_dashboard::api::dto::Contacts>>;

async fn list_contacts(service: Arc<ContactDirectory>, search: Option<String>) -> Result<()> {
    println!("{}", "📇 Contacts".bright_blue().bold());
    println!();

    let Some(contacts) = run(async move { service.list(search.as_deref()).await }).await? else {
        return Ok(());
    };

    if contacts.is_empty() {
        println!("{}", "  No contacts found".yellow());
        return Ok(());
    }

    println!(
        "  {:<5} {:<28} {:<24} {}",
        "ID".bright_white().bold(),
        "Name".bright_white().bold(),
        "Position".bright_white().bold(),
        "Phone".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for contact in &contacts {
        println!(
            "  {:<5} {:<28} {:<24} {}",
            contact.id.to_string().bright_black(),
            contact.full_name.cyan(),
            contact.position,
            contact.phone
        );
    }

    println!();
    println!("  Total: {}", contacts.len().to_string().bright_white().bold());
    println!();
    Ok(())
}

async fn delete_contact(service: Arc<ContactDirectory>, id: i64, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑️  Delete contact".bright_blue().bold());
    println!();

    let lookup = service.clone();
    let Some(contact) = run(async move { lookup.get(id).await }).await? else {
        return Ok(());
    };

    println!("  Name:     {}", contact.full_name.cyan());
    println!("  Position: {}", contact.position);
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this contact?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    if run(async move { service.delete(id).await }).await?.is_some() {
        println!("{}", "✅ Contact deleted".green().bold());
    }
    Ok(())
}

/// Dispatches user commands.
async fn handle_user_action(action: UserAction, api: ApiClient) -> Result<()> {
    let service = UserService::new(api);

    match action {
        UserAction::List => {
            println!("{}", "👤 Users".bright_blue().bold());
            println!();

            let Some(users) = run(async move { service.list().await }).await? else {
                return Ok(());
            };

            for user in &users {
                println!(
                    "  {:<5} {:<20} {:<28} {:?}",
                    user.id.to_string().bright_black(),
                    user.username.cyan(),
                    user.full_name,
                    user.role
                );
            }
            println!();
            println!("  Total: {}", users.len().to_string().bright_white().bold());
            println!();
            Ok(())
        }
    }
}

async fn past_events(api: ApiClient, date: NaiveDate, event_type: Option<EventType>) -> Result<()> {
    println!("{} {}", "🕓 Past events".bright_blue().bold(), date.to_string().cyan());
    println!();

    let service = PastEventsService::new(api);

    match event_type {
        None => {
            let Some(groups) = run(async move { service.by_date(date).await }).await? else {
                return Ok(());
            };
            if groups.iter().all(|g| g.events.is_empty()) {
                println!("{}", "  No events".yellow());
            }
            for group in &groups {
                println!("  {}", group.date.to_string().bright_white().bold());
                group.events.iter().for_each(print_event);
            }
        }
        Some(event_type) => {
            let Some(groups) =
                run(async move { service.by_type(date, Some(event_type)).await }).await?
            else {
                return Ok(());
            };
            if groups.iter().all(|g| g.events.is_empty()) {
                println!("{}", "  No events".yellow());
            }
            for group in &groups {
                println!("  {}", group.event_type.to_string().bright_white().bold());
                group.events.iter().for_each(print_event);
            }
        }
    }
    println!();
    Ok(())
}

fn print_event(event: &PastEvent) {
    println!(
        "    {} {:<10} {:<28} {}",
        event.occurred_at.format("%H:%M").to_string().bright_black(),
        event.event_type.to_string(),
        event.organization_name.cyan(),
        event.description
    );
}
