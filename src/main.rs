//! hubscout - Entry Point

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use hubscout::config;
use hubscout::gateway::{GitHubGateway, UserGateway};
use hubscout::logging;
use hubscout::model::{AppError, FetchError, UserDetail};
use hubscout::state::SearchSession;

/// hubscout - GitHub user search from the command line
#[derive(Parser, Debug)]
#[command(name = "hubscout")]
#[command(version)]
#[command(about = "Search GitHub users and look up profiles")]
pub struct Args {
    /// Search query (omit when using --user)
    #[arg(required_unless_present = "user")]
    pub query: Option<String>,

    /// Result page to fetch (must be positive)
    #[arg(short, long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,

    /// Look up a single user's profile instead of searching
    #[arg(short, long)]
    pub user: Option<String>,

    /// Remote API base URL
    #[arg(long)]
    pub api_base_url: Option<String>,

    /// Results per search page (must be positive)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub per_page: Option<u32>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = config::load_config_file(args.config.clone())?;
        let merged = config::merge_config(config_file);
        let with_env = config::apply_env_overrides(merged);
        config::apply_cli_overrides(with_env, args.api_base_url.clone(), args.per_page)
    };

    logging::init(&config.log_file_path)?;
    info!(config = ?config, "starting hubscout");

    let gateway = GitHubGateway::from_config(&config);

    if let Some(login) = args.user.as_deref() {
        let detail = gateway.fetch_user(login).await?;
        print_profile(&detail);
        return Ok(());
    }

    let query = args.query.clone().unwrap_or_default();
    if query.trim().is_empty() {
        return Err(FetchError::EmptyQuery.into());
    }

    let session = SearchSession::new(gateway, config.per_page);
    session.search(&query, args.page).await;
    let state = session.snapshot();

    if let Some(error) = state.error {
        return Err(error.into());
    }

    println!("Found {} users", state.total_count);
    if state.total_pages > 1 {
        println!("Page {} of {}", state.page, state.total_pages);
    }
    for user in &state.users {
        println!("{:<24} {}", user.login, user.html_url);
    }

    Ok(())
}

fn print_profile(detail: &UserDetail) {
    println!("{}", detail.login);
    if let Some(name) = &detail.name {
        println!("Name:      {name}");
    }
    if let Some(bio) = &detail.bio {
        println!("Bio:       {bio}");
    }
    if let Some(company) = &detail.company {
        println!("Company:   {company}");
    }
    if let Some(location) = &detail.location {
        println!("Location:  {location}");
    }
    if let Some(blog) = detail.blog.as_deref().filter(|blog| !blog.is_empty()) {
        println!("Blog:      {blog}");
    }
    if let Some(twitter) = &detail.twitter_username {
        println!("Twitter:   @{twitter}");
    }
    println!(
        "Followers: {}  Following: {}",
        detail.followers, detail.following
    );
    println!(
        "Repos:     {}  Gists:     {}",
        detail.public_repos, detail.public_gists
    );
    if let Some(created_at) = detail.created_at {
        println!("Joined:    {}", created_at.format("%Y-%m-%d"));
    }
    println!("Profile:   {}", detail.html_url);
}
