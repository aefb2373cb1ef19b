use anyhow::Context;
use clap::{Parser, Subcommand};

use jukebox_app::{AppConfig, LoggingBrowsingContext, build_app, config::parse_base_url};

/// Run the marketplace navigation guard against a live backend.
#[derive(Debug, Parser)]
#[command(name = "jukebox-guard", version)]
struct Cli {
    /// Backend base URL.
    #[arg(long, global = true, env = "JUKEBOX_BASE_URL")]
    base_url: Option<String>,

    /// Session cookie sent with every query.
    #[arg(long, global = true, env = "JUKEBOX_SESSION_COOKIE", hide_env_values = true)]
    cookie: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the guard once for a path and print its decision.
    Check { path: String },
    /// Navigate to a path, following in-app redirects, and print the outcome.
    Navigate { path: String },
    /// Accept the usage terms for the current session.
    Accept,
    /// Print the route table.
    Routes,
    /// Print the effective configuration.
    Config,
}

impl Cli {
    /// Layer the command-line flags over the environment configuration.
    fn apply(&self, config: &mut AppConfig) -> anyhow::Result<()> {
        if let Some(raw) = self.base_url.as_deref().filter(|v| !v.trim().is_empty()) {
            config.base_url = parse_base_url(raw).context("invalid --base-url")?;
        }
        if let Some(cookie) = self.cookie.as_deref().filter(|v| !v.trim().is_empty()) {
            config.session_cookie = Some(cookie.to_string());
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::from_env().context("invalid configuration")?;
    cli.apply(&mut config)?;

    jukebox_observability::init(config.log_format);

    let mut app = build_app(config, LoggingBrowsingContext).context("failed to build application")?;

    let output = match cli.command {
        Command::Check { path } => {
            let request = app.navigator.routes().resolve(&path)?;
            let outcome = app.navigator.guard().check(request).await;
            serde_json::json!({
                "route": outcome.context.request().target_route_name(),
                "path": outcome.context.request().target_path(),
                "logged_in": outcome.context.logged_in(),
                "agreement": outcome.agreement,
                "reason": outcome.reason,
                "decision": outcome.decision,
            })
        }
        Command::Navigate { path } => serde_json::to_value(app.navigator.navigate(&path).await?)?,
        Command::Accept => {
            let outcome = app.backend.accept().await.context("accepting usage terms failed")?;
            serde_json::json!({ "accepted": outcome })
        }
        Command::Routes => serde_json::Value::Array(
            app.navigator
                .routes()
                .routes()
                .iter()
                .map(|r| {
                    serde_json::json!({
                        "name": r.name(),
                        "path": r.pattern(),
                        "params": r.param_names().collect::<Vec<_>>(),
                        "icon": r.icon(),
                    })
                })
                .collect(),
        ),
        Command::Config => serde_json::to_value(&app.config)?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
