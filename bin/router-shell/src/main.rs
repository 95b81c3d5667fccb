use anyhow::{Context, Result};
use router_api::RouterConfig;
use router_core::{History, MemoryHistory, NavigationEvent, ResolvedRoute, Router};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{Command, HELP};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting router-shell...");

    let config = load_config()?;
    info!("Route table loaded with {} routes", config.routes.len());

    // The host's initial URL; defaults to the application root
    let initial_href = std::env::var("ROUTER_INITIAL_URL").unwrap_or_else(|_| config.base.clone());
    let mut router = Router::start(&config, MemoryHistory::new(initial_href))
        .context("Failed to start router")?;

    // View layer: mount whatever the current route says
    let mut current = router.subscribe();
    tokio::spawn(async move {
        let initial = current.borrow_and_update().clone();
        mount_view(&initial);
        while current.changed().await.is_ok() {
            let route = current.borrow_and_update().clone();
            mount_view(&route);
        }
    });

    tokio::spawn(log_navigation_events(router.events()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match Command::parse(&line) {
            Ok(Some(command)) => {
                if !execute(&mut router, command)? {
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => warn!("{:#}", e),
        }
    }

    info!("Input closed, exiting...");
    Ok(())
}

/// Load the route table from ROUTER_CONFIG (or the built-in table) and
/// apply the ROUTER_BASE_URL override
fn load_config() -> Result<RouterConfig> {
    let config = match std::env::var("ROUTER_CONFIG") {
        Ok(path) => {
            info!("Loading route table from {}", path);
            RouterConfig::load(&path)?
        }
        Err(_) => {
            info!("ROUTER_CONFIG not set, using built-in route table");
            RouterConfig::default()
        }
    };

    Ok(match std::env::var("ROUTER_BASE_URL") {
        Ok(base) => {
            info!("Base path set to {} from environment", base);
            config.with_base(base)
        }
        Err(_) => config,
    })
}

fn mount_view(route: &ResolvedRoute) {
    let mounted = route.mount();
    info!(
        view = %mounted.view,
        route = route.name(),
        props = ?mounted.props,
        "Mounting view"
    );
}

/// Log navigation events until the router is dropped. Returns the number
/// of events logged.
async fn log_navigation_events(mut events: broadcast::Receiver<NavigationEvent>) -> usize {
    let mut logged = 0;
    loop {
        match events.recv().await {
            Ok(event) => {
                debug!(
                    kind = ?event.kind,
                    from = %event.from.full_path(),
                    to = %event.to.full_path(),
                    "Navigation"
                );
                logged += 1;
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!("Navigation event log fell behind, skipped {} events", skipped);
            }
            Err(RecvError::Closed) => break,
        }
    }
    logged
}

/// Run one command against the router. Returns false when the shell
/// should exit.
fn execute<H: History>(router: &mut Router<H>, command: Command) -> Result<bool> {
    let outcome = match command {
        Command::Push(location) => router.navigate(&location).map(Some),
        Command::Replace(location) => router.replace(&location).map(Some),
        Command::Open { name, params } => router.navigate_named(&name, &params).map(Some),
        Command::Back => router.back(),
        Command::Forward => router.forward(),
        Command::Go(delta) => router.go(delta),
        Command::Current => {
            print_route(&router.current())?;
            return Ok(true);
        }
        Command::Routes => {
            for route in router.routes().iter() {
                println!(
                    "{:<8} {:<20} {}{}",
                    route.name(),
                    route.pattern().as_str(),
                    route.view(),
                    if route.pass_params_as_props() { " (props)" } else { "" }
                );
            }
            return Ok(true);
        }
        Command::History => {
            let history = router.history();
            for (idx, entry) in history.entries().iter().enumerate() {
                let marker = if idx == history.position() { '*' } else { ' ' };
                println!("{} {}", marker, serde_json::to_string(entry)?);
            }
            return Ok(true);
        }
        Command::Help => {
            println!("{}", HELP);
            return Ok(true);
        }
        Command::Quit => return Ok(false),
    };

    match outcome {
        Ok(Some(route)) => print_route(&route)?,
        Ok(None) => println!("(no history entry in that direction)"),
        Err(e) => warn!("Navigation rejected: {}", e),
    }
    Ok(true)
}

fn print_route(route: &Arc<ResolvedRoute>) -> Result<()> {
    let mounted = serde_json::to_string(&route.mount())?;
    println!("{} {} {}", route.name(), route.full_path(), mounted);
    Ok(())
}
