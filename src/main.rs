mod cli;

use clap::Parser;
use cli::Cli;
use colored::*;
use repo_pin::actors::{WidgetArgs, WidgetController, WidgetMessage};
use repo_pin::driver::{self, DriverCommand};
use repo_pin::github::{GitHubClient, SearchClientConfig};
use repo_pin::models::WidgetSnapshot;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();

    // Logs go to stderr so they don't interleave with the view on stdout
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let client = GitHubClient::with_config(SearchClientConfig {
        base_url: cli.api_url.clone(),
        timeout: Duration::from_secs(cli.timeout_secs),
        ..Default::default()
    })?;

    println!("{}", "Repo Pin".bold().green());
    println!("{}", "=".repeat(50).dimmed());
    println!("{}\n", driver::HELP.dimmed());

    let (repaint_tx, mut repaint_rx) = mpsc::unbounded_channel::<WidgetSnapshot>();
    let args = WidgetArgs::new(Arc::new(client))
        .debounce(Duration::from_millis(cli.debounce_ms))
        .repaint(repaint_tx);

    let (widget, widget_handle) = WidgetController::mount(args)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to mount search widget: {}", e))?;

    let mut view = WidgetSnapshot::default();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let command = driver::parse_line(&line);
                match command {
                    DriverCommand::Quit => break,
                    DriverCommand::Show => print!("{}", driver::render_view(&view)),
                    DriverCommand::Help => println!("{}", driver::HELP),
                    DriverCommand::Pick(_) | DriverCommand::Remove(_) => {
                        let current = match widget
                            .call(WidgetMessage::Snapshot, Some(Duration::from_secs(2)))
                            .await
                        {
                            Ok(ractor::rpc::CallResult::Success(current)) => current,
                            _ => anyhow::bail!("Search widget stopped answering"),
                        };
                        match driver::resolve_click(&command, &view, &current) {
                            Ok(message) => widget
                                .send_message(message)
                                .map_err(|e| anyhow::anyhow!("Search widget is gone: {}", e))?,
                            Err(reason) => {
                                eprintln!("{}", reason.red());
                                view = current;
                                print!("{}", driver::render_view(&view));
                            }
                        }
                    }
                    _ => match driver::to_message(&command, &view) {
                        Ok(Some(message)) => widget
                            .send_message(message)
                            .map_err(|e| anyhow::anyhow!("Search widget is gone: {}", e))?,
                        Ok(None) => {}
                        Err(reason) => eprintln!("{}", reason.red()),
                    },
                }
            }
            Some(snapshot) = repaint_rx.recv() => {
                view = snapshot;
                print!("{}", driver::render_view(&view));
            }
            _ = &mut shutdown => {
                println!();
                break;
            }
        }
    }

    match widget
        .call(WidgetMessage::GetStats, Some(Duration::from_secs(2)))
        .await
    {
        Ok(ractor::rpc::CallResult::Success(stats)) => {
            println!(
                "{} searches, {} failed, {} saved",
                stats.searches_issued, stats.searches_failed, stats.saved_total
            );
        }
        Ok(_) => eprintln!("Timeout getting final statistics"),
        Err(e) => eprintln!("Failed to get final statistics: {}", e),
    }

    widget
        .send_message(WidgetMessage::Teardown)
        .map_err(|e| anyhow::anyhow!("Failed to tear down search widget: {}", e))?;

    // Let post_stop run before the runtime goes away
    if tokio::time::timeout(Duration::from_secs(3), widget_handle)
        .await
        .is_err()
    {
        eprintln!("Search widget did not stop in time");
    }

    Ok(())
}
