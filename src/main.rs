mod cli;

use std::sync::Arc;

use clap::Parser;
use tracing::info;

use cli::{Cli, Commands, SubmitArgs, WatchArgs};
use scrapewatch::client::{ApiClient, FetchError, ScrapeRequest};
use scrapewatch::config::Config;
use scrapewatch::observability::Metrics;
use scrapewatch::status::{JobHandle, JobState, JobStatus};
use scrapewatch::watch::{JobObserver, TerminalEvent, WatchOptions, WatchSession};

type AnyError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[tokio::main]
async fn main() -> Result<(), AnyError> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let client = Arc::new(ApiClient::new(config.api.to_client_config())?);

    match cli.command {
        Commands::Submit(args) => submit(client, &config, args).await?,
        Commands::Watch(args) => watch(client, &config, args).await?,
        Commands::Ping => ping(client).await?,
    }

    Ok(())
}

async fn submit(
    client: Arc<ApiClient>,
    config: &Config,
    args: SubmitArgs,
) -> Result<(), AnyError> {
    let request = ScrapeRequest {
        username: args.username,
        password: args.password,
        academic_year: args.academic_year,
        scrape_attendance: args.attendance,
        scrape_mid_marks: args.mid_marks,
        scrape_personal_details: args.personal_details,
        upload_to_supabase: args.upload,
        force_update: args.force,
    };

    let job = client.submit_job(&request).await?;
    println!("Scrape job started: {}", job);

    if args.watch {
        observe(client, config, job).await?;
    }

    Ok(())
}

async fn watch(
    client: Arc<ApiClient>,
    config: &Config,
    args: WatchArgs,
) -> Result<(), AnyError> {
    observe(client, config, JobHandle::new(args.job_id)).await
}

async fn ping(client: Arc<ApiClient>) -> Result<(), AnyError> {
    let report = client.ping().await?;
    println!("Server reachable at {}", client.base_url());
    println!("  status: {}", report.status);
    for (component, state) in &report.components {
        println!("  {}: {}", component, state);
    }
    Ok(())
}

/// Watch one job until it reaches a terminal state, stop() is triggered by
/// ctrl-c, or the session ends.
async fn observe(
    client: Arc<ApiClient>,
    config: &Config,
    job: JobHandle,
) -> Result<(), AnyError> {
    let metrics = Arc::new(Metrics::new());
    let options = WatchOptions {
        poll_interval: config.watch.poll_interval(),
        metrics: metrics.clone(),
    };

    let handle = WatchSession::spawn(client, job, ConsoleObserver::default(), options);

    // Ctrl-c stops the session instead of killing the process mid-poll.
    let stopper = handle.stopper();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupt received, stopping watch");
            stopper.stop();
        }
    });

    let outcome = handle.join().await?;
    let snapshot = metrics.snapshot();
    info!(
        polls = snapshot.polls_issued,
        failures = snapshot.poll_failures,
        "watch finished"
    );

    match outcome.terminal {
        Some(TerminalEvent::Completed) => Ok(()),
        Some(TerminalEvent::Failed { message }) => {
            Err(format!("scrape job failed: {}", message).into())
        }
        None => {
            println!(
                "Stopped watching; last known state: {}",
                outcome.last_status.state
            );
            Ok(())
        }
    }
}

/// Renders the canonical status model on stdout.
#[derive(Default)]
struct ConsoleObserver {
    last_line: String,
}

impl JobObserver for ConsoleObserver {
    fn on_status(&mut self, status: &JobStatus) {
        let line = format!(
            "[{}] {:>3.0}% {}",
            status.state,
            status.progress * 100.0,
            status.message
        );
        // Unchanged statuses between polls are not worth repeating.
        if line != self.last_line {
            println!("{}", line);
            self.last_line = line;
        }

        if status.state == JobState::Completed {
            for (task, outcome) in &status.details.results {
                let verdict = if outcome.success { "ok" } else { "failed" };
                let stats: Vec<String> =
                    outcome.stats.values().map(ToString::to_string).collect();
                if stats.is_empty() {
                    println!("  {}: {}", task, verdict);
                } else {
                    println!("  {}: {} ({})", task, verdict, stats.join(", "));
                }
            }
        }
    }

    fn on_transient_error(&mut self, error: &FetchError) {
        // Shown alongside the last-known status, which stands.
        eprintln!("warning: {}", error);
    }

    fn on_completed(&mut self) {
        println!("Scraping job completed!");
    }

    fn on_failed(&mut self, message: &str) {
        eprintln!("Scraping job failed: {}", message);
    }
}
