use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "scrapewatch")]
#[command(about = "Submit and watch college-portal scrape jobs", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Submit a new scrape job
    Submit(SubmitArgs),
    /// Watch an existing job until it completes or fails
    Watch(WatchArgs),
    /// Check connectivity to the scraper backend
    Ping,
}

#[derive(clap::Args, Debug)]
pub struct SubmitArgs {
    /// Portal login username
    #[arg(long)]
    pub username: String,

    /// Portal login password (prefer the PORTAL_PASSWORD environment variable)
    #[arg(long, env = "PORTAL_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Academic year to scrape, e.g. 2024-25
    #[arg(long)]
    pub academic_year: String,

    /// Scrape attendance data
    #[arg(long)]
    pub attendance: bool,

    /// Scrape mid-term marks
    #[arg(long)]
    pub mid_marks: bool,

    /// Scrape personal details
    #[arg(long)]
    pub personal_details: bool,

    /// Upload scraped data to Supabase
    #[arg(long)]
    pub upload: bool,

    /// Overwrite existing uploaded rows
    #[arg(long)]
    pub force: bool,

    /// Keep watching the job after submission
    #[arg(long)]
    pub watch: bool,
}

#[derive(clap::Args, Debug)]
pub struct WatchArgs {
    /// Job id returned at submission
    pub job_id: String,
}
