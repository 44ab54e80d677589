use clap::Parser;

#[derive(Parser)]
#[command(name = "repo-pin")]
#[command(about = "Repo Pin - Search GitHub repositories as you type and pin the ones you like")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// Base URL of the GitHub API
    #[arg(long, env = "SEARCH_API_URL", default_value = "https://api.github.com")]
    pub api_url: String,

    /// Milliseconds to wait after the last keystroke before searching
    #[arg(long, env = "DEBOUNCE_MS", default_value_t = 500)]
    pub debounce_ms: u64,

    /// Timeout for a single search request, in seconds
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,
}
