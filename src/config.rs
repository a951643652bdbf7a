use std::path::PathBuf;

use clap::Parser;

/// Startup options. The source is read once before the window opens.
#[derive(Debug, Clone, Parser)]
#[command(version, about = "Subscriber revenue dashboard")]
pub struct Config {
    /// Subscriber CSV to load.
    #[arg(long, env = "SUBSCRIBER_CSV", default_value = "data/subscribers.csv")]
    pub source: PathBuf,

    /// Rows per page in the data table.
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u16).range(1..))]
    pub page_size: u16,
}
