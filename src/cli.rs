use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "promise-tracker",
    about = "Browse, filter, and report on city promise records"
)]
pub struct Cli {
    /// Natural language query over the promise table
    #[arg(trailing_var_arg = true, num_args = 0..)]
    pub query: Vec<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the web dashboard
    Serve {
        /// Port to serve on
        #[arg(long, default_value = "3141")]
        port: u16,
    },
    /// Run a query once and print the matching records
    Query {
        /// Natural language query
        #[arg(trailing_var_arg = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Generate an HTML report for a query
    Report {
        /// Natural language query (empty matches every record)
        #[arg(trailing_var_arg = true, num_args = 0..)]
        query: Vec<String>,
        /// Output directory (defaults to the configured reports dir)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the promise status counts
    Stats,
}
