use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use folio_cms::Environment;

#[derive(Parser)]
#[command(
    name = "folio",
    about = "Folio - a small file-backed content manager",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding data/ and users.toml
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// production or test (falls back to FOLIO_ENV)
    #[arg(long, global = true)]
    pub env: Option<Environment>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the web server
    Serve(ServeArgs),
    /// Manage accounts
    User(UserArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    #[arg(long)]
    pub bind: Option<SocketAddr>,
}

#[derive(Args)]
pub struct UserArgs {
    #[command(subcommand)]
    pub action: UserAction,
}

#[derive(Subcommand)]
pub enum UserAction {
    /// Add an account; reads the password from stdin when --password is absent
    Add {
        username: String,
        #[arg(long)]
        password: Option<String>,
    },
    /// List account names
    List,
}
