use std::io::BufRead;

use anyhow::Context;
use colored::Colorize;
use folio_auth::{hash_password, CredentialStore, FileCredentialStore};
use folio_cms::Environment;
use folio_server::{FolioServer, ServerConfig};
use folio_validate::validate_signup;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = resolve_config(&cli)?;
    match cli.command {
        Command::Serve(args) => cmd_serve(config, args),
        Command::User(args) => match args.action {
            UserAction::Add { username, password } => cmd_user_add(&config, &username, password),
            UserAction::List => cmd_user_list(&config, &cli.format),
        },
    }
}

/// Config file (or defaults), then `FOLIO_ENV`, then command-line flags.
fn resolve_config(cli: &Cli) -> anyhow::Result<ServerConfig> {
    let mut config = match &cli.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };
    if let Some(root) = &cli.root {
        config.root = root.clone();
    }
    if let Some(environment) = cli.env.or_else(Environment::from_env) {
        config.environment = environment;
    }
    Ok(config)
}

fn credentials(config: &ServerConfig) -> FileCredentialStore {
    FileCredentialStore::new(config.cms_config().credentials_path())
}

fn cmd_serve(mut config: ServerConfig, args: ServeArgs) -> anyhow::Result<()> {
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    println!(
        "Folio on {} (root: {}, environment: {})",
        config.bind_addr.to_string().bold(),
        config.root.display(),
        config.environment.to_string().yellow()
    );
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start runtime")?;
    runtime.block_on(FolioServer::new(config).serve())?;
    Ok(())
}

fn read_password() -> anyhow::Result<String> {
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn cmd_user_add(config: &ServerConfig, username: &str, password: Option<String>) -> anyhow::Result<()> {
    let password = match password {
        Some(password) => password,
        None => read_password()?,
    };
    let username = username.trim();
    let store = credentials(config);
    let existing = store.usernames()?;
    validate_signup(username, &password, existing.iter().map(String::as_str))?;

    store.insert(username, &hash_password(&password)?)?;
    println!(
        "{} Added user {} to {}",
        "✓".green().bold(),
        username.yellow(),
        store.path().display()
    );
    Ok(())
}

fn cmd_user_list(config: &ServerConfig, format: &OutputFormat) -> anyhow::Result<()> {
    let users = credentials(config).usernames()?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&users)?),
        OutputFormat::Text if users.is_empty() => println!("No users."),
        OutputFormat::Text => {
            for user in &users {
                println!("  {}", user.yellow());
            }
        }
    }
    Ok(())
}
