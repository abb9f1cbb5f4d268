//! Command-line front-end for the auth server's user API.

use std::time::Duration;

use anyhow::{Context, Result};
use auth_client::config::{ENV_BASE_URL, ENV_TIMEOUT_SECS, ENV_VERIFY_TLS};
use auth_client::{ClientConfig, User, UserClient};
use clap::builder::BoolishValueParser;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "auth-cli", version, about = "Manage users on the auth server")]
struct Args {
    #[arg(long, env = ENV_BASE_URL, help = "Auth server base URL [default: https://localhost:8080/]")]
    server: Option<String>,

    #[arg(
        long,
        env = ENV_VERIFY_TLS,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new(),
        help = "Verify the server's TLS certificate; `--verify-tls=false` turns it off [default: false]"
    )]
    verify_tls: Option<bool>,

    #[arg(long, env = ENV_TIMEOUT_SECS, help = "Request timeout in seconds [default: 5]")]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a user and print it with its assigned id
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        admin: bool,
    },
    /// Fetch a user by id
    Get { id: String },
    /// Delete a user by id
    Delete { id: String },
}

fn build_config(args: &Args) -> Result<ClientConfig> {
    let mut config = ClientConfig::from_env()?;
    if let Some(server) = &args.server {
        config = config.with_base_url(server.clone());
    }
    if let Some(verify_tls) = args.verify_tls {
        config = config.with_verify_tls(verify_tls);
    }
    if let Some(secs) = args.timeout_secs {
        anyhow::ensure!(secs > 0, "--timeout-secs must be at least 1");
        config = config.with_timeout(Duration::from_secs(secs));
    }
    Ok(config)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = build_config(&args)?;
    tracing::debug!(base_url = %config.base_url, "using auth server");
    let client = UserClient::new(&config);

    match args.command {
        Command::Create { name, email, admin } => {
            let mut user = User::new(name, email, admin);
            client.create(&mut user).context("creating user")?;
            println!("{}", serde_json::to_string_pretty(&user)?);
        }
        Command::Get { id } => {
            let mut user = User::with_id(id.clone());
            client.get(&mut user).with_context(|| format!("fetching user {id}"))?;
            println!("{}", serde_json::to_string_pretty(&user)?);
        }
        Command::Delete { id } => {
            client
                .delete(&User::with_id(id.clone()))
                .with_context(|| format!("deleting user {id}"))?;
            println!("deleted {id}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_create_command() {
        let args = Args::try_parse_from([
            "auth-cli",
            "--server",
            "http://127.0.0.1:9000",
            "create",
            "--name",
            "Joe Schmoe",
            "--email",
            "j.shmoe@example.org",
            "--admin",
        ])
        .unwrap();
        assert_eq!(args.server.as_deref(), Some("http://127.0.0.1:9000"));
        match args.command {
            Command::Create { name, email, admin } => {
                assert_eq!(name, "Joe Schmoe");
                assert_eq!(email, "j.shmoe@example.org");
                assert!(admin);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn flags_override_config() {
        let args = Args::try_parse_from([
            "auth-cli",
            "--server",
            "http://127.0.0.1:9000",
            "--verify-tls",
            "--timeout-secs",
            "3",
            "get",
            "abc",
        ])
        .unwrap();
        let config = build_config(&args).unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:9000");
        assert!(config.verify_tls);
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn verify_tls_can_be_switched_off_explicitly() {
        let args = Args::try_parse_from(["auth-cli", "--verify-tls=false", "get", "abc"]).unwrap();
        assert_eq!(args.verify_tls, Some(false));
        assert!(!build_config(&args).unwrap().verify_tls);

        let args = Args::try_parse_from(["auth-cli", "--verify-tls=yes", "get", "abc"]).unwrap();
        assert_eq!(args.verify_tls, Some(true));
    }

    #[test]
    fn bare_verify_tls_does_not_swallow_subcommand() {
        let args = Args::try_parse_from(["auth-cli", "--verify-tls", "delete", "abc"]).unwrap();
        assert_eq!(args.verify_tls, Some(true));
        assert!(matches!(args.command, Command::Delete { ref id } if id == "abc"));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let args = Args::try_parse_from(["auth-cli", "--timeout-secs", "0", "delete", "abc"]).unwrap();
        assert!(build_config(&args).is_err());
    }
}
