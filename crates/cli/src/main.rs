// Auth Demo CLI
//
// Design Decision: Use clap derive for ergonomic argument parsing.
// Design Decision: Support text/json/yaml output formats for scripting.
// Design Decision: All backend calls go through authdemo-client; this crate only presents results.
// Design Decision: The token persists in a file between invocations (see --token-file).

mod commands;
mod output;

use authdemo_client::{Account, ClientConfig};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "authdemo")]
#[command(about = "Auth demo CLI - Register, log in, and manage your profile")]
#[command(version)]
pub struct Cli {
    /// API base URL
    #[arg(
        long,
        env = "AUTHDEMO_API_URL",
        default_value = "http://localhost:8080"
    )]
    pub api_url: String,

    /// File holding the access token between runs
    #[arg(long, env = "AUTHDEMO_TOKEN_FILE")]
    pub token_file: Option<PathBuf>,

    /// Output format
    #[arg(long, short, default_value = "text", value_parser = ["text", "json", "yaml"])]
    pub output: String,

    /// Suppress non-essential output
    #[arg(long, short)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an account and log in
    Register {
        #[arg(long)]
        email: String,

        #[arg(long, env = "AUTHDEMO_PASSWORD", hide_env_values = true)]
        password: String,

        #[arg(long)]
        nickname: String,
    },

    /// Log in and store the access token
    Login {
        #[arg(long)]
        email: String,

        #[arg(long, env = "AUTHDEMO_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored access token
    Logout,

    /// Show the logged-in user (clears a rejected token)
    Whoami,

    /// Change your nickname
    Nickname {
        /// New nickname
        nickname: String,
    },

    /// Change your password
    Password {
        /// Current password
        #[arg(long)]
        current: String,

        /// New password
        #[arg(long)]
        new: String,

        /// New password again
        #[arg(long)]
        confirm: String,
    },

    /// Show your profile
    Profile,

    /// Upload a profile image (JPG/PNG/WebP)
    Upload {
        /// Image file
        file: PathBuf,
    },

    /// Show or download your profile image
    Avatar {
        /// Save the image to this path instead of printing its URL
        #[arg(long)]
        output_file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "authdemo=warn,authdemo_client=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env().with_api_url(&cli.api_url);
    if let Some(path) = &cli.token_file {
        config = config.with_token_path(path);
    }
    if config.token_path.is_none() {
        tracing::warn!("No config directory found; the token will not persist between runs");
    }

    let account = Account::from_config(&config);
    let output_format = output::OutputFormat::from_str(&cli.output);

    match cli.command {
        Commands::Register {
            email,
            password,
            nickname,
        } => {
            commands::auth::register(&account, output_format, cli.quiet, email, password, nickname)
                .await
        }
        Commands::Login { email, password } => {
            commands::auth::login(&account, output_format, cli.quiet, email, password).await
        }
        Commands::Logout => commands::auth::logout(&account, output_format, cli.quiet),
        Commands::Whoami => commands::auth::whoami(&account, output_format).await,
        Commands::Nickname { nickname } => {
            commands::account::nickname(&account, output_format, cli.quiet, &nickname).await
        }
        Commands::Password {
            current,
            new,
            confirm,
        } => {
            commands::account::password(&account, output_format, cli.quiet, current, new, confirm)
                .await
        }
        Commands::Profile => commands::profile::show(&account, output_format).await,
        Commands::Upload { file } => {
            commands::profile::upload(&account, output_format, cli.quiet, &file).await
        }
        Commands::Avatar { output_file } => {
            commands::profile::avatar(&account, output_format, output_file.as_deref()).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_password_change() {
        let cli = Cli::try_parse_from([
            "authdemo",
            "--api-url",
            "http://example.test",
            "password",
            "--current",
            "old",
            "--new",
            "n3w",
            "--confirm",
            "n3w",
        ])
        .unwrap();

        assert_eq!(cli.api_url, "http://example.test");
        assert!(matches!(
            cli.command,
            Commands::Password { ref current, ref new, ref confirm }
                if current == "old" && new == "n3w" && confirm == "n3w"
        ));
    }

    #[test]
    fn test_parse_avatar_output_file() {
        let cli = Cli::try_parse_from(["authdemo", "avatar", "--output-file", "me.png"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Avatar { output_file: Some(ref path) } if path == &PathBuf::from("me.png")
        ));
    }

    #[test]
    fn test_output_format_parsing() {
        assert!(output::OutputFormat::from_str("text").is_text());
        assert!(!output::OutputFormat::from_str("json").is_text());
        assert!(!output::OutputFormat::from_str("yaml").is_text());
    }
}
