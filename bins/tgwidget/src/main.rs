//! tgwidget: verify Telegram login widget payloads from the command line.

mod config;
mod output;

use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tgwidget_core::{
    parse_form, parse_json, FormData, LoginError, LoginVerifier, UnverifiedLogin,
};

use crate::config::Config;
use crate::output::Status;

/// Exit codes for CLI commands
mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const INVALID_HASH: i32 = 1;
    pub const MALFORMED_INPUT: i32 = 2;
    pub const CONFIG_ERROR: i32 = 3;
}

#[derive(Parser)]
#[command(name = "tgwidget")]
#[command(about = "Verify Telegram login widget payloads")]
#[command(version)]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<String>,

    /// Log filter, overrides the config file
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify a payload and print the user
    Verify {
        #[command(flatten)]
        key: KeyArgs,
        #[command(flatten)]
        source: SourceArgs,
        /// Report present-but-empty names as absent
        #[arg(long)]
        empty_is_absent: bool,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },
    /// Print the canonical check string of a payload without verifying it
    CheckString {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Compute the hash the widget would send for a payload
    Sign {
        #[command(flatten)]
        key: KeyArgs,
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Print the SHA-256 of the bot token for use as `token_hash`
    HashToken {
        #[command(flatten)]
        key: KeyArgs,
    },
}

#[derive(Args)]
struct KeyArgs {
    /// Bot token
    #[arg(long, env = "TGWIDGET_BOT_TOKEN", hide_env_values = true)]
    token: Option<String>,
    /// Hex SHA-256 of the bot token
    #[arg(long, env = "TGWIDGET_TOKEN_HASH", hide_env_values = true, conflicts_with = "token")]
    token_hash: Option<String>,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct SourceArgs {
    /// JSON payload file, `-` for stdin
    #[arg(long)]
    json: Option<PathBuf>,
    /// URL-encoded payload, e.g. `id=1&auth_date=...&hash=...`
    #[arg(long)]
    form: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() {
    let cli = Cli::parse();

    let code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            Status::error(&format!("{:#}", e));
            exit_codes::CONFIG_ERROR
        }
    };
    std::process::exit(code);
}

fn run(cli: Cli) -> Result<i32> {
    let config = Config::load(cli.config.as_deref())?;

    let mut logging = config.schema.logging.clone();
    if let Some(level) = cli.log_level {
        logging.log_level = level;
    }
    tgwidget_telemetry::init_with_config(logging)?;
    if let Some(path) = &config.path {
        tracing::debug!(path = %path, "Loaded configuration");
    }

    match cli.command {
        Commands::Verify {
            key,
            source,
            empty_is_absent,
            output,
        } => {
            let verifier = verifier_from(&config, &key)?;
            let mut ignored: Vec<String> = Vec::new();
            let outcome =
                read_payload(&source, &mut ignored)?.and_then(|login| verifier.verify(login));

            for name in &ignored {
                Status::warning(&format!("Ignored unrecognized field `{}`", name));
            }

            let empty_is_absent = empty_is_absent || config.schema.auth.empty_is_absent;
            let outcome = outcome.map(|user| {
                if empty_is_absent {
                    user.without_empty_fields()
                } else {
                    user
                }
            });

            let code = exit_code(&outcome);
            match output {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&output::outcome_json(&outcome))?);
                }
                OutputFormat::Text => match &outcome {
                    Ok(user) => {
                        Status::success(&format!("Verified {}", user.display_name()));
                        output::print_user(user);
                    }
                    Err(err) => Status::error(&format!("[{}] {}", err.code() as u32, err)),
                },
            }
            Ok(code)
        }

        Commands::CheckString { source } => {
            match read_payload(&source, &mut Vec::new())? {
                Ok(login) => {
                    println!("{}", login.check_string());
                    Ok(exit_codes::SUCCESS)
                }
                Err(err) => {
                    Status::error(&err.to_string());
                    Ok(exit_code::<()>(&Err(err)))
                }
            }
        }

        Commands::Sign { key, source } => {
            let verifier = verifier_from(&config, &key)?;
            match read_payload(&source, &mut Vec::new())? {
                Ok(login) => {
                    println!("{}", hex::encode(verifier.sign(login.pairs())));
                    Ok(exit_codes::SUCCESS)
                }
                Err(err) => {
                    Status::error(&err.to_string());
                    Ok(exit_code::<()>(&Err(err)))
                }
            }
        }

        Commands::HashToken { key } => {
            let verifier = verifier_from(&config, &key)?;
            println!("{}", verifier.key().to_hex());
            Ok(exit_codes::SUCCESS)
        }
    }
}

fn verifier_from(config: &Config, key: &KeyArgs) -> Result<LoginVerifier> {
    let key = config.resolve_key(key.token.as_deref(), key.token_hash.as_deref())?;
    Ok(LoginVerifier::from_token_key(key))
}

/// Read and parse the payload. The outer error is I/O, the inner one is the
/// payload's own.
fn read_payload(
    source: &SourceArgs,
    ignored: &mut Vec<String>,
) -> Result<std::result::Result<UnverifiedLogin, LoginError>> {
    if let Some(form) = &source.form {
        return Ok(parse_form(&FormData::parse(form), ignored));
    }

    let path = source
        .json
        .as_ref()
        .context("Either --json or --form is required")?;
    if path.as_os_str() == "-" {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf).context("Failed to read stdin")?;
        return Ok(parse_json(buf.as_slice(), ignored));
    }

    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    Ok(parse_json(file, ignored))
}

fn exit_code<T>(outcome: &std::result::Result<T, LoginError>) -> i32 {
    match outcome {
        Ok(_) => exit_codes::SUCCESS,
        Err(err) if err.is_invalid_hash() => exit_codes::INVALID_HASH,
        Err(_) => exit_codes::MALFORMED_INPUT,
    }
}
