use anyhow::{Context, Result};
use authdeck_core::cli::auth::{
    self, ForgotPasswordArgs, LoginArgs, RegisterArgs, ResetPasswordArgs, VerifyOtpArgs,
};
use authdeck_core::cli::config::{self as config_cmd, ConfigCmd};
use authdeck_core::cli::logs::{LogsArgs, run_logs};
use authdeck_core::cli::resolve_config_path;
use authdeck_core::config::{ClientConfig, load_config};
use authdeck_core::logging::{LogFormat, default_log_format, init_logging};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "authdeck",
    version,
    about = "Authdeck: login client and request-log dashboard"
)]
struct Cli {
    /// Path to the config file (defaults to ./authdeck.toml when present)
    #[arg(long, global = true, env = "AUTHDECK_CONFIG")]
    config: Option<PathBuf>,

    /// Log output format (pretty on a terminal, json otherwise)
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormatArg>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogFormatArg {
    Pretty,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(flatten)]
    Client(ClientCommand),

    /// Configuration tooling
    Config {
        #[command(subcommand)]
        cmd: ConfigCmd,
    },
}

/// Commands that talk to the API.
#[derive(Subcommand, Debug)]
enum ClientCommand {
    /// Log in; asks for the authenticator code when the account requires one
    Login(LoginArgs),

    /// Create an account and print its authenticator provisioning URL
    Register(RegisterArgs),

    /// Submit an authenticator code for an account
    VerifyOtp(VerifyOtpArgs),

    /// Request a reset token, optionally completing the reset right away
    ForgotPassword(ForgotPasswordArgs),

    /// Set a new password from a recovery link
    ResetPassword(ResetPasswordArgs),

    /// Show the request-log dashboard
    Logs(LogsArgs),

    /// Interactive login / registration wizard
    Session,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.log_format.map(Into::into).unwrap_or_else(default_log_format));

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let path = resolve_config_path(cli.config);

    match cli.command {
        Command::Config { cmd } => config_cmd::run(cmd, path.as_deref()),
        Command::Client(cmd) => {
            let cfg = load_config(path.as_deref()).context("failed to load config")?;
            run_client(cmd, &cfg).await
        }
    }
}

async fn run_client(cmd: ClientCommand, cfg: &ClientConfig) -> Result<()> {
    match cmd {
        ClientCommand::Login(args) => {
            auth::login(cfg, args).await?;
        }
        ClientCommand::Register(args) => {
            auth::register(cfg, args).await?;
        }
        ClientCommand::VerifyOtp(args) => {
            auth::verify_otp(cfg, args).await?;
        }
        ClientCommand::ForgotPassword(args) => {
            auth::forgot_password(cfg, args).await?;
        }
        ClientCommand::ResetPassword(args) => {
            auth::reset_password(cfg, args).await?;
        }
        ClientCommand::Logs(args) => {
            run_logs(cfg, args, shutdown_signal()).await?;
        }
        ClientCommand::Session => {
            auth::session(cfg).await?;
        }
    }
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::debug!("ctrl-c received"),
        Err(e) => tracing::warn!(error = %e, "failed to listen for ctrl-c"),
    }
}
