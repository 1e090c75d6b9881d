use crate::api::{ApiClient, RegisterRequest};
use crate::auth::{
    AuthError, AuthSession, AuthStep, Notice, PasswordRecovery, Prompt, ResetLink, SessionSettings,
    WizardExit, provisioning_url, run_wizard,
};
use crate::cli::prompt::{TerminalPrompt, print_notice};
use crate::config::ClientConfig;
use crate::routes::Route;
use anyhow::{Result, anyhow};
use clap::Args;
use std::io::{self, IsTerminal};

#[derive(Args, Debug)]
pub struct LoginArgs {
    #[arg(long)]
    pub email: String,

    /// Prompted for when omitted
    #[arg(long, env = "AUTHDECK_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Authenticator code; prompted for when the account requires one
    #[arg(long)]
    pub otp: Option<String>,
}

#[derive(Args, Debug)]
pub struct RegisterArgs {
    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub username: String,

    #[arg(long)]
    pub first_name: String,

    #[arg(long)]
    pub paternal_surname: String,

    #[arg(long)]
    pub maternal_surname: String,

    #[arg(long)]
    pub group: String,

    /// Prompted for when omitted
    #[arg(long, env = "AUTHDECK_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

#[derive(Args, Debug)]
pub struct VerifyOtpArgs {
    #[arg(long)]
    pub email: String,

    /// 6-digit authenticator code
    #[arg(long)]
    pub code: String,
}

#[derive(Args, Debug)]
pub struct ForgotPasswordArgs {
    #[arg(long)]
    pub email: String,

    /// Complete the reset right away with this authenticator code
    #[arg(long, requires = "new_password")]
    pub mfa_code: Option<String>,

    #[arg(long, requires = "mfa_code")]
    pub new_password: Option<String>,
}

#[derive(Args, Debug)]
pub struct ResetPasswordArgs {
    /// Recovery link (`.../reset-password?userId=..`)
    #[arg(long, conflicts_with = "user_id", required_unless_present = "user_id")]
    pub link: Option<String>,

    #[arg(long)]
    pub user_id: Option<String>,

    /// Authenticator code
    #[arg(long)]
    pub token: String,

    #[arg(long)]
    pub new_password: String,

    #[arg(long)]
    pub confirm_password: String,
}

fn client(cfg: &ClientConfig) -> Result<ApiClient> {
    Ok(ApiClient::new(&cfg.base_url()?, cfg.timeout())?)
}

/// Users get the server's message; the full chain goes to the log.
fn user_error(err: AuthError) -> anyhow::Error {
    tracing::debug!(error = ?err, "auth command failed");
    anyhow!(err.user_message())
}

fn color() -> bool {
    io::stdout().is_terminal()
}

fn announce_home(route: Option<Route>) -> Route {
    let route = route.unwrap_or(Route::Home { user_id: None });
    print_notice(Notice::Info(&format!("continue at {route}")), color());
    route
}

pub async fn login(cfg: &ClientConfig, args: LoginArgs) -> Result<Route> {
    let mut session = AuthSession::new(client(cfg)?, SessionSettings::from(cfg));

    let password = match args.password {
        Some(p) => p,
        None => TerminalPrompt::stdin().ask_secret("Password")?,
    };

    session
        .login(&args.email, &password)
        .await
        .map_err(user_error)?;

    if matches!(session.step(), AuthStep::Otp { .. }) {
        print_notice(Notice::Info("This account requires an authenticator code"), color());
        let code = match args.otp {
            Some(code) => code,
            None => TerminalPrompt::stdin().ask("Authenticator code")?,
        };
        session.verify_otp(None, &code).await.map_err(user_error)?;
    }

    print_notice(Notice::Success("Login successful"), color());
    Ok(announce_home(session.home_route()))
}

pub async fn verify_otp(cfg: &ClientConfig, args: VerifyOtpArgs) -> Result<Route> {
    let mut session =
        AuthSession::awaiting_otp(client(cfg)?, SessionSettings::from(cfg), &args.email)
            .map_err(user_error)?;

    session
        .verify_otp(None, &args.code)
        .await
        .map_err(user_error)?;

    print_notice(Notice::Success("Authentication complete"), color());
    Ok(announce_home(session.home_route()))
}

/// Returns the provisioning URL for the new account's authenticator.
pub async fn register(cfg: &ClientConfig, args: RegisterArgs) -> Result<String> {
    let mut session = AuthSession::new(client(cfg)?, SessionSettings::from(cfg));

    let password = match args.password {
        Some(p) => p,
        None => TerminalPrompt::stdin().ask_secret("Password")?,
    };
    let form = RegisterRequest {
        email: args.email,
        username: args.username,
        first_name: args.first_name,
        paternal_surname: args.paternal_surname,
        maternal_surname: args.maternal_surname,
        group: args.group,
        password,
    };

    session.show_register().map_err(user_error)?;
    let step = session.register(&form).await.map_err(user_error)?;

    let AuthStep::QrProvisioning {
        provisioning_url: url,
    } = step
    else {
        return Err(anyhow!("registration ended in step '{step}'"));
    };
    let url = url.clone();

    print_notice(Notice::Success("User registered"), color());
    print_notice(Notice::Info("Add this account to your authenticator app:"), color());
    println!("{url}");
    Ok(url)
}

pub async fn forgot_password(cfg: &ClientConfig, args: ForgotPasswordArgs) -> Result<()> {
    let api = client(cfg)?;
    let recovery = PasswordRecovery::from_config(&api, cfg);

    let ticket = recovery
        .request_reset(&args.email)
        .await
        .map_err(user_error)?;

    print_notice(
        Notice::Success(ticket.message.as_deref().unwrap_or("Password reset requested")),
        color(),
    );
    if let Some(secret) = &ticket.mfa_secret {
        print_notice(Notice::Info("Authenticator entry for this account:"), color());
        println!("{}", provisioning_url(&cfg.otp_issuer, &cfg.otp_label, secret));
    }

    let (Some(code), Some(new_password)) = (args.mfa_code, args.new_password) else {
        return Ok(());
    };

    recovery
        .reset_with_token(&ticket, &code, &new_password)
        .await
        .map_err(user_error)?;
    print_notice(Notice::Success("Password updated"), color());
    Ok(())
}

pub async fn reset_password(cfg: &ClientConfig, args: ResetPasswordArgs) -> Result<()> {
    let link = match (args.link, args.user_id) {
        (Some(link), _) => ResetLink::parse(&link).map_err(user_error)?,
        (None, Some(user_id)) => ResetLink { user_id },
        (None, None) => return Err(anyhow!("either --link or --user-id is required")),
    };

    let api = client(cfg)?;
    PasswordRecovery::from_config(&api, cfg)
        .reset_with_user_id(&link, &args.token, &args.new_password, &args.confirm_password)
        .await
        .map_err(user_error)?;

    print_notice(Notice::Success("Password updated"), color());
    announce_home(Some(Route::Login));
    Ok(())
}

/// Interactive wizard on stdin/stdout.
pub async fn session(cfg: &ClientConfig) -> Result<WizardExit> {
    let mut session = AuthSession::new(client(cfg)?, SessionSettings::from(cfg));
    let mut prompt = TerminalPrompt::stdin();

    let exit = run_wizard(&mut session, &mut prompt).await?;

    match &exit {
        WizardExit::Home(route) => {
            announce_home(Some(route.clone()));
        }
        WizardExit::ForgotPassword => print_notice(
            Notice::Info("run `authdeck forgot-password --email <email>` to continue"),
            color(),
        ),
        WizardExit::Quit => {}
    }
    Ok(exit)
}
