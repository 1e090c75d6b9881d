use crate::api::{AuthApi, RegisterRequest};
use crate::auth::flow::AuthStep;
use crate::auth::session::AuthSession;
use crate::routes::Route;
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice<'a> {
    Success(&'a str),
    Info(&'a str),
    Error(&'a str),
}

/// Line-oriented user input for the interactive login wizard.
pub trait Prompt {
    fn ask(&mut self, label: &str) -> io::Result<String>;

    fn ask_secret(&mut self, label: &str) -> io::Result<String> {
        self.ask(label)
    }

    fn notify(&mut self, notice: Notice<'_>);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardExit {
    Home(Route),
    ForgotPassword,
    Quit,
}

/// Walk the user through login, registration, QR provisioning and OTP until
/// they are authenticated or leave.
pub async fn run_wizard<A, P>(
    session: &mut AuthSession<A>,
    prompt: &mut P,
) -> io::Result<WizardExit>
where
    A: AuthApi,
    P: Prompt,
{
    loop {
        match session.step().clone() {
            AuthStep::Login => {
                let choice = prompt.ask("[l]ogin, [r]egister, [f]orgot password, [q]uit")?;
                match choice.trim().to_ascii_lowercase().as_str() {
                    "" | "l" | "login" => {
                        let email = prompt.ask("Email")?;
                        let password = prompt.ask_secret("Password")?;
                        match session.login(&email, &password).await {
                            Ok(_) => prompt.notify(Notice::Success("Login successful")),
                            Err(e) => prompt.notify(Notice::Error(&e.user_message())),
                        }
                    }
                    "r" | "register" => {
                        if let Err(e) = session.show_register() {
                            prompt.notify(Notice::Error(&e.user_message()));
                        }
                    }
                    "f" | "forgot" => return Ok(WizardExit::ForgotPassword),
                    "q" | "quit" => return Ok(WizardExit::Quit),
                    _ => prompt.notify(Notice::Error("unknown choice")),
                }
            }

            AuthStep::Register => {
                let choice = prompt.ask("[r]egister, [b]ack to login")?;
                if matches!(choice.trim().to_ascii_lowercase().as_str(), "b" | "back") {
                    if let Err(e) = session.show_login() {
                        prompt.notify(Notice::Error(&e.user_message()));
                    }
                    continue;
                }

                let form = RegisterRequest {
                    email: prompt.ask("Email")?,
                    username: prompt.ask("Username")?,
                    first_name: prompt.ask("First name")?,
                    paternal_surname: prompt.ask("Paternal surname")?,
                    maternal_surname: prompt.ask("Maternal surname")?,
                    group: prompt.ask("Group")?,
                    password: prompt.ask_secret("Password")?,
                };
                match session.register(&form).await {
                    Ok(_) => prompt.notify(Notice::Success("User registered")),
                    Err(e) => prompt.notify(Notice::Error(&e.user_message())),
                }
            }

            AuthStep::QrProvisioning { provisioning_url } => {
                prompt.notify(Notice::Info("Add this account to your authenticator app:"));
                prompt.notify(Notice::Info(&provisioning_url));
                prompt.ask("Press enter to continue to login")?;
                if let Err(e) = session.show_login() {
                    prompt.notify(Notice::Error(&e.user_message()));
                }
            }

            AuthStep::Otp { .. } => {
                let code = prompt.ask("Authenticator code (blank to go back)")?;
                if code.trim().is_empty() {
                    if let Err(e) = session.show_login() {
                        prompt.notify(Notice::Error(&e.user_message()));
                    }
                    continue;
                }
                match session.verify_otp(None, &code).await {
                    Ok(_) => prompt.notify(Notice::Success("Authentication complete")),
                    Err(e) => prompt.notify(Notice::Error(&e.user_message())),
                }
            }

            AuthStep::Authenticated { .. } => {
                let route = session.home_route().unwrap_or(Route::Home { user_id: None });
                return Ok(WizardExit::Home(route));
            }
        }
    }
}
