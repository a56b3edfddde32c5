//! Command-line application orchestrator.

use std::sync::Arc;

use color_eyre::eyre::{Result, eyre};
use serde_json::Value;
use tracing::{debug, error, info};

use crate::application::services::{PasswordPolicy, SessionStore};
use crate::application::{AuthOutcome, NotificationManager};
use crate::domain::entities::{Credentials, NewAccount};
use crate::domain::errors::ApiError;
use crate::domain::ports::{GenerationPort, WorkspacePort};
use crate::domain::SessionEventReceiver;
use crate::infrastructure::config::Command;
use crate::presentation::commands::CommandRunner;
use crate::presentation::navigation::{NavigationController, Route};
use crate::presentation::output::{print_json, print_notifications};

const WEAK_PASSWORD_SCORE: u8 = 2;

/// One CLI invocation: guard, dispatch, report.
pub struct App {
    session: Arc<SessionStore>,
    runner: CommandRunner,
    navigation: NavigationController,
    notifications: NotificationManager,
    notifications_enabled: bool,
}

impl App {
    /// Wires the session store, ports and event receiver.
    #[must_use]
    pub fn new(
        session: Arc<SessionStore>,
        workspace: Arc<dyn WorkspacePort>,
        generation: Arc<dyn GenerationPort>,
        events: SessionEventReceiver,
        notifications: NotificationManager,
    ) -> Self {
        Self {
            session,
            runner: CommandRunner::new(workspace, generation),
            navigation: NavigationController::new(events),
            notifications,
            notifications_enabled: true,
        }
    }

    /// Enables or suppresses notifications on stderr.
    #[must_use]
    pub const fn with_notifications(mut self, enabled: bool) -> Self {
        self.notifications_enabled = enabled;
        self
    }

    /// Runs one command and prints its result.
    ///
    /// # Errors
    /// Returns error if the command failed; the failure was already notified.
    pub async fn run(mut self, command: Command) -> Result<()> {
        let result = self.execute(command).await;

        self.navigation
            .process_events(&self.session, &mut self.notifications)
            .await;

        if self.notifications_enabled {
            print_notifications(&self.notifications.drain());
        }

        match result {
            Ok(Some(value)) => {
                print_json(&value)?;
                Ok(())
            }
            Ok(None) => Ok(()),
            Err(message) => Err(eyre!(message)),
        }
    }

    async fn execute(&mut self, command: Command) -> Result<Option<Value>, String> {
        let requested = route_for(&command);

        if requested.requires_auth() {
            self.session.check_auth().await;
        }

        let route = self.navigation.navigate(requested, &self.session.snapshot());
        if route != requested {
            self.notifications
                .error("Not signed in", "Run `landit login` first");
            return Err("not signed in".to_string());
        }

        debug!(route = %route, "Dispatching command");
        match command {
            Command::Login { email, password } => self.login(Credentials::new(email, password)).await,
            Command::Register {
                email,
                username,
                full_name,
                password,
                confirm_password,
            } => {
                let confirmation = confirm_password.unwrap_or_else(|| password.clone());
                if let Err(problem) = PasswordPolicy::validate(&password, &confirmation) {
                    self.notifications
                        .error("Registration failed", problem.to_string());
                    return Err(problem.to_string());
                }

                let strength = PasswordPolicy::strength(&password);
                if strength.score() < WEAK_PASSWORD_SCORE {
                    self.notifications
                        .warn("Weak password", format!("Password strength: {strength}"));
                }

                let account = NewAccount::new(email, username, full_name, password);
                let outcome = self.session.register(account).await;
                self.finish_auth(outcome, "Registration failed", "Account created")
            }
            Command::Logout => {
                self.session.logout().await;
                self.notifications.info("Logged out", "");
                Ok(None)
            }
            Command::Whoami => self.session.current_user().map_or_else(
                || Err("no user".to_string()),
                |user| serde_json::to_value(user).map(Some).map_err(|e| e.to_string()),
            ),
            Command::Resumes(command) => {
                let result = self.runner.resumes(command, &mut self.notifications).await;
                self.report(result)
            }
            Command::Jobs(command) => {
                let result = self.runner.jobs(command, &mut self.notifications).await;
                self.report(result)
            }
            Command::Emails(command) => {
                let result = self.runner.emails(command, &mut self.notifications).await;
                self.report(result)
            }
            Command::Generate(command) => {
                let result = self.runner.generate(command, &mut self.notifications).await;
                self.report(result)
            }
        }
    }

    async fn login(&mut self, credentials: Credentials) -> Result<Option<Value>, String> {
        let outcome = self.session.login(credentials).await;
        self.finish_auth(outcome, "Login failed", "Logged in")
    }

    fn finish_auth(
        &mut self,
        outcome: AuthOutcome,
        failure_title: &str,
        success_title: &str,
    ) -> Result<Option<Value>, String> {
        if !outcome.success {
            let message = outcome.error.unwrap_or_else(|| failure_title.to_string());
            self.notifications.error(failure_title, message.clone());
            return Err(message);
        }

        let user = self.session.current_user();
        let greeting = user
            .as_ref()
            .map(|user| format!("Welcome, {}", user.display_name()))
            .unwrap_or_default();
        info!(title = success_title, "Authentication succeeded");
        self.notifications.success(success_title, greeting);

        user.map(|user| serde_json::to_value(user).map_err(|e| e.to_string()))
            .transpose()
    }

    fn report(&mut self, result: Result<Value, ApiError>) -> Result<Option<Value>, String> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.is_unauthorized() => {
                // the navigation controller reports the expired session
                Err(e.to_string())
            }
            Err(e) => {
                error!(error = %e, "Command failed");
                let message = e.user_message("Request failed");
                self.notifications.error("Request failed", message.clone());
                Err(message)
            }
        }
    }
}

const fn route_for(command: &Command) -> Route {
    match command {
        Command::Login { .. } => Route::Login,
        Command::Register { .. } => Route::Register,
        Command::Logout => Route::Landing,
        _ => Route::Dashboard,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes_follow_auth_requirement() {
        let commands = [
            Command::Logout,
            Command::Whoami,
            Command::Login {
                email: "a@b.c".to_string(),
                password: "secret1".to_string(),
            },
        ];

        for command in &commands {
            assert_eq!(route_for(command).requires_auth(), command.requires_auth());
        }
    }
}
