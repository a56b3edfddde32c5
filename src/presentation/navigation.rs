//! Routes, the authentication guard and the session-event subscriber.

use tracing::{debug, info};

use crate::application::NotificationManager;
use crate::application::services::{SessionState, SessionStore};
use crate::domain::{SessionEvent, SessionEventReceiver};

/// Screen the CLI is acting as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Public entry point.
    Landing,
    /// Sign-in form.
    Login,
    /// Sign-up form.
    Register,
    /// Everything behind authentication.
    Dashboard,
}

impl Route {
    /// Whether the route needs a signed-in session.
    #[must_use]
    pub const fn requires_auth(self) -> bool {
        matches!(self, Self::Dashboard)
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Landing => "/",
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Dashboard => "/dashboard",
        };
        f.write_str(name)
    }
}

/// Route guard.
pub struct Navigator;

impl Navigator {
    /// Returns the route actually shown for a request.
    #[must_use]
    pub const fn guard(requested: Route, session: &SessionState) -> Route {
        if requested.requires_auth() && !session.is_authenticated {
            Route::Login
        } else {
            requested
        }
    }
}

/// Sole subscriber to [`SessionEvent`]s.
pub struct NavigationController {
    events: SessionEventReceiver,
    route: Route,
}

impl NavigationController {
    /// Starts on the landing route.
    #[must_use]
    pub const fn new(events: SessionEventReceiver) -> Self {
        Self {
            events,
            route: Route::Landing,
        }
    }

    /// Current route.
    #[must_use]
    pub const fn route(&self) -> Route {
        self.route
    }

    /// Moves to `requested`, or to Login when the guard refuses it.
    pub fn navigate(&mut self, requested: Route, session: &SessionState) -> Route {
        self.route = Navigator::guard(requested, session);
        if self.route != requested {
            debug!(requested = %requested, route = %self.route, "Navigation redirected");
        }
        self.route
    }

    /// Reacts to every pending event. Returns whether the session was invalidated.
    pub async fn process_events(
        &mut self,
        session: &SessionStore,
        notifications: &mut NotificationManager,
    ) -> bool {
        let mut invalidated = false;

        while let Ok(event) = self.events.try_recv() {
            match event {
                SessionEvent::Invalidated { status } => {
                    let was_authenticated = session.is_authenticated();
                    info!(status, was_authenticated, "Session invalidated by backend");

                    session.logout().await;
                    self.route = Route::Login;

                    if was_authenticated && !invalidated {
                        notifications.warn("Session expired", "Please log in again");
                    }
                    invalidated = true;
                }
            }
        }

        invalidated
    }
}
