mod routes;

pub use self::routes::{RouteDef, RouteTable, normalize_path};

use crate::{
    middleware::{AccessGate, GateDecision, post_login_destination},
    navigation::Navigator,
};
use shared::{
    abstract_trait::DynSessionStore,
    domain::{LOGIN_PATH, Role},
};
use std::sync::Arc;
use tracing::{info, warn};

/// Outcome of opening a location in the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Rendered { path: String, title: &'static str },
    Redirected { from: String, to: String },
    NotFound { path: String },
}

impl Navigation {
    pub fn location(&self) -> &str {
        match self {
            Navigation::Rendered { path, .. } => path,
            Navigation::Redirected { to, .. } => to,
            Navigation::NotFound { path } => path,
        }
    }
}

/// Route table, access gate and navigator wired together.
#[derive(Clone)]
pub struct AppRouter {
    routes: RouteTable,
    gate: AccessGate,
    session: DynSessionStore,
    navigator: Arc<Navigator>,
}

impl AppRouter {
    pub fn new(routes: RouteTable, session: DynSessionStore, navigator: Arc<Navigator>) -> Self {
        Self {
            routes,
            gate: AccessGate::new(session.clone()),
            session,
            navigator,
        }
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn navigator(&self) -> &Arc<Navigator> {
        &self.navigator
    }

    pub fn open(&self, location: &str) -> Navigation {
        let path = normalize_path(location);

        if path == "/" {
            return self.open_root();
        }

        let Some(route) = self.routes.resolve(&path) else {
            warn!("No view for {location}");
            return Navigation::NotFound {
                path: location.to_string(),
            };
        };

        if route.public {
            self.navigator.navigate(location);
            return Navigation::Rendered {
                path: location.to_string(),
                title: route.title,
            };
        }

        match self.gate.check(location, &route.requirement) {
            GateDecision::Render => {
                self.navigator.navigate(location);
                Navigation::Rendered {
                    path: location.to_string(),
                    title: route.title,
                }
            }
            GateDecision::RedirectToLogin { from } => {
                info!("Not logged in, sending {from} to {LOGIN_PATH}");
                self.navigator.redirect_to_login(Some(&from));
                Navigation::Redirected {
                    from,
                    to: LOGIN_PATH.to_string(),
                }
            }
            GateDecision::RedirectToLanding { to } => {
                info!("Role cannot open {location}, sending to {to}");
                self.navigator.navigate(&to);
                Navigation::Redirected {
                    from: location.to_string(),
                    to,
                }
            }
        }
    }

    /// Opens the location remembered before login, or the role's landing view.
    pub fn after_login(&self) -> Navigation {
        let from = self.navigator.take_return_to();
        let role = self
            .session
            .get_user()
            .map(|user| user.role)
            .unwrap_or(Role::User);

        self.open(&post_login_destination(from.as_deref(), &role))
    }

    fn open_root(&self) -> Navigation {
        match self.session.get_user() {
            Some(user) => self.open(user.role.default_landing()),
            None => {
                self.navigator.redirect_to_login(None);
                Navigation::Redirected {
                    from: "/".to_string(),
                    to: LOGIN_PATH.to_string(),
                }
            }
        }
    }
}
