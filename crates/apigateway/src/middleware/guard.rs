use shared::{
    abstract_trait::DynSessionStore,
    domain::{LOGIN_PATH, Role, Session},
};
use tracing::debug;

/// Roles allowed into a view. Admin is accepted by every requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleRequirement {
    Any,
    One(Role),
    AnyOf(Vec<Role>),
}

impl RoleRequirement {
    pub fn one(role: &str) -> Self {
        RoleRequirement::One(Role::parse(role))
    }

    pub fn any_of<'a>(roles: impl IntoIterator<Item = &'a str>) -> Self {
        RoleRequirement::AnyOf(roles.into_iter().map(Role::parse).collect())
    }

    pub fn is_satisfied_by(&self, role: &Role) -> bool {
        if role.is_admin() {
            return true;
        }

        match self {
            RoleRequirement::Any => true,
            RoleRequirement::One(required) => required == role,
            RoleRequirement::AnyOf(allowed) => allowed.contains(role),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Render,
    /// No session; `from` is where the user wanted to go.
    RedirectToLogin { from: String },
    /// Logged in but the role does not fit; `to` is the role's landing view.
    RedirectToLanding { to: String },
}

impl GateDecision {
    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            GateDecision::Render => None,
            GateDecision::RedirectToLogin { .. } => Some(LOGIN_PATH),
            GateDecision::RedirectToLanding { to } => Some(to),
        }
    }
}

/// Decides whether `requested` may be rendered for `session`.
pub fn evaluate(session: &Session, requested: &str, requirement: &RoleRequirement) -> GateDecision {
    if !session.is_authenticated() {
        return GateDecision::RedirectToLogin {
            from: requested.to_string(),
        };
    }

    if matches!(requirement, RoleRequirement::Any) {
        return GateDecision::Render;
    }

    match session.user().map(|user| &user.role) {
        Some(role) if requirement.is_satisfied_by(role) => GateDecision::Render,
        Some(role) => GateDecision::RedirectToLanding {
            to: role.default_landing().to_string(),
        },
        None => GateDecision::RedirectToLanding {
            to: LOGIN_PATH.to_string(),
        },
    }
}

/// Where to go right after a successful login.
pub fn post_login_destination(from: Option<&str>, role: &Role) -> String {
    match from.map(str::trim) {
        Some(from) if !from.is_empty() && !is_login(from) => from.to_string(),
        _ => role.default_landing().to_string(),
    }
}

fn is_login(location: &str) -> bool {
    let path = location.split(['?', '#']).next().unwrap_or(location);
    path.trim_end_matches('/') == LOGIN_PATH
}

/// Route guard reading the session store on every check.
#[derive(Clone)]
pub struct AccessGate {
    session: DynSessionStore,
}

impl AccessGate {
    pub fn new(session: DynSessionStore) -> Self {
        Self { session }
    }

    pub fn check(&self, requested: &str, requirement: &RoleRequirement) -> GateDecision {
        let decision = evaluate(&self.session.session(), requested, requirement);
        debug!("Access gate for {requested}: {:?}", decision);
        decision
    }
}
