pub mod guard;

pub use self::guard::{AccessGate, GateDecision, RoleRequirement, evaluate, post_login_destination};
