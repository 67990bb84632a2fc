use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

pub const LOGIN_PATH: &str = "/login";

/// Role tag carried by an authenticated user.
///
/// Known tags get their own variant; anything else is kept verbatim (already
/// normalised) in `Other` so the set of roles stays open.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Executivo,
    Financeiro,
    Opec,
    User,
    Other(String),
}

impl Role {
    /// Trims and lower-cases `raw` before mapping it to a variant.
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().to_lowercase();

        match normalized.as_str() {
            "admin" => Role::Admin,
            "executivo" => Role::Executivo,
            "financeiro" => Role::Financeiro,
            "opec" => Role::Opec,
            "user" => Role::User,
            _ => Role::Other(normalized),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "admin",
            Role::Executivo => "executivo",
            Role::Financeiro => "financeiro",
            Role::Opec => "opec",
            Role::User => "user",
            Role::Other(tag) => tag,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    /// View a user of this role lands on when the requested one is off limits.
    pub fn default_landing(&self) -> &'static str {
        match self {
            Role::Admin => "/dashboard",
            Role::Executivo => "/pis",
            Role::Financeiro => "/faturamento",
            Role::Opec => "/entregas",
            Role::User | Role::Other(_) => LOGIN_PATH,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        Role::parse(value)
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Role::parse(&raw))
    }
}
