use crate::domain::role::Role;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    pub email: String,
    pub role: Role,
    #[serde(default, alias = "nome")]
    pub name: String,
}

impl UserProfile {
    pub fn new(id: impl Into<String>, email: impl Into<String>, role: Role, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            role,
            name: name.into(),
        }
    }

    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.email
        } else {
            &self.name
        }
    }
}

// the API sends numeric ids, older stored profiles carry strings
fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(id) => Ok(id),
        Value::Number(id) => Ok(id.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "user id must be a string or number, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_numeric_and_string_ids() {
        let numeric: UserProfile = serde_json::from_value(json!({
            "id": 42,
            "email": "ana@example.com",
            "role": "Executivo",
            "name": "Ana"
        }))
        .unwrap();
        assert_eq!(numeric.id, "42");
        assert_eq!(numeric.role, Role::Executivo);

        let text: UserProfile = serde_json::from_value(json!({
            "id": "u-7",
            "email": "bia@example.com",
            "role": "opec",
            "nome": "Bia"
        }))
        .unwrap();
        assert_eq!(text.id, "u-7");
        assert_eq!(text.name, "Bia");
    }

    #[test]
    fn rejects_structured_ids() {
        let result = serde_json::from_value::<UserProfile>(json!({
            "id": {"nested": true},
            "email": "x@example.com",
            "role": "admin"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn display_name_falls_back_to_email() {
        let user = UserProfile::new("1", "carla@example.com", Role::Admin, " ");
        assert_eq!(user.display_name(), "carla@example.com");
    }
}
