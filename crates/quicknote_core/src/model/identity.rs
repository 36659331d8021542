//! Self-asserted display identity for the session record.
//!
//! There is no credential here; "login" only records who the user says they
//! are.

use serde::Deserialize;
use serde_json::{Map, Value};

/// Display identity: `{email, name?}` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Identity {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl Identity {
    /// Builds an identity from form input.
    ///
    /// Returns `None` when `email` is blank. A blank `name` is dropped.
    pub fn new(email: &str, name: Option<&str>) -> Option<Self> {
        let email = email.trim();
        if email.is_empty() {
            return None;
        }
        let name = name
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);
        Some(Self {
            email: email.to_string(),
            name,
        })
    }

    /// Whether the record satisfies the presence rule.
    pub fn is_present(&self) -> bool {
        !self.email.trim().is_empty()
    }

    /// Session record payload. `name` is omitted when absent.
    pub fn to_json(&self) -> String {
        let mut record = Map::new();
        record.insert("email".to_string(), Value::String(self.email.clone()));
        if let Some(name) = &self.name {
            record.insert("name".to_string(), Value::String(name.clone()));
        }
        Value::Object(record).to_string()
    }

    /// Name to show in a header: the display name, else the email.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }
}

#[cfg(test)]
mod tests {
    use super::Identity;

    #[test]
    fn new_requires_email_and_trims_name() {
        assert_eq!(Identity::new("   ", Some("Ann")), None);
        let identity = Identity::new(" ann@example.com ", Some("  ")).unwrap();
        assert_eq!(identity.email, "ann@example.com");
        assert_eq!(identity.name, None);
        assert_eq!(identity.display_name(), "ann@example.com");
    }

    #[test]
    fn wire_shape_omits_missing_name() {
        let identity = Identity::new("a@b.c", None).unwrap();
        assert_eq!(identity.to_json(), r#"{"email":"a@b.c"}"#);

        let named = Identity::new("a@b.c", Some("Ann \"A\"")).unwrap();
        let decoded: Identity = serde_json::from_str(&named.to_json()).unwrap();
        assert_eq!(decoded, named);
    }
}
