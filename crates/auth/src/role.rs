use serde::{Deserialize, Serialize};

/// Application role, as stored on a profile record.
///
/// Role values arrive from the backend as raw strings; anything outside this
/// set is an "unrecognized role" and must be routed to the error view rather
/// than mapped to a fallback dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Cliente,
    Usuario,
}

impl Role {
    /// Parse a raw role value. Returns `None` for unrecognized values;
    /// callers decide how to surface that, never this type.
    pub fn parse(raw: &str) -> Option<Role> {
        match raw {
            "admin" => Some(Role::Admin),
            "cliente" => Some(Role::Cliente),
            "usuario" => Some(Role::Usuario),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Cliente => "cliente",
            Role::Usuario => "usuario",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_recognized_values() {
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse("cliente"), Some(Role::Cliente));
        assert_eq!(Role::parse("usuario"), Some(Role::Usuario));
    }

    #[test]
    fn rejects_unknown_values() {
        assert_eq!(Role::parse(""), None);
        assert_eq!(Role::parse("Admin"), None);
        assert_eq!(Role::parse("superuser"), None);
    }
}
