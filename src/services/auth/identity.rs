/*
 * Responsibility
 * - 認証済み主体 (Identity) と Role の定義
 * - users.role カラムの文字列 <-> Role の変換
 */
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Host,
    Listener,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Host => "Host",
            Role::Listener => "Listener",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role: {}", self.0)
    }
}

impl std::error::Error for UnknownRole {}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Host" => Ok(Role::Host),
            "Listener" => Ok(Role::Listener),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Who is making the call.
///
/// Only ever built from a user row whose id came out of a verified credential
/// (or from the row itself right after login / account creation).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub id: i64,
    pub role: Role,
}

impl Identity {
    pub fn new(id: i64, role: Role) -> Self {
        Self { id, role }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_column_values() {
        assert_eq!("Host".parse::<Role>(), Ok(Role::Host));
        assert_eq!("Listener".parse::<Role>(), Ok(Role::Listener));
        assert_eq!(
            "host".parse::<Role>(),
            Err(UnknownRole("host".to_string()))
        );
    }

    #[test]
    fn role_serializes_as_column_value() {
        let json = serde_json::to_string(&Role::Listener).unwrap();
        assert_eq!(json, "\"Listener\"");
        assert_eq!(Role::Host.to_string(), "Host");
    }
}
