//! Role Model

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Account role, assigned by the server and read-only on the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Admin,
    Stylist,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::User, Role::Admin, Role::Stylist];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Admin => "ADMIN",
            Self::Stylist => "STYLIST",
        }
    }

    /// Admins and stylists work the salon; users book it
    pub fn is_staff(&self) -> bool {
        matches!(self, Self::Admin | Self::Stylist)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown role string
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
        match s.to_ascii_uppercase().as_str() {
            "USER" => Ok(Self::User),
            "ADMIN" => Ok(Self::Admin),
            "STYLIST" => Ok(Self::Stylist),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}
