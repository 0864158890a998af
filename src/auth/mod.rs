//! HTTP Basic authentication and the static role policy for `/api/**`.

mod credentials;
mod middleware;
mod policy;

pub use credentials::{parse_basic, CredentialStore};
pub use middleware::require_auth;
pub use policy::required_role;

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Read-only access.
    User,
    /// Read and write access.
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }

    /// Whether an account holding `self` may call an endpoint that requires `required`.
    pub fn satisfies(self, required: Role) -> bool {
        match required {
            Role::User => true,
            Role::Admin => self == Role::Admin,
        }
    }
}

/// The authenticated account of the current request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Principal {
    pub username: String,
    pub role: Role,
}
