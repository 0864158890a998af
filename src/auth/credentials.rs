//! Configured accounts and Basic credential checking.

use super::{Principal, Role};
use crate::config::AccountConfig;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use sha2::{Digest, Sha256};
use std::collections::HashMap;

struct StoredAccount {
    password_digest: [u8; 32],
    role: Role,
}

/// Username → (SHA-256 of password, role). Plaintext passwords are dropped after construction.
pub struct CredentialStore {
    accounts: HashMap<String, StoredAccount>,
}

fn digest(password: &str) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Sha256::digest(password.as_bytes()));
    out
}

impl CredentialStore {
    pub fn new(accounts: &[AccountConfig]) -> Self {
        let accounts = accounts
            .iter()
            .map(|a| {
                (
                    a.username.clone(),
                    StoredAccount {
                        password_digest: digest(&a.password),
                        role: a.role,
                    },
                )
            })
            .collect();
        CredentialStore { accounts }
    }

    /// Check a username/password pair. `None` for unknown users and wrong passwords alike.
    pub fn authenticate(&self, username: &str, password: &str) -> Option<Principal> {
        let account = self.accounts.get(username)?;
        let presented = digest(password);
        // Compare every byte regardless of where the first mismatch is.
        let diff = account
            .password_digest
            .iter()
            .zip(presented.iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b));
        (diff == 0).then(|| Principal {
            username: username.to_string(),
            role: account.role,
        })
    }
}

/// Parse an `Authorization: Basic <base64(user:pass)>` header value.
pub fn parse_basic(header: &str) -> Option<(String, String)> {
    let (scheme, encoded) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (user, pass) = decoded.split_once(':')?;
    Some((user.to_string(), pass.to_string()))
}
