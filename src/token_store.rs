// Copyright (C) 2025  Jimmy Aguilar Mena

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

use std::io;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::{Map, Value};
use thiserror::Error;
use log::{debug, warn};

#[derive(Debug, Error)]
pub enum TokenStoreError {
    #[error("{} not found", .0.display())]
    NotFound(PathBuf),
    #[error("Failed reading tokens file {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("Failed reading tokens file {}: {source}", path.display())]
    Parse { path: PathBuf, source: serde_json::Error },
    #[error("No token entry for account {account} in {}", path.display())]
    UnknownAccount { account: String, path: PathBuf },
    #[error("Failed reading tokens file {}: entry for account {account} is not an object", path.display())]
    MalformedEntry { account: String, path: PathBuf },
    #[error("Token entry for account {account} has no token field")]
    MissingToken { account: String },
}

/// One account record, as written by the process that performs the login.
/// Only `token` matters for a lookup; the rest is read on a best-effort basis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenEntry {
    pub token: Option<String>,
    pub has_refresh_token: bool,
    // Both in milliseconds since the epoch
    pub expires_at: Option<f64>,
    pub updated_at: Option<f64>,
}

impl TokenEntry {
    fn from_fields(fields: &Map<String, Value>) -> Self {
        let text = |key: &str| fields.get(key).and_then(Value::as_str).map(str::to_string);
        let millis = |key: &str| fields.get(key).and_then(Value::as_f64);

        Self {
            token: text("token"),
            has_refresh_token: text("refreshToken").is_some_and(|t| !t.is_empty()),
            expires_at: millis("expiresAt"),
            updated_at: millis("updatedAt"),
        }
    }

    pub fn is_expired_at(&self, now_ms: f64) -> bool {
        self.expires_at.is_some_and(|exp| exp <= now_ms)
    }
}

/// Read-only view over `tokens.json`. The file is reloaded on every lookup.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Result<Map<String, Value>, TokenStoreError> {
        let raw = std::fs::read_to_string(&self.path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                TokenStoreError::NotFound(self.path.clone())
            } else {
                TokenStoreError::Read { path: self.path.clone(), source: e }
            }
        })?;

        serde_json::from_str(&raw)
            .map_err(|e| TokenStoreError::Parse { path: self.path.clone(), source: e })
    }

    /// Only the requested account is inspected; other entries may hold anything.
    pub fn entry(&self, account: &str) -> Result<TokenEntry, TokenStoreError> {
        match self.load()?.remove(account) {
            None | Some(Value::Null) => Err(TokenStoreError::UnknownAccount {
                account: account.to_string(),
                path: self.path.clone(),
            }),
            Some(Value::Object(fields)) => Ok(TokenEntry::from_fields(&fields)),
            Some(_) => Err(TokenStoreError::MalformedEntry {
                account: account.to_string(),
                path: self.path.clone(),
            }),
        }
    }

    pub fn lookup(&self, account: &str) -> Result<String, TokenStoreError> {
        let entry = self.entry(account)?;

        if entry.is_expired_at(now_millis()) {
            let hint = if entry.has_refresh_token { " (a refresh token is stored)" } else { "" };
            warn!("Token for account {} is past its expiry, using it anyway{}", account, hint);
        }
        if let Some(updated) = entry.updated_at {
            debug!("Token for account {} last updated at {}", account, updated);
        }

        entry.token.ok_or_else(|| TokenStoreError::MissingToken { account: account.to_string() })
    }

    /// Like `lookup`, but any failure is reported and turned into `None`.
    pub fn resolve(&self, account: &str) -> Option<String> {
        match self.lookup(account) {
            Ok(token) => Some(token),
            Err(e) => {
                warn!("{}", e);
                None
            }
        }
    }
}

fn now_millis() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as f64)
        .unwrap_or(0.0)
}
