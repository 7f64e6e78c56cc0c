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

use std::fmt;
use std::io::Write;
use std::process::ExitCode;

use async_trait::async_trait;
use serde_json::Value;
use log::{info, error};

use crate::alice_client::{AliceError, AliceSession, HttpTradeBook, ResponseBody, TokenAuth};
use crate::cli::Cli;
use crate::config::Config;
use crate::token_store::TokenStore;
use crate::trades;

#[derive(Debug, Clone, PartialEq)]
pub enum TradeBook {
    /// Payload returned by the vendor session flow.
    Session(Value),
    Http(HttpTradeBook),
}

impl TradeBook {
    /// Replaces any JSON payload with normalized trade rows. Raw bodies pass through.
    pub fn normalized(self, account: Option<&str>) -> Result<Self, AliceError> {
        let rows = |payload: &Value| serde_json::to_value(trades::normalize(payload, account));

        Ok(match self {
            Self::Session(payload) => Self::Session(rows(&payload)?),
            Self::Http(HttpTradeBook { status, body: ResponseBody::Json(payload) }) => {
                Self::Http(HttpTradeBook { status, body: ResponseBody::Json(rows(&payload)?) })
            }
            other => other,
        })
    }
}

impl fmt::Display for TradeBook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Session(payload) => {
                let pretty = serde_json::to_string_pretty(payload).map_err(|_| fmt::Error)?;
                write!(f, "{}", pretty)
            }
            Self::Http(book) => write!(f, "{}", book),
        }
    }
}

#[async_trait]
pub trait TradeBookSource: Send + Sync {
    fn name(&self) -> &'static str;

    async fn trade_book(&self) -> Result<TradeBook, AliceError>;
}

#[async_trait]
impl TradeBookSource for AliceSession {
    fn name(&self) -> &'static str {
        "vendor session"
    }

    async fn trade_book(&self) -> Result<TradeBook, AliceError> {
        Ok(TradeBook::Session(self.get_trade_book().await?))
    }
}

#[async_trait]
impl TradeBookSource for TokenAuth {
    fn name(&self) -> &'static str {
        "direct http"
    }

    async fn trade_book(&self) -> Result<TradeBook, AliceError> {
        Ok(TradeBook::Http(self.get_trades().await?))
    }
}

/// Picks the credential path. The vendor session wins when it is available and
/// both username and session were given; otherwise a direct token, then the store.
pub fn select_source(
    cli: &Cli,
    config: &Config,
    vendor_available: bool,
) -> Result<Box<dyn TradeBookSource>, AliceError> {

    if vendor_available {
        let username = cli.username.as_deref().filter(|u| !u.is_empty());
        let session = cli.session.as_deref().filter(|s| !s.is_empty());
        if let (Some(username), Some(session)) = (username, session) {
            info!("Using vendor session flow");
            let session = AliceSession::new(username, session, config.timeout)?
                .with_base_url(&config.session_base_url);
            return Ok(Box::new(session));
        }
    }

    let token = cli.token.clone()
        .filter(|t| !t.is_empty())
        .or_else(|| {
            cli.account
                .as_deref()
                .and_then(|account| TokenStore::new(config.tokens_file()).resolve(account))
                .filter(|t| !t.is_empty())
        });

    match token {
        Some(token) => Ok(Box::new(TokenAuth::new(&config.endpoint, &token, config.timeout)?)),
        None => {
            error!("{}", AliceError::MissingToken);
            Err(AliceError::MissingToken)
        }
    }
}

/// Whole command: select a source, fetch, print to `out`. A missing token is
/// exit status 2 and never reaches the network.
pub async fn run(
    cli: Cli,
    vendor_available: bool,
    out: &mut dyn Write,
) -> Result<ExitCode, AliceError> {

    let config = Config::from_cli(&cli)?;

    let source = match select_source(&cli, &config, vendor_available) {
        Ok(source) => source,
        Err(AliceError::MissingToken) => return Ok(ExitCode::from(2)),
        Err(e) => return Err(e),
    };

    info!("Fetching trade book via {}", source.name());
    let mut book = source.trade_book().await?;

    if cli.normalize {
        book = book.normalized(cli.account.as_deref())?;
    }

    writeln!(out, "{}", book)?;

    Ok(ExitCode::SUCCESS)
}
