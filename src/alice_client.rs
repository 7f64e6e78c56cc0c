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
use std::time::Duration;

use reqwest::{header, Client, StatusCode, Url};
use serde_json::Value;
use thiserror::Error;
use log::{info, error, debug};

pub const DEFAULT_TRADES_ENDPOINT: &str = "https://ant.aliceblueonline.com/open-api/od/v1/trades";
pub const DEFAULT_SESSION_BASE_URL: &str = "https://ant.aliceblueonline.com";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Raw bodies that are not JSON get cut to this many characters.
pub const RAW_BODY_LIMIT: usize = 2000;

const TRADE_BOOK_PATH: &str = "/rest/AliceBlueAPIService/api/placeOrder/fetchTradeBook";

#[derive(Debug, Error)]
pub enum AliceError {
    #[error("Invalid credential format")]
    InvalidCredential,
    #[error("No token provided or found. Provide --token or --account")]
    MissingToken,
    #[error("HTTP error {status}: {message}")]
    HttpError { status: StatusCode, message: String },
    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("Output error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Connection error: {0}")]
    ConnectionError(String),
    #[error("Timeout error")]
    Timeout,
    #[error("Other error: {0}")]
    Other(String),
}

fn classify(e: reqwest::Error) -> AliceError {
    if e.is_timeout() {
        AliceError::Timeout
    } else if e.is_connect() {
        AliceError::ConnectionError(e.to_string())
    } else {
        AliceError::RequestError(e)
    }
}

pub(crate) fn build_client(timeout: Duration) -> Result<Client, AliceError> {
    Ok(Client::builder().timeout(timeout).build()?)
}

/// Shows only the ends of a token so logs never carry the full credential.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 16 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..8].iter().collect();
    let tail: String = chars[chars.len() - 8..].iter().collect();
    format!("{}...{}", head, tail)
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Raw(String),
}

impl ResponseBody {
    pub fn from_text(text: &str) -> Self {
        match serde_json::from_str::<Value>(text) {
            Ok(json) => Self::Json(json),
            Err(_) => Self::Raw(text.chars().take(RAW_BODY_LIMIT).collect()),
        }
    }
}

impl fmt::Display for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(json) => {
                let pretty = serde_json::to_string_pretty(json).map_err(|_| fmt::Error)?;
                write!(f, "{}", pretty)
            }
            Self::Raw(text) => write!(f, "{}", text),
        }
    }
}

/// Status and body of a trades request. Error statuses are kept as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpTradeBook {
    pub status: StatusCode,
    pub body: ResponseBody,
}

impl fmt::Display for HttpTradeBook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "HTTP {}", self.status.as_u16())?;
        write!(f, "{}", self.body)
    }
}

pub async fn fetch_with_token(
    client: &Client,
    endpoint: &str,
    token: &str,
) -> Result<HttpTradeBook, AliceError> {

    let url = Url::parse(endpoint).map_err(|e| AliceError::Other(e.to_string()))?;

    let bearer = header::HeaderValue::from_str(&format!("Bearer {}", token))
        .map_err(|_| AliceError::InvalidCredential)?;

    info!("Request: GET {} token={}", endpoint, mask_token(token));

    let response = client
        .get(url)
        .header(header::AUTHORIZATION, bearer)
        .header(header::ACCEPT, header::HeaderValue::from_static("application/json"))
        .send()
        .await
        .map_err(classify)?;

    let status = response.status();
    if !status.is_success() {
        debug!("Trades endpoint answered {}", status);
    }

    let text = response.text().await.map_err(classify)?;

    Ok(HttpTradeBook { status, body: ResponseBody::from_text(&text) })
}

/// Bearer-token access to the open API trades endpoint.
pub struct TokenAuth {
    pub(crate) endpoint: String,
    pub(crate) token: String,
    pub(crate) client: Client,
}

impl TokenAuth {
    pub fn new(endpoint: &str, token: &str, timeout: Duration) -> Result<Self, AliceError> {
        if token.is_empty() {
            return Err(AliceError::MissingToken);
        }

        Ok(Self {
            endpoint: endpoint.to_string(),
            token: token.to_string(),
            client: build_client(timeout)?,
        })
    }

    pub async fn get_trades(&self) -> Result<HttpTradeBook, AliceError> {
        fetch_with_token(&self.client, &self.endpoint, &self.token)
            .await
            .map_err(|e| {
                error!("Failed to get trades: {}", e);
                e
            })
    }
}

/// Vendor session flow: authenticates with username and session id.
pub struct AliceSession {
    pub(crate) base_url: String,
    pub(crate) headers: header::HeaderMap,
    pub(crate) client: Client,
}

impl AliceSession {
    /// Whether the vendor session flow was compiled in.
    pub fn available() -> bool {
        cfg!(feature = "session-api")
    }

    pub fn new(username: &str, session_id: &str, timeout: Duration) -> Result<Self, AliceError> {
        if username.is_empty() || session_id.is_empty() {
            return Err(AliceError::InvalidCredential);
        }

        let mut headers = header::HeaderMap::with_capacity(2);
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {} {}", username, session_id))
                .map_err(|_| AliceError::InvalidCredential)?,
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(Self {
            base_url: DEFAULT_SESSION_BASE_URL.to_string(),
            headers,
            client: build_client(timeout)?,
        })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub async fn get_trade_book(&self) -> Result<Value, AliceError> {
        let url = Url::parse(&format!("{}{}", self.base_url, TRADE_BOOK_PATH))
            .map_err(|e| AliceError::Other(e.to_string()))?;

        info!("Request: GET {}", TRADE_BOOK_PATH);

        let response = self.client
            .get(url)
            .headers(self.headers.clone())
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            error!("Failed to get trade book: HTTP {}", status);
            return Err(AliceError::HttpError { status, message });
        }

        Ok(response.json().await?)
    }
}
