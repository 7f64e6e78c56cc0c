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

use std::path::PathBuf;
use std::time::Duration;

use crate::alice_client::{AliceError, REQUEST_TIMEOUT};
use crate::cli::Cli;

pub const TOKENS_FILE: &str = "tokens.json";

/// Settings resolved once at startup and handed to whoever needs them.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub endpoint: String,
    pub session_base_url: String,
    pub timeout: Duration,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Result<Self, AliceError> {
        let data_dir = match &cli.data_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()
                .map_err(|e| AliceError::Other(e.to_string()))?
                .join(".data"),
        };

        Ok(Self {
            data_dir,
            endpoint: cli.endpoint.clone(),
            session_base_url: cli.session_url.clone(),
            timeout: REQUEST_TIMEOUT,
        })
    }

    pub fn tokens_file(&self) -> PathBuf {
        self.data_dir.join(TOKENS_FILE)
    }
}
