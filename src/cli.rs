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

use clap::Parser;

use crate::alice_client::{DEFAULT_SESSION_BASE_URL, DEFAULT_TRADES_ENDPOINT};

#[derive(Parser, Debug, Clone)]
#[command(name = "fetch_trades")]
#[command(about = "Fetch the Alice Blue trade book for debugging")]
#[command(version)]
pub struct Cli {
    /// Alice Blue username (vendor session flow)
    #[arg(long)]
    pub username: Option<String>,

    /// Session id for the vendor session flow
    #[arg(long)]
    pub session: Option<String>,

    /// Direct bearer token
    #[arg(long)]
    pub token: Option<String>,

    /// Account id to look up in the token store
    #[arg(long)]
    pub account: Option<String>,

    /// Override trades endpoint
    #[arg(long, env = "ALICE_TRADES_ENDPOINT", default_value = DEFAULT_TRADES_ENDPOINT)]
    pub endpoint: String,

    /// Base URL of the vendor session service
    #[arg(long, env = "ALICE_SESSION_BASE_URL", default_value = DEFAULT_SESSION_BASE_URL)]
    pub session_url: String,

    /// Directory holding tokens.json (defaults to ./.data)
    #[arg(long, env = "DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Print normalized trade rows instead of the raw payload
    #[arg(long)]
    pub normalize: bool,
}
