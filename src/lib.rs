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

mod alice_client;
mod cli;
mod config;
mod source;
mod token_store;
mod trades;


pub use alice_client::*;
pub use cli::Cli;
pub use config::{Config, TOKENS_FILE};
pub use source::{run, select_source, TradeBook, TradeBookSource};
pub use token_store::{TokenEntry, TokenStore, TokenStoreError};
pub use trades::{normalize, Trade, DEFAULT_ACCOUNT};
