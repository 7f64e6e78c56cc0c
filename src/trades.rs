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

// Flattens the different trade book shapes into one row format.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_ACCOUNT: &str = "Master";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: String,
    pub timestamp: Option<String>,
    pub account: String,
    pub symbol: String,
    #[serde(rename = "type")]
    pub type_: String,
    pub side: String,
    pub quantity: f64,
    pub traded_qty: f64,
    pub price: f64,
    pub status: String,
}

// First alias holding a non-empty, non-zero value.
fn first<'a>(trade: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| trade.get(*key))
        .find(|value| match value {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::String(s) => !s.is_empty(),
            Value::Number(n) => n.as_f64().map_or(false, |f| f != 0.0),
            _ => true,
        })
}

fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn text_or(trade: &Value, keys: &[&str], fallback: &str) -> String {
    first(trade, keys).map(as_text).unwrap_or_else(|| fallback.to_string())
}

fn number(trade: &Value, keys: &[&str]) -> f64 {
    first(trade, keys)
        .and_then(|value| match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        })
        .unwrap_or(0.0)
}

fn rows(payload: &Value) -> &[Value] {
    [payload.get("trades"), payload.get("data"), Some(payload)]
        .into_iter()
        .flatten()
        .find_map(|value| value.as_array())
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

pub fn normalize(payload: &Value, account: Option<&str>) -> Vec<Trade> {
    let account = account.unwrap_or(DEFAULT_ACCOUNT);

    rows(payload)
        .iter()
        .enumerate()
        .map(|(idx, trade)| Trade {
            id: first(trade, &["id", "tradeId"])
                .map(as_text)
                .unwrap_or_else(|| format!("{}-{}", account, idx)),
            timestamp: first(trade, &["timestamp", "time", "createdAt"]).map(as_text),
            account: account.to_string(),
            symbol: text_or(trade, &["symbol", "instrument", "scrip", "scriptName"], ""),
            type_: text_or(trade, &["type", "product"], "Market"),
            side: text_or(trade, &["side", "buySell", "transactionType"], "Buy"),
            quantity: number(trade, &["quantity", "qty"]),
            traded_qty: number(trade, &["tradedQty", "filledQty", "quantity", "qty"]),
            price: number(trade, &["price", "rate", "fillPrice"]),
            status: text_or(trade, &["status"], "Filled"),
        })
        .collect()
}
