//! Stock adjustment Model

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Admin-driven stock change direction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StockOperation {
    Add,
    /// Clamped at zero, never rejected
    Remove,
}

impl StockOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Remove => "remove",
        }
    }
}

impl FromStr for StockOperation {
    type Err = String;

    /// Exact match only: `"Add"` or `" add"` are not operations.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(Self::Add),
            "remove" => Ok(Self::Remove),
            other => Err(format!("invalid stock operation: {other}")),
        }
    }
}

/// Stock adjustment payload
///
/// `operation` is kept as a string so that anything outside add/remove is
/// reported as an invalid operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockAdjustRequest {
    pub operation: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockAdjustResponse {
    pub success: bool,
    pub new_stock: i64,
}
