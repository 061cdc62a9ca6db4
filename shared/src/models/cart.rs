//! Cart Model

use serde::{Deserialize, Serialize};

/// Cart line joined with the product it refers to
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CartLine {
    pub id: i64,
    pub user_id: i64,
    pub appliance_id: i64,
    pub quantity: i32,
    pub name: String,
    pub price: f64,
    pub photo_path: Option<String>,
}

/// Add-to-cart payload; repeated adds increment the existing line
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub appliance_id: i64,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

fn default_quantity() -> i32 {
    1
}

/// Set-quantity payload; a quantity of zero or less removes the line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCartRequest {
    pub quantity: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_to_cart_defaults_quantity() {
        let req: AddToCartRequest = serde_json::from_str(r#"{"applianceId": 9}"#).unwrap();
        assert_eq!(req.appliance_id, 9);
        assert_eq!(req.quantity, 1);
    }
}
