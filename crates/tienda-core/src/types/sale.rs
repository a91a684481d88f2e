use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::Record;

/// One product/quantity sold to one user. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    /// Unique sale id
    pub id: u64,
    /// Buyer's user id
    pub user_id: u64,
    /// Sold product's id
    pub product_id: u64,
    /// Units sold
    pub quantity: u32,
    /// Line total: unit price at sale time × quantity
    pub total: f64,
    /// When the sale was recorded
    pub date: DateTime<Utc>,
}

impl Record for Sale {
    fn id(&self) -> u64 {
        self.id
    }
}

/// A sale enriched with the referenced product's name and image, as returned
/// by the my-orders listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleWithProduct {
    /// The underlying sale record
    #[serde(flatten)]
    pub sale: Sale,
    /// Product name, if the product still exists
    pub product_name: Option<String>,
    /// Product image, if the product still exists
    pub product_image: Option<String>,
}
