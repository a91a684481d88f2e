use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::Sale;

/// One cart line of an order request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    /// Product id
    pub id: u64,
    /// Requested quantity
    pub quantity: u32,
}

/// An order request: the submitted cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRequest {
    /// Cart lines, processed in input order
    pub items: Vec<OrderLine>,
}

/// The aggregate result of a placed order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    /// Order id: the id of the first sale line created
    pub id: u64,
    /// Buyer's user id
    pub user_id: u64,
    /// Buyer's display name
    pub user_name: String,
    /// The sale records created for this order, one per cart line
    pub items: Vec<Sale>,
    /// Sum of the line totals
    pub total: f64,
    /// Timestamp shared by all lines of the order
    pub date: DateTime<Utc>,
}
