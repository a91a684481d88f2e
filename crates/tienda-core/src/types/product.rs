use serde::{Deserialize, Serialize};

use crate::types::Record;

/// A catalog product.
///
/// Stock is the only routinely mutated field (decremented on order
/// placement); price can be changed by an admin. Products are never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique product id
    pub id: u64,
    /// Display name
    pub name: String,
    /// Category label; the distinct set of these backs the categories listing
    pub category: String,
    /// Unit price
    pub price: f64,
    /// Units currently in stock
    pub stock: u32,
    /// Image path or URL shown by the storefront
    pub image: String,
}

impl Record for Product {
    fn id(&self) -> u64 {
        self.id
    }
}
