//! Local storefront state
//!
//! Two independent containers mirrored to JSON files under the state
//! directory: the authenticated session and the shopping cart. Either file
//! may be absent; absence means "logged out" / "empty cart".

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use tienda_core::types::{OrderLine, OrderRequest, Product, UserProfile};

const SESSION_FILE: &str = "session.json";
const CART_FILE: &str = "cart.json";

/// The authenticated session: the logged-in user and their bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// The logged-in account
    pub user: UserProfile,
    /// Bearer token presented on protected requests
    pub token: String,
}

impl Session {
    /// Load the session, if one is stored.
    pub async fn load(state_dir: &Path) -> Result<Option<Session>> {
        read_json(state_dir.join(SESSION_FILE)).await
    }

    /// Store the session.
    pub async fn save(&self, state_dir: &Path) -> Result<()> {
        write_json(state_dir, state_dir.join(SESSION_FILE), self).await
    }

    /// Forget the session (logout).
    pub async fn clear(state_dir: &Path) -> Result<()> {
        remove_if_present(state_dir.join(SESSION_FILE)).await
    }
}

/// One cart line: the product as last fetched, plus the chosen quantity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    /// Product snapshot from the last fetch
    #[serde(flatten)]
    pub product: Product,
    /// Chosen quantity, capped at the snapshot's stock
    pub quantity: u32,
}

/// The shopping cart.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    /// Cart lines, one per product
    pub lines: Vec<CartLine>,
}

impl Cart {
    /// Load the cart; a missing file is an empty cart.
    pub async fn load(state_dir: &Path) -> Result<Cart> {
        Ok(read_json(state_dir.join(CART_FILE)).await?.unwrap_or_default())
    }

    /// Store the cart.
    pub async fn save(&self, state_dir: &Path) -> Result<()> {
        write_json(state_dir, state_dir.join(CART_FILE), self).await
    }

    /// Remove the cart file (after checkout or an explicit clear).
    pub async fn clear(state_dir: &Path) -> Result<()> {
        remove_if_present(state_dir.join(CART_FILE)).await
    }

    /// Add `quantity` of a freshly fetched product, merging with an existing
    /// line for the same product. The line quantity is capped at the
    /// product's last-fetched stock; returns the resulting quantity.
    pub fn add(&mut self, product: Product, quantity: u32) -> u32 {
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product.id == product.id)
        {
            line.quantity = (line.quantity + quantity).min(product.stock);
            // refresh the snapshot; price or stock may have changed
            line.product = product;
            return line.quantity;
        }
        let capped = quantity.min(product.stock);
        self.lines.push(CartLine {
            product,
            quantity: capped,
        });
        capped
    }

    /// Drop the line for a product, if present.
    pub fn remove(&mut self, product_id: u64) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.product.id != product_id);
        self.lines.len() != before
    }

    /// True when the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of price × quantity over all lines, at last-fetched prices.
    pub fn total(&self) -> f64 {
        self.lines
            .iter()
            .map(|line| line.product.price * f64::from(line.quantity))
            .sum()
    }

    /// The order request this cart submits at checkout.
    pub fn to_order_request(&self) -> OrderRequest {
        OrderRequest {
            items: self
                .lines
                .iter()
                .map(|line| OrderLine {
                    id: line.product.id,
                    quantity: line.quantity,
                })
                .collect(),
        }
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(path: PathBuf) -> Result<Option<T>> {
    match tokio::fs::read_to_string(&path).await {
        Ok(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}

async fn write_json<T: Serialize>(state_dir: &Path, path: PathBuf, value: &T) -> Result<()> {
    tokio::fs::create_dir_all(state_dir).await?;
    tokio::fs::write(path, serde_json::to_string_pretty(value)?).await?;
    Ok(())
}

async fn remove_if_present(path: PathBuf) -> Result<()> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err.into()),
    }
}
