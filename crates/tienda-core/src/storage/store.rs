//! The repository over the three collections
//!
//! One `Store` is shared across all request handlers. Each collection sits
//! behind its own `RwLock`; mutations hold the write lock across
//! validate-mutate-persist, so readers of other collections are never
//! stalled by a slow disk write.
//!
//! Lock order wherever more than one collection is touched:
//! users before products before sales.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use tokio::sync::RwLock;
use tracing::info;

use crate::storage::JsonCollection;
use crate::types::{
    Error, NewUser, OrderLine, OrderSummary, Product, ProfileUpdate, Result, Role, Sale,
    SaleWithProduct, User,
};

/// File names under the data directory.
pub const PRODUCTS_FILE: &str = "products.json";
/// Users collection file name.
pub const USERS_FILE: &str = "users.json";
/// Sales collection file name.
pub const SALES_FILE: &str = "sales.json";

/// The JSON-file-backed repository for products, users and sales.
pub struct Store {
    products: RwLock<JsonCollection<Product>>,
    users: RwLock<JsonCollection<User>>,
    sales: RwLock<JsonCollection<Sale>>,
}

impl Store {
    /// Open the store from a data directory containing the three collection
    /// files.
    pub async fn open(data_dir: &Path) -> Result<Self> {
        let products = JsonCollection::load(data_dir.join(PRODUCTS_FILE)).await?;
        let users = JsonCollection::load(data_dir.join(USERS_FILE)).await?;
        let sales = JsonCollection::load(data_dir.join(SALES_FILE)).await?;
        Ok(Self {
            products: RwLock::new(products),
            users: RwLock::new(users),
            sales: RwLock::new(sales),
        })
    }

    // ---- catalog (read-only) ----

    /// All products.
    pub async fn list_products(&self) -> Vec<Product> {
        self.products.read().await.items().to_vec()
    }

    /// One product by id.
    pub async fn get_product(&self, id: u64) -> Result<Product> {
        self.products
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("product {id} not found")))
    }

    /// Distinct category values, sorted.
    pub async fn list_categories(&self) -> Vec<String> {
        let products = self.products.read().await;
        let categories: BTreeSet<&str> = products
            .items()
            .iter()
            .map(|product| product.category.as_str())
            .collect();
        categories.into_iter().map(str::to_string).collect()
    }

    /// Number of products.
    pub async fn product_count(&self) -> usize {
        self.products.read().await.len()
    }

    // ---- users ----

    /// Create a user account with the `customer` role.
    ///
    /// Fails with a conflict when the email is already taken (compared
    /// case-insensitively, the same rule the login lookup uses).
    pub async fn register_user(&self, new_user: NewUser) -> Result<User> {
        let mut users = self.users.write().await;
        if users
            .items()
            .iter()
            .any(|user| user.email.eq_ignore_ascii_case(&new_user.email))
        {
            return Err(Error::Conflict(format!(
                "email {} is already registered",
                new_user.email
            )));
        }

        let user = User {
            id: users.allocate_id(),
            name: new_user.name,
            email: new_user.email,
            password_hash: new_user.password_hash,
            phone: new_user.phone,
            address: new_user.address,
            role: Role::Customer,
        };
        users.push(user.clone());
        users.persist().await?;
        info!(user_id = user.id, "registered user");
        Ok(user)
    }

    /// Look a user up by email, case-insensitively.
    pub async fn find_user_by_email(&self, email: &str) -> Option<User> {
        self.users
            .read()
            .await
            .items()
            .iter()
            .find(|user| user.email.eq_ignore_ascii_case(email))
            .cloned()
    }

    /// One user by id.
    pub async fn get_user(&self, id: u64) -> Result<User> {
        self.users
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("user {id} not found")))
    }

    /// Update a user's own profile fields (name, phone, address).
    pub async fn update_profile(&self, id: u64, update: ProfileUpdate) -> Result<User> {
        let mut users = self.users.write().await;
        {
            let user = users
                .get_mut(id)
                .ok_or_else(|| Error::NotFound(format!("user {id} not found")))?;
            if let Some(name) = update.name {
                user.name = name;
            }
            if let Some(phone) = update.phone {
                user.phone = Some(phone);
            }
            if let Some(address) = update.address {
                user.address = Some(address);
            }
        }
        users.persist().await?;
        users
            .get(id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("user {id} not found")))
    }

    /// Delete a user, refusing while any sale references the id.
    pub async fn delete_user(&self, id: u64) -> Result<()> {
        let mut users = self.users.write().await;
        let sales = self.sales.read().await;

        if !users.contains(id) {
            return Err(Error::NotFound(format!("user {id} not found")));
        }
        if sales.items().iter().any(|sale| sale.user_id == id) {
            return Err(Error::Conflict(format!(
                "user {id} has recorded sales and cannot be deleted"
            )));
        }

        users.remove(id);
        users.persist().await?;
        info!(user_id = id, "deleted user");
        Ok(())
    }

    /// Number of users.
    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }

    // ---- orders and sales ----

    /// Place an order: validate every cart line, then decrement stock and
    /// record one sale per line.
    ///
    /// Validation completes for all lines before any mutation begins, so a
    /// failing line leaves stock and sales entirely unchanged. The products
    /// and sales collections stay write-locked for the whole of
    /// validate-mutate-persist.
    pub async fn place_order(&self, user_id: u64, lines: &[OrderLine]) -> Result<OrderSummary> {
        if lines.is_empty() {
            return Err(Error::Validation("order contains no items".to_string()));
        }
        let buyer = self.get_user(user_id).await?;

        let mut products = self.products.write().await;
        let mut sales = self.sales.write().await;

        // Validation pass. `reserved` accounts for quantity claimed by
        // earlier lines of this same order, so duplicate lines cannot
        // jointly drive stock negative.
        let mut reserved: HashMap<u64, u32> = HashMap::new();
        for line in lines {
            let product = products.get(line.id).ok_or_else(|| {
                Error::Validation(format!("unknown product id {}", line.id))
            })?;
            let already = reserved.get(&product.id).copied().unwrap_or(0);
            let available = product.stock - already;
            if line.quantity > available {
                return Err(Error::Validation(format!(
                    "insufficient stock for {}: {} left",
                    product.name, available
                )));
            }
            reserved.insert(product.id, already + line.quantity);
        }

        // Mutation pass: all lines share one timestamp and consecutive ids.
        let date = chrono::Utc::now();
        let mut created = Vec::with_capacity(lines.len());
        for line in lines {
            let product = products.get_mut(line.id).ok_or_else(|| {
                Error::Validation(format!("unknown product id {}", line.id))
            })?;
            product.stock -= line.quantity;
            created.push(Sale {
                id: sales.allocate_id(),
                user_id,
                product_id: product.id,
                quantity: line.quantity,
                total: product.price * f64::from(line.quantity),
                date,
            });
        }
        for sale in &created {
            sales.push(sale.clone());
        }

        // Two independent rewrites; a crash between them is a documented
        // torn state.
        sales.persist().await?;
        products.persist().await?;

        let total = created.iter().map(|sale| sale.total).sum();
        let order = OrderSummary {
            id: created[0].id,
            user_id,
            user_name: buyer.name,
            items: created,
            total,
            date,
        };
        info!(
            order_id = order.id,
            user_id,
            lines = order.items.len(),
            total,
            "order placed"
        );
        Ok(order)
    }

    /// All sales for one user, enriched with product name and image.
    pub async fn sales_for_user(&self, user_id: u64) -> Vec<SaleWithProduct> {
        let products = self.products.read().await;
        let sales = self.sales.read().await;
        sales
            .items()
            .iter()
            .filter(|sale| sale.user_id == user_id)
            .map(|sale| {
                let product = products.get(sale.product_id);
                SaleWithProduct {
                    sale: sale.clone(),
                    product_name: product.map(|p| p.name.clone()),
                    product_image: product.map(|p| p.image.clone()),
                }
            })
            .collect()
    }

    /// The full sales list.
    pub async fn list_sales(&self) -> Vec<Sale> {
        self.sales.read().await.items().to_vec()
    }

    /// Number of sales.
    pub async fn sale_count(&self) -> usize {
        self.sales.read().await.len()
    }

    /// Set a product's price. No sign or range validation, matching the
    /// original system.
    pub async fn set_product_price(&self, id: u64, price: f64) -> Result<Product> {
        let mut products = self.products.write().await;
        {
            let product = products
                .get_mut(id)
                .ok_or_else(|| Error::NotFound(format!("product {id} not found")))?;
            product.price = price;
        }
        products.persist().await?;
        products
            .get(id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("product {id} not found")))
    }
}
