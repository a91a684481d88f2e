//! Seed data for first startup
//!
//! Missing data files are created so a fresh checkout serves a browsable
//! catalog immediately: a small default catalog, a default admin account
//! (logged loudly so it gets changed) and an empty sales list.

use std::path::Path;

use tracing::{info, warn};

use crate::auth::hash_password;
use crate::core::config::AuthConfig;
use crate::storage::store::{PRODUCTS_FILE, SALES_FILE, USERS_FILE};
use crate::storage::JsonCollection;
use crate::types::{Product, Result, Role, Sale, User};

/// Email of the seeded admin account.
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@tienda.local";
/// Initial password of the seeded admin account.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin";

/// Create any missing data file with its seed content. Existing files are
/// left untouched.
pub async fn ensure_seed_data(data_dir: &Path, auth: &AuthConfig) -> Result<()> {
    let products_path = data_dir.join(PRODUCTS_FILE);
    if !products_path.exists() {
        info!("seeding default catalog at {}", products_path.display());
        JsonCollection::create(products_path, default_products()).await?;
    }

    let users_path = data_dir.join(USERS_FILE);
    if !users_path.exists() {
        warn!(
            "seeding admin account {DEFAULT_ADMIN_EMAIL} with the default password; \
             change it before exposing this service"
        );
        let admin = default_admin(hash_password(DEFAULT_ADMIN_PASSWORD, auth.bcrypt_cost)?);
        JsonCollection::create(users_path, vec![admin]).await?;
    }

    let sales_path = data_dir.join(SALES_FILE);
    if !sales_path.exists() {
        JsonCollection::<Sale>::create(sales_path, Vec::new()).await?;
    }

    Ok(())
}

fn default_admin(password_hash: String) -> User {
    User {
        id: 1,
        name: "Administrator".to_string(),
        email: DEFAULT_ADMIN_EMAIL.to_string(),
        password_hash,
        phone: None,
        address: None,
        role: Role::Admin,
    }
}

fn default_products() -> Vec<Product> {
    vec![
        Product {
            id: 1,
            name: "Espresso Beans 1kg".to_string(),
            category: "coffee".to_string(),
            price: 18.5,
            stock: 40,
            image: "/images/espresso-beans.jpg".to_string(),
        },
        Product {
            id: 2,
            name: "Moka Pot".to_string(),
            category: "coffee".to_string(),
            price: 32.0,
            stock: 15,
            image: "/images/moka-pot.jpg".to_string(),
        },
        Product {
            id: 3,
            name: "Ceramic Mug".to_string(),
            category: "kitchen".to_string(),
            price: 9.9,
            stock: 60,
            image: "/images/ceramic-mug.jpg".to_string(),
        },
        Product {
            id: 4,
            name: "Electric Kettle".to_string(),
            category: "kitchen".to_string(),
            price: 45.0,
            stock: 12,
            image: "/images/electric-kettle.jpg".to_string(),
        },
        Product {
            id: 5,
            name: "Green Tea 100g".to_string(),
            category: "tea".to_string(),
            price: 7.5,
            stock: 80,
            image: "/images/green-tea.jpg".to_string(),
        },
        Product {
            id: 6,
            name: "Tea Infuser".to_string(),
            category: "tea".to_string(),
            price: 5.25,
            stock: 35,
            image: "/images/tea-infuser.jpg".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Store;

    fn auth_config() -> AuthConfig {
        AuthConfig {
            token_secret: "test".to_string(),
            token_ttl_secs: 3600,
            bcrypt_cost: 4,
        }
    }

    #[tokio::test]
    async fn test_seeds_admin_and_catalog() {
        let dir = tempfile::tempdir().unwrap();
        ensure_seed_data(dir.path(), &auth_config()).await.unwrap();

        let store = Store::open(dir.path()).await.unwrap();
        let admin = store
            .find_user_by_email(DEFAULT_ADMIN_EMAIL)
            .await
            .expect("admin seeded");
        assert_eq!(admin.role, Role::Admin);
        assert!(store.product_count().await > 0);
        assert_eq!(store.sale_count().await, 0);
    }

    #[tokio::test]
    async fn test_existing_files_left_untouched() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(dir.path().join(USERS_FILE), "[]")
            .await
            .unwrap();

        ensure_seed_data(dir.path(), &auth_config()).await.unwrap();

        let store = Store::open(dir.path()).await.unwrap();
        // The empty users file was not reseeded with an admin.
        assert_eq!(store.user_count().await, 0);
        assert!(store.product_count().await > 0);
    }
}
