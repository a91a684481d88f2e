//! Command-line storefront for the tienda shop
//!
//! Browses the catalog, keeps the session and cart in local JSON files (the
//! moral equivalent of browser local storage), and submits the cart as an
//! order on checkout.

mod client;
mod state;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use tienda_core::types::{ProfileUpdate, Role, SaleWithProduct, UserProfile};

use client::{ApiClient, RegisterInput};
use state::{Cart, Session};

/// How long the checkout receipt stays on screen before the cart is
/// cleared.
const RECEIPT_DISPLAY_DELAY: Duration = Duration::from_secs(2);

#[derive(Parser)]
#[command(name = "tienda", version, about = "Command-line storefront for the tienda shop")]
struct Cli {
    /// API base URL
    #[arg(long, global = true, default_value = "http://localhost:8080", env = "TIENDA_API")]
    api: String,

    /// Directory for session and cart state
    #[arg(long, global = true, default_value = ".tienda", env = "TIENDA_STATE_DIR")]
    state_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the catalog
    Products {
        /// Only show products in this category
        #[arg(long)]
        category: Option<String>,
    },
    /// Show one product
    Product {
        /// Product id
        id: u64,
    },
    /// List the distinct categories
    Categories,
    /// Create an account and log in
    Register {
        name: String,
        email: String,
        password: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        address: Option<String>,
    },
    /// Log in with an existing account
    Login { email: String, password: String },
    /// Forget the stored session
    Logout,
    /// Show the profile, or update it when a flag is given
    Profile {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        address: Option<String>,
    },
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Submit the cart as an order
    Checkout,
    /// List your past orders
    Orders,
}

#[derive(Subcommand)]
enum CartAction {
    /// Add a product to the cart
    Add {
        /// Product id
        id: u64,
        /// Quantity to add
        #[arg(default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a product from the cart
    Remove {
        /// Product id
        id: u64,
    },
    /// Show the cart
    Show,
    /// Empty the cart
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = ApiClient::new(&cli.api);
    let state_dir = cli.state_dir;

    match cli.command {
        Commands::Products { category } => {
            let products = client
                .products()
                .await
                .with_context(|| catalog_retry_hint(&cli.api))?;
            for product in products
                .iter()
                .filter(|p| category.as_deref().map_or(true, |c| p.category == c))
            {
                println!(
                    "{:>4}  {:<28} {:<12} {:>8.2}  stock {:>4}",
                    product.id, product.name, product.category, product.price, product.stock
                );
            }
        }
        Commands::Product { id } => {
            let product = client
                .product(id)
                .await
                .with_context(|| catalog_retry_hint(&cli.api))?;
            println!("{} (#{})", product.name, product.id);
            println!("  category: {}", product.category);
            println!("  price:    {:.2}", product.price);
            println!("  stock:    {}", product.stock);
            println!("  image:    {}", product.image);
        }
        Commands::Categories => {
            let categories = client
                .categories()
                .await
                .with_context(|| catalog_retry_hint(&cli.api))?;
            for category in categories {
                println!("{category}");
            }
        }
        Commands::Register {
            name,
            email,
            password,
            phone,
            address,
        } => {
            let payload = client
                .register(&RegisterInput {
                    name,
                    email,
                    password,
                    phone,
                    address,
                })
                .await?;
            let session = Session {
                user: payload.user,
                token: payload.token,
            };
            session.save(&state_dir).await?;
            println!("registered and logged in as {}", session.user.email);
        }
        Commands::Login { email, password } => {
            let payload = client.login(&email, &password).await?;
            let session = Session {
                user: payload.user,
                token: payload.token,
            };
            session.save(&state_dir).await?;
            println!("logged in as {}", session.user.email);
        }
        Commands::Logout => {
            Session::clear(&state_dir).await?;
            println!("logged out");
        }
        Commands::Profile {
            name,
            phone,
            address,
        } => {
            let session = require_session(&state_dir).await?;
            if name.is_none() && phone.is_none() && address.is_none() {
                print_profile(&client.profile(&session.token).await?);
            } else {
                let updated = client
                    .update_profile(
                        &session.token,
                        &ProfileUpdate {
                            name,
                            phone,
                            address,
                        },
                    )
                    .await?;
                print_profile(&updated);
            }
        }
        Commands::Cart { action } => run_cart(&client, &state_dir, action).await?,
        Commands::Checkout => {
            let session = require_session(&state_dir).await?;
            let cart = Cart::load(&state_dir).await?;
            if cart.is_empty() {
                bail!("the cart is empty");
            }
            let order = client
                .place_order(&session.token, &cart.to_order_request())
                .await?;
            println!("order #{} placed for {}", order.id, order.user_name);
            for sale in &order.items {
                println!(
                    "  {:>3} x product {:<4} {:>8.2}",
                    sale.quantity, sale.product_id, sale.total
                );
            }
            println!("  total: {:.2}", order.total);
            tokio::time::sleep(RECEIPT_DISPLAY_DELAY).await;
            Cart::clear(&state_dir).await?;
        }
        Commands::Orders => {
            let session = require_session(&state_dir).await?;
            let orders = client.my_orders(&session.token).await?;
            if orders.is_empty() {
                println!("no orders yet");
            }
            for sale in &orders {
                print_order_line(sale);
            }
        }
    }

    Ok(())
}

async fn run_cart(client: &ApiClient, state_dir: &Path, action: CartAction) -> Result<()> {
    match action {
        CartAction::Add { id, quantity } => {
            // Fetch a fresh snapshot so the cap reflects current stock.
            let product = client.product(id).await?;
            let mut cart = Cart::load(state_dir).await?;
            let in_cart = cart.add(product.clone(), quantity);
            cart.save(state_dir).await?;
            if in_cart < quantity {
                println!(
                    "only {} of {} in stock; cart now holds {}",
                    product.stock, product.name, in_cart
                );
            } else {
                println!("{} x {} in cart", in_cart, product.name);
            }
        }
        CartAction::Remove { id } => {
            let mut cart = Cart::load(state_dir).await?;
            if cart.remove(id) {
                cart.save(state_dir).await?;
                println!("removed product {id}");
            } else {
                println!("product {id} is not in the cart");
            }
        }
        CartAction::Show => {
            let cart = Cart::load(state_dir).await?;
            if cart.is_empty() {
                println!("the cart is empty");
                return Ok(());
            }
            for line in &cart.lines {
                println!(
                    "{:>4}  {:<28} {:>3} x {:>8.2} = {:>8.2}",
                    line.product.id,
                    line.product.name,
                    line.quantity,
                    line.product.price,
                    line.product.price * f64::from(line.quantity)
                );
            }
            println!("total: {:.2}", cart.total());
        }
        CartAction::Clear => {
            Cart::clear(state_dir).await?;
            println!("cart cleared");
        }
    }
    Ok(())
}

async fn require_session(state_dir: &Path) -> Result<Session> {
    match Session::load(state_dir).await? {
        Some(session) => Ok(session),
        None => bail!("not logged in; run `tienda login <email> <password>` first"),
    }
}

fn catalog_retry_hint(api: &str) -> String {
    format!("could not load the catalog from {api}; check the address and try again")
}

fn print_profile(profile: &UserProfile) {
    println!("{} <{}>", profile.name, profile.email);
    println!("  role:    {}", role_label(profile.role));
    println!("  phone:   {}", profile.phone.as_deref().unwrap_or("-"));
    println!("  address: {}", profile.address.as_deref().unwrap_or("-"));
}

fn print_order_line(sale: &SaleWithProduct) {
    println!(
        "sale #{:<4} {}  {:>3} x {:<28} {:>8.2}",
        sale.sale.id,
        sale.sale.date.format("%Y-%m-%d %H:%M"),
        sale.sale.quantity,
        sale.product_name.as_deref().unwrap_or("(unknown product)"),
        sale.sale.total
    );
}

fn role_label(role: Role) -> &'static str {
    match role {
        Role::Admin => "admin",
        Role::Customer => "customer",
    }
}
