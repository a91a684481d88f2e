use serde::{Deserialize, Serialize};

use crate::types::Record;

/// User role. Admins can mutate prices, delete users and read all sales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular shopper
    Customer,
    /// Administrator
    Admin,
}

/// A user account as persisted in users.json.
///
/// The password hash never leaves the server; API responses use
/// [`UserProfile`] instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user id
    pub id: u64,
    /// Display name
    pub name: String,
    /// Email address, unique among users
    pub email: String,
    /// bcrypt hash of the password
    pub password_hash: String,
    /// Optional phone number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Optional postal address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Account role
    pub role: Role,
}

impl User {
    /// The public view of this account, with the password hash stripped.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
            role: self.role,
        }
    }
}

impl Record for User {
    fn id(&self) -> u64 {
        self.id
    }
}

/// Input for creating a user account. The password arrives already hashed;
/// plaintext never reaches the store.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Display name
    pub name: String,
    /// Email address; must not collide with an existing account
    pub email: String,
    /// bcrypt hash of the chosen password
    pub password_hash: String,
    /// Optional phone number
    pub phone: Option<String>,
    /// Optional postal address
    pub address: Option<String>,
}

/// Fields a user may change on their own profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    /// New display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New phone number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// New postal address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Public view of a user account, safe to return from the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Unique user id
    pub id: u64,
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// Optional phone number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Optional postal address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Account role
    pub role: Role,
}
