//! User domain types and the account state machine.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use skyfare_core::{CityId, Email, UserId};

use super::blob_url;

/// Object-storage container for user avatars.
pub const USER_IMAGE_CONTAINER: &str = "users";

/// User-type tag: which role a user is registered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    /// Administrative user.
    Admin,
    /// Regular customer.
    User,
}

impl UserType {
    /// Name of the role a user of this type is registered under.
    #[must_use]
    pub const fn role_name(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::User => "User",
        }
    }

    /// Storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.role_name())
    }
}

impl FromStr for UserType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            other => Err(format!("unknown user type: {other}")),
        }
    }
}

/// Account lifecycle state.
///
/// Registration inserts the user as [`AccountStatus::Registered`]; consuming
/// the email-confirmation token moves it to [`AccountStatus::Confirmed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    /// Registered, email not yet confirmed.
    Registered,
    /// Email confirmed; login is allowed.
    Confirmed,
}

impl AccountStatus {
    /// Storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Registered => "registered",
            Self::Confirmed => "confirmed",
        }
    }
}

impl FromStr for AccountStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "registered" => Ok(Self::Registered),
            "confirmed" => Ok(Self::Confirmed),
            other => Err(format!("unknown account status: {other}")),
        }
    }
}

/// An identity record (domain type).
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Email address; doubles as the login name.
    pub email: Email,
    /// Phone number.
    pub phone: String,
    /// Street address.
    pub address: String,
    /// Document number.
    pub document: String,
    /// City the user lives in, if any.
    pub city_id: Option<CityId>,
    /// Opaque avatar identifier; nil when never uploaded.
    pub image_id: Uuid,
    /// Role tag this user was registered under.
    pub user_type: UserType,
    /// Account lifecycle state.
    pub status: AccountStatus,
}

impl User {
    /// Full display name.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Derive the avatar display URL, or `None` when no avatar was uploaded.
    #[must_use]
    pub fn image_full_path(&self, storage_base_url: &str) -> Option<String> {
        if self.image_id.is_nil() {
            None
        } else {
            Some(blob_url(
                storage_base_url,
                USER_IMAGE_CONTAINER,
                self.image_id,
            ))
        }
    }
}

/// Payload for registering a user; the password travels separately so it is
/// only ever seen by the identity service.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Email address; doubles as the login name.
    pub email: Email,
    /// Phone number.
    pub phone: String,
    /// Street address.
    pub address: String,
    /// Document number.
    pub document: String,
    /// City the user lives in, if any.
    pub city_id: Option<CityId>,
    /// Opaque avatar identifier.
    pub image_id: Uuid,
    /// Role tag to register under.
    pub user_type: UserType,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn demo_user(image_id: Uuid) -> User {
        User {
            id: UserId::new(1),
            first_name: "Alejandro".to_owned(),
            last_name: "Gómez".to_owned(),
            email: Email::parse("alego@yopmail.com").unwrap(),
            phone: "305 383 8383".to_owned(),
            address: "Calle Jardín".to_owned(),
            document: "0520".to_owned(),
            city_id: None,
            image_id,
            user_type: UserType::Admin,
            status: AccountStatus::Registered,
        }
    }

    #[test]
    fn test_full_name() {
        assert_eq!(demo_user(Uuid::nil()).full_name(), "Alejandro Gómez");
    }

    #[test]
    fn test_role_name_matches_tag() {
        assert_eq!(UserType::Admin.role_name(), "Admin");
        assert_eq!(UserType::User.role_name(), "User");
    }

    #[test]
    fn test_user_type_storage_roundtrip() {
        for ty in [UserType::Admin, UserType::User] {
            assert_eq!(ty.as_str().parse::<UserType>().unwrap(), ty);
        }
    }

    #[test]
    fn test_account_status_storage_roundtrip() {
        for status in [AccountStatus::Registered, AccountStatus::Confirmed] {
            assert_eq!(status.as_str().parse::<AccountStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_image_full_path() {
        assert_eq!(demo_user(Uuid::nil()).image_full_path("https://b.example"), None);

        let id = Uuid::new_v4();
        assert_eq!(
            demo_user(id).image_full_path("https://b.example"),
            Some(format!("https://b.example/users/{id}"))
        );
    }
}
