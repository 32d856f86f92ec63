//! Pending role registrations.
//!
//! A [`RoleRegistration`] is a user's request to take on a privileged role
//! (merchant or shipper). The admin panel only ever holds a snapshot of the
//! pending set; the backend owns the records and their lifecycle.

use serde::{Deserialize, Deserializer, Serialize};

use super::id::{RoleId, UserId, UserRoleId};
use super::role::RegistrationType;

/// A pending request from a user to assume a merchant or shipper role.
///
/// Field names match the backend's wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRegistration {
    /// Role-assignment row; the key used for approve/reject.
    pub user_role_id: UserRoleId,
    pub user_id: UserId,
    pub role_id: RoleId,
    // Profile fields may be missing or null for accounts created through
    // federated sign-in; both decode as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub full_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub phone: String,
    /// Creation timestamp as formatted by the backend.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub created_at: String,
    pub registration_type: RegistrationType,

    // Merchant-specific
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shop_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shop_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shop_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_license: Option<String>,

    // Shipper-specific
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_plate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_card_number: Option<String>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Pending registrations grouped by discriminant.
///
/// This is the body of `GET /admin/role-registrations/pending`. Either array
/// may be missing from the response, in which case it is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingRegistrations {
    #[serde(default)]
    pub merchants: Vec<RoleRegistration>,
    #[serde(default)]
    pub shippers: Vec<RoleRegistration>,
}

impl PendingRegistrations {
    /// Split registrations by their discriminant, preserving order within
    /// each group.
    #[must_use]
    pub fn partition(registrations: impl IntoIterator<Item = RoleRegistration>) -> Self {
        let (merchants, shippers) = registrations
            .into_iter()
            .partition(|r| r.registration_type == RegistrationType::Merchant);
        Self {
            merchants,
            shippers,
        }
    }

    /// Re-group a response whose arrays may hold mis-filed records.
    ///
    /// The discriminant on each record wins over the array it arrived in.
    #[must_use]
    pub fn regrouped(self) -> Self {
        Self::partition(self.merchants.into_iter().chain(self.shippers))
    }

    /// Total number of pending registrations.
    #[must_use]
    pub fn total(&self) -> usize {
        self.merchants.len() + self.shippers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.merchants.is_empty() && self.shippers.is_empty()
    }

    /// Registrations for one discriminant.
    #[must_use]
    pub fn for_type(&self, registration_type: RegistrationType) -> &[RoleRegistration] {
        match registration_type {
            RegistrationType::Merchant => &self.merchants,
            RegistrationType::Shipper => &self.shippers,
        }
    }
}
