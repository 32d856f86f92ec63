//! Role discriminants.
//!
//! [`RegistrationType`] tags a pending role request as merchant or shipper.
//! [`DashboardRole`] names the four role-based dashboards and carries the
//! sign-in prompt shown when an anonymous visitor is turned away.

use serde::{Deserialize, Serialize};

/// Error returned when a role string does not name a known role.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

/// Discriminant distinguishing a merchant request from a shipper request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationType {
    #[default]
    Merchant,
    Shipper,
}

impl RegistrationType {
    /// Both discriminants, in tab order.
    pub const ALL: [Self; 2] = [Self::Merchant, Self::Shipper];

    /// Wire value (`merchant` / `shipper`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Merchant => "merchant",
            Self::Shipper => "shipper",
        }
    }

    /// Plural tab label.
    #[must_use]
    pub const fn plural_label(self) -> &'static str {
        match self {
            Self::Merchant => "Merchants",
            Self::Shipper => "Shippers",
        }
    }
}

impl std::fmt::Display for RegistrationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RegistrationType {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "merchant" => Ok(Self::Merchant),
            "shipper" => Ok(Self::Shipper),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}

/// A role-based dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashboardRole {
    Customer,
    Courier,
    Merchant,
    Admin,
}

impl DashboardRole {
    /// All dashboards, in navigation order.
    pub const ALL: [Self; 4] = [Self::Customer, Self::Courier, Self::Merchant, Self::Admin];

    /// Path segment used under `/dashboard/`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Courier => "courier",
            Self::Merchant => "merchant",
            Self::Admin => "admin",
        }
    }

    /// Absolute path of the dashboard.
    #[must_use]
    pub fn path(self) -> String {
        format!("/dashboard/{}", self.as_str())
    }

    /// Display title of the dashboard.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Customer => "Customer Dashboard",
            Self::Courier => "Courier Dashboard",
            Self::Merchant => "Merchant Dashboard",
            Self::Admin => "Admin Dashboard",
        }
    }

    /// Localized prompt shown on the sign-in page when the guard redirects.
    #[must_use]
    pub const fn sign_in_prompt(self) -> &'static str {
        match self {
            Self::Customer => "Đăng nhập để truy cập bảng điều khiển khách hàng",
            Self::Courier => "Đăng nhập để truy cập bảng điều khiển tài xế",
            Self::Merchant => "Đăng nhập để truy cập bảng điều khiển merchant",
            Self::Admin => "Đăng nhập để truy cập bảng điều khiển quản trị",
        }
    }
}

impl std::fmt::Display for DashboardRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DashboardRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}
