//! User domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Risk tolerance profile, shared by users and portfolios.
///
/// Unknown or absent labels always resolve to `Moderate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub enum RiskTolerance {
    Low,
    #[default]
    Moderate,
    High,
}

// Lenient on purpose: any unrecognized label collapses to Moderate instead
// of rejecting the request.
impl<'de> Deserialize<'de> for RiskTolerance {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        Ok(RiskTolerance::from_label(&label))
    }
}

impl RiskTolerance {
    /// Parses a stored label, falling back to `Moderate` for anything
    /// unrecognized.
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Low" => RiskTolerance::Low,
            "High" => RiskTolerance::High,
            _ => RiskTolerance::Moderate,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTolerance::Low => "Low",
            RiskTolerance::Moderate => "Moderate",
            RiskTolerance::High => "High",
        }
    }
}

/// Account role. `Inactive` doubles as the deactivated state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    User,
    Admin,
    Inactive,
}

impl UserRole {
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "admin" => UserRole::Admin,
            "inactive" => UserRole::Inactive,
            _ => UserRole::User,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Admin => "admin",
            UserRole::Inactive => "inactive",
        }
    }
}

/// Domain model representing a user account.
///
/// Credentials and session issuance are handled by an external auth
/// collaborator; this record carries the profile data the advisory
/// services consume (goals text, risk tolerance).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub phone: String,
    /// Free-text financial goals, e.g. "Retire by 2030" or "Save for a house"
    pub goals: String,
    pub risk_tolerance: RiskTolerance,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input model for provisioning a new user account.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Partial profile update; only provided fields are changed.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub goals: Option<String>,
    pub risk_tolerance: Option<RiskTolerance>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_tolerance_falls_back_to_moderate() {
        assert_eq!(RiskTolerance::from_label("Low"), RiskTolerance::Low);
        assert_eq!(RiskTolerance::from_label("High"), RiskTolerance::High);
        assert_eq!(RiskTolerance::from_label("Moderate"), RiskTolerance::Moderate);
        assert_eq!(RiskTolerance::from_label("aggressive"), RiskTolerance::Moderate);
        assert_eq!(RiskTolerance::from_label(""), RiskTolerance::Moderate);
    }

    #[test]
    fn test_risk_tolerance_lenient_deserialization() {
        let parsed: RiskTolerance = serde_json::from_str("\"High\"").unwrap();
        assert_eq!(parsed, RiskTolerance::High);
        let parsed: RiskTolerance = serde_json::from_str("\"Aggressive\"").unwrap();
        assert_eq!(parsed, RiskTolerance::Moderate);
        assert_eq!(serde_json::to_string(&RiskTolerance::Low).unwrap(), "\"Low\"");
    }

    #[test]
    fn test_user_role_labels() {
        assert_eq!(UserRole::from_label("admin"), UserRole::Admin);
        assert_eq!(UserRole::from_label("inactive"), UserRole::Inactive);
        assert_eq!(UserRole::from_label("anything"), UserRole::User);
        assert_eq!(UserRole::Admin.as_str(), "admin");
    }
}
