// ── Accounts and integrations ──

use serde::{Deserialize, Serialize};

use super::record_id::RecordId;
use super::status::{AccountStatus, IntegrationStatus, UserRole};

/// An operator account with access to the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: RecordId,
    pub name: String,
    pub role: UserRole,
    pub email: String,
    pub status: AccountStatus,
    pub last_login: String,
}

impl UserAccount {
    /// `Rajesh Kumar` → `RK`.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .collect()
    }
}

/// An external system the dashboard syncs with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Integration {
    pub id: RecordId,
    pub name: String,
    pub description: String,
    pub status: IntegrationStatus,
    pub last_sync: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initials_take_each_word() {
        let user = UserAccount {
            id: "4".into(),
            name: "Dr. Amit Sharma".into(),
            role: UserRole::SafetyInspector,
            email: "amit@ksebl.in".into(),
            status: AccountStatus::Inactive,
            last_login: "2 days ago".into(),
        };
        assert_eq!(user.initials(), "DAS");
    }
}
