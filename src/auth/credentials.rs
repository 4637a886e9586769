use serde::{Deserialize, Serialize};

pub const ADMIN_ROLE: &str = "admin";

/// The opaque credential trio persisted across page loads. A token from an
/// incoming URL carries no user id or role, hence the options.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Credentials {
    pub token: String,
    pub user_id: Option<String>,
    pub role: Option<String>,
}

impl Credentials {
    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some(ADMIN_ROLE)
    }
}
