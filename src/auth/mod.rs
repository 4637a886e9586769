mod context;
mod credentials;
mod store;

pub use context::{Destination, SessionContext};
pub use credentials::{Credentials, ADMIN_ROLE};
pub use store::{CredentialStore, MemoryStore, ROLE_KEY, TOKEN_KEY, USER_ID_KEY};
