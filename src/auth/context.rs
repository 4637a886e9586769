use reqwest::Url;
use std::sync::Arc;

use crate::api::{AuthAPI, AuthSession, RegisterParams};
use crate::auth::store::{CredentialStore, ROLE_KEY, TOKEN_KEY, USER_ID_KEY};
use crate::auth::Credentials;
use crate::error::{validation_error, Error};

/// Where the shell should navigate next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Destination {
    Login,
    Map,
    TrafficAnalysis,
}

/// Process-wide credential state with explicit init and teardown. Every
/// component that authenticates a request holds a reference to this
/// context instead of reading storage directly.
pub struct SessionContext {
    store: Arc<dyn CredentialStore>,
}

impl SessionContext {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    pub fn credentials(&self) -> Option<Credentials> {
        let token = self.store.get(TOKEN_KEY)?;

        Some(Credentials {
            token,
            user_id: self.store.get(USER_ID_KEY),
            role: self.store.get(ROLE_KEY),
        })
    }

    pub fn persist(&self, session: &AuthSession) {
        self.store.set(TOKEN_KEY, &session.token);
        self.store.set(USER_ID_KEY, &session.user.id);
        self.store.set(ROLE_KEY, &session.user.role);
    }

    /// Logout: the three keys are cleared together and the shell returns
    /// to the unauthenticated entry point.
    #[tracing::instrument(skip(self))]
    pub fn clear(&self) -> Destination {
        self.store.remove(TOKEN_KEY);
        self.store.remove(USER_ID_KEY);
        self.store.remove(ROLE_KEY);

        Destination::Login
    }

    /// Adopts a token embedded in an incoming URL: persists it and returns
    /// the URL with the token parameter stripped, for the shell to show
    /// instead of the original address.
    #[tracing::instrument(skip(self, url))]
    pub fn adopt_url_token(&self, url: &str) -> Result<Option<String>, Error> {
        let mut parsed = Url::parse(url).map_err(|_| validation_error("invalid entry url"))?;

        let token = parsed
            .query_pairs()
            .find(|(key, _)| key == "token")
            .map(|(_, value)| value.into_owned());

        let token = match token {
            Some(token) => token,
            None => return Ok(None),
        };

        self.store.set(TOKEN_KEY, &token);

        let remaining: Vec<(String, String)> = parsed
            .query_pairs()
            .filter(|(key, _)| key != "token")
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        parsed.set_query(None);

        if !remaining.is_empty() {
            let mut pairs = parsed.query_pairs_mut();
            for (key, value) in &remaining {
                pairs.append_pair(key, value);
            }
        }

        Ok(Some(parsed.to_string()))
    }

    /// Gate for privileged views, checked at navigation time. Anything
    /// short of an admin credential lands on the default map view.
    pub fn guard_admin(&self) -> Destination {
        match self.credentials() {
            Some(credentials) if credentials.is_admin() => Destination::TrafficAnalysis,
            _ => Destination::Map,
        }
    }

    fn destination_for(&self, session: &AuthSession) -> Destination {
        if session.user.role == crate::auth::ADMIN_ROLE {
            Destination::TrafficAnalysis
        } else {
            Destination::Map
        }
    }

    #[tracing::instrument(skip(self, api, password))]
    pub async fn login(
        &self,
        api: &dyn AuthAPI,
        email: &str,
        password: &str,
    ) -> Result<Destination, Error> {
        let session = api.login(email.trim(), password).await?;
        self.persist(&session);

        Ok(self.destination_for(&session))
    }

    #[tracing::instrument(skip(self, api, id_token))]
    pub async fn login_with_google(
        &self,
        api: &dyn AuthAPI,
        id_token: &str,
    ) -> Result<Destination, Error> {
        let session = api.login_with_google(id_token).await?;
        self.persist(&session);

        Ok(self.destination_for(&session))
    }

    #[tracing::instrument(skip(self, api, params))]
    pub async fn register(&self, api: &dyn AuthAPI, params: RegisterParams) -> Result<(), Error> {
        api.register(params).await
    }
}
