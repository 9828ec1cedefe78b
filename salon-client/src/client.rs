//! Client facade and builder

use std::sync::Arc;

use shared::models::UserInfo;

use crate::api::{
    AssignmentsApi, AuthApi, BranchesApi, CategoriesApi, ResourceApi, ServicesApi, StylistsApi,
    UsersApi,
};
use crate::guard::GuardDecision;
use crate::http::{HttpClient, ResponseInterceptor};
use crate::routes;
use crate::session::{SessionState, SessionStore};
use crate::token::{FileTokenStore, MemoryTokenStore, TokenStore};
use crate::{ClientConfig, ClientResult};

/// Entry point: one HTTP collaborator, one session.
///
/// The session store is registered as the response interceptor, so a 401
/// from any call made through this client signs the session out.
///
/// ```no_run
/// # async fn run() -> salon_client::ClientResult<()> {
/// use salon_client::{ClientConfig, SalonClient};
///
/// let client = SalonClient::builder()
///     .config(ClientConfig::new("https://api.salon.example/api"))
///     .build()?;
/// client.bootstrap().await;
/// let branches = client.branches().list(&Default::default()).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SalonClient {
    http: HttpClient,
    session: SessionStore,
    config: ClientConfig,
}

impl SalonClient {
    pub fn builder() -> SalonClientBuilder {
        SalonClientBuilder::new()
    }

    /// Build with the default token store for `config`
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        Self::builder().config(config).build()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Resolve the startup identity check (`GET /auth/me`), at most once
    pub async fn bootstrap(&self) -> SessionState {
        let http = self.http.clone();
        self.session
            .bootstrap_with(|| async move { http.get::<UserInfo>("/auth/me").await })
            .await
    }

    /// Guard decision for navigating to `path`; `None` if no route matches
    pub fn guard(&self, path: &str) -> Option<GuardDecision> {
        routes::evaluate(path, &self.session.snapshot())
    }

    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(&self.http, &self.session)
    }

    pub fn branches(&self) -> BranchesApi<'_> {
        ResourceApi::new(&self.http)
    }

    pub fn categories(&self) -> CategoriesApi<'_> {
        ResourceApi::new(&self.http)
    }

    pub fn services(&self) -> ServicesApi<'_> {
        ResourceApi::new(&self.http)
    }

    pub fn stylists(&self) -> StylistsApi<'_> {
        StylistsApi::new(&self.http)
    }

    /// Stylist assignments of `branch_id`
    pub fn assignments(&self, branch_id: &str) -> AssignmentsApi<'_> {
        AssignmentsApi::new(&self.http, branch_id)
    }

    pub fn users(&self) -> UsersApi<'_> {
        UsersApi::new(&self.http)
    }
}

/// Builder for [`SalonClient`]
#[derive(Default)]
pub struct SalonClientBuilder {
    config: Option<ClientConfig>,
    tokens: Option<Arc<dyn TokenStore>>,
    interceptors: Vec<Arc<dyn ResponseInterceptor>>,
}

impl SalonClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration. Defaults to [`ClientConfig::load`].
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the token store.
    ///
    /// Without one, the token lives in `config.token_path` when set and in
    /// memory otherwise.
    pub fn token_store(mut self, tokens: Arc<dyn TokenStore>) -> Self {
        self.tokens = Some(tokens);
        self
    }

    /// Adds an interceptor that runs after the session's own 401 handling
    pub fn interceptor(mut self, interceptor: Arc<dyn ResponseInterceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    pub fn build(self) -> ClientResult<SalonClient> {
        let config = self.config.unwrap_or_else(ClientConfig::load);
        let tokens: Arc<dyn TokenStore> = match self.tokens {
            Some(tokens) => tokens,
            None => match &config.token_path {
                Some(path) => Arc::new(FileTokenStore::new(path)),
                None => Arc::new(MemoryTokenStore::new()),
            },
        };

        let session = SessionStore::new(tokens.clone());
        let mut http = HttpClient::new(&config, tokens)?
            .with_interceptor(Arc::new(session.clone()));
        for interceptor in self.interceptors {
            http = http.with_interceptor(interceptor);
        }

        tracing::debug!(base_url = %http.base_url(), "Salon client ready");
        Ok(SalonClient {
            http,
            session,
            config,
        })
    }
}
