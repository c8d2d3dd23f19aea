//! Service context: one place that turns configuration into the shared
//! collaborators every facade needs.

use std::future::Future;
use std::sync::Arc;

use alum_config::{AlumConfig, ApiMode, EnvSignals, ModeResolver};
use alum_core::responses::ApiResult;
use alum_core::state::KeyValueStore;
use alum_http::ApiClient;
use alum_mock::{MockApis, MockDataLoader};
use alum_storage::{LocalStore, PreferencesStore};

use crate::cache_manager::CacheManager;
use crate::error::ServiceError;
use crate::health::HealthAggregator;
use crate::profile::{Jitter, NoJitter, RandomJitter};
use crate::services::{
    ChaptersService, EventsService, MentorshipService, OpportunitiesService, PartnersService,
    QaService, SponsorsService, SpotlightsService, UsersService,
};

/// Routes a call to the mock or the real backend, asking the resolver on
/// every call so a toggled override takes effect immediately.
#[derive(Clone)]
pub struct Backend {
    resolver: Arc<ModeResolver>,
    client: Arc<ApiClient>,
    mocks: MockApis,
}

impl Backend {
    #[must_use]
    pub const fn new(resolver: Arc<ModeResolver>, client: Arc<ApiClient>, mocks: MockApis) -> Self {
        Self {
            resolver,
            client,
            mocks,
        }
    }

    #[must_use]
    pub fn mode(&self) -> ApiMode {
        self.resolver.resolve()
    }

    #[must_use]
    pub fn use_mock(&self) -> bool {
        self.resolver.use_mock()
    }

    #[must_use]
    pub const fn client(&self) -> &Arc<ApiClient> {
        &self.client
    }

    #[must_use]
    pub const fn mocks(&self) -> &MockApis {
        &self.mocks
    }

    #[must_use]
    pub const fn resolver(&self) -> &Arc<ModeResolver> {
        &self.resolver
    }

    /// Await `mock` or `real` depending on the current mode. The branch not
    /// taken is dropped without being polled.
    pub async fn route<T>(
        &self,
        mock: impl Future<Output = ApiResult<T>>,
        real: impl Future<Output = ApiResult<T>>,
    ) -> ApiResult<T> {
        if self.use_mock() {
            mock.await
        } else {
            real.await
        }
    }
}

impl std::fmt::Debug for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backend")
            .field("resolver", &self.resolver)
            .field("client", &self.client)
            .finish_non_exhaustive()
    }
}

/// Shared application resources initialized once at startup.
pub struct ServiceContext {
    pub config: AlumConfig,
    pub store: Arc<dyn KeyValueStore>,
    pub backend: Backend,
    pub preferences: PreferencesStore,
    pub events: EventsService,
    pub sponsors: SponsorsService,
    pub partners: PartnersService,
    pub chapters: ChaptersService,
    pub mentorship: MentorshipService,
    pub qa: QaService,
    pub opportunities: OpportunitiesService,
    pub spotlights: SpotlightsService,
    pub users: UsersService,
}

impl ServiceContext {
    /// Open the persisted store from `config.storage` and wire everything.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError`] if the store cannot be opened or an HTTP
    /// client cannot be built.
    pub fn init(config: AlumConfig) -> Result<Self, ServiceError> {
        let store: Arc<dyn KeyValueStore> = Arc::new(LocalStore::from_config(&config.storage)?);
        Self::with_store(config, store)
    }

    /// Wire the context over an existing store (in-memory in tests).
    ///
    /// Profile scores get the random jitter outside test mode.
    ///
    /// # Errors
    ///
    /// Same as [`Self::init`], minus store opening.
    pub fn with_store(config: AlumConfig, store: Arc<dyn KeyValueStore>) -> Result<Self, ServiceError> {
        let env = EnvSignals::collect(&config);
        let jitter: Arc<dyn Jitter> = if env.test_mode() {
            Arc::new(NoJitter)
        } else {
            Arc::new(RandomJitter)
        };
        let resolver = Arc::new(ModeResolver::new(env, Some(Arc::clone(&store))));
        Self::assemble(config, store, resolver, jitter)
    }

    /// Fully injected constructor.
    ///
    /// # Errors
    ///
    /// Same as [`Self::with_store`].
    pub fn assemble(
        config: AlumConfig,
        store: Arc<dyn KeyValueStore>,
        resolver: Arc<ModeResolver>,
        jitter: Arc<dyn Jitter>,
    ) -> Result<Self, ServiceError> {
        let client = Arc::new(ApiClient::new(&config.api, Some(Arc::clone(&store)))?);
        let loader = Arc::new(MockDataLoader::from_config(&config.mock, Arc::clone(&resolver))?);
        let backend = Backend::new(resolver, client, MockApis::new(loader));

        tracing::debug!(
            api = backend.client().base_url(),
            mock = backend.mocks().loader.base_url(),
            mode = %backend.mode(),
            "service context ready"
        );

        Ok(Self {
            preferences: PreferencesStore::new(Arc::clone(&store)),
            events: EventsService::new(backend.clone()),
            sponsors: SponsorsService::new(backend.clone()),
            partners: PartnersService::new(backend.clone()),
            chapters: ChaptersService::new(backend.clone()),
            mentorship: MentorshipService::new(backend.clone()),
            qa: QaService::new(backend.clone()),
            opportunities: OpportunitiesService::new(backend.clone()),
            spotlights: SpotlightsService::new(backend.clone()),
            users: UsersService::new(backend.clone(), jitter),
            backend,
            store,
            config,
        })
    }

    #[must_use]
    pub fn cache(&self) -> CacheManager {
        CacheManager::new(Arc::clone(&self.backend.mocks().loader))
    }

    #[must_use]
    pub fn health(&self) -> HealthAggregator {
        HealthAggregator::new(self.backend.clone())
    }

    /// Persist (or clear) the explicit mode override.
    pub fn set_mode(&self, mode: Option<ApiMode>) {
        self.backend.resolver().set_override(mode);
    }
}
