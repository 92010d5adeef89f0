//! Service context - dependency container for services
//!
//! Holds all repositories, cache stores, and other dependencies needed by
//! services. This replaces any implicit global session state: every service
//! receives its collaborators explicitly through this container.

use std::sync::Arc;

use live_cache::{Publisher, RefreshTokenStore, SharedRedisPool, ViewerPresenceStore};
use live_common::auth::JwtService;
use live_core::traits::{
    AchievementRepository, ChatMessageRepository, GoalRepository, SessionRepository,
    ShowcaseRepository, UserRepository, ViewerRepository,
};
use live_core::SnowflakeGenerator;
use live_db::PgPool;

/// Service context containing all dependencies
///
/// Provides access to:
/// - Database repositories
/// - Redis cache stores
/// - JWT service for authentication and room tokens
/// - Snowflake generator for ID generation
/// - Redis pub/sub for change notifications
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool
    pool: PgPool,

    // Redis pool
    redis_pool: SharedRedisPool,

    // Repositories
    user_repo: Arc<dyn UserRepository>,
    session_repo: Arc<dyn SessionRepository>,
    viewer_repo: Arc<dyn ViewerRepository>,
    message_repo: Arc<dyn ChatMessageRepository>,
    showcase_repo: Arc<dyn ShowcaseRepository>,
    goal_repo: Arc<dyn GoalRepository>,
    achievement_repo: Arc<dyn AchievementRepository>,

    // Cache stores
    refresh_token_store: RefreshTokenStore,
    presence_store: ViewerPresenceStore,

    // Pub/Sub
    publisher: Publisher,

    // Services
    jwt_service: Arc<JwtService>,
    snowflake_generator: Arc<SnowflakeGenerator>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        pool: PgPool,
        redis_pool: SharedRedisPool,
        user_repo: Arc<dyn UserRepository>,
        session_repo: Arc<dyn SessionRepository>,
        viewer_repo: Arc<dyn ViewerRepository>,
        message_repo: Arc<dyn ChatMessageRepository>,
        showcase_repo: Arc<dyn ShowcaseRepository>,
        goal_repo: Arc<dyn GoalRepository>,
        achievement_repo: Arc<dyn AchievementRepository>,
        jwt_service: Arc<JwtService>,
        snowflake_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        // Clone the inner RedisPool from the Arc
        let inner_pool = (*redis_pool).clone();
        let refresh_token_store = RefreshTokenStore::new(inner_pool.clone());
        let presence_store = ViewerPresenceStore::new(inner_pool.clone());
        let publisher = Publisher::new(inner_pool);

        Self {
            pool,
            redis_pool,
            user_repo,
            session_repo,
            viewer_repo,
            message_repo,
            showcase_repo,
            goal_repo,
            achievement_repo,
            refresh_token_store,
            presence_store,
            publisher,
            jwt_service,
            snowflake_generator,
        }
    }

    // === Database Pool ===

    /// Get the PostgreSQL connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get the Redis connection pool
    pub fn redis_pool(&self) -> &SharedRedisPool {
        &self.redis_pool
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the session repository
    pub fn session_repo(&self) -> &dyn SessionRepository {
        self.session_repo.as_ref()
    }

    /// Get the viewer repository
    pub fn viewer_repo(&self) -> &dyn ViewerRepository {
        self.viewer_repo.as_ref()
    }

    /// Get the chat message repository
    pub fn message_repo(&self) -> &dyn ChatMessageRepository {
        self.message_repo.as_ref()
    }

    /// Get the showcase repository
    pub fn showcase_repo(&self) -> &dyn ShowcaseRepository {
        self.showcase_repo.as_ref()
    }

    /// Get the goal repository
    pub fn goal_repo(&self) -> &dyn GoalRepository {
        self.goal_repo.as_ref()
    }

    /// Get the achievement repository
    pub fn achievement_repo(&self) -> &dyn AchievementRepository {
        self.achievement_repo.as_ref()
    }

    // === Cache Stores ===

    /// Get the refresh token store
    pub fn refresh_token_store(&self) -> &RefreshTokenStore {
        &self.refresh_token_store
    }

    /// Get the viewer presence store
    pub fn presence_store(&self) -> &ViewerPresenceStore {
        &self.presence_store
    }

    // === Pub/Sub ===

    /// Get the Redis pub/sub publisher
    pub fn publisher(&self) -> &Publisher {
        &self.publisher
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Get the snowflake ID generator
    pub fn snowflake_generator(&self) -> &SnowflakeGenerator {
        self.snowflake_generator.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> live_core::Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"PgPool")
            .field("redis_pool", &"SharedRedisPool")
            .field("repositories", &"...")
            .field("cache_stores", &"...")
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    redis_pool: Option<SharedRedisPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    session_repo: Option<Arc<dyn SessionRepository>>,
    viewer_repo: Option<Arc<dyn ViewerRepository>>,
    message_repo: Option<Arc<dyn ChatMessageRepository>>,
    showcase_repo: Option<Arc<dyn ShowcaseRepository>>,
    goal_repo: Option<Arc<dyn GoalRepository>>,
    achievement_repo: Option<Arc<dyn AchievementRepository>>,
    jwt_service: Option<Arc<JwtService>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            pool: None,
            redis_pool: None,
            user_repo: None,
            session_repo: None,
            viewer_repo: None,
            message_repo: None,
            showcase_repo: None,
            goal_repo: None,
            achievement_repo: None,
            jwt_service: None,
            snowflake_generator: None,
        }
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn redis_pool(mut self, redis_pool: SharedRedisPool) -> Self {
        self.redis_pool = Some(redis_pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn session_repo(mut self, repo: Arc<dyn SessionRepository>) -> Self {
        self.session_repo = Some(repo);
        self
    }

    pub fn viewer_repo(mut self, repo: Arc<dyn ViewerRepository>) -> Self {
        self.viewer_repo = Some(repo);
        self
    }

    pub fn message_repo(mut self, repo: Arc<dyn ChatMessageRepository>) -> Self {
        self.message_repo = Some(repo);
        self
    }

    pub fn showcase_repo(mut self, repo: Arc<dyn ShowcaseRepository>) -> Self {
        self.showcase_repo = Some(repo);
        self
    }

    pub fn goal_repo(mut self, repo: Arc<dyn GoalRepository>) -> Self {
        self.goal_repo = Some(repo);
        self
    }

    pub fn achievement_repo(mut self, repo: Arc<dyn AchievementRepository>) -> Self {
        self.achievement_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        use super::error::ServiceError;
        Ok(ServiceContext::new(
            self.pool
                .ok_or_else(|| ServiceError::validation("pool is required"))?,
            self.redis_pool
                .ok_or_else(|| ServiceError::validation("redis_pool is required"))?,
            self.user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            self.session_repo
                .ok_or_else(|| ServiceError::validation("session_repo is required"))?,
            self.viewer_repo
                .ok_or_else(|| ServiceError::validation("viewer_repo is required"))?,
            self.message_repo
                .ok_or_else(|| ServiceError::validation("message_repo is required"))?,
            self.showcase_repo
                .ok_or_else(|| ServiceError::validation("showcase_repo is required"))?,
            self.goal_repo
                .ok_or_else(|| ServiceError::validation("goal_repo is required"))?,
            self.achievement_repo
                .ok_or_else(|| ServiceError::validation("achievement_repo is required"))?,
            self.jwt_service
                .ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
            self.snowflake_generator
                .ok_or_else(|| ServiceError::validation("snowflake_generator is required"))?,
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
