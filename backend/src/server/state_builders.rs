//! Builders for the HTTP state over PostgreSQL or the in-process store.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::{info, warn};

use backend::domain::ports::{PasswordHasher, TokenService};
use backend::inbound::http::state::{HttpState, Repositories};
use backend::outbound::credentials::{Argon2PasswordHasher, JwtTokenService};
use backend::outbound::memory::InMemoryStore;
use backend::outbound::persistence::{
    DbPool, DieselMembershipRepository, DieselMessageRepository, DieselProjectRepository,
    DieselUserRepository,
};

use super::ServerConfig;

fn diesel_repositories(
    pool: &DbPool,
) -> Repositories<
    DieselUserRepository,
    DieselProjectRepository,
    DieselMembershipRepository,
    DieselMessageRepository,
> {
    Repositories {
        users: Arc::new(DieselUserRepository::new(pool.clone())),
        projects: Arc::new(DieselProjectRepository::new(pool.clone())),
        memberships: Arc::new(DieselMembershipRepository::new(pool.clone())),
        messages: Arc::new(DieselMessageRepository::new(pool.clone())),
    }
}

fn memory_repositories()
-> Repositories<InMemoryStore, InMemoryStore, InMemoryStore, InMemoryStore> {
    let store = Arc::new(InMemoryStore::new());
    Repositories {
        users: Arc::clone(&store),
        projects: Arc::clone(&store),
        memberships: Arc::clone(&store),
        messages: store,
    }
}

/// Build the HTTP state, choosing repositories by whether a pool exists.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher::new());
    let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(
        config.token_secret.as_bytes(),
        Arc::clone(&clock),
    ));
    if config.token_secret.is_ephemeral() {
        warn!("using an ephemeral token secret; tokens will not survive a restart");
    }

    let state = match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL repositories");
            HttpState::assemble(diesel_repositories(pool), hasher, tokens, clock)
        }
        None => {
            warn!("no database configured; data lives in process memory only");
            HttpState::assemble(memory_repositories(), hasher, tokens, clock)
        }
    };
    web::Data::new(state)
}
