//! Shared HTTP adapter state.
//!
//! Handlers receive this bundle via `actix_web::web::Data` and only see the
//! driving ports, so they can be tested against any implementation.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    AccountService, ConversationGate, MembershipLifecycle, MembershipRepository,
    MessageRepository, PasswordHasher, ProjectRegistry, ProjectRepository, TokenService,
    UserDirectory, UserRepository,
};
use crate::domain::{
    AccountServiceImpl, ConversationService, MembershipService, ProjectRegistryService,
    UserDirectoryService,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountService>,
    pub directory: Arc<dyn UserDirectory>,
    pub projects: Arc<dyn ProjectRegistry>,
    pub memberships: Arc<dyn MembershipLifecycle>,
    pub conversations: Arc<dyn ConversationGate>,
    /// Resolves bearer tokens into caller identities.
    pub tokens: Arc<dyn TokenService>,
}

/// Driven adapters backing the domain services.
pub struct Repositories<U, P, M, Msg> {
    pub users: Arc<U>,
    pub projects: Arc<P>,
    pub memberships: Arc<M>,
    pub messages: Arc<Msg>,
}

impl HttpState {
    /// Wire every domain service over one set of repositories.
    ///
    /// The conversation gate consults the same membership lifecycle the
    /// handlers use, so authorization is evaluated against fresh records.
    pub fn assemble<U, P, M, Msg>(
        repositories: Repositories<U, P, M, Msg>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenService>,
        clock: Arc<dyn Clock>,
    ) -> Self
    where
        U: UserRepository + 'static,
        P: ProjectRepository + 'static,
        M: MembershipRepository + 'static,
        Msg: MessageRepository + 'static,
    {
        let Repositories {
            users,
            projects,
            memberships,
            messages,
        } = repositories;

        let lifecycle: Arc<dyn MembershipLifecycle> = Arc::new(MembershipService::new(
            Arc::clone(&projects),
            Arc::clone(&memberships),
            Arc::clone(&users),
            Arc::clone(&clock),
        ));

        Self {
            accounts: Arc::new(AccountServiceImpl::new(
                Arc::clone(&users),
                hasher,
                Arc::clone(&tokens),
                Arc::clone(&clock),
            )),
            directory: Arc::new(UserDirectoryService::new(
                Arc::clone(&users),
                Arc::clone(&clock),
            )),
            projects: Arc::new(ProjectRegistryService::new(
                Arc::clone(&projects),
                memberships,
                Arc::clone(&users),
                Arc::clone(&clock),
            )),
            memberships: Arc::clone(&lifecycle),
            conversations: Arc::new(ConversationService::new(
                projects, messages, users, lifecycle, clock,
            )),
            tokens,
        }
    }
}
