//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories, credentials) are implemented by outbound
//! adapters. Driving ports (accounts, directory, registry, membership,
//! conversation) are implemented by domain services and called by inbound
//! adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod account_service;
mod conversation_gate;
mod credentials;
mod membership_lifecycle;
mod membership_repository;
mod message_repository;
mod project_registry;
mod project_repository;
mod user_directory;
mod user_repository;

pub use account_service::AccountService;
pub use conversation_gate::ConversationGate;
#[cfg(test)]
pub use credentials::{MockPasswordHasher, MockTokenService};
pub use credentials::{CredentialError, PasswordHasher, TokenService};
#[cfg(test)]
pub use membership_lifecycle::MockMembershipLifecycle;
pub use membership_lifecycle::MembershipLifecycle;
#[cfg(test)]
pub use membership_repository::MockMembershipRepository;
pub use membership_repository::{MembershipRepository, MembershipRepositoryError};
#[cfg(test)]
pub use message_repository::MockMessageRepository;
pub use message_repository::{MessageRepository, MessageRepositoryError};
pub use project_registry::ProjectRegistry;
#[cfg(test)]
pub use project_repository::MockProjectRepository;
pub use project_repository::{ProjectRepository, ProjectRepositoryError};
pub use user_directory::UserDirectory;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
