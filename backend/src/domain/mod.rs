//! Domain primitives, aggregates, and services.
//!
//! Purpose: Define strongly typed domain entities used by the HTTP and
//! persistence layers, together with the services enforcing the access rules
//! of the exchange: who may edit a project, who may apply to it, who decides
//! applications, and who may take part in its conversation.
//!
//! Public surface:
//! - Error (alias to `error::Error`) — API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`) — stable error identifier.
//! - Caller (alias to `identity::Caller`) — resolved request identity.
//! - User, Project, ProjectMember, Message — stored aggregates.
//! - Services implementing the driving ports declared in [`ports`].

pub mod account_service;
pub mod auth;
pub mod conversation_service;
pub mod error;
pub mod identity;
pub mod ids;
pub mod membership;
pub mod membership_service;
pub mod message;
pub mod ports;
pub mod project;
pub mod project_registry_service;
pub(crate) mod service_support;
pub mod trace_id;
pub mod user;
pub mod user_directory_service;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use self::account_service::AccountServiceImpl;
pub use self::auth::{
    AccessToken, AuthSession, AuthValidationError, LoginCredentials, PASSWORD_MIN_LENGTH,
    Registration,
};
pub use self::conversation_service::ConversationService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::identity::Caller;
pub use self::ids::{IdValidationError, MembershipId, MessageId, ProjectId, UserId};
pub use self::membership::{
    MemberView, MembershipStatus, NewMembership, ProjectMember, UnknownMembershipStatus,
    grants_access,
};
pub use self::membership_service::MembershipService;
pub use self::message::{Message, MessageContent, MessageValidationError, MessageView, NewMessage};
pub use self::project::{
    NewProject, Project, ProjectDetails, ProjectDraft, ProjectFilter, ProjectTitle,
    ProjectUpdate, ProjectValidationError, ProjectView,
};
pub use self::project_registry_service::ProjectRegistryService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    DisplayName, Email, NewUser, ProfileUpdate, User, UserProfile, UserValidationError,
};
pub use self::user_directory_service::UserDirectoryService;
