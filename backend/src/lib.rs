//! Backend library modules.
//!
//! A project-exchange service: accounts with bearer tokens, a project
//! registry, join requests decided by project owners, and per-project
//! conversations open to the owner and accepted members.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
