//! Builders and a fixed clock shared by domain service tests.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{
    DisplayName, Email, MembershipId, MembershipStatus, Project, ProjectId, ProjectMember,
    ProjectTitle, User, UserId,
};

pub(crate) fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

pub(crate) fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: fixture_timestamp(),
    })
}

pub(crate) fn user_id(raw: i64) -> UserId {
    UserId::new(raw).expect("valid user id")
}

pub(crate) fn project_id(raw: i64) -> ProjectId {
    ProjectId::new(raw).expect("valid project id")
}

pub(crate) fn sample_user(id: i64, name: &str) -> User {
    User {
        id: user_id(id),
        name: DisplayName::new(name).expect("valid name"),
        email: Email::new(format!("{}@x.com", name.to_lowercase())).expect("valid email"),
        password_hash: format!("hash-of-{name}"),
        skills: String::new(),
        bio: String::new(),
        created_at: fixture_timestamp(),
        updated_at: fixture_timestamp(),
    }
}

pub(crate) fn sample_project(id: i64, owner: i64) -> Project {
    Project {
        id: project_id(id),
        owner_id: user_id(owner),
        title: ProjectTitle::new(format!("Project {id}")).expect("valid title"),
        description: "description".to_owned(),
        category: "web".to_owned(),
        level: "beginner".to_owned(),
        created_at: fixture_timestamp(),
        updated_at: fixture_timestamp(),
    }
}

pub(crate) fn sample_member(
    id: i64,
    project: i64,
    user: i64,
    status: MembershipStatus,
) -> ProjectMember {
    ProjectMember {
        id: MembershipId::new(id).expect("valid membership id"),
        project_id: project_id(project),
        user_id: user_id(user),
        status,
        created_at: fixture_timestamp(),
        updated_at: fixture_timestamp(),
    }
}
