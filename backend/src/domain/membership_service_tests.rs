//! Tests for the membership lifecycle service.

use std::sync::Arc;

use rstest::rstest;

use super::*;
use crate::domain::ports::{
    MembershipRepositoryError, MockMembershipRepository, MockProjectRepository,
    MockUserRepository,
};
use crate::domain::test_fixtures::{
    fixture_clock, fixture_timestamp, project_id, sample_member, sample_project, sample_user,
    user_id,
};
use crate::domain::ErrorCode;

type Service = MembershipService<MockProjectRepository, MockMembershipRepository, MockUserRepository>;

/// Project 1 owned by user 2.
fn projects() -> MockProjectRepository {
    let mut projects = MockProjectRepository::new();
    projects
        .expect_find_by_id()
        .returning(|id| Ok((id == project_id(1)).then(|| sample_project(1, 2))));
    projects
}

fn users() -> MockUserRepository {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(|id| Ok(Some(sample_user(id.as_i64(), "Carol"))));
    users
}

/// Membership store holding at most one record for user 3 on project 1.
fn memberships_with(status: Option<MembershipStatus>) -> MockMembershipRepository {
    let mut memberships = MockMembershipRepository::new();
    memberships.expect_find().returning(move |project, user| {
        Ok(status
            .filter(|_| project == project_id(1) && user == user_id(3))
            .map(|status| sample_member(7, 1, 3, status)))
    });
    memberships
}

fn service(memberships: MockMembershipRepository) -> Service {
    MembershipService::new(
        Arc::new(projects()),
        Arc::new(memberships),
        Arc::new(users()),
        fixture_clock(),
    )
}

#[tokio::test]
async fn apply_creates_pending_record() {
    let mut memberships = memberships_with(None);
    memberships
        .expect_create()
        .withf(|new| {
            new.project_id == project_id(1)
                && new.user_id == user_id(3)
                && new.created_at == fixture_timestamp()
        })
        .times(1)
        .return_once(|_| Ok(sample_member(7, 1, 3, MembershipStatus::Pending)));

    let view = service(memberships)
        .apply(project_id(1), Caller::User(user_id(3)))
        .await
        .expect("application succeeds");

    assert_eq!(view.member.status, MembershipStatus::Pending);
    assert!(view.user.is_some());
}

#[rstest]
#[case(9, Caller::User(user_id(3)), ErrorCode::NotFound)]
#[case(1, Caller::Anonymous, ErrorCode::Unauthorized)]
#[case(1, Caller::User(user_id(2)), ErrorCode::InvalidRequest)]
#[tokio::test]
async fn apply_checks_existence_identity_then_ownership(
    #[case] target: i64,
    #[case] caller: Caller,
    #[case] expected: ErrorCode,
) {
    let mut memberships = memberships_with(None);
    memberships.expect_create().times(0);

    let error = service(memberships)
        .apply(project_id(target), caller)
        .await
        .expect_err("apply must fail");

    assert_eq!(error.code(), expected);
}

#[rstest]
#[case(MembershipStatus::Pending)]
#[case(MembershipStatus::Accepted)]
#[case(MembershipStatus::Rejected)]
#[tokio::test]
async fn second_application_conflicts_whatever_the_status(#[case] existing: MembershipStatus) {
    let mut memberships = memberships_with(Some(existing));
    memberships.expect_create().times(0);

    let error = service(memberships)
        .apply(project_id(1), Caller::User(user_id(3)))
        .await
        .expect_err("duplicate application");

    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[tokio::test]
async fn racing_application_maps_duplicate_to_conflict() {
    let mut memberships = memberships_with(None);
    memberships
        .expect_create()
        .return_once(|_| Err(MembershipRepositoryError::duplicate()));

    let error = service(memberships)
        .apply(project_id(1), Caller::User(user_id(3)))
        .await
        .expect_err("duplicate application");

    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[rstest]
#[case(MembershipStatus::Pending)]
#[case(MembershipStatus::Rejected)]
#[case(MembershipStatus::Accepted)]
#[tokio::test]
async fn owner_accepts_from_any_status(#[case] prior: MembershipStatus) {
    let mut memberships = memberships_with(Some(prior));
    memberships
        .expect_update_status()
        .withf(|id, status, at| {
            id.as_i64() == 7 && *status == MembershipStatus::Accepted && *at == fixture_timestamp()
        })
        .times(1)
        .return_once(|_, _, _| Ok(()));

    let view = service(memberships)
        .accept(project_id(1), user_id(3), Caller::User(user_id(2)))
        .await
        .expect("owner accepts");

    assert_eq!(view.member.status, MembershipStatus::Accepted);
    assert_eq!(view.member.updated_at, fixture_timestamp());
}

#[tokio::test]
async fn owner_rejects_pending_application() {
    let mut memberships = memberships_with(Some(MembershipStatus::Pending));
    memberships
        .expect_update_status()
        .withf(|_, status, _| *status == MembershipStatus::Rejected)
        .times(1)
        .return_once(|_, _, _| Ok(()));

    let view = service(memberships)
        .reject(project_id(1), user_id(3), Caller::User(user_id(2)))
        .await
        .expect("owner rejects");

    assert_eq!(view.member.status, MembershipStatus::Rejected);
}

#[rstest]
#[case(Some(MembershipStatus::Pending))]
#[case(Some(MembershipStatus::Accepted))]
#[case(None)]
#[tokio::test]
async fn non_owner_decision_is_forbidden_regardless_of_state(
    #[case] existing: Option<MembershipStatus>,
) {
    let mut memberships = memberships_with(existing);
    memberships.expect_update_status().times(0);
    let service = service(memberships);

    for caller in [user_id(3), user_id(4)] {
        let accept = service
            .accept(project_id(1), user_id(3), Caller::User(caller))
            .await
            .expect_err("non-owner accept");
        let reject = service
            .reject(project_id(1), user_id(3), Caller::User(caller))
            .await
            .expect_err("non-owner reject");
        assert_eq!(accept.code(), ErrorCode::Forbidden);
        assert_eq!(reject.code(), ErrorCode::Forbidden);
    }
}

#[tokio::test]
async fn decision_without_application_is_not_found() {
    let mut memberships = memberships_with(None);
    memberships.expect_update_status().times(0);

    let error = service(memberships)
        .accept(project_id(1), user_id(3), Caller::User(user_id(2)))
        .await
        .expect_err("no application");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn anonymous_decision_is_unauthorized() {
    let error = service(memberships_with(None))
        .accept(project_id(1), user_id(3), Caller::Anonymous)
        .await
        .expect_err("anonymous accept");

    assert_eq!(error.code(), ErrorCode::Unauthorized);
}

#[rstest]
#[case(2, None, true)]
#[case(3, None, false)]
#[case(3, Some(MembershipStatus::Pending), false)]
#[case(3, Some(MembershipStatus::Rejected), false)]
#[case(3, Some(MembershipStatus::Accepted), true)]
#[tokio::test]
async fn authorization_follows_ownership_and_acceptance(
    #[case] user: i64,
    #[case] existing: Option<MembershipStatus>,
    #[case] expected: bool,
) {
    let authorized = service(memberships_with(existing))
        .is_authorized(project_id(1), user_id(user))
        .await
        .expect("authorization check");

    assert_eq!(authorized, expected);
}

#[tokio::test]
async fn missing_project_is_never_authorized() {
    let mut memberships = MockMembershipRepository::new();
    memberships.expect_find().times(0);

    let authorized = service(memberships)
        .is_authorized(project_id(9), user_id(2))
        .await
        .expect("authorization check");

    assert!(!authorized);
}
