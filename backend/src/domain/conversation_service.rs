//! Conversation gate service.
//!
//! Reading and posting share one gate: the project must exist, the caller
//! must be authenticated, and the membership lifecycle must report the caller
//! as authorized at the moment of the request.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::debug;

use crate::domain::ports::{
    ConversationGate, MembershipLifecycle, MessageRepository, ProjectRepository, UserRepository,
};
use crate::domain::service_support::{
    load_profile, load_profiles, load_project, map_message_repository_error,
};
use crate::domain::{Caller, Error, MessageContent, MessageView, NewMessage, ProjectId, UserId};

/// Gate service implementing the [`ConversationGate`] driving port.
#[derive(Clone)]
pub struct ConversationService<P, Msg, U> {
    projects: Arc<P>,
    messages: Arc<Msg>,
    users: Arc<U>,
    lifecycle: Arc<dyn MembershipLifecycle>,
    clock: Arc<dyn Clock>,
}

impl<P, Msg, U> ConversationService<P, Msg, U> {
    /// Create the gate. Authorization is delegated to `lifecycle`.
    pub fn new(
        projects: Arc<P>,
        messages: Arc<Msg>,
        users: Arc<U>,
        lifecycle: Arc<dyn MembershipLifecycle>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            projects,
            messages,
            users,
            lifecycle,
            clock,
        }
    }
}

impl<P, Msg, U> ConversationService<P, Msg, U>
where
    P: ProjectRepository,
    Msg: MessageRepository,
    U: UserRepository,
{
    async fn admit(&self, project_id: ProjectId, caller: Caller) -> Result<UserId, Error> {
        load_project(self.projects.as_ref(), project_id).await?;
        let user_id = caller.require()?;
        if !self.lifecycle.is_authorized(project_id, user_id).await? {
            debug!(project_id = %project_id, user_id = %user_id, "conversation access denied");
            return Err(Error::forbidden(
                "only the owner and accepted members can access this conversation",
            ));
        }
        Ok(user_id)
    }
}

#[async_trait]
impl<P, Msg, U> ConversationGate for ConversationService<P, Msg, U>
where
    P: ProjectRepository,
    Msg: MessageRepository,
    U: UserRepository,
{
    async fn post(
        &self,
        project_id: ProjectId,
        caller: Caller,
        content: MessageContent,
    ) -> Result<MessageView, Error> {
        let author_id = self.admit(project_id, caller).await?;
        let message = self
            .messages
            .create(&NewMessage {
                project_id,
                author_id,
                content,
                created_at: self.clock.utc(),
            })
            .await
            .map_err(map_message_repository_error)?;
        let author = load_profile(self.users.as_ref(), author_id).await?;
        Ok(MessageView { message, author })
    }

    async fn list(&self, project_id: ProjectId, caller: Caller) -> Result<Vec<MessageView>, Error> {
        self.admit(project_id, caller).await?;
        let messages = self
            .messages
            .list_for_project(project_id)
            .await
            .map_err(map_message_repository_error)?;
        let profiles = load_profiles(
            self.users.as_ref(),
            messages.iter().map(|message| message.author_id),
        )
        .await?;

        Ok(messages
            .into_iter()
            .map(|message| MessageView {
                author: profiles.get(&message.author_id).cloned(),
                message,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{
        MockMembershipLifecycle, MockMessageRepository, MockProjectRepository, MockUserRepository,
    };
    use crate::domain::test_fixtures::{
        fixture_clock, fixture_timestamp, project_id, sample_project, sample_user, user_id,
    };
    use crate::domain::{ErrorCode, Message, MessageId};
    use rstest::rstest;

    fn message(id: i64, author: i64, text: &str) -> Message {
        Message {
            id: MessageId::new(id).expect("valid message id"),
            project_id: project_id(1),
            author_id: user_id(author),
            content: MessageContent::new(text).expect("valid content"),
            created_at: fixture_timestamp(),
        }
    }

    fn service(
        messages: MockMessageRepository,
        lifecycle: MockMembershipLifecycle,
    ) -> ConversationService<MockProjectRepository, MockMessageRepository, MockUserRepository> {
        let mut projects = MockProjectRepository::new();
        projects
            .expect_find_by_id()
            .returning(|id| Ok((id == project_id(1)).then(|| sample_project(1, 2))));
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(|id| Ok(Some(sample_user(id.as_i64(), "Bob"))));
        users.expect_find_by_ids().returning(|ids| {
            Ok(ids
                .iter()
                .map(|id| sample_user(id.as_i64(), if id.as_i64() == 2 { "Bob" } else { "Carol" }))
                .collect())
        });
        ConversationService::new(
            Arc::new(projects),
            Arc::new(messages),
            Arc::new(users),
            Arc::new(lifecycle),
            fixture_clock(),
        )
    }

    fn lifecycle_allowing(allowed: bool) -> MockMembershipLifecycle {
        let mut lifecycle = MockMembershipLifecycle::new();
        lifecycle
            .expect_is_authorized()
            .returning(move |_, _| Ok(allowed));
        lifecycle
    }

    #[tokio::test]
    async fn authorized_post_stores_author_and_time() {
        let mut messages = MockMessageRepository::new();
        messages
            .expect_create()
            .withf(|new| {
                new.author_id == user_id(3)
                    && new.content.as_str() == "Hi"
                    && new.created_at == fixture_timestamp()
            })
            .times(1)
            .return_once(|_| Ok(message(1, 3, "Hi")));

        let view = service(messages, lifecycle_allowing(true))
            .post(
                project_id(1),
                Caller::User(user_id(3)),
                MessageContent::new("Hi").expect("valid content"),
            )
            .await
            .expect("post succeeds");

        assert_eq!(view.message.content.as_str(), "Hi");
        assert!(view.author.is_some());
    }

    #[rstest]
    #[case(9, Caller::User(user_id(3)), true, ErrorCode::NotFound)]
    #[case(1, Caller::Anonymous, true, ErrorCode::Unauthorized)]
    #[case(1, Caller::User(user_id(3)), false, ErrorCode::Forbidden)]
    #[tokio::test]
    async fn gate_checks_existence_identity_then_authorization(
        #[case] target: i64,
        #[case] caller: Caller,
        #[case] allowed: bool,
        #[case] expected: ErrorCode,
    ) {
        let mut messages = MockMessageRepository::new();
        messages.expect_create().times(0);
        messages.expect_list_for_project().times(0);
        let service = service(messages, lifecycle_allowing(allowed));

        let post = service
            .post(
                project_id(target),
                caller,
                MessageContent::new("Hi").expect("valid content"),
            )
            .await
            .expect_err("post must fail");
        let list = service
            .list(project_id(target), caller)
            .await
            .expect_err("list must fail");

        assert_eq!(post.code(), expected);
        assert_eq!(list.code(), expected);
    }

    #[tokio::test]
    async fn list_keeps_storage_order_and_attaches_authors() {
        let mut messages = MockMessageRepository::new();
        messages
            .expect_list_for_project()
            .return_once(|_| Ok(vec![message(1, 2, "Hi"), message(2, 3, "Hello")]));

        let views = service(messages, lifecycle_allowing(true))
            .list(project_id(1), Caller::User(user_id(2)))
            .await
            .expect("list succeeds");

        let rendered: Vec<_> = views
            .iter()
            .map(|view| {
                (
                    view.message.content.as_str(),
                    view.author.as_ref().map(|author| author.name.as_str()),
                )
            })
            .collect();
        assert_eq!(rendered, vec![("Hi", Some("Bob")), ("Hello", Some("Carol"))]);
    }
}
