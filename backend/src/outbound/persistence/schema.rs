//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts. Rows are soft-deleted via `deleted_at`.
    users (id) {
        id -> Int8,
        name -> Text,
        /// Lowercased address, unique among live accounts.
        email -> Text,
        /// Argon2id hash in PHC string format.
        password_hash -> Text,
        skills -> Text,
        bio -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        deleted_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Published projects. Rows are soft-deleted via `deleted_at`.
    projects (id) {
        id -> Int8,
        owner_id -> Int8,
        title -> Text,
        description -> Text,
        category -> Text,
        level -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        deleted_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Join requests; one row per (project, user) pair.
    project_members (id) {
        id -> Int8,
        project_id -> Int8,
        user_id -> Int8,
        /// One of `pending`, `accepted`, `rejected`.
        status -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only project conversation.
    messages (id) {
        id -> Int8,
        project_id -> Int8,
        author_id -> Int8,
        content -> Text,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(projects -> users (owner_id));
diesel::joinable!(project_members -> projects (project_id));
diesel::joinable!(project_members -> users (user_id));
diesel::joinable!(messages -> projects (project_id));
diesel::joinable!(messages -> users (author_id));

diesel::allow_tables_to_appear_in_same_query!(users, projects, project_members, messages);
