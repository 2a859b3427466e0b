//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Status and role
//! columns are plain text guarded by `CHECK` constraints in the migration.

diesel::table! {
    /// Student and administrator accounts.
    users (id) {
        id -> Uuid,
        username -> Varchar,
        name -> Varchar,
        room_number -> Nullable<Varchar>,
        phone -> Nullable<Varchar>,
        parent_phone -> Nullable<Varchar>,
        /// `student` or `admin`.
        role -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    outpass_requests (id) {
        id -> Uuid,
        student_id -> Uuid,
        reason -> Text,
        leave_time -> Timestamptz,
        return_time -> Timestamptz,
        /// `Pending`, `Approved` or `Rejected`.
        status -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    complaints (id) {
        id -> Uuid,
        student_id -> Uuid,
        body -> Text,
        /// `Open`, `In Progress` or `Resolved`.
        status -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    leave_forms (id) {
        id -> Uuid,
        student_id -> Uuid,
        file_reference -> Text,
        uploaded_at -> Timestamptz,
    }
}

diesel::table! {
    /// One row per student per day, enforced by a unique index.
    attendance (id) {
        id -> Uuid,
        date -> Date,
        student_id -> Uuid,
        location -> Varchar,
        marked_by -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// One row per date, enforced by a unique index.
    hostel_info (id) {
        id -> Uuid,
        date -> Date,
        mess_menu -> Text,
        notice -> Text,
        warden_contacts -> Jsonb,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(outpass_requests -> users (student_id));
diesel::joinable!(complaints -> users (student_id));
diesel::joinable!(leave_forms -> users (student_id));
diesel::joinable!(attendance -> users (student_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    outpass_requests,
    complaints,
    leave_forms,
    attendance,
    hostel_info,
);
