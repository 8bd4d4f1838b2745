//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` when a migration changes the table.

diesel::table! {
    /// User accounts owned by the user service and read by admin reports.
    ///
    /// Rows with `deleted_at` set are soft deleted.
    users (id) {
        /// Primary key, assigned by the sequence.
        id -> Int8,
        /// Unique login name.
        username -> Varchar,
        /// Unique contact address.
        email -> Varchar,
        first_name -> Nullable<Varchar>,
        last_name -> Nullable<Varchar>,
        /// Role label (`admin`, `user`, `moderator`); may be null.
        role -> Nullable<Varchar>,
        is_active -> Bool,
        /// Creation timestamp; drives report periods.
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        /// Soft-deletion marker.
        deleted_at -> Nullable<Timestamptz>,
    }
}
