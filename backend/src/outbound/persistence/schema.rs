//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, this file should be regenerated or
//! manually updated to reflect those changes. The `diesel print-schema`
//! command can generate these definitions from a live database.

diesel::table! {
    /// Registered user accounts.
    ///
    /// The `id` column is the primary key (UUID v4); `username` carries a
    /// unique constraint.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique login name (max 32 characters).
        username -> Varchar,
        /// Hex-encoded SHA-256 digest of the password.
        password_hash -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Product catalog.
    products (id) {
        /// Primary key: serial numeric id.
        id -> Int4,
        name -> Varchar,
        description -> Text,
        /// Unit price in the shop currency.
        price -> Numeric,
        category -> Varchar,
        image_url -> Varchar,
        /// Units in stock; defaults to zero.
        count_in_stock -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// One cart record per user.
    ///
    /// Line items live in a `jsonb` array, preserving the ordered
    /// document-per-user shape of the cart record.
    carts (user_id) {
        /// Primary key: owning user's UUID.
        user_id -> Uuid,
        /// Ordered array of `{productId, quantity}` objects.
        items -> Jsonb,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Immutable order snapshots, one row per checkout.
    orders (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// User who placed the order.
        user_id -> Uuid,
        /// Snapshot array of `{productId, quantity}` objects.
        products -> Jsonb,
        /// Total amount as submitted by the client.
        amount -> Numeric,
        /// Free-form structured shipping data.
        address -> Jsonb,
        /// Fulfilment status string (pending/shipped/delivered).
        status -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, products, carts, orders);
