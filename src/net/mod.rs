//! Network boundary: backend REST helpers, identity provider, wire types.

pub mod api;
pub mod identity;
pub mod types;
