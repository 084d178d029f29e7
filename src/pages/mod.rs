//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Pages are ordinary CRUD screens consuming the session contract; they
//! never read storage keys or derive roles themselves.

pub mod admin_home;
pub mod home;
pub mod landing;
pub mod login;
pub mod profile;
