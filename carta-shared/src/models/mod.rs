/// Data models for Carta
///
/// This module contains the structures the admin API reads from the hosted
/// backend. Unlike a conventional model layer there are no CRUD methods here:
/// every query and mutation goes through [`crate::backend::PlatformBackend`],
/// and these types only describe the rows and identities that come back.
///
/// # Models
///
/// - `identity`: An authenticated identity resolved from a bearer token
/// - `restaurant`: A restaurant row, consumed for ownership checks
pub mod identity;
pub mod restaurant;

pub use identity::Identity;
pub use restaurant::Restaurant;
