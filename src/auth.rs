//! Auth-domain identifiers, principals, and bearer tokens.

pub mod id;
pub mod principal;
pub mod token;

pub use id::*;
pub use principal::*;
pub use token::*;
