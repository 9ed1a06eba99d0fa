mod caller;
mod principal;

pub use caller::{principal_from_headers, Caller, IdentityHeader, DEFAULT_IDENTITY_HEADER};
pub use principal::Principal;
