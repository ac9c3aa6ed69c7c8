pub mod directory;
pub mod factory;
pub mod identity;
pub mod policy;
pub mod token_codec;

pub use directory::UserDirectory;
pub use factory::{build_access_policy, build_token_codec};
pub use identity::{Identity, Role};
pub use policy::{Access, AccessPolicy, Denial, OperationPolicy};
pub use token_codec::TokenCodec;
