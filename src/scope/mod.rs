//! Commit scope derivation from path arguments and staged files.

pub mod derive;
pub mod resolve;
pub mod root;

pub use derive::{DerivationMode, ScopeContext, derive_scope};
pub use resolve::{Resolution, common_ancestor, resolve_full_name};
pub use root::{RootTarget, reduce_to_root, strip_extensions};
