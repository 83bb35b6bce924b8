mod provider;
mod store;
mod validate;
mod yaml;

pub use provider::{ContentProvider, FileContentProvider};
pub use store::ConfigStore;
pub use validate::Validate;
pub use yaml::{from_yaml, to_yaml};
