mod catalog;
mod teams;

pub use catalog::ActionCatalog;
pub use teams::TeamRegistry;
