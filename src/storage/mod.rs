pub mod link;
pub mod store;

pub use link::Link;
pub use store::LinkStore;
