pub mod draft;
pub mod link_service;
pub mod opener;
pub mod search;

pub use draft::{Draft, Field};
pub use link_service::LinkService;
pub use opener::Opener;
pub use search::EmptyState;
