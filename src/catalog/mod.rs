pub mod api;
pub mod resolver;

pub use resolver::IdentityResolver;
