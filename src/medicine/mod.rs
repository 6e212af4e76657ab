pub mod analysis;
pub mod api;

pub use analysis::label::LabelLookup;
