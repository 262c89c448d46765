pub(crate) mod compile;
pub mod header;
pub(crate) mod model;
pub(crate) mod text;
