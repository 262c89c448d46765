pub(crate) mod builder;
pub(crate) mod element;
pub(crate) mod segment;
