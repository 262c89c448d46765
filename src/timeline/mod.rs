pub(crate) mod phase;
