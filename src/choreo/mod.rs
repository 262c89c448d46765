pub(crate) mod choreographer;
pub(crate) mod entry;
pub(crate) mod state;
