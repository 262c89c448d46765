pub(crate) mod host;
pub(crate) mod progress;
pub(crate) mod session;
