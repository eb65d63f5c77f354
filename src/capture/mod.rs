pub(crate) mod engine;
pub mod messages;
pub(crate) mod normalize;
pub(crate) mod session;
