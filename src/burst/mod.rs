pub(crate) mod ease;
pub(crate) mod record;
pub(crate) mod sync;
pub(crate) mod validate;
