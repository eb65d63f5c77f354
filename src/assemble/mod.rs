pub(crate) mod animated;
pub(crate) mod background;
pub(crate) mod document;
pub(crate) mod ids;
pub(crate) mod timing;
