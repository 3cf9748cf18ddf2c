pub(crate) mod background;
pub(crate) mod codec;
pub(crate) mod surface;
