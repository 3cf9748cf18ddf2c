pub(crate) mod photo;
pub(crate) mod style;
pub(crate) mod template;
