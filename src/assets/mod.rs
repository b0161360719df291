pub(crate) mod color;
pub(crate) mod decode;
pub(crate) mod source;
pub(crate) mod store;
pub(crate) mod text;
