pub(crate) mod layout;
pub(crate) mod model;
pub(crate) mod number;
pub(crate) mod progress;
