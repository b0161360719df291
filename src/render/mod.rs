pub(crate) mod cpu;
pub(crate) mod encode;
pub(crate) mod frame;
pub(crate) mod passes;
pub(crate) mod pipeline;
