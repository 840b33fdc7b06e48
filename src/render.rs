pub(crate) mod backend;
pub(crate) mod cpu;
pub(crate) mod intro;
pub(crate) mod outro;
pub(crate) mod plan;
pub(crate) mod ring;
pub(crate) mod sign;
