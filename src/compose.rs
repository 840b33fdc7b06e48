pub(crate) mod intro;
pub(crate) mod outro;
pub(crate) mod sequence;
pub(crate) mod sign;
