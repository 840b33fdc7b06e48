pub(crate) mod data;
pub(crate) mod date;
pub(crate) mod sign;
