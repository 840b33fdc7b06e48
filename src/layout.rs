pub(crate) mod measure;
pub(crate) mod text;
pub(crate) mod wrap;
