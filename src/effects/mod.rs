pub(crate) mod convolution;
pub(crate) mod fx;
pub(crate) mod overlay;
pub(crate) mod procedural;
