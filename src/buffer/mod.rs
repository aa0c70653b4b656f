pub(crate) mod capture;
pub(crate) mod decode;
pub(crate) mod pixel;
