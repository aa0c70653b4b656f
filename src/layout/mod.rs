pub(crate) mod compose;
pub(crate) mod geometry;
pub(crate) mod model;
pub(crate) mod polaroid;
