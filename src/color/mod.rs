pub(crate) mod matrix;
pub(crate) mod presets;
