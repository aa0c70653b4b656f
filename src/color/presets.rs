use crate::{
    color::matrix::ColorMatrix,
    foundation::error::{BoothError, BoothResult},
};

/// Named film-emulation preset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Preset {
    None,
    BnW,
    Kodak,
    FujiFilm,
    Nikon,
    Pentax,
    Minolta,
    Warm,
    Mono,
    ClassicSepia,
}

impl Preset {
    pub const ALL: [Preset; 10] = [
        Preset::None,
        Preset::BnW,
        Preset::Kodak,
        Preset::FujiFilm,
        Preset::Nikon,
        Preset::Pentax,
        Preset::Minolta,
        Preset::Warm,
        Preset::Mono,
        Preset::ClassicSepia,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Preset::None => "None",
            Preset::BnW => "BnW",
            Preset::Kodak => "Kodak",
            Preset::FujiFilm => "FujiFilm",
            Preset::Nikon => "Nikon",
            Preset::Pentax => "Pentax",
            Preset::Minolta => "Minolta",
            Preset::Warm => "Warm",
            Preset::Mono => "Mono",
            Preset::ClassicSepia => "ClassicSepia",
        }
    }

    pub fn matrix(self) -> ColorMatrix {
        match self {
            Preset::None => ColorMatrix::IDENTITY,
            Preset::BnW => ColorMatrix::from_rows([[0.0, 1.0, 0.0, 0.0, 0.0]; 4]),
            Preset::Kodak => ColorMatrix::from_rows([
                [1.0, 0.0, 0.0, 0.0, 0.0],
                [-0.4, 1.3, -0.4, 0.2, -0.1],
                [0.0, 0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 0.0, 1.0, 0.0],
            ]),
            Preset::FujiFilm => ColorMatrix::from_rows([
                [1.0, 0.0, 0.0, 1.7, -1.7],
                [0.6, 1.0, 0.0, 0.0, 0.3],
                [-0.2, 0.0, 1.0, 0.0, 0.0],
                [0.1, 0.0, 0.0, 0.6, 0.2],
            ]),
            Preset::Nikon => ColorMatrix::from_rows([
                [1.3, -0.3, 1.1, 0.0, 0.0],
                [0.0, 1.3, 0.2, 0.0, 0.0],
                [0.0, 0.0, 0.8, 0.2, 0.0],
                [0.0, 0.0, 0.0, 1.0, 0.0],
            ]),
            Preset::Pentax => ColorMatrix::from_rows([
                [0.0, 1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0, 0.0],
                [0.0, 0.6, 1.0, 0.0, 0.0],
                [0.0, 0.0, 0.0, 1.0, 0.0],
            ]),
            Preset::Minolta => ColorMatrix::from_rows([
                [1.0, 0.0, 0.0, 0.0, 0.0],
                [-0.2, 1.0, 0.3, 0.1, 0.0],
                [0.0, 0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 0.0, 1.0, 0.0],
            ]),
            Preset::Warm => ColorMatrix::scale(1.1, 1.0, 0.9, 1.0),
            Preset::Mono => {
                let t = 1.0 / 3.0;
                ColorMatrix::from_rows([
                    [t, t, t, 0.0, 0.0],
                    [t, t, t, 0.0, 0.0],
                    [t, t, t, 0.0, 0.0],
                    [0.0, 0.0, 0.0, 1.0, 0.0],
                ])
            }
            Preset::ClassicSepia => ColorMatrix::from_rows([
                [0.393, 0.769, 0.189, 0.0, 0.0],
                [0.349, 0.686, 0.168, 0.0, 0.0],
                [0.272, 0.534, 0.131, 0.0, 0.0],
                [0.0, 0.0, 0.0, 1.0, 0.0],
            ]),
        }
    }
}

/// Case-insensitive preset lookup.
pub fn preset_by_name(name: &str) -> BoothResult<Preset> {
    let wanted = name.trim();
    Preset::ALL
        .into_iter()
        .find(|p| p.name().eq_ignore_ascii_case(wanted))
        .ok_or_else(|| BoothError::validation(format!("unknown preset \"{name}\"")))
}

/// Filter applied uniformly to every photo of a composition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageFilter {
    #[default]
    Original,
    BlackAndWhite,
    Sepia,
}

impl ImageFilter {
    pub fn matrix(self) -> ColorMatrix {
        match self {
            ImageFilter::Original => ColorMatrix::IDENTITY,
            ImageFilter::BlackAndWhite => ColorMatrix::saturation_factor(0.0),
            ImageFilter::Sepia => ColorMatrix::saturation_factor(0.0)
                .post_concat(&ColorMatrix::scale(1.0, 0.95, 0.82, 1.0)),
        }
    }
}

/// Per-composition filter selection.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FilterChoice {
    Image(ImageFilter),
    Preset(String),
    Matrix(ColorMatrix),
}

impl Default for FilterChoice {
    fn default() -> Self {
        FilterChoice::Image(ImageFilter::Original)
    }
}

impl FilterChoice {
    pub fn resolve(&self) -> BoothResult<ColorMatrix> {
        match self {
            FilterChoice::Image(f) => Ok(f.matrix()),
            FilterChoice::Preset(name) => Ok(preset_by_name(name)?.matrix()),
            FilterChoice::Matrix(m) => Ok(*m),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/color/presets.rs"]
mod tests;
