use crate::{
    buffer::pixel::PixelBuffer,
    color::matrix::ColorMatrix,
    color::presets::{Preset, preset_by_name},
    effects::{convolution, procedural},
    foundation::error::{BoothError, BoothResult},
};

/// JSON description of one effect step: `{ "kind": "...", "params": {...} }`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EffectInstance {
    pub kind: String,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub params: serde_json::Value,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    Brightness { value: f32 },
    Contrast { value: f32 },
    Saturation { value: f32 },
    Temperature { value: f32 },
    Preset { preset: Preset },
    Sharpen { intensity: f32 },
    Highlight { amount: f32 },
    Shadow { amount: f32 },
    ChromaticAberration { intensity: f32 },
    Distortion { label: String },
    LightLeak { label: String },
    Scratch { label: String },
    Grain { intensity: f32, seed: Option<u64> },
    Vignette { intensity: f32 },
}

impl Effect {
    /// Run this single step, returning a new buffer.
    pub fn apply(&self, buffer: &PixelBuffer) -> BoothResult<PixelBuffer> {
        match self {
            Effect::Brightness { value } => ColorMatrix::brightness(*value).apply(buffer),
            Effect::Contrast { value } => ColorMatrix::contrast(*value).apply(buffer),
            Effect::Saturation { value } => ColorMatrix::saturation(*value).apply(buffer),
            Effect::Temperature { value } => ColorMatrix::temperature(*value).apply(buffer),
            Effect::Preset { preset } => preset.matrix().apply(buffer),
            Effect::Sharpen { intensity } => Ok(convolution::sharpen(buffer, *intensity)),
            Effect::Highlight { amount } => Ok(convolution::highlight(buffer, *amount)),
            Effect::Shadow { amount } => Ok(convolution::shadow(buffer, *amount)),
            Effect::ChromaticAberration { intensity } => {
                Ok(procedural::chromatic_aberration(buffer, *intensity))
            }
            Effect::Distortion { label } => Ok(procedural::distortion(buffer, label)),
            Effect::LightLeak { label } => Ok(procedural::light_leak(buffer, label)),
            Effect::Scratch { label } => procedural::scratch(buffer, label),
            Effect::Grain { intensity, seed } => Ok(procedural::grain(buffer, *intensity, *seed)),
            Effect::Vignette { intensity } => Ok(procedural::vignette(buffer, *intensity)),
        }
    }

    fn is_noop(&self) -> bool {
        match self {
            Effect::Brightness { value }
            | Effect::Contrast { value }
            | Effect::Saturation { value } => *value == 0.0,
            Effect::Temperature { value } => *value == 1.0,
            Effect::Preset { preset } => *preset == Preset::None,
            Effect::Sharpen { intensity }
            | Effect::ChromaticAberration { intensity }
            | Effect::Grain { intensity, .. }
            | Effect::Vignette { intensity } => *intensity == 0.0,
            Effect::Highlight { amount } | Effect::Shadow { amount } => *amount == 0.0,
            Effect::Distortion { .. } | Effect::LightLeak { .. } | Effect::Scratch { .. } => false,
        }
    }
}

pub fn parse_effect(inst: &EffectInstance) -> BoothResult<Effect> {
    let kind = inst.kind.trim().to_ascii_lowercase();
    if kind.is_empty() {
        return Err(BoothError::validation("effect kind must be non-empty"));
    }
    let p = &inst.params;

    match kind.as_str() {
        "brightness" => Ok(Effect::Brightness {
            value: get_ranged(p, "value", -1.0, 1.0)?,
        }),
        "contrast" => Ok(Effect::Contrast {
            value: get_ranged(p, "value", -1.0, 1.0)?,
        }),
        "saturation" => Ok(Effect::Saturation {
            value: get_ranged(p, "value", -1.0, 1.0)?,
        }),
        "temperature" => Ok(Effect::Temperature {
            value: get_ranged(p, "value", -3.0, 3.0)?,
        }),
        "preset" => Ok(Effect::Preset {
            preset: preset_by_name(&get_str(p, "name")?)?,
        }),
        "sharpen" | "sharpness" => Ok(Effect::Sharpen {
            intensity: get_ranged(p, "intensity", 0.0, 1.0)?,
        }),
        "highlight" | "highlights" => Ok(Effect::Highlight {
            amount: get_ranged(p, "amount", -1.0, 1.0)?,
        }),
        "shadow" | "shadows" => Ok(Effect::Shadow {
            amount: get_ranged(p, "amount", -1.0, 1.0)?,
        }),
        "chromaticaberration" | "chromatic_aberration" | "chromatic-aberration" => {
            Ok(Effect::ChromaticAberration {
                intensity: get_ranged(p, "intensity", 0.0, 1.0)?,
            })
        }
        "distortion" => Ok(Effect::Distortion {
            label: get_str(p, "label")?,
        }),
        "lightleak" | "light_leak" | "light-leak" => Ok(Effect::LightLeak {
            label: get_str(p, "label")?,
        }),
        "scratch" | "scratches" => Ok(Effect::Scratch {
            label: get_str(p, "label")?,
        }),
        "grain" => {
            let intensity = get_ranged(p, "intensity", 0.0, 1.0)?;
            let seed = match p.get("seed") {
                None | Some(serde_json::Value::Null) => None,
                Some(v) => Some(v.as_u64().ok_or_else(|| {
                    BoothError::validation("Grain.seed must be a non-negative integer")
                })?),
            };
            Ok(Effect::Grain { intensity, seed })
        }
        "vignette" => Ok(Effect::Vignette {
            intensity: get_ranged(p, "intensity", 0.0, 1.0)?,
        }),
        _ => Err(BoothError::validation(format!(
            "unknown effect kind '{kind}'"
        ))),
    }
}

/// Drop steps that leave every pixel unchanged, keeping the rest in order.
pub fn normalize_effects(effects: &[Effect]) -> Vec<Effect> {
    effects.iter().filter(|e| !e.is_noop()).cloned().collect()
}

/// Ordered effect steps applied one after another.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EffectChain {
    pub effects: Vec<Effect>,
}

impl EffectChain {
    pub fn new(effects: Vec<Effect>) -> Self {
        Self { effects }
    }

    /// Parse and normalize JSON effect descriptions.
    pub fn from_instances(instances: &[EffectInstance]) -> BoothResult<Self> {
        let parsed = instances
            .iter()
            .map(parse_effect)
            .collect::<BoothResult<Vec<_>>>()?;
        Ok(Self::new(normalize_effects(&parsed)))
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Apply every step in order; the input is never modified.
    #[tracing::instrument(skip_all, fields(steps = self.effects.len()))]
    pub fn apply(&self, buffer: &PixelBuffer) -> BoothResult<PixelBuffer> {
        let mut current = buffer.copy();
        for effect in &self.effects {
            tracing::debug!(?effect, "applying effect");
            current = effect.apply(&current)?;
        }
        Ok(current)
    }
}

fn get_str(obj: &serde_json::Value, key: &str) -> BoothResult<String> {
    let Some(v) = obj.get(key) else {
        return Err(BoothError::validation(format!(
            "missing effect param '{key}'"
        )));
    };
    let Some(s) = v.as_str() else {
        return Err(BoothError::validation(format!(
            "effect param '{key}' must be a string"
        )));
    };
    Ok(s.to_owned())
}

fn get_f32(obj: &serde_json::Value, key: &str) -> BoothResult<f32> {
    let Some(v) = obj.get(key) else {
        return Err(BoothError::validation(format!(
            "missing effect param '{key}'"
        )));
    };
    let Some(n) = v.as_f64() else {
        return Err(BoothError::validation(format!(
            "effect param '{key}' must be a number"
        )));
    };
    let n = n as f32;
    if !n.is_finite() {
        return Err(BoothError::validation(format!(
            "effect param '{key}' must be finite"
        )));
    }
    Ok(n)
}

fn get_ranged(obj: &serde_json::Value, key: &str, min: f32, max: f32) -> BoothResult<f32> {
    let n = get_f32(obj, key)?;
    if n < min || n > max {
        return Err(BoothError::validation(format!(
            "effect param '{key}' must be in [{min}, {max}], got {n}"
        )));
    }
    Ok(n)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/fx.rs"]
mod tests;
