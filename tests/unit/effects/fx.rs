use super::*;
use crate::foundation::core::Rgba8;

fn inst(kind: &str, params: serde_json::Value) -> EffectInstance {
    EffectInstance {
        kind: kind.to_string(),
        params,
    }
}

#[test]
fn parse_accepts_known_kinds() {
    assert_eq!(
        parse_effect(&inst("Brightness", serde_json::json!({"value": 0.2}))).unwrap(),
        Effect::Brightness { value: 0.2 }
    );
    assert_eq!(
        parse_effect(&inst("light-leak", serde_json::json!({"label": "leak-A"}))).unwrap(),
        Effect::LightLeak {
            label: "leak-A".into()
        }
    );
    assert_eq!(
        parse_effect(&inst("preset", serde_json::json!({"name": "kodak"}))).unwrap(),
        Effect::Preset {
            preset: Preset::Kodak
        }
    );
    assert_eq!(
        parse_effect(&inst("grain", serde_json::json!({"intensity": 0.5, "seed": 9}))).unwrap(),
        Effect::Grain {
            intensity: 0.5,
            seed: Some(9)
        }
    );
}

#[test]
fn parse_rejects_bad_input() {
    assert!(parse_effect(&inst("", serde_json::Value::Null)).is_err());
    assert!(parse_effect(&inst("sparkle", serde_json::Value::Null)).is_err());
    assert!(parse_effect(&inst("vignette", serde_json::json!({}))).is_err());
    assert!(parse_effect(&inst("sharpen", serde_json::json!({"intensity": 2.0}))).is_err());
    assert!(parse_effect(&inst("scratch", serde_json::json!({"label": 3}))).is_err());
    assert!(parse_effect(&inst("grain", serde_json::json!({"intensity": 0.1, "seed": -1}))).is_err());
}

#[test]
fn normalize_drops_only_noops() {
    let effects = vec![
        Effect::Brightness { value: 0.0 },
        Effect::Temperature { value: 1.0 },
        Effect::Vignette { intensity: 0.4 },
        Effect::Preset {
            preset: Preset::None,
        },
        Effect::Scratch { label: "x".into() },
    ];
    assert_eq!(
        normalize_effects(&effects),
        vec![
            Effect::Vignette { intensity: 0.4 },
            Effect::Scratch { label: "x".into() },
        ]
    );
}

#[test]
fn chain_applies_in_caller_order() {
    let b = PixelBuffer::filled(2, 2, Rgba8::rgb(100, 100, 100)).unwrap();
    let up_then_clip = EffectChain::new(vec![
        Effect::Brightness { value: 1.0 },
        Effect::Contrast { value: -0.5 },
    ]);
    // 100 -> 200 -> 100
    assert_eq!(
        up_then_clip.apply(&b).unwrap().get_pixel(0, 0).unwrap().r,
        100
    );

    let bright = PixelBuffer::filled(2, 2, Rgba8::rgb(200, 200, 200)).unwrap();
    let a = EffectChain::new(vec![
        Effect::Brightness { value: 1.0 },
        Effect::Brightness { value: -0.5 },
    ]);
    let b2 = EffectChain::new(vec![
        Effect::Brightness { value: -0.5 },
        Effect::Brightness { value: 1.0 },
    ]);
    // clamping at 255 makes the order observable
    assert_eq!(a.apply(&bright).unwrap().get_pixel(0, 0).unwrap().r, 127);
    assert_eq!(b2.apply(&bright).unwrap().get_pixel(0, 0).unwrap().r, 200);
}

#[test]
fn chain_leaves_input_untouched() {
    let b = PixelBuffer::filled(4, 4, Rgba8::rgb(10, 20, 30)).unwrap();
    let before = b.clone();
    let chain = EffectChain::from_instances(&[
        inst("saturation", serde_json::json!({"value": -1.0})),
        inst("vignette", serde_json::json!({"intensity": 1.0})),
    ])
    .unwrap();
    assert_eq!(chain.effects.len(), 2);
    let _ = chain.apply(&b).unwrap();
    assert_eq!(b, before);
}

#[test]
fn empty_chain_is_identity() {
    let b = PixelBuffer::filled(3, 3, Rgba8::rgb(1, 2, 3)).unwrap();
    let chain = EffectChain::from_instances(&[inst(
        "brightness",
        serde_json::json!({"value": 0.0}),
    )])
    .unwrap();
    assert!(chain.is_empty());
    assert_eq!(chain.apply(&b).unwrap(), b);
}
