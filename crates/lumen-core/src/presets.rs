use serde::{Deserialize, Serialize};

use crate::image_buf::FilterSettings;

/// A partial settings overlay: only the fields a preset names are replaced,
/// everything else keeps the value it already has.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PresetOverlay {
    pub brightness: Option<f32>,
    pub contrast: Option<f32>,
    pub saturation: Option<f32>,
    pub blur: Option<f32>,
    pub sepia: Option<f32>,
    pub hue: Option<f32>,
    pub grayscale: Option<f32>,
    pub vintage: Option<bool>,
    pub dramatic: Option<bool>,
    pub highlights: Option<f32>,
    pub shadows: Option<f32>,
    pub midtones: Option<f32>,
    pub temperature: Option<f32>,
    pub tint: Option<f32>,
    pub vibrance: Option<f32>,
    pub clarity: Option<f32>,
    pub vignette: Option<f32>,
}

impl PresetOverlay {
    pub fn apply_to(&self, base: &FilterSettings) -> FilterSettings {
        let mut out = base.clone();
        if let Some(v) = self.brightness {
            out.brightness = v;
        }
        if let Some(v) = self.contrast {
            out.contrast = v;
        }
        if let Some(v) = self.saturation {
            out.saturation = v;
        }
        if let Some(v) = self.blur {
            out.blur = v;
        }
        if let Some(v) = self.sepia {
            out.sepia = v;
        }
        if let Some(v) = self.hue {
            out.hue = v;
        }
        if let Some(v) = self.grayscale {
            out.grayscale = v;
        }
        if let Some(v) = self.vintage {
            out.vintage = v;
        }
        if let Some(v) = self.dramatic {
            out.dramatic = v;
        }
        if let Some(v) = self.highlights {
            out.highlights = v;
        }
        if let Some(v) = self.shadows {
            out.shadows = v;
        }
        if let Some(v) = self.midtones {
            out.midtones = v;
        }
        if let Some(v) = self.temperature {
            out.temperature = v;
        }
        if let Some(v) = self.tint {
            out.tint = v;
        }
        if let Some(v) = self.vibrance {
            out.vibrance = v;
        }
        if let Some(v) = self.clarity {
            out.clarity = v;
        }
        if let Some(v) = self.vignette {
            out.vignette = v;
        }
        out
    }
}

/// A named stylistic preset.
#[derive(Clone, Debug)]
pub struct Preset {
    pub name: &'static str,
    pub overlay: PresetOverlay,
}

/// The built-in preset list: Original resets everything, the rest are
/// partial overlays on top of whatever the image already has.
pub fn builtin() -> Vec<Preset> {
    vec![
        Preset {
            name: "Original",
            overlay: PresetOverlay {
                brightness: Some(100.0),
                contrast: Some(100.0),
                saturation: Some(100.0),
                blur: Some(0.0),
                sepia: Some(0.0),
                hue: Some(0.0),
                grayscale: Some(0.0),
                vintage: Some(false),
                dramatic: Some(false),
                highlights: Some(0.0),
                shadows: Some(0.0),
                midtones: Some(0.0),
                temperature: Some(0.0),
                tint: Some(0.0),
                vibrance: Some(0.0),
                clarity: Some(0.0),
                vignette: Some(0.0),
            },
        },
        Preset {
            name: "Vintage",
            overlay: PresetOverlay {
                brightness: Some(90.0),
                contrast: Some(110.0),
                saturation: Some(80.0),
                sepia: Some(30.0),
                vintage: Some(true),
                temperature: Some(15.0),
                vignette: Some(20.0),
                ..Default::default()
            },
        },
        Preset {
            name: "Dramatic",
            overlay: PresetOverlay {
                brightness: Some(95.0),
                contrast: Some(130.0),
                saturation: Some(120.0),
                dramatic: Some(true),
                clarity: Some(25.0),
                shadows: Some(20.0),
                ..Default::default()
            },
        },
        Preset {
            name: "B&W",
            overlay: PresetOverlay {
                grayscale: Some(100.0),
                contrast: Some(110.0),
                clarity: Some(15.0),
                ..Default::default()
            },
        },
        Preset {
            name: "Warm",
            overlay: PresetOverlay {
                brightness: Some(105.0),
                saturation: Some(110.0),
                hue: Some(10.0),
                temperature: Some(20.0),
                vibrance: Some(15.0),
                ..Default::default()
            },
        },
        Preset {
            name: "Cool",
            overlay: PresetOverlay {
                brightness: Some(95.0),
                saturation: Some(105.0),
                hue: Some(-10.0),
                temperature: Some(-15.0),
                highlights: Some(10.0),
                ..Default::default()
            },
        },
    ]
}

/// Look up a built-in preset by name, case-insensitively.
pub fn by_name(name: &str) -> Option<Preset> {
    builtin()
        .into_iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn original_resets_to_neutral() {
        let edited = FilterSettings {
            brightness: 140.0,
            vintage: true,
            vignette: 80.0,
            ..Default::default()
        };
        let original = by_name("original").unwrap();
        let reset = original.overlay.apply_to(&edited);
        assert!(reset.is_neutral());
    }

    #[test]
    fn overlay_touches_only_named_fields() {
        let base = FilterSettings {
            blur: 3.0,
            midtones: -20.0,
            ..Default::default()
        };
        let warm = by_name("Warm").unwrap();
        let result = warm.overlay.apply_to(&base);
        // Named by the preset:
        assert_eq!(result.brightness, 105.0);
        assert_eq!(result.temperature, 20.0);
        // Untouched:
        assert_eq!(result.blur, 3.0);
        assert_eq!(result.midtones, -20.0);
    }

    #[test]
    fn builtin_names_are_unique() {
        let presets = builtin();
        for (i, a) in presets.iter().enumerate() {
            for b in presets.iter().skip(i + 1) {
                assert_ne!(a.name, b.name);
            }
        }
        assert_eq!(presets.len(), 6);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert!(by_name("b&w").is_some());
        assert!(by_name("COOL").is_some());
        assert!(by_name("nope").is_none());
    }

    #[test]
    fn overlay_survives_serde() {
        let warm = by_name("Warm").unwrap();
        let json = serde_json::to_string(&warm.overlay).unwrap();
        let back: PresetOverlay = serde_json::from_str(&json).unwrap();
        assert_eq!(back.hue, Some(10.0));
        assert_eq!(back.sepia, None);
    }
}
