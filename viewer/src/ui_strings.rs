use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct UiStrings {
    pub app: AppStrings,
    pub controls: ControlStrings,
    pub preview: PreviewStrings,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppStrings {
    pub window_title: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct ControlStrings {
    pub title: String,
    pub seed: String,
    pub scale: String,
    pub blending: String,
    pub topography: String,
    pub grid: String,
    pub blend_space: String,
    pub blend_rgb: String,
    pub blend_hsb: String,
    pub redraw: String,
    pub save: String,
    pub saved: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct PreviewStrings {
    pub title: String,
    pub progress: String,
}

impl Default for UiStrings {
    fn default() -> Self {
        Self {
            app: AppStrings {
                window_title: "Terrain Viewer".to_string(),
            },
            controls: ControlStrings {
                title: "Map".to_string(),
                seed: "Seed".to_string(),
                scale: "Scale".to_string(),
                blending: "Blending".to_string(),
                topography: "Topography".to_string(),
                grid: "Grid".to_string(),
                blend_space: "Blend space".to_string(),
                blend_rgb: "RGB".to_string(),
                blend_hsb: "HSB".to_string(),
                redraw: "Re-draw Map".to_string(),
                save: "Save Map Image".to_string(),
                saved: "Saved".to_string(),
            },
            preview: PreviewStrings {
                title: "Preview".to_string(),
                progress: "Progress".to_string(),
            },
        }
    }
}

pub fn load_from_file(path: &str) -> anyhow::Result<UiStrings> {
    let s = std::fs::read_to_string(path)?;
    let ui: UiStrings = serde_json::from_str(&s)?;
    Ok(ui)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let ui: UiStrings = serde_json::from_str(r#"{"controls": {"redraw": "Neu zeichnen"}}"#).unwrap();
        assert_eq!(ui.controls.redraw, "Neu zeichnen");
        assert_eq!(ui.app.window_title, "Terrain Viewer");
        assert_eq!(ui.preview.title, "Preview");
    }
}
