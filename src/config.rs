/// Startup settings for the window and frame loop
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Initial inner width of the window in physical pixels
    pub width: u32,

    /// Initial inner height of the window in physical pixels
    pub height: u32,

    pub title: String,

    /// Color the framebuffer is cleared to before the first scene changes it, as rgba
    pub clear_color: [f32; 4],

    /// Present once per display refresh
    pub vsync: bool,

    pub resizable: bool,

    /// Index of the scene entered once the window is shown
    pub initial_scene: usize,

    /// Close the window when the escape key is pressed
    pub exit_on_escape: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            title: "Mario".to_string(),
            clear_color: [1.0, 1.0, 1.0, 1.0],
            vsync: true,
            resizable: true,
            initial_scene: crate::scenes::LEVEL_EDITOR_SCENE,
            exit_on_escape: true,
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| crate::EngineError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> crate::Result<()> {
        let Self { width, height, .. } = *self;
        if width == 0 || height == 0 {
            return Err(crate::EngineError::InvalidDimensions { width, height });
        }
        Ok(())
    }
}
