/// Everything the engine owns while it runs
#[derive(Default)]
pub struct Context {
    pub resources: Resources,
}

#[derive(Default)]
pub struct Resources {
    pub config: crate::EngineConfig,
    pub window: crate::modules::window::Window,
    pub graphics: crate::modules::graphics::Graphics,
    pub input: crate::modules::input::Input,
    pub frame_timing: crate::modules::window::FrameTiming,
    pub scenes: crate::modules::scene::Scenes,
}

impl Context {
    pub fn new(config: crate::EngineConfig) -> Self {
        let mut context = Self::default();
        context.resources.window.clear_color = config.clear_color.into();
        context.resources.config = config;
        context
    }

    /// Replaces the default scene registry, for games that bring their own scenes
    pub fn with_scene_registry(mut self, registry: crate::modules::scene::SceneRegistry) -> Self {
        self.resources.scenes.registry = registry;
        self
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn config_clear_color_seeds_the_window() {
        let config = crate::EngineConfig::from_json_str(r#"{ "clear_color": [0.1, 0.2, 0.3, 0.4] }"#)
            .expect("config should parse");
        let context = super::Context::new(config);
        assert_eq!(
            context.resources.window.clear_color,
            crate::modules::window::ClearColor::from([0.1, 0.2, 0.3, 0.4])
        );
    }
}
