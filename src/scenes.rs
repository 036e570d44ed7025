//! The scenes the engine ships with.

pub const LEVEL_EDITOR_SCENE: usize = 0;
pub const LEVEL_SCENE: usize = 1;

/// Seconds the editor spends fading out before the level takes over
const TRANSITION_SECONDS: f32 = 2.0;

/// How fast the clear color fades during the transition, per second
const FADE_RATE: f32 = 5.0;

/// Starts on a white screen, pressing space fades it out and enters the level
#[derive(Debug)]
pub struct LevelEditorScene {
    changing_scene: bool,
    time_to_change_scene: f32,
}

impl Default for LevelEditorScene {
    fn default() -> Self {
        Self {
            changing_scene: false,
            time_to_change_scene: TRANSITION_SECONDS,
        }
    }
}

impl LevelEditorScene {
    pub fn is_changing_scene(&self) -> bool {
        self.changing_scene
    }
}

impl crate::modules::scene::Scene for LevelEditorScene {
    fn name(&self) -> &str {
        "Level Editor"
    }

    fn init(&mut self, _context: &mut crate::modules::context::Context) {
        log::info!("Inside level editor scene");
    }

    fn update(&mut self, context: &mut crate::modules::context::Context, delta_time: f32) {
        if delta_time > 0.0 {
            log::trace!("{:.1} FPS", 1.0 / delta_time);
        }

        if !self.changing_scene
            && context
                .resources
                .input
                .keyboard
                .is_key_pressed(winit::keyboard::KeyCode::Space)
        {
            log::info!("Leaving the level editor");
            self.changing_scene = true;
        }

        if self.changing_scene && self.time_to_change_scene > 0.0 {
            self.time_to_change_scene -= delta_time;
            context
                .resources
                .window
                .clear_color
                .darken(delta_time * FADE_RATE);
        } else if self.changing_scene {
            self.changing_scene = false;
            crate::modules::scene::request_scene_change(context, LEVEL_SCENE);
        }
    }
}

/// Resets the screen to white and waits
#[derive(Default, Debug)]
pub struct LevelScene;

impl crate::modules::scene::Scene for LevelScene {
    fn name(&self) -> &str {
        "Level"
    }

    fn init(&mut self, context: &mut crate::modules::context::Context) {
        log::info!("Inside level scene");
        let clear_color = &mut context.resources.window.clear_color;
        clear_color.red = 1.0;
        clear_color.green = 1.0;
        clear_color.blue = 1.0;
    }

    fn update(&mut self, _context: &mut crate::modules::context::Context, _delta_time: f32) {}
}
