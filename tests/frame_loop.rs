use mario_engine::modules::{run, scene};
use mario_engine::{Context, EngineConfig, Scene, SceneRegistry};
use winit::{event::ElementState, keyboard::KeyCode};

/// Counts its own updates and turns the screen red after the third one
#[derive(Default)]
struct Countdown {
    updates: u32,
}

impl Scene for Countdown {
    fn name(&self) -> &str {
        "Countdown"
    }

    fn update(&mut self, context: &mut Context, _delta_time: f32) {
        self.updates += 1;
        if self.updates == 3 {
            context.resources.window.clear_color = [1.0, 0.0, 0.0, 1.0].into();
        }
    }
}

#[test]
fn frames_advance_timing_and_reset_input_without_a_window() {
    let mut context = Context::new(EngineConfig::default());
    scene::change_scene(&mut context, 0).expect("editor is registered");

    context
        .resources
        .input
        .mouse
        .cursor_moved(mario_engine::math::vec2(32.0, 16.0));
    context
        .resources
        .input
        .mouse
        .scrolled(mario_engine::math::vec2(0.0, 1.0));

    run::run_frame(&mut context);

    let timing = &context.resources.frame_timing;
    assert_eq!(timing.delta_time, 0.0);
    assert!(timing.initial_frame_start_instant.is_some());

    let mouse = &context.resources.input.mouse;
    assert_eq!(mouse.dx(), 0.0);
    assert_eq!(mouse.wheel_delta, mario_engine::math::vec2(0.0, 0.0));
    assert_eq!(mouse.last_position, mario_engine::math::vec2(32.0, 16.0));
}

#[test]
fn editor_hands_over_to_the_level_after_its_fade() {
    let mut context = Context::new(EngineConfig::default());
    scene::change_scene(&mut context, mario_engine::scenes::LEVEL_EDITOR_SCENE)
        .expect("editor is registered");
    context
        .resources
        .input
        .keyboard
        .set_key_state(KeyCode::Space, ElementState::Pressed);

    // Drive the scene with a fixed step instead of the wall clock
    for _ in 0..64 {
        context.resources.frame_timing.delta_time = 0.125;
        scene::systems::update_scene(&mut context);
        scene::systems::apply_scene_change(&mut context);
        if scene::queries::query_current_scene_index(&context)
            == Some(mario_engine::scenes::LEVEL_SCENE)
        {
            break;
        }
    }

    assert_eq!(scene::queries::query_current_scene_name(&context), Some("Level"));
    let color = context.resources.window.clear_color;
    assert_eq!((color.red, color.green, color.blue), (1.0, 1.0, 1.0));
}

#[test]
fn custom_registries_replace_the_stock_scenes() {
    let mut registry = SceneRegistry::empty();
    let index = registry.register(|| Box::new(Countdown::default()));
    let mut context = Context::new(EngineConfig {
        initial_scene: index,
        clear_color: [0.0, 0.0, 0.0, 1.0],
        ..Default::default()
    })
    .with_scene_registry(registry);

    scene::change_scene(&mut context, index).expect("countdown is registered");
    assert!(matches!(
        scene::change_scene(&mut context, 1),
        Err(mario_engine::EngineError::UnknownScene(1))
    ));

    for _ in 0..3 {
        run::run_frame(&mut context);
    }
    assert_eq!(context.resources.window.clear_color.red, 1.0);
    assert_eq!(context.resources.frame_timing.frame_counter, 3);
}

#[test]
fn escape_flags_the_window_for_closing() {
    let mut context = Context::new(EngineConfig::default());
    context
        .resources
        .input
        .keyboard
        .set_key_state(KeyCode::Escape, ElementState::Pressed);
    run::run_frame(&mut context);
    assert!(context.resources.window.should_exit);
}
