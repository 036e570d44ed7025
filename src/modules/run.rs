/// This is the entry point for the engine
pub fn start(config: crate::EngineConfig) -> crate::Result<()> {
    start_with_context(crate::modules::context::Context::new(config))
}

/// Runs the engine with a prepared context, such as one carrying a custom scene registry
pub fn start_with_context(mut context: crate::modules::context::Context) -> crate::Result<()> {
    context.resources.config.validate()?;
    let initial_scene = context.resources.config.initial_scene;
    if initial_scene >= context.resources.scenes.registry.len() {
        return Err(crate::EngineError::UnknownScene(initial_scene));
    }
    log::info!("Hello mario {}!", env!("CARGO_PKG_VERSION"));
    let event_loop = winit::event_loop::EventLoop::builder().build()?;
    event_loop.set_control_flow(winit::event_loop::ControlFlow::Poll);
    event_loop.run_app(&mut context)?;
    match context.resources.window.fatal_error.take() {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

/// This is the main loop, driven by winit window events.
/// Input is recorded as events arrive and a frame runs on every redraw.
pub fn step(context: &mut crate::modules::context::Context, event: &winit::event::WindowEvent) {
    // The renderer should be available before running any systems
    if context.resources.graphics.renderer.is_none() {
        return;
    }

    match event {
        winit::event::WindowEvent::RedrawRequested => run_frame(context),
        event => {
            crate::modules::window::events::receive_resize_event(context, event);
            crate::modules::input::events::receive_keyboard_event(context, event);
            crate::modules::input::events::receive_mouse_event(context, event);
        }
    }
}

/// Runs the systems for a single frame in order
pub fn run_frame(context: &mut crate::modules::context::Context) {
    crate::modules::window::systems::update_frame_timing(context);
    crate::modules::input::systems::escape_key_exit(context);
    crate::modules::scene::systems::update_scene(context);
    crate::modules::scene::systems::apply_scene_change(context);
    crate::modules::graphics::systems::render_frame(context);
    crate::modules::input::systems::reset_input(context);
}

#[cfg(test)]
mod tests {
    use crate::modules::context::Context;

    #[test]
    fn events_are_ignored_until_the_renderer_exists() {
        let mut context = Context::default();
        crate::modules::scene::change_scene(&mut context, 0).expect("editor is registered");
        super::step(&mut context, &winit::event::WindowEvent::RedrawRequested);
        assert_eq!(context.resources.frame_timing.frame_counter, 0);
        assert!(context.resources.frame_timing.last_frame_start_instant.is_none());
    }

    #[test]
    fn invalid_configs_fail_before_the_event_loop_starts() {
        let config = crate::EngineConfig {
            width: 0,
            ..Default::default()
        };
        assert!(matches!(
            super::start(config),
            Err(crate::EngineError::InvalidDimensions { width: 0, .. })
        ));
    }

    #[test]
    fn unknown_initial_scenes_fail_before_the_event_loop_starts() {
        let config = crate::EngineConfig {
            initial_scene: 5,
            ..Default::default()
        };
        assert!(matches!(
            super::start(config),
            Err(crate::EngineError::UnknownScene(5))
        ));
    }

    #[test]
    fn initial_scene_is_checked_against_a_custom_registry() {
        let context = Context::new(crate::EngineConfig::default())
            .with_scene_registry(crate::SceneRegistry::empty());
        assert!(matches!(
            super::start_with_context(context),
            Err(crate::EngineError::UnknownScene(0))
        ));
    }
}
