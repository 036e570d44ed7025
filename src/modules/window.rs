/// Contains resources for window creation and destruction
#[derive(Default)]
pub struct Window {
    pub handle: Option<std::sync::Arc<winit::window::Window>>,
    pub should_exit: bool,

    /// The color each frame is cleared to, scenes are free to change it
    pub clear_color: ClearColor,

    /// Set when startup fails, returned from `start` once the event loop exits
    pub fatal_error: Option<crate::EngineError>,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ClearColor {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub alpha: f32,
}

impl Default for ClearColor {
    fn default() -> Self {
        Self {
            red: 1.0,
            green: 1.0,
            blue: 1.0,
            alpha: 1.0,
        }
    }
}

impl From<[f32; 4]> for ClearColor {
    fn from([red, green, blue, alpha]: [f32; 4]) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }
}

impl From<ClearColor> for wgpu::Color {
    fn from(color: ClearColor) -> Self {
        Self {
            r: color.red as f64,
            g: color.green as f64,
            b: color.blue as f64,
            a: color.alpha as f64,
        }
    }
}

impl ClearColor {
    /// Moves the color channels toward black, leaving alpha alone
    pub fn darken(&mut self, amount: f32) {
        self.red = (self.red - amount).max(0.0);
        self.green = (self.green - amount).max(0.0);
        self.blue = (self.blue - amount).max(0.0);
    }
}

/// Contains timing information about the current frame
#[derive(Default, Debug, Copy, Clone, PartialEq)]
pub struct FrameTiming {
    /// The number of frames rendered per second
    pub frames_per_second: f32,

    /// The time between the last frame and the current frame
    pub delta_time: f32,

    /// The time the current frame was started
    pub last_frame_start_instant: Option<web_time::Instant>,

    /// When the current one second measuring window started
    pub current_frame_start_instant: Option<web_time::Instant>,

    /// When the initial frame started, when the application starts up
    pub initial_frame_start_instant: Option<web_time::Instant>,

    /// Frames counted in the current one second window, reset when frames per second is sampled
    pub frame_counter: u32,

    /// Milliseconds that the process has been running continuously
    pub uptime_milliseconds: u64,
}

impl FrameTiming {
    /// Seconds elapsed since the first frame, zero before it
    pub fn seconds_since_start(&self) -> f32 {
        self.initial_frame_start_instant
            .map_or(0.0, |start| start.elapsed().as_secs_f32())
    }
}

/// Calculates where a window's top-left corner goes to sit centered on a monitor
pub fn centered_position(
    monitor_position: winit::dpi::PhysicalPosition<i32>,
    monitor_size: winit::dpi::PhysicalSize<u32>,
    window_size: winit::dpi::PhysicalSize<u32>,
) -> winit::dpi::PhysicalPosition<i32> {
    let x = (monitor_size.width as i32 - window_size.width as i32) / 2;
    let y = (monitor_size.height as i32 - window_size.height as i32) / 2;
    winit::dpi::PhysicalPosition::new(monitor_position.x + x, monitor_position.y + y)
}

impl winit::application::ApplicationHandler for crate::modules::context::Context {
    fn resumed(&mut self, event_loop: &winit::event_loop::ActiveEventLoop) {
        // Some platforms resume more than once, the window survives suspension
        if self.resources.window.handle.is_some() {
            return;
        }
        if let Err(error) = initialize(self, event_loop) {
            log::error!("{error}");
            self.resources.window.fatal_error = Some(error);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &winit::event_loop::ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: winit::event::WindowEvent,
    ) {
        if self.resources.window.should_exit
            || matches!(event, winit::event::WindowEvent::CloseRequested)
        {
            log::info!("Close requested. Exiting...");
            event_loop.exit();
            return;
        }

        crate::modules::run::step(self, &event);

        // Ensure we cycle frames continuously by requesting a redraw at the end of each frame
        if let Some(window_handle) = self.resources.window.handle.as_ref() {
            window_handle.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &winit::event_loop::ActiveEventLoop) {
        log::info!("Releasing the renderer and destroying the window");
        self.resources.scenes.current = None;
        self.resources.graphics.renderer = None;
        self.resources.window.handle = None;
    }
}

/// Creates the window and renderer, then enters the initial scene
pub fn initialize(
    context: &mut crate::modules::context::Context,
    event_loop: &winit::event_loop::ActiveEventLoop,
) -> crate::Result<()> {
    let crate::EngineConfig {
        width,
        height,
        title,
        vsync,
        resizable,
        initial_scene,
        ..
    } = context.resources.config.clone();

    // The window stays hidden until it is positioned and can be drawn to
    let attributes = winit::window::Window::default_attributes()
        .with_title(title)
        .with_inner_size(winit::dpi::PhysicalSize::new(width, height))
        .with_resizable(resizable)
        .with_visible(false);

    let window = event_loop.create_window(attributes)?;

    match event_loop
        .primary_monitor()
        .or_else(|| window.current_monitor())
    {
        Some(monitor) => {
            let position = centered_position(monitor.position(), monitor.size(), window.outer_size());
            window.set_outer_position(position);
        }
        None => log::warn!("No monitor reported, leaving the window where the platform put it"),
    }

    let window_handle = std::sync::Arc::new(window);
    let inner_size = window_handle.inner_size();
    let renderer = pollster::block_on(crate::modules::graphics::create_renderer_async(
        window_handle.clone(),
        inner_size.width,
        inner_size.height,
        vsync,
    ))?;

    context.resources.graphics.renderer = Some(renderer);
    context.resources.graphics.viewport_size = (inner_size.width, inner_size.height);

    window_handle.set_visible(true);
    context.resources.window.handle = Some(window_handle);

    crate::modules::scene::change_scene(context, initial_scene)
}

/// Handles viewport resizing, such as when the window is resized by the user
pub fn resize_viewport(context: &mut crate::modules::context::Context, width: u32, height: u32) {
    log::info!("Resizing renderer surface to: ({width}, {height})");
    if let Some(renderer) = context.resources.graphics.renderer.as_mut() {
        renderer.resize(width, height);
    }
    context.resources.graphics.viewport_size = (width, height);
}

pub mod events {
    pub fn receive_resize_event(
        context: &mut crate::modules::context::Context,
        event: &winit::event::WindowEvent,
    ) {
        let winit::event::WindowEvent::Resized(winit::dpi::PhysicalSize { width, height }) = event
        else {
            return;
        };
        crate::modules::window::resize_viewport(context, *width, *height);
    }
}

pub mod queries {
    /// Queries for the display viewport's aspect ratio
    pub fn query_viewport_aspect_ratio(context: &crate::modules::context::Context) -> Option<f32> {
        let (width, height) = context.resources.graphics.viewport_size;
        if width == 0 {
            return None;
        }
        Some(width as f32 / height.max(1) as f32)
    }
}

pub mod systems {
    /// Calculates and refreshes frame timing values such as delta time
    pub fn update_frame_timing(context: &mut crate::modules::context::Context) {
        update_frame_timing_at(
            &mut context.resources.frame_timing,
            web_time::Instant::now(),
        );
    }

    /// Advances frame timing to a frame that started at `now`
    pub fn update_frame_timing_at(
        timing: &mut crate::modules::window::FrameTiming,
        now: web_time::Instant,
    ) {
        let crate::modules::window::FrameTiming {
            frames_per_second,
            delta_time,
            last_frame_start_instant,
            current_frame_start_instant,
            initial_frame_start_instant,
            frame_counter,
            uptime_milliseconds,
        } = timing;

        // Capture first instant
        if initial_frame_start_instant.is_none() {
            *initial_frame_start_instant = Some(now);
        }

        // Delta time
        *delta_time =
            last_frame_start_instant.map_or(0.0, |last_frame| (now - last_frame).as_secs_f32());

        // Last frame start
        *last_frame_start_instant = Some(now);

        // Calculate uptime
        if let Some(app_start) = *initial_frame_start_instant {
            *uptime_milliseconds = (now - app_start).as_millis() as u64;
        }

        // Calculate frames per second
        *frame_counter += 1;
        match current_frame_start_instant.as_ref() {
            Some(start) => {
                if (now - *start).as_secs_f32() >= 1.0 {
                    *frames_per_second = *frame_counter as f32;
                    *frame_counter = 0;
                    *current_frame_start_instant = Some(now);
                }
            }
            None => {
                *current_frame_start_instant = Some(now);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use web_time::{Duration, Instant};

    #[test]
    fn first_frame_has_no_delta() {
        let mut timing = FrameTiming::default();
        let start = Instant::now();
        systems::update_frame_timing_at(&mut timing, start);
        assert_eq!(timing.delta_time, 0.0);
        assert_eq!(timing.initial_frame_start_instant, Some(start));
        assert_eq!(timing.uptime_milliseconds, 0);

        systems::update_frame_timing_at(&mut timing, start + Duration::from_millis(250));
        assert!((timing.delta_time - 0.25).abs() < 1e-6);
        assert_eq!(timing.uptime_milliseconds, 250);
    }

    #[test]
    fn frames_per_second_settles_after_one_second() {
        let mut timing = FrameTiming::default();
        let start = Instant::now();
        for frame in 0..=60u64 {
            systems::update_frame_timing_at(
                &mut timing,
                start + Duration::from_micros(frame * 1_000_000 / 60),
            );
        }
        assert_eq!(timing.frames_per_second, 61.0);
        assert_eq!(timing.frame_counter, 0);
    }

    #[test]
    fn seconds_since_start_is_zero_before_the_first_frame() {
        assert_eq!(FrameTiming::default().seconds_since_start(), 0.0);
    }

    #[test]
    fn windows_are_centered_on_their_monitor() {
        let position = centered_position(
            winit::dpi::PhysicalPosition::new(0, 0),
            winit::dpi::PhysicalSize::new(2560, 1440),
            winit::dpi::PhysicalSize::new(1920, 1080),
        );
        assert_eq!(position, winit::dpi::PhysicalPosition::new(320, 180));
    }

    #[test]
    fn oversized_windows_overhang_evenly() {
        let position = centered_position(
            winit::dpi::PhysicalPosition::new(1920, 0),
            winit::dpi::PhysicalSize::new(1280, 720),
            winit::dpi::PhysicalSize::new(1920, 1080),
        );
        assert_eq!(position, winit::dpi::PhysicalPosition::new(1600, -180));
    }

    #[test]
    fn darkening_stops_at_black_and_keeps_alpha() {
        let mut color = ClearColor::from([0.5, 0.2, 1.0, 0.75]);
        color.darken(0.3);
        assert_eq!(color.green, 0.0);
        assert!((color.red - 0.2).abs() < 1e-6);
        assert!((color.blue - 0.7).abs() < 1e-6);
        assert_eq!(color.alpha, 0.75);
    }

    #[test]
    fn aspect_ratio_needs_a_viewport() {
        let mut context = crate::modules::context::Context::default();
        assert_eq!(queries::query_viewport_aspect_ratio(&context), None);
        context.resources.graphics.viewport_size = (1920, 1080);
        let aspect_ratio = queries::query_viewport_aspect_ratio(&context).unwrap_or_default();
        assert!((aspect_ratio - 16.0 / 9.0).abs() < 1e-6);
    }
}
