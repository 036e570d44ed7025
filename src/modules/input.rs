/// Contains all input state
#[derive(Default)]
pub struct Input {
    pub keyboard: Keyboard,
    pub mouse: Mouse,
}

/// Contains keyboard-specific input state
#[derive(Default, Debug)]
pub struct Keyboard {
    pub keystates: std::collections::HashMap<winit::keyboard::KeyCode, winit::event::ElementState>,
}

impl Keyboard {
    pub fn is_key_pressed(&self, keycode: winit::keyboard::KeyCode) -> bool {
        self.keystates
            .get(&keycode)
            .is_some_and(|state| *state == winit::event::ElementState::Pressed)
    }

    pub fn set_key_state(
        &mut self,
        keycode: winit::keyboard::KeyCode,
        state: winit::event::ElementState,
    ) {
        *self.keystates.entry(keycode).or_insert(state) = state;
    }

    pub fn pressed_keys(&self) -> impl Iterator<Item = winit::keyboard::KeyCode> + '_ {
        self.keystates
            .iter()
            .filter(|(_, state)| **state == winit::event::ElementState::Pressed)
            .map(|(keycode, _)| *keycode)
    }
}

bitflags::bitflags! {
    #[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MouseState: u8 {
        const LEFT_CLICKED = 0b0000_0001;
        const MIDDLE_CLICKED = 0b0000_0010;
        const RIGHT_CLICKED = 0b0000_0100;
        const MOVED = 0b0000_1000;
        const SCROLLED = 0b0001_0000;
        const DRAGGING = 0b0010_0000;
        const BUTTONS = Self::LEFT_CLICKED.bits() | Self::MIDDLE_CLICKED.bits() | Self::RIGHT_CLICKED.bits();
    }
}

/// Contains mouse-specific input state
#[derive(Default, Debug, Clone, Copy)]
pub struct Mouse {
    pub state: MouseState,

    /// Cursor position in window coordinates
    pub position: nalgebra_glm::Vec2,

    /// Cursor position when the previous frame ended
    pub last_position: nalgebra_glm::Vec2,

    /// Movement since the previous frame ended
    pub position_delta: nalgebra_glm::Vec2,

    /// Scroll accumulated during the current frame
    pub wheel_delta: nalgebra_glm::Vec2,
}

impl Mouse {
    pub fn cursor_moved(&mut self, position: nalgebra_glm::Vec2) {
        self.position = position;
        self.position_delta = self.position - self.last_position;
        self.state.insert(MouseState::MOVED);
        let dragging = self.state.intersects(MouseState::BUTTONS);
        self.state.set(MouseState::DRAGGING, dragging);
    }

    pub fn button_changed(
        &mut self,
        button: winit::event::MouseButton,
        state: winit::event::ElementState,
    ) {
        let flag = match button {
            winit::event::MouseButton::Left => MouseState::LEFT_CLICKED,
            winit::event::MouseButton::Middle => MouseState::MIDDLE_CLICKED,
            winit::event::MouseButton::Right => MouseState::RIGHT_CLICKED,
            _ => return,
        };
        let pressed = state == winit::event::ElementState::Pressed;
        self.state.set(flag, pressed);
        if !pressed {
            self.state.remove(MouseState::DRAGGING);
        }
    }

    pub fn scrolled(&mut self, delta: nalgebra_glm::Vec2) {
        self.wheel_delta += delta;
        self.state.insert(MouseState::SCROLLED);
    }

    pub fn is_button_pressed(&self, button: winit::event::MouseButton) -> bool {
        match button {
            winit::event::MouseButton::Left => self.state.contains(MouseState::LEFT_CLICKED),
            winit::event::MouseButton::Middle => self.state.contains(MouseState::MIDDLE_CLICKED),
            winit::event::MouseButton::Right => self.state.contains(MouseState::RIGHT_CLICKED),
            _ => false,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.state.contains(MouseState::DRAGGING)
    }

    pub fn dx(&self) -> f32 {
        self.position_delta.x
    }

    pub fn dy(&self) -> f32 {
        self.position_delta.y
    }

    /// Clears per-frame deltas. Button and dragging state carry over.
    pub fn end_frame(&mut self) {
        self.wheel_delta = nalgebra_glm::vec2(0.0, 0.0);
        self.position_delta = nalgebra_glm::vec2(0.0, 0.0);
        self.last_position = self.position;
        self.state.remove(MouseState::MOVED | MouseState::SCROLLED);
    }
}

pub mod events {
    pub fn receive_keyboard_event(
        context: &mut crate::modules::context::Context,
        event: &winit::event::WindowEvent,
    ) {
        let winit::event::WindowEvent::KeyboardInput {
            event:
                winit::event::KeyEvent {
                    physical_key: winit::keyboard::PhysicalKey::Code(key_code),
                    state,
                    ..
                },
            ..
        } = event
        else {
            return;
        };
        context
            .resources
            .input
            .keyboard
            .set_key_state(*key_code, *state);
    }

    pub fn receive_mouse_event(
        context: &mut crate::modules::context::Context,
        event: &winit::event::WindowEvent,
    ) {
        let mouse = &mut context.resources.input.mouse;
        match event {
            winit::event::WindowEvent::MouseInput { button, state, .. } => {
                mouse.button_changed(*button, *state);
            }
            winit::event::WindowEvent::CursorMoved { position, .. } => {
                mouse.cursor_moved(nalgebra_glm::vec2(position.x as _, position.y as _));
            }
            winit::event::WindowEvent::MouseWheel {
                delta: winit::event::MouseScrollDelta::LineDelta(h_lines, v_lines),
                ..
            } => {
                mouse.scrolled(nalgebra_glm::vec2(*h_lines, *v_lines));
            }
            winit::event::WindowEvent::MouseWheel {
                delta: winit::event::MouseScrollDelta::PixelDelta(position),
                ..
            } => {
                mouse.scrolled(nalgebra_glm::vec2(position.x as _, position.y as _));
            }
            _ => {}
        }
    }
}

pub mod systems {
    /// Flags the window for closing when escape is held, if the config allows it
    pub fn escape_key_exit(context: &mut crate::modules::context::Context) {
        if !context.resources.config.exit_on_escape {
            return;
        }
        let keyboard = &context.resources.input.keyboard;
        if keyboard.is_key_pressed(winit::keyboard::KeyCode::Escape) {
            log::info!("Escape pressed. Exiting...");
            context.resources.window.should_exit = true;
        }
    }

    /// Resets the input state for the next frame
    pub fn reset_input(context: &mut crate::modules::context::Context) {
        context.resources.input.mouse.end_frame();
    }
}
