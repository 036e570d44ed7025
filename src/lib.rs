mod config;
mod error;
pub mod modules;
pub mod scenes;

pub use self::{
    config::*,
    error::*,
    modules::{
        context::Context,
        run::{start, start_with_context},
        scene::{Scene, SceneRegistry},
    },
};

pub use nalgebra_glm as math;
