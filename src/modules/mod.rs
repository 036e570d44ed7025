pub mod context;
pub mod graphics;
pub mod input;
pub mod run;
pub mod scene;
pub mod window;
