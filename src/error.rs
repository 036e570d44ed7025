/// Errors raised while starting or driving the engine
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Failed to create the event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("Failed to create the window: {0}")]
    CreateWindow(#[from] winit::error::OsError),

    #[error("Failed to create a rendering surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("No graphics adapter is compatible with the window surface")]
    AdapterNotFound,

    #[error("The window surface reports no usable texture format")]
    UnsupportedSurface,

    #[error("Failed to request a graphics device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("Unknown scene '{0}'")]
    UnknownScene(usize),

    #[error("Failed to read config file '{path}': {source}")]
    ReadConfig {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    ParseConfig(#[from] serde_json::Error),

    #[error("Invalid window dimensions ({width} x {height})")]
    InvalidDimensions { width: u32, height: u32 },
}

pub type Result<T, E = EngineError> = std::result::Result<T, E>;
