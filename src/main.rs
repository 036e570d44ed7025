#![warn(clippy::all, rust_2018_idioms)]
// #![windows_subsystem = "windows"] // uncomment this to suppress terminal on windows

use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "Mario", about = "🍄 A tiny game engine bootstrap 🦀")]
pub struct Options {
    /// A json file with window and loop settings
    #[structopt(short, long, parse(from_os_str))]
    pub config: Option<std::path::PathBuf>,

    #[structopt(long, help = "Window width in pixels")]
    pub width: Option<u32>,

    #[structopt(long, help = "Window height in pixels")]
    pub height: Option<u32>,

    #[structopt(long, help = "Window title")]
    pub title: Option<String>,

    /// The scene to start in, 0 is the level editor and 1 the level
    #[structopt(short, long)]
    pub scene: Option<usize>,

    #[structopt(long, help = "Present frames as fast as possible")]
    pub no_vsync: bool,
}

impl Options {
    /// Loads the config file, if any, and applies command line overrides on top
    pub fn into_config(self) -> mario_engine::Result<mario_engine::EngineConfig> {
        let Self {
            config,
            width,
            height,
            title,
            scene,
            no_vsync,
        } = self;
        let mut engine_config = match config {
            Some(path) => mario_engine::EngineConfig::from_json_file(path)?,
            None => mario_engine::EngineConfig::default(),
        };
        if let Some(width) = width {
            engine_config.width = width;
        }
        if let Some(height) = height {
            engine_config.height = height;
        }
        if let Some(title) = title {
            engine_config.title = title;
        }
        if let Some(scene) = scene {
            engine_config.initial_scene = scene;
        }
        if no_vsync {
            engine_config.vsync = false;
        }
        Ok(engine_config)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Allows the setting of the log level through RUST_LOG env var.
    // It also allows wgpu logs to be seen.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Options::from_args().into_config()?;
    mario_engine::start(config)?;
    Ok(())
}
