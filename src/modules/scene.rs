/// A unit of game content that the frame loop drives
pub trait Scene {
    fn name(&self) -> &str;

    /// Runs once when the scene becomes current
    fn init(&mut self, _context: &mut crate::modules::context::Context) {}

    /// Runs every frame while the scene is current
    fn update(&mut self, context: &mut crate::modules::context::Context, delta_time: f32);
}

pub type SceneFactory = Box<dyn Fn() -> Box<dyn Scene>>;

/// Scene constructors addressed by index
pub struct SceneRegistry {
    factories: Vec<SceneFactory>,
}

impl Default for SceneRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(|| Box::new(crate::scenes::LevelEditorScene::default()));
        registry.register(|| Box::new(crate::scenes::LevelScene));
        registry
    }
}

impl SceneRegistry {
    pub fn empty() -> Self {
        Self {
            factories: Vec::new(),
        }
    }

    /// Adds a scene constructor and returns the index it is reachable under
    pub fn register(&mut self, factory: impl Fn() -> Box<dyn Scene> + 'static) -> usize {
        self.factories.push(Box::new(factory));
        self.factories.len() - 1
    }

    pub fn create(&self, index: usize) -> crate::Result<Box<dyn Scene>> {
        let factory = self
            .factories
            .get(index)
            .ok_or(crate::EngineError::UnknownScene(index))?;
        Ok(factory())
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

/// A resource holding the active scene and any switch queued for the end of the frame
#[derive(Default)]
pub struct Scenes {
    pub registry: SceneRegistry,
    pub current: Option<Box<dyn Scene>>,
    pub current_index: Option<usize>,
    pub pending: Option<usize>,

    /// Bumped on every completed switch
    pub generation: u64,
}

/// Constructs and initializes the scene at `index`, replacing the current one.
///
/// An unknown index leaves the current scene running.
/// If the new scene's `init` switches scenes itself, that switch wins.
pub fn change_scene(
    context: &mut crate::modules::context::Context,
    index: usize,
) -> crate::Result<()> {
    let mut scene = context.resources.scenes.registry.create(index)?;
    log::info!("Changing scene to '{}' ({index})", scene.name());
    let generation = context.resources.scenes.generation;
    scene.init(context);
    if context.resources.scenes.generation != generation {
        log::info!("'{}' switched scenes during init", scene.name());
        return Ok(());
    }
    let scenes = &mut context.resources.scenes;
    scenes.current = Some(scene);
    scenes.current_index = Some(index);
    scenes.generation += 1;
    Ok(())
}

/// Queues a scene switch, applied once the current scene finishes this frame's update
pub fn request_scene_change(context: &mut crate::modules::context::Context, index: usize) {
    context.resources.scenes.pending = Some(index);
}

pub mod queries {
    pub fn query_current_scene_name(context: &crate::modules::context::Context) -> Option<&str> {
        context
            .resources
            .scenes
            .current
            .as_ref()
            .map(|scene| scene.name())
    }

    pub fn query_current_scene_index(context: &crate::modules::context::Context) -> Option<usize> {
        context.resources.scenes.current_index
    }
}

pub mod systems {
    /// Advances the current scene by the frame's delta time
    pub fn update_scene(context: &mut crate::modules::context::Context) {
        let delta_time = context.resources.frame_timing.delta_time;

        // The scene is taken out so it can borrow the rest of the context mutably
        let Some(mut scene) = context.resources.scenes.current.take() else {
            return;
        };
        scene.update(context, delta_time);

        // A scene that switched scenes directly during its update has already been replaced
        if context.resources.scenes.current.is_none() {
            context.resources.scenes.current = Some(scene);
        }
    }

    /// Applies a scene switch requested during this frame
    pub fn apply_scene_change(context: &mut crate::modules::context::Context) {
        let Some(index) = context.resources.scenes.pending.take() else {
            return;
        };
        if let Err(error) = crate::modules::scene::change_scene(context, index) {
            log::error!("{error}");
        }
    }
}
