/// A resource for graphics state
#[derive(Default)]
pub struct Graphics {
    /// The renderer context
    pub renderer: Option<Renderer>,

    /// The size of the display viewport
    pub viewport_size: (u32, u32),
}

/// Contains all resources required for rendering
pub struct Renderer {
    pub gpu: Gpu,
    pub depth_texture_view: wgpu::TextureView,
}

/// Low-level wgpu handles
pub struct Gpu {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub surface_config: wgpu::SurfaceConfiguration,
    pub surface_format: wgpu::TextureFormat,
}

impl Renderer {
    /// Reconfigures the surface and depth buffer for a new viewport size
    pub fn resize(&mut self, width: u32, height: u32) {
        // A minimized window reports a zero size, which wgpu refuses to configure
        if width == 0 || height == 0 {
            return;
        }
        self.gpu.surface_config.width = width;
        self.gpu.surface_config.height = height;
        self.gpu
            .surface
            .configure(&self.gpu.device, &self.gpu.surface_config);
        self.depth_texture_view = create_depth_texture(&self.gpu.device, width, height);
    }
}

pub mod systems {
    /// This system clears the framebuffer to the window's clear color and presents it
    pub fn render_frame(context: &mut crate::modules::context::Context) {
        let clear_color = context.resources.window.clear_color;

        let Some(renderer) = context.resources.graphics.renderer.as_mut() else {
            return;
        };

        let surface_texture = match renderer.gpu.surface.get_current_texture() {
            Ok(surface_texture) => surface_texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost or outdated, reconfiguring");
                let wgpu::SurfaceConfiguration { width, height, .. } = renderer.gpu.surface_config;
                renderer.resize(width, height);
                return;
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of memory while acquiring the next frame. Exiting...");
                context.resources.window.should_exit = true;
                return;
            }
            Err(error) => {
                log::warn!("Skipping frame: {error}");
                return;
            }
        };

        let surface_texture_view =
            surface_texture
                .texture
                .create_view(&wgpu::TextureViewDescriptor {
                    label: wgpu::Label::default(),
                    aspect: wgpu::TextureAspect::default(),
                    format: Some(renderer.gpu.surface_format),
                    dimension: None,
                    base_mip_level: 0,
                    mip_level_count: None,
                    base_array_layer: 0,
                    array_layer_count: None,
                });

        let mut encoder =
            renderer
                .gpu
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("Render Encoder"),
                });

        encoder.insert_debug_marker("Clear Pass");

        // The pass only clears, so it is dropped right away to release the encoder
        {
            let _render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Clear Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear_color.into()),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &renderer.depth_texture_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
        }

        renderer.gpu.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
    }
}

pub async fn create_renderer_async(
    window: impl Into<wgpu::SurfaceTarget<'static>>,
    width: u32,
    height: u32,
    vsync: bool,
) -> crate::Result<crate::modules::graphics::Renderer> {
    let gpu = create_gpu_async(window, width.max(1), height.max(1), vsync).await?;
    let depth_texture_view =
        create_depth_texture(&gpu.device, gpu.surface_config.width, gpu.surface_config.height);
    Ok(crate::modules::graphics::Renderer {
        gpu,
        depth_texture_view,
    })
}

/// Picks the presentation mode, vsync waits for the display like a swap interval of one
pub fn present_mode(vsync: bool) -> wgpu::PresentMode {
    if vsync {
        wgpu::PresentMode::AutoVsync
    } else {
        wgpu::PresentMode::AutoNoVsync
    }
}

/// This creates the low-level GPU resources needed for rendering
pub async fn create_gpu_async(
    window: impl Into<wgpu::SurfaceTarget<'static>>,
    width: u32,
    height: u32,
    vsync: bool,
) -> crate::Result<crate::modules::graphics::Gpu> {
    let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
        backends: wgpu::util::backend_bits_from_env().unwrap_or_else(wgpu::Backends::all),
        ..Default::default()
    });

    let surface = instance.create_surface(window)?;

    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        })
        .await
        .ok_or(crate::EngineError::AdapterNotFound)?;

    let adapter_info = adapter.get_info();
    log::info!(
        "Using {} ({:?} backend)",
        adapter_info.name,
        adapter_info.backend
    );

    let (device, queue) = adapter
        .request_device(
            &wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                memory_hints: wgpu::MemoryHints::default(),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits::default().using_resolution(adapter.limits()),
            },
            None,
        )
        .await?;

    let surface_capabilities = surface.get_capabilities(&adapter);

    let surface_format = surface_capabilities
        .formats
        .iter()
        .copied()
        .find(|format| !format.is_srgb()) // clear colors are written as given, like a plain GL framebuffer
        .or_else(|| surface_capabilities.formats.first().copied())
        .ok_or(crate::EngineError::UnsupportedSurface)?;

    let alpha_mode = surface_capabilities
        .alpha_modes
        .first()
        .copied()
        .unwrap_or(wgpu::CompositeAlphaMode::Auto);

    let surface_config = wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format: surface_format,
        width,
        height,
        present_mode: present_mode(vsync),
        alpha_mode,
        view_formats: vec![],
        desired_maximum_frame_latency: 2,
    };

    surface.configure(&device, &surface_config);

    Ok(crate::modules::graphics::Gpu {
        surface,
        device,
        queue,
        surface_config,
        surface_format,
    })
}

/// Create a depth texture for the renderer to use
pub fn create_depth_texture(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let texture = device.create_texture(
        &(wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        }),
    );
    texture.create_view(&wgpu::TextureViewDescriptor {
        label: None,
        format: Some(wgpu::TextureFormat::Depth32Float),
        dimension: Some(wgpu::TextureViewDimension::D2),
        aspect: wgpu::TextureAspect::All,
        base_mip_level: 0,
        base_array_layer: 0,
        array_layer_count: None,
        mip_level_count: None,
    })
}
