use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use fnv::FnvHashMap;
use glam::{Mat4, Vec3};
use web_sys as web;
use wgpu::util::DeviceExt;
use wheel_core::constants::ITEM_CORNER_RADIUS;
use wheel_core::resources::load_item_assets;
use wheel_core::{
    Camera, ItemId, ResourceId, ResourceKind, ResourceTracker, WheelError, WheelItem, WheelPair,
};

use crate::constants::{CLEAR_COLOR, RIM_LIGHT_COLOR};

mod helpers;
mod textures;

pub const WHEEL_WGSL: &str = include_str!("../shaders/wheel.wgsl");

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct CameraUniforms {
    view_proj: [[f32; 4]; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct ItemUniforms {
    model: [[f32; 4]; 4],
    size: [f32; 2],
    corner_radius: f32,
    mouse_influence: f32,
    uv_scale: [f32; 2],
    uv_offset: [f32; 2],
    rim_color: [f32; 4],
}

struct ProjectTexture {
    id: ResourceId,
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    aspect: f32,
}

struct ItemMaterial {
    id: ResourceId,
    item: ItemId,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    uv_scale: [f32; 2],
    uv_offset: [f32; 2],
}

struct Quad {
    id: ResourceId,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
}

/// Everything the photo wheel needs on the GPU. Resources are registered in
/// a [`ResourceTracker`] and released once, on `dispose` or drop.
pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    item_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    quad: Quad,
    depth_texture: wgpu::Texture,
    depth_view: wgpu::TextureView,
    textures: FnvHashMap<String, ProjectTexture>,
    materials: Vec<ItemMaterial>,
    tracker: ResourceTracker,
    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl GpuState {
    /// Acquire an adapter and device for `canvas`. A lost device raises
    /// `device_lost` so the frame loop can suspend and rebuild.
    pub async fn new(
        canvas: &web::HtmlCanvasElement,
        device_lost: Arc<AtomicBool>,
    ) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU/WebGL adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // WebGL2 needs the downlevel limits
                    required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                        .using_resolution(adapter.limits()),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        device.set_device_lost_callback(move |reason, message| {
            if reason != wgpu::DeviceLostReason::Destroyed {
                log::warn!("[gpu] device lost ({:?}): {}", reason, message);
                device_lost.store(true, Ordering::SeqCst);
            }
        });

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let mut tracker = ResourceTracker::new();

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("wheel_shader"),
            source: wgpu::ShaderSource::Wgsl(WHEEL_WGSL.into()),
        });
        let camera_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("camera_bgl"),
            entries: &[helpers::uniform_layout_entry(0, wgpu::ShaderStages::VERTEX)],
        });
        let item_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("item_bgl"),
            entries: &[
                helpers::uniform_layout_entry(
                    0,
                    wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ),
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("item_pl"),
            bind_group_layouts: &[&camera_layout, &item_layout],
            push_constant_ranges: &[],
        });
        let pipeline = helpers::make_item_pipeline(&device, &pipeline_layout, &shader, format);

        let camera_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("camera_uniforms"),
            size: std::mem::size_of::<CameraUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("camera_bg"),
            layout: &camera_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("photo_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let quad = Quad {
            id: tracker.track(ResourceKind::Geometry, "card_quad"),
            vertex_buffer: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("quad_vertices"),
                contents: bytemuck::cast_slice(&helpers::QUAD_VERTICES),
                usage: wgpu::BufferUsages::VERTEX,
            }),
            index_buffer: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("quad_indices"),
                contents: bytemuck::cast_slice(&helpers::QUAD_INDICES),
                usage: wgpu::BufferUsages::INDEX,
            }),
        };
        let (depth_texture, depth_view) = helpers::create_depth_texture(&device, width, height);

        log::info!("[gpu] ready {}x{} format={:?}", width, height, format);
        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            camera_buffer,
            camera_bind_group,
            item_layout,
            sampler,
            quad,
            depth_texture,
            depth_view,
            textures: FnvHashMap::default(),
            materials: Vec::new(),
            tracker,
            width,
            height,
            clear_color: wgpu::Color {
                r: CLEAR_COLOR[0],
                g: CLEAR_COLOR[1],
                b: CLEAR_COLOR[2],
                a: 1.0,
            },
        })
    }

    /// Load one texture per distinct project image and a material per item.
    /// Items whose image failed are left without a material and not drawn.
    pub async fn load_assets(&mut self, items: &[WheelItem], card_aspect: f32) {
        let mut failures: FnvHashMap<String, WheelError> = FnvHashMap::default();
        for item in items {
            let path = &item.project.image;
            if self.textures.contains_key(path) || failures.contains_key(path) {
                continue;
            }
            match textures::load_image(path).await {
                Ok(img) => {
                    let (texture, view) =
                        textures::upload_image(&self.device, &self.queue, &img, path);
                    let aspect = img.natural_width() as f32 / img.natural_height().max(1) as f32;
                    let id = self.tracker.track(ResourceKind::Texture, path.clone());
                    self.textures.insert(
                        path.clone(),
                        ProjectTexture {
                            id,
                            texture,
                            view,
                            aspect,
                        },
                    );
                }
                Err(e) => {
                    failures.insert(path.clone(), e);
                }
            }
        }

        let Self {
            device,
            item_layout,
            sampler,
            textures,
            tracker,
            ..
        } = self;
        let materials = load_item_assets(items, |item| {
            let path = &item.project.image;
            let tex = match textures.get(path) {
                Some(tex) => tex,
                None => {
                    return Err(failures.get(path).cloned().unwrap_or(WheelError::AssetLoad {
                        path: path.clone(),
                        reason: "texture missing".into(),
                    }))
                }
            };
            Ok(create_material(device, item_layout, sampler, tracker, item, tex, card_aspect))
        });
        self.materials = materials.into_iter().flatten().collect();
        log::info!(
            "[assets] {} textures, {}/{} items drawable",
            self.textures.len(),
            self.materials.len(),
            items.len()
        );
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            let (depth_texture, depth_view) =
                helpers::create_depth_texture(&self.device, width, height);
            self.depth_texture.destroy();
            self.depth_texture = depth_texture;
            self.depth_view = depth_view;
        }
    }

    fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    pub fn render(&mut self, wheel: &WheelPair, camera: &Camera) -> Result<(), wgpu::SurfaceError> {
        if self.tracker.is_disposed() {
            return Ok(());
        }
        let camera_uniforms = CameraUniforms {
            view_proj: camera.view_projection().to_cols_array_2d(),
        };
        self.queue
            .write_buffer(&self.camera_buffer, 0, bytemuck::bytes_of(&camera_uniforms));

        let half = wheel.half_extents();
        let card = Mat4::from_scale(Vec3::new(half.x * 2.0, half.y * 2.0, 1.0));
        for material in &self.materials {
            let Some(item) = wheel.item(material.item) else {
                continue;
            };
            let Some(model) = wheel.world_matrix(material.item) else {
                continue;
            };
            let uniforms = ItemUniforms {
                model: (model * card).to_cols_array_2d(),
                size: [half.x * 2.0, half.y * 2.0],
                corner_radius: ITEM_CORNER_RADIUS,
                mouse_influence: item.mouse_influence.clamp(0.0, 1.0),
                uv_scale: material.uv_scale,
                uv_offset: material.uv_offset,
                rim_color: [RIM_LIGHT_COLOR[0], RIM_LIGHT_COLOR[1], RIM_LIGHT_COLOR[2], 1.0],
            };
            self.queue
                .write_buffer(&material.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
        }

        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.reconfigure();
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("wheel_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.pipeline);
            rpass.set_bind_group(0, &self.camera_bind_group, &[]);
            rpass.set_vertex_buffer(0, self.quad.vertex_buffer.slice(..));
            rpass.set_index_buffer(self.quad.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
            for material in &self.materials {
                rpass.set_bind_group(1, &material.bind_group, &[]);
                rpass.draw_indexed(0..helpers::QUAD_INDICES.len() as u32, 0, 0..1);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    /// Release geometry, textures and materials. Only the first call does
    /// any work.
    pub fn dispose(&mut self) {
        let released = self.tracker.dispose_all();
        if released.is_empty() {
            return;
        }
        for (id, kind) in &released {
            match kind {
                ResourceKind::Geometry if *id == self.quad.id => {
                    self.quad.vertex_buffer.destroy();
                    self.quad.index_buffer.destroy();
                }
                ResourceKind::Texture => {
                    if let Some(tex) = self.textures.values().find(|t| t.id == *id) {
                        tex.texture.destroy();
                    }
                }
                ResourceKind::Material => {
                    if let Some(m) = self.materials.iter().find(|m| m.id == *id) {
                        m.uniform_buffer.destroy();
                    }
                }
                ResourceKind::Geometry => {}
            }
        }
        self.materials.clear();
        self.textures.clear();
        self.depth_texture.destroy();
        self.camera_buffer.destroy();
        log::info!("[gpu] released {} resources", released.len());
    }
}

impl Drop for GpuState {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn create_material(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    sampler: &wgpu::Sampler,
    tracker: &mut ResourceTracker,
    item: &WheelItem,
    tex: &ProjectTexture,
    card_aspect: f32,
) -> ItemMaterial {
    let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("item_uniforms"),
        size: std::mem::size_of::<ItemUniforms>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("item_bg"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(&tex.view),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    });
    let (uv_scale, uv_offset) = helpers::cover_uv(tex.aspect, card_aspect);
    ItemMaterial {
        id: tracker.track(ResourceKind::Material, format!("item-{}", item.id.0)),
        item: item.id,
        uniform_buffer,
        bind_group,
        uv_scale,
        uv_offset,
    }
}
