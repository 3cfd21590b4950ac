//! Headless `wgpu` execution of the custom passes from their bundled WGSL.
//!
//! Each pass's uniform map is mirrored into a `#[repr(C)]` block matching the WGSL `Params`
//! struct. Frames go up as straight-alpha RGBA8, render through a fullscreen triangle, and come
//! back premultiplied.

use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};

use crate::effects::pass::{PassKind, SceneInputs, ShaderPass};
use crate::effects::uniforms::Uniforms;
use crate::foundation::error::{KosmosError, KosmosResult};
use crate::foundation::math::mul_div255_u8;
use crate::render::frame::FrameRGBA;

/// Uniform block of the horizon AO shader.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct HbaoUniforms {
    /// Occlusion tint.
    pub color: [f32; 3],
    /// Sampling radius in pixels.
    pub radius: f32,
    /// Target size in pixels.
    pub resolution: [f32; 2],
    /// Occlusion strength.
    pub intensity: f32,
    /// Horizon bias.
    pub bias: f32,
    /// Fade-out distance.
    pub falloff: f32,
    /// Sample count.
    pub samples: i32,
    /// Multi-bounce blend.
    pub multi_bounce: f32,
    /// Camera near plane.
    pub near: f32,
    /// Camera far plane.
    pub far: f32,
    /// Seconds since start.
    pub time: f32,
    _pad: [f32; 2],
}

impl HbaoUniforms {
    /// Mirror a uniform map, falling back to the pass defaults.
    pub fn from_uniforms(u: &Uniforms, scene: &SceneInputs) -> Self {
        Self {
            color: u.vec3_or("ao_color", [0.8, 0.8, 1.0]),
            radius: u.float_or("ao_radius", 0.5),
            resolution: u.vec2_or("resolution", [1.0, 1.0]),
            intensity: u.float_or("ao_intensity", 1.0),
            bias: u.float_or("ao_bias", 0.025),
            falloff: u.float_or("ao_falloff", 100.0),
            samples: u.int_or("ao_samples", 32).clamp(1, 32),
            multi_bounce: u.float_or("ao_multi_bounce", 0.5),
            near: scene.camera_near,
            far: scene.camera_far,
            time: u.float_or("time", 0.0),
            _pad: [0.0; 2],
        }
    }
}

/// Uniform block of the film grain shader.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct GrainUniforms {
    /// Grain strength.
    pub intensity: f32,
    /// Seconds since start.
    pub time: f32,
    /// Response multiplier.
    pub response: f32,
    /// Luminance attenuation.
    pub lum_amount: f32,
}

impl GrainUniforms {
    /// Mirror a uniform map, falling back to the pass defaults.
    pub fn from_uniforms(u: &Uniforms) -> Self {
        Self {
            intensity: u.float_or("intensity", 0.05),
            time: u.float_or("time", 0.0),
            response: u.float_or("response", 1.0),
            lum_amount: u.float_or("lum_amount", 0.5),
        }
    }
}

/// Uniform block of the quantum depth shader.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct QuantumUniforms {
    /// Tint at the interference trough.
    pub near_color: [f32; 3],
    /// Tint mix.
    pub intensity: f32,
    /// Tint at the interference crest.
    pub far_color: [f32; 3],
    /// Seconds since start.
    pub time: f32,
    /// Wave frequency.
    pub wave_frequency: f32,
    /// Wave amplitude.
    pub wave_amplitude: f32,
    _pad: [f32; 2],
}

impl QuantumUniforms {
    /// Mirror a uniform map, falling back to the pass defaults.
    pub fn from_uniforms(u: &Uniforms) -> Self {
        Self {
            near_color: u.vec3_or("near_color", [0.9, 0.95, 1.0]),
            intensity: u.float_or("intensity", 0.1),
            far_color: u.vec3_or("far_color", [0.7, 0.8, 1.0]),
            time: u.float_or("time", 0.0),
            wave_frequency: u.float_or("wave_frequency", 10.0),
            wave_amplitude: u.float_or("wave_amplitude", 0.02),
            _pad: [0.0; 2],
        }
    }
}

/// Raw uniform bytes for `pass`, or `None` if it has no GPU program.
pub fn uniform_bytes(pass: &dyn ShaderPass, scene: &SceneInputs) -> Option<Vec<u8>> {
    let u = pass.uniforms();
    let bytes = match pass.kind() {
        PassKind::Hbao => bytemuck::bytes_of(&HbaoUniforms::from_uniforms(u, scene)).to_vec(),
        PassKind::FilmGrain => bytemuck::bytes_of(&GrainUniforms::from_uniforms(u)).to_vec(),
        PassKind::QuantumDepth => bytemuck::bytes_of(&QuantumUniforms::from_uniforms(u)).to_vec(),
        _ => return None,
    };
    Some(bytes)
}

/// Headless device plus one cached render pipeline per custom pass.
pub struct GpuEffects {
    device: wgpu::Device,
    queue: wgpu::Queue,
    sampler: wgpu::Sampler,
    bind_group_layout: wgpu::BindGroupLayout,
    pipeline_layout: wgpu::PipelineLayout,
    pipelines: HashMap<PassKind, wgpu::RenderPipeline>,
}

impl std::fmt::Debug for GpuEffects {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GpuEffects")
            .field("pipelines", &self.pipelines.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

const TARGET_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

impl GpuEffects {
    /// Acquire an adapter and device. Fails when no adapter is available.
    pub fn new() -> KosmosResult<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: None,
            force_fallback_adapter: false,
        }))
        .map_err(|e| match e {
            wgpu::RequestAdapterError::NotFound { .. } => {
                KosmosError::effect("no gpu adapter available")
            }
            other => KosmosError::effect(format!("wgpu request_adapter failed: {other:?}")),
        })?;

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("kosmos_effects"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            experimental_features: wgpu::ExperimentalFeatures::default(),
            memory_hints: wgpu::MemoryHints::Performance,
            trace: wgpu::Trace::Off,
        }))
        .map_err(|e| KosmosError::effect(format!("wgpu request_device failed: {e:?}")))?;

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("kosmos_effects_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let texture_entry = |binding: u32, filterable: bool| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                multisampled: false,
                view_dimension: wgpu::TextureViewDimension::D2,
                sample_type: wgpu::TextureSampleType::Float { filterable },
            },
            count: None,
        };
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("kosmos_effects_bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                texture_entry(1, true),
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
                texture_entry(3, false),
                texture_entry(4, true),
            ],
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("kosmos_effects_pl"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        Ok(Self {
            device,
            queue,
            sampler,
            bind_group_layout,
            pipeline_layout,
            pipelines: HashMap::new(),
        })
    }

    /// Whether `kind` has a GPU program.
    pub fn supports(kind: PassKind) -> bool {
        matches!(
            kind,
            PassKind::Hbao | PassKind::FilmGrain | PassKind::QuantumDepth
        )
    }

    fn ensure_pipeline(&mut self, pass: &dyn ShaderPass) -> KosmosResult<()> {
        let kind = pass.kind();
        if self.pipelines.contains_key(&kind) {
            return Ok(());
        }
        let source = pass
            .wgsl_source()
            .ok_or_else(|| KosmosError::effect(format!("pass '{kind}' has no wgsl source")))?;
        let shader = self
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(pass.name()),
                source: wgpu::ShaderSource::Wgsl(source.into()),
            });
        let pipeline = self
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(pass.name()),
                layout: Some(&self.pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                    buffers: &[],
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: TARGET_FORMAT,
                        blend: None,
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),
                primitive: wgpu::PrimitiveState::default(),
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            });
        tracing::debug!(pass = %kind, "gpu pipeline built");
        self.pipelines.insert(kind, pipeline);
        Ok(())
    }

    fn upload(
        &self,
        label: &str,
        format: wgpu::TextureFormat,
        (width, height): (u32, u32),
        texel_bytes: u32,
        data: &[u8],
    ) -> wgpu::TextureView {
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            data,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(width * texel_bytes),
                rows_per_image: Some(height),
            },
            size,
        );
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    /// Run `pass` over `frame` on the GPU.
    ///
    /// Horizon AO without a matching depth buffer, and empty frames, are returned unchanged.
    pub fn apply(
        &mut self,
        pass: &dyn ShaderPass,
        frame: &FrameRGBA,
        scene: &SceneInputs,
    ) -> KosmosResult<FrameRGBA> {
        let (w, h) = (frame.width, frame.height);
        let depth = scene.depth_for(w, h);
        if w == 0 || h == 0 || (pass.kind() == PassKind::Hbao && depth.is_none()) {
            return Ok(frame.clone());
        }
        let params = uniform_bytes(pass, scene).ok_or_else(|| {
            KosmosError::effect(format!("pass '{}' has no gpu program", pass.kind()))
        })?;
        self.ensure_pipeline(pass)?;

        let color = self.upload("kosmos_src", TARGET_FORMAT, (w, h), 4, &frame.to_straight_rgba());
        let depth_view = match depth {
            Some(d) => self.upload(
                "kosmos_depth",
                wgpu::TextureFormat::R32Float,
                (w, h),
                4,
                bytemuck::cast_slice(d),
            ),
            None => self.upload(
                "kosmos_depth",
                wgpu::TextureFormat::R32Float,
                (1, 1),
                4,
                bytemuck::bytes_of(&1.0f32),
            ),
        };
        let normal_view = match scene.normals_for(w, h) {
            Some(n) => {
                let bytes: Vec<u8> = n
                    .iter()
                    .flat_map(|v| {
                        let e = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
                        [e(v[0]), e(v[1]), e(v[2]), 255]
                    })
                    .collect();
                self.upload("kosmos_normals", TARGET_FORMAT, (w, h), 4, &bytes)
            }
            None => self.upload("kosmos_normals", TARGET_FORMAT, (1, 1), 4, &[128, 128, 255, 255]),
        };

        let uniforms = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("kosmos_effect_params"),
            size: params.len() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        self.queue.write_buffer(&uniforms, 0, &params);

        let extent = wgpu::Extent3d {
            width: w,
            height: h,
            depth_or_array_layers: 1,
        };
        let target = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("kosmos_effect_target"),
            size: extent,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: TARGET_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let target_view = target.create_view(&wgpu::TextureViewDescriptor::default());

        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("kosmos_effects_bg"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniforms.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&color),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::TextureView(&depth_view),
                },
                wgpu::BindGroupEntry {
                    binding: 4,
                    resource: wgpu::BindingResource::TextureView(&normal_view),
                },
            ],
        });

        let pipeline = self
            .pipelines
            .get(&pass.kind())
            .ok_or_else(|| KosmosError::effect("gpu pipeline missing after build"))?;

        let bytes_per_row = align_to(w * 4, wgpu::COPY_BYTES_PER_ROW_ALIGNMENT);
        let readback = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("kosmos_readback"),
            size: u64::from(bytes_per_row) * u64::from(h),
            usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("kosmos_effect_encoder"),
            });
        {
            let mut rp = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("kosmos_effect_rp"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &target_view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rp.set_pipeline(pipeline);
            rp.set_bind_group(0, &bind_group, &[]);
            rp.draw(0..3, 0..1);
        }
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: &target,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &readback,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(bytes_per_row),
                    rows_per_image: Some(h),
                },
            },
            extent,
        );
        self.queue.submit(Some(encoder.finish()));

        let slice = readback.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |res| {
            let _ = tx.send(res);
        });
        self.device
            .poll(wgpu::PollType::wait_indefinitely())
            .map_err(|e| KosmosError::effect(format!("wgpu poll failed: {e:?}")))?;
        rx.recv()
            .map_err(|_| KosmosError::effect("readback channel closed"))?
            .map_err(|e| KosmosError::effect(format!("readback map failed: {e:?}")))?;

        let mapped = slice.get_mapped_range();
        let row_bytes = w as usize * 4;
        let mut out = Vec::with_capacity(row_bytes * h as usize);
        for row in 0..h as usize {
            let start = row * bytes_per_row as usize;
            for px in mapped[start..start + row_bytes].chunks_exact(4) {
                let a = u16::from(px[3]);
                out.extend_from_slice(&[
                    mul_div255_u8(u16::from(px[0]), a),
                    mul_div255_u8(u16::from(px[1]), a),
                    mul_div255_u8(u16::from(px[2]), a),
                    px[3],
                ]);
            }
        }
        drop(mapped);
        readback.unmap();

        FrameRGBA::from_premul(w, h, out)
    }
}

fn align_to(value: u32, alignment: u32) -> u32 {
    let mask = alignment - 1;
    (value + mask) & !mask
}
