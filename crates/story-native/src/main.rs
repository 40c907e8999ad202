//! Desktop preview of the storybook.
//!
//! Mouse wheel scrolls the story, arrow keys page between chapters, M
//! toggles the music. The streamed song of the web build is replaced by a
//! small procedural music-box loop on the default audio output.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use glam::Vec3;
use wgpu::util::DeviceExt;
use winit::{
    event::*,
    event_loop::EventLoop,
    keyboard::{Key, NamedKey},
    window::WindowBuilder,
};

use story_core::{
    chapter_index, hex_color, overlay_opacity, sort_back_to_front, Camera, CameraRig,
    ChapterTracker, Instance, Scene, ScrollState, ThemeBlender, ViewportClass, CHAPTER_COUNT,
    FOG_DENSITY, MAX_INSTANCES, SCENE_WGSL, STORY_CHAPTERS,
};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
    fog: [f32; 4],
    eye: [f32; 4],
}

struct GpuState<'w> {
    window: &'w winit::window::Window,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    quad_vb: wgpu::Buffer,
    instance_vb: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    width: u32,
    height: u32,
}

impl<'w> GpuState<'w> {
    async fn new(window: &'w winit::window::Window) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps.formats[0];
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            desired_maximum_frame_latency: 2,
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(SCENE_WGSL.into()),
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("uniforms"),
            size: std::mem::size_of::<Uniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        // Quad vertices for two triangles
        let quad_vertices: [f32; 12] = [
            -0.5, -0.5, 0.5, -0.5, 0.5, 0.5, -0.5, -0.5, 0.5, 0.5, -0.5, 0.5,
        ];
        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_vb"),
            contents: bytemuck::cast_slice(&quad_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let instance_vb = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("instance_vb"),
            size: (std::mem::size_of::<Instance>() * MAX_INSTANCES) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("bg"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let vertex_buffers = [
            // slot 0: quad positions
            wgpu::VertexBufferLayout {
                array_stride: (std::mem::size_of::<f32>() * 2) as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &[wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 0,
                    shader_location: 0,
                }],
            },
            // slot 1: instance data
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<Instance>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &[
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x3,
                        offset: 0,
                        shader_location: 1,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32,
                        offset: 12,
                        shader_location: 2,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x4,
                        offset: 16,
                        shader_location: 3,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32,
                        offset: 32,
                        shader_location: 4,
                    },
                ],
            },
        ];
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &vertex_buffers,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            pipeline,
            uniform_buffer,
            quad_vb,
            instance_vb,
            bind_group,
            width: size.width.max(1),
            height: size.height.max(1),
        })
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.width = new_size.width;
        self.height = new_size.height;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
    }

    fn render(
        &mut self,
        instances: &[Instance],
        eye: Vec3,
        target: Vec3,
        fog: [f32; 3],
    ) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let aspect = self.width as f32 / self.height.max(1) as f32;
        let camera = Camera::new(eye, target, aspect);
        self.queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms {
                view_proj: camera.view_proj(),
                fog: [fog[0], fog[1], fog[2], FOG_DENSITY],
                eye: [eye.x, eye.y, eye.z, 0.0],
            }),
        );

        let count = instances.len().min(MAX_INSTANCES);
        self.queue
            .write_buffer(&self.instance_vb, 0, bytemuck::cast_slice(&instances[..count]));

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("rpass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: fog[0] as f64,
                            g: fog[1] as f64,
                            b: fog[2] as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.pipeline);
            rpass.set_bind_group(0, &self.bind_group, &[]);
            rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
            rpass.set_vertex_buffer(1, self.instance_vb.slice(..));
            rpass.draw(0..6, 0..(count as u32));
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let muted = Arc::new(AtomicBool::new(false));
    // Keep the stream alive for the whole session.
    let music = start_music(Arc::clone(&muted));
    if music.is_none() {
        log::warn!("[audio] no usable output device; continuing silently");
    }

    let event_loop = EventLoop::new().expect("event loop");
    let window = WindowBuilder::new()
        .with_title("Our Story (native preview)")
        .build(&event_loop)
        .expect("window");

    let mut gpu = pollster::block_on(GpuState::new(&window)).expect("gpu");

    let mut scroll = ScrollState::new(CHAPTER_COUNT);
    let mut tracker = ChapterTracker::new();
    let mut scene = Scene::for_chapter(0);
    let mut rig = CameraRig::new(STORY_CHAPTERS[0].camera_vec3());
    let mut theme = ThemeBlender::new(hex_color(STORY_CHAPTERS[0].color_theme));
    let mut instances: Vec<Instance> = Vec::new();

    let started_at = Instant::now();
    let mut last_frame = Instant::now();

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::Resized(size),
                ..
            } => gpu.resize(size),
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => elwt.exit(),
            Event::WindowEvent {
                event: WindowEvent::MouseWheel { delta, .. },
                ..
            } => {
                let height = gpu.height as f32;
                let delta_px = match delta {
                    MouseScrollDelta::LineDelta(_, y) => -y * 40.0,
                    MouseScrollDelta::PixelDelta(p) => -p.y as f32,
                };
                scroll.apply_wheel(delta_px, height);
            }
            Event::WindowEvent {
                event:
                    WindowEvent::KeyboardInput {
                        event:
                            KeyEvent {
                                logical_key,
                                state: ElementState::Pressed,
                                ..
                            },
                        ..
                    },
                ..
            } => match logical_key {
                Key::Named(NamedKey::ArrowDown) | Key::Named(NamedKey::PageDown) => {
                    scroll.jump_chapters(1)
                }
                Key::Named(NamedKey::ArrowUp) | Key::Named(NamedKey::PageUp) => {
                    scroll.jump_chapters(-1)
                }
                Key::Character(c) if c == "m" || c == "M" => {
                    let now = !muted.load(Ordering::Relaxed);
                    muted.store(now, Ordering::Relaxed);
                    log::info!("[audio] muted={now}");
                }
                Key::Named(NamedKey::Escape) => elwt.exit(),
                _ => {}
            },
            Event::AboutToWait => {
                let now = Instant::now();
                let dt = (now - last_frame).as_secs_f32();
                last_frame = now;
                let t = started_at.elapsed().as_secs_f32();

                scroll.step(dt);
                let offset = scroll.offset();
                let index = chapter_index(offset, CHAPTER_COUNT);
                if let Some(new_index) = tracker.observe(index) {
                    scene = Scene::for_chapter(new_index);
                    let chapter = &STORY_CHAPTERS[new_index];
                    log::info!(
                        "[scroll] chapter {new_index}: {} (text opacity {:.2})",
                        chapter.title,
                        overlay_opacity(offset, CHAPTER_COUNT)
                    );
                }

                let chapter = &STORY_CHAPTERS[index];
                let class = ViewportClass::classify(gpu.width as f32, gpu.height as f32);
                rig.step(chapter.camera_vec3(), class, dt);
                theme.step(hex_color(chapter.color_theme), dt);

                scene.animate(t);
                instances.clear();
                scene.emit(t, &mut instances);
                instances.truncate(MAX_INSTANCES);
                let eye = rig.position;
                let look = class.look_target();
                sort_back_to_front(&mut instances, eye, look);

                match gpu.render(&instances, eye, look, theme.rgb()) {
                    Ok(_) => gpu.window.request_redraw(),
                    Err(wgpu::SurfaceError::Lost) => gpu.resize(gpu.window.inner_size()),
                    Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                    Err(_) => {}
                }
            }
            _ => {}
        })
        .unwrap();
}

// ---------------- Music box (cpal) ----------------

#[derive(Clone)]
struct ActiveNote {
    amplitude: f32,
    phase: f32,     // radians
    phase_inc: f32, // radians per sample
    total_samples: u32,
    samples_emitted: u32,
    attack_samples: u32,
    release_samples: u32,
}

struct AudioState {
    notes: Vec<ActiveNote>,
}

fn note_hz(midi: f32) -> f32 {
    440.0 * (2.0_f32).powf((midi - 69.0) / 12.0)
}

// A gentle looped waltz; midi pitch and length in beats.
const MELODY: &[(f32, f32)] = &[
    (69.0, 1.0),
    (73.0, 1.0),
    (76.0, 2.0),
    (74.0, 1.0),
    (73.0, 1.0),
    (71.0, 2.0),
    (69.0, 1.0),
    (71.0, 1.0),
    (73.0, 2.0),
    (71.0, 1.0),
    (69.0, 1.0),
    (66.0, 2.0),
    (64.0, 1.0),
    (66.0, 1.0),
    (69.0, 3.0),
    (68.0, 1.0),
    (69.0, 4.0),
];
const MELODY_BPM: f32 = 84.0;

fn start_music(muted: Arc<AtomicBool>) -> Option<cpal::Stream> {
    let host = cpal::default_host();
    let device = host.default_output_device()?;
    let config = device.default_output_config().ok()?;
    if config.sample_format() != cpal::SampleFormat::F32 {
        log::warn!("[audio] unsupported sample format {:?}", config.sample_format());
        return None;
    }
    let sample_rate = config.sample_rate().0 as f32;
    let channels = config.channels() as usize;

    let state = Arc::new(Mutex::new(AudioState { notes: Vec::new() }));

    // Scheduler thread walking the melody loop.
    {
        let state_clone = Arc::clone(&state);
        thread::Builder::new()
            .name("music-box".into())
            .spawn(move || {
                let beat = Duration::from_secs_f32(60.0 / MELODY_BPM);
                loop {
                    for &(midi, beats) in MELODY {
                        {
                            let mut guard = state_clone.lock().unwrap();
                            let dur_sec = beats * beat.as_secs_f32();
                            let total = ((dur_sec * 0.95) * sample_rate) as u32;
                            guard.notes.push(ActiveNote {
                                amplitude: 0.18,
                                phase: 0.0,
                                phase_inc: 2.0 * std::f32::consts::PI * note_hz(midi)
                                    / sample_rate,
                                total_samples: total.max(1),
                                samples_emitted: 0,
                                attack_samples: (0.01 * sample_rate) as u32,
                                release_samples: (0.35 * sample_rate).min(dur_sec * sample_rate)
                                    as u32,
                            });
                        }
                        thread::sleep(beat.mul_f32(beats));
                    }
                }
            })
            .ok()?;
    }

    let err_fn = |err| log::error!("[audio] stream error: {err}");
    let stream = device
        .build_output_stream(
            &config.into(),
            move |data: &mut [f32], _| {
                let silent = muted.load(Ordering::Relaxed);
                let mut guard = state.lock().unwrap();
                let notes = &mut guard.notes;
                let mut frame = 0usize;
                while frame < data.len() {
                    let v = if silent { 0.0 } else { mix_sample(notes) };
                    for ch in 0..channels {
                        if frame + ch < data.len() {
                            data[frame + ch] = v;
                        }
                    }
                    frame += channels;
                }
            },
            err_fn,
            None,
        )
        .ok()?;

    stream.play().ok()?;
    Some(stream)
}

fn mix_sample(notes: &mut Vec<ActiveNote>) -> f32 {
    let mut acc = 0.0f32;
    let mut i = 0usize;
    while i < notes.len() {
        let note = &mut notes[i];
        let n = note.samples_emitted;
        let env = if n < note.attack_samples {
            n as f32 / note.attack_samples.max(1) as f32
        } else if n > note.total_samples.saturating_sub(note.release_samples) {
            let rel_n = n.saturating_sub(note.total_samples - note.release_samples);
            1.0 - (rel_n as f32 / note.release_samples.max(1) as f32)
        } else {
            1.0
        };
        acc += note.phase.sin() * note.amplitude * env;
        note.phase += note.phase_inc;
        if note.phase > 2.0 * std::f32::consts::PI {
            note.phase -= 2.0 * std::f32::consts::PI;
        }
        note.samples_emitted += 1;
        if note.samples_emitted >= note.total_samples {
            notes.swap_remove(i);
            continue;
        }
        i += 1;
    }
    acc.tanh()
}
