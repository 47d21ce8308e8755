//! Window host and render loop.
//!
//! The [`App`] owns the frame clock and ticks the backdrop once per
//! redraw: clock, then scene update, then render. The generators are
//! attached only after the GPU surface exists; redraws before that are
//! no-op ticks.

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::ActiveEventLoop,
    window::{Window, WindowId},
};

use crate::error::BackdropError;
use crate::gpu::GpuState;
use crate::scene::Backdrop;
use crate::time::FrameClock;

pub(crate) struct App {
    backdrop: Backdrop,
    clock: FrameClock,
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    mouse_pressed: bool,
    last_mouse_pos: Option<(f64, f64)>,
    error: Option<BackdropError>,
}

impl App {
    pub(crate) fn new(backdrop: Backdrop) -> Self {
        Self {
            backdrop,
            clock: FrameClock::new(),
            window: None,
            gpu: None,
            mouse_pressed: false,
            last_mouse_pos: None,
            error: None,
        }
    }

    /// The error that stopped the loop, if any.
    pub(crate) fn into_error(self) -> Option<BackdropError> {
        self.error
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: BackdropError) {
        self.error = Some(error);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title("driftfield")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => return self.fail(event_loop, e.into()),
        };
        self.window = Some(window.clone());

        match pollster::block_on(GpuState::new(window, &self.backdrop)) {
            Ok(gpu) => {
                self.gpu = Some(gpu);
                self.backdrop.attach();
            }
            Err(e) => self.fail(event_loop, e.into()),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(physical_size);
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if button == MouseButton::Left {
                    self.mouse_pressed = state == ElementState::Pressed;
                    if !self.mouse_pressed {
                        self.last_mouse_pos = None;
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if self.mouse_pressed {
                    if let Some((last_x, last_y)) = self.last_mouse_pos {
                        let dx = (position.x - last_x) as f32;
                        let dy = (position.y - last_y) as f32;
                        self.backdrop.camera_mut().apply_drag(dx, dy);
                    }
                    self.last_mouse_pos = Some((position.x, position.y));
                }
            }
            WindowEvent::RedrawRequested => {
                let (t, dt) = self.clock.update();
                self.backdrop.update(t, dt);

                if let Some(gpu) = &mut self.gpu {
                    match gpu.render(&mut self.backdrop, t) {
                        Ok(()) => {}
                        Err(wgpu::SurfaceError::Lost) => {
                            let size = winit::dpi::PhysicalSize {
                                width: gpu.config.width,
                                height: gpu.config.height,
                            };
                            gpu.resize(size);
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => event_loop.exit(),
                        Err(e) => eprintln!("Render error: {:?}", e),
                    }
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}
