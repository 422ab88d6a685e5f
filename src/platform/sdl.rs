use std::time::Instant;

use anyhow::{anyhow, Result};
use glam::Vec2;
use hashbrown::HashMap;
use sdl2::{
    event::Event as SdlEvent,
    keyboard::Scancode,
    pixels::PixelFormatEnum,
    rect::Point,
    render::{Canvas, Texture, TextureCreator},
    video::{Window, WindowContext},
    EventPump,
};

use crate::{
    app::App,
    asset::DecodedImage,
    color::Color,
    engine::{Engine, Scene},
    errors::Error,
    handle::{Handle, HandleId},
    input::{Event, KeyCode},
    types::Rect,
};

use super::Platform;

impl From<Color> for sdl2::pixels::Color {
    fn from(value: Color) -> Self {
        let Color { r, g, b, a } = value;
        Self::RGBA(r, g, b, a)
    }
}

impl From<Rect> for sdl2::rect::Rect {
    fn from(value: Rect) -> Self {
        let size = value.size();
        sdl2::rect::Rect::new(
            value.min.x.floor() as i32,
            value.min.y.floor() as i32,
            size.x.ceil() as u32,
            size.y.ceil() as u32,
        )
    }
}

impl From<Scancode> for KeyCode {
    fn from(value: Scancode) -> Self {
        match value {
            Scancode::Up => KeyCode::Up,
            Scancode::Down => KeyCode::Down,
            Scancode::Left => KeyCode::Left,
            Scancode::Right => KeyCode::Right,
            Scancode::Space => KeyCode::Space,
            Scancode::Return => KeyCode::Return,
            Scancode::Escape => KeyCode::Escape,
            Scancode::F1 => KeyCode::F1,
            other => KeyCode::Other(other as i32),
        }
    }
}

fn point(pos: Vec2) -> Point {
    Point::new(pos.x as i32, pos.y as i32)
}

struct ScreenBuffer {
    texture_creator: TextureCreator<WindowContext>,
    canvas: Canvas<Window>,
}

impl ScreenBuffer {
    fn new(canvas: Canvas<Window>) -> Self {
        let texture_creator = canvas.texture_creator();
        Self {
            canvas,
            texture_creator,
        }
    }
}

/// SDL2 window and renderer
///
/// Textures are created with `unsafe_textures`, so they are destroyed by
/// hand: an entry leaves the map before it is destroyed and whatever is left
/// is destroyed when the platform drops.
pub struct SdlPlatform {
    textures: HashMap<HandleId, Texture>,
    screen_buffer: ScreenBuffer,
    event_pump: EventPump,
    start: Instant,
}

impl SdlPlatform {
    fn new(screen_buffer: ScreenBuffer, event_pump: EventPump) -> Self {
        Self {
            textures: Default::default(),
            screen_buffer,
            event_pump,
            start: Instant::now(),
        }
    }

    fn log_err(op: &str, result: Result<(), String>) {
        if let Err(err) = result {
            log::error!("SDL {op} {err}");
        }
    }

    pub(crate) fn run<S: Scene>(app: App, scene: S) -> Result<()> {
        let App {
            title,
            window: size,
            vsync,
            asset_root,
            clear_color,
        } = app;

        let sdl_ctx = sdl2::init().map_err(|err| anyhow!(Error::Init(err)))?;
        let video_subsystem = sdl_ctx
            .video()
            .map_err(|err| anyhow!(Error::Init(err)))?;
        let window = video_subsystem
            .window(&title, size.x, size.y)
            .position_centered()
            .build()
            .map_err(|err| anyhow!(Error::Init(err.to_string())))?;
        let screen_buffer = {
            let mut builder = window.into_canvas().accelerated();
            if vsync {
                builder = builder.present_vsync();
            }
            let canvas = builder
                .build()
                .map_err(|err| anyhow!(Error::Init(err.to_string())))?;
            ScreenBuffer::new(canvas)
        };
        let event_pump = sdl_ctx
            .event_pump()
            .map_err(|err| anyhow!(Error::Init(err)))?;
        log::info!("Window {title} {}x{} vsync {vsync}", size.x, size.y);

        let platform = SdlPlatform::new(screen_buffer, event_pump);
        let mut engine = Engine::new(Box::new(platform), asset_root);
        engine.clear_color = clear_color;
        engine.run(scene)
    }
}

impl Platform for SdlPlatform {
    fn now(&mut self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }

    fn poll_events(&mut self) -> Result<Vec<Event>> {
        let events = self
            .event_pump
            .poll_iter()
            .filter_map(|event| match event {
                SdlEvent::Quit { .. } => Some(Event::Quit),
                SdlEvent::KeyDown {
                    scancode: Some(code),
                    ..
                } => Some(Event::KeyDown(code.into())),
                SdlEvent::KeyUp {
                    scancode: Some(code),
                    ..
                } => Some(Event::KeyUp(code.into())),
                _ => None,
            })
            .collect();
        Ok(events)
    }

    fn prepare_frame(&mut self, color: Color) {
        let canvas = &mut self.screen_buffer.canvas;
        canvas.set_draw_color(color);
        canvas.clear();
    }

    fn end_frame(&mut self) {
        self.screen_buffer.canvas.present();
    }

    fn cleanup(&mut self) {
        let ids: Vec<_> = self.textures.keys().copied().collect();
        for id in ids {
            self.remove_texture(id);
        }
    }

    fn draw(&mut self, handle: &Handle, src: Rect, dst: Rect) {
        let Some(texture) = self.textures.get(&handle.id()) else {
            log::debug!("Failed to get texture {}", handle.id());
            return;
        };
        let result = self
            .screen_buffer
            .canvas
            .copy(texture, Some(src.into()), Some(dst.into()));
        Self::log_err("draw", result);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let canvas = &mut self.screen_buffer.canvas;
        canvas.set_draw_color(color);
        Self::log_err("fill_rect", canvas.fill_rect(Some(rect.into())));
    }

    fn draw_rect_outline(&mut self, rect: Rect, color: Color) {
        let canvas = &mut self.screen_buffer.canvas;
        canvas.set_draw_color(color);
        Self::log_err("draw_rect", canvas.draw_rect(rect.into()));
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color) {
        let canvas = &mut self.screen_buffer.canvas;
        canvas.set_draw_color(color);
        Self::log_err("draw_line", canvas.draw_line(point(from), point(to)));
    }

    fn draw_points(&mut self, points: &[Vec2], color: Color) {
        let points: Vec<Point> = points.iter().copied().map(point).collect();
        let canvas = &mut self.screen_buffer.canvas;
        canvas.set_draw_color(color);
        Self::log_err("draw_points", canvas.draw_points(points.as_slice()));
    }

    fn create_texture(&mut self, handle: &Handle, image: DecodedImage) -> Result<()> {
        let DecodedImage { data, size } = image;
        let mut texture = self
            .screen_buffer
            .texture_creator
            .create_texture_static(PixelFormatEnum::ABGR8888, size.x, size.y)?;
        texture.update(None, &data, size.x as usize * 4)?;
        texture.set_blend_mode(sdl2::render::BlendMode::Blend);
        if let Some(old) = self.textures.insert(handle.id(), texture) {
            // SAFETY: the renderer that created it is still alive
            unsafe { old.destroy() };
        }
        Ok(())
    }

    fn remove_texture(&mut self, handle_id: HandleId) {
        if let Some(texture) = self.textures.remove(&handle_id) {
            log::debug!("Destroy texture {handle_id}");
            // SAFETY: the renderer that created it is still alive
            unsafe { texture.destroy() };
        }
    }
}

impl Drop for SdlPlatform {
    fn drop(&mut self) {
        // runs before the canvas field drops
        self.cleanup();
    }
}
