use anyhow::Result;
use glam::Vec2;

use crate::{
    app::App,
    asset::DecodedImage,
    color::Color,
    engine::Scene,
    handle::{Handle, HandleId},
    input::Event,
    types::Rect,
};

pub mod headless;
mod sdl;

pub use headless::{Command, HeadlessPlatform, Recording};
pub use sdl::SdlPlatform;

/// Window, renderer, clock and event source behind the engine
pub trait Platform {
    /// Seconds since the platform started, monotonic
    fn now(&mut self) -> f32;
    /// Drain pending events without blocking
    fn poll_events(&mut self) -> Result<Vec<Event>>;
    /// Clear the screen with `color`
    fn prepare_frame(&mut self, color: Color);
    /// Present the frame
    fn end_frame(&mut self);
    fn cleanup(&mut self);
    /// Copy `src` of a texture to `dst` on screen
    fn draw(&mut self, texture: &Handle, src: Rect, dst: Rect);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn draw_rect_outline(&mut self, rect: Rect, color: Color);
    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color);
    fn draw_points(&mut self, points: &[Vec2], color: Color);
    fn create_texture(&mut self, handle: &Handle, image: DecodedImage) -> Result<()>;
    /// Destroy a texture, unknown ids are ignored
    fn remove_texture(&mut self, handle_id: HandleId);
}

/// Open the SDL window and run `scene` until quit
pub(crate) fn platform_run<S: Scene>(app: App, scene: S) -> Result<()> {
    SdlPlatform::run(app, scene)
}
