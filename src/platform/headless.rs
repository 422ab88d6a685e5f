use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use anyhow::{bail, Result};
use glam::{UVec2, Vec2};
use hashbrown::HashMap;

use crate::{
    asset::DecodedImage,
    color::Color,
    handle::{Handle, HandleId},
    input::Event,
    types::Rect,
};

use super::Platform;

/// What the headless platform was asked to do
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Clear(Color),
    Present,
    Draw { texture: HandleId, src: Rect, dst: Rect },
    FillRect { rect: Rect, color: Color },
    Outline { rect: Rect, color: Color },
    Line { from: Vec2, to: Vec2, color: Color },
    Points { count: usize, color: Color },
    CreateTexture { texture: HandleId, size: UVec2 },
    RemoveTexture { texture: HandleId },
}

/// Commands issued so far, shared with the test that owns the platform
#[derive(Debug, Default)]
pub struct Recording {
    pub commands: Vec<Command>,
    pub textures: HashMap<HandleId, UVec2>,
    pub cleaned_up: bool,
}

impl Recording {
    /// Draw commands between the last clear and present
    pub fn last_frame(&self) -> &[Command] {
        let end = self
            .commands
            .iter()
            .rposition(|cmd| *cmd == Command::Present)
            .unwrap_or(self.commands.len());
        let start = self.commands[..end]
            .iter()
            .rposition(|cmd| matches!(cmd, Command::Clear(_)))
            .map(|i| i + 1)
            .unwrap_or(0);
        &self.commands[start..end]
    }

    pub fn frames(&self) -> usize {
        self.commands
            .iter()
            .filter(|cmd| **cmd == Command::Present)
            .count()
    }

    pub fn removed(&self, texture: HandleId) -> usize {
        self.commands
            .iter()
            .filter(|cmd| **cmd == Command::RemoveTexture { texture })
            .count()
    }
}

/// Platform without a window
///
/// The clock moves by a fixed frame time on every present, and each poll
/// pops one batch of scripted events. An exhausted script reports `Quit`.
pub struct HeadlessPlatform {
    recording: Rc<RefCell<Recording>>,
    script: VecDeque<Vec<Event>>,
    clock: f32,
    frame_time: f32,
}

impl HeadlessPlatform {
    pub fn new(frame_time: f32) -> Self {
        Self {
            recording: Default::default(),
            script: Default::default(),
            clock: 0.0,
            frame_time,
        }
    }

    /// Queue the events returned by one poll
    pub fn push_events(&mut self, events: Vec<Event>) {
        self.script.push_back(events);
    }

    /// Queue `n` polls without events
    pub fn idle_frames(mut self, n: usize) -> Self {
        for _ in 0..n {
            self.push_events(Vec::new());
        }
        self
    }

    pub fn recording(&self) -> Rc<RefCell<Recording>> {
        self.recording.clone()
    }

    fn record(&mut self, command: Command) {
        self.recording.borrow_mut().commands.push(command);
    }
}

impl Platform for HeadlessPlatform {
    fn now(&mut self) -> f32 {
        self.clock
    }

    fn poll_events(&mut self) -> Result<Vec<Event>> {
        Ok(self.script.pop_front().unwrap_or_else(|| vec![Event::Quit]))
    }

    fn prepare_frame(&mut self, color: Color) {
        self.record(Command::Clear(color));
    }

    fn end_frame(&mut self) {
        self.record(Command::Present);
        self.clock += self.frame_time;
    }

    fn cleanup(&mut self) {
        self.recording.borrow_mut().cleaned_up = true;
    }

    fn draw(&mut self, texture: &Handle, src: Rect, dst: Rect) {
        if !self.recording.borrow().textures.contains_key(&texture.id()) {
            log::debug!("Failed to get texture {}", texture.id());
            return;
        }
        self.record(Command::Draw {
            texture: texture.id(),
            src,
            dst,
        });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.record(Command::FillRect { rect, color });
    }

    fn draw_rect_outline(&mut self, rect: Rect, color: Color) {
        self.record(Command::Outline { rect, color });
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color) {
        self.record(Command::Line { from, to, color });
    }

    fn draw_points(&mut self, points: &[Vec2], color: Color) {
        self.record(Command::Points {
            count: points.len(),
            color,
        });
    }

    fn create_texture(&mut self, handle: &Handle, image: DecodedImage) -> Result<()> {
        let expected = (image.size.x * image.size.y * 4) as usize;
        if image.data.len() != expected {
            bail!(
                "texture data {} bytes, expected {}",
                image.data.len(),
                expected
            );
        }
        self.recording
            .borrow_mut()
            .textures
            .insert(handle.id(), image.size);
        self.record(Command::CreateTexture {
            texture: handle.id(),
            size: image.size,
        });
        Ok(())
    }

    fn remove_texture(&mut self, handle_id: HandleId) {
        if self
            .recording
            .borrow_mut()
            .textures
            .remove(&handle_id)
            .is_some()
        {
            self.record(Command::RemoveTexture { texture: handle_id });
        }
    }
}

impl Drop for HeadlessPlatform {
    fn drop(&mut self) {
        let ids: Vec<_> = self.recording.borrow().textures.keys().copied().collect();
        for id in ids {
            self.remove_texture(id);
        }
    }
}
