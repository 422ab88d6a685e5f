use std::path::Path;

use anyhow::Result;
use glam::{UVec2, Vec2};
use hashbrown::HashMap;

use crate::{
    asset::{AssetManager, DecodedImage},
    atlas::{AtlasId, SpriteId, TextureAtlas},
    color::{Color, BLACK, BLUE},
    errors::Error,
    input::{Event, InputState, KeyCode},
    perf::FrameCounter,
    platform::Platform,
    sheet::SheetManifest,
    sprite::AnimatedSprite,
    types::Rect,
    world::World,
};

/// Max tick in seconds, longer stalls are not replayed
pub const ENGINE_MAX_TICK: f32 = 0.1;

// Scene trait
pub trait Scene {
    // Init the scene, use it to load atlases and spawn sprites.
    fn init(&mut self, _eng: &mut Engine) -> Result<()> {
        Ok(())
    }

    // Update scene per frame, you probably want to call scene_base_update if you override this function.
    fn update(&mut self, eng: &mut Engine) {
        eng.scene_base_update();
    }

    // Draw scene per frame, you probably want to call scene_base_draw if you override this function.
    fn draw(&mut self, eng: &mut Engine) {
        eng.scene_base_draw();
    }

    // Called for every key press after the engine handled it.
    fn key_down(&mut self, _eng: &mut Engine, _key: KeyCode) {}

    // Called when the loop ends, before textures are released.
    fn cleanup(&mut self, _eng: &mut Engine) {}
}

/// Atlas and named sprites created from a sheet manifest
#[derive(Debug, Clone)]
pub struct Sheet {
    pub atlas: AtlasId,
    pub sprites: HashMap<String, SpriteId>,
}

pub struct Engine {
    // The real time in seconds since platform start
    pub time_real: f32,

    // The game time in seconds since the loop started
    pub time: f32,

    // A global multiplier for how fast game time should advance. Default: 1.0
    pub time_scale: f32,

    // The time difference in seconds from the last frame to the current,
    // clamped to ENGINE_MAX_TICK
    pub tick: f32,

    // The frame number, increases by 1 for every frame.
    pub frame: u64,

    // Color the screen is cleared with
    pub clear_color: Color,

    // Outline every sprite destination, toggled with F1
    pub debug_outlines: bool,

    wants_to_exit: bool,
    frame_counter: FrameCounter,
    world: World,
    input: InputState,
    assets: AssetManager,
    platform: Box<dyn Platform>,
}

impl Engine {
    pub fn new<P: AsRef<Path>>(platform: Box<dyn Platform + 'static>, asset_root: P) -> Self {
        Self {
            time_real: 0.0,
            time: 0.0,
            time_scale: 1.0,
            tick: 0.0,
            frame: 0,
            clear_color: BLACK,
            debug_outlines: false,
            wants_to_exit: false,
            frame_counter: FrameCounter::default(),
            world: World::default(),
            input: InputState::default(),
            assets: AssetManager::new(asset_root),
            platform,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn assets(&self) -> &AssetManager {
        &self.assets
    }

    /// Rate measured over the last second
    pub fn fps(&self) -> f32 {
        self.frame_counter.fps()
    }

    // Return seconds since platform start
    pub fn now(&mut self) -> f32 {
        self.platform.now()
    }

    /// Load an image below the asset root and slice it into `cell_size` cells
    pub fn load_atlas<P: AsRef<Path>>(&mut self, path: P, cell_size: UVec2) -> Result<AtlasId> {
        let image = self.assets.load_image(path.as_ref())?;
        let id = self.add_atlas_image(image, cell_size)?;
        log::info!("Loaded atlas {} as {id:?}", path.as_ref().display());
        Ok(id)
    }

    /// Upload decoded pixels and slice them into `cell_size` cells
    pub fn add_atlas_image(&mut self, image: DecodedImage, cell_size: UVec2) -> Result<AtlasId> {
        let handle = self.assets.alloc_handle();
        let atlas = TextureAtlas::new(handle.clone(), image.size, cell_size)?;
        self.platform.create_texture(&handle, image)?;
        Ok(self.world.add_atlas(atlas))
    }

    /// Load a sheet manifest, its atlas and every sprite it describes
    pub fn load_sheet<P: AsRef<Path>>(&mut self, path: P) -> Result<Sheet> {
        let path = path.as_ref();
        let bytes = self.assets.load_bytes(path)?;
        let manifest = SheetManifest::from_slice(&bytes)
            .map_err(|err| Error::resource_load(path, err))?;
        let atlas = self.load_atlas(&manifest.image, manifest.cell_size())?;
        let mut sprites = HashMap::new();
        for def in &manifest.sprites {
            let id = self.spawn(atlas, def.build()?)?;
            sprites.insert(def.name.clone(), id);
        }
        log::info!(
            "Loaded sheet {} with {} sprites",
            path.display(),
            sprites.len()
        );
        Ok(Sheet { atlas, sprites })
    }

    /// Register a sprite with an atlas
    pub fn spawn(&mut self, atlas: AtlasId, sprite: AnimatedSprite) -> Result<SpriteId> {
        Ok(self.world.spawn(atlas, sprite)?)
    }

    /// Ask the loop to stop after the current frame
    pub fn quit(&mut self) {
        self.wants_to_exit = true;
    }

    pub fn wants_to_exit(&self) -> bool {
        self.wants_to_exit
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Quit => {
                log::info!("Quit requested");
                self.quit();
            }
            Event::KeyDown(key) => {
                self.input.key_down(key);
                match key {
                    KeyCode::Escape => self.quit(),
                    KeyCode::Up => log::info!("Up key"),
                    KeyCode::F1 if self.input.just_pressed(key) => {
                        self.debug_outlines = !self.debug_outlines;
                        log::debug!("Debug outlines {}", self.debug_outlines);
                    }
                    _ => {}
                }
            }
            Event::KeyUp(key) => self.input.key_up(key),
        }
    }

    /// Draw rectangle
    pub fn draw_rect(&mut self, rect: Rect, color: Color) {
        self.platform.fill_rect(rect, color);
    }

    /// Draw rectangle outline
    pub fn draw_rect_outline(&mut self, rect: Rect, color: Color) {
        self.platform.draw_rect_outline(rect, color);
    }

    pub fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color) {
        self.platform.draw_line(from, to, color);
    }

    pub fn draw_points(&mut self, points: &[Vec2], color: Color) {
        self.platform.draw_points(points, color);
    }

    /// Scene base update, advance every registered sprite
    pub fn scene_base_update(&mut self) {
        self.world.update(self.tick);
    }

    /// Scene base draw, copy every registered sprite to the screen
    pub fn scene_base_draw(&mut self) {
        for call in self.world.draw_calls() {
            self.platform
                .draw(&call.texture, call.rects.src, call.rects.dst);
            if self.debug_outlines {
                self.platform.draw_rect_outline(call.rects.dst, BLUE);
            }
        }
    }

    /// Run `scene` until a quit event, textures are released on every exit path
    pub fn run<S: Scene>(&mut self, mut scene: S) -> Result<()> {
        let result = self.run_loop(&mut scene);
        if let Err(err) = &result {
            log::error!("Engine stopped: {err:?}");
        }
        scene.cleanup(self);
        self.cleanup();
        result
    }

    fn run_loop<S: Scene>(&mut self, scene: &mut S) -> Result<()> {
        scene.init(self)?;
        self.time_real = self.now();
        self.frame_counter.reset(self.time_real);

        while !self.wants_to_exit {
            for event in self.platform.poll_events()? {
                self.handle_event(event);
                if let Event::KeyDown(key) = event {
                    scene.key_down(self, key);
                }
            }
            if self.wants_to_exit {
                break;
            }
            self.update(scene);
        }
        log::info!("Stopped after {} frames", self.frame);
        Ok(())
    }

    /// One frame: tick, update, clear, draw, present
    pub fn update<S: Scene + ?Sized>(&mut self, scene: &mut S) {
        let time_real_now = self.now();
        let real_delta = time_real_now - self.time_real;
        self.time_real = time_real_now;
        self.tick = (real_delta * self.time_scale).clamp(0.0, ENGINE_MAX_TICK);
        self.time += self.tick;
        self.frame += 1;

        scene.update(self);

        self.platform.prepare_frame(self.clear_color);
        scene.draw(self);
        self.platform.end_frame();

        self.input.clear();
        self.release_dropped();

        let now = self.now();
        if let Some(fps) = self.frame_counter.tick(now) {
            log::debug!("{fps:.1} fps, frame {}", self.frame);
        }
    }

    /// Destroy textures whose last handle was dropped
    fn release_dropped(&mut self) {
        for id in self.assets.collect_dropped() {
            self.platform.remove_texture(id);
        }
    }

    pub(crate) fn cleanup(&mut self) {
        self.world.clear();
        self.release_dropped();
        self.platform.cleanup();
    }
}
