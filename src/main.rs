use miyu::prelude::*;

const WINDOW: UVec2 = UVec2::new(1280, 800);
const FLOOR_Y: f32 = 600.0;

#[derive(Default)]
struct Miyu {
    sheet: Option<Sheet>,
}

impl Scene for Miyu {
    fn init(&mut self, eng: &mut Engine) -> Result<()> {
        let sheet = eng.load_sheet("miyu.json")?;
        log::info!("Atlas {:?} sprites {:?}", sheet.atlas, sheet.sprites.keys());
        self.sheet = Some(sheet);
        Ok(())
    }

    fn draw(&mut self, eng: &mut Engine) {
        let size = WINDOW.as_vec2();
        eng.draw_rect(
            Rect::from_pos_size(Vec2::new(0.0, FLOOR_Y), Vec2::new(size.x, 200.0)),
            DARK_SLATE_GRAY,
        );
        eng.draw_line(Vec2::new(0.0, FLOOR_Y), Vec2::new(size.x, FLOOR_Y), GRAY);
        eng.draw_rect_outline(Rect::from_pos_size(size / 6.0, size * 2.0 / 3.0), GREEN);
        // dotted center line
        let dots: Vec<Vec2> = (0..WINDOW.y)
            .step_by(4)
            .map(|y| Vec2::new(size.x / 2.0, y as f32))
            .collect();
        eng.draw_points(&dots, YELLOW);
        eng.scene_base_draw();
    }

    fn key_down(&mut self, eng: &mut Engine, key: KeyCode) {
        if key == KeyCode::Space {
            eng.time_scale = if eng.time_scale == 0.0 { 1.0 } else { 0.0 };
            log::info!("Time scale {}", eng.time_scale);
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let app = App::default().title("Miyu").window(WINDOW);
    if let Err(err) = app.run(Miyu::default()) {
        log::error!("{err:?}");
        std::process::exit(1);
    }
}
