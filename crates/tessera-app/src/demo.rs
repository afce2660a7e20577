// Demo scene: a walled room, a player, a wandering goblin, a banner and a
// help panel, drawn from scratch every frame.

use tessera_core::{Cell, Color, Glyph, ZLevel, CGA};
use tessera_grid::{blit, Grid, GridError, PrintOptions};
use tessera_input::{Key, KeyPress, Keyboard, Mouse, MouseButton};

const TERRAIN_Z: ZLevel = 0;
const WALL_Z: ZLevel = 1;
const ENTITY_Z: ZLevel = 5;
const PLAYER_Z: ZLevel = 10;
const UI_Z: ZLevel = 20;
const HIGHLIGHT_Z: ZLevel = 30;

const PANEL_WIDTH: usize = 26;
const PANEL_HEIGHT: usize = 7;

const BANNER: &str = "Hello World!";
const HELP: &str = "Arrow keys or the keypad move the @. Click a cell to inspect it. \
                    Escape quits.";

/// Input fed to the demo at a given frame.
#[derive(Debug, Clone, Copy)]
pub enum ScriptedInput {
    Key(KeyPress),
    MouseMove(f32, f32),
    MousePress(MouseButton),
    MouseRelease(MouseButton),
    Resize(u32, u32),
}

pub struct Demo {
    player: (i32, i32),
    goblin: (i32, i32),
    panel: Grid,
    tick: u64,
    inspected: Option<Cell>,
}

impl Demo {
    pub fn new(grid: &Grid) -> Result<Self, GridError> {
        let (w, h) = (grid.width() as i32, grid.height() as i32);
        Ok(Self {
            player: (w / 2, h / 2),
            goblin: (w / 4, h / 3),
            panel: Grid::new(PANEL_WIDTH, PANEL_HEIGHT)?,
            tick: 0,
            inspected: None,
        })
    }

    pub fn player(&self) -> (i32, i32) {
        self.player
    }

    /// The cell under the mouse at the last left click.
    pub fn inspected(&self) -> Option<Cell> {
        self.inspected
    }

    /// Consume this frame's input and redraw `grid`. Returns `false` once
    /// the player asked to quit.
    pub fn update(&mut self, keyboard: &mut Keyboard, mouse: &mut Mouse, grid: &mut Grid) -> Result<bool, GridError> {
        self.tick += 1;

        if let Some(press) = keyboard.take() {
            let (dx, dy) = match press.key {
                Key::Escape => return Ok(false),
                Key::Up | Key::Keypad8 => (0, -1),
                Key::Down | Key::Keypad2 => (0, 1),
                Key::Left | Key::Keypad4 => (-1, 0),
                Key::Right | Key::Keypad6 => (1, 0),
                _ => (0, 0),
            };
            self.player = (self.player.0 + dx, self.player.1 + dy);
        }

        // Goblin paces the room on a fixed cycle.
        if self.tick % 8 == 0 {
            let step = if (self.tick / 64) % 2 == 0 { 1 } else { -1 };
            self.goblin.0 += step;
        }

        self.player = clamp_to_room(self.player, grid);
        self.goblin = clamp_to_room(self.goblin, grid);

        self.draw(grid, mouse)?;

        if mouse.take_left_click() {
            self.inspected = grid.get(mouse.x(), mouse.y()).copied();
            if let Some(cell) = self.inspected {
                log::info!("Cell ({}, {}): glyph {}", mouse.x(), mouse.y(), cell.glyph);
            }
        }
        Ok(true)
    }

    fn draw(&mut self, grid: &mut Grid, mouse: &Mouse) -> Result<(), GridError> {
        let (w, h) = (grid.width() as i32, grid.height() as i32);
        grid.clear();

        // Terrain and walls
        grid.set_cell_rect_z(0, 0, w, h, Cell::from_char('.', Color::GRAY, Color::BLACK), TERRAIN_Z);
        let wall = Cell::from_char('#', Color::LIGHT_GRAY, Color::BROWN);
        grid.set_cell_rect_z(0, 0, w, 1, wall, WALL_Z);
        grid.set_cell_rect_z(0, h - 1, w, 1, wall, WALL_Z);
        grid.set_cell_rect_z(0, 0, 1, h, wall, WALL_Z);
        grid.set_cell_rect_z(w - 1, 0, 1, h, wall, WALL_Z);

        // Entities, drawn in an order that does not matter
        grid.set_cell_z(self.player.0, self.player.1, Cell::from_char('@', Color::YELLOW, Color::BLACK), PLAYER_Z);
        grid.set_char_z(self.goblin.0, self.goblin.1, 'g', ENTITY_Z);
        grid.set_foreground_z(self.goblin.0, self.goblin.1, Color::LIGHT_GREEN, ENTITY_Z);

        grid.print_z(1, 0, BANNER, Color::WHITE, Some(Color::BLUE), UI_Z);

        // Help panel, composed off-screen and copied to the bottom-right corner
        self.panel
            .clear_with(' ' as Glyph, Color::BLUE, Color::WHITE, None);
        let options = PrintOptions::new(Color::WHITE, PANEL_WIDTH - 2)
            .background(Color::BLUE)
            .max_lines(PANEL_HEIGHT - 3);
        self.panel.print_wrapped(1, 1, HELP, &options);
        blit(
            &self.panel,
            0,
            0,
            PANEL_WIDTH as i32,
            PANEL_HEIGHT as i32,
            grid,
            w - PANEL_WIDTH as i32 - 1,
            h - PANEL_HEIGHT as i32 - 1,
        )?;

        // Hovered cell cycles through the bright palette half
        let highlight = CGA[8 + (self.tick / 4 % 8) as usize];
        grid.set_background_z(mouse.x(), mouse.y(), highlight, HIGHLIGHT_Z);
        Ok(())
    }
}

/// Keep a position inside the walls (or inside the grid when there is no
/// room for walls).
fn clamp_to_room(pos: (i32, i32), grid: &Grid) -> (i32, i32) {
    let (w, h) = (grid.width() as i32, grid.height() as i32);
    let (lo_x, hi_x) = if w > 2 { (1, w - 2) } else { (0, w - 1) };
    let (lo_y, hi_y) = if h > 2 { (1, h - 2) } else { (0, h - 1) };
    (pos.0.clamp(lo_x, hi_x), pos.1.clamp(lo_y, hi_y))
}

/// A fixed input script: walk around, hover and click, resize the window,
/// then quit. Pixel positions are in window space for the given cell size.
pub fn script(cell: (u32, u32)) -> Vec<(u64, ScriptedInput)> {
    let (cw, ch) = (cell.0 as f32, cell.1 as f32);
    let mut script = Vec::new();
    for (i, key) in [Key::Right, Key::Right, Key::Down, Key::Keypad4, Key::Up]
        .into_iter()
        .enumerate()
    {
        script.push((2 + i as u64 * 4, ScriptedInput::Key(KeyPress::new(key))));
    }
    script.push((24, ScriptedInput::MouseMove(3.5 * cw, 2.5 * ch)));
    script.push((26, ScriptedInput::MousePress(MouseButton::Left)));
    script.push((27, ScriptedInput::MouseRelease(MouseButton::Left)));
    script.push((40, ScriptedInput::Resize((60.0 * cw) as u32, (30.0 * ch) as u32)));
    script.push((48, ScriptedInput::MouseMove(10.0 * cw, 10.0 * ch)));
    script.push((90, ScriptedInput::Key(KeyPress::new(Key::Escape))));
    script
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(w: usize, h: usize) -> (Demo, Grid, Keyboard, Mouse) {
        let grid = Grid::new(w, h).unwrap();
        let demo = Demo::new(&grid).unwrap();
        (demo, grid, Keyboard::new(), Mouse::new(8, 8, 1.0))
    }

    fn row_text(grid: &Grid, y: usize, from: usize, len: usize) -> String {
        grid.row(y).unwrap()[from..from + len]
            .iter()
            .map(|c| char::from_u32(c.glyph).unwrap_or('?'))
            .collect()
    }

    #[test]
    fn test_scene_layers() {
        let (mut demo, mut grid, mut keyboard, mut mouse) = setup(40, 20);
        assert!(demo.update(&mut keyboard, &mut mouse, &mut grid).unwrap());

        let (px, py) = demo.player();
        let player = grid.get(px, py).unwrap();
        assert_eq!(player.glyph, '@' as Glyph);
        assert_eq!(player.foreground, Color::YELLOW);

        assert_eq!(row_text(&grid, 0, 1, BANNER.len()), BANNER);
        assert_eq!(grid.get(1, 0).unwrap().background, Color::BLUE);
        assert_eq!(grid.get(0, 5).unwrap().glyph, '#' as Glyph);
        assert_eq!(grid.get(2, 2).unwrap().glyph, '.' as Glyph);
    }

    #[test]
    fn test_panel_blitted_bottom_right() {
        let (mut demo, mut grid, mut keyboard, mut mouse) = setup(40, 20);
        demo.update(&mut keyboard, &mut mouse, &mut grid).unwrap();

        let (x0, y0) = (40 - PANEL_WIDTH - 1, 20 - PANEL_HEIGHT - 1);
        assert_eq!(grid.row(y0).unwrap()[x0].background, Color::BLUE);
        assert_eq!(row_text(&grid, y0 + 1, x0 + 1, 10), "Arrow keys");
    }

    #[test]
    fn test_arrow_keys_move_player() {
        let (mut demo, mut grid, mut keyboard, mut mouse) = setup(40, 20);
        let start = demo.player();
        keyboard.push(KeyPress::new(Key::Right));
        demo.update(&mut keyboard, &mut mouse, &mut grid).unwrap();
        keyboard.push(KeyPress::new(Key::Keypad2));
        demo.update(&mut keyboard, &mut mouse, &mut grid).unwrap();
        assert_eq!(demo.player(), (start.0 + 1, start.1 + 1));
    }

    #[test]
    fn test_player_stays_inside_walls() {
        let (mut demo, mut grid, mut keyboard, mut mouse) = setup(6, 5);
        for _ in 0..10 {
            keyboard.push(KeyPress::new(Key::Up));
            demo.update(&mut keyboard, &mut mouse, &mut grid).unwrap();
        }
        assert_eq!(demo.player().1, 1);
    }

    #[test]
    fn test_escape_stops() {
        let (mut demo, mut grid, mut keyboard, mut mouse) = setup(40, 20);
        keyboard.push(KeyPress::new(Key::Escape));
        assert!(!demo.update(&mut keyboard, &mut mouse, &mut grid).unwrap());
    }

    #[test]
    fn test_hover_and_click() {
        let (mut demo, mut grid, mut keyboard, mut mouse) = setup(40, 20);
        mouse.on_move(2.0 * 8.0 + 1.0, 3.0 * 8.0 + 1.0);
        mouse.on_press(MouseButton::Left);
        mouse.on_release(MouseButton::Left);
        demo.update(&mut keyboard, &mut mouse, &mut grid).unwrap();

        let cell = grid.get(2, 3).unwrap();
        assert!(CGA[8..].contains(&cell.background));
        assert_eq!(demo.inspected().map(|c| c.glyph), Some('.' as Glyph));
    }

    #[test]
    fn test_script_ends_with_escape() {
        let script = script((8, 8));
        assert!(script.windows(2).all(|w| w[0].0 <= w[1].0));
        assert!(matches!(
            script.last(),
            Some((_, ScriptedInput::Key(press))) if press.key == Key::Escape
        ));
    }
}
