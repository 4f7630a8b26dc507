use table_game::core::{Engine, EngineConfig, Screen};
use table_game::term::{AnchorY, GameFrame, GameView, Rgb, Viewport};
use table_game::types::{Color, SpriteOptions};

const RED: Color = Color::new(0xff, 0x10, 0x10);

fn engine() -> Engine {
    let config = EngineConfig::new()
        .with_detail("Score", 100)
        .with_detail("Lives", 3)
        .with_sprite("dot", SpriteOptions::new().at(2, 1).color(RED));
    let mut e = Engine::new(config, Screen::new(5, 3));
    e.start();
    e
}

fn all_text(fb: &table_game::term::FrameBuffer) -> String {
    (0..fb.height()).map(|y| fb.row_text(y)).collect::<Vec<_>>().join("\n")
}

#[test]
fn term_view_renders_border_corners() {
    let e = engine();
    let view = GameView::default().with_anchor_y(AnchorY::Top);

    // 5 cells * 2 columns + border = 12 wide; 3 rows + border = 5 high, one
    // title row above.
    let fb = view.render(&GameFrame::from_engine(&e), Viewport::new(12, 8));
    assert_eq!(fb.get(0, 1).unwrap().ch, '┌');
    assert_eq!(fb.get(11, 1).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 5).unwrap().ch, '└');
    assert_eq!(fb.get(11, 5).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_filled_cell_as_two_columns() {
    let e = engine();
    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let fb = view.render(&GameFrame::from_engine(&e), Viewport::new(12, 8));

    // Inside border origin is (1, 2); cell (2, 1) starts at column 1 + 4.
    let left = fb.get(5, 3).unwrap();
    let right = fb.get(6, 3).unwrap();
    assert_eq!(left.style.bg, Rgb::new(0xff, 0x10, 0x10));
    assert_eq!(right.style.bg, Rgb::new(0xff, 0x10, 0x10));
    assert_eq!(fb.get(3, 3).unwrap().ch, '·');
}

#[test]
fn term_view_shows_details_title_and_hint() {
    let e = engine();
    let view = GameView::default();
    let frame = GameFrame::from_engine(&e).with_title("Ping Pong").with_hint("q quit");
    let text = all_text(&view.render(&frame, Viewport::new(40, 12)));
    assert!(text.contains("Ping Pong"));
    assert!(text.contains("Score: 100  Lives: 3"));
    assert!(text.contains("q quit"));
}

#[test]
fn term_view_hides_details_and_marks_pause() {
    let mut e = engine();
    e.pause();
    let view = GameView::default();
    let text = all_text(&view.render(&GameFrame::from_engine(&e), Viewport::new(40, 12)));
    assert!(text.contains("PAUSED"));
    assert!(!text.contains("Score"));
}

#[test]
fn term_view_cell_at_matches_rendered_cell() {
    let e = engine();
    let view = GameView::default();
    let vp = Viewport::new(40, 12);
    let layout = view.layout(e.width(), e.height(), vp);
    let fb = view.render(&GameFrame::from_engine(&e), vp);

    // Find the red cell on screen and map it back.
    let red = Rgb::new(0xff, 0x10, 0x10);
    let (col, row) = (0..fb.height())
        .flat_map(|y| (0..fb.width()).map(move |x| (x, y)))
        .find(|&(x, y)| fb.get(x, y).unwrap().style.bg == red)
        .unwrap();
    assert_eq!(view.cell_at(e.width(), e.height(), vp, col, row), Some((2, 1)));
    assert_eq!(view.cell_at(e.width(), e.height(), vp, layout.frame_x, row), None);
}
