//! Render pass - draws sprites into a [`GridRenderer`].

use crate::screen::GridRenderer;
use crate::types::{Color, Edge, PolygonCell, Rect, Sprite};

/// Draw a rectangle, clipped to the grid.
///
/// Zero width draws a left border line down `height` rows; zero height draws a
/// top border line across `width` columns. Both zero draws nothing.
pub fn fill_rect(grid: &mut dyn GridRenderer, rect: Rect, color: Color) {
    let x_end = rect.x.saturating_add(rect.width).min(grid.width());
    let y_end = rect.y.saturating_add(rect.height).min(grid.height());
    let x_start = rect.x.max(0);
    let y_start = rect.y.max(0);

    if rect.width == 0 {
        for y in y_start..y_end {
            grid.set_cell_border(rect.x, y, Edge::Left, color);
        }
    } else if rect.height == 0 {
        for x in x_start..x_end {
            grid.set_cell_border(x, rect.y, Edge::Top, color);
        }
    } else {
        for y in y_start..y_end {
            for x in x_start..x_end {
                grid.set_cell_color(x, y, color);
            }
        }
    }
}

/// Draw every cell of a polygon; a cell's own colour wins over `color`.
pub fn fill_polygon(grid: &mut dyn GridRenderer, polygon: &[PolygonCell], color: Color) {
    for cell in polygon {
        fill_rect(grid, cell.rect(), cell.color.unwrap_or(color));
    }
}

/// Draw one sprite in its polygon or rectangle form.
pub fn draw_sprite(grid: &mut dyn GridRenderer, sprite: &Sprite) {
    if sprite.has_polygon() {
        fill_polygon(grid, &sprite.polygon, sprite.color);
    } else {
        fill_rect(grid, sprite.rect(), sprite.color);
    }
}

/// Draw sprites in iteration order; later sprites paint over earlier ones.
pub fn draw_sprites<'a>(grid: &mut dyn GridRenderer, sprites: impl IntoIterator<Item = &'a Sprite>) {
    for sprite in sprites {
        draw_sprite(grid, sprite);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::Screen;
    use crate::types::SpriteOptions;

    const A: Color = Color::new(1, 1, 1);
    const B: Color = Color::new(2, 2, 2);

    #[test]
    fn fill_rect_clips_to_grid() {
        let mut s = Screen::new(4, 4);
        fill_rect(&mut s, Rect::new(-1, 2, 3, 5), A);
        assert_eq!(s.filled_count(), 4);
        assert_eq!(s.fill_at(0, 2), Some(A));
        assert_eq!(s.fill_at(1, 3), Some(A));
        assert_eq!(s.fill_at(2, 2), None);
    }

    #[test]
    fn zero_width_draws_left_edge() {
        let mut s = Screen::new(4, 4);
        fill_rect(&mut s, Rect::new(2, 1, 0, 2), A);
        assert_eq!(s.filled_count(), 0);
        assert_eq!(s.get(2, 1).unwrap().border(Edge::Left), Some(A));
        assert_eq!(s.get(2, 2).unwrap().border(Edge::Left), Some(A));
        assert_eq!(s.get(2, 3).unwrap().border(Edge::Left), None);
    }

    #[test]
    fn zero_height_draws_top_edge() {
        let mut s = Screen::new(4, 4);
        fill_rect(&mut s, Rect::new(0, 3, 3, 0), A);
        for x in 0..3 {
            assert_eq!(s.get(x, 3).unwrap().border(Edge::Top), Some(A));
        }
        assert_eq!(s.get(3, 3).unwrap().border(Edge::Top), None);
    }

    #[test]
    fn zero_by_zero_draws_nothing() {
        let mut s = Screen::new(4, 4);
        fill_rect(&mut s, Rect::new(1, 1, 0, 0), A);
        assert!(s.is_blank());
    }

    #[test]
    fn polygon_cell_colour_overrides_sprite_colour() {
        let mut s = Screen::new(4, 1);
        let mut cells = vec![PolygonCell::unit(0, 0), PolygonCell::unit(1, 0)];
        cells[1].color = Some(B);
        let sprite = Sprite::from_options(
            "p",
            SpriteOptions::new().at(3, 0).polygon(cells),
            A,
        );
        draw_sprite(&mut s, &sprite);
        assert_eq!(s.fill_at(0, 0), Some(A));
        assert_eq!(s.fill_at(1, 0), Some(B));
        // The sprite's own rectangle is ignored.
        assert_eq!(s.fill_at(3, 0), None);
    }
}
