//! Frame painting.
//!
//! Walks the layout plan and writes styled text into the frame buffer.
//! The plan already carries final positions and clipped text; this layer
//! only adds color and defends against the terminal shrinking between
//! plan and draw, in which case a write silently clips or no-ops instead
//! of failing the frame.

use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Modifier;

use crate::view::{BarWidget, LayoutPlan, TextRole, TextWidget, Widget, bar_fill, fill_role};

use super::style::Palette;

/// Paints one frame. The caller's `Terminal::draw` performs the single
/// flush per tick.
pub fn render(frame: &mut Frame, plan: &LayoutPlan, palette: &Palette) {
    let area = frame.area();
    let buf = frame.buffer_mut();
    for widget in &plan.widgets {
        match widget {
            Widget::Text(text) => draw_text(buf, area, text, palette),
            Widget::Bar(bar) => draw_bar(buf, area, bar, palette),
        }
    }
}

fn draw_text(buf: &mut Buffer, area: Rect, text: &TextWidget, palette: &Palette) {
    if text.y >= area.height || text.x >= area.width {
        return;
    }
    let mut style = palette.style(text.role);
    if text.bold {
        style = style.add_modifier(Modifier::BOLD);
    }
    let max_width = usize::from(area.width - text.x);
    buf.set_stringn(text.x, text.y, &text.text, max_width, style);
}

fn draw_bar(buf: &mut Buffer, area: Rect, bar: &BarWidget, palette: &Palette) {
    if bar.y >= area.height || bar.x >= area.width {
        return;
    }
    let width = bar.width.min(area.width - bar.x);
    let (filled, empty) = bar_fill(width, bar.percent);

    if filled > 0 {
        buf.set_stringn(
            bar.x,
            bar.y,
            &"█".repeat(usize::from(filled)),
            usize::from(filled),
            palette.style(fill_role(bar.percent)),
        );
    }
    if empty > 0 {
        buf.set_stringn(
            bar.x + filled,
            bar.y,
            &"░".repeat(usize::from(empty)),
            usize::from(empty),
            palette.style(TextRole::BarEmpty),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    fn buffer(width: u16, height: u16) -> Buffer {
        Buffer::empty(Rect::new(0, 0, width, height))
    }

    fn row_string(buf: &Buffer, y: u16, width: u16) -> String {
        (0..width).map(|x| buf[(x, y)].symbol().to_string()).collect()
    }

    #[test]
    fn text_lands_at_planned_position() {
        let mut buf = buffer(20, 4);
        let area = buf.area;
        let widget = TextWidget {
            x: 2,
            y: 1,
            text: "hello".to_string(),
            role: TextRole::Value,
            bold: false,
        };
        draw_text(&mut buf, area, &widget, &Palette::default());
        assert_eq!(row_string(&buf, 1, 20).trim_end(), "  hello");
    }

    #[test]
    fn out_of_bounds_text_is_a_no_op() {
        let mut buf = buffer(10, 3);
        let area = buf.area;
        // Planned against a taller/wider terminal that has since shrunk.
        let widget = TextWidget {
            x: 15,
            y: 1,
            text: "x".to_string(),
            role: TextRole::Value,
            bold: false,
        };
        draw_text(&mut buf, area, &widget, &Palette::default());
        let below = TextWidget { x: 0, y: 9, ..widget };
        draw_text(&mut buf, area, &below, &Palette::default());
        assert_eq!(buf, buffer(10, 3));
    }

    #[test]
    fn text_clips_at_shrunken_right_edge() {
        let mut buf = buffer(8, 2);
        let area = buf.area;
        let widget = TextWidget {
            x: 4,
            y: 0,
            text: "overflowing".to_string(),
            role: TextRole::Value,
            bold: false,
        };
        draw_text(&mut buf, area, &widget, &Palette::default());
        assert_eq!(row_string(&buf, 0, 8), "    over");
    }

    #[test]
    fn bar_splits_into_filled_and_empty_cells() {
        let mut buf = buffer(30, 2);
        let area = buf.area;
        let bar = BarWidget {
            x: 0,
            y: 0,
            width: 20,
            percent: 50.0,
        };
        draw_bar(&mut buf, area, &bar, &Palette::default());
        let row = row_string(&buf, 0, 30);
        assert!(row.starts_with(&"█".repeat(10)));
        assert_eq!(&row[..], format!("{}{}          ", "█".repeat(10), "░".repeat(10)));
    }

    #[test]
    fn bar_tier_colors_follow_percent() {
        let palette = Palette::default();
        for (percent, expected) in [(50.0, Color::Green), (75.0, Color::Yellow), (95.0, Color::Red)]
        {
            let mut buf = buffer(20, 1);
            let area = buf.area;
            let bar = BarWidget {
                x: 0,
                y: 0,
                width: 10,
                percent,
            };
            draw_bar(&mut buf, area, &bar, &palette);
            assert_eq!(buf[(0, 0)].style().fg, Some(expected), "percent={}", percent);
        }
    }

    #[test]
    fn bar_clamps_to_shrunken_area() {
        let mut buf = buffer(10, 1);
        let area = buf.area;
        let bar = BarWidget {
            x: 4,
            y: 0,
            width: 40,
            percent: 100.0,
        };
        draw_bar(&mut buf, area, &bar, &Palette::default());
        assert_eq!(row_string(&buf, 0, 10), format!("    {}", "█".repeat(6)));
    }
}
