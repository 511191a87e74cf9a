use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Span;
use ratatui::widgets::Widget;

use crate::curve;
use crate::frame::{Layer, MorphFrame};
use crate::oklch::Oklch;

const LEGIBILITY_THRESHOLD: f32 = 0.15;

/// Stand-in for a glyph lost to blur.
const SMEAR: &str = "░";

/// Draws a [`MorphFrame`] as two overlapping, centered text layers.
///
/// Opacity dims each glyph toward black, blur swaps a share of its glyphs for
/// a smear. Where both layers cover a cell the brighter one wins.
pub struct MorphText<'a> {
    frame: &'a MorphFrame,
    style: Style,
    blur_scale: f32,
}

impl<'a> MorphText<'a> {
    pub fn new(frame: &'a MorphFrame) -> Self {
        Self {
            frame,
            style: Style::new().fg(Color::White),
            blur_scale: 8.0,
        }
    }

    /// Base style; its foreground is the fully opaque text color.
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Should match the engine's `blur_scale` so the smear tracks progress.
    pub fn blur_scale(mut self, blur_scale: f32) -> Self {
        self.blur_scale = blur_scale;
        self
    }
}

#[derive(Clone, Copy)]
struct Glyph<'s> {
    symbol: &'s str,
    intensity: f32,
}

impl Widget for MorphText<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }

        let outgoing_span = Span::raw(&*self.frame.outgoing.text);
        let incoming_span = Span::raw(&*self.frame.incoming.text);

        let outgoing = place(&outgoing_span, &self.frame.outgoing, area.width, self.blur_scale);
        let incoming = place(&incoming_span, &self.frame.incoming, area.width, self.blur_scale);

        let base = self.style.fg.unwrap_or(Color::Reset);
        let y = area.y + area.height / 2;

        for (col, cells) in outgoing.iter().zip(&incoming).enumerate() {
            let glyph = match cells {
                (Some(a), Some(b)) if b.intensity > a.intensity => b,
                (Some(a), _) => a,
                (None, Some(b)) => b,
                (None, None) => continue,
            };

            let Some(fg) = fade(base, glyph.intensity) else {
                continue;
            };

            let target = &mut buf[(area.x + col as u16, y)];
            target.set_symbol(glyph.symbol);
            target.set_style(self.style.fg(fg));
        }
    }
}

/// Lay a layer out centered across `width` columns, one slot per column.
fn place<'s>(span: &'s Span<'s>, layer: &Layer, width: u16, blur_scale: f32) -> Vec<Option<Glyph<'s>>> {
    let mut cells = vec![None; usize::from(width)];

    let text_width = u16::try_from(span.width()).unwrap_or(u16::MAX);
    let mut col = width.saturating_sub(text_width) / 2;

    let intensity = layer.opacity / 100.0;
    let smear = curve::dissolve(layer.blur, blur_scale);

    for (i, grapheme) in span.styled_graphemes(Style::default()).enumerate() {
        let glyph_width = u16::try_from(Span::raw(grapheme.symbol).width()).unwrap_or(u16::MAX);

        if glyph_width == 0 {
            continue;
        }

        if col.saturating_add(glyph_width) > width {
            break;
        }

        if !grapheme.symbol.trim().is_empty() {
            cells[usize::from(col)] = Some(if scatter(i) < smear {
                Glyph {
                    symbol: SMEAR,
                    intensity: intensity * 0.5,
                }
            } else {
                Glyph {
                    symbol: grapheme.symbol,
                    intensity,
                }
            });
        }

        col += glyph_width;
    }

    cells
}

/// Stable pseudo-random value in `[0, 1)` per glyph position, so the same
/// glyphs smear first on every frame instead of flickering.
fn scatter(index: usize) -> f32 {
    let hashed = (index as u32).wrapping_add(1).wrapping_mul(2_654_435_761);
    (hashed >> 16) as f32 / 65_536.0
}

/// `None` when the dimmed glyph would be too dark to read.
fn fade(color: Color, intensity: f32) -> Option<Color> {
    match Oklch::from_color(color) {
        Some(lch) if lch.l * intensity >= LEGIBILITY_THRESHOLD => {
            Some(lch.faded(intensity).to_color())
        }
        Some(_) => None,
        None if intensity >= 0.5 => Some(color),
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::frame::Phase;

    use super::*;

    fn layer(text: &str, opacity: f32, blur: f32) -> Layer {
        Layer {
            text: Arc::from(text),
            opacity,
            blur,
        }
    }

    fn draw(frame: &MorphFrame, width: u16) -> Buffer {
        let area = Rect::new(0, 0, width, 1);
        let mut buf = Buffer::empty(area);
        MorphText::new(frame).render(area, &mut buf);
        buf
    }

    fn row(buf: &Buffer) -> String {
        (0..buf.area.width).map(|x| buf[(x, 0)].symbol()).collect()
    }

    #[test]
    fn cooldown_shows_only_outgoing_centered() {
        let frame = MorphFrame {
            phase: Phase::Cooldown,
            fraction: 0.0,
            outgoing: layer("Plan", 100.0, 0.0),
            incoming: layer("Track", 0.0, 100.0),
        };
        let buf = draw(&frame, 10);

        assert_eq!(row(&buf), "   Plan   ");
        assert_eq!(buf[(3, 0)].fg, Color::Rgb(255, 255, 255));
    }

    #[test]
    fn finished_morph_shows_incoming() {
        let frame = MorphFrame {
            phase: Phase::Morph,
            fraction: 1.0,
            outgoing: layer("Plan", 0.0, 100.0),
            incoming: layer("Grow", 100.0, 0.0),
        };

        assert_eq!(row(&draw(&frame, 6)), " Grow ");
    }

    #[test]
    fn midway_glyphs_are_dimmed() {
        let frame = MorphFrame {
            phase: Phase::Morph,
            fraction: 0.5,
            outgoing: layer("aaaaaaaa", 75.8, 8.0),
            incoming: layer("bbbbbbbb", 75.8, 8.0),
        };
        let buf = draw(&frame, 8);

        for x in 0..8 {
            let cell = &buf[(x, 0)];

            match cell.fg {
                Color::Rgb(r, g, b) => assert!(r < 255 && g < 255 && b < 255),
                Color::Reset => assert_eq!(cell.symbol(), " "),
                other => panic!("unexpected color {other:?}"),
            }
        }
    }

    fn midpoint(text: &str) -> MorphFrame {
        MorphFrame {
            phase: Phase::Morph,
            fraction: 0.5,
            outgoing: layer(text, 75.8, 8.0),
            incoming: layer(text, 75.8, 8.0),
        }
    }

    #[test]
    fn blurred_glyphs_smear() {
        let row = row(&draw(&midpoint("aaaaaaaaaaaaaaaa"), 16));

        assert!(row.contains(SMEAR), "no smear in {row:?}");
        assert!(row.contains('a'), "everything smeared in {row:?}");
    }

    #[test]
    fn sharp_layer_never_smears() {
        let frame = MorphFrame {
            phase: Phase::Cooldown,
            fraction: 0.0,
            outgoing: layer("aaaaaaaaaaaaaaaa", 100.0, 0.0),
            incoming: layer("bbbbbbbbbbbbbbbb", 0.0, 100.0),
        };

        assert_eq!(row(&draw(&frame, 16)), "aaaaaaaaaaaaaaaa");
    }

    #[test]
    fn smear_pattern_is_stable_across_renders() {
        let frame = midpoint("aaaaaaaaaaaaaaaa");

        assert_eq!(row(&draw(&frame, 16)), row(&draw(&frame, 16)));
    }

    #[test]
    fn transparent_layers_draw_nothing() {
        let frame = MorphFrame {
            phase: Phase::Morph,
            fraction: 0.0,
            outgoing: layer("gone", 5.0, 100.0),
            incoming: layer("soon", 0.0, 100.0),
        };

        assert_eq!(row(&draw(&frame, 6)), "      ");
    }

    #[test]
    fn text_wider_than_area_is_cut() {
        let frame = MorphFrame {
            phase: Phase::Cooldown,
            fraction: 0.0,
            outgoing: layer("Onboarding", 100.0, 0.0),
            incoming: layer("Payroll", 0.0, 100.0),
        };

        assert_eq!(row(&draw(&frame, 4)), "Onbo");
    }
}
