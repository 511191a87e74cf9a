use ratatui::style::Color;

/// Oklch color: perceptually uniform lightness, chroma, and hue.
///
/// Fading a layer never touches `h`, so a half-transparent phrase keeps its
/// hue instead of drifting toward grey.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oklch {
    pub l: f32,
    pub c: f32,
    pub h: f32,
}

impl Oklch {
    pub fn from_srgb(r: u8, g: u8, b: u8) -> Self {
        let [r, g, b] = [r, g, b].map(|v| to_linear(f32::from(v) / 255.0));

        let l = (0.412_221_46 * r + 0.536_332_55 * g + 0.051_445_995 * b).cbrt();
        let m = (0.211_903_5 * r + 0.680_699_5 * g + 0.107_396_96 * b).cbrt();
        let s = (0.088_302_46 * r + 0.281_718_85 * g + 0.629_978_7 * b).cbrt();

        let lightness = 0.210_454_26 * l + 0.793_617_8 * m - 0.004_072_047 * s;
        let a = 1.977_998_5 * l - 2.428_592_2 * m + 0.450_593_7 * s;
        let b = 0.025_904_037 * l + 0.782_771_77 * m - 0.808_675_77 * s;

        let c = (a * a + b * b).sqrt();
        let h = if c < 1e-8 { 0.0 } else { b.atan2(a) };

        Self { l: lightness, c, h }
    }

    pub fn to_srgb(self) -> (u8, u8, u8) {
        let a = self.c * self.h.cos();
        let b = self.c * self.h.sin();

        let l = self.l + 0.396_337_78 * a + 0.215_803_76 * b;
        let m = self.l - 0.105_561_346 * a - 0.063_854_17 * b;
        let s = self.l - 0.089_484_18 * a - 1.291_485_5 * b;

        let [l, m, s] = [l, m, s].map(|v| v * v * v);

        let r = 4.076_741_7 * l - 3.307_711_6 * m + 0.230_969_94 * s;
        let g = -1.268_438 * l + 2.609_757_4 * m - 0.341_319_38 * s;
        let b = -0.004_196_086_3 * l - 0.703_418_6 * m + 1.707_614_7 * s;

        (to_byte(r), to_byte(g), to_byte(b))
    }

    /// Scale lightness and chroma by `factor` (0.0 = black, 1.0 = unchanged).
    pub fn faded(self, factor: f32) -> Self {
        let factor = factor.clamp(0.0, 1.0);

        Self {
            l: self.l * factor,
            c: self.c * factor,
            h: self.h,
        }
    }

    /// `None` for colors without a concrete RGB value (Reset, Indexed).
    pub fn from_color(color: Color) -> Option<Self> {
        let (r, g, b) = match color {
            Color::Rgb(r, g, b) => (r, g, b),
            Color::Black => (0, 0, 0),
            Color::Red => (128, 0, 0),
            Color::Green => (0, 128, 0),
            Color::Yellow => (128, 128, 0),
            Color::Blue => (0, 0, 128),
            Color::Magenta => (128, 0, 128),
            Color::Cyan => (0, 128, 128),
            Color::Gray => (192, 192, 192),
            Color::DarkGray => (128, 128, 128),
            Color::LightRed => (255, 0, 0),
            Color::LightGreen => (0, 255, 0),
            Color::LightYellow => (255, 255, 0),
            Color::LightBlue => (0, 0, 255),
            Color::LightMagenta => (255, 0, 255),
            Color::LightCyan => (0, 255, 255),
            Color::White => (255, 255, 255),
            Color::Reset | Color::Indexed(_) => return None,
        };

        Some(Self::from_srgb(r, g, b))
    }

    pub fn to_color(self) -> Color {
        let (r, g, b) = self.to_srgb();
        Color::Rgb(r, g, b)
    }
}

fn to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn to_byte(linear: f32) -> u8 {
    let c = linear.clamp(0.0, 1.0);

    let encoded = if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    };

    (encoded * 255.0).round().clamp(0.0, 255.0) as u8
}
