//! Colors shared by the dashboard panels.

use plotters::style::RGBColor;

pub const SKY_BLUE: RGBColor = RGBColor(135, 206, 235);
pub const STEEL_BLUE: RGBColor = RGBColor(31, 119, 180);
pub const LIGHT_CORAL: RGBColor = RGBColor(240, 128, 128);
pub const GOLD: RGBColor = RGBColor(255, 215, 0);
pub const LIGHT_GREEN: RGBColor = RGBColor(144, 238, 144);
pub const PLUM: RGBColor = RGBColor(221, 160, 221);
pub const MEDIAN_ORANGE: RGBColor = RGBColor(255, 127, 14);
pub const NO_VALUE_GRAY: RGBColor = RGBColor(200, 200, 200);

const COOL: (f64, f64, f64) = (59.0, 76.0, 192.0);
const NEUTRAL: (f64, f64, f64) = (221.0, 221.0, 221.0);
const WARM: (f64, f64, f64) = (180.0, 4.0, 38.0);

/// Diverging blue-to-red color for a value in `[-1, 1]`, neutral at 0.
pub fn coolwarm(v: f64) -> RGBColor {
    if v.is_nan() {
        return NO_VALUE_GRAY;
    }
    let v = v.clamp(-1.0, 1.0);
    let (from, to, t) = if v < 0.0 {
        (COOL, NEUTRAL, v + 1.0)
    } else {
        (NEUTRAL, WARM, v)
    };
    let lerp = |a: f64, b: f64| (a + (b - a) * t).round() as u8;
    RGBColor(lerp(from.0, to.0), lerp(from.1, to.1), lerp(from.2, to.2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coolwarm_endpoints() {
        assert_eq!(coolwarm(-1.0), RGBColor(59, 76, 192));
        assert_eq!(coolwarm(0.0), RGBColor(221, 221, 221));
        assert_eq!(coolwarm(1.0), RGBColor(180, 4, 38));
        assert_eq!(coolwarm(5.0), coolwarm(1.0));
        assert_eq!(coolwarm(f64::NAN), NO_VALUE_GRAY);
    }
}
