use colored::Color;

pub const PRIMARY: Color = Color::TrueColor { r: 139, g: 233, b: 253 };
pub const ACCENT: Color = Color::TrueColor { r: 255, g: 184, b: 108 };
pub const SEPARATOR: Color = Color::TrueColor { r: 98, g: 114, b: 164 };
pub const TEXT_DEFAULT: Color = Color::TrueColor { r: 248, g: 248, b: 242 };
pub const IPV4_ADDR: Color = Color::TrueColor { r: 80, g: 250, b: 123 };
pub const IPV4_PREFIX: Color = Color::TrueColor { r: 189, g: 147, b: 249 };
pub const MAC_ADDR: Color = Color::TrueColor { r: 255, g: 121, b: 198 };
pub const EDGE: Color = Color::TrueColor { r: 68, g: 71, b: 90 };
