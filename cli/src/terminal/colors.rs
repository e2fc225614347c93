use colored::Color;

pub const PRIMARY: Color = Color::BrightGreen;
pub const ACCENT: Color = Color::BrightCyan;
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;

pub const IPV4_ADDR: Color = Color::TrueColor {
    r: 120,
    g: 200,
    b: 255,
};
pub const OPEN_PORT: Color = Color::TrueColor {
    r: 255,
    g: 190,
    b: 90,
};
pub const NO_DATA: Color = Color::BrightBlack;
