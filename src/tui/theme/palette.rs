use ratatui::prelude::*;

/// Catppuccin Mocha swatches; `Theme` maps them onto roles
pub struct Palette {
    pub text: Color,
    pub subtext: Color,
    pub overlay: Color,
    pub surface: Color,
    pub crust: Color,

    pub blue: Color,
    pub green: Color,
    pub yellow: Color,
    pub red: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            text: Color::Rgb(205, 214, 244),
            subtext: Color::Rgb(186, 194, 222),
            overlay: Color::Rgb(108, 112, 134),
            surface: Color::Rgb(69, 71, 90),
            crust: Color::Rgb(30, 30, 46),

            blue: Color::Rgb(137, 180, 250),
            green: Color::Rgb(166, 227, 161),
            yellow: Color::Rgb(249, 226, 175),
            red: Color::Rgb(243, 139, 168),
        }
    }
}
