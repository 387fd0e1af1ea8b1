#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Colours used by every screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub primary: Rgb,
    pub secondary: Rgb,
    pub accent: Rgb,
    pub success: Rgb,
    pub error: Rgb,
    pub text: Rgb,
    pub light_bg: Rgb,
    pub dark_bg: Rgb,
    pub disabled: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: Rgb(41, 128, 185),
            secondary: Rgb(52, 152, 219),
            accent: Rgb(230, 126, 34),
            success: Rgb(46, 204, 113),
            error: Rgb(231, 76, 60),
            text: Rgb(255, 255, 255),
            light_bg: Rgb(240, 240, 245),
            dark_bg: Rgb(30, 40, 60),
            disabled: Rgb(150, 150, 160),
        }
    }
}
