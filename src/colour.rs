/// A colour in straight (non-premultiplied) RGBA, each channel ranging from 0.0 to 1.0
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Colour {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Colour {
    /// Create a new opaque colour. r, g, and b range from 0.0 to 1.0
    pub fn new_rgb(r: f32, g: f32, b: f32) -> Colour {
        Colour { r, g, b, a: 1.0 }
    }

    /// Create a new colour. r, g, b, and a range from 0.0 to 1.0
    pub fn new_rgba(r: f32, g: f32, b: f32, a: f32) -> Colour {
        Colour { r, g, b, a }
    }

    /// Create a new opaque colour. r, g, and b range from 0 to 255
    pub fn new_rgb_bytes(r: u8, g: u8, b: u8) -> Colour {
        Colour::new_rgba_bytes(r, g, b, 255)
    }

    /// Create a new colour. r, g, b, and a range from 0 to 255
    pub fn new_rgba_bytes(r: u8, g: u8, b: u8, a: u8) -> Colour {
        Colour {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Create an opaque grey, g ranges from 0.0 to 1.0
    pub fn new_grey(g: f32) -> Colour {
        Colour::new_rgb(g, g, g)
    }

    /// Create a colour from a packed `0xAARRGGBB` integer
    pub fn from_argb(argb: u32) -> Colour {
        let [a, r, g, b] = argb.to_be_bytes();
        Colour::new_rgba_bytes(r, g, b, a)
    }

    /// Pack the colour into a `0xAARRGGBB` integer
    pub fn to_argb(&self) -> u32 {
        let [r, g, b, a] = self.to_rgba_bytes();
        u32::from_be_bytes([a, r, g, b])
    }

    pub fn to_rgba_bytes(&self) -> [u8; 4] {
        [
            channel_byte(self.r),
            channel_byte(self.g),
            channel_byte(self.b),
            channel_byte(self.a),
        ]
    }

    /// The alpha channel as a byte
    pub fn alpha(&self) -> u8 {
        channel_byte(self.a)
    }

    /// Replace the alpha channel, keeping the colour channels intact
    pub fn with_alpha(self, alpha: u8) -> Colour {
        Colour {
            a: alpha as f32 / 255.0,
            ..self
        }
    }

    pub fn is_transparent(&self) -> bool {
        self.alpha() == 0
    }
}

fn channel_byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl Default for Colour {
    fn default() -> Self {
        colours::TRANSPARENT
    }
}

impl From<Colour> for tiny_skia::Color {
    fn from(c: Colour) -> Self {
        let [r, g, b, a] = c.to_rgba_bytes();
        tiny_skia::Color::from_rgba8(r, g, b, a)
    }
}

impl From<u32> for Colour {
    fn from(argb: u32) -> Self {
        Colour::from_argb(argb)
    }
}

impl From<(u8, u8, u8)> for Colour {
    fn from(c: (u8, u8, u8)) -> Self {
        Colour::new_rgb_bytes(c.0, c.1, c.2)
    }
}

impl From<(u8, u8, u8, u8)> for Colour {
    fn from(c: (u8, u8, u8, u8)) -> Self {
        Colour::new_rgba_bytes(c.0, c.1, c.2, c.3)
    }
}

impl From<[u8; 4]> for Colour {
    fn from(c: [u8; 4]) -> Self {
        let [r, g, b, a] = c;
        Colour::new_rgba_bytes(r, g, b, a)
    }
}

/// A list of pre-defined colour constants
pub mod colours {
    use super::*;

    pub const TRANSPARENT: Colour = Colour {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };
    pub const BLACK: Colour = Colour {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    pub const WHITE: Colour = Colour {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };
    pub const RED: Colour = Colour {
        r: 1.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    pub const GREEN: Colour = Colour {
        r: 0.0,
        g: 1.0,
        b: 0.0,
        a: 1.0,
    };
    pub const BLUE: Colour = Colour {
        r: 0.0,
        g: 0.0,
        b: 1.0,
        a: 1.0,
    };
}
