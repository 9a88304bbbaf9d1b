use crate::colour::{colours, Colour};
use crate::units::Px;

/// A blurred, offset copy of whatever is drawn with the paint that carries it.
///
/// A radius of zero (or a transparent colour) disables the shadow.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Shadow {
    pub radius: Px,
    pub dx: Px,
    pub dy: Px,
    pub colour: Colour,
}

impl Shadow {
    pub fn new<R: Into<Px>, X: Into<Px>, Y: Into<Px>>(
        radius: R,
        dx: X,
        dy: Y,
        colour: Colour,
    ) -> Shadow {
        Shadow {
            radius: radius.into(),
            dx: dx.into(),
            dy: dy.into(),
            colour,
        }
    }

    /// Whether drawing with this shadow produces anything
    pub fn is_visible(&self) -> bool {
        self.radius.0 > 0.0 && !self.colour.is_transparent()
    }

    /// Gaussian sigma equivalent to the blur radius
    pub(crate) fn sigma(&self) -> f32 {
        self.radius.0 * 0.57735 + 0.5
    }
}

/// The working draw state: fill colour (including alpha), an optional shadow
/// and anti-aliasing.
#[derive(Debug, Clone, PartialEq)]
pub struct Paint {
    pub colour: Colour,
    pub shadow: Option<Shadow>,
    pub anti_alias: bool,
}

impl Default for Paint {
    fn default() -> Self {
        Paint {
            colour: colours::BLACK,
            shadow: None,
            anti_alias: true,
        }
    }
}

impl Paint {
    pub fn new(colour: Colour) -> Paint {
        Paint {
            colour,
            ..Default::default()
        }
    }

    pub fn with_shadow(self, shadow: Shadow) -> Paint {
        Paint {
            shadow: Some(shadow),
            ..self
        }
    }

    /// A copy of this paint drawing in a different colour
    pub fn with_colour(&self, colour: Colour) -> Paint {
        Paint {
            colour,
            ..self.clone()
        }
    }

    /// A copy of this paint with its alpha replaced
    pub fn with_alpha(&self, alpha: u8) -> Paint {
        self.with_colour(self.colour.with_alpha(alpha))
    }

    pub fn set_shadow(&mut self, shadow: Option<Shadow>) {
        self.shadow = shadow;
    }

    pub fn clear_shadow(&mut self) {
        self.shadow = None;
    }

    pub(crate) fn visible_shadow(&self) -> Option<&Shadow> {
        self.shadow.as_ref().filter(|s| s.is_visible())
    }

    pub(crate) fn to_skia(&self) -> tiny_skia::Paint<'static> {
        let mut paint = tiny_skia::Paint::default();
        paint.set_color(self.colour.into());
        paint.anti_alias = self.anti_alias;
        paint
    }
}
