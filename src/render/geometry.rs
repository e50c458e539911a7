//! Face geometry shared by every backend.
//!
//! An [`Appearance`] is lowered to a list of [`Primitive`]s once; the raster
//! and vector backends only know how to draw primitives, so layout
//! constants live here and nowhere else.

use crate::types::{Appearance, Colour, Expression};

/// Stroke width of closed-eye lines.
const EYE_LINE_WIDTH: f32 = 4.0;

/// Stroke width of the neutral mouth.
const MOUTH_LINE_WIDTH: f32 = 6.0;

/// Opacity of the gloss highlight.
const HIGHLIGHT_ALPHA: u8 = 60;

/// Which half of an ellipse a [`Primitive::HalfEllipse`] keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Half {
    /// Below the horizontal diameter (a smile).
    Lower,
    /// Above the horizontal diameter (a frown).
    Upper,
}

/// A drawing operation in canvas pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    /// Filled circle.
    Disc {
        cx: f32,
        cy: f32,
        r: f32,
        fill: Colour,
    },
    /// Filled axis-aligned ellipse.
    Ellipse {
        cx: f32,
        cy: f32,
        rx: f32,
        ry: f32,
        fill: Colour,
    },
    /// Translucent gloss ellipse. The vector backend does not composite it.
    Highlight {
        cx: f32,
        cy: f32,
        rx: f32,
        ry: f32,
        fill: Colour,
    },
    /// Straight stroke with butt caps.
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        width: f32,
        stroke: Colour,
    },
    /// Half of an ellipse, closed along its horizontal diameter.
    HalfEllipse {
        cx: f32,
        cy: f32,
        rx: f32,
        ry: f32,
        half: Half,
        fill: Colour,
    },
}

impl Primitive {
    /// Whether the point lies inside the painted area.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        match *self {
            Primitive::Disc { cx, cy, r, .. } => {
                let (dx, dy) = (x - cx, y - cy);
                dx * dx + dy * dy <= r * r
            }
            Primitive::Ellipse { cx, cy, rx, ry, .. }
            | Primitive::Highlight { cx, cy, rx, ry, .. } => in_ellipse(x, y, cx, cy, rx, ry),
            Primitive::HalfEllipse {
                cx, cy, rx, ry, half, ..
            } => {
                let on_side = match half {
                    Half::Lower => y >= cy,
                    Half::Upper => y <= cy,
                };
                on_side && in_ellipse(x, y, cx, cy, rx, ry)
            }
            Primitive::Line {
                x1,
                y1,
                x2,
                y2,
                width,
                ..
            } => {
                let (dx, dy) = (x2 - x1, y2 - y1);
                let len_sq = dx * dx + dy * dy;
                if len_sq <= f32::EPSILON {
                    return false;
                }
                let (px, py) = (x - x1, y - y1);
                let t = (px * dx + py * dy) / len_sq;
                if !(0.0..=1.0).contains(&t) {
                    return false;
                }
                let cross = px * dy - py * dx;
                cross * cross / len_sq <= (width / 2.0) * (width / 2.0)
            }
        }
    }

    /// Axis-aligned bounds as `(min_x, min_y, max_x, max_y)`.
    pub fn bounds(&self) -> (f32, f32, f32, f32) {
        match *self {
            Primitive::Disc { cx, cy, r, .. } => (cx - r, cy - r, cx + r, cy + r),
            Primitive::Ellipse { cx, cy, rx, ry, .. }
            | Primitive::Highlight { cx, cy, rx, ry, .. } => (cx - rx, cy - ry, cx + rx, cy + ry),
            Primitive::HalfEllipse {
                cx, cy, rx, ry, half, ..
            } => match half {
                Half::Lower => (cx - rx, cy, cx + rx, cy + ry),
                Half::Upper => (cx - rx, cy - ry, cx + rx, cy),
            },
            Primitive::Line {
                x1,
                y1,
                x2,
                y2,
                width,
                ..
            } => {
                let pad = width / 2.0;
                (
                    x1.min(x2) - pad,
                    y1.min(y2) - pad,
                    x1.max(x2) + pad,
                    y1.max(y2) + pad,
                )
            }
        }
    }

    /// The paint colour.
    pub fn colour(&self) -> Colour {
        match *self {
            Primitive::Disc { fill, .. }
            | Primitive::Ellipse { fill, .. }
            | Primitive::Highlight { fill, .. }
            | Primitive::HalfEllipse { fill, .. } => fill,
            Primitive::Line { stroke, .. } => stroke,
        }
    }
}

fn in_ellipse(x: f32, y: f32, cx: f32, cy: f32, rx: f32, ry: f32) -> bool {
    if rx <= 0.0 || ry <= 0.0 {
        return false;
    }
    let (nx, ny) = ((x - cx) / rx, (y - cy) / ry);
    nx * nx + ny * ny <= 1.0
}

/// Layout of a face on a `size` × `size` canvas.
///
/// All positions are fractions of the canvas side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceGeometry {
    size: f32,
}

impl FaceGeometry {
    pub fn new(size: u32) -> Self {
        Self { size: size as f32 }
    }

    fn at(&self, fraction: f32) -> f32 {
        self.size * fraction
    }

    /// Centre of the canvas on both axes.
    pub fn centre(&self) -> f32 {
        self.size / 2.0
    }

    /// Radius of the face, leaving a 2px margin.
    pub fn face_radius(&self) -> f32 {
        (self.size / 2.0 - 2.0).max(0.0)
    }

    /// Vertical position of both eyes.
    pub fn eye_y(&self) -> f32 {
        self.at(0.38)
    }

    /// Horizontal distance of each eye from the centre line.
    pub fn eye_offset(&self) -> f32 {
        self.at(0.18)
    }

    pub fn eye_radius(&self) -> f32 {
        self.at(0.06)
    }

    /// Mouth bounding box as `(left, top, right, bottom)`.
    pub fn mouth_box(&self) -> (f32, f32, f32, f32) {
        (self.at(0.32), self.at(0.55), self.at(0.68), self.at(0.75))
    }

    /// Eye centres, left then right.
    pub fn eye_centres(&self) -> [(f32, f32); 2] {
        let c = self.centre();
        let y = self.eye_y();
        [(c - self.eye_offset(), y), (c + self.eye_offset(), y)]
    }

    /// Face disc, highlight, eyes, and mouth for `appearance`, in paint order.
    pub fn face(appearance: &Appearance) -> Vec<Primitive> {
        Self::paint_list(appearance, false)
    }

    /// The same face with both eyes closed.
    ///
    /// Built from scratch rather than painted over [`FaceGeometry::face`], so
    /// the highlight under the right eye stays intact.
    pub fn blink(appearance: &Appearance) -> Vec<Primitive> {
        Self::paint_list(appearance, true)
    }

    fn paint_list(appearance: &Appearance, blinking: bool) -> Vec<Primitive> {
        let g = Self::new(appearance.size());
        let mut out = Vec::with_capacity(6);

        out.push(Primitive::Disc {
            cx: g.centre(),
            cy: g.centre(),
            r: g.face_radius(),
            fill: appearance.colour.with_alpha(255),
        });
        out.push(g.highlight());

        let [left, right] = g.eye_centres();
        if blinking || appearance.expression == Expression::Winky {
            out.push(g.closed_eye(left));
        } else {
            out.push(g.open_eye(left));
        }
        if blinking {
            out.push(g.closed_eye(right));
        } else {
            out.push(g.open_eye(right));
        }

        g.mouth(appearance.expression, &mut out);
        out
    }

    fn highlight(&self) -> Primitive {
        // Box spanning 58%..90% horizontally and 18%..45% vertically.
        Primitive::Highlight {
            cx: self.at(0.74),
            cy: self.at(0.315),
            rx: self.at(0.16),
            ry: self.at(0.135),
            fill: Colour::WHITE.with_alpha(HIGHLIGHT_ALPHA),
        }
    }

    fn open_eye(&self, (cx, cy): (f32, f32)) -> Primitive {
        Primitive::Disc {
            cx,
            cy,
            r: self.eye_radius(),
            fill: Colour::BLACK,
        }
    }

    fn closed_eye(&self, (cx, cy): (f32, f32)) -> Primitive {
        let r = self.eye_radius();
        Primitive::Line {
            x1: cx - r,
            y1: cy,
            x2: cx + r,
            y2: cy,
            width: EYE_LINE_WIDTH,
            stroke: Colour::BLACK,
        }
    }

    fn mouth(&self, expression: Expression, out: &mut Vec<Primitive>) {
        let (left, top, right, bottom) = self.mouth_box();
        let cx = (left + right) / 2.0;
        let cy = (top + bottom) / 2.0;
        let rx = (right - left) / 2.0;
        let ry = (bottom - top) / 2.0;
        let half_mouth = |half| Primitive::HalfEllipse {
            cx,
            cy,
            rx,
            ry,
            half,
            fill: Colour::BLACK,
        };

        match expression {
            Expression::Smile => out.push(half_mouth(Half::Lower)),
            Expression::Sad => out.push(half_mouth(Half::Upper)),
            Expression::Tongue => {
                out.push(half_mouth(Half::Lower));
                // Box spanning 47%..53% horizontally and 62%..72% vertically.
                out.push(Primitive::Ellipse {
                    cx: self.at(0.5),
                    cy: self.at(0.67),
                    rx: self.at(0.03),
                    ry: self.at(0.05),
                    fill: Colour::HOT_PINK,
                });
            }
            Expression::Neutral | Expression::Winky => out.push(Primitive::Line {
                x1: self.at(0.35),
                y1: self.at(0.65),
                x2: self.at(0.65),
                y2: self.at(0.65),
                width: MOUTH_LINE_WIDTH,
                stroke: Colour::BLACK,
            }),
        }
    }
}

/// A drawing target for primitives.
pub trait Surface {
    type Output;

    fn draw(&mut self, primitive: &Primitive);

    fn finish(self) -> Self::Output;
}

/// Paint every primitive of `appearance` onto `surface`.
pub fn render_with<S: Surface>(mut surface: S, appearance: &Appearance) -> S::Output {
    for primitive in FaceGeometry::face(appearance) {
        surface.draw(&primitive);
    }
    surface.finish()
}
