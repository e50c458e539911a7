//! Vector backend: writes primitives as SVG markup.
//!
//! The gloss highlight is not emitted, so vector faces are flat where the
//! raster ones carry a soft white ellipse.

use std::fmt::Write;

use crate::types::{Appearance, Colour};

use super::geometry::{render_with, Half, Primitive, Surface};

/// Accumulates SVG elements for one document.
pub struct SvgSurface {
    size: u32,
    body: String,
}

impl SvgSurface {
    pub fn new(size: u32) -> Self {
        Self {
            size,
            body: String::new(),
        }
    }
}

impl Surface for SvgSurface {
    type Output = String;

    fn draw(&mut self, primitive: &Primitive) {
        // Writing into a String cannot fail.
        let _ = match *primitive {
            Primitive::Disc { cx, cy, r, fill } => writeln!(
                self.body,
                r#"  <circle cx="{}" cy="{}" r="{}"{} />"#,
                num(cx),
                num(cy),
                num(r),
                fill_attrs(fill)
            ),
            Primitive::Ellipse {
                cx,
                cy,
                rx,
                ry,
                fill,
            } => writeln!(
                self.body,
                r#"  <ellipse cx="{}" cy="{}" rx="{}" ry="{}"{} />"#,
                num(cx),
                num(cy),
                num(rx),
                num(ry),
                fill_attrs(fill)
            ),
            Primitive::Highlight { .. } => Ok(()),
            Primitive::Line {
                x1,
                y1,
                x2,
                y2,
                width,
                stroke,
            } => writeln!(
                self.body,
                r#"  <line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}" />"#,
                num(x1),
                num(y1),
                num(x2),
                num(y2),
                stroke.to_css(),
                num(width)
            ),
            Primitive::HalfEllipse {
                cx,
                cy,
                rx,
                ry,
                half,
                fill,
            } => {
                // Left end of the diameter to the right end; sweep 0 runs
                // through the bottom in SVG's y-down space.
                let sweep = match half {
                    Half::Lower => 0,
                    Half::Upper => 1,
                };
                writeln!(
                    self.body,
                    r#"  <path d="M {} {} A {} {} 0 0 {} {} {} Z"{} />"#,
                    num(cx - rx),
                    num(cy),
                    num(rx),
                    num(ry),
                    sweep,
                    num(cx + rx),
                    num(cy),
                    fill_attrs(fill)
                )
            }
        };
    }

    fn finish(self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{size}\" height=\"{size}\" viewBox=\"0 0 {size} {size}\">\n{}</svg>\n",
            self.body,
            size = self.size
        )
    }
}

/// Render `appearance` as an SVG document.
pub fn render_svg(appearance: &Appearance) -> String {
    render_with(SvgSurface::new(appearance.size()), appearance)
}

fn fill_attrs(colour: Colour) -> String {
    if colour.is_opaque() {
        format!(r#" fill="{}""#, colour.to_css())
    } else {
        format!(
            r#" fill="{}" fill-opacity="{}""#,
            colour.to_css(),
            num(f32::from(colour.a) / 255.0)
        )
    }
}

/// Format a coordinate with at most three decimals and no trailing zeros.
fn num(value: f32) -> String {
    let s = format!("{:.3}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Expression;

    fn svg(expression: Expression, size: u32) -> String {
        let a = Appearance::new(Colour::DEFAULT_YELLOW, expression, size).unwrap();
        render_svg(&a)
    }

    #[test]
    fn test_num_formatting() {
        assert_eq!(num(128.0), "128");
        assert_eq!(num(97.28), "97.28");
        assert_eq!(num(0.1234), "0.123");
        assert_eq!(num(-0.0001), "0");
        assert_eq!(num(10.5), "10.5");
    }

    #[test]
    fn test_document_header() {
        let doc = svg(Expression::Smile, 256);
        assert!(doc.starts_with(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="256" height="256" viewBox="0 0 256 256">"#
        ));
        assert!(doc.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_base_circle() {
        let doc = svg(Expression::Smile, 256);
        assert!(doc.contains(r#"<circle cx="128" cy="128" r="126" fill="rgb(255,205,0)" />"#));
    }

    #[test]
    fn test_smile_arc_from_mouth_box() {
        let doc = svg(Expression::Smile, 100);
        assert!(doc.contains(r#"<path d="M 32 65 A 18 10 0 0 0 68 65 Z" fill="rgb(0,0,0)" />"#));
    }

    #[test]
    fn test_sad_arc_sweeps_over_top() {
        let doc = svg(Expression::Sad, 100);
        assert!(doc.contains("A 18 10 0 0 1 68 65 Z"));
    }

    #[test]
    fn test_winky_swaps_eye_for_line() {
        let doc = svg(Expression::Winky, 100);
        // One open eye, the face, and two strokes (eye + mouth).
        assert_eq!(doc.matches("<circle").count(), 2);
        assert_eq!(doc.matches("<line").count(), 2);
        assert!(doc.contains(r#"<line x1="26" y1="38" x2="38" y2="38" stroke="rgb(0,0,0)" stroke-width="4" />"#));
    }

    #[test]
    fn test_tongue_ellipse() {
        let doc = svg(Expression::Tongue, 100);
        assert!(doc.contains(r#"<ellipse cx="50" cy="67" rx="3" ry="5" fill="rgb(255,105,180)" />"#));
    }

    #[test]
    fn test_highlight_not_emitted() {
        let doc = svg(Expression::Smile, 100);
        assert!(!doc.contains("fill-opacity"));
        assert!(!doc.contains("rgb(255,255,255)"));
    }

    #[test]
    fn test_markup_parses() {
        for expression in Expression::ALL {
            let doc = svg(expression, 128);
            let tree = usvg::Tree::from_str(&doc, &usvg::Options::default()).unwrap();
            assert_eq!(tree.size().width(), 128.0);
            assert_eq!(tree.size().height(), 128.0);
        }
    }
}
