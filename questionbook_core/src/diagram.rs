//! Inline SVG diagrams for geometry items
//!
//! Pure functions of the shape dimensions: no assets, no I/O. The caller embeds
//! the returned data URI into the question or a row image.

const STROKE: &str = "#334155";
const FILL: &str = "#eff6ff";
const FONT: &str = "font-family=\"sans-serif\"";

/// Shape outlines with the dimensions to label, all in centimetres unless noted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Circle { radius: i64 },
    Rectangle { length: i64, width: i64 },
    Square { side: i64 },
    RightTriangle { base: i64, height: i64, hypotenuse: i64 },
    Parallelogram { base: i64, side: i64, height: i64 },
    /// Flag pole held by a thread; the ground distance is the unknown `d`
    FlagPole,
}

/// Render the SVG markup for `shape`
pub fn render_svg(shape: Shape) -> String {
    match shape {
        Shape::Circle { radius } => svg(
            160,
            160,
            format!(
                "<circle cx=\"80\" cy=\"80\" r=\"60\" stroke=\"{s}\" stroke-width=\"2\" fill=\"{f}\" />\
                 <line x1=\"80\" y1=\"80\" x2=\"140\" y2=\"80\" stroke=\"{s}\" stroke-width=\"2\" />\
                 {label}",
                s = STROKE,
                f = FILL,
                label = text(110, 72, "middle", &format!("{} cm", radius)),
            ),
        ),
        Shape::Rectangle { length, width } => svg(
            250,
            200,
            format!(
                "<rect x=\"45\" y=\"50\" width=\"180\" height=\"100\" stroke=\"{s}\" stroke-width=\"2\" fill=\"{f}\" />{top}{side}",
                s = STROKE,
                f = FILL,
                top = text(135, 40, "middle", &format!("{} cm", length)),
                side = text(40, 105, "end", &format!("{} cm", width)),
            ),
        ),
        Shape::Square { side } => svg(
            200,
            200,
            format!(
                "<rect x=\"50\" y=\"50\" width=\"100\" height=\"100\" stroke=\"{s}\" stroke-width=\"2\" fill=\"{f}\" />{top}{left}",
                s = STROKE,
                f = FILL,
                top = text(100, 40, "middle", &format!("{} cm", side)),
                left = text(45, 105, "end", &format!("{} cm", side)),
            ),
        ),
        Shape::RightTriangle { base, height, hypotenuse } => svg(
            140,
            100,
            format!(
                "<polygon points=\"40,75 40,20 110,75\" stroke=\"{s}\" stroke-width=\"2\" fill=\"{f}\" />{h}{b}{c}",
                s = STROKE,
                f = FILL,
                h = text(35, 50, "end", &format!("{} cm", height)),
                b = text(75, 92, "middle", &format!("{} cm", base)),
                c = text(80, 42, "start", &format!("{} cm", hypotenuse)),
            ),
        ),
        Shape::Parallelogram { base, side, height } => svg(
            120,
            100,
            format!(
                "<polygon points=\"20,75 40,20 100,20 80,75\" stroke=\"{s}\" stroke-width=\"2\" fill=\"{f}\" />\
                 <line x1=\"40\" y1=\"20\" x2=\"40\" y2=\"75\" stroke=\"{s}\" stroke-width=\"1\" stroke-dasharray=\"4\" />\
                 <rect x=\"40\" y=\"65\" width=\"10\" height=\"10\" fill=\"none\" stroke=\"{s}\" stroke-width=\"1\" />\
                 {b}{h}{d}",
                s = STROKE,
                f = FILL,
                b = text(50, 92, "middle", &format!("{} cm", base)),
                h = text(35, 50, "end", &format!("{} cm", height)),
                d = text(95, 50, "start", &format!("{} cm", side)),
            ),
        ),
        Shape::FlagPole => svg(
            200,
            160,
            format!(
                "<line x1=\"10\" y1=\"150\" x2=\"190\" y2=\"150\" stroke=\"#94a3b8\" stroke-width=\"2\" />\
                 <path d=\"M 40 150 L 160 150 L 160 30 Z\" fill=\"#fef08a\" opacity=\"0.5\" />\
                 <path d=\"M 40 150 L 160 150 L 160 30 Z\" fill=\"none\" stroke=\"{s}\" stroke-width=\"2\" />\
                 <line x1=\"40\" y1=\"140\" x2=\"160\" y2=\"140\" stroke=\"{s}\" stroke-width=\"1\" />\
                 {pole}{thread}{d}",
                s = STROKE,
                pole = text(168, 90, "start", "Pole"),
                thread = text(90, 85, "middle", "Thread"),
                d = text(100, 135, "middle", "d"),
            ),
        ),
    }
}

/// `data:image/svg+xml` URI with the markup percent-encoded
pub fn to_data_uri(svg: &str) -> String {
    format!("data:image/svg+xml;charset=utf-8,{}", urlencoding::encode(svg))
}

/// Diagram for `shape` as a data URI
pub fn render_diagram(shape: Shape) -> String {
    to_data_uri(&render_svg(shape))
}

/// Centered `<img>` tag for appending to question text
pub fn embed_image(data_uri: &str, alt: &str) -> String {
    format!(
        "<div style=\"display:flex; justify-content:center; margin: 15px 0;\"><img src=\"{}\" alt=\"{}\" style=\"max-height: 200px;\" /></div>",
        data_uri, alt
    )
}

fn svg(width: u32, height: u32, body: String) -> String {
    format!(
        "<svg width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" xmlns=\"http://www.w3.org/2000/svg\">{body}</svg>",
        w = width,
        h = height,
        body = body
    )
}

fn text(x: u32, y: u32, anchor: &str, content: &str) -> String {
    format!(
        "<text x=\"{}\" y=\"{}\" text-anchor=\"{}\" {} font-size=\"14\" fill=\"{}\">{}</text>",
        x, y, anchor, FONT, STROKE, content
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_carry_the_dimensions() {
        let svg = render_svg(Shape::Rectangle { length: 12, width: 5 });
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains(">12 cm<"));
        assert!(svg.contains(">5 cm<"));

        let svg = render_svg(Shape::RightTriangle { base: 3, height: 4, hypotenuse: 5 });
        for label in [">3 cm<", ">4 cm<", ">5 cm<"] {
            assert!(svg.contains(label), "missing {}", label);
        }
    }

    #[test]
    fn data_uri_is_deterministic_and_escaped() {
        let a = render_diagram(Shape::Circle { radius: 14 });
        let b = render_diagram(Shape::Circle { radius: 14 });
        assert_eq!(a, b);
        assert!(a.starts_with("data:image/svg+xml;charset=utf-8,%3Csvg"));
        assert!(!a.contains('<') && !a.contains('"') && !a.contains(' '));
    }

    #[test]
    fn frame_sets_matching_viewbox() {
        let frame = svg(200, 150, "<g/>".to_string());
        assert_eq!(
            frame,
            "<svg width=\"200\" height=\"150\" viewBox=\"0 0 200 150\" xmlns=\"http://www.w3.org/2000/svg\"><g/></svg>"
        );
    }

    #[test]
    fn embeds_as_image_tag() {
        let html = embed_image("data:image/svg+xml;charset=utf-8,x", "Shape");
        assert!(html.contains("<img src=\"data:image/svg+xml;charset=utf-8,x\" alt=\"Shape\""));
    }
}
