use svg::Document;
use svg::node::element::{Group, Rectangle, Text, Title};

use sheetnest::entities::{NestInstance, NestingResult};
use sheetnest::geometry::primitives::Polygon;

use crate::io::svg_util;
use crate::io::svg_util::SvgDrawOptions;

/// Draws the sheet and every placed shape.
/// Layout coordinates are Y-up, the drawing is flipped so the sheet origin ends up in the bottom left corner.
pub fn result_to_svg(
    result: &NestingResult,
    instance: &NestInstance,
    options: SvgDrawOptions,
    title: &str,
) -> Document {
    let sheet = instance.sheet;
    let theme = &options.theme;

    let margin = 0.05 * f64::max(sheet.width(), sheet.height());
    let font_size = f64::min(sheet.width(), sheet.height()) * 0.025;
    let stroke_width = f64::min(sheet.width(), sheet.height()) * 0.001 * theme.stroke_width_multiplier;

    let label = {
        let label_content = format!(
            "bbox: {:.1} x {:.1} | density: {:.3}% | {} | {}",
            result.bounding_width,
            result.bounding_height,
            result.density * 100.0,
            result.strategy.map_or("-".to_string(), |s| s.to_string()),
            title,
        );
        Text::new(label_content)
            .set("x", sheet.x_min)
            .set("y", -sheet.y_max - 0.5 * font_size)
            .set("font-size", font_size)
            .set("font-family", "monospace")
            .set("font-weight", "500")
    };

    let highlight_cd_shape_style = &[
        ("fill", "none"),
        ("stroke-width", &*format!("{}", 0.5 * stroke_width)),
        ("stroke", "black"),
        ("stroke-opacity", "0.3"),
        (
            "stroke-dasharray",
            &*format!("{} {}", 1.0 * stroke_width, 2.0 * stroke_width),
        ),
        ("stroke-linecap", "round"),
        ("stroke-linejoin", "round"),
    ];

    let sheet_group = Group::new()
        .set("id", "sheet")
        .add(svg_util::data_to_path(
            svg_util::polygon_data(&Polygon::from(sheet), true),
            &[
                ("fill", &*format!("{}", theme.sheet_fill)),
                ("stroke", "black"),
                ("stroke-width", &*format!("{}", 2.0 * stroke_width)),
            ],
        ))
        .add(Title::new(format!(
            "sheet, {:.1} x {:.1}, spacing: {:.1}",
            sheet.width(),
            sheet.height(),
            instance.spacing
        )));

    let bbox_outline = Rectangle::new()
        .set("x", 0.0)
        .set("y", 0.0)
        .set("width", result.bounding_width)
        .set("height", result.bounding_height)
        .set("fill", "none")
        .set("stroke", "black")
        .set("stroke-opacity", "0.5")
        .set("stroke-width", stroke_width)
        .set("stroke-dasharray", format!("{}", 5.0 * stroke_width));

    let mut shapes_group = Group::new().set("id", "shapes");
    let mut cd_group = Group::new().set("id", "cd_shapes");
    for placed in &result.placements {
        let closed = instance.shape(placed.key).closed;
        let style = match closed {
            true => [
                ("fill", format!("{}", theme.shape_fill)),
                ("stroke", "black".to_string()),
                ("stroke-width", format!("{stroke_width}")),
                ("fill-opacity", "0.9".to_string()),
            ],
            false => [
                ("fill", "none".to_string()),
                ("stroke", format!("{}", theme.open_contour_stroke)),
                ("stroke-width", format!("{}", 2.0 * stroke_width)),
                ("stroke-linecap", "round".to_string()),
            ],
        };
        let style = style.iter().map(|(k, v)| (*k, v.as_str())).collect::<Vec<_>>();
        let t = placed.d_transf;
        shapes_group = shapes_group.add(
            Group::new()
                .set("id", format!("shape_{}", placed.id))
                .add(svg_util::data_to_path(
                    svg_util::polygon_data(&placed.full, closed),
                    &style,
                ))
                .add(Title::new(format!("shape {}, {}", placed.id, t))),
        );
        if options.draw_cd_shapes {
            cd_group = cd_group.add(svg_util::data_to_path(
                svg_util::polygon_data(&placed.simplified, closed),
                highlight_cd_shape_style,
            ));
        }
    }

    let mut layout_group = Group::new()
        .set("transform", "scale(1,-1)")
        .add(sheet_group)
        .add(shapes_group)
        .add(bbox_outline);
    if options.draw_cd_shapes {
        layout_group = layout_group.add(cd_group);
    }

    let vbox = (
        sheet.x_min - margin,
        -sheet.y_max - margin - font_size,
        sheet.width() + 2.0 * margin,
        sheet.height() + 2.0 * margin + font_size,
    );

    Document::new()
        .set("viewBox", vbox)
        .add(layout_group)
        .add(label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetnest::Nester;
    use sheetnest::io::ext_repr::{ExtShape, NestRequest};
    use sheetnest::util::NestConfig;

    fn square(id: &str, side: f64) -> ExtShape {
        ExtShape {
            id: id.to_string(),
            points: vec![[0.0, 0.0], [side, 0.0], [side, side], [0.0, side]],
            closed: true,
        }
    }

    fn solve(shapes: Vec<ExtShape>) -> (NestingResult, NestInstance) {
        let request = NestRequest {
            shapes,
            sheet_width: 200.0,
            sheet_height: 100.0,
            spacing: 2.0,
            rotation: Default::default(),
        };
        let nester = Nester::new(NestConfig::default());
        let instance = nester.prepare(&request).unwrap();
        let result = nester.solve(&instance).unwrap();
        (result, instance)
    }

    #[test]
    fn every_shape_gets_a_group() {
        let (result, instance) = solve(vec![square("a", 40.0), square("b", 30.0)]);
        let svg = result_to_svg(&result, &instance, SvgDrawOptions::default(), "t").to_string();
        assert!(svg.contains("id=\"shape_a\""));
        assert!(svg.contains("id=\"shape_b\""));
        assert!(svg.contains("id=\"cd_shapes\""));
        assert!(svg.contains("density"));
    }

    #[test]
    fn collision_outlines_are_optional() {
        let (result, instance) = solve(vec![square("a", 40.0)]);
        let options = SvgDrawOptions {
            draw_cd_shapes: false,
            ..SvgDrawOptions::default()
        };
        let svg = result_to_svg(&result, &instance, options, "t").to_string();
        assert!(!svg.contains("cd_shapes"));
    }
}
