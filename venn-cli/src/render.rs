//! SVG rendering for circle layouts and their regions.

use std::fmt::{self, Write};

use venn_core::{circle::Circle, region::Region};

/// SVG rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Canvas width in pixels
    pub width: f64,
    /// Canvas height in pixels
    pub height: f64,
    /// Padding around circles (fraction of their bounding box)
    pub padding: f64,
    pub stroke_width: f64,
    pub fill: bool,
    /// Fill opacity (0.0 - 1.0)
    pub fill_opacity: f64,
    /// Label each circle with its id, above its rim
    pub show_labels: bool,
    /// Label each region at its center
    pub show_regions: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            padding: 0.1,
            stroke_width: 2.0,
            fill: true,
            fill_opacity: 0.3,
            show_labels: true,
            show_regions: true,
        }
    }
}

/// One color per set id
const COLORS: &[&str] = &[
    "#e41a1c", // red
    "#377eb8", // blue
    "#4daf4a", // green
    "#984ea3", // purple
];

pub fn render_svg(circles: &[Circle], regions: &[Region], config: &RenderConfig) -> Result<String, fmt::Error> {
    let (min_x, max_x, min_y, max_y) = compute_bounds(circles);

    let width = max_x - min_x;
    let height = max_y - min_y;
    let pad_x = width * config.padding;
    let pad_y = height * config.padding;

    let view_min_x = min_x - pad_x;
    let view_min_y = min_y - pad_y;
    let view_width = width + 2.0 * pad_x;
    let view_height = height + 2.0 * pad_y;
    let font_size = config.stroke_width * 8.0;

    let mut svg = String::new();

    writeln!(
        &mut svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="{} {} {} {}">"#,
        config.width, config.height, view_min_x, view_min_y, view_width, view_height
    )?;
    writeln!(
        &mut svg,
        r#"  <rect x="{}" y="{}" width="{}" height="{}" fill="white"/>"#,
        view_min_x, view_min_y, view_width, view_height
    )?;

    for c in circles {
        let color = COLORS[c.id.idx() % COLORS.len()];
        let fill = if config.fill {
            format!(r#"fill="{}" fill-opacity="{}""#, color, config.fill_opacity)
        } else {
            r#"fill="none""#.to_string()
        };
        writeln!(
            &mut svg,
            r#"  <circle cx="{}" cy="{}" r="{}" {} stroke="{}" stroke-width="{}"/>"#,
            c.c.x, c.c.y, c.r, fill, color, config.stroke_width
        )?;
        if config.show_labels {
            writeln!(
                &mut svg,
                r#"  <text x="{}" y="{}" font-size="{}" text-anchor="middle" fill="{}">{}</text>"#,
                c.c.x, c.c.y - c.r - font_size / 2., font_size, color, c.id
            )?;
        }
    }

    if config.show_regions {
        for region in regions {
            writeln!(
                &mut svg,
                r#"  <text x="{}" y="{}" font-size="{}" text-anchor="middle" dominant-baseline="middle" fill="black">{}</text>"#,
                region.center.x, region.center.y, font_size * 0.75, region.key
            )?;
        }
    }

    writeln!(&mut svg, "</svg>")?;

    Ok(svg)
}

/// Bounding box `(min_x, max_x, min_y, max_y)` of all circles; the unit square around the origin if there are none.
fn compute_bounds(circles: &[Circle]) -> (f64, f64, f64, f64) {
    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for c in circles.iter().filter(|c| c.is_valid()) {
        let (lo, hi) = c.bounds();
        min_x = min_x.min(lo.x);
        max_x = max_x.max(hi.x);
        min_y = min_y.min(lo.y);
        max_y = max_y.max(hi.y);
    }

    if min_x > max_x {
        min_x = -1.0;
        max_x = 1.0;
    }
    if min_y > max_y {
        min_y = -1.0;
        max_y = 1.0;
    }

    (min_x, max_x, min_y, max_y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use venn_core::{circle::circle, config::ExtractConfig, key::SetId, regions};

    #[test]
    fn test_render_circles() {
        let circles = vec![
            circle(SetId::A, 0., 0., 30.),
            circle(SetId::B, 40., 0., 30.),
        ];
        let found = regions::extract(&circles, &ExtractConfig::default());

        let svg = render_svg(&circles, &found, &RenderConfig::default()).unwrap();
        assert!(svg.starts_with("<svg"));
        assert_eq!(svg.matches("<circle").count(), 2);
        assert!(svg.contains(">AB</text>"));
        assert!(svg.trim_end().ends_with("</svg>"));

        let config = RenderConfig { show_regions: false, ..RenderConfig::default() };
        let svg = render_svg(&circles, &found, &config).unwrap();
        assert!(!svg.contains(">AB</text>"));
        assert!(svg.contains(">A</text>"));
    }

    #[test]
    fn test_bounds() {
        let circles = vec![
            circle(SetId::A, 0., 0., 30.),
            circle(SetId::B, 40., 10., 30.),
        ];
        assert_eq!(compute_bounds(&circles), (-30., 70., -30., 40.));
        assert_eq!(compute_bounds(&[]), (-1., 1., -1., 1.));
    }
}
