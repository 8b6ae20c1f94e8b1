//! SVG rendering of a route snapshot.

use super::{Renderer, RouteSnapshot};

/// Draws stops as red dots, the itinerary as a dashed blue polyline, and
/// labels the start and end stops.
///
/// # Examples
///
/// ```
/// use u_delivery::render::{Renderer, RouteSnapshot, SvgRenderer};
///
/// let snap = RouteSnapshot::new(vec![(0.0, 0.0), (3.0, 4.0)], vec![0, 1], 10.0);
/// let svg = SvgRenderer::default().render(snap);
/// assert!(svg.starts_with("<svg"));
/// assert!(svg.contains("START"));
/// assert!(svg.contains("END"));
/// ```
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    size: f64,
    margin: f64,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self {
            size: 700.0,
            margin: 20.0,
        }
    }
}

impl SvgRenderer {
    /// Creates a renderer producing a square image `size` pixels wide.
    pub fn new(size: f64) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    // y grows downward in SVG
    fn project(&self, (x, y): (f64, f64), bound: f64) -> (f64, f64) {
        let scale = if bound > 0.0 {
            (self.size - 2.0 * self.margin) / bound
        } else {
            0.0
        };
        (
            self.margin + x * scale,
            self.size - self.margin - y * scale,
        )
    }

    fn label(&self, out: &mut String, text: &str, at: (f64, f64), bound: f64) {
        let (px, py) = self.project(at, bound);
        out.push_str(&format!(
            "  <text x=\"{:.2}\" y=\"{:.2}\" font-weight=\"bold\">{}</text>\n",
            px + 6.0,
            py + 4.0,
            text
        ));
    }
}

impl Renderer for SvgRenderer {
    type Output = String;

    fn render(&mut self, snapshot: RouteSnapshot) -> String {
        let bound = snapshot.bound();
        let mut out = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{0}\" height=\"{0}\" viewBox=\"0 0 {0} {0}\">\n",
            self.size
        );
        out.push_str(&format!(
            "  <text x=\"{:.2}\" y=\"{:.2}\">Delivery Stops</text>\n",
            self.margin,
            self.margin - 6.0
        ));

        for &p in snapshot.coordinates() {
            let (px, py) = self.project(p, bound);
            out.push_str(&format!(
                "  <circle cx=\"{px:.2}\" cy=\"{py:.2}\" r=\"5\" fill=\"red\"/>\n"
            ));
        }

        let itinerary = snapshot.itinerary();
        if itinerary.len() > 1 {
            let points: Vec<String> = itinerary
                .iter()
                .map(|&p| {
                    let (px, py) = self.project(p, bound);
                    format!("{px:.2},{py:.2}")
                })
                .collect();
            out.push_str(&format!(
                "  <polyline points=\"{}\" fill=\"none\" stroke=\"blue\" stroke-width=\"1\" stroke-dasharray=\"4 3\"/>\n",
                points.join(" ")
            ));
        }

        if let Some(start) = snapshot.start() {
            self.label(&mut out, "START", start, bound);
        }
        if let Some(end) = snapshot.end() {
            self.label(&mut out, "END", end, bound);
        }

        out.push_str("</svg>\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_circle_per_stop() {
        let snap = RouteSnapshot::new(vec![(1.0, 1.0), (2.0, 2.0), (3.0, 3.0)], vec![2], 10.0);
        let svg = SvgRenderer::default().render(snap);
        assert_eq!(svg.matches("<circle").count(), 3);
        assert!(!svg.contains("<polyline"));
        assert!(svg.contains("START"));
        assert!(!svg.contains("END"));
    }

    #[test]
    fn test_itinerary_polyline() {
        let snap = RouteSnapshot::new(vec![(0.0, 0.0), (10.0, 10.0)], vec![0, 1], 10.0);
        let svg = SvgRenderer::new(100.0).render(snap);
        // margin 20 and size 100 map (0,0) to (20,80) and (10,10) to (80,20)
        assert!(svg.contains("points=\"20.00,80.00 80.00,20.00\""));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_empty_snapshot() {
        let svg = SvgRenderer::default().render(RouteSnapshot::new(vec![], vec![], 10.0));
        assert_eq!(svg.matches("<circle").count(), 0);
        assert!(!svg.contains("START"));
    }
}
