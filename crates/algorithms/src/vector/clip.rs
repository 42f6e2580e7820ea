//! Clipping of line work by a rectangular extent
//!
//! Study areas are axis-aligned rectangles, so roads are clipped with
//! Cohen-Sutherland segment clipping, which is exact for this case. No
//! boolean overlay needed.

use geo_types::{Coord, LineString, MultiLineString, Rect};

/// Cohen-Sutherland region codes
const INSIDE: u8 = 0b0000;
const LEFT: u8 = 0b0001;
const RIGHT: u8 = 0b0010;
const BOTTOM: u8 = 0b0100;
const TOP: u8 = 0b1000;

fn outcode(p: Coord<f64>, rect: &Rect<f64>) -> u8 {
    let mut code = INSIDE;
    if p.x < rect.min().x { code |= LEFT; }
    if p.x > rect.max().x { code |= RIGHT; }
    if p.y < rect.min().y { code |= BOTTOM; }
    if p.y > rect.max().y { code |= TOP; }
    code
}

fn clip_segment(
    mut p0: Coord<f64>,
    mut p1: Coord<f64>,
    rect: &Rect<f64>,
) -> Option<(Coord<f64>, Coord<f64>)> {
    let mut code0 = outcode(p0, rect);
    let mut code1 = outcode(p1, rect);

    loop {
        if (code0 | code1) == 0 {
            return Some((p0, p1)); // Both inside
        }
        if (code0 & code1) != 0 {
            return None; // Both outside same region
        }

        let code_out = if code0 != 0 { code0 } else { code1 };
        let dx = p1.x - p0.x;
        let dy = p1.y - p0.y;

        let new_point = if code_out & TOP != 0 {
            let t = (rect.max().y - p0.y) / dy;
            Coord { x: p0.x + t * dx, y: rect.max().y }
        } else if code_out & BOTTOM != 0 {
            let t = (rect.min().y - p0.y) / dy;
            Coord { x: p0.x + t * dx, y: rect.min().y }
        } else if code_out & RIGHT != 0 {
            let t = (rect.max().x - p0.x) / dx;
            Coord { x: rect.max().x, y: p0.y + t * dy }
        } else {
            let t = (rect.min().x - p0.x) / dx;
            Coord { x: rect.min().x, y: p0.y + t * dy }
        };

        if code_out == code0 {
            p0 = new_point;
            code0 = outcode(p0, rect);
        } else {
            p1 = new_point;
            code1 = outcode(p1, rect);
        }
    }
}

/// Clip every line of `lines` to the rectangle.
///
/// A line that leaves and re-enters the rectangle is split into separate
/// parts; the result holds only the pieces inside `rect`. Returns an empty
/// geometry when nothing falls inside.
pub fn clip_lines_by_rect(lines: &MultiLineString<f64>, rect: Rect<f64>) -> MultiLineString<f64> {
    let mut parts: Vec<LineString<f64>> = Vec::new();

    for line in &lines.0 {
        let mut current: Vec<Coord<f64>> = Vec::new();

        for window in line.0.windows(2) {
            match clip_segment(window[0], window[1], &rect) {
                Some((c0, c1)) => {
                    if c0 == c1 {
                        continue; // Grazing contact, zero length
                    }
                    if current.last() == Some(&c0) {
                        current.push(c1);
                    } else {
                        // Continuity broke at the rect edge: start a new part
                        if current.len() >= 2 {
                            parts.push(LineString::new(std::mem::take(&mut current)));
                        }
                        current.clear();
                        current.push(c0);
                        current.push(c1);
                    }
                }
                None => {
                    if current.len() >= 2 {
                        parts.push(LineString::new(std::mem::take(&mut current)));
                    }
                    current.clear();
                }
            }
        }

        if current.len() >= 2 {
            parts.push(LineString::new(current));
        }
    }

    MultiLineString::new(parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::line_measures::LengthMeasurable;
    use geo::Euclidean;

    fn unit_rect() -> Rect<f64> {
        Rect::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 10.0, y: 10.0 })
    }

    fn lines(coords: Vec<Vec<(f64, f64)>>) -> MultiLineString<f64> {
        MultiLineString::new(coords.into_iter().map(LineString::from).collect())
    }

    #[test]
    fn test_clip_line_crossing() {
        let result = clip_lines_by_rect(&lines(vec![vec![(-5.0, 5.0), (15.0, 5.0)]]), unit_rect());

        assert_eq!(result.0.len(), 1);
        let part = &result.0[0];
        assert!((part.0[0].x - 0.0).abs() < 1e-10);
        assert!((part.0.last().unwrap().x - 10.0).abs() < 1e-10);
    }

    #[test]
    fn test_clip_line_fully_inside() {
        let input = lines(vec![vec![(2.0, 2.0), (8.0, 8.0)]]);
        let result = clip_lines_by_rect(&input, unit_rect());

        assert_eq!(result.0.len(), 1);
        let got: f64 = result.0.iter().map(|ls| ls.length(&Euclidean)).sum();
        let want: f64 = input.0.iter().map(|ls| ls.length(&Euclidean)).sum();
        assert!((got - want).abs() < 1e-10);
    }

    #[test]
    fn test_clip_line_fully_outside() {
        let result =
            clip_lines_by_rect(&lines(vec![vec![(20.0, 20.0), (30.0, 30.0)]]), unit_rect());
        assert!(result.0.is_empty());
    }

    #[test]
    fn test_clip_line_leave_and_reenter_splits() {
        // Enters on the left, exits through the top, re-enters and exits right
        let result = clip_lines_by_rect(
            &lines(vec![vec![
                (-5.0, 5.0),
                (3.0, 5.0),
                (3.0, 15.0),
                (7.0, 15.0),
                (7.0, 5.0),
                (15.0, 5.0),
            ]]),
            unit_rect(),
        );

        assert_eq!(result.0.len(), 2, "pieces outside must split the line");
        for part in &result.0 {
            for c in &part.0 {
                assert!(c.x >= -1e-10 && c.x <= 10.0 + 1e-10);
                assert!(c.y >= -1e-10 && c.y <= 10.0 + 1e-10);
            }
        }
    }

    #[test]
    fn test_clip_multiple_lines() {
        let result = clip_lines_by_rect(
            &lines(vec![
                vec![(-5.0, 2.0), (15.0, 2.0)],
                vec![(20.0, 20.0), (30.0, 30.0)],
                vec![(5.0, -5.0), (5.0, 15.0)],
            ]),
            unit_rect(),
        );
        assert_eq!(result.0.len(), 2);
    }
}
