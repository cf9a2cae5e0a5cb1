use image::GrayImage;
use imageproc::contours::{BorderType, find_contours};
use imageproc::point::Point;

use crate::models::GeometricProperties;

/// Trace the outer boundaries of foreground blobs.
///
/// Only top-level outer borders are kept; holes and anything nested inside
/// another blob are ignored, so one symbol yields one contour no matter how
/// its interior thresholded.
pub fn external_contours(binary: &GrayImage) -> Vec<Vec<Point<i32>>> {
    find_contours::<i32>(binary)
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
        .map(|c| c.points)
        .collect()
}

/// Enclosed area of a closed point chain via the shoelace formula.
pub fn contour_area(points: &[Point<i32>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut doubled: i64 = 0;
    for (i, p) in points.iter().enumerate() {
        let q = points[(i + 1) % points.len()];
        doubled += p.x as i64 * q.y as i64 - q.x as i64 * p.y as i64;
    }
    (doubled.abs() as f64) / 2.0
}

/// Perimeter of a closed point chain.
pub fn contour_perimeter(points: &[Point<i32>]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }
    let mut length = 0.0;
    for (i, p) in points.iter().enumerate() {
        let q = points[(i + 1) % points.len()];
        let dx = (q.x - p.x) as f64;
        let dy = (q.y - p.y) as f64;
        length += (dx * dx + dy * dy).sqrt();
    }
    length
}

/// Tight axis-aligned bounding box as (x, y, width, height).
pub fn bounding_box(points: &[Point<i32>]) -> (i32, i32, u32, u32) {
    let Some(first) = points.first() else {
        return (0, 0, 0, 0);
    };
    let (mut min_x, mut min_y) = (first.x, first.y);
    let (mut max_x, mut max_y) = (first.x, first.y);
    for p in &points[1..] {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    (
        min_x,
        min_y,
        (max_x - min_x + 1) as u32,
        (max_y - min_y + 1) as u32,
    )
}

/// Convex hull via Andrew's monotone chain.
pub fn convex_hull(points: &[Point<i32>]) -> Vec<Point<i32>> {
    let mut sorted: Vec<Point<i32>> = points.to_vec();
    sorted.sort_by(|a, b| a.x.cmp(&b.x).then(a.y.cmp(&b.y)));
    sorted.dedup();
    if sorted.len() < 3 {
        return sorted;
    }

    fn cross(o: Point<i32>, a: Point<i32>, b: Point<i32>) -> i64 {
        (a.x - o.x) as i64 * (b.y - o.y) as i64 - (a.y - o.y) as i64 * (b.x - o.x) as i64
    }

    let mut hull: Vec<Point<i32>> = Vec::with_capacity(sorted.len() * 2);
    for &p in &sorted {
        while hull.len() >= 2 && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0 {
            hull.pop();
        }
        hull.push(p);
    }
    let lower_len = hull.len() + 1;
    for &p in sorted.iter().rev() {
        while hull.len() >= lower_len && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0 {
            hull.pop();
        }
        hull.push(p);
    }
    hull.pop();
    hull
}

/// Polygon moments up to first order, computed with Green's formula.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContourMoments {
    pub m00: f64,
    pub m10: f64,
    pub m01: f64,
}

pub fn contour_moments(points: &[Point<i32>]) -> ContourMoments {
    if points.len() < 3 {
        return ContourMoments {
            m00: 0.0,
            m10: 0.0,
            m01: 0.0,
        };
    }
    let mut a2 = 0i64;
    let mut cx6 = 0i64;
    let mut cy6 = 0i64;
    for (i, p) in points.iter().enumerate() {
        let q = points[(i + 1) % points.len()];
        let cross = p.x as i64 * q.y as i64 - q.x as i64 * p.y as i64;
        a2 += cross;
        cx6 += (p.x as i64 + q.x as i64) * cross;
        cy6 += (p.y as i64 + q.y as i64) * cross;
    }
    ContourMoments {
        m00: a2 as f64 / 2.0,
        m10: cx6 as f64 / 6.0,
        m01: cy6 as f64 / 6.0,
    }
}

/// Centroid from moments, truncated toward zero. Degenerate contours with
/// zero signed area fall back to the bounding box center.
pub fn centroid(points: &[Point<i32>]) -> (i64, i64) {
    let moments = contour_moments(points);
    if moments.m00 != 0.0 {
        (
            (moments.m10 / moments.m00) as i64,
            (moments.m01 / moments.m00) as i64,
        )
    } else {
        let (x, y, width, height) = bounding_box(points);
        (x as i64 + width as i64 / 2, y as i64 + height as i64 / 2)
    }
}

/// Assemble the shape descriptors used by the validity filter and the
/// classifier. Every ratio guards its denominator so degenerate contours
/// produce zeros instead of NaNs.
pub fn geometric_properties(points: &[Point<i32>], area: f64) -> GeometricProperties {
    let perimeter = contour_perimeter(points);
    let (_, _, width, height) = bounding_box(points);

    let aspect_ratio = if height > 0 {
        width as f64 / height as f64
    } else {
        0.0
    };

    let rect_area = (width as u64 * height as u64) as f64;
    let extent = if rect_area > 0.0 { area / rect_area } else { 0.0 };

    let hull_area = contour_area(&convex_hull(points));
    let solidity = if hull_area > 0.0 { area / hull_area } else { 0.0 };

    let equiv_diameter = (4.0 * area / std::f64::consts::PI).sqrt();

    let circularity = if perimeter > 0.0 {
        4.0 * std::f64::consts::PI * area / (perimeter * perimeter)
    } else {
        0.0
    };

    GeometricProperties {
        area,
        perimeter,
        aspect_ratio,
        extent,
        solidity,
        equiv_diameter,
        circularity,
        width,
        height,
    }
}
