//! Scanline rasterizers for the supported shapes.
//!
//! Every function here works in texture coordinates and clips against the
//! texture bounds, so shapes may extend past the canvas in any direction.
//! Degenerate shapes (non-positive radius, empty area, fewer than three polygon
//! points) draw nothing or fall back to the simplest shape that makes sense.

use image::Texture;
use math::{Color, Rectangle, Vec2D};

use crate::{Polygon, Source};

/// Clip the inclusive pixel range `[start, end]` to `[0, limit)`
#[inline]
fn clip(start: isize, end: isize, limit: usize) -> Option<(usize, usize)> {
    let start = start.max(0);
    let end = end.min(limit as isize - 1);

    (start <= end).then_some((start as usize, end as usize))
}

#[inline]
fn fill_span(texture: &mut Texture, y: usize, start: isize, end: isize, color: Color) {
    if let Some((start, end)) = clip(start, end, texture.width()) {
        for x in start..=end {
            texture.blend_pixel(x as isize, y as isize, color);
        }
    }
}

/// Fill every pixel that `area` touches, including partially covered ones
pub fn fill_rectangle(texture: &mut Texture, area: Rectangle, source: &Source) {
    let area = area.normalized();
    let top_left = area.top_left();
    let bottom_right = area.bottom_right();

    let Some((first_row, last_row)) = clip(
        top_left.y.floor() as isize,
        bottom_right.y.ceil() as isize - 1,
        texture.height(),
    ) else {
        return;
    };

    let first_column = top_left.x.floor() as isize;
    let last_column = bottom_right.x.ceil() as isize - 1;

    for y in first_row..=last_row {
        let color = source.color_for_row(y as f64, top_left.y, area.height());
        fill_span(texture, y, first_column, last_column, color);
    }
}

/// The horizontal span of a rounded rectangle that is covered in row `y`
fn rounded_rectangle_span(
    y: usize,
    position: Vec2D,
    width: f64,
    height: f64,
    radius: f64,
) -> Option<(isize, isize)> {
    let left = position.x;

    if radius <= 0. {
        return Some((left.ceil() as isize, (left + width - 1.).floor() as isize));
    }

    // Rows are sampled at their center
    let top_limit = position.y + radius;
    let bottom_limit = position.y + height - radius;
    let y = y as f64;

    let dy = if y < top_limit {
        top_limit - (y + 0.5)
    } else if bottom_limit <= y {
        (y + 0.5) - bottom_limit
    } else {
        0.
    };
    let inset = radius - (radius * radius - dy * dy).max(0.).sqrt();

    let start = (left + inset).ceil() as isize;
    let end = (left + width - inset - 1.).floor() as isize;
    (start <= end).then_some((start, end))
}

/// Fill a rectangle whose corners are rounded with the given `radius`
///
/// The rectangle spans `width` by `height` pixels from its top left corner
/// at `position`. Gradients use `height` as given, so that it is not
/// recomputed from the bottom edge.
/// A radius of zero or less produces sharp corners.
pub fn fill_rounded_rectangle(
    texture: &mut Texture,
    position: Vec2D,
    width: f64,
    height: f64,
    radius: f64,
    source: &Source,
) {
    if width <= 0. || height <= 0. {
        return;
    }

    let top = position.y;
    let Some((first_row, last_row)) = clip(
        top.floor() as isize,
        (top + height).ceil() as isize - 1,
        texture.height(),
    ) else {
        return;
    };

    for y in first_row..=last_row {
        let Some((start, end)) = rounded_rectangle_span(y, position, width, height, radius)
        else {
            continue;
        };

        let color = source.color_for_row(y as f64, top, height);
        fill_span(texture, y, start, end, color);
    }
}

/// Visit every pixel in the bounding box of a circle together with the distance
/// (squared) of its center to the center of the circle
fn for_each_pixel_near<F>(texture: &mut Texture, center: Vec2D, radius: f64, mut f: F)
where
    F: FnMut(&mut Texture, usize, usize, f64),
{
    let Some((first_row, last_row)) = clip(
        (center.y - radius).floor() as isize,
        (center.y + radius).ceil() as isize,
        texture.height(),
    ) else {
        return;
    };
    let Some((first_column, last_column)) = clip(
        (center.x - radius).floor() as isize,
        (center.x + radius).ceil() as isize,
        texture.width(),
    ) else {
        return;
    };

    for y in first_row..=last_row {
        let dy = y as f64 + 0.5 - center.y;
        for x in first_column..=last_column {
            let dx = x as f64 + 0.5 - center.x;
            f(texture, x, y, dx * dx + dy * dy);
        }
    }
}

/// Fill every pixel whose center lies within `radius` of `center`
pub fn fill_circle(texture: &mut Texture, center: Vec2D, radius: f64, source: &Source) {
    if radius <= 0. {
        return;
    }

    let top = center.y - radius;
    let radius_squared = radius * radius;

    for_each_pixel_near(texture, center, radius, |texture, x, y, distance_squared| {
        if distance_squared <= radius_squared {
            let color = source.color_for_row(y as f64, top, 2. * radius);
            texture.blend_pixel(x as isize, y as isize, color);
        }
    });
}

/// A soft halo, fully opaque at the center and fading out quadratically
/// towards `radius`
pub fn radial_glow(texture: &mut Texture, center: Vec2D, radius: f64, source: &Source) {
    if radius <= 0. {
        return;
    }

    let top = center.y - radius;
    let inverse_radius = radius.max(1.).recip();

    for_each_pixel_near(texture, center, radius, |texture, x, y, distance_squared| {
        let distance = distance_squared.sqrt();
        if radius < distance {
            return;
        }

        let falloff = 1. - distance * inverse_radius;
        let color = source
            .color_for_row(y as f64, top, 2. * radius)
            .with_alpha_falloff(falloff);
        texture.blend_pixel(x as isize, y as isize, color);
    });
}

/// Fill a polygon using the even-odd rule
///
/// Polygons with less than three points are ignored.
pub fn fill_polygon(texture: &mut Texture, polygon: &Polygon, source: &Source) {
    if polygon.points().len() < 3 {
        return;
    }

    let Some((min_y, max_y)) = polygon.vertical_extent() else {
        return;
    };
    let Some((first_row, last_row)) = clip(
        min_y.floor() as isize,
        max_y.ceil() as isize,
        texture.height(),
    ) else {
        return;
    };

    let mut intersections = Vec::with_capacity(polygon.points().len());
    for y in first_row..=last_row {
        let sample_y = y as f64 + 0.5;

        // Half-open test, so shared vertices count once and horizontal edges never
        intersections.clear();
        intersections.extend(polygon.edges().filter_map(|(from, to)| {
            let crosses = (from.y <= sample_y && sample_y < to.y)
                || (to.y <= sample_y && sample_y < from.y);
            crosses.then(|| {
                let t = (sample_y - from.y) / (to.y - from.y);
                from.x + (to.x - from.x) * t
            })
        }));
        intersections.sort_by(f64::total_cmp);

        let color = source.color_for_row(y as f64, min_y, max_y - min_y);
        for span in intersections.chunks_exact(2) {
            fill_span(
                texture,
                y,
                span[0].ceil() as isize,
                span[1].floor() as isize,
                color,
            );
        }
    }
}
