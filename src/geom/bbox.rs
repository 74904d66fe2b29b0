use geo::{Coord, CoordsIter, MultiPolygon, Point, Rect};

/// Compute the axis-aligned bounding rectangle over every coordinate of every ring,
/// holes included. `None` if the geometry has no coordinates.
pub fn coords_bounds(geometry: &MultiPolygon<f64>) -> Option<Rect<f64>> {
    let mut coords = geometry.coords_iter();
    let first = coords.next()?;
    Some(coords.fold(Rect::new(first, first), |rect, c| Rect::new(
        Coord {
            x: rect.min().x.min(c.x),
            y: rect.min().y.min(c.y),
        },
        Coord {
            x: rect.max().x.max(c.x),
            y: rect.max().y.max(c.y),
        },
    )))
}

/// Representative point of a geometry: the center of its bounding box.
/// Good enough for a line endpoint; not an area-weighted centroid.
#[inline]
pub fn representative_point(geometry: &MultiPolygon<f64>) -> Option<Point<f64>> {
    coords_bounds(geometry).map(|rect| rect.center().into())
}
