use geo::{BoundingRect, Coord, LineString, Rect};

use crate::config::*;

/// The extent of a set of geometries, in the coordinates of the geometries.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn rect(&self) -> Rect<f64> {
        Rect::new(
            Coord {
                x: self.min_x,
                y: self.min_y,
            },
            Coord {
                x: self.max_x,
                y: self.max_y,
            },
        )
    }

    /// The middle of the box, used to center the map.
    pub fn center(&self) -> Coordinate {
        self.rect().center().x_y()
    }
}

impl From<Rect<f64>> for BoundingBox {
    fn from(rect: Rect<f64>) -> BoundingBox {
        BoundingBox {
            min_x: rect.min().x,
            min_y: rect.min().y,
            max_x: rect.max().x,
            max_y: rect.max().y,
        }
    }
}

fn ring_bounds(ring: &[Coordinate]) -> Option<Rect<f64>> {
    let line: LineString<f64> = ring
        .iter()
        .filter(|c| c.0.is_finite() && c.1.is_finite())
        .map(|c| Coord { x: c.0, y: c.1 })
        .collect();
    line.bounding_rect()
}

/// The smallest box containing every coordinate of every ring.
///
/// Non-finite coordinates are ignored. Returns None if there is no
/// coordinate left.
pub fn bounding_box(geometries: &[NeighborhoodGeometry]) -> Option<BoundingBox> {
    geometries
        .iter()
        .flat_map(|g| g.rings.iter())
        .filter_map(|ring| ring_bounds(ring))
        .reduce(|a, b| {
            Rect::new(
                Coord {
                    x: a.min().x.min(b.min().x),
                    y: a.min().y.min(b.min().y),
                },
                Coord {
                    x: a.max().x.max(b.max().x),
                    y: a.max().y.max(b.max().y),
                },
            )
        })
        .map(BoundingBox::from)
}
