//! Geometric operands for geo filters.
//!
//! Bodies follow GeoJSON conventions: points are `[lon, lat]` pairs and
//! shapes are `{"type": ..., "coordinates": ...}` objects. Any operand that
//! takes a point also accepts plain JSON (e.g. a `"lat,lon"` string).

use serde_json::{json, Value};

use crate::embodied::{embodied_operand, to_body, Embodied, Operand};

/// A geographic point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    lat: f64,
    lon: f64,
}

impl Point {
    /// Creates a point from latitude and longitude.
    #[must_use]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Returns the latitude.
    #[must_use]
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Returns the longitude.
    #[must_use]
    pub fn lon(&self) -> f64 {
        self.lon
    }
}

impl Embodied for Point {
    fn body(&self) -> Value {
        json!([coordinate(self.lon), coordinate(self.lat)])
    }
}

/// Whole-number coordinates render as JSON integers (`[20,10]`, not
/// `[20.0,10.0]`).
#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
fn coordinate(degrees: f64) -> Value {
    if degrees.fract() == 0.0 && degrees.abs() < 9.0e15 {
        Value::from(degrees as i64)
    } else {
        Value::from(degrees)
    }
}

/// A line through an ordered list of points.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    points: Vec<Value>,
}

impl Line {
    /// Creates a line through `points`.
    pub fn new<P: Into<Operand>>(points: impl IntoIterator<Item = P>) -> Self {
        Self {
            points: points.into_iter().map(to_body).collect(),
        }
    }

    /// Returns the point bodies in order.
    #[must_use]
    pub fn get_points(&self) -> &[Value] {
        &self.points
    }
}

impl Embodied for Line {
    fn body(&self) -> Value {
        json!({ "type": "linestring", "coordinates": self.points })
    }
}

/// A rectangle given by its upper-left and lower-right corners.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingBox {
    upper_left: Value,
    lower_right: Value,
}

impl BoundingBox {
    /// Creates a bounding box from two corners.
    pub fn new(upper_left: impl Into<Operand>, lower_right: impl Into<Operand>) -> Self {
        Self {
            upper_left: to_body(upper_left),
            lower_right: to_body(lower_right),
        }
    }

    /// Returns the corners, upper-left first.
    #[must_use]
    pub fn get_points(&self) -> Vec<Value> {
        vec![self.upper_left.clone(), self.lower_right.clone()]
    }

    /// Returns the upper-left corner.
    #[must_use]
    pub fn upper_left(&self) -> &Value {
        &self.upper_left
    }

    /// Returns the lower-right corner.
    #[must_use]
    pub fn lower_right(&self) -> &Value {
        &self.lower_right
    }
}

impl Embodied for BoundingBox {
    fn body(&self) -> Value {
        json!({
            "type": "envelope",
            "coordinates": [self.upper_left, self.lower_right],
        })
    }
}

/// A circle given by a center and a radius.
///
/// The radius is kept as given, so distance strings such as `"2km"` pass
/// through untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    center: Value,
    radius: Value,
}

impl Circle {
    /// Creates a circle.
    pub fn new(center: impl Into<Operand>, radius: impl Into<Value>) -> Self {
        Self {
            center: to_body(center),
            radius: radius.into(),
        }
    }

    /// Returns the center body.
    #[must_use]
    pub fn get_center(&self) -> &Value {
        &self.center
    }

    /// Returns the radius.
    #[must_use]
    pub fn get_radius(&self) -> &Value {
        &self.radius
    }
}

impl Embodied for Circle {
    fn body(&self) -> Value {
        json!({
            "type": "circle",
            "coordinates": self.center,
            "radius": self.radius,
        })
    }
}

/// A polygon with an outer ring and optional holes.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    rings: Vec<Vec<Value>>,
}

impl Polygon {
    /// Creates a polygon from its outer ring.
    pub fn new<P: Into<Operand>>(points: impl IntoIterator<Item = P>) -> Self {
        Self {
            rings: vec![points.into_iter().map(to_body).collect()],
        }
    }

    /// Adds an inner ring.
    #[must_use]
    pub fn hole<P: Into<Operand>>(mut self, points: impl IntoIterator<Item = P>) -> Self {
        self.rings.push(points.into_iter().map(to_body).collect());
        self
    }

    /// Returns the outer ring.
    #[must_use]
    pub fn get_points(&self) -> &[Value] {
        self.rings.first().map(Vec::as_slice).unwrap_or_default()
    }

    /// Returns the inner rings.
    #[must_use]
    pub fn holes(&self) -> &[Vec<Value>] {
        self.rings.get(1..).unwrap_or_default()
    }
}

impl Embodied for Polygon {
    fn body(&self) -> Value {
        json!({ "type": "polygon", "coordinates": self.rings })
    }
}

/// Any geometry accepted by a shape filter.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// A single point.
    Point(Point),
    /// A line string.
    Line(Line),
    /// An envelope.
    BoundingBox(BoundingBox),
    /// A circle.
    Circle(Circle),
    /// A polygon.
    Polygon(Polygon),
    /// Geometry already in wire form.
    Raw(Value),
}

impl Embodied for Shape {
    fn body(&self) -> Value {
        match self {
            Self::Point(p) => p.body(),
            Self::Line(l) => l.body(),
            Self::BoundingBox(b) => b.body(),
            Self::Circle(c) => c.body(),
            Self::Polygon(p) => p.body(),
            Self::Raw(v) => v.clone(),
        }
    }
}

impl From<Point> for Shape {
    fn from(p: Point) -> Self {
        Self::Point(p)
    }
}

impl From<Line> for Shape {
    fn from(l: Line) -> Self {
        Self::Line(l)
    }
}

impl From<BoundingBox> for Shape {
    fn from(b: BoundingBox) -> Self {
        Self::BoundingBox(b)
    }
}

impl From<Circle> for Shape {
    fn from(c: Circle) -> Self {
        Self::Circle(c)
    }
}

impl From<Polygon> for Shape {
    fn from(p: Polygon) -> Self {
        Self::Polygon(p)
    }
}

impl From<Value> for Shape {
    fn from(v: Value) -> Self {
        Self::Raw(v)
    }
}

embodied_operand!(Point);
embodied_operand!(Line);
embodied_operand!(BoundingBox);
embodied_operand!(Circle);
embodied_operand!(Polygon);
embodied_operand!(Shape);

/// Creates a [`Point`].
#[must_use]
pub fn point(lat: f64, lon: f64) -> Point {
    Point::new(lat, lon)
}

/// Creates a [`Line`].
pub fn line<P: Into<Operand>>(points: impl IntoIterator<Item = P>) -> Line {
    Line::new(points)
}

/// Creates a [`BoundingBox`].
pub fn bounding_box(upper_left: impl Into<Operand>, lower_right: impl Into<Operand>) -> BoundingBox {
    BoundingBox::new(upper_left, lower_right)
}

/// Creates a [`Circle`].
pub fn circle(center: impl Into<Operand>, radius: impl Into<Value>) -> Circle {
    Circle::new(center, radius)
}

/// Creates a [`Polygon`].
pub fn polygon<P: Into<Operand>>(points: impl IntoIterator<Item = P>) -> Polygon {
    Polygon::new(points)
}
