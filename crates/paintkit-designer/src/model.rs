//! Shape model.
//!
//! A [`Shape`] is one user-drawn object. Its [`ShapeKind`] decides how many
//! control points it gathers, how the pointer builds it, and how it renders.

use std::fmt;
use std::str::FromStr;

use paintkit_core::{Algorithm, Color, Point};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How the pointer builds a shape of a given kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolFamily {
    /// Press, drag to append samples, release to finish.
    Continuous,
    /// Press for the first point, drag the second, release to finish.
    Drag,
    /// One point per click; finishes on the given click count.
    FixedClick(usize),
    /// One point per click; finishes only on double-click.
    OpenClick,
}

/// Kind of a user-drawn shape.
///
/// Serialized with the tool names the paint front end uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    #[serde(rename = "freehand")]
    Freehand,
    #[serde(rename = "line")]
    Line,
    #[serde(rename = "circle")]
    Circle,
    #[serde(rename = "ellipse")]
    Ellipse,
    #[serde(rename = "rectangle")]
    Rectangle,
    #[serde(rename = "triangle")]
    Triangle,
    #[serde(rename = "polygon")]
    Polygon,
    #[serde(rename = "curve", alias = "quadratic-bezier")]
    QuadraticBezier,
    #[serde(rename = "bezier", alias = "bezier-open")]
    BezierOpen,
    #[serde(rename = "bezier-closed")]
    BezierClosed,
    #[serde(rename = "erase-free", alias = "erase-freehand")]
    EraseFreehand,
    #[serde(rename = "erase-area")]
    EraseArea,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 12] = [
        ShapeKind::Freehand,
        ShapeKind::Line,
        ShapeKind::Circle,
        ShapeKind::Ellipse,
        ShapeKind::Rectangle,
        ShapeKind::Triangle,
        ShapeKind::Polygon,
        ShapeKind::QuadraticBezier,
        ShapeKind::BezierOpen,
        ShapeKind::BezierClosed,
        ShapeKind::EraseFreehand,
        ShapeKind::EraseArea,
    ];

    pub fn tool_family(&self) -> ToolFamily {
        match self {
            Self::Freehand | Self::EraseFreehand => ToolFamily::Continuous,
            Self::Line | Self::Circle | Self::Ellipse | Self::Rectangle | Self::EraseArea => {
                ToolFamily::Drag
            }
            Self::Triangle | Self::QuadraticBezier => ToolFamily::FixedClick(3),
            Self::BezierOpen | Self::BezierClosed => ToolFamily::FixedClick(4),
            Self::Polygon => ToolFamily::OpenClick,
        }
    }

    /// Fewest points a finished shape of this kind can have.
    pub fn min_points(&self) -> usize {
        match self.tool_family() {
            ToolFamily::Continuous => 1,
            ToolFamily::Drag => 2,
            ToolFamily::FixedClick(n) => n,
            ToolFamily::OpenClick => 2,
        }
    }

    /// Point count at which the shape finishes on its own, if any.
    pub fn target_points(&self) -> Option<usize> {
        match self.tool_family() {
            ToolFamily::FixedClick(n) => Some(n),
            _ => None,
        }
    }

    /// Whether the outline returns to its first point once finished.
    pub fn is_closed_kind(&self) -> bool {
        matches!(
            self,
            Self::Rectangle | Self::Triangle | Self::Polygon | Self::BezierClosed
        )
    }

    pub fn is_erase(&self) -> bool {
        matches!(self, Self::EraseFreehand | Self::EraseArea)
    }

    /// Tool name, as used in scene files and server requests.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Freehand => "freehand",
            Self::Line => "line",
            Self::Circle => "circle",
            Self::Ellipse => "ellipse",
            Self::Rectangle => "rectangle",
            Self::Triangle => "triangle",
            Self::Polygon => "polygon",
            Self::QuadraticBezier => "curve",
            Self::BezierOpen => "bezier",
            Self::BezierClosed => "bezier-closed",
            Self::EraseFreehand => "erase-free",
            Self::EraseArea => "erase-area",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShapeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        match s.as_str() {
            "quadratic-bezier" => return Ok(Self::QuadraticBezier),
            "bezier-open" => return Ok(Self::BezierOpen),
            "erase-freehand" => return Ok(Self::EraseFreehand),
            _ => {}
        }
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| format!("unknown tool '{}'", s))
    }
}

/// One user-drawn object.
///
/// `points` is never empty and only grows while the shape is incomplete,
/// apart from drag tools replacing their second point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub id: Uuid,
    pub kind: ShapeKind,
    pub points: Vec<Point>,
    pub color: Color,
    pub stroke_width: f64,
    pub algorithm: Algorithm,
    #[serde(default)]
    pub completed: bool,
}

impl Shape {
    pub fn new(
        kind: ShapeKind,
        first: Point,
        color: Color,
        stroke_width: f64,
        algorithm: Algorithm,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            points: vec![first],
            color,
            stroke_width,
            algorithm,
            completed: false,
        }
    }

    /// Appends a control point or sample.
    pub fn push_point(&mut self, p: Point) {
        self.points.push(p);
    }

    /// Replaces the trailing point, or appends it when only the first exists.
    pub fn set_last_point(&mut self, p: Point) {
        if self.points.len() > 1 {
            if let Some(last) = self.points.last_mut() {
                *last = p;
            }
        } else {
            self.points.push(p);
        }
    }

    pub fn can_finalize(&self) -> bool {
        self.points.len() >= self.kind.min_points()
    }

    /// Whether a fixed-count shape has gathered all of its points.
    pub fn has_all_points(&self) -> bool {
        self.kind
            .target_points()
            .is_some_and(|n| self.points.len() >= n)
    }

    /// Marks the shape complete. Returns `false` when it lacks points.
    pub fn finalize(&mut self) -> bool {
        if self.can_finalize() {
            self.completed = true;
        }
        self.completed
    }

    /// Axis-aligned bounds of the control points as (min, max).
    pub fn bounds(&self) -> Option<(Point, Point)> {
        let first = self.points.first()?;
        let init = (*first, *first);
        Some(self.points.iter().fold(init, |(lo, hi), p| {
            (
                Point::new(lo.x.min(p.x), lo.y.min(p.y)),
                Point::new(hi.x.max(p.x), hi.y.max(p.y)),
            )
        }))
    }
}
