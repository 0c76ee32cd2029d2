//! Static level geometry and collision resolution

use crate::body::KinematicBody;
use ember_core::Rect;
use serde::{Deserialize, Serialize};

/// What a static rect is made of
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceKind {
    Ground,
    Platform,
    Hazard,
}

impl SurfaceKind {
    /// Solid surfaces push bodies out; hazards only report contact
    pub fn is_solid(self) -> bool {
        !matches!(self, SurfaceKind::Hazard)
    }
}

/// One piece of level geometry, immutable for the lifetime of a level
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StaticRect {
    pub rect: Rect,
    pub kind: SurfaceKind,
}

impl StaticRect {
    pub fn new(rect: Rect, kind: SurfaceKind) -> Self {
        Self { rect, kind }
    }
}

/// Which face of a static rect a body struck
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactFace {
    Top,
    Bottom,
    Left,
    Right,
}

/// A single body-vs-rect contact from one resolution pass
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Contact {
    /// Index of the rect in the level's ordered sequence
    pub index: usize,
    pub kind: SurfaceKind,
    pub face: ContactFace,
}

/// Outcome of resolving one body against the world for one tick
#[derive(Clone, Debug, Default)]
pub struct CollisionResult {
    /// The body was pushed up out of a solid while moving down
    pub on_ground: bool,
    /// The body was pushed out of a solid horizontally
    pub hit_wall: bool,
    pub contacts: Vec<Contact>,
}

/// The level's ordered set of static rects.
///
/// Built once per level and replaced wholesale on level transition.
/// Resolution walks the rects in level order with last-write-wins
/// semantics: discrete, order-dependent, exactly like the prototypes this
/// engine generalizes. Fast bodies can tunnel through thin geometry in a
/// single tick; level authors keep surfaces thicker than one step of
/// travel.
#[derive(Clone, Debug, Default)]
pub struct CollisionWorld {
    rects: Vec<StaticRect>,
}

impl CollisionWorld {
    pub fn new(rects: Vec<StaticRect>) -> Self {
        Self { rects }
    }

    pub fn rects(&self) -> &[StaticRect] {
        &self.rects
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Broad-phase query: all rects whose bounding box overlaps `area`,
    /// in level order
    pub fn overlapping<'a>(
        &'a self,
        area: Rect,
    ) -> impl Iterator<Item = (usize, &'a StaticRect)> + 'a {
        self.rects
            .iter()
            .enumerate()
            .filter(move |(_, s)| area.intersects(&s.rect))
    }

    /// Push `body` out of every solid rect it penetrates and classify
    /// hazard contacts.
    ///
    /// For each overlapping rect in level order, the correction is the
    /// minimum-translation vector: whichever axis has the smaller
    /// penetration depth. The velocity component on the corrected axis is
    /// zeroed. An upward correction while the body moves down grounds it
    /// for this tick. Hazards never move the body: a top-face hit while
    /// falling is a stomp, anything else a hurt.
    ///
    /// The body's `on_ground` flag is left untouched; callers assign it
    /// from the returned result once per tick. A second call with no
    /// intervening integration finds no penetration and changes nothing.
    pub fn resolve(&self, body: &mut KinematicBody) -> CollisionResult {
        let mut result = CollisionResult::default();

        for (index, surface) in self.rects.iter().enumerate() {
            let aabb = body.aabb();
            if !aabb.intersects(&surface.rect) {
                continue;
            }

            // Penetration depth through each face of the static rect
            let pen_top = aabb.bottom() - surface.rect.y;
            let pen_bottom = surface.rect.bottom() - aabb.y;
            let pen_left = aabb.right() - surface.rect.x;
            let pen_right = surface.rect.right() - aabb.x;
            let pen_x = pen_left.min(pen_right);
            let pen_y = pen_top.min(pen_bottom);

            if !surface.kind.is_solid() {
                // A top overlap without downward motion is not a stomp
                let face = if pen_y <= pen_x && pen_top <= pen_bottom && body.velocity.y > 0.0 {
                    ContactFace::Top
                } else if pen_y <= pen_x && pen_bottom < pen_top {
                    ContactFace::Bottom
                } else if pen_left <= pen_right {
                    ContactFace::Left
                } else {
                    ContactFace::Right
                };
                result.contacts.push(Contact {
                    index,
                    kind: surface.kind,
                    face,
                });
                continue;
            }

            let face = if pen_y <= pen_x {
                if pen_top <= pen_bottom {
                    body.position.y -= pen_top;
                    if body.velocity.y >= 0.0 {
                        result.on_ground = true;
                    }
                    body.velocity.y = 0.0;
                    ContactFace::Top
                } else {
                    body.position.y += pen_bottom;
                    body.velocity.y = 0.0;
                    ContactFace::Bottom
                }
            } else {
                result.hit_wall = true;
                body.velocity.x = 0.0;
                if pen_left <= pen_right {
                    body.position.x -= pen_left;
                    ContactFace::Left
                } else {
                    body.position.x += pen_right;
                    ContactFace::Right
                }
            };
            result.contacts.push(Contact {
                index,
                kind: surface.kind,
                face,
            });
        }

        result
    }
}
