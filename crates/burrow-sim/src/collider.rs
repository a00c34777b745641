//! Swept tile collision and movement resolution.
//!
//! Every tick each body integrates its acceleration, then advances through
//! increments of at most half a tile per axis. Each increment tests the
//! tentative rectangle against the terrain cells around it, blocks the axes
//! that ran into something, and carries the rest of the displacement into
//! the next increment. Final positions wrap horizontally and are clamped to
//! the world's floor and ceiling.

use glam::IVec2;
use tracing::{debug, error, trace};

use burrow_core::config::WorldConfig;
use burrow_core::geometry::Rect;
use burrow_core::movable::Movable;
use burrow_core::types::{CollisionInfo, ContactKind, TileKind};
use burrow_terrain::TerrainQuery;

/// Advances bodies through terrain.
#[derive(Debug, Clone)]
pub struct Collider {
    gravity: f64,
    enable_collisions: bool,
}

impl Collider {
    pub fn new(config: &WorldConfig) -> Self {
        Self {
            gravity: config.gravity,
            enable_collisions: config.enable_collisions,
        }
    }

    /// Integrate and move every body, in iteration order.
    ///
    /// The terrain must not change for the duration of the call. Bodies are
    /// independent of each other; the order only matters for determinism.
    pub fn update<'a, T, I>(&self, terrain: &T, bodies: I)
    where
        T: TerrainQuery + ?Sized,
        I: IntoIterator<Item = &'a mut Movable>,
    {
        let frame = Frame::of(terrain);
        let mut candidates = Vec::new();
        for body in bodies {
            body.update_motion(self.gravity);
            self.advance(terrain, &frame, body, &mut candidates);
        }
    }

    fn advance<T: TerrainQuery + ?Sized>(
        &self,
        terrain: &T,
        frame: &Frame,
        body: &mut Movable,
        candidates: &mut Vec<Candidate>,
    ) {
        let collides = self.enable_collisions && body.collides;
        let mut rect = body.rect(frame.world_width);
        let mut remaining = body.velocity_step();

        // Each pass consumes at least one pixel per moving axis or zeroes it.
        while remaining != IVec2::ZERO {
            let d = remaining.clamp(-frame.step, frame.step);
            let mut res = Resolution::open(&rect, d);
            res.clip_to_world(frame.world_height);
            if collides {
                let to = rect.translated(d.x, d.y);
                gather_candidates(terrain, frame, &rect, &to, candidates);
                resolve_increment(&mut res, candidates, &rect, body.collide_platforms);
            }

            let moved = res.motion();
            rect = rect.translated(moved.x, moved.y);
            // Keep x bounded however far the body travels this tick.
            rect.x = rect.wrapped_x();
            remaining = (remaining - d) * res.coeff;
            body.velocity *= res.coeff.as_dvec2();
            if res.coeff.x == 0 {
                body.is_colliding_x = true;
            }
            if res.landed {
                body.is_colliding_down = true;
            }
        }

        // Increments stop at the world edges; this only normalizes bodies
        // that started outside them.
        rect.x = rect.wrapped_x();
        if rect.y <= 0 {
            rect.y = 0;
            body.is_colliding_down = true;
            body.velocity.y = body.velocity.y.max(0.0);
        } else if rect.y > frame.world_height {
            rect.y = frame.world_height;
        }
        body.position = IVec2::new(rect.x, rect.y);
    }
}

/// Terrain geometry, read once per tick.
#[derive(Debug, Clone, Copy)]
struct Frame {
    tile: IVec2,
    world_width: i32,
    world_height: i32,
    /// Largest increment per axis: half a tile, at least one pixel.
    step: IVec2,
}

impl Frame {
    fn of<T: TerrainQuery + ?Sized>(terrain: &T) -> Self {
        let tile = IVec2::new(terrain.tile_width(), terrain.tile_height());
        Self {
            tile,
            world_width: terrain.pixel_width(),
            world_height: terrain.pixel_height(),
            step: (tile / 2).max(IVec2::ONE),
        }
    }

    fn cell_rect(&self, tx: i32, ty: i32) -> Rect {
        Rect::new(
            tx * self.tile.x,
            ty * self.tile.y,
            self.tile.x,
            self.tile.y,
            self.world_width,
        )
    }
}

/// A non-passable cell the increment might run into.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    cell: Rect,
    kind: TileKind,
}

/// Collect the non-passable cells around `to`, one cell of margin on each
/// side. Cells that already overlap `from` are left out.
fn gather_candidates<T: TerrainQuery + ?Sized>(
    terrain: &T,
    frame: &Frame,
    from: &Rect,
    to: &Rect,
    out: &mut Vec<Candidate>,
) {
    out.clear();
    let tile = frame.tile;
    let cols = (to.x.div_euclid(tile.x) - 1)..=((to.right() - 1).div_euclid(tile.x) + 1);
    let rows = (to.y.div_euclid(tile.y) - 1)..=((to.top() - 1).div_euclid(tile.y) + 1);
    for ty in rows {
        for tx in cols.clone() {
            let kind = terrain.classify(tx, ty);
            if kind.is_passable() {
                continue;
            }
            let cell = frame.cell_rect(tx, ty);
            if cell.intersects(from) {
                trace!(tx, ty, ?kind, "cell already penetrated, not resolved");
                continue;
            }
            out.push(Candidate { cell, kind });
        }
    }
}

/// Blocking found for one increment. A zero coefficient blocks its axis and
/// the matching `clamp` component is where the body stops on that axis.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Resolution {
    origin: IVec2,
    step: IVec2,
    coeff: IVec2,
    clamp: IVec2,
    /// A downward contact blocked the y axis.
    landed: bool,
}

impl Resolution {
    fn open(from: &Rect, step: IVec2) -> Self {
        let origin = IVec2::new(from.x, from.y);
        Self {
            origin,
            step,
            coeff: IVec2::ONE,
            clamp: origin,
            landed: false,
        }
    }

    /// The floor at y = 0 blocks like a solid top face and the ceiling at
    /// `world_height` like a solid underside. A body already past an edge
    /// does not move further out.
    fn clip_to_world(&mut self, world_height: i32) {
        let y = self.origin.y + self.step.y;
        if self.step.y < 0 && y < 0 {
            self.block_y(self.origin.y.min(0), true);
        } else if self.step.y > 0 && y > world_height {
            self.block_y(self.origin.y.max(world_height), false);
        }
    }

    /// Displacement left after the blocking found so far.
    fn motion(&self) -> IVec2 {
        IVec2::select(
            self.coeff.cmpeq(IVec2::ZERO),
            self.clamp - self.origin,
            self.step,
        )
    }

    fn apply(&mut self, info: CollisionInfo, kind: TileKind, collide_platforms: bool) {
        match kind {
            TileKind::Passable => {}
            TileKind::Solid => {
                if info.kind.is_horizontal() {
                    self.block_x(info.x);
                }
                if info.kind.is_vertical() || info.kind.is_corner() {
                    self.block_y(info.y, info.kind == ContactKind::Down);
                }
            }
            TileKind::Platform => {
                if info.kind == ContactKind::Down && collide_platforms {
                    self.block_y(info.y, true);
                }
            }
        }
    }

    /// Block x at `x`, keeping an existing clamp if it is nearer the origin.
    fn block_x(&mut self, x: i32) {
        let nearer = (self.clamp.x - self.origin.x).abs() <= (x - self.origin.x).abs();
        if self.coeff.x == 0 && nearer {
            return;
        }
        self.coeff.x = 0;
        self.clamp.x = x;
    }

    fn block_y(&mut self, y: i32, landed: bool) {
        let nearer = (self.clamp.y - self.origin.y).abs() <= (y - self.origin.y).abs();
        if self.coeff.y == 0 && nearer {
            return;
        }
        self.coeff.y = 0;
        self.clamp.y = y;
        self.landed = landed;
    }
}

/// Resolve every candidate cell against the increment in `res`, which may
/// already be clipped by the world edges.
fn resolve_increment(
    res: &mut Resolution,
    candidates: &[Candidate],
    from: &Rect,
    collide_platforms: bool,
) {
    // Cells already lined up with the body on one axis go first. Diagonal
    // cells only ever see the motion those leave.
    let d = res.motion();
    for c in candidates
        .iter()
        .filter(|c| from.intersects_x(&c.cell) != from.intersects_y(&c.cell))
    {
        res.apply(classify_contact(from, d, &c.cell), c.kind, collide_platforms);
    }

    // Clamping one axis changes the swept rectangle, so re-test everything
    // against the surviving motion until nothing moves. Coefficients and
    // clamps only ever tighten, which bounds the loop.
    loop {
        let before = *res;
        let motion = res.motion();
        for c in candidates {
            res.apply(classify_contact(from, motion, &c.cell), c.kind, collide_platforms);
        }
        if *res == before {
            return;
        }
    }
}

/// Classify the contact between a body moving by `d` from `from` and a
/// terrain cell that `from` does not overlap.
///
/// Directions name the body's motion. For `Left`/`Right` the returned `x`
/// is where the body's `x` stops; for `Up`/`Down` the returned `y` is where
/// its `y` stops. A diagonal approach is settled by which face the body
/// crossed last; an exact tie is a corner and fills both.
pub fn classify_contact(from: &Rect, d: IVec2, cell: &Rect) -> CollisionInfo {
    let cell = cell.aligned_to(from);
    let to = from.translated(d.x, d.y);
    if !to.intersects(&cell) {
        return CollisionInfo::none();
    }

    match (from.intersects_x(&cell), from.intersects_y(&cell)) {
        (true, true) => CollisionInfo::none(),
        (true, false) => vertical_contact(from, d, &cell),
        (false, true) => horizontal_contact(from, d, &cell),
        (false, false) => corner_contact(from, &to, d, &cell),
    }
}

fn vertical_contact(from: &Rect, d: IVec2, cell: &Rect) -> CollisionInfo {
    match d.y.signum() {
        1 => CollisionInfo {
            kind: ContactKind::Up,
            x: from.x,
            y: cell.y - from.h,
        },
        -1 => CollisionInfo {
            kind: ContactKind::Down,
            x: from.x,
            y: cell.top(),
        },
        _ => invariant_violation("vertical contact without vertical motion", from, d, cell),
    }
}

fn horizontal_contact(from: &Rect, d: IVec2, cell: &Rect) -> CollisionInfo {
    match d.x.signum() {
        1 => CollisionInfo {
            kind: ContactKind::Right,
            x: cell.x - from.w,
            y: from.y,
        },
        -1 => CollisionInfo {
            kind: ContactKind::Left,
            x: cell.right(),
            y: from.y,
        },
        _ => invariant_violation("horizontal contact without horizontal motion", from, d, cell),
    }
}

fn corner_contact(from: &Rect, to: &Rect, d: IVec2, cell: &Rect) -> CollisionInfo {
    if d.x == 0 || d.y == 0 {
        return invariant_violation("diagonal contact along one axis", from, d, cell);
    }

    // Penetration past each near face at the end of the increment. Scaled
    // by the other axis' speed, the smaller one was crossed later, and the
    // face crossed last is the one actually hit.
    let pen_x = if d.x > 0 {
        to.right() - cell.x
    } else {
        cell.right() - to.x
    };
    let pen_y = if d.y > 0 {
        to.top() - cell.y
    } else {
        cell.top() - to.y
    };
    let tx = i64::from(pen_x) * i64::from(d.y.abs());
    let ty = i64::from(pen_y) * i64::from(d.x.abs());

    match tx.cmp(&ty) {
        std::cmp::Ordering::Less => horizontal_contact(from, d, cell),
        std::cmp::Ordering::Greater => vertical_contact(from, d, cell),
        std::cmp::Ordering::Equal => {
            let kind = if d.x > 0 {
                ContactKind::RightCorner
            } else {
                ContactKind::LeftCorner
            };
            let info = CollisionInfo {
                kind,
                x: horizontal_contact(from, d, cell).x,
                y: vertical_contact(from, d, cell).y,
            };
            debug!(
                ?kind,
                x = info.x,
                y = info.y,
                cell_x = cell.x,
                cell_y = cell.y,
                "exact corner contact"
            );
            info
        }
    }
}

/// Fatal in debug builds. In release the contact is dropped.
fn invariant_violation(reason: &str, from: &Rect, d: IVec2, cell: &Rect) -> CollisionInfo {
    error!(
        reason,
        body_x = from.x,
        body_y = from.y,
        dx = d.x,
        dy = d.y,
        cell_x = cell.x,
        cell_y = cell.y,
        "contact classification invariant violated"
    );
    debug_assert!(false, "{reason}: body {from:?} step {d} cell {cell:?}");
    CollisionInfo::none()
}
