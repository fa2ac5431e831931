//! Primitive mechanism builders.
//!
//! Every builder validates its placement parameters, registers the
//! required bodies and shapes into the world, and hands back the
//! handle a caller needs for further wiring. Static mechanisms are
//! zero-velocity obstacles and never move.

pub mod rope;

use log::debug;

use crate::{
    error::{ensure_positive, Error, Result},
    math::{point::Point, size::Size, FloatNum, TAU},
    world::{BodyDef, BodyHandle, CollisionTag, Geometry, JointDef, Moment, PhysicsWorld, ShapeDef},
};

/// inset of the boundary walls from the viewport edges
pub const WALL_MARGIN: FloatNum = 10.;
/// thickness of the boundary wall boxes
pub const WALL_THICKNESS: FloatNum = 20.;

fn ensure_point(what: &'static str, point: Point) -> Result<Point> {
    if !point.is_finite() {
        return Err(Error::NonFinite { what });
    }
    Ok(point)
}

fn ensure_size(what: &'static str, size: Size) -> Result<Size> {
    if !size.is_valid() {
        return Err(Error::NonPositive {
            what,
            value: size.width().min(size.height()),
        });
    }
    Ok(size)
}

fn ensure_segment(what: &'static str, start: Point, end: Point) -> Result<()> {
    ensure_point(what, start)?;
    ensure_point(what, end)?;
    if start.distance(&end) < FloatNum::EPSILON {
        return Err(Error::DegenerateSegment { what });
    }
    Ok(())
}

fn static_box(
    world: &mut impl PhysicsWorld,
    position: Point,
    size: Size,
    friction: FloatNum,
    elasticity: FloatNum,
) -> BodyHandle {
    let body = world.create_body(BodyDef::fixed(position));
    world.create_shape(
        body,
        ShapeDef::new(Geometry::Box { size })
            .friction(friction)
            .elasticity(elasticity),
    );
    body
}

/// Four static walls enclosing the `viewport` rectangle, each inset
/// [`WALL_MARGIN`] from its edge. No dynamic body can escape the world
/// whatever the scene contains.
pub fn build_boundary(world: &mut impl PhysicsWorld, viewport: Size) -> Result<[BodyHandle; 4]> {
    let viewport = ensure_size("boundary viewport", viewport)?;
    let (width, height): (FloatNum, FloatNum) = viewport.into();

    let walls = [
        (
            Point::new(width / 2., height - WALL_MARGIN),
            Size::new(width, WALL_THICKNESS),
        ),
        (
            Point::new(width / 2., WALL_MARGIN),
            Size::new(width, WALL_THICKNESS),
        ),
        (
            Point::new(WALL_MARGIN, height / 2.),
            Size::new(WALL_THICKNESS, height),
        ),
        (
            Point::new(width - WALL_MARGIN, height / 2.),
            Size::new(WALL_THICKNESS, height),
        ),
    ];

    Ok(walls.map(|(position, size)| static_box(world, position, size, 0.5, 0.4)))
}

/// Dynamic ball with an explicit mass, tagged apart from structural
/// mechanisms so ball contacts can be filtered independently.
pub fn build_ball(
    world: &mut impl PhysicsWorld,
    position: impl Into<Point>,
    radius: FloatNum,
    mass: FloatNum,
) -> Result<BodyHandle> {
    let position = ensure_point("ball position", position.into())?;
    ensure_positive("ball radius", radius)?;
    ensure_positive("ball mass", mass)?;

    let body = world.create_body(BodyDef::dynamic(position, mass));
    world.create_shape(
        body,
        ShapeDef::new(Geometry::Circle { radius })
            .friction(0.4)
            .elasticity(0.9)
            .tag(CollisionTag::BALL),
    );
    Ok(body)
}

/// Static table surface spanning the full `width`, centered on it.
pub fn build_table(
    world: &mut impl PhysicsWorld,
    width: FloatNum,
    surface_y: FloatNum,
    thickness: FloatNum,
) -> Result<BodyHandle> {
    ensure_positive("table width", width)?;
    ensure_positive("table thickness", thickness)?;

    Ok(static_box(
        world,
        Point::new(width / 2., surface_y),
        Size::new(width, thickness),
        0.5,
        0.2,
    ))
}

/// Static ramp segment between two world points.
pub fn build_ramp(
    world: &mut impl PhysicsWorld,
    start: impl Into<Point>,
    end: impl Into<Point>,
    thickness: FloatNum,
) -> Result<BodyHandle> {
    let (start, end) = (start.into(), end.into());
    ensure_segment("ramp", start, end)?;
    ensure_positive("ramp thickness", thickness)?;

    let body = world.create_body(BodyDef::fixed(Point::default()));
    world.create_shape(
        body,
        ShapeDef::new(Geometry::Segment {
            start,
            end,
            thickness,
        })
        .friction(0.7)
        .elasticity(0.2),
    );
    Ok(body)
}

/// Dynamic domino block, tagged apart from balls.
pub fn build_domino(
    world: &mut impl PhysicsWorld,
    position: impl Into<Point>,
    size: Size,
    mass: FloatNum,
    friction: FloatNum,
    elasticity: FloatNum,
) -> Result<BodyHandle> {
    let position = ensure_point("domino position", position.into())?;
    let size = ensure_size("domino size", size)?;
    ensure_positive("domino mass", mass)?;

    let body = world.create_body(
        BodyDef::dynamic(position, mass)
            .moment(Moment::Value(Geometry::Box { size }.moment_of_inertia(mass))),
    );
    world.create_shape(
        body,
        ShapeDef::new(Geometry::Box { size })
            .friction(friction)
            .elasticity(elasticity)
            .tag(CollisionTag::DOMINO),
    );
    Ok(body)
}

/// Layout parameters for a run of identical dominoes standing on a
/// common baseline.
#[derive(Clone, Debug)]
pub struct DominoRow {
    pub count: usize,
    pub size: Size,
    pub mass: FloatNum,
    pub friction: FloatNum,
    pub elasticity: FloatNum,
    /// gap between dominoes as a fraction of their height
    pub spacing_factor: FloatNum,
    pub start: Point,
}

/// A row of dominoes spaced so each one can knock over the next.
pub fn build_domino_row(
    world: &mut impl PhysicsWorld,
    row: &DominoRow,
) -> Result<Vec<BodyHandle>> {
    ensure_positive("domino spacing factor", row.spacing_factor)?;
    ensure_point("domino row start", row.start)?;

    let pitch = row.size.width() + row.size.height() * row.spacing_factor;
    let mut dominoes = Vec::with_capacity(row.count);
    for i in 0..row.count {
        let position = Point::new(row.start.x() + pitch * i as FloatNum, row.start.y());
        dominoes.push(build_domino(
            world,
            position,
            row.size,
            row.mass,
            row.friction,
            row.elasticity,
        )?);
    }
    debug!("domino row of {} built at {:?}", row.count, row.start);
    Ok(dominoes)
}

/// A pivoting beam. Keeps the construction-time geometry around so
/// later joints can anchor onto the beam in its local frame.
#[derive(Clone, Copy, Debug)]
pub struct Lever {
    body: BodyHandle,
    center: Point,
    tip: Point,
}

impl Lever {
    pub fn body(&self) -> BodyHandle {
        self.body
    }

    pub fn center(&self) -> Point {
        self.center
    }

    /// world position of the moving end at construction time
    pub fn tip(&self) -> Point {
        self.tip
    }

    /// convert a world point into the beam's local frame, valid at the
    /// initial unrotated pose
    pub fn local_anchor(&self, world_point: Point) -> Point {
        (world_point - self.center).to_point()
    }

    pub fn tip_local_anchor(&self) -> Point {
        self.local_anchor(self.tip)
    }
}

fn build_lever_impl(
    world: &mut impl PhysicsWorld,
    pivot: Point,
    start: Point,
    end: Point,
    thickness: FloatNum,
    mass: FloatNum,
    friction: FloatNum,
) -> Result<Lever> {
    ensure_segment("lever beam", start, end)?;
    ensure_positive("lever thickness", thickness)?;
    ensure_positive("lever mass", mass)?;

    let length = start.distance(&end);
    let center = start.midpoint(&end);
    let beam_size = Size::new(length, thickness);

    let beam = world.create_body(
        BodyDef::dynamic(center, mass).moment(Moment::Value(
            Geometry::Box { size: beam_size }.moment_of_inertia(mass),
        )),
    );
    world.create_shape(
        beam,
        ShapeDef::new(Geometry::Box { size: beam_size })
            .friction(friction)
            .elasticity(0.2),
    );

    let pivot_body = world.create_body(BodyDef::fixed(pivot));
    world.create_joint(JointDef::Pivot {
        body_a: pivot_body,
        body_b: beam,
        anchor_a: Point::default(),
        anchor_b: (pivot - center).to_point(),
    });

    Ok(Lever {
        body: beam,
        center,
        tip: end,
    })
}

/// Balanced lever pivoting about the midpoint of its two endpoints.
pub fn build_lever(
    world: &mut impl PhysicsWorld,
    start: impl Into<Point>,
    end: impl Into<Point>,
    thickness: FloatNum,
    mass: FloatNum,
) -> Result<Lever> {
    let (start, end) = (start.into(), end.into());
    let pivot = start.midpoint(&end);
    build_lever_impl(world, pivot, start, end, thickness, mass, 0.5)
}

/// Lever pinned at one endpoint, the other endpoint swings free. The
/// returned [`Lever`] exposes the swinging tip for rope attachment.
pub fn build_swing_lever(
    world: &mut impl PhysicsWorld,
    pivot: impl Into<Point>,
    tip: impl Into<Point>,
    thickness: FloatNum,
    mass: FloatNum,
) -> Result<Lever> {
    let (pivot, tip) = (pivot.into(), tip.into());
    build_lever_impl(world, pivot, pivot, tip, thickness, mass, 0.7)
}

/// Static vertical channel guiding a falling body.
pub fn build_guide(
    world: &mut impl PhysicsWorld,
    position: impl Into<Point>,
    size: Size,
) -> Result<BodyHandle> {
    let position = ensure_point("guide position", position.into())?;
    let size = ensure_size("guide size", size)?;
    Ok(static_box(world, position, size, 0.6, 0.2))
}

/// Two converging static segments funneling bodies toward a spout
/// below `position`.
pub fn build_funnel(
    world: &mut impl PhysicsWorld,
    position: impl Into<Point>,
    size: Size,
) -> Result<BodyHandle> {
    let position = ensure_point("funnel position", position.into())?;
    let size = ensure_size("funnel size", size)?;

    let (x, y): (FloatNum, FloatNum) = position.into();
    let spout = Point::new(x, y - size.height());
    let body = world.create_body(BodyDef::fixed(Point::default()));
    for rim_x in [x - size.width() / 2., x + size.width() / 2.] {
        world.create_shape(
            body,
            ShapeDef::new(Geometry::Segment {
                start: Point::new(rim_x, y),
                end: spout,
                thickness: 4.,
            })
            .friction(0.7)
            .elasticity(0.2),
        );
    }
    Ok(body)
}

/// Static pulley wheel; ropes are routed over its circumference and
/// may anchor onto the returned body.
pub fn build_pulley(
    world: &mut impl PhysicsWorld,
    position: impl Into<Point>,
    radius: FloatNum,
) -> Result<BodyHandle> {
    let position = ensure_point("pulley position", position.into())?;
    ensure_positive("pulley radius", radius)?;

    let body = world.create_body(BodyDef::fixed(position));
    world.create_shape(
        body,
        ShapeDef::new(Geometry::Circle { radius })
            .friction(0.5)
            .elasticity(0.2),
    );
    Ok(body)
}

/// Dynamic platform constrained to a vertical groove spanning
/// `travel` above and below its start position.
pub fn build_elevator(
    world: &mut impl PhysicsWorld,
    position: impl Into<Point>,
    size: Size,
    mass: FloatNum,
    travel: FloatNum,
) -> Result<BodyHandle> {
    let position = ensure_point("elevator position", position.into())?;
    let size = ensure_size("elevator size", size)?;
    ensure_positive("elevator mass", mass)?;
    ensure_positive("elevator travel", travel)?;

    let body = world.create_body(
        BodyDef::dynamic(position, mass)
            .moment(Moment::Value(Geometry::Box { size }.moment_of_inertia(mass))),
    );
    world.create_shape(
        body,
        ShapeDef::new(Geometry::Box { size })
            .friction(0.5)
            .elasticity(0.2),
    );
    constrain_vertical(world, body, position, travel);
    Ok(body)
}

/// Bind an existing dynamic body to a vertical groove in the world
/// ground frame, centered on `position`.
pub fn constrain_vertical(
    world: &mut impl PhysicsWorld,
    body: BodyHandle,
    position: Point,
    travel: FloatNum,
) {
    let ground = world.ground();
    world.create_joint(JointDef::Groove {
        body_a: ground,
        body_b: body,
        groove_start: Point::new(position.x(), position.y() - travel),
        groove_end: Point::new(position.x(), position.y() + travel),
        anchor_b: Point::default(),
    });
}

/// Free-rolling dynamic cart.
pub fn build_cart(
    world: &mut impl PhysicsWorld,
    position: impl Into<Point>,
    size: Size,
    mass: FloatNum,
) -> Result<BodyHandle> {
    let position = ensure_point("cart position", position.into())?;
    let size = ensure_size("cart size", size)?;
    ensure_positive("cart mass", mass)?;

    let body = world.create_body(
        BodyDef::dynamic(position, mass)
            .moment(Moment::Value(Geometry::Box { size }.moment_of_inertia(mass))),
    );
    world.create_shape(
        body,
        ShapeDef::new(Geometry::Box { size })
            .friction(0.7)
            .elasticity(0.2),
    );
    Ok(body)
}

/// Static block, used for counterweights, battery stacks and resting
/// bottles alike.
pub fn build_block(
    world: &mut impl PhysicsWorld,
    position: impl Into<Point>,
    size: Size,
) -> Result<BodyHandle> {
    let position = ensure_point("block position", position.into())?;
    let size = ensure_size("block size", size)?;
    Ok(static_box(world, position, size, 0.5, 0.2))
}

/// Dynamic regular polygon weight of circumscribed radius `size`.
pub fn build_weight(
    world: &mut impl PhysicsWorld,
    position: impl Into<Point>,
    size: FloatNum,
    sides: usize,
    mass: FloatNum,
) -> Result<BodyHandle> {
    let position = ensure_point("weight position", position.into())?;
    ensure_positive("weight size", size)?;
    ensure_positive("weight mass", mass)?;
    if sides < 3 {
        return Err(Error::NonPositive {
            what: "weight sides (minimum 3)",
            value: sides as FloatNum,
        });
    }

    let vertices: Vec<Point> = (0..sides)
        .map(|i| {
            let angle = TAU * i as FloatNum / sides as FloatNum;
            Point::new(size * angle.cos(), size * angle.sin())
        })
        .collect();

    let geometry = Geometry::ConvexPolygon { vertices };
    let moment = geometry.moment_of_inertia(mass);
    let body =
        world.create_body(BodyDef::dynamic(position, mass).moment(Moment::Value(moment)));
    world.create_shape(body, ShapeDef::new(geometry).friction(0.7).elasticity(0.2));
    Ok(body)
}
