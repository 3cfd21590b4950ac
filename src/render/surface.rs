use crate::foundation::core::{Point, Rgba8, Vec2, Viewport};

/// How a draw combines with what is already on the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Blend {
    /// Source-over.
    #[default]
    Normal,
    /// Additive (`plus`) compositing, used for glows.
    Additive,
}

/// Color stop of a gradient. `offset` is in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    /// Position along the gradient.
    pub offset: f32,
    /// Straight-alpha color at `offset`.
    pub color: Rgba8,
}

impl GradientStop {
    /// Construct a stop.
    pub fn new(offset: f32, color: Rgba8) -> Self {
        Self { offset, color }
    }
}

/// Immediate-mode drawing command.
///
/// Renderers describe each frame as a sequence of these; a [`Surface`] decides how to rasterize
/// them (or merely record them).
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCmd {
    /// Discard everything drawn so far and fill the whole surface.
    Clear(Rgba8),
    /// Fill a disc of `radius` with a radial gradient centered on `center`.
    RadialGradient {
        /// Gradient and disc center.
        center: Point,
        /// Gradient and disc radius.
        radius: f64,
        /// Color stops, ascending offsets.
        stops: Vec<GradientStop>,
        /// Compositing mode.
        blend: Blend,
    },
    /// Fill an axis-aligned rectangle with a horizontal linear gradient.
    LinearGradientRect {
        /// Top-left corner.
        origin: Point,
        /// Width and height.
        size: Vec2,
        /// Color stops, ascending offsets.
        stops: Vec<GradientStop>,
    },
    /// Fill an axis-aligned rectangle with a solid color.
    FillRect {
        /// Top-left corner.
        origin: Point,
        /// Width and height.
        size: Vec2,
        /// Fill color.
        color: Rgba8,
    },
    /// Fill a disc with a solid color.
    Circle {
        /// Disc center.
        center: Point,
        /// Disc radius.
        radius: f64,
        /// Fill color.
        color: Rgba8,
    },
    /// Stroke a rotated ellipse, optionally dashed.
    StrokeEllipse {
        /// Ellipse center.
        center: Point,
        /// Semi-axes before rotation.
        radii: Vec2,
        /// Rotation in radians.
        rotation: f64,
        /// Stroke width.
        width: f64,
        /// Stroke color.
        color: Rgba8,
        /// `[dash, gap]` lengths; solid when `None`.
        dash: Option<[f64; 2]>,
    },
    /// Stroke a straight segment.
    Line {
        /// Segment start.
        from: Point,
        /// Segment end.
        to: Point,
        /// Stroke width.
        width: f64,
        /// Stroke color.
        color: Rgba8,
    },
}

impl DrawCmd {
    /// Stroke a circle; shorthand for an unrotated, undashed [`DrawCmd::StrokeEllipse`].
    pub fn ring(center: Point, radius: f64, width: f64, color: Rgba8) -> Self {
        Self::StrokeEllipse {
            center,
            radii: Vec2::new(radius, radius),
            rotation: 0.0,
            width,
            color,
            dash: None,
        }
    }
}

/// A 2D drawing target sized to a viewport.
///
/// Passed explicitly into every `render` call; nothing holds a surface implicitly.
pub trait Surface {
    /// Pixel size of the target.
    fn viewport(&self) -> Viewport;

    /// Append one command.
    fn draw(&mut self, cmd: DrawCmd);
}

/// In-memory surface that records commands instead of rasterizing them.
#[derive(Clone, Debug, Default)]
pub struct DrawList {
    viewport: Viewport,
    cmds: Vec<DrawCmd>,
}

impl DrawList {
    /// Create an empty list for a viewport.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            cmds: Vec::new(),
        }
    }

    /// Recorded commands since the last [`DrawCmd::Clear`].
    pub fn cmds(&self) -> &[DrawCmd] {
        &self.cmds
    }

    /// Number of recorded commands.
    pub fn len(&self) -> usize {
        self.cmds.len()
    }

    /// `true` when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    /// Count commands matching `pred`.
    pub fn count(&self, pred: impl Fn(&DrawCmd) -> bool) -> usize {
        self.cmds.iter().filter(|c| pred(c)).count()
    }
}

impl Surface for DrawList {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn draw(&mut self, cmd: DrawCmd) {
        if matches!(cmd, DrawCmd::Clear(_)) {
            self.cmds.clear();
        }
        self.cmds.push(cmd);
    }
}
