//! Emission helper shared by the planners.

use cutkit_core::{CuttingContext, MotionEmitter, MoveDirective, Point2, Point3};

/// Forwards directives to the emitter and keeps the context position in step.
pub(crate) struct Motion<'a, E: MotionEmitter + ?Sized> {
    ctx: &'a mut CuttingContext,
    emitter: &'a mut E,
}

impl<'a, E: MotionEmitter + ?Sized> Motion<'a, E> {
    pub(crate) fn new(ctx: &'a mut CuttingContext, emitter: &'a mut E) -> Self {
        Self { ctx, emitter }
    }

    pub(crate) fn emit(&mut self, directive: MoveDirective) {
        self.ctx.track(&directive);
        self.emitter.emit(directive);
    }

    pub(crate) fn position(&self) -> Point3 {
        self.ctx.position
    }

    pub(crate) fn xy_feed(&self) -> f64 {
        self.ctx.feeds.xy_per_minute()
    }

    pub(crate) fn z_feed(&self) -> f64 {
        self.ctx.feeds.z_per_minute()
    }

    pub(crate) fn rapid_z(&mut self, z: f64) {
        self.emit(MoveDirective::rapid_z(z));
    }

    pub(crate) fn rapid_xy(&mut self, p: Point2) {
        self.emit(MoveDirective::rapid_xy(p.x, p.y));
    }

    /// Feed move on Z only.
    pub(crate) fn plunge_to(&mut self, z: f64) {
        let feed = self.z_feed();
        self.emit(MoveDirective::linear_z(z, feed));
    }

    pub(crate) fn line_to(&mut self, p: Point2) {
        let feed = self.xy_feed();
        self.emit(MoveDirective::linear_xy(p.x, p.y, feed));
    }

    /// Rapid up to `safe_z` unless already there.
    pub(crate) fn retract(&mut self, safe_z: f64) {
        if self.ctx.position.z != safe_z {
            self.rapid_z(safe_z);
        }
    }
}
