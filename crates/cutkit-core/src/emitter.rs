//! The boundary between the geometry engine and the machine driver.

use crate::directive::MoveDirective;
use crate::error::Result;

/// Consumer of the ordered directive stream.
///
/// Implementations must execute directives in emission order.
pub trait MotionEmitter {
    /// Append one directive to the outbound queue.
    fn emit(&mut self, directive: MoveDirective);

    /// Textual entry point: parse one motion line and append it.
    fn emit_line(&mut self, line: &str) -> Result<()> {
        let directive = MoveDirective::parse_line(line)?;
        self.emit(directive);
        Ok(())
    }
}

/// In-memory outbound directive queue.
#[derive(Debug, Clone, Default)]
pub struct MoveQueue {
    directives: Vec<MoveDirective>,
}

impl MoveQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a textual motion line and queue it.
    pub fn push_line(&mut self, line: &str) -> Result<()> {
        self.emit_line(line)
    }

    pub fn directives(&self) -> &[MoveDirective] {
        &self.directives
    }

    pub fn len(&self) -> usize {
        self.directives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    /// Take every queued directive, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<MoveDirective> {
        std::mem::take(&mut self.directives)
    }
}

impl MotionEmitter for MoveQueue {
    fn emit(&mut self, directive: MoveDirective) {
        tracing::trace!(mode = %directive.mode, "queue directive");
        self.directives.push(directive);
    }
}

impl MotionEmitter for Vec<MoveDirective> {
    fn emit(&mut self, directive: MoveDirective) {
        self.push(directive);
    }
}
