use osmbin_types::OsmGeo;

use crate::error::StreamError;
use crate::filter::Filter;

/// Lifecycle of a source.
///
/// ```text
///   Created ──move_next──▶ Iterating ──end of input──▶ Exhausted
///      ▲                                                  │
///      └──────────────────────── reset ───────────────────┘
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SourceState {
    #[default]
    Created,
    Iterating,
    Exhausted,
}

/// A pull-based, type-filtered sequence of entities.
///
/// Implemented by the flat [`BinaryStreamSource`](crate::BinaryStreamSource)
/// and the block-oriented [`BlockStreamSource`](crate::BlockStreamSource),
/// so callers can treat both the same way.
pub trait OsmStreamSource {
    /// Advance to the next entity that `filter` accepts.
    ///
    /// Returns `Ok(false)` at the end of input; `current` then still holds
    /// the last accepted entity.
    fn move_next(&mut self, filter: Filter) -> Result<bool, StreamError>;

    /// The entity produced by the last successful `move_next`.
    fn current(&self) -> Option<&OsmGeo>;

    fn can_reset(&self) -> bool;

    /// Rewind to where the source started.
    ///
    /// # Errors
    ///
    /// [`StreamError::ResetUnsupported`] when `can_reset` is false.
    fn reset(&mut self) -> Result<(), StreamError>;

    /// Iterate the remaining accepted entities.
    ///
    /// The iterator stops after the first error.
    fn records(&mut self, filter: Filter) -> Records<'_, Self>
    where
        Self: Sized,
    {
        Records {
            source: self,
            filter,
            done: false,
        }
    }
}

pub struct Records<'a, S> {
    source: &'a mut S,
    filter: Filter,
    done: bool,
}

impl<S: OsmStreamSource> Iterator for Records<'_, S> {
    type Item = Result<OsmGeo, StreamError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.source.move_next(self.filter) {
            Ok(true) => self.source.current().cloned().map(Ok),
            Ok(false) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
