use log::{debug, trace};
use osmbin_decoder::read_osm_geo;
use osmbin_types::OsmGeo;
use osmbin_wire::CodecConfig;

use crate::byte_source::ByteSource;
use crate::error::StreamError;
use crate::filter::Filter;
use crate::skip::SkipOffsets;
use crate::source::{OsmStreamSource, SourceState};

/// Reads flat records back to back from a byte source.
///
/// Every advance decodes records one at a time until one passes the
/// filter. On seekable input the source also remembers where the first way
/// and the first relation start, and a later pass that ignores everything
/// before them jumps straight there.
///
/// # Example
///
/// ```rust
/// use std::io::Cursor;
/// use osmbin_stream::{BinaryStreamSource, Filter, OsmStreamSource, Seekable};
///
/// let mut source = BinaryStreamSource::new(Seekable::new(Cursor::new(Vec::<u8>::new())).unwrap());
/// assert!(!source.move_next(Filter::ACCEPT_ALL).unwrap());
/// ```
pub struct BinaryStreamSource<S> {
    source: S,
    config: CodecConfig,
    initial_position: u64,
    offsets: SkipOffsets,
    current: Option<OsmGeo>,
    state: SourceState,
}

impl<S: ByteSource> BinaryStreamSource<S> {
    pub fn new(source: S) -> Self {
        Self::with_config(source, CodecConfig::default())
    }

    pub fn with_config(source: S, config: CodecConfig) -> Self {
        let initial_position = source.position();
        Self {
            source,
            config,
            initial_position,
            offsets: SkipOffsets::default(),
            current: None,
            state: SourceState::Created,
        }
    }

    #[must_use]
    pub fn state(&self) -> SourceState {
        self.state
    }

    #[must_use]
    pub fn first_way_offset(&self) -> Option<u64> {
        self.offsets.first_way()
    }

    #[must_use]
    pub fn first_relation_offset(&self) -> Option<u64> {
        self.offsets.first_relation()
    }

    #[must_use]
    pub fn position(&self) -> u64 {
        self.source.position()
    }

    pub fn into_inner(self) -> S {
        self.source
    }
}

impl<S: ByteSource> OsmStreamSource for BinaryStreamSource<S> {
    fn move_next(&mut self, filter: Filter) -> Result<bool, StreamError> {
        let seekable = self.source.can_seek();
        if seekable && !self.source.has_remaining() {
            self.state = SourceState::Exhausted;
            return Ok(false);
        }
        self.state = SourceState::Iterating;

        if seekable {
            let position = self.source.position();
            if let Some(target) = self.offsets.seek_target(filter, position) {
                debug!(from = position, to = target; "skipping ahead");
                self.source.seek_to(target)?;
            }
        }

        loop {
            let before = self.source.position();
            let Some(geo) = read_osm_geo(&mut self.source, &self.config)? else {
                self.state = SourceState::Exhausted;
                return Ok(false);
            };

            let geo_type = geo.geo_type();
            if seekable && self.offsets.record(geo_type, before) {
                debug!(geo_type = geo_type.as_str(), offset = before; "first record of kind");
            }

            if filter.accepts(geo_type) {
                self.current = Some(geo);
                return Ok(true);
            }
            trace!(geo_type = geo_type.as_str(), offset = before; "record filtered");
        }
    }

    fn current(&self) -> Option<&OsmGeo> {
        self.current.as_ref()
    }

    fn can_reset(&self) -> bool {
        self.source.can_seek()
    }

    fn reset(&mut self) -> Result<(), StreamError> {
        if !self.source.can_seek() {
            return Err(StreamError::ResetUnsupported);
        }
        self.current = None;
        self.source.seek_to(self.initial_position)?;
        self.state = SourceState::Created;
        debug!(position = self.initial_position; "source reset");
        Ok(())
    }
}
