//! Last-write-wins slot for the document currently on screen.
//!
//! Every filter or highlight change starts a new generation. A document
//! produced for an older generation is discarded when it arrives, so a slow
//! generation can never overwrite a newer one.

use crate::document::MapDocument;

/// Identifies one requested document generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GenerationTicket(u64);

/// Holds the document shown by one map screen.
#[derive(Debug, Default)]
pub struct MapSession {
    issued: u64,
    current: Option<MapDocument>,
}

impl MapSession {
    /// Creates a session with no document on screen.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new generation, superseding every outstanding ticket.
    pub const fn begin(&mut self) -> GenerationTicket {
        self.issued += 1;
        GenerationTicket(self.issued)
    }

    /// Installs `document` if `ticket` is the newest generation.
    ///
    /// Returns `false` and drops the document when a newer generation has
    /// been started since the ticket was issued.
    pub fn apply(&mut self, ticket: GenerationTicket, document: MapDocument) -> bool {
        if ticket.0 != self.issued {
            log::debug!(
                "Dropping stale map document (generation {} superseded by {})",
                ticket.0,
                self.issued
            );
            return false;
        }
        self.current = Some(document);
        true
    }

    /// Returns the document currently on screen.
    #[must_use]
    pub const fn current(&self) -> Option<&MapDocument> {
        self.current.as_ref()
    }

    /// Drops the current document and invalidates outstanding tickets.
    pub fn discard(&mut self) {
        self.issued += 1;
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use tire_map_place_models::Viewport;

    use super::*;
    use crate::document::generate;

    fn document(zoom: u8) -> MapDocument {
        generate(
            &[],
            &Viewport {
                center_lat: 38.0931,
                center_lon: 27.7519,
                zoom,
            },
        )
    }

    #[test]
    fn newest_generation_is_applied() {
        let mut session = MapSession::new();
        let ticket = session.begin();
        assert!(session.apply(ticket, document(10)));
        assert_eq!(session.current(), Some(&document(10)));
    }

    #[test]
    fn superseded_generation_is_dropped() {
        let mut session = MapSession::new();
        let first = session.begin();
        let second = session.begin();

        assert!(session.apply(second, document(13)));
        assert!(!session.apply(first, document(10)));
        assert_eq!(session.current(), Some(&document(13)));
    }

    #[test]
    fn stale_result_does_not_replace_current_before_newer_arrives() {
        let mut session = MapSession::new();
        let first = session.begin();
        assert!(session.apply(first, document(10)));

        let stale = session.begin();
        let fresh = session.begin();
        assert!(!session.apply(stale, document(13)));
        assert_eq!(session.current(), Some(&document(10)));
        assert!(session.apply(fresh, document(16)));
    }

    #[test]
    fn discard_clears_and_invalidates() {
        let mut session = MapSession::new();
        let ticket = session.begin();
        session.discard();
        assert!(!session.apply(ticket, document(10)));
        assert!(session.current().is_none());
    }
}
