//! The view-local marker collection.
//!
//! A [`MarkerBoard`] is owned by the map view for the duration of its mount.
//! It is hydrated from the document store once on load and mutated directly
//! by user actions; every mutation is optimistic (applied locally first) and
//! returns the information the caller needs to mirror it remotely, and to
//! roll it back if the mirror write comes back fatal.

use std::fmt;

use crate::models::{MarkerId, PointOfInterest, Position};
use crate::session::SessionState;

/// Errors from guarded or targeted board operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BoardError {
    /// A mutation was attempted without an authenticated session.
    NotAuthenticated,
    /// No record with the given id exists on the board.
    UnknownMarker(MarkerId),
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::NotAuthenticated => write!(f, "not authenticated"),
            BoardError::UnknownMarker(id) => write!(f, "unknown marker {id}"),
        }
    }
}

impl std::error::Error for BoardError {}

/// An in-place update: the new record plus the value it replaced.
#[derive(Clone, Debug, PartialEq)]
pub struct Updated {
    pub marker: PointOfInterest,
    pub previous: PointOfInterest,
}

/// A removal: the record plus the index it occupied.
#[derive(Clone, Debug, PartialEq)]
pub struct Removed {
    pub marker: PointOfInterest,
    pub index: usize,
}

/// In-memory ordered collection of points of interest.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MarkerBoard {
    markers: Vec<PointOfInterest>,
}

impl MarkerBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// The collection in insertion order.
    pub fn markers(&self) -> &[PointOfInterest] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn get(&self, id: &MarkerId) -> Option<&PointOfInterest> {
        self.markers.iter().find(|m| &m.id == id)
    }

    /// Replace the whole collection with freshly loaded records. Used once
    /// on mount; on a failed load the caller leaves the board empty rather
    /// than stale.
    pub fn hydrate(&mut self, records: Vec<PointOfInterest>) {
        self.markers = records;
    }

    /// Drop a new pin at the clicked position.
    ///
    /// Guarded: an anonymous session gets `Err(NotAuthenticated)` and the
    /// collection is untouched. On success the appended record is returned
    /// so the caller can mirror it to the remote store.
    pub fn create(
        &mut self,
        session: &SessionState,
        position: Position,
    ) -> Result<PointOfInterest, BoardError> {
        if !session.is_authenticated() {
            return Err(BoardError::NotAuthenticated);
        }
        let marker = PointOfInterest::new(MarkerId::generate(), position);
        self.markers.push(marker.clone());
        Ok(marker)
    }

    /// Replace the description of the matching record. Whitespace-only text
    /// clears it. Only the `description` field changes.
    pub fn update_description(
        &mut self,
        id: &MarkerId,
        text: &str,
    ) -> Result<Updated, BoardError> {
        let marker = self
            .markers
            .iter_mut()
            .find(|m| &m.id == id)
            .ok_or_else(|| BoardError::UnknownMarker(id.clone()))?;
        let previous = marker.clone();
        let trimmed = text.trim();
        marker.description = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        Ok(Updated {
            marker: marker.clone(),
            previous,
        })
    }

    /// Record the uploaded image URL on the matching record. Called only
    /// after the object store upload succeeded.
    pub fn attach_image(&mut self, id: &MarkerId, url: String) -> Result<Updated, BoardError> {
        let marker = self
            .markers
            .iter_mut()
            .find(|m| &m.id == id)
            .ok_or_else(|| BoardError::UnknownMarker(id.clone()))?;
        let previous = marker.clone();
        marker.image_url = Some(url);
        Ok(Updated {
            marker: marker.clone(),
            previous,
        })
    }

    /// Remove the matching record, keeping its index for a possible restore.
    pub fn remove(&mut self, id: &MarkerId) -> Result<Removed, BoardError> {
        let index = self
            .markers
            .iter()
            .position(|m| &m.id == id)
            .ok_or_else(|| BoardError::UnknownMarker(id.clone()))?;
        let marker = self.markers.remove(index);
        Ok(Removed { marker, index })
    }

    /// Undo an optimistic `create` whose remote write was rejected.
    pub fn discard(&mut self, id: &MarkerId) {
        self.markers.retain(|m| &m.id != id);
    }

    /// Undo an optimistic in-place update by restoring the previous value.
    /// No-op if the record has since been removed.
    pub fn restore(&mut self, previous: PointOfInterest) {
        if let Some(marker) = self.markers.iter_mut().find(|m| m.id == previous.id) {
            *marker = previous;
        }
    }

    /// Undo an optimistic `remove` by re-inserting the record at its old
    /// index (clamped if the board shrank in the meantime).
    pub fn restore_removed(&mut self, removed: Removed) {
        let index = removed.index.min(self.markers.len());
        self.markers.insert(index, removed.marker);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionToken;

    fn signed_in() -> SessionState {
        SessionState::authenticated(SessionToken::new("tok"))
    }

    #[test]
    fn create_appends_one_record_with_clicked_coordinates() {
        let mut board = MarkerBoard::new();
        let session = signed_in();

        for i in 0..5 {
            let before = board.len();
            let pos = Position::new(10.0 + i as f64, 20.0 + i as f64);
            let marker = board.create(&session, pos).unwrap();
            assert_eq!(board.len(), before + 1);
            assert_eq!(marker.position, pos);
            assert!(marker.description.is_none());
            assert!(marker.image_url.is_none());
        }
    }

    #[test]
    fn create_while_anonymous_leaves_board_unchanged() {
        let mut board = MarkerBoard::new();
        let session = SessionState::anonymous();

        let err = board
            .create(&session, Position::new(1.0, 2.0))
            .unwrap_err();
        assert_eq!(err, BoardError::NotAuthenticated);
        assert!(board.is_empty());
    }

    #[test]
    fn click_scenario_on_empty_board() {
        // Click at (41.0, 12.0) while authenticated with an empty list.
        let mut board = MarkerBoard::new();
        let marker = board
            .create(&signed_in(), Position::new(41.0, 12.0))
            .unwrap();

        assert_eq!(board.len(), 1);
        let stored = &board.markers()[0];
        assert_eq!(stored, &marker);
        assert_eq!(stored.position, Position::new(41.0, 12.0));
        assert!(stored.description.is_none());
        assert!(stored.image_url.is_none());
    }

    #[test]
    fn ids_are_unique_across_hydrate() {
        let mut board = MarkerBoard::new();
        let session = signed_in();
        let first = board.create(&session, Position::new(0.0, 0.0)).unwrap();

        // Reload mid-session, then create again: no collision possible.
        board.hydrate(vec![first.clone()]);
        let second = board.create(&session, Position::new(1.0, 1.0)).unwrap();
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn update_description_touches_only_the_matching_record() {
        let mut board = MarkerBoard::new();
        let session = signed_in();
        let a = board.create(&session, Position::new(1.0, 1.0)).unwrap();
        let b = board.create(&session, Position::new(2.0, 2.0)).unwrap();

        let updated = board.update_description(&a.id, "lunch spot").unwrap();
        assert_eq!(updated.marker.description.as_deref(), Some("lunch spot"));
        assert_eq!(updated.previous.description, None);

        let a_now = board.get(&a.id).unwrap();
        assert_eq!(a_now.description.as_deref(), Some("lunch spot"));
        assert_eq!(a_now.position, a.position);
        assert_eq!(a_now.image_url, None);
        assert_eq!(board.get(&b.id).unwrap(), &b);
    }

    #[test]
    fn update_description_is_idempotent() {
        let mut board = MarkerBoard::new();
        let a = board
            .create(&signed_in(), Position::new(1.0, 1.0))
            .unwrap();

        board.update_description(&a.id, "same text").unwrap();
        let snapshot = board.clone();
        board.update_description(&a.id, "same text").unwrap();
        assert_eq!(board, snapshot);
    }

    #[test]
    fn blank_description_clears_the_field() {
        let mut board = MarkerBoard::new();
        let a = board
            .create(&signed_in(), Position::new(1.0, 1.0))
            .unwrap();

        board.update_description(&a.id, "something").unwrap();
        board.update_description(&a.id, "   ").unwrap();
        assert_eq!(board.get(&a.id).unwrap().description, None);
    }

    #[test]
    fn update_unknown_marker_fails() {
        let mut board = MarkerBoard::new();
        let ghost = MarkerId::from("no-such-id");
        let err = board.update_description(&ghost, "text").unwrap_err();
        assert_eq!(err, BoardError::UnknownMarker(ghost));
    }

    #[test]
    fn attach_image_sets_url_on_matching_record_only() {
        let mut board = MarkerBoard::new();
        let session = signed_in();
        let a = board.create(&session, Position::new(1.0, 1.0)).unwrap();
        let b = board.create(&session, Position::new(2.0, 2.0)).unwrap();

        board
            .attach_image(&a.id, "https://cdn.example/markers/a/photo.jpg".into())
            .unwrap();

        assert_eq!(
            board.get(&a.id).unwrap().image_url.as_deref(),
            Some("https://cdn.example/markers/a/photo.jpg")
        );
        assert_eq!(board.get(&b.id).unwrap(), &b);
    }

    #[test]
    fn remove_then_restore_round_trips() {
        let mut board = MarkerBoard::new();
        let session = signed_in();
        board.create(&session, Position::new(1.0, 1.0)).unwrap();
        let middle = board.create(&session, Position::new(2.0, 2.0)).unwrap();
        board.create(&session, Position::new(3.0, 3.0)).unwrap();
        let snapshot = board.clone();

        let removed = board.remove(&middle.id).unwrap();
        assert_eq!(board.len(), 2);
        assert_eq!(removed.index, 1);

        board.restore_removed(removed);
        assert_eq!(board, snapshot);
    }

    #[test]
    fn discard_undoes_an_optimistic_create() {
        let mut board = MarkerBoard::new();
        let snapshot = board.clone();
        let marker = board
            .create(&signed_in(), Position::new(4.0, 4.0))
            .unwrap();

        board.discard(&marker.id);
        assert_eq!(board, snapshot);
    }

    #[test]
    fn restore_undoes_an_optimistic_update() {
        let mut board = MarkerBoard::new();
        let a = board
            .create(&signed_in(), Position::new(1.0, 1.0))
            .unwrap();
        board.update_description(&a.id, "first").unwrap();
        let snapshot = board.clone();

        let updated = board.update_description(&a.id, "second").unwrap();
        board.restore(updated.previous);
        assert_eq!(board, snapshot);
    }

    #[test]
    fn hydrate_replaces_the_collection() {
        let mut board = MarkerBoard::new();
        board
            .create(&signed_in(), Position::new(1.0, 1.0))
            .unwrap();

        let fresh = vec![
            PointOfInterest::new(MarkerId::from("r1"), Position::new(5.0, 5.0)),
            PointOfInterest::new(MarkerId::from("r2"), Position::new(6.0, 6.0)),
        ];
        board.hydrate(fresh.clone());
        assert_eq!(board.markers(), &fresh[..]);
    }
}
