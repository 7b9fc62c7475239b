//! Per-beat assignment counters for a single scheduling pass.
//!
//! The tracker is a working copy of the beats that had room when the pass
//! started. It advises; it does not lock. Callers must check
//! [`CapacityTracker::has_capacity`] right before [`CapacityTracker::commit`]
//! within one sequential pass, and must not run two passes against the same
//! beats concurrently.
//!
//! Each tracked beat remembers its position in the source list, and the
//! scheduler commits by that position, so two beats that share an id never
//! borrow each other's capacity.

use beat_roster_assignment_models::Beat;

/// A tracked beat and its position in the source beat list.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Slot {
    source: usize,
    beat: Beat,
}

/// Working set of beats that can still take assignments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapacityTracker {
    slots: Vec<Slot>,
}

impl CapacityTracker {
    /// Copies the beats with spare capacity, keeping their order.
    ///
    /// Full and oversubscribed beats are left out entirely, so nothing this
    /// tracker does can push them further over.
    #[must_use]
    pub fn from_beats(beats: &[Beat]) -> Self {
        let slots: Vec<Slot> = beats
            .iter()
            .enumerate()
            .filter(|(_, beat)| beat.has_capacity())
            .map(|(source, beat)| Slot {
                source,
                beat: beat.clone(),
            })
            .collect();

        for (i, slot) in slots.iter().enumerate() {
            if slots[..i].iter().any(|other| other.beat.id == slot.beat.id) {
                log::warn!(
                    "Beat id {} appears more than once; capacity is tracked per entry",
                    slot.beat.id
                );
            }
        }

        Self { slots }
    }

    /// Whether any tracked beat with this id is below its maximum.
    #[must_use]
    pub fn has_capacity(&self, beat_id: &str) -> bool {
        self.with_id(beat_id).any(Beat::has_capacity)
    }

    /// Slots left across the tracked beats with this id, or `None` if none
    /// is tracked.
    #[must_use]
    pub fn remaining(&self, beat_id: &str) -> Option<u32> {
        self.with_id(beat_id)
            .map(Beat::remaining_capacity)
            .reduce(u32::saturating_add)
    }

    /// The first beat, in source order, that still has room, along with the
    /// position to pass to [`CapacityTracker::commit_at`].
    #[must_use]
    pub fn first_available(&self) -> Option<(usize, &Beat)> {
        self.slots
            .iter()
            .position(|slot| slot.beat.has_capacity())
            .map(|index| (index, &self.slots[index].beat))
    }

    /// Records one more assignment on the tracked beat at `index`.
    ///
    /// Returns `false`, changing nothing, if there is no such beat or it is
    /// already full.
    pub fn commit_at(&mut self, index: usize) -> bool {
        match self.slots.get_mut(index) {
            Some(slot) if slot.beat.has_capacity() => {
                slot.beat.current_assigned += 1;
                true
            }
            _ => false,
        }
    }

    /// Records one more assignment on the first tracked beat with this id
    /// that still has room.
    ///
    /// Returns `false`, changing nothing, if no such beat exists.
    pub fn commit(&mut self, beat_id: &str) -> bool {
        let index = self
            .slots
            .iter()
            .position(|slot| slot.beat.id == beat_id && slot.beat.has_capacity());
        index.is_some_and(|index| self.commit_at(index))
    }

    /// Tracked beats with their working counters, in source order.
    pub fn beats(&self) -> impl Iterator<Item = &Beat> {
        self.slots.iter().map(|slot| &slot.beat)
    }

    /// Number of tracked beats.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no beat had room to begin with.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Writes the working counters back over the beat list the tracker was
    /// built from, matching entries by position.
    ///
    /// Beats the tracker never held are returned unchanged.
    #[must_use]
    pub fn apply_to(&self, beats: &[Beat]) -> Vec<Beat> {
        let mut updated = beats.to_vec();
        for slot in &self.slots {
            if let Some(beat) = updated.get_mut(slot.source) {
                beat.current_assigned = slot.beat.current_assigned;
            }
        }
        updated
    }

    fn with_id<'a>(&'a self, beat_id: &'a str) -> impl Iterator<Item = &'a Beat> {
        self.beats().filter(move |beat| beat.id == beat_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn beat(id: &str, max_capacity: u32, current_assigned: u32) -> Beat {
        Beat {
            id: id.to_string(),
            name: format!("Beat {id}"),
            station_id: "PS-1".to_string(),
            post_id: format!("PP-{id}"),
            max_capacity,
            current_assigned,
            available_officers: 2,
        }
    }

    fn ids(tracker: &CapacityTracker) -> Vec<&str> {
        tracker.beats().map(|b| b.id.as_str()).collect()
    }

    #[test]
    fn only_beats_with_room_are_tracked() {
        let tracker = CapacityTracker::from_beats(&[
            beat("FULL", 2, 2),
            beat("OVER", 2, 5),
            beat("OPEN", 3, 1),
            beat("ZERO", 0, 0),
        ]);
        assert_eq!(ids(&tracker), vec!["OPEN"]);
        assert_eq!(tracker.len(), 1);
        assert!(!tracker.has_capacity("FULL"));
        assert!(!tracker.has_capacity("MISSING"));
    }

    #[test]
    fn commit_consumes_capacity() {
        let mut tracker = CapacityTracker::from_beats(&[beat("B1", 2, 0)]);
        assert_eq!(tracker.remaining("B1"), Some(2));

        assert!(tracker.commit("B1"));
        assert!(tracker.has_capacity("B1"));
        assert!(tracker.commit("B1"));
        assert!(!tracker.has_capacity("B1"));
        assert_eq!(tracker.remaining("B1"), Some(0));
        assert!(tracker.first_available().is_none());
    }

    #[test]
    fn full_beats_refuse_commits() {
        let mut tracker = CapacityTracker::from_beats(&[beat("B1", 1, 0)]);
        assert!(tracker.commit_at(0));
        assert!(!tracker.commit_at(0));
        assert!(!tracker.commit("B1"));
        assert!(!tracker.commit_at(7));
        assert_eq!(tracker.beats().next().map(|b| b.current_assigned), Some(1));
    }

    #[test]
    fn first_available_skips_exhausted_beats() {
        let mut tracker = CapacityTracker::from_beats(&[beat("A", 1, 0), beat("B", 1, 0)]);
        let (index, first) = tracker.first_available().unwrap();
        assert_eq!((index, first.id.as_str()), (0, "A"));

        tracker.commit_at(index);
        let (index, next) = tracker.first_available().unwrap();
        assert_eq!((index, next.id.as_str()), (1, "B"));
    }

    #[test]
    fn commit_unknown_beat_is_a_no_op() {
        let mut tracker = CapacityTracker::from_beats(&[beat("A", 1, 0)]);
        assert!(!tracker.commit("Z"));
        assert_eq!(tracker.remaining("A"), Some(1));
    }

    #[test]
    fn apply_to_updates_tracked_beats_only() {
        let beats = vec![beat("FULL", 2, 2), beat("OPEN", 3, 1)];
        let mut tracker = CapacityTracker::from_beats(&beats);
        tracker.commit("OPEN");

        let updated = tracker.apply_to(&beats);
        assert_eq!(updated[0], beats[0]);
        assert_eq!(updated[1].current_assigned, 2);
    }

    #[test]
    fn beats_sharing_an_id_keep_separate_counters() {
        let mut first = beat("A", 1, 0);
        first.post_id = "P1".to_string();
        let mut second = beat("A", 2, 0);
        second.post_id = "P2".to_string();
        let beats = vec![first, second];

        let mut tracker = CapacityTracker::from_beats(&beats);
        assert_eq!(tracker.remaining("A"), Some(3));

        while let Some((index, _)) = tracker.first_available() {
            assert!(tracker.commit_at(index));
        }
        assert!(!tracker.has_capacity("A"));

        let updated = tracker.apply_to(&beats);
        assert_eq!(updated[0].post_id, "P1");
        assert_eq!(updated[0].current_assigned, 1);
        assert_eq!(updated[1].post_id, "P2");
        assert_eq!(updated[1].max_capacity, 2);
        assert_eq!(updated[1].current_assigned, 2);
    }
}
