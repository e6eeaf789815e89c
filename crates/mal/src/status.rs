//! Status and rating translation between the canonical list model and the
//! service-native representation.

use anisync_core::ListStatus;

use crate::models::MalListStatus;

/// Map a native status to the canonical one. Total and deterministic. The
/// canonical model has no paused state, so `on_hold` reads as `current`.
pub fn mal_status_to_list(status: MalListStatus) -> ListStatus {
    match status {
        MalListStatus::Watching => ListStatus::Current,
        MalListStatus::Completed => ListStatus::Completed,
        MalListStatus::OnHold => ListStatus::Current,
        MalListStatus::Dropped => ListStatus::Dropped,
        MalListStatus::PlanToWatch => ListStatus::Planning,
    }
}

/// Map a canonical status to the pair (native status, rewatching flag).
///
/// The service has no repeating status; `repeating` is encoded as watching
/// with the rewatching flag set. This function is the sole authority for the
/// flag on writes.
pub fn list_status_to_mal(status: Option<ListStatus>) -> (Option<MalListStatus>, bool) {
    match status {
        None => (None, false),
        Some(ListStatus::Planning) => (Some(MalListStatus::PlanToWatch), false),
        Some(ListStatus::Current) => (Some(MalListStatus::Watching), false),
        Some(ListStatus::Completed) => (Some(MalListStatus::Completed), false),
        Some(ListStatus::Dropped) => (Some(MalListStatus::Dropped), false),
        Some(ListStatus::Repeating) => (Some(MalListStatus::Watching), true),
    }
}

/// Convert a 0-100 rating to the native 0-10 score: divide by ten with ties
/// rounding up. Entry validation rejects out-of-range input before this runs;
/// the clamp still holds for direct callers.
pub fn rating_to_score(rating: i32) -> u8 {
    ((rating.clamp(0, 100) + 5) / 10) as u8
}

/// Convert a native 0-10 score back to the 0-100 scale.
pub fn score_to_rating(score: u8) -> i32 {
    i32::from(score) * 10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_statuses_map_to_documented_canonical_values() {
        assert_eq!(mal_status_to_list(MalListStatus::Watching), ListStatus::Current);
        assert_eq!(mal_status_to_list(MalListStatus::Completed), ListStatus::Completed);
        assert_eq!(mal_status_to_list(MalListStatus::OnHold), ListStatus::Current);
        assert_eq!(mal_status_to_list(MalListStatus::Dropped), ListStatus::Dropped);
        assert_eq!(mal_status_to_list(MalListStatus::PlanToWatch), ListStatus::Planning);
    }

    #[test]
    fn repeating_becomes_watching_with_flag() {
        assert_eq!(
            list_status_to_mal(Some(ListStatus::Repeating)),
            (Some(MalListStatus::Watching), true)
        );
    }

    #[test]
    fn non_repeating_statuses_clear_the_flag() {
        assert_eq!(
            list_status_to_mal(Some(ListStatus::Dropped)),
            (Some(MalListStatus::Dropped), false)
        );
        assert_eq!(
            list_status_to_mal(Some(ListStatus::Current)),
            (Some(MalListStatus::Watching), false)
        );
        assert_eq!(
            list_status_to_mal(Some(ListStatus::Planning)),
            (Some(MalListStatus::PlanToWatch), false)
        );
    }

    #[test]
    fn absent_status_maps_to_absent_pair() {
        assert_eq!(list_status_to_mal(None), (None, false));
    }

    #[test]
    fn score_round_trip_is_lossless() {
        for score in 0..=10u8 {
            assert_eq!(score_to_rating(score), i32::from(score) * 10);
            assert_eq!(rating_to_score(score_to_rating(score)), score);
        }
    }

    #[test]
    fn rating_conversion_rounds_ties_up() {
        assert_eq!(rating_to_score(95), 10);
        assert_eq!(rating_to_score(94), 9);
        assert_eq!(rating_to_score(5), 1);
        assert_eq!(rating_to_score(4), 0);
    }

    #[test]
    fn rating_conversion_clamps_out_of_range_input() {
        assert_eq!(rating_to_score(-20), 0);
        assert_eq!(rating_to_score(150), 10);
    }
}
