// Bubble sort

use crate::array::VisualArray;
use crate::errors::ArrayError;

pub const DESCRIPTION: &str = concat!(
    "Bubble sort is a simple sorting algorithm that compares 2 adjacent values and swaps them ",
    "if they're not in relative order. As a side effect of this, the largest values \"bubble\" ",
    "to the top.\n",
    "The array is split into 2 sections: sorted and unsorted. Each pass stops one element ",
    "earlier, and the sort ends early after a pass without swaps.\n",
    "The time complexity is O(n^2) and the space complexity is O(1)."
);

pub fn sort(arr: &mut dyn VisualArray) -> Result<(), ArrayError> {
    let len = arr.len();

    for pass in 0..len.saturating_sub(1) {
        // Boundary of the settled suffix stays highlighted for the whole pass
        let sorted_index = len - pass - 1;
        arr.mark_index(sorted_index, true)?;

        let mut swapped = false;
        for j in 0..sorted_index {
            let comparison = arr.compare_indexes(j, j + 1)?;
            arr.take_snapshot()?;

            if comparison.is_greater() {
                arr.swap(j, j + 1)?;
                swapped = true;
                arr.take_snapshot()?;
            }
        }

        arr.unmark(sorted_index)?;

        if !swapped {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::highlight::HighlightKind;
    use crate::array::RecordingArray;

    #[test]
    fn test_three_elements() {
        let mut arr = RecordingArray::with_log(vec![3, 1, 2]);
        sort(&mut arr).unwrap();
        assert_eq!(arr.values(), &[1, 2, 3]);
        assert_eq!(arr.stats().comparisons, 3);
        assert_eq!(arr.stats().swaps, 2);

        let log = arr.into_sink();
        // 3 comparison frames + 2 swap frames
        assert_eq!(log.len(), 5);

        let swap_frames: Vec<Vec<i64>> = log
            .iter()
            .filter(|s| {
                s.highlighting()
                    .iter_sorted()
                    .iter()
                    .any(|(_, tag)| tag.kind == HighlightKind::Move)
            })
            .map(|s| s.values().to_vec())
            .collect();
        assert_eq!(swap_frames, vec![vec![1, 3, 2], vec![1, 2, 3]]);
    }

    #[test]
    fn test_boundary_marker_is_permanent_during_pass() {
        let mut arr = RecordingArray::with_log(vec![2, 1, 3]);
        sort(&mut arr).unwrap();
        // Nothing is left highlighted once the sort returns
        assert!(arr.capture().highlighting().is_empty());

        // Frames of the first pass carry the boundary at index 2
        let log = arr.into_sink();
        let first = log.get(0).unwrap();
        assert_eq!(first.highlighting().kind_at(2), HighlightKind::Index);
        assert!(first.highlighting().get(2).unwrap().permanent);
    }

    #[test]
    fn test_sorted_input_exits_after_one_pass() {
        let mut arr = RecordingArray::with_log(vec![1, 2, 3, 4, 5]);
        sort(&mut arr).unwrap();
        assert_eq!(arr.stats().comparisons, 4);
        assert_eq!(arr.stats().swaps, 0);
        assert_eq!(arr.into_sink().len(), 4);
    }
}
