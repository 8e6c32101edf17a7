// Quick sort with Lomuto partitioning

use crate::array::VisualArray;
use crate::errors::ArrayError;

pub const DESCRIPTION: &str = concat!(
    "Quick sort is a commonly used algorithm with a worst case runtime complexity of O(n^2).\n",
    "Although on average, it has a time complexity of O(n log n). The last element of each ",
    "range is used as the pivot; smaller values are moved in front of it, larger ones behind, ",
    "and both sides are sorted the same way.\n",
    "Like the name suggests, quick sort is pretty quick."
);

pub fn sort(arr: &mut dyn VisualArray) -> Result<(), ArrayError> {
    match arr.len() {
        0 => Ok(()),
        len => sort_range(arr, 0, len - 1),
    }
}

/// Sort the inclusive range `[min, max]`
fn sort_range(arr: &mut dyn VisualArray, min: usize, max: usize) -> Result<(), ArrayError> {
    if min >= max {
        return Ok(());
    }

    let pivot = partition(arr, min, max)?;

    if pivot > min {
        sort_range(arr, min, pivot - 1)?;
    }
    sort_range(arr, pivot + 1, max)
}

/// Returns the pivot's final index
fn partition(arr: &mut dyn VisualArray, min: usize, max: usize) -> Result<usize, ArrayError> {
    arr.mark_index(max, true)?;

    let mut store = min;
    for j in min..max {
        let comparison = arr.compare_indexes(j, max)?;
        arr.take_snapshot()?;

        if comparison.is_less_or_equal() {
            arr.swap(store, j)?;
            arr.take_snapshot()?;
            store += 1;
        }
    }

    arr.unmark(max)?;
    arr.swap(store, max)?;
    arr.take_snapshot()?;
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::highlight::HighlightKind;
    use crate::array::RecordingArray;

    #[test]
    fn test_first_partition_uses_last_element() {
        let mut arr = RecordingArray::with_log(vec![5, 3, 8, 4, 2]);
        sort(&mut arr).unwrap();
        assert_eq!(arr.values(), &[2, 3, 4, 5, 8]);

        let log = arr.into_sink();
        // Pivot 2 is smaller than everything: 4 comparison frames, then it lands at 0
        for frame in log.iter().take(4) {
            assert_eq!(frame.highlighting().kind_at(4), HighlightKind::Index);
            assert_eq!(frame.values(), &[5, 3, 8, 4, 2]);
        }
        let placed = log.get(4).unwrap();
        assert_eq!(placed.values(), &[2, 3, 8, 4, 5]);
        assert_eq!(placed.highlighting().kind_at(0), HighlightKind::Move);
        assert_eq!(placed.highlighting().kind_at(4), HighlightKind::Move);
    }

    #[test]
    fn test_small_inputs_do_nothing() {
        for values in [vec![], vec![7]] {
            let mut arr = RecordingArray::with_log(values.clone());
            sort(&mut arr).unwrap();
            assert_eq!(arr.values(), values.as_slice());
            assert_eq!(arr.stats().total(), 0);
            assert!(arr.into_sink().is_empty());
        }
    }

    #[test]
    fn test_duplicates() {
        let mut arr = RecordingArray::with_log(vec![3, 1, 3, 1, 2, 2]);
        sort(&mut arr).unwrap();
        assert_eq!(arr.values(), &[1, 1, 2, 2, 3, 3]);
    }
}
