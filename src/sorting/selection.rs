// Selection sort

use crate::array::VisualArray;
use crate::errors::ArrayError;

pub const DESCRIPTION: &str = concat!(
    "Selection sort sorts by finding the smallest value and bringing it to the beginning.\n",
    "Similar to bubble sorting, it splits the array into a sorted side and an unsorted side. ",
    "It swaps less compared to bubble sorting, as it only swaps after searching the entire ",
    "unsorted subarray.\n",
    "The time complexity is O(n^2) and the space complexity is O(1)."
);

pub fn sort(arr: &mut dyn VisualArray) -> Result<(), ArrayError> {
    let len = arr.len();

    for i in 0..len.saturating_sub(1) {
        // Slot being filled this iteration
        arr.mark_index(i, true)?;
        let mut min_index = i;

        for j in i + 1..len {
            if arr.compare_indexes(j, min_index)?.is_less() {
                min_index = j;
            }
            // Running minimum shows as an index marker on this frame
            arr.mark_index(min_index, false)?;
            arr.take_snapshot()?;
        }

        arr.unmark(i)?;
        arr.swap(i, min_index)?;
        arr.take_snapshot()?;
    }

    Ok(())
}
