// Insertion sort (backward-swap form)

use crate::array::VisualArray;
use crate::errors::ArrayError;

pub const DESCRIPTION: &str = concat!(
    "Insertion sort is a common algorithm used to sort cards in real life.\n",
    "The array is split into 2 sections, a (relatively) sorted and unsorted subarray. ",
    "Elements are taken from the unsorted side and are inserted in the sorted side in order.\n",
    "The time complexity is O(n^2) and the space complexity is O(1)."
);

pub fn sort(arr: &mut dyn VisualArray) -> Result<(), ArrayError> {
    for i in 1..arr.len() {
        for j in (0..i).rev() {
            let comparison = arr.compare_indexes(j, j + 1)?;
            arr.take_snapshot()?;

            if !comparison.is_greater() {
                break;
            }
            arr.swap(j, j + 1)?;
            arr.take_snapshot()?;
        }
    }

    Ok(())
}
