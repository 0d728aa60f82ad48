use super::model::{Sample, UnifiedDataset};

// ---------------------------------------------------------------------------
// Per-test selection
// ---------------------------------------------------------------------------

/// Samples belonging to `test_id`, in their original order.
///
/// An unknown id is not an error; it simply selects nothing.
pub fn samples_for<'a>(
    dataset: &'a UnifiedDataset,
    test_id: &'a str,
) -> impl Iterator<Item = &'a Sample> + 'a {
    dataset.samples.iter().filter(move |s| s.test_id == test_id)
}

/// Group the dataset by test run, keeping run order.
pub fn group_by_test(dataset: &UnifiedDataset) -> Vec<(&str, Vec<&Sample>)> {
    dataset
        .test_ids
        .iter()
        .map(|id| (id.as_str(), samples_for(dataset, id).collect()))
        .collect()
}
