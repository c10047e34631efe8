use super::{QajsonCheck, QajsonFile};
use crate::checker::CheckRegistry;
use crate::scan::FileCategory;

/// Rewrites `checks` so every supported check runs on a single file.
///
/// Checks the registry does not know are kept first, unchanged. Each
/// supported check is then cloned once per entry of `files` whose category
/// it targets, with that file as its only input and an empty output slot.
/// Clones are ordered by file, then by original check order.
#[must_use]
pub fn expand_per_file(
    checks: &[QajsonCheck],
    files: &[(String, FileCategory)],
    registry: &CheckRegistry,
) -> Vec<QajsonCheck> {
    let (supported, mut expanded): (Vec<&QajsonCheck>, Vec<QajsonCheck>) = checks.iter().fold(
        (Vec::new(), Vec::new()),
        |(mut supported, mut other), check| {
            if registry.get(&check.info.id, &check.info.version).is_some() {
                supported.push(check);
            } else {
                other.push(check.clone());
            }
            (supported, other)
        },
    );

    for (path, category) in files {
        for check in &supported {
            let targets = registry
                .get(&check.info.id, &check.info.version)
                .is_some_and(|found| found.category() == *category);
            if !targets {
                continue;
            }
            let mut clone = (*check).clone();
            clone.outputs = None;
            clone.inputs.files = vec![QajsonFile {
                path: path.clone(),
                file_type: category.as_str().to_string(),
                ..QajsonFile::default()
            }];
            expanded.push(clone);
        }
    }
    expanded
}
