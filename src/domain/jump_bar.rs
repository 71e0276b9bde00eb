//! Jump bar label positions.
//!
//! Computes where each section starts as a fraction of the total content
//! height, so a narrow strip next to the scrollbar can show letters (or any
//! short labels) that jump to the corresponding group when clicked.

use crate::domain::flatten::VirtualItem;
use crate::traits::{Group, GroupId};

/// One label on the jump bar.
#[derive(Debug, Clone, PartialEq)]
pub struct JumpTarget {
    pub label: String,
    /// Group the label navigates to (the first group of its section)
    pub group_id: GroupId,
    /// Start of the section as a fraction of the total content height
    pub fraction: f32,
}

/// Short label for a group: the uppercased first character of its label.
pub fn section_label(label: &str) -> String {
    label
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_else(|| "?".to_string())
}

/// Computes jump bar targets from the flattened headers.
///
/// Consecutive groups sharing a section label collapse into one target.
/// Targets closer together than `cluster_threshold` (as a fraction of the
/// content) are merged, keeping the section with the most members.
pub fn compute_positions<T>(
    items: &[VirtualItem],
    groups: &[Group<T>],
    total_height: f32,
    cluster_threshold: f32,
) -> Vec<JumpTarget> {
    if total_height <= 0.0 {
        return Vec::new();
    }

    // (target, member count) per section
    let mut sections: Vec<(JumpTarget, usize)> = Vec::new();

    for item in items.iter().filter(|item| item.is_header()) {
        let Some(group) = groups.get(item.group_index) else {
            continue;
        };
        let label = section_label(&group.label);
        let members = group.members.len();

        match sections.last_mut() {
            Some((last, count)) if last.label == label => *count += members,
            _ => sections.push((
                JumpTarget {
                    label,
                    group_id: group.id.clone(),
                    fraction: item.top / total_height,
                },
                members,
            )),
        }
    }

    cluster_labels(sections, cluster_threshold)
}

/// Clusters labels that are too close together, keeping the one with highest count.
fn cluster_labels(sections: Vec<(JumpTarget, usize)>, threshold: f32) -> Vec<JumpTarget> {
    let mut clustered = Vec::new();
    let mut i = 0;

    while i < sections.len() {
        let mut cluster_end = i + 1;

        // Find all labels within threshold distance.
        while cluster_end < sections.len() {
            let distance = sections[cluster_end].0.fraction - sections[i].0.fraction;
            if distance >= threshold {
                break;
            }
            cluster_end += 1;
        }

        // Ties go to the earliest section.
        let mut best = i;
        for candidate in i + 1..cluster_end {
            if sections[candidate].1 > sections[best].1 {
                best = candidate;
            }
        }

        clustered.push(sections[best].0.clone());
        i = cluster_end;
    }

    clustered
}
