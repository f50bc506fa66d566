//! Built-in annotation formatters
//!
//! Two label conventions are produced for every matched control:
//!
//! - one key per standard, `control.compliance.openshift.io/<standard>`,
//!   listing its controls separated by `;`
//! - the Open Cluster Management policy keys, where standards and controls
//!   each go into a single `,`-separated list

use super::Annotations;

/// Key prefix of the per-standard control annotation
pub const CONTROL_ANNOTATION_BASE: &str = "control.compliance.openshift.io/";

/// Open Cluster Management standards annotation
pub const RHACM_STANDARDS_ANNOTATION: &str = "policies.open-cluster-management.io/standards";

/// Open Cluster Management controls annotation
pub const RHACM_CONTROLS_ANNOTATION: &str = "policies.open-cluster-management.io/controls";

const CONTROL_SEPARATOR: &str = ";";
const RHACM_SEPARATOR: &str = ",";

/// Add `item` to the separator-delimited list stored under `key`
///
/// Creates the entry if missing; an item already in the list is not added
/// again.
pub fn append_with_separator(annotations: &mut Annotations, key: &str, item: &str, sep: &str) {
    match annotations.get_mut(key) {
        None => {
            annotations.insert(key.to_string(), item.to_string());
        }
        Some(current) => {
            if current.split(sep).any(|existing| existing == item) {
                return;
            }
            current.push_str(sep);
            current.push_str(item);
        }
    }
}

/// Per-standard control list
pub fn control_formatter(annotations: &mut Annotations, standard: &str, control: &str) {
    let key = format!("{}{}", CONTROL_ANNOTATION_BASE, standard);
    append_with_separator(annotations, &key, control, CONTROL_SEPARATOR);
}

/// Open Cluster Management standards and controls lists
pub fn rhacm_formatter(annotations: &mut Annotations, standard: &str, control: &str) {
    append_with_separator(annotations, RHACM_STANDARDS_ANNOTATION, standard, RHACM_SEPARATOR);
    append_with_separator(annotations, RHACM_CONTROLS_ANNOTATION, control, RHACM_SEPARATOR);
}
