//! One-level-deep JSON merge for partial preference updates.

use serde_json::Value;

/// Merge `patch` into `base`.
///
/// Top-level keys of `patch` replace those of `base`, except when both sides
/// hold objects: then the nested keys are merged individually, so
/// `{notifications: {digestFrequency: "monthly"}}` keeps sibling
/// notification fields. Merging stops at that depth; deeper objects are
/// replaced wholesale. A non-object `patch` replaces `base` entirely.
pub fn merge_one_level(base: &mut Value, patch: &Value) {
    let (Some(base_map), Some(patch_map)) = (base.as_object_mut(), patch.as_object()) else {
        *base = patch.clone();
        return;
    };
    for (key, patch_value) in patch_map {
        match (base_map.get_mut(key), patch_value) {
            (Some(Value::Object(nested)), Value::Object(nested_patch)) => {
                for (inner_key, inner_value) in nested_patch {
                    nested.insert(inner_key.clone(), inner_value.clone());
                }
            }
            _ => {
                base_map.insert(key.clone(), patch_value.clone());
            }
        }
    }
}
