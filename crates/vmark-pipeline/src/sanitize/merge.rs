//! Deep merge of schema fragments onto the default schema.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How arrays combine when a fragment overrides the schema.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrayMerge {
    /// Fragment array replaces the base array.
    #[default]
    Replace,
    /// Fragment items are appended to the base array.
    Concat,
    /// Like `Concat`, skipping items already present.
    Union,
}

/// Strategy overrides for [`deep_merge`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MergeOptions {
    /// Array combination strategy.
    pub array_merge: ArrayMerge,
}

/// Sanitizer configuration: a schema fragment plus merge strategy.
///
/// The fragment is plain JSON in the [`Schema`](super::Schema) shape and is
/// merged onto the default schema before deserializing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SanitizeOptions {
    /// Schema fragment merged onto the default schema.
    pub schema: Option<Value>,
    /// Merge strategy overrides.
    pub merge: MergeOptions,
}

impl SanitizeOptions {
    /// Set the schema fragment.
    #[must_use]
    pub fn with_schema(mut self, schema: Value) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Set the array merge strategy.
    #[must_use]
    pub fn with_array_merge(mut self, array_merge: ArrayMerge) -> Self {
        self.merge.array_merge = array_merge;
        self
    }
}

/// Merge `overlay` onto `base`.
///
/// Objects merge key by key, recursively. Arrays follow
/// [`MergeOptions::array_merge`]. Any other overlay value replaces the base.
#[must_use]
pub fn deep_merge(base: Value, overlay: Value, options: MergeOptions) -> Value {
    match (base, overlay) {
        (Value::Object(mut base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                let merged = match base.remove(&key) {
                    Some(existing) => deep_merge(existing, value, options),
                    None => value,
                };
                base.insert(key, merged);
            }
            Value::Object(base)
        }
        (Value::Array(mut base), Value::Array(overlay)) => match options.array_merge {
            ArrayMerge::Replace => Value::Array(overlay),
            ArrayMerge::Concat => {
                base.extend(overlay);
                Value::Array(base)
            }
            ArrayMerge::Union => {
                for item in overlay {
                    if !base.contains(&item) {
                        base.push(item);
                    }
                }
                Value::Array(base)
            }
        },
        (_, overlay) => overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_objects_merge_recursively() {
        let merged = deep_merge(
            json!({"a": {"x": 1, "y": 2}, "b": true}),
            json!({"a": {"y": 3}}),
            MergeOptions::default(),
        );
        assert_eq!(merged, json!({"a": {"x": 1, "y": 3}, "b": true}));
    }

    #[test]
    fn test_arrays_replace_by_default() {
        let merged = deep_merge(json!({"t": ["a", "b"]}), json!({"t": ["c"]}), MergeOptions::default());
        assert_eq!(merged, json!({"t": ["c"]}));
    }

    #[test]
    fn test_arrays_concat() {
        let options = MergeOptions {
            array_merge: ArrayMerge::Concat,
        };
        let merged = deep_merge(json!(["a", "b"]), json!(["b", "c"]), options);
        assert_eq!(merged, json!(["a", "b", "b", "c"]));
    }

    #[test]
    fn test_arrays_union() {
        let options = MergeOptions {
            array_merge: ArrayMerge::Union,
        };
        let merged = deep_merge(json!(["a", "b"]), json!(["b", "c"]), options);
        assert_eq!(merged, json!(["a", "b", "c"]));
    }

    #[test]
    fn test_scalar_replaces() {
        assert_eq!(
            deep_merge(json!({"p": "x"}), json!({"p": null}), MergeOptions::default()),
            json!({"p": null})
        );
    }

    #[test]
    fn test_options_deserialize() {
        let options: SanitizeOptions =
            serde_json::from_value(json!({"merge": {"arrayMerge": "concat"}})).unwrap();
        assert_eq!(options.merge.array_merge, ArrayMerge::Concat);
        assert_eq!(options.schema, None);
    }
}
