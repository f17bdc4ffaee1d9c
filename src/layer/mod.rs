use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};
use thiserror::Error;

const SEP: &str = "_";

const CONSTANTS_KEY: &str = "_constants";
const PARENT_ATTRIBUTE_KEY: &str = "_parentAttribute";
const FRANCA_IDL_KEY: &str = "_francaIDL";
const CUSTOM_KEY: &str = "_custom";
const DISPATCHER_KEY: &str = "_dispatcher";
const METHODS_KEY: &str = "methods";
const OPTIONS_KEY: &str = "options";
const WRITE_METHOD: &str = "write";

#[derive(Error, Debug)]
pub enum LayerError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse layer YAML: {0}")]
    ParseYaml(#[from] serde_yaml::Error),
    #[error("layer root is not a mapping")]
    NotAMapping,
}

/// Deployment layer overlay: the parsed document plus the name sets derived
/// from it once at construction. Read-only for the rest of the invocation.
pub struct Layer {
    qualified_names: HashSet<String>,
    list_node_names: HashSet<String>,
    write_node_names: HashSet<String>,
    parent_attribute_names: HashSet<String>,
}

impl Layer {
    pub fn from_file(path: &Path) -> Result<Layer, LayerError> {
        let raw = std::fs::read_to_string(path).map_err(|source| LayerError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        match serde_yaml::from_str::<Value>(&raw)? {
            Value::Mapping(tree) => Ok(Layer::from_mapping(&tree)),
            _ => Err(LayerError::NotAMapping),
        }
    }

    pub fn from_mapping(tree: &Mapping) -> Layer {
        let mut qualified_names = HashSet::new();
        collect_qualified_names(tree, "", &mut qualified_names);

        let mut list_node_names = HashSet::new();
        let mut write_node_names = HashSet::new();
        let mut parent_attribute_names = HashSet::new();
        for_each_name_value(tree, "", &mut |name, value| {
            if is_list_value(value) {
                list_node_names.insert(name.to_string());
            }
            if let Some(entry) = effective_mapping(value) {
                if entry
                    .values()
                    .any(|child| matches!(child, Value::Mapping(m) if has_write(m)))
                {
                    write_node_names.insert(name.to_string());
                }
                if entry.values().any(|child| {
                    matches!(child, Value::Mapping(m) if m.contains_key(PARENT_ATTRIBUTE_KEY))
                }) {
                    parent_attribute_names.insert(name.to_string());
                }
            }
        });

        Layer {
            qualified_names,
            list_node_names,
            write_node_names,
            parent_attribute_names,
        }
    }

    /// Every qualified name reachable in the overlay; the layer-membership
    /// filter predicate is built from this set.
    pub fn qualified_names(&self) -> &HashSet<String> {
        &self.qualified_names
    }

    /// Whether the overlay declares `name` as a repeated (list) structure.
    pub fn is_list_node(&self, name: &str) -> bool {
        self.list_node_names.contains(name)
    }

    /// Whether the overlay declares `name` as externally writable.
    pub fn is_write_node(&self, name: &str) -> bool {
        self.write_node_names.contains(name)
    }

    /// Whether some child entry of `name` carries a `_parentAttribute`
    /// marker, making it eligible for input-declaration merging.
    pub fn has_parent_attribute(&self, name: &str) -> bool {
        self.parent_attribute_names.contains(name)
    }
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}{SEP}{key}")
    }
}

/// Enumerate every qualified name in the overlay. Keys starting with `_`
/// are directive keys, not naming segments, except that `_constants`
/// synthesizes one sibling name per key of its first group.
fn collect_qualified_names(entry: &Mapping, path: &str, out: &mut HashSet<String>) {
    for (key, value) in entry {
        let Some(key) = key.as_str() else { continue };
        if key == CONSTANTS_KEY {
            collect_constant_names(value, path, out);
            continue;
        }
        if key.starts_with('_') {
            continue;
        }
        let cur_name = join(path, key);
        match value {
            Value::Mapping(nested) => collect_qualified_names(nested, &cur_name, out),
            Value::Sequence(elements) => {
                // Every element of a list contributes under the same name.
                for element in elements {
                    if let Value::Mapping(nested) = element {
                        collect_qualified_names(nested, &cur_name, out);
                    }
                }
            }
            _ => {}
        }
        out.insert(cur_name);
    }
}

fn collect_constant_names(groups: &Value, path: &str, out: &mut HashSet<String>) {
    let Value::Mapping(groups) = groups else { return };
    let mut first: Option<&Mapping> = None;
    for group in groups.values() {
        let Value::Mapping(group) = group else { continue };
        match first {
            None => first = Some(group),
            Some(reference) => {
                // Only the first group is enumerated; diverging siblings
                // would silently lose names, so call it out.
                let reference_keys: HashSet<&Value> = reference.keys().collect();
                let group_keys: HashSet<&Value> = group.keys().collect();
                if reference_keys != group_keys {
                    log::warn!(
                        "constants groups under '{path}' disagree on their key sets; \
                         only the first group is used"
                    );
                }
            }
        }
    }
    if let Some(group) = first {
        for key in group.keys() {
            if let Some(key) = key.as_str() {
                out.insert(join(path, key));
            }
        }
    }
}

/// Visit every (qualified name, value) pair under non-directive keys.
/// Containers are visited both recursively and as entries of their own.
fn for_each_name_value<'a>(
    entry: &'a Mapping,
    path: &str,
    visit: &mut impl FnMut(&str, &'a Value),
) {
    for (key, value) in entry {
        let Some(key) = key.as_str() else { continue };
        if key.starts_with('_') {
            continue;
        }
        let cur_name = join(path, key);
        match value {
            Value::Mapping(nested) => for_each_name_value(nested, &cur_name, visit),
            Value::Sequence(elements) => {
                for element in elements {
                    if let Value::Mapping(nested) = element {
                        for_each_name_value(nested, &cur_name, visit);
                    }
                }
            }
            _ => {}
        }
        visit(&cur_name, value);
    }
}

/// A name is a list node if its value is a sequence, or a mapping holding a
/// `_constants` group (constants groups are repeated for numbering even
/// though structurally a mapping).
fn is_list_value(value: &Value) -> bool {
    match value {
        Value::Sequence(_) => true,
        Value::Mapping(m) => m.contains_key(CONSTANTS_KEY),
        _ => false,
    }
}

/// The mapping to inspect for write/parent-attribute evidence: the value
/// itself, or its first element when the value is a list.
fn effective_mapping(value: &Value) -> Option<&Mapping> {
    match value {
        Value::Mapping(m) => Some(m),
        Value::Sequence(elements) => match elements.first() {
            Some(Value::Mapping(m)) => Some(m),
            _ => None,
        },
        _ => None,
    }
}

/// `methods` containers appear both as sequences and as mappings in layer
/// files; membership has to cover both shapes.
fn methods_contain_write(methods: &Value) -> bool {
    match methods {
        Value::Sequence(elements) => elements
            .iter()
            .any(|m| m.as_str() == Some(WRITE_METHOD)),
        Value::Mapping(m) => m.contains_key(WRITE_METHOD),
        _ => false,
    }
}

fn entry_has_method_write(entry: &Mapping, key: &str) -> bool {
    match entry.get(key) {
        Some(Value::Mapping(inner)) => inner
            .get(METHODS_KEY)
            .is_some_and(methods_contain_write),
        _ => false,
    }
}

fn entry_has_dispatcher_write(entry: &Mapping) -> bool {
    let Some(Value::Mapping(dispatcher)) = entry.get(DISPATCHER_KEY) else {
        return false;
    };
    match dispatcher.get(OPTIONS_KEY) {
        Some(Value::Sequence(options)) => options.iter().any(
            |o| matches!(o, Value::Mapping(m) if entry_has_method_write(m, FRANCA_IDL_KEY)),
        ),
        _ => false,
    }
}

/// Write capability may be declared directly (`_francaIDL`), through a
/// custom handler (`_custom`), or via a dispatch table of routing options
/// (`_dispatcher`); all three count as write evidence.
fn has_write(entry: &Mapping) -> bool {
    entry_has_method_write(entry, FRANCA_IDL_KEY)
        || entry_has_dispatcher_write(entry)
        || entry_has_method_write(entry, CUSTOM_KEY)
}
