use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde_yaml::{Mapping, Value};
use thiserror::Error;

use super::datatype::DataType;
use super::tree::{add_child, NodeRef, VssKind, VssNode};

const INCLUDE_DIRECTIVE: &str = "#include";

const KEY_TYPE: &str = "type";
const KEY_DATATYPE: &str = "datatype";
const KEY_DESCRIPTION: &str = "description";
const KEY_UNIT: &str = "unit";
const KEY_MIN: &str = "min";
const KEY_MAX: &str = "max";
const KEY_ENUM: &str = "enum";
const KEY_ALLOWED: &str = "allowed";
const KEY_DEPRECATION: &str = "deprecation";
const KEY_CHILDREN: &str = "children";

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse vspec YAML: {0}")]
    ParseYaml(#[from] serde_yaml::Error),
    #[error("vspec root of {0} is not a mapping")]
    NotAMapping(PathBuf),
    #[error("include file {0} not found in include path")]
    IncludeNotFound(String),
}

/// Load a vspec file into a forest of root nodes.
///
/// Top-level and `children` keys may be plain names or dotted paths; dotted
/// segments create intermediate branches. `#include <file> [prefix]` lines
/// are resolved against the file's own directory followed by `include_dirs`
/// and grafted under the dotted prefix.
pub fn load_tree(path: &Path, include_dirs: &[PathBuf]) -> Result<Vec<NodeRef>, LoadError> {
    let raw = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut includes: Vec<(String, Option<String>)> = Vec::new();
    let mut yaml_text = String::new();
    for line in raw.lines() {
        if let Some(rest) = line.trim_start().strip_prefix(INCLUDE_DIRECTIVE) {
            let mut parts = rest.split_whitespace();
            if let Some(file) = parts.next() {
                includes.push((file.to_string(), parts.next().map(str::to_string)));
                continue;
            }
        }
        yaml_text.push_str(line);
        yaml_text.push('\n');
    }

    let mut roots: Vec<NodeRef> = Vec::new();
    match serde_yaml::from_str::<Value>(&yaml_text)? {
        Value::Mapping(tree) => insert_entries(&mut roots, None, &tree)?,
        Value::Null => {}
        _ => return Err(LoadError::NotAMapping(path.to_path_buf())),
    }

    for (file, prefix) in includes {
        let resolved = resolve_include(&file, path, include_dirs)?;
        log::debug!("including {} under {:?}", resolved.display(), prefix);
        let sub_roots = load_tree(&resolved, include_dirs)?;
        let anchor = prefix
            .as_deref()
            .map(|p| ensure_path(&mut roots, p))
            .transpose()?;
        for sub in sub_roots {
            graft(&mut roots, anchor.as_ref(), sub);
        }
    }

    Ok(roots)
}

fn resolve_include(
    file: &str,
    from: &Path,
    include_dirs: &[PathBuf],
) -> Result<PathBuf, LoadError> {
    let own_dir = from.parent().map(Path::to_path_buf).unwrap_or_default();
    for dir in std::iter::once(&own_dir).chain(include_dirs.iter()) {
        let candidate = dir.join(file);
        if candidate.is_file() {
            return Ok(candidate);
        }
    }
    Err(LoadError::IncludeNotFound(file.to_string()))
}

fn insert_entries(
    roots: &mut Vec<NodeRef>,
    parent: Option<&NodeRef>,
    entries: &Mapping,
) -> Result<(), LoadError> {
    for (key, value) in entries {
        let Some(name) = key.as_str() else {
            log::warn!("ignoring non-string vspec key {key:?}");
            continue;
        };
        let node = match parent {
            Some(p) => ensure_path_under(p, name),
            None => ensure_path(roots, name)?,
        };
        if let Value::Mapping(attrs) = value {
            apply_attributes(&node, attrs)?;
        }
    }
    Ok(())
}

fn apply_attributes(node: &NodeRef, attrs: &Mapping) -> Result<(), LoadError> {
    for (key, value) in attrs {
        let Some(key) = key.as_str() else { continue };
        let mut n = node.borrow_mut();
        match key {
            KEY_TYPE => {
                if let Some(kind) = value.as_str().and_then(VssKind::parse) {
                    n.kind = kind;
                } else {
                    log::warn!("unknown node type {value:?} on {}", n.name);
                }
            }
            KEY_DATATYPE => {
                let parsed = value.as_str().and_then(DataType::parse);
                if parsed.is_none() {
                    log::warn!("unknown datatype {value:?} on {}", n.name);
                }
                n.data_type = parsed;
            }
            KEY_DESCRIPTION => n.description = scalar_to_string(value),
            KEY_UNIT => n.unit = scalar_to_string(value),
            KEY_MIN => n.min = scalar_to_f64(value),
            KEY_MAX => n.max = scalar_to_f64(value),
            KEY_ENUM | KEY_ALLOWED => {
                if let Value::Sequence(values) = value {
                    n.enum_values = values.iter().map(scalar_to_string).collect();
                }
            }
            KEY_DEPRECATION => n.deprecation = Some(scalar_to_string(value)),
            KEY_CHILDREN => {
                drop(n);
                if let Value::Mapping(children) = value {
                    let mut unused = Vec::new();
                    insert_entries(&mut unused, Some(node), children)?;
                }
            }
            // Remaining vspec attributes carry no schema information.
            _ => {}
        }
    }
    Ok(())
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

fn scalar_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// Walk (creating as needed) the dotted `path` starting at the forest roots.
fn ensure_path(roots: &mut Vec<NodeRef>, path: &str) -> Result<NodeRef, LoadError> {
    let mut segments = path.split('.');
    let first = segments.next().unwrap_or(path);
    let mut node = match roots.iter().find(|r| r.borrow().name == first) {
        Some(existing) => Rc::clone(existing),
        None => {
            let root = VssNode::new(first, VssKind::Branch).into_ref();
            roots.push(Rc::clone(&root));
            root
        }
    };
    for segment in segments {
        node = ensure_path_under(&node, segment);
    }
    Ok(node)
}

fn ensure_path_under(parent: &NodeRef, path: &str) -> NodeRef {
    let mut node = Rc::clone(parent);
    for segment in path.split('.') {
        let existing = node
            .borrow()
            .children
            .iter()
            .find(|c| c.borrow().name == segment)
            .map(Rc::clone);
        node = match existing {
            Some(child) => child,
            None => {
                let child = VssNode::new(segment, VssKind::Branch).into_ref();
                add_child(&node, Rc::clone(&child));
                child
            }
        };
    }
    node
}

/// Merge an included root into the forest, either under `anchor` or at the
/// top level. A node with the same name is merged child-by-child.
fn graft(roots: &mut Vec<NodeRef>, anchor: Option<&NodeRef>, sub: NodeRef) {
    let existing = match anchor {
        Some(a) => a
            .borrow()
            .children
            .iter()
            .find(|c| c.borrow().name == sub.borrow().name)
            .map(Rc::clone),
        None => roots
            .iter()
            .find(|r| r.borrow().name == sub.borrow().name)
            .map(Rc::clone),
    };
    match existing {
        Some(target) => {
            let children = std::mem::take(&mut sub.borrow_mut().children);
            for child in children {
                add_child(&target, child);
            }
        }
        None => match anchor {
            Some(a) => add_child(a, sub),
            None => roots.push(sub),
        },
    }
}
