use std::fmt;

use super::parameter::Parameter;

pub const PERMISSION_READ: &str = "READ";
pub const PERMISSION_WRITE: &str = "WRITE";
pub const PERMISSION_REALTIME: &str = "REALTIME";
pub const PERMISSION_DELIVERY_INTERVAL_1_SECOND: &str = "DELIVERY_INTERVAL_1_SECOND";
pub const PERMISSION_DELIVERY_INTERVAL_5_SECONDS: &str = "DELIVERY_INTERVAL_5_SECONDS";

/// A directive attached to a field: `@name(p: v, ...)`.
#[derive(Debug, Clone)]
pub struct DirectiveCall {
    pub name: String,
    pub parameters: Vec<Parameter>,
}

impl fmt::Display for DirectiveCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}(", self.name)?;
        for (i, p) in self.parameters.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{p}")?;
        }
        write!(f, ")")
    }
}

/// Render a numeric bound the way it appears in vspec files: integral
/// values without the trailing `.0`.
pub fn format_bound(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// `@range(min: ..., max: ...)` when at least one bound is present.
/// A zero bound counts as present.
pub fn range(min: Option<f64>, max: Option<f64>) -> Option<DirectiveCall> {
    if min.is_none() && max.is_none() {
        return None;
    }
    let mut parameters = Vec::new();
    if let Some(min) = min {
        parameters.push(Parameter::new("min", format_bound(min)));
    }
    if let Some(max) = max {
        parameters.push(Parameter::new("max", format_bound(max)));
    }
    Some(DirectiveCall {
        name: "range".to_string(),
        parameters,
    })
}

/// `@deprecated(reason: "...")`. Double quotes in the reason are demoted to
/// single quotes so the rendered call stays well-formed.
pub fn deprecated(reason: &str) -> DirectiveCall {
    let mut parameters = Vec::new();
    if !reason.is_empty() {
        let quoted = format!("\"{}\"", reason.replace('"', "'"));
        parameters.push(Parameter::new("reason", quoted));
    }
    DirectiveCall {
        name: "deprecated".to_string(),
        parameters,
    }
}

/// `@hasPermissions(permissions: ["...", ...])` with pre-qualified
/// permission names.
pub fn has_permissions(permission_names: &[String]) -> DirectiveCall {
    let mut parameters = Vec::new();
    if !permission_names.is_empty() {
        let list = permission_names
            .iter()
            .map(|p| format!("\"{p}\""))
            .collect::<Vec<_>>()
            .join(", ");
        parameters.push(Parameter::new("permissions", format!("[{list}]")));
    }
    DirectiveCall {
        name: "hasPermissions".to_string(),
        parameters,
    }
}

/// Schema-level declaration of a directive: name, signature and the
/// locations it may attach to.
#[derive(Debug, Clone)]
pub struct DirectiveDeclaration {
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub locations: Vec<&'static str>,
}

impl fmt::Display for DirectiveDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "directive @{}(", self.name)?;
        for (i, p) in self.parameters.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{p}")?;
        }
        write!(f, ") on {}", self.locations.join(" | "))
    }
}

pub fn range_declaration() -> DirectiveDeclaration {
    DirectiveDeclaration {
        name: "range".to_string(),
        parameters: vec![Parameter::new("min", "Float"), Parameter::new("max", "Float")],
        locations: vec![
            "FIELD_DEFINITION",
            "ARGUMENT_DEFINITION",
            "INPUT_FIELD_DEFINITION",
        ],
    }
}

pub fn has_permissions_declaration() -> DirectiveDeclaration {
    DirectiveDeclaration {
        name: "hasPermissions".to_string(),
        parameters: vec![
            Parameter::new("permissions", "[String!]").required(),
            Parameter::new("policy", "HasPermissionsDirectivePolicy"),
        ],
        locations: vec!["FIELD_DEFINITION", "OBJECT", "INPUT_FIELD_DEFINITION"],
    }
}
