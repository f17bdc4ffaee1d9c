use std::fmt;

use super::description::Description;
use super::directive::DirectiveCall;
use super::parameter::Parameter;

/// One entry of a type/input/query/mutation/subscription block. Built once
/// by a generator and never mutated after emission starts.
#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub field_type: String,
    pub description: Description,
    pub parameters: Vec<Parameter>,
    pub directives: Vec<DirectiveCall>,
}

impl Field {
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Field {
        Field {
            name: name.into(),
            field_type: field_type.into(),
            description: Description::default(),
            parameters: Vec::new(),
            directives: Vec::new(),
        }
    }

    /// Wrap the type reference in a GraphQL list, for layer list nodes.
    pub fn wrap_list(&mut self) {
        self.field_type = format!("[{}]", self.field_type);
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.parameters.is_empty() {
            write!(f, "(")?;
            for (i, p) in self.parameters.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{p}")?;
            }
            write!(f, ")")?;
        }
        write!(f, ": {}", self.field_type)?;
        for d in &self.directives {
            write!(f, " {d}")?;
        }
        Ok(())
    }
}
