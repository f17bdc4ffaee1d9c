use std::fmt;

/// One parameter of a field or directive: `name: Type[!][ = default]`.
#[derive(Debug, Clone)]
pub struct Parameter {
    pub name: String,
    pub type_or_value: String,
    pub default_value: Option<String>,
    pub is_required: bool,
}

impl Parameter {
    pub fn new(name: impl Into<String>, type_or_value: impl Into<String>) -> Parameter {
        Parameter {
            name: name.into(),
            type_or_value: type_or_value.into(),
            default_value: None,
            is_required: false,
        }
    }

    pub fn required(mut self) -> Parameter {
        self.is_required = true;
        self
    }

    pub fn with_default(mut self, default_value: impl Into<String>) -> Parameter {
        self.default_value = Some(default_value.into());
        self
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.type_or_value)?;
        if self.is_required {
            write!(f, "!")?;
        }
        if let Some(default) = &self.default_value {
            write!(f, " = {default}")?;
        }
        Ok(())
    }
}
