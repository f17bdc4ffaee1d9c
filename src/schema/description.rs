use std::fmt;

/// Structured field description: free-form body plus the metadata lines
/// (`@unit`, `@min`, `@max`, `@enum`) folded into the rendered docstring.
#[derive(Debug, Clone, Default)]
pub struct Description {
    pub body: String,
    pub unit: String,
    pub min: String,
    pub max: String,
    pub enum_values: String,
}

impl Description {
    pub fn new(body: impl Into<String>) -> Description {
        Description {
            body: body.into(),
            ..Description::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
            && self.unit.is_empty()
            && self.min.is_empty()
            && self.max.is_empty()
            && self.enum_values.is_empty()
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.body)?;
        for (tag, value) in [
            ("@unit", &self.unit),
            ("@min", &self.min),
            ("@max", &self.max),
            ("@enum", &self.enum_values),
        ] {
            if !value.is_empty() {
                write!(f, "\n{tag}: {value}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn annotation_lines_follow_the_body() {
        let d = Description {
            body: "Vehicle speed.".to_string(),
            unit: "km/h".to_string(),
            min: "0".to_string(),
            max: "300".to_string(),
            enum_values: String::new(),
        };
        assert_eq!(
            d.to_string(),
            "Vehicle speed.\n@unit: km/h\n@min: 0\n@max: 300"
        );
    }

    #[test]
    fn default_is_empty() {
        assert!(Description::default().is_empty());
        assert!(!Description::new("x").is_empty());
    }
}
