use crate::schema::Declaration;
use crate::vss::CUSTOM_SCALAR_NAMES;

/// Scalar declarations for the integer widths VSS distinguishes but GraphQL
/// does not.
pub fn custom_scalar_declarations() -> Vec<Declaration> {
    let mut declarations = vec![Declaration::Section("CUSTOM SCALARS")];
    declarations.extend(
        CUSTOM_SCALAR_NAMES
            .iter()
            .map(|n| Declaration::CustomScalar(*n)),
    );
    declarations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declares_all_integer_widths() {
        let declarations = custom_scalar_declarations();
        assert_eq!(declarations.len(), 1 + CUSTOM_SCALAR_NAMES.len());
        assert!(matches!(declarations[1], Declaration::CustomScalar("Int8")));
        assert!(matches!(declarations[8], Declaration::CustomScalar("UInt64")));
    }
}
