use crate::options::GenerationOptions;
use crate::schema::{directive, Declaration, Description, EnumBlock};

/// Declarations of the directives the generated schema may reference, plus
/// the permission policy enum the hasPermissions signature needs.
pub fn directive_declarations(options: &GenerationOptions) -> Vec<Declaration> {
    if !options.range_directive && !options.permission_directive {
        return Vec::new();
    }
    let mut declarations = vec![Declaration::Section("DIRECTIVES")];
    if options.permission_directive {
        declarations.push(Declaration::Enum(EnumBlock {
            name: "HasPermissionsDirectivePolicy".to_string(),
            description: Description::default(),
            values: vec!["RESOLVER".to_string(), "THROW".to_string()],
        }));
    }
    if options.range_directive {
        declarations.push(Declaration::Directive(directive::range_declaration()));
    }
    if options.permission_directive {
        declarations.push(Declaration::Directive(
            directive::has_permissions_declaration(),
        ));
    }
    declarations
}
