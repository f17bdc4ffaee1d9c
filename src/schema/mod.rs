mod declaration;
mod description;
pub mod directive;
mod field;
mod parameter;

pub use declaration::{Block, BlockKind, Declaration, EnumBlock};
pub use description::Description;
pub use directive::{DirectiveCall, DirectiveDeclaration};
pub use field::Field;
pub use parameter::Parameter;
