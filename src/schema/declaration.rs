use super::description::Description;
use super::directive::DirectiveDeclaration;
use super::field::Field;

/// Declaration blocks holding fields. Query/Mutation/Subscription render as
/// the reserved operation types; Type and Input as plain object/input types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Query,
    Mutation,
    Subscription,
    Type,
    Input,
}

impl BlockKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            BlockKind::Input => "input",
            _ => "type",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Block {
    pub kind: BlockKind,
    pub name: String,
    pub description: Description,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone)]
pub struct EnumBlock {
    pub name: String,
    pub description: Description,
    pub values: Vec<String>,
}

/// One element of the ordered declaration stream handed to the emitter.
#[derive(Debug, Clone)]
pub enum Declaration {
    /// Section separator comment (QUERY, MUTATION, ...).
    Section(&'static str),
    Directive(DirectiveDeclaration),
    CustomScalar(&'static str),
    Block(Block),
    Enum(EnumBlock),
}
