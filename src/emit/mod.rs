use std::io::{self, Write};

use crate::schema::{Block, Declaration, Description, EnumBlock};

const INDENT: &str = "    ";
const SEPARATOR_RULE: &str =
    "#---------------------------------------------------------------------------#";

/// Serialize an ordered declaration stream as GraphQL SDL.
pub fn write_schema<W: Write>(out: &mut W, declarations: &[Declaration]) -> io::Result<()> {
    for declaration in declarations {
        match declaration {
            Declaration::Section(name) => write_section(out, name)?,
            Declaration::Directive(decl) => writeln!(out, "{decl}\n")?,
            Declaration::CustomScalar(name) => writeln!(out, "scalar {name}")?,
            Declaration::Block(block) => write_block(out, block)?,
            Declaration::Enum(block) => write_enum(out, block)?,
        }
    }
    Ok(())
}

/// Render a declaration stream to a string; emission helper for callers
/// that do not stream to a file.
pub fn render_schema(declarations: &[Declaration]) -> String {
    let mut buf = Vec::new();
    write_schema(&mut buf, declarations).expect("writing to a Vec cannot fail");
    String::from_utf8(buf).expect("rendered schema is valid UTF-8")
}

fn write_section<W: Write>(out: &mut W, name: &str) -> io::Result<()> {
    writeln!(out, "{SEPARATOR_RULE}")?;
    writeln!(out, "# {name}")?;
    writeln!(out, "{SEPARATOR_RULE}")?;
    writeln!(out)
}

fn write_docstring<W: Write>(
    out: &mut W,
    description: &Description,
    indent: &str,
) -> io::Result<()> {
    if description.is_empty() {
        return Ok(());
    }
    writeln!(out, "{indent}\"\"\"")?;
    for line in description.to_string().lines() {
        writeln!(out, "{indent}{line}")?;
    }
    writeln!(out, "{indent}\"\"\"")
}

fn write_block<W: Write>(out: &mut W, block: &Block) -> io::Result<()> {
    write_docstring(out, &block.description, "")?;
    writeln!(out, "{} {} {{", block.kind.keyword(), block.name)?;
    for field in &block.fields {
        write_docstring(out, &field.description, INDENT)?;
        writeln!(out, "{INDENT}{field}")?;
    }
    writeln!(out, "}}\n")
}

fn write_enum<W: Write>(out: &mut W, block: &EnumBlock) -> io::Result<()> {
    write_docstring(out, &block.description, "")?;
    writeln!(out, "enum {} {{", block.name)?;
    for value in &block.values {
        writeln!(out, "{INDENT}{value}")?;
    }
    writeln!(out, "}}\n")
}
