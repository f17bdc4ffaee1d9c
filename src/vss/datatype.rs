/// Primitive value types a VSS leaf can carry, as spelled in vspec files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseType {
    Int8,
    Uint8,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Int64,
    Uint64,
    Float,
    Double,
    Boolean,
    String,
}

/// A scalar or array primitive tag from the vspec `datatype` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DataType {
    pub base: BaseType,
    pub is_array: bool,
}

/// GraphQL custom scalar names declared when `--custom-scalars` is on.
pub const CUSTOM_SCALAR_NAMES: [&str; 8] = [
    "Int8", "UInt8", "Int16", "UInt16", "Int32", "UInt32", "Int64", "UInt64",
];

impl DataType {
    pub fn parse(raw: &str) -> Option<DataType> {
        let (name, is_array) = match raw.strip_suffix("[]") {
            Some(base) => (base, true),
            None => (raw, false),
        };
        let base = match name.trim() {
            "int8" => BaseType::Int8,
            "uint8" => BaseType::Uint8,
            "int16" => BaseType::Int16,
            "uint16" => BaseType::Uint16,
            "int32" => BaseType::Int32,
            "uint32" => BaseType::Uint32,
            "int64" => BaseType::Int64,
            "uint64" => BaseType::Uint64,
            "float" => BaseType::Float,
            "double" => BaseType::Double,
            "boolean" => BaseType::Boolean,
            "string" => BaseType::String,
            _ => return None,
        };
        Some(DataType { base, is_array })
    }

    /// GraphQL type reference for this data type. 64-bit integers do not fit
    /// GraphQL's Int, so they map to String unless custom scalars are on.
    pub fn graphql_type(&self, custom_scalars: bool) -> String {
        let scalar = if custom_scalars {
            match self.base {
                BaseType::Int8 => "Int8",
                BaseType::Uint8 => "UInt8",
                BaseType::Int16 => "Int16",
                BaseType::Uint16 => "UInt16",
                BaseType::Int32 => "Int32",
                BaseType::Uint32 => "UInt32",
                BaseType::Int64 => "Int64",
                BaseType::Uint64 => "UInt64",
                BaseType::Float | BaseType::Double => "Float",
                BaseType::Boolean => "Boolean",
                BaseType::String => "String",
            }
        } else {
            match self.base {
                BaseType::Int8
                | BaseType::Uint8
                | BaseType::Int16
                | BaseType::Uint16
                | BaseType::Int32
                | BaseType::Uint32 => "Int",
                BaseType::Int64 | BaseType::Uint64 => "String",
                BaseType::Float | BaseType::Double => "Float",
                BaseType::Boolean => "Boolean",
                BaseType::String => "String",
            }
        };
        if self.is_array {
            format!("[{scalar}]")
        } else {
            scalar.to_string()
        }
    }
}
