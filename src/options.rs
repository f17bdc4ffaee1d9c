/// Generation switches, constructed once per invocation and passed
/// explicitly to the assembler and every generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerationOptions {
    /// Declare and use Int8/UInt8/... custom scalars instead of folding
    /// everything into GraphQL's built-in scalars.
    pub custom_scalars: bool,
    /// Attach `@hasPermissions` directives and declare the directive.
    pub permission_directive: bool,
    /// Attach `@range` directives for nodes with numeric bounds.
    pub range_directive: bool,
    /// Declare enum types for nodes with allowed-value lists.
    pub enums: bool,
    /// Add the delivery-interval parameter to subscription fields.
    pub subscription_delivery_interval: bool,
}
