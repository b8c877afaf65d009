pub mod nodes {
    pub const ANONYMOUS_CLASS: &str = "anonymous_class";
    pub const ARGUMENTS: &str = "arguments";
    pub const ATTRIBUTE_LIST: &str = "attribute_list";
    pub const AUGMENTED_ASSIGNMENT_EXPRESSION: &str = "augmented_assignment_expression";
    pub const BINARY_EXPRESSION: &str = "binary_expression";
    pub const BOOLEAN: &str = "boolean";
    pub const COMMENT: &str = "comment";
    pub const DECLARATION_LIST: &str = "declaration_list";
    pub const FORMAL_PARAMETERS: &str = "formal_parameters";
    pub const OBJECT_CREATION_EXPRESSION: &str = "object_creation_expression";
    pub const PARENTHESIZED_EXPRESSION: &str = "parenthesized_expression";
    pub const RETURN_STATEMENT: &str = "return_statement";
    pub const VARIABLE_NAME: &str = "variable_name";

    /// Nodes that open a new function scope for `return`
    pub const FUNCTION_LIKE: &[&str] = &[
        "function_definition",
        "method_declaration",
        "anonymous_function",
        "anonymous_function_creation_expression",
        "arrow_function",
    ];

    /// Class designators that name a class literally
    pub const LITERAL_CLASS_NAMES: &[&str] =
        &["name", "qualified_name", "relative_name", "relative_scope"];
}

pub mod fields {
    pub const LEFT: &str = "left";
    pub const OPERATOR: &str = "operator";
    pub const RETURN_TYPE: &str = "return_type";
    pub const RIGHT: &str = "right";
}

pub mod tokens {
    pub const ASSIGN: &str = "=";
    pub const ASSIGN_COALESCE: &str = "??=";
    pub const CLASS: &str = "class";
    pub const COALESCE: &str = "??";
    pub const IDENTICAL: &str = "===";
    pub const NOT_IDENTICAL: &str = "!==";
}
