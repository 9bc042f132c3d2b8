/// Error code registry for tracker macros
///
/// Error codes are organized by category:
/// - 1000-1999: Configuration errors
/// - 2000-2999: Parameter resolution errors
/// - 3000-3999: Project query errors
/// - 4000-4999: Calculation errors
/// - 5000-5999: Parse errors
/// - 6000-6999: Render errors
/// - 7000-7999: Validation errors
#[allow(dead_code)]
pub struct ErrorCode;

impl ErrorCode {
    // Configuration errors (1000-1999)
    pub const CONFIG_GENERIC: u16 = 1000;
    pub const CONFIG_NOT_FOUND: u16 = 1001;
    pub const CONFIG_INVALID_YAML: u16 = 1002;
    pub const CONFIG_INVALID_TOML: u16 = 1003;
    pub const CONFIG_MISSING_REQUIRED: u16 = 1004;
    pub const CONFIG_INVALID_VALUE: u16 = 1005;

    // Resolution errors (2000-2999)
    pub const RESOLUTION_GENERIC: u16 = 2000;
    pub const RESOLUTION_SUPPLIER_FAILED: u16 = 2001;
    pub const RESOLUTION_VARIABLE_UNDEFINED: u16 = 2002;

    // Query errors (3000-3999)
    pub const QUERY_GENERIC: u16 = 3000;
    pub const QUERY_FAILED: u16 = 3001;
    pub const QUERY_NO_ROWS: u16 = 3002;
    pub const QUERY_MISSING_COLUMN: u16 = 3003;

    // Calculation errors (4000-4999)
    pub const CALC_GENERIC: u16 = 4000;
    pub const CALC_NON_FINITE: u16 = 4001;
    pub const CALC_DATE_OUT_OF_RANGE: u16 = 4002;

    // Parse errors (5000-5999)
    pub const PARSE_GENERIC: u16 = 5000;
    pub const PARSE_INVALID_DATE: u16 = 5001;
    pub const PARSE_INVALID_NUMBER: u16 = 5002;

    // Render errors (6000-6999)
    pub const RENDER_GENERIC: u16 = 6000;
    pub const RENDER_TEMPLATE_FAILED: u16 = 6001;

    // Validation errors (7000-7999)
    pub const VALIDATION_GENERIC: u16 = 7000;
    pub const VALIDATION_UNKNOWN_METRIC: u16 = 7001;
    pub const VALIDATION_UNKNOWN_ACCESSOR: u16 = 7002;
    pub const VALIDATION_UNKNOWN_MACRO: u16 = 7003;
    pub const VALIDATION_INVALID_PARAMETER: u16 = 7004;
}

/// Get a human-readable description for an error code
pub fn describe_error_code(code: u16) -> &'static str {
    match code {
        1000 => "Generic configuration error",
        1001 => "Configuration file not found",
        1002 => "Invalid YAML syntax",
        1003 => "Invalid TOML syntax",
        1004 => "Required configuration field is missing",
        1005 => "Invalid value in configuration",

        2000 => "Generic parameter resolution error",
        2001 => "Parameter default supplier failed",
        2002 => "Project variable is not defined",

        3000 => "Generic project query error",
        3001 => "Project query failed",
        3002 => "Project query returned no rows",
        3003 => "Query result is missing a required column",

        4000 => "Generic calculation error",
        4001 => "Calculation produced a non-finite value",
        4002 => "Projected date is out of range",

        5000 => "Generic parse error",
        5001 => "Invalid date",
        5002 => "Invalid number",

        6000 => "Generic render error",
        6001 => "Template rendering failed",

        7000 => "Generic validation error",
        7001 => "Unknown metric name",
        7002 => "Unrecognized accessor",
        7003 => "Unknown macro",
        7004 => "Invalid parameter",

        _ => "Unknown error code",
    }
}
