// Fixed text of the generated C++ translation unit

/// One indentation level
pub const INDENT: &str = "    ";

/// Lines emitted before the first statement
pub const PROLOGUE: &[&str] = &["#include <iostream>", "#include <string>", "", "int main() {"];

/// Emitted at one indent level after the last statement
pub const MAIN_RETURN: &str = "return 0;";

pub const CLOSING_BRACE: &str = "}";

pub const TRUE_LITERAL: &str = "true";
pub const FALSE_LITERAL: &str = "false";
