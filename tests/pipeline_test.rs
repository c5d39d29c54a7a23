// End-to-end tests for the VoltScript → C++ pipeline

use voltc::parser::ast::*;
use voltc::parser::lexer::{Keyword, Operator, TokenKind};
use voltc::{compile, compile_with, generate, parse, tokenize, CompileOptions};

/// Statement lines between `int main() {` and `return 0;`
fn body(cpp: &str) -> Vec<&str> {
    let lines: Vec<&str> = cpp.lines().collect();
    lines[4..lines.len() - 2].to_vec()
}

#[test]
fn test_declaration_and_print_end_to_end() {
    let source = "int x = 5; print(x + 2);";

    let tokens = tokenize(source).expect("Tokenizing failed");
    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Keyword(Keyword::Int),
            TokenKind::Identifier,
            TokenKind::Assign,
            TokenKind::Number,
            TokenKind::Semicolon,
            TokenKind::Keyword(Keyword::Print),
            TokenKind::LParen,
            TokenKind::Identifier,
            TokenKind::Operator(Operator::Plus),
            TokenKind::Number,
            TokenKind::RParen,
            TokenKind::Semicolon,
            TokenKind::Eof,
        ]
    );

    let program = parse(tokens).expect("Parsing failed");
    assert_eq!(program.statements.len(), 2);
    assert!(matches!(
        &program.statements[0],
        Stmt::VarDecl(VarDecl { var_type, name, init: Some(Expr::Number(n)), .. })
            if var_type == "int" && name == "x" && n == "5"
    ));
    assert!(matches!(
        &program.statements[1],
        Stmt::Print { expr: Expr::Binary { op: BinOp::Add, .. }, .. }
    ));

    let cpp = generate(&program);
    assert_eq!(
        cpp,
        "#include <iostream>\n\
         #include <string>\n\
         \n\
         int main() {\n    \
         int x = 5;\n    \
         std::cout << (x + 2) << std::endl;\n    \
         return 0;\n\
         }"
    );
}

#[test]
fn test_for_loop_end_to_end() {
    let cpp = compile("for (int i = 0; i < 3; i = i + 1) { print(i); }").unwrap();
    assert_eq!(
        body(&cpp),
        vec![
            "    for (int i = 0; (i < 3); i = (i + 1)) {",
            "        std::cout << i << std::endl;",
            "    }",
        ]
    );
    assert_eq!(cpp.matches("for (").count(), 1);
}

#[test]
fn test_unknown_type_passes_through() {
    let cpp = compile("vec3 position; vec3 velocity = zero();").unwrap();
    assert_eq!(
        body(&cpp),
        vec!["    vec3 position;", "    vec3 velocity = zero();"]
    );
}

#[test]
fn test_builtin_type_mapping() {
    let cpp = compile("int a; float b; string c; bool d; void e;").unwrap();
    assert_eq!(
        body(&cpp),
        vec![
            "    int a;",
            "    double b;",
            "    std::string c;",
            "    bool d;",
            "    void e;",
        ]
    );
}

#[test]
fn test_every_operator_is_parenthesized() {
    let cpp = compile("int r = a + b * c - d / e % f;").unwrap();
    assert!(cpp.contains("int r = ((a + (b * c)) - ((d / e) % f));"));

    let cpp = compile("bool t = !done && (x <= 1 || y != 2);").unwrap();
    assert!(cpp.contains("bool t = ((!done) && ((x <= 1) || (y != 2)));"));

    let cpp = compile("print(--x);").unwrap();
    assert!(cpp.contains("std::cout << (-(-x)) << std::endl;"));
}

#[test]
fn test_booleans_render_as_literals() {
    let cpp = compile("bool a = true; bool b = !false; print(true == a);").unwrap();
    assert_eq!(
        body(&cpp),
        vec![
            "    bool a = true;",
            "    bool b = (!false);",
            "    std::cout << (true == a) << std::endl;",
        ]
    );
}

#[test]
fn test_nested_blocks_indentation() {
    let source = r#"
        int n = 0;
        while (n < 10) {
            if (n % 2 == 0) {
                print("even");
            } else {
                print("odd");
            }
            n = n + 1;
        }
    "#;

    let cpp = compile(source).unwrap();
    assert_eq!(
        body(&cpp),
        vec![
            "    int n = 0;",
            "    while ((n < 10)) {",
            "        if (((n % 2) == 0)) {",
            "            std::cout << \"even\" << std::endl;",
            "        }",
            "        else {",
            "            std::cout << \"odd\" << std::endl;",
            "        }",
            "        n = (n + 1);",
            "    }",
        ]
    );
}

#[test]
fn test_else_if_chain() {
    let cpp = compile("if (a) { print(1); } else if (b) { print(2); }").unwrap();
    assert_eq!(
        body(&cpp),
        vec![
            "    if (a) {",
            "        std::cout << 1 << std::endl;",
            "    }",
            "    else {",
            "        if (b) {",
            "            std::cout << 2 << std::endl;",
            "        }",
            "    }",
        ]
    );
}

#[test]
fn test_calls_returns_and_strings() {
    let source = "greet(\"Bob\", 3); string s = \"say \\\"hi\\\"\"; return; return s;";
    let cpp = compile(source).unwrap();
    assert_eq!(
        body(&cpp),
        vec![
            "    greet(\"Bob\", 3);",
            "    std::string s = \"say \\\"hi\\\"\";",
            "    return;",
            "    return s;",
        ]
    );
}

#[test]
fn test_comments_are_ignored() {
    let with_comments = compile("// setup\nint x = 1; // one\n// done\n").unwrap();
    assert_eq!(with_comments, compile("int x = 1;").unwrap());
}

#[test]
fn test_empty_program_still_has_main() {
    let cpp = compile("").unwrap();
    assert!(cpp.starts_with("#include <iostream>\n#include <string>\n\nint main() {"));
    assert!(cpp.ends_with("    return 0;\n}"));
}

#[test]
fn test_compile_options() {
    let options = CompileOptions {
        type_overrides: vec![
            ("float".to_string(), "float".to_string()),
            ("vec3".to_string(), "glm::vec3".to_string()),
        ],
        ..CompileOptions::default()
    };
    let cpp = compile_with("float f = 0.5; vec3 v;", &options).unwrap();
    assert_eq!(body(&cpp), vec!["    float f = 0.5;", "    glm::vec3 v;"]);
}

#[test]
fn test_compilation_is_deterministic() {
    let source = "int i = 0; while (i < 2) { i = i + 1; }";
    assert_eq!(compile(source).unwrap(), compile(source).unwrap());
}
