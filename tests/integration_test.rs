// Integration tests for the rath frontend

use pretty_assertions::assert_eq;
use rath::parser::ast::{CaseTest, Constant, Node, Operator};
use rath::{ErrorKind, Parser, ParserConfig, SourceFile};
use test_log::test;

fn dump(source: &str) -> String {
    rath::parse("test.rath", source)
        .expect("Parsing failed")
        .expect("Nothing parsed")
        .to_string()
}

#[test]
fn test_precedence_and_associativity() {
    assert_eq!(
        dump("1 + 2 * 3"),
        "[Binop(+) left=[Int 1] right=[Binop(*) left=[Int 2] right=[Int 3]]]"
    );
    assert_eq!(
        dump("2 - 3 - 4"),
        "[Binop(-) left=[Binop(-) left=[Int 2] right=[Int 3]] right=[Int 4]]"
    );
    assert_eq!(
        dump("x := y := 5"),
        "[Binop(:=) left=[Ident x] right=[Binop(:=) left=[Ident y] right=[Int 5]]]"
    );
    assert_eq!(
        dump("a || b && c == d"),
        "[Binop(||) left=[Ident a] right=[Binop(&&) left=[Ident b] \
         right=[Binop(==) left=[Ident c] right=[Ident d]]]]"
    );
}

#[test]
fn test_call() {
    assert_eq!(dump("hi(5, 6);"), "[Call hi args={[Int 5], [Int 6]}]");
}

#[test]
fn test_switch_compound_condition() {
    assert_eq!(
        dump("switch x -> { case 5 case 6 -> 10 case y -> 20 }"),
        "[Switch value=[Ident x] cases={\
         [Case [Cond [Binop(||) left=[Binop(==) left=[Ident x] right=[Int 5]] \
         right=[Binop(==) left=[Ident x] right=[Int 6]]]] body=[Int 10]], \
         [Case [Cond [Binop(==) left=[Ident x] right=[Ident y]]] body=[Int 20]]}]"
    );
}

#[test]
fn test_scrutinee_is_shared_not_copied() {
    let tree = rath::parse("test.rath", "switch f(a) { case 1 case 2 -> a case 3 -> b }")
        .unwrap()
        .unwrap();
    let Node::Switch {
        scrutinee, cases, ..
    } = &tree
    else {
        panic!("Expected switch, got {tree:?}");
    };

    let mut comparisons = 0;
    for case in cases {
        let mut pending = vec![&case.condition.test];
        while let Some(test) = pending.pop() {
            if let CaseTest::Either { left, right, .. } = test {
                pending.push(&**left);
                pending.push(&**right);
            } else if let Some((lhs, _)) = test.comparison(scrutinee) {
                assert!(std::ptr::eq(lhs, &**scrutinee));
                comparisons += 1;
            }
        }
    }
    assert_eq!(comparisons, 3);

    // Folding and cloning keep a single owned scrutinee per switch.
    let copy = tree.clone();
    let folded = rath::optimizer::fold(copy, &SourceFile::new("test.rath", "")).unwrap();
    assert_eq!(folded, tree);
    drop(folded);
    drop(tree);
}

#[test]
fn test_program_block() {
    let source = r#"
        let ref const total = 0
        func add(a, b) -> a + b
        let f = func x -> {
            return x * 2
        }
        if (total > 1) {
            add(total, 1)
        }
        else f(total)
    "#;

    let tree = rath::parse("program.rath", source).unwrap().unwrap();
    let Node::Block { body, .. } = &tree else {
        panic!("Expected block, got {tree:?}");
    };
    assert_eq!(body.len(), 4);
    assert!(matches!(body[0], Node::Assign { .. }));
    assert!(matches!(body[1], Node::Function { name: Some(_), .. }));
    assert!(matches!(body[2], Node::Assign { .. }));
    assert!(matches!(body[3], Node::If { else_body: Some(_), .. }));
}

#[test]
fn test_empty_input() {
    assert_eq!(rath::parse("test.rath", "").unwrap(), None);
    assert_eq!(rath::compile("test.rath", "\n\n").unwrap(), None);
}

#[test]
fn test_declaration_errors() {
    let err = rath::parse("test.rath", "let ...x = 5").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Declaration);

    let err = rath::parse("test.rath", "let = 5").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Declaration);
    assert_eq!(
        err.to_string(),
        "Error in test.rath:1:\nlet = 5\n  > No variable name provided"
    );
}

#[test]
fn test_lex_errors() {
    let err = rath::parse("test.rath", "1.2.3").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Lex);
    assert_eq!(
        err.to_string(),
        "Error in test.rath:1:\n1.2.3\n  > Invalid float literal 1.2.3"
    );

    let err = rath::parse("test.rath", "let a = 1\nlet b = a # 2").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Lex);
    assert_eq!(err.line, 2);
    assert_eq!(err.message, "Invalid char: #");

    let err = rath::parse("test.rath", "f(\"open").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Lex);
    assert_eq!(err.message, "Unterminated string literal");
}

#[test]
fn test_syntax_error_reports_line() {
    let err = rath::parse("main.rath", "let a = 1\nhi(5, 6 7)\n").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Syntax);
    assert_eq!(
        err.to_string(),
        "Error in main.rath:2:\nhi(5, 6 7)\n  > Expected ',' or ')' in argument list, found number literal 7"
    );
}

#[test]
fn test_assignment_outside_declaration() {
    let err = rath::parse("test.rath", "x = y = 5").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Syntax);
}

#[test]
fn test_nesting_limit() {
    let deep = format!("{}x{}", "(".repeat(100), ")".repeat(100));
    assert!(rath::parse("test.rath", deep.as_str()).is_ok());

    let too_deep = format!("{}x{}", "(".repeat(10_000), ")".repeat(10_000));
    let err = rath::parse("test.rath", too_deep.as_str()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Syntax);
    assert_eq!(
        err.message,
        "Expression nesting exceeds maximum depth of 128"
    );

    let unary = format!("{}1", "-".repeat(64));
    let source = SourceFile::new("test.rath", unary.as_str());
    let config = ParserConfig::default().with_max_depth(32);
    let err = Parser::with_config(&source, config)
        .unwrap()
        .parse()
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Syntax);
}

#[test]
fn test_binary_chain_nesting_limit() {
    let chain = format!("x{}", " + x".repeat(200_000));
    let err = rath::parse("test.rath", chain.as_str()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Syntax);
    assert_eq!(
        err.message,
        "Expression nesting exceeds maximum depth of 128"
    );
    assert_eq!(err.line, 1);
}

#[test]
fn test_binary_chain_at_configured_depth() {
    let parse_with = |text: &str, max_depth: usize| -> rath::Result<Option<Node>> {
        let source = SourceFile::new("test.rath", text);
        let config = ParserConfig::default().with_max_depth(max_depth);
        Parser::with_config(&source, config)?.parse()
    };

    let short = format!("a{}", " - b".repeat(20));
    let tree = parse_with(&short, 32).unwrap().unwrap();
    let mut depth = 0;
    let mut node = &tree;
    while let Node::Binary { op, left, .. } = node {
        assert_eq!(*op, Operator::Sub);
        depth += 1;
        node = &**left;
    }
    assert_eq!(depth, 20);

    let long = format!("a{}", " - b".repeat(40));
    let err = parse_with(&long, 32).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Syntax);
    assert_eq!(
        err.message,
        "Expression nesting exceeds maximum depth of 32"
    );
    assert!(parse_with(&long, 64).is_ok());
}

#[test]
fn test_tokens_keep_positions() {
    let tree = rath::parse("test.rath", "\n\n  a + b").unwrap().unwrap();
    let Node::Binary { op, left, .. } = &tree else {
        panic!("Expected binary, got {tree:?}");
    };
    assert_eq!(*op, Operator::Add);
    assert_eq!(tree.location().line, 3);
    assert_eq!(tree.location().offset, 6);
    assert_eq!(left.as_constant(), Some(&Constant::Ident("a".into())));
}
