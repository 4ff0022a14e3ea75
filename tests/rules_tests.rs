use graft::rules::{assign, block, call, dot, name, num, object, stat, string, var};
use graft::{NAMESPACE_IDENT, Node, StyleExportsStripper, TailConstructionOptimizer};

fn child(node: &Node, index: usize) -> Node {
    node.as_seq().unwrap().child(index).unwrap()
}

// ============================================================================
// Tail Construction Tests
// ============================================================================

#[test]
fn test_capitalized_tail_call_is_rewritten() {
    // {x: 1}.Foo() becomes __NAMESPACE.Foo({x: 1})
    let receiver = object([("x", num(1))]);
    let input = call(dot(receiver.clone(), "Foo"), []);

    let output = TailConstructionOptimizer::new().optimize(&input);

    let expected = call(dot(name(NAMESPACE_IDENT), "Foo"), [receiver]);
    assert_eq!(output, expected);
}

#[test]
fn test_lowercase_member_is_left_alone() {
    let input = call(dot(name("a"), "foo"), []);
    let output = TailConstructionOptimizer::new().optimize(&input);

    assert!(output.identical(&input));
    assert_eq!(output, call(dot(name("a"), "foo"), []));
}

#[test]
fn test_underscore_member_is_left_alone() {
    let input = call(dot(name("a"), "_Hidden"), []);
    let output = TailConstructionOptimizer::new().optimize(&input);

    assert!(output.identical(&input));
    assert_eq!(output, call(dot(name("a"), "_Hidden"), []));
}

#[test]
fn test_call_with_arguments_is_left_alone() {
    let input = call(dot(name("a"), "Foo"), [num(1)]);
    let output = TailConstructionOptimizer::new().optimize(&input);

    assert!(output.identical(&input));
    assert_eq!(output, call(dot(name("a"), "Foo"), [num(1)]));
}

#[test]
fn test_plain_function_call_is_left_alone() {
    // Foo() has no receiver to lift
    let input = call(name("Foo"), []);
    let output = TailConstructionOptimizer::new().optimize(&input);

    assert!(output.identical(&input));
    assert_eq!(output, call(name("Foo"), []));
}

#[test]
fn test_chained_tail_calls_collapse_inside_out() {
    // a.Foo().Bar() becomes __NAMESPACE.Bar(__NAMESPACE.Foo(a))
    let input = call(dot(call(dot(name("a"), "Foo"), []), "Bar"), []);

    let output = TailConstructionOptimizer::new().optimize(&input);

    let expected = call(
        dot(name(NAMESPACE_IDENT), "Bar"),
        [call(dot(name(NAMESPACE_IDENT), "Foo"), [name("a")])],
    );
    assert_eq!(output, expected);
}

#[test]
fn test_tail_call_in_argument_position_is_rewritten() {
    // f(a.Foo()) keeps the call to f but rewrites its argument
    let input = call(name("f"), [call(dot(name("a"), "Foo"), [])]);

    let output = TailConstructionOptimizer::new().optimize(&input);

    let expected = call(
        name("f"),
        [call(dot(name(NAMESPACE_IDENT), "Foo"), [name("a")])],
    );
    assert_eq!(output, expected);
    assert!(output.identical(&input));
}

#[test]
fn test_statement_keeps_its_handle_while_the_call_is_rewritten() {
    let program = block([stat(call(dot(name("a"), "Foo"), []))]);

    let output = TailConstructionOptimizer::new().optimize(&program);

    assert!(output.identical(&program));
    let expected = block([stat(call(
        dot(name(NAMESPACE_IDENT), "Foo"),
        [name("a")],
    ))]);
    assert_eq!(output, expected);
}

// ============================================================================
// Using Statement Tests
// ============================================================================

#[test]
fn test_using_statement_expands_to_a_namespace_block() {
    let original = stat(call(dot(name("F"), "using"), [string("Dom"), string("Ui")]));
    let program = block([original.clone()]);

    let output = TailConstructionOptimizer::new().optimize(&program);

    assert!(output.identical(&program));
    let expected = block([block([
        var(NAMESPACE_IDENT, object([])),
        stat(call(
            dot(name("F"), "populateNamespace"),
            [name(NAMESPACE_IDENT)],
        )),
        stat(call(dot(name("F"), "using"), [string("Dom"), string("Ui")])),
    ])]);
    assert_eq!(output, expected);
}

#[test]
fn test_using_expansion_retains_the_original_statement() {
    let original = stat(call(dot(name("F"), "using"), [string("Dom")]));

    let output = TailConstructionOptimizer::new().optimize(&original);

    // ["block", [var, populate, original]]
    assert!(!output.identical(&original));
    let statements = child(&output, 1);
    assert_eq!(statements.as_seq().unwrap().len(), 3);
    assert_eq!(child(&statements, 0), var(NAMESPACE_IDENT, object([])));
    assert_eq!(
        child(&statements, 1),
        stat(call(
            dot(name("F"), "populateNamespace"),
            [name(NAMESPACE_IDENT)],
        ))
    );

    // The third statement is the original node itself, not a copy
    assert!(child(&statements, 2).identical(&original));
}

#[test]
fn test_using_requires_a_plain_name_receiver() {
    let input = stat(call(dot(dot(name("a"), "b"), "using"), [string("x")]));
    let output = TailConstructionOptimizer::new().optimize(&input);

    assert!(output.identical(&input));
    assert_eq!(
        output,
        stat(call(dot(dot(name("a"), "b"), "using"), [string("x")]))
    );
}

#[test]
fn test_bare_using_call_without_statement_is_left_alone() {
    // Only statement-position using calls introduce the namespace block
    let input = call(dot(name("F"), "using"), [string("Dom")]);
    let output = TailConstructionOptimizer::new().optimize(&input);

    assert!(output.identical(&input));
}

// ============================================================================
// Style Exports Tests
// ============================================================================

fn style_assignment(owner: Node) -> Node {
    stat(assign(
        dot(owner, "styleExports"),
        object([("color", string("red"))]),
    ))
}

fn normalized_assignment() -> Node {
    stat(assign(
        dot(dot(name("module"), "exports"), "styleExports"),
        object([]),
    ))
}

#[test]
fn test_module_exports_style_assignment_is_emptied() {
    let program = block([style_assignment(dot(name("module"), "exports"))]);

    let output = StyleExportsStripper::new().strip(&program);

    assert!(output.identical(&program));
    assert_eq!(output, block([normalized_assignment()]));
}

#[test]
fn test_exports_form_normalizes_to_module_exports() {
    let program = block([style_assignment(name("exports"))]);

    let output = StyleExportsStripper::new().strip(&program);

    assert_eq!(output, block([normalized_assignment()]));
}

#[test]
fn test_other_export_properties_pass_through() {
    let program = block([stat(assign(
        dot(dot(name("module"), "exports"), "render"),
        name("render"),
    ))]);

    let output = StyleExportsStripper::new().strip(&program);

    assert!(output.identical(&program));
    assert_eq!(
        output,
        block([stat(assign(
            dot(dot(name("module"), "exports"), "render"),
            name("render"),
        ))])
    );
}

#[test]
fn test_every_style_assignment_is_stripped_independently() {
    let program = block([
        style_assignment(dot(name("module"), "exports")),
        stat(assign(dot(dot(name("module"), "exports"), "render"), name("r"))),
        style_assignment(name("exports")),
    ]);

    let output = StyleExportsStripper::new().strip(&program);

    let expected = block([
        normalized_assignment(),
        stat(assign(dot(dot(name("module"), "exports"), "render"), name("r"))),
        normalized_assignment(),
    ]);
    assert_eq!(output, expected);
}

#[test]
fn test_statement_node_is_rewritten_in_place() {
    let statement = style_assignment(dot(name("module"), "exports"));
    let program = block([statement.clone()]);

    StyleExportsStripper::new().strip(&program);

    // The statement handle survives with normalized contents
    assert_eq!(statement, normalized_assignment());
}

#[test]
fn test_assignment_outside_statement_position_is_kept() {
    let input = assign(
        dot(dot(name("module"), "exports"), "styleExports"),
        object([("color", string("red"))]),
    );

    let output = StyleExportsStripper::new().strip(&input);

    assert!(output.identical(&input));
    assert_eq!(
        output,
        assign(
            dot(dot(name("module"), "exports"), "styleExports"),
            object([("color", string("red"))]),
        )
    );
}

#[test]
fn test_both_passes_compose() {
    // A module that constructs a component and exports styles
    let program = block([
        stat(call(dot(object([("x", num(1))]), "Panel"), [])),
        style_assignment(name("exports")),
    ]);

    let optimized = TailConstructionOptimizer::new().optimize(&program);
    let output = StyleExportsStripper::new().strip(&optimized);

    let expected = block([
        stat(call(
            dot(name(NAMESPACE_IDENT), "Panel"),
            [object([("x", num(1))])],
        )),
        normalized_assignment(),
    ]);
    assert_eq!(output, expected);
    assert!(output.identical(&program));
}
