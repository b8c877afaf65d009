use mewt_php::LanguageEngine;
use mewt_php::PhpLanguageEngine;
use mewt_php::types::Target;
use pretty_assertions::assert_eq;

fn php_target_from_source(source: &str) -> Target {
    Target::from_source("test.php", source)
}

/// Fully mutated sources produced by a single mutator, in source order
fn mutate_with(mutator: &str, source: &str) -> Vec<String> {
    let target = php_target_from_source(source);
    let engine = PhpLanguageEngine::new();
    engine
        .apply_mutators(&target, &[mutator])
        .iter()
        .map(|m| target.mutate(m).expect("mutant applies to its own target"))
        .collect()
}

fn assert_mutates(mutator: &str, input: &str, expected: &[&str]) {
    assert_eq!(mutate_with(mutator, input), expected);
}

fn assert_no_mutants(mutator: &str, input: &str) {
    assert_eq!(mutate_with(mutator, input), Vec::<String>::new());
}

#[test]
fn assign_coalesce_with_scalar_right_side() {
    assert_mutates(
        "AssignCoalesce",
        "<?php\n\n$a['value'] ??= 'otherValue';\n",
        &["<?php\n\n$a['value'] = 'otherValue';\n"],
    );
}

#[test]
fn assign_coalesce_with_expression_right_side() {
    assert_mutates(
        "AssignCoalesce",
        "<?php\n\n$a['value'] ??= 'other' . ' Value';\n",
        &["<?php\n\n$a['value'] = 'other' . ' Value';\n"],
    );
}

#[test]
fn assign_coalesce_with_variable_right_side() {
    assert_mutates(
        "AssignCoalesce",
        "<?php\n\n$a['value'] ??= $var;\n",
        &["<?php\n\n$a['value'] = $var;\n"],
    );
}

#[test]
fn assign_coalesce_ignores_binary_coalesce() {
    assert_no_mutants("AssignCoalesce", "<?php\n\n$a['value'] = $foo ?? $bar;\n");
}

#[test]
fn new_object_ignores_variable_class_name() {
    assert_no_mutants(
        "NewObject",
        r#"<?php

function test()
{
    $className = 'SimpleClass';
    return new $className();
}
"#,
    );
}

#[test]
fn new_object_ignores_non_nullable_class_return_type() {
    assert_no_mutants(
        "NewObject",
        r#"<?php

class Test
{
    function test(): stdClass
    {
        return new stdClass();
    }
}
"#,
    );
}

#[test]
fn new_object_ignores_fqcn_return_type_without_null() {
    assert_no_mutants(
        "NewObject",
        r#"<?php

class Test
{
    function test(): \Foo\Bar
    {
        return new \Foo\Bar();
    }
}
"#,
    );
}

#[test]
fn new_object_ignores_scalar_return_type_without_null() {
    assert_no_mutants(
        "NewObject",
        r#"<?php

class Test
{
    function test(): int
    {
        return new stdClass();
    }
}
"#,
    );
}

#[test]
fn new_object_mutates_without_return_type() {
    let input = r#"<?php

namespace NewObject_MutatesWithoutTypehint;

use stdClass;
class Test
{
    function test()
    {
        return new stdClass();
    }
}
"#;
    let expected = r#"<?php

namespace NewObject_MutatesWithoutTypehint;

use stdClass;
class Test
{
    function test()
    {
        new stdClass();
        return null;
    }
}
"#;
    assert_mutates("NewObject", input, &[expected]);
}

#[test]
fn new_object_mutates_nullable_class_return_type() {
    let input = r#"<?php

class Test
{
    function test(): ?stdClass
    {
        return new stdClass();
    }
}
"#;
    let expected = r#"<?php

class Test
{
    function test(): ?stdClass
    {
        new stdClass();
        return null;
    }
}
"#;
    assert_mutates("NewObject", input, &[expected]);
}

#[test]
fn new_object_mutates_nullable_scalar_return_type() {
    let input = r#"<?php

class Test
{
    function test(): ?int
    {
        return new stdClass();
    }
}
"#;
    let expected = r#"<?php

class Test
{
    function test(): ?int
    {
        new stdClass();
        return null;
    }
}
"#;
    assert_mutates("NewObject", input, &[expected]);
}

#[test]
fn new_object_mutates_union_with_null() {
    let mutated = mutate_with(
        "NewObject",
        "<?php\nfunction make(): Foo|null\n{\n    return new Foo(1, 2);\n}\n",
    );
    assert_eq!(
        mutated,
        vec!["<?php\nfunction make(): Foo|null\n{\n    new Foo(1, 2);\n    return null;\n}\n"]
    );
}

#[test]
fn new_object_ignores_anonymous_class() {
    assert_no_mutants(
        "NewObject",
        r#"<?php

class Test
{
    function test()
    {
        return new class {
            public $foo = 1;
        };
    }
}
"#,
    );
}

#[test]
fn new_object_uses_inner_closure_scope() {
    // The outer function has no return type, so its own return is mutated;
    // the closure's nullable return type plays no part.
    let input = r#"<?php

class Test
{
    function test()
    {
        $a = function ($element): ?stdClass {
            return $element;
        };
        return new stdClass();
    }
}
"#;
    let expected = r#"<?php

class Test
{
    function test()
    {
        $a = function ($element): ?stdClass {
            return $element;
        };
        new stdClass();
        return null;
    }
}
"#;
    assert_mutates("NewObject", input, &[expected]);
}

#[test]
fn new_object_respects_outer_non_nullable_type() {
    assert_no_mutants(
        "NewObject",
        r#"<?php

class Test
{
    function test(): stdClass
    {
        $a = function ($element): ?stdClass {
            return $element;
        };
        return new stdClass();
    }
}
"#,
    );
}

#[test]
fn new_object_mutates_nested_closure_independently() {
    let input = r#"<?php

function outer(): stdClass
{
    $make = function (): ?stdClass {
        return new stdClass();
    };
    return new stdClass();
}
"#;
    let expected = r#"<?php

function outer(): stdClass
{
    $make = function (): ?stdClass {
        new stdClass();
        return null;
    };
    return new stdClass();
}
"#;
    assert_mutates("NewObject", input, &[expected]);
}

#[test]
fn new_object_ignores_top_level_return() {
    assert_no_mutants("NewObject", "<?php\nreturn new Foo();\n");
}

#[test]
fn new_object_keeps_single_line_bodies_on_one_line() {
    assert_mutates(
        "NewObject",
        "<?php\nfunction f() { return new Foo(); }\n",
        &["<?php\nfunction f() { new Foo(); return null; }\n"],
    );
}

#[test]
fn new_object_sees_through_parentheses() {
    assert_mutates(
        "NewObject",
        "<?php\nfunction f() { return (new Foo()); }\n",
        &["<?php\nfunction f() { new Foo(); return null; }\n"],
    );
    assert_mutates(
        "NewObject",
        "<?php\nfunction f() { return ((new Foo)); }\n",
        &["<?php\nfunction f() { new Foo; return null; }\n"],
    );
    assert_no_mutants(
        "NewObject",
        "<?php\nfunction f() { return (new class {}); }\n",
    );
}

#[test]
fn this_mutates_under_nullable_return() {
    let input = r#"<?php

class Builder
{
    public function with(): ?self
    {
        return $this;
    }

    public function strict(): self
    {
        return $this;
    }
}
"#;
    let mutated = mutate_with("This", input);
    assert_eq!(mutated.len(), 1);
    assert!(mutated[0].contains("    public function with(): ?self\n    {\n        return null;\n"));
    assert!(mutated[0].contains("    public function strict(): self\n    {\n        return $this;\n"));
}

#[test]
fn identical_operators_swap() {
    assert_mutates(
        "Identical",
        "<?php\nif ($a === $b) {}\n",
        &["<?php\nif ($a !== $b) {}\n"],
    );
    assert_mutates(
        "NotIdentical",
        "<?php\nif ($a !== $b) {}\n",
        &["<?php\nif ($a === $b) {}\n"],
    );
    assert_no_mutants("Identical", "<?php\nif ($a == $b) {}\n");
}

#[test]
fn boolean_literals_flip() {
    assert_mutates(
        "TrueValue",
        "<?php\n$enabled = TRUE;\n",
        &["<?php\n$enabled = false;\n"],
    );
    assert_mutates(
        "FalseValue",
        "<?php\n$enabled = false;\n",
        &["<?php\n$enabled = true;\n"],
    );
}

#[test]
fn coalesce_swaps_operands() {
    assert_mutates(
        "Coalesce",
        "<?php\n$a = $foo ?? $bar;\n",
        &["<?php\n$a = $bar ?? $foo;\n"],
    );
    assert_no_mutants("Coalesce", "<?php\n$a = $foo ?? null;\n");
    assert_no_mutants("Coalesce", "<?php\n$a ??= $bar;\n");
}

#[test]
fn mutants_report_line_and_name() {
    let source = "<?php\n\nfunction f()\n{\n    return new Foo();\n}\n";
    let target = php_target_from_source(source);
    let engine = PhpLanguageEngine::new();
    let mutants = engine.apply_mutators(&target, &["NewObject"]);
    assert_eq!(mutants.len(), 1);
    assert_eq!(mutants[0].line(), 5);
    assert_eq!(mutants[0].mutator_name, "NewObject");
    assert_eq!(mutants[0].old_text, "return new Foo();");
}

#[test]
fn mutant_hashes_are_stable_and_distinct() {
    let source = "<?php\n$a ??= true;\n$b = $c === $d;\n";
    let target = php_target_from_source(source);
    let engine = PhpLanguageEngine::new();
    let first = engine.apply_all_mutations(&target);
    let second = engine.apply_all_mutations(&target);
    assert_eq!(first.len(), 3);
    let hashes: Vec<_> = first.iter().map(|m| m.hash.clone()).collect();
    assert_eq!(hashes, second.iter().map(|m| m.hash.clone()).collect::<Vec<_>>());
    let unique: std::collections::HashSet<_> = hashes.iter().collect();
    assert_eq!(unique.len(), hashes.len());
}
