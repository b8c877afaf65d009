use mewt_php::LanguageEngine;
use mewt_php::PhpLanguageEngine;
use mewt_php::types::Target;

#[test]
fn php_mutations_ignore_comment_regions() {
    let source = r#"<?php
// $a ??= 'x';
# $b = $c === $d;
/* return new Foo(); */
/**
 * @return true|false
 * $x = $y ?? $z;
 */
function build()
{
    // return $this;
    return new Foo();
}
"#;

    // 0-based lines that are entirely comments
    let commented_lines: &[u32] = &[1, 2, 3, 4, 5, 6, 7, 10];

    let target = Target::from_source("test.php", source);
    let engine = PhpLanguageEngine::new();
    let mutants = engine.apply_all_mutations(&target);

    for m in &mutants {
        assert!(
            !commented_lines.contains(&m.line_offset),
            "mutated on commented line: mutator={} line={}",
            m.mutator_name,
            m.line_offset
        );
    }

    // Only the real `return new Foo();` is left to mutate
    assert_eq!(mutants.len(), 1);
    assert_eq!(mutants[0].mutator_name, "NewObject");
    assert_eq!(mutants[0].line_offset, 11);
}

#[test]
fn trailing_comments_do_not_hide_code() {
    let source = "<?php\n$enabled = true; // default on\n";
    let target = Target::from_source("test.php", source);
    let engine = PhpLanguageEngine::new();
    let mutants = engine.apply_all_mutations(&target);
    assert_eq!(mutants.len(), 1);
    assert_eq!(mutants[0].old_text, "true");
}
