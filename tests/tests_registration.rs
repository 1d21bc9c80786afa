//! Recipe construction from original source text, and faithful reprinting.

#[path = "helpers/fixtures.rs"]
#[allow(dead_code)]
mod fixtures;

use fixtures::{class_fixture, full_span, span_at, span_of, wrap_in_unit};
use treetext::{
    EditError, LexicalPreservingPrinter, LineIndex, NodeKind, Span, TextElement, Tree,
};

const COMMENTED: &str =
    "class /*a comment*/ A {\t\t\n int f;\n\n\n         void foo(int p  ) { return  'z'  \t; }}";
const COMMENTED_BODY: &str = "{ return  'z'  \t; }";
const COMMENTED_METHOD: &str = "void foo(int p  ) { return  'z'  \t; }";

#[test]
fn test_recipe_for_simplest_class() {
    let source = "class A {}";
    let mut tree = Tree::new();
    let name = tree.new_name("A", span_of(source, "A"));
    let class = tree.new_class(name, vec![], full_span(source));
    let unit = wrap_in_unit(&mut tree, class, source);

    let mut printer = LexicalPreservingPrinter::new();
    printer.register_subtree(&tree, unit, source).unwrap();

    // the class covers the whole unit, so the unit is a bare child ref
    let unit_text = printer.text_for(unit).unwrap();
    assert_eq!(unit_text.elements(), &[TextElement::Child(class)]);

    let class_text = printer.text_for(class).unwrap();
    assert_eq!(class_text.len(), 3);
    assert_eq!(class_text.element(0).as_literal(), Some("class "));
    assert_eq!(class_text.element(1).as_child(), Some(name));
    assert_eq!(class_text.element(2).as_literal(), Some(" {}"));

    let name_text = printer.text_for(name).unwrap();
    assert_eq!(name_text.elements(), &[TextElement::Literal("A".into())]);
}

#[test]
fn test_simplest_class_prints_back_verbatim() {
    let source = "class A {}";
    let mut tree = Tree::new();
    let name = tree.new_name("A", span_of(source, "A"));
    let class = tree.new_class(name, vec![], full_span(source));
    let unit = wrap_in_unit(&mut tree, class, source);

    let mut printer = LexicalPreservingPrinter::new();
    printer.register_subtree(&tree, unit, source).unwrap();
    assert_eq!(printer.print(&tree, unit), source);
}

#[test]
fn test_comments_and_whitespace_survive_the_roundtrip() {
    let fixture = class_fixture(COMMENTED, &[("int", "p")], COMMENTED_BODY, COMMENTED_METHOD);
    let mut tree = fixture.tree;
    let unit = wrap_in_unit(&mut tree, fixture.class, COMMENTED);

    let mut printer = LexicalPreservingPrinter::new();
    printer.register_subtree(&tree, unit, COMMENTED).unwrap();

    assert_eq!(printer.print(&tree, unit), COMMENTED);
    assert_eq!(printer.print(&tree, fixture.method), COMMENTED_METHOD);
}

#[test]
fn test_every_node_prints_its_own_source_slice() {
    let fixture = class_fixture(COMMENTED, &[("int", "p")], COMMENTED_BODY, COMMENTED_METHOD);
    let mut tree = fixture.tree;
    let unit = wrap_in_unit(&mut tree, fixture.class, COMMENTED);

    let mut printer = LexicalPreservingPrinter::new();
    printer.register_subtree(&tree, unit, COMMENTED).unwrap();

    let index = LineIndex::new(COMMENTED);
    for node in tree.descendants(unit) {
        let slice = index.slice(COMMENTED, tree.span(node)).unwrap();
        assert_eq!(printer.print(&tree, node), slice, "node {node:?}");
    }
}

#[test]
fn test_registration_rejects_unknown_spans() {
    let mut tree = Tree::new();
    let name = tree.new_name("A", Span::UNKNOWN);
    let mut printer = LexicalPreservingPrinter::new();
    let err = printer.register_text(&tree, name, "class A {}").unwrap_err();
    assert!(matches!(err, EditError::UnknownSpan { node } if node == name));
}

#[test]
fn test_registration_rejects_overlapping_children() {
    let source = "class AB {}";
    let mut tree = Tree::new();
    // two children whose byte ranges overlap cannot come from one source
    let name = tree.new_name("AB", span_at(source, 6, 2));
    let member = tree.new_block(span_at(source, 7, 4));
    let class = tree.new_class(name, vec![member], full_span(source));

    let mut printer = LexicalPreservingPrinter::new();
    let err = printer.register_text(&tree, class, source).unwrap_err();
    assert!(matches!(err, EditError::MalformedPositions { parent, .. } if parent == class));
}

#[test]
fn test_registration_rejects_spans_past_the_source() {
    let source = "class A {}";
    let mut tree = Tree::new();
    let name = tree.new_name("A", span_at("class A {} trailing", 6, 10));
    let mut printer = LexicalPreservingPrinter::new();
    let err = printer.register_text(&tree, name, source).unwrap_err();
    assert!(matches!(err, EditError::MalformedPositions { .. }));
}

#[test]
fn test_failed_subtree_registration_leaves_no_recipes() {
    let source = "void foo(int p) {}";
    let mut tree = Tree::new();
    let ret = tree.new_type("void", span_of(source, "void"));
    let name = tree.new_name("foo", span_of(source, "foo"));
    let p_ty = tree.new_type("int", span_of(source, "int"));
    // a synthetic name deep in the subtree fails registration midway
    let p_name = tree.new_name("p", Span::UNKNOWN);
    let param = tree.new_parameter(p_ty, p_name, span_of(source, "int p"));
    let body = tree.new_block(span_of(source, "{}"));
    let method = tree.new_method(ret, name, vec![param], Some(body), full_span(source));

    let mut printer = LexicalPreservingPrinter::new();
    let err = printer.register_subtree(&tree, method, source).unwrap_err();
    assert!(matches!(err, EditError::UnknownSpan { node } if node == p_name));
    for node in tree.descendants(method) {
        assert!(printer.text_for(node).is_none(), "node {node:?}");
    }
}

#[test]
fn test_unregistered_nodes_fall_back_to_default_rendering() {
    let mut tree = Tree::new();
    let ret = tree.new_type("void", Span::UNKNOWN);
    let name = tree.new_name("foo", Span::UNKNOWN);
    let p_ty = tree.new_type("float", Span::UNKNOWN);
    let p_name = tree.new_name("p1", Span::UNKNOWN);
    let param = tree.new_parameter(p_ty, p_name, Span::UNKNOWN);
    let body = tree.new_block(Span::UNKNOWN);
    let method = tree.new_method(ret, name, vec![param], Some(body), Span::UNKNOWN);

    let printer = LexicalPreservingPrinter::new();
    assert_eq!(printer.print(&tree, method), "void foo(float p1) {}");
    assert_eq!(printer.print(&tree, param), "float p1");
}

#[test]
fn test_default_rendering_for_fields_and_classes() {
    let mut tree = Tree::new();
    let ty = tree.new_type("int", Span::UNKNOWN);
    let f = tree.new_name("myField", Span::UNKNOWN);
    let var = tree.new_variable(f, Span::UNKNOWN);
    let field = tree.new_field(ty, vec![var], Span::UNKNOWN);
    let name = tree.new_name("A", Span::UNKNOWN);
    let class = tree.new_class(name, vec![field], Span::UNKNOWN);
    assert_eq!(tree.kind(class), NodeKind::ClassDecl);

    let printer = LexicalPreservingPrinter::new();
    assert_eq!(printer.print(&tree, field), "int myField;");
    assert_eq!(printer.print(&tree, class), "class A { int myField; }");
}

#[test]
fn test_reregistration_replaces_the_recipe() {
    let source = "class A {}";
    let mut tree = Tree::new();
    let name = tree.new_name("A", span_of(source, "A"));
    let mut printer = LexicalPreservingPrinter::new();
    printer.register_text(&tree, name, source).unwrap();
    assert_eq!(printer.print(&tree, name), "A");

    let edited = "class B {}";
    tree.set_token(name, "B").unwrap();
    printer.register_text(&tree, name, edited).unwrap();
    assert_eq!(printer.print(&tree, name), "B");
}
