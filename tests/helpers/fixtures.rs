//! Builders for positioned trees used across the integration tests.
//!
//! There is no parser in this crate, so fixtures place spans by locating
//! the relevant substrings in the source text.

use text_size::TextSize;
use treetext::{LineIndex, NodeId, Span, Tree};

/// Span of the byte range starting at `start` with `len` bytes.
pub fn span_at(source: &str, start: usize, len: usize) -> Span {
    let index = LineIndex::new(source);
    Span::new(
        index.position(TextSize::new(start as u32)),
        index.position(TextSize::new((start + len - 1) as u32)),
    )
}

/// Span of the first occurrence of `needle` in `source`.
pub fn span_of(source: &str, needle: &str) -> Span {
    let start = source.find(needle).expect("needle not found in source");
    span_at(source, start, needle.len())
}

/// Span covering all of `source`.
pub fn full_span(source: &str) -> Span {
    span_at(source, 0, source.len())
}

/// A parameter node for the `"<type> <name>"` text found in `source`.
pub fn param_node(tree: &mut Tree, source: &str, ty: &str, name: &str) -> NodeId {
    let needle = format!("{ty} {name}");
    let start = source.find(&needle).expect("parameter text not in source");
    let ty_node = tree.new_type(ty, span_at(source, start, ty.len()));
    let name_node = tree.new_name(
        name,
        span_at(source, start + needle.len() - name.len(), name.len()),
    );
    tree.new_parameter(ty_node, name_node, span_at(source, start, needle.len()))
}

/// A `void foo(...) { ... }` method covering all of `source`, with the
/// given `(type, name)` parameters.
pub fn method_fixture(source: &str, params: &[(&str, &str)]) -> (Tree, NodeId) {
    let mut tree = Tree::new();
    let ret = tree.new_type("void", span_of(source, "void"));
    let name = tree.new_name("foo", span_of(source, "foo"));
    let params: Vec<NodeId> = params
        .iter()
        .map(|(ty, nm)| param_node(&mut tree, source, ty, nm))
        .collect();
    let open = source.find('{').expect("no body in source");
    let close = source.rfind('}').expect("no body in source");
    let body = tree.new_block(span_at(source, open, close - open + 1));
    let method = tree.new_method(ret, name, params, Some(body), full_span(source));
    (tree, method)
}

/// An `int f;` field declaration for the given source fragment.
pub fn field_fixture_in(tree: &mut Tree, source: &str) -> NodeId {
    let start = source.find("int f;").expect("field text not in source");
    let ty = tree.new_type("int", span_at(source, start, 3));
    let name = tree.new_name("f", span_at(source, start + 4, 1));
    let var = tree.new_variable(name, span_at(source, start + 4, 1));
    tree.new_field(ty, vec![var], span_at(source, start, "int f;".len()))
}

/// A `class A { int f; void foo(...){...} }` tree covering all of `source`.
pub struct ClassFixture {
    pub tree: Tree,
    pub class: NodeId,
    pub field: NodeId,
    pub method: NodeId,
}

/// `body_text` and `method_text` are the exact body and method substrings
/// of `source`; `params` lists the method's `(type, name)` parameters.
pub fn class_fixture(
    source: &str,
    params: &[(&str, &str)],
    body_text: &str,
    method_text: &str,
) -> ClassFixture {
    let mut tree = Tree::new();
    let name = tree.new_name("A", span_of(source, "A"));
    let field = field_fixture_in(&mut tree, source);

    let ret = tree.new_type("void", span_of(source, "void"));
    let m_name = tree.new_name("foo", span_of(source, "foo"));
    let params: Vec<NodeId> = params
        .iter()
        .map(|(ty, nm)| param_node(&mut tree, source, ty, nm))
        .collect();
    let body = tree.new_block(span_of(source, body_text));
    let method = tree.new_method(ret, m_name, params, Some(body), span_of(source, method_text));

    let class = tree.new_class(name, vec![field, method], full_span(source));
    ClassFixture {
        tree,
        class,
        field,
        method,
    }
}

/// Wrap a root declaration in a compilation unit covering the same span.
pub fn wrap_in_unit(tree: &mut Tree, root: NodeId, source: &str) -> NodeId {
    tree.new_compilation_unit(vec![root], full_span(source))
}
