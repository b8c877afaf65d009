use tree_sitter::{Language, Node, Parser, Tree, TreeCursor};

/// Parse source text with the given grammar
pub fn parse_source(source: &str, language: &Language) -> Option<Tree> {
    let mut parser = Parser::new();
    parser.set_language(language).ok()?;
    parser.parse(source, None)
}

/// Get text content of a node from source
pub fn node_text<'a>(node: &Node, source: &'a str) -> &'a str {
    &source[node.start_byte()..node.end_byte()]
}

/// Check if a node is inside a comment
pub fn is_in_comment(node: &Node) -> bool {
    node.kind() == "comment" || ancestors(node).any(|parent| parent.kind() == "comment")
}

/// Iterate over the parents of a node, nearest first
pub fn ancestors<'tree>(node: &Node<'tree>) -> impl Iterator<Item = Node<'tree>> + use<'tree> {
    std::iter::successors(node.parent(), |n| n.parent())
}

/// Direct children of a node, named and anonymous
pub fn children<'tree>(node: &Node<'tree>) -> Vec<Node<'tree>> {
    let mut cursor = node.walk();
    node.children(&mut cursor).collect()
}

/// First direct child (named or anonymous) with one of the given kinds
pub fn child_of_kind<'tree>(node: &Node<'tree>, kinds: &[&str]) -> Option<Node<'tree>> {
    children(node)
        .into_iter()
        .find(|child| kinds.contains(&child.kind()))
}

/// Visit all nodes in the tree with a callback, using a provided cursor for advanced usage
pub fn visit_nodes_with_cursor<F>(node: Node, cursor: &mut TreeCursor, callback: &mut F)
where
    F: FnMut(Node),
{
    callback(node);

    if cursor.goto_first_child() {
        loop {
            let child = cursor.node();
            visit_nodes_with_cursor(child, cursor, callback);

            if !cursor.goto_next_sibling() {
                break;
            }
        }
        cursor.goto_parent();
    }
}

/// Calculate line offset for a byte position
pub fn calculate_line_offset(source: &str, byte_offset: usize) -> u32 {
    source
        .bytes()
        .take(byte_offset)
        .filter(|&b| b == b'\n')
        .count() as u32
}
