//! Selector matching against the arena DOM
//!
//! Complex selectors are matched right to left: the subject compound is
//! checked against the candidate element, then combinators walk ancestors or
//! preceding siblings. Queries visit each descendant exactly once in
//! pre-order, so results are in document order and duplicate-free.

use domq_dom::{DomTree, NodeId};

use crate::selectors::{
    Combinator, ComplexSelector, CompoundSelector, SelectorList, SimpleSelector,
};

/// All elements strictly below `root` matching the list, in document order
pub fn query_all(tree: &DomTree, root: NodeId, list: &SelectorList) -> Vec<NodeId> {
    let results: Vec<NodeId> = tree
        .descendants(root)
        .with_nodes()
        .filter(|(id, node)| node.is_element() && matches(tree, *id, list))
        .map(|(id, _)| id)
        .collect();
    tracing::debug!(root = ?root, count = results.len(), "query_all");
    results
}

/// First element below `root` matching the list, in document order
pub fn query_first(tree: &DomTree, root: NodeId, list: &SelectorList) -> Option<NodeId> {
    tree.descendants(root)
        .with_nodes()
        .find(|(id, node)| node.is_element() && matches(tree, *id, list))
        .map(|(id, _)| id)
}

/// Check whether `id` matches any selector in the list
pub fn matches(tree: &DomTree, id: NodeId, list: &SelectorList) -> bool {
    list.0.iter().any(|sel| match_complex(tree, id, sel))
}

fn match_complex(tree: &DomTree, id: NodeId, sel: &ComplexSelector) -> bool {
    match_at(tree, id, sel, sel.compounds.len() - 1)
}

fn match_at(tree: &DomTree, id: NodeId, sel: &ComplexSelector, idx: usize) -> bool {
    if !match_compound(tree, id, &sel.compounds[idx]) {
        return false;
    }
    if idx == 0 {
        return true;
    }

    match sel.combinators[idx - 1] {
        Combinator::Child => parent_element(tree, id)
            .map_or(false, |parent| match_at(tree, parent, sel, idx - 1)),
        Combinator::Descendant => {
            let mut cur = tree.parent(id);
            while let Some(ancestor) = cur {
                if is_element(tree, ancestor) && match_at(tree, ancestor, sel, idx - 1) {
                    return true;
                }
                cur = tree.parent(ancestor);
            }
            false
        }
        Combinator::NextSibling => prev_element_sibling(tree, id)
            .map_or(false, |sibling| match_at(tree, sibling, sel, idx - 1)),
        Combinator::SubsequentSibling => {
            let mut cur = prev_element_sibling(tree, id);
            while let Some(sibling) = cur {
                if match_at(tree, sibling, sel, idx - 1) {
                    return true;
                }
                cur = prev_element_sibling(tree, sibling);
            }
            false
        }
    }
}

fn match_compound(tree: &DomTree, id: NodeId, compound: &CompoundSelector) -> bool {
    let Some(elem) = tree.get(id).and_then(|n| n.as_element()) else {
        return false;
    };

    compound.parts.iter().all(|part| match part {
        SimpleSelector::Universal => true,
        SimpleSelector::Type(tag) => elem.tag.eq_ignore_ascii_case(tag),
        SimpleSelector::Id(id) => elem.id.as_deref() == Some(id.as_str()),
        SimpleSelector::Class(class) => elem.has_class(class),
        SimpleSelector::Attribute(attr) => attr.matches(elem.get_attr(&attr.name)),
    })
}

fn is_element(tree: &DomTree, id: NodeId) -> bool {
    tree.get(id).is_some_and(|n| n.is_element())
}

fn parent_element(tree: &DomTree, id: NodeId) -> Option<NodeId> {
    let parent = tree.parent(id)?;
    is_element(tree, parent).then_some(parent)
}

fn prev_element_sibling(tree: &DomTree, id: NodeId) -> Option<NodeId> {
    let mut cur = tree.prev_sibling(id);
    while let Some(sibling) = cur {
        if is_element(tree, sibling) {
            return Some(sibling);
        }
        cur = tree.prev_sibling(sibling);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    /// div#top
    ///   p.intro > em
    ///   p.body
    ///     em.hit
    ///   span[data-k="v"]
    fn fixture() -> (DomTree, Vec<NodeId>) {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let p1 = tree.create_element("p");
        let em1 = tree.create_element("em");
        let p2 = tree.create_element("p");
        let em2 = tree.create_element("em");
        let span = tree.create_element("span");

        let set = |tree: &mut DomTree, id: NodeId, name: &str, value: &str| {
            tree.get_mut(id)
                .unwrap()
                .as_element_mut()
                .unwrap()
                .set_attr(name, value);
        };
        set(&mut tree, div, "id", "top");
        set(&mut tree, p1, "class", "intro");
        set(&mut tree, p2, "class", "body");
        set(&mut tree, em2, "class", "hit");
        set(&mut tree, span, "data-k", "v");

        let root = tree.root();
        tree.append_child(root, div).unwrap();
        tree.append_child(div, p1).unwrap();
        tree.append_child(p1, em1).unwrap();
        tree.append_child(div, p2).unwrap();
        tree.append_child(p2, em2).unwrap();
        tree.append_child(div, span).unwrap();

        (tree, vec![div, p1, em1, p2, em2, span])
    }

    #[test]
    fn test_query_all_type() {
        let (tree, ids) = fixture();
        let list = parse("em").unwrap();
        assert_eq!(query_all(&tree, tree.root(), &list), vec![ids[2], ids[4]]);
    }

    #[test]
    fn test_query_all_document_order() {
        let (tree, ids) = fixture();
        let list = parse("p, em, span").unwrap();
        assert_eq!(
            query_all(&tree, tree.root(), &list),
            vec![ids[1], ids[2], ids[3], ids[4], ids[5]]
        );
    }

    #[test]
    fn test_child_combinator() {
        let (tree, ids) = fixture();
        let list = parse(".intro > em").unwrap();
        assert_eq!(query_all(&tree, tree.root(), &list), vec![ids[2]]);
    }

    #[test]
    fn test_descendant_combinator() {
        let (tree, ids) = fixture();
        let list = parse("#top em").unwrap();
        assert_eq!(query_all(&tree, tree.root(), &list), vec![ids[2], ids[4]]);
    }

    #[test]
    fn test_sibling_combinators() {
        let (tree, ids) = fixture();
        let next = parse(".intro + p").unwrap();
        assert_eq!(query_all(&tree, tree.root(), &next), vec![ids[3]]);

        let subsequent = parse(".intro ~ span").unwrap();
        assert_eq!(query_all(&tree, tree.root(), &subsequent), vec![ids[5]]);
    }

    #[test]
    fn test_attribute_query() {
        let (tree, ids) = fixture();
        let list = parse("span[data-k=v]").unwrap();
        assert_eq!(query_all(&tree, tree.root(), &list), vec![ids[5]]);
    }

    #[test]
    fn test_scoped_root() {
        let (tree, ids) = fixture();
        let list = parse("em").unwrap();
        // Only descendants of p2 are candidates.
        assert_eq!(query_all(&tree, ids[3], &list), vec![ids[4]]);
    }

    #[test]
    fn test_query_first() {
        let (tree, ids) = fixture();
        let list = parse("em").unwrap();
        assert_eq!(query_first(&tree, tree.root(), &list), Some(ids[2]));
        assert_eq!(query_first(&tree, tree.root(), &parse("table").unwrap()), None);
    }
}
