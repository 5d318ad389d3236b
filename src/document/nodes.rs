//! Element helpers shared by the alert parser and the feed adapters.

use roxmltree::Node;

/// An element child together with its structural path.
#[derive(Debug, Clone)]
pub struct Child<'a, 'input> {
    pub node: Node<'a, 'input>,
    pub name: String,
    pub path: String,
}

impl Child<'_, '_> {
    pub fn text(&self) -> String {
        text(self.node)
    }

    pub fn in_namespace(&self, ns: &str) -> bool {
        self.node.tag_name().namespace() == Some(ns)
    }
}

/// Element children of `parent`, each with a 1-based same-name index
/// appended to `parent_path`.
pub fn element_children<'a, 'input>(
    parent: Node<'a, 'input>,
    parent_path: &str,
) -> Vec<Child<'a, 'input>> {
    let mut seen: Vec<(String, usize)> = Vec::new();
    let mut out = Vec::new();

    for node in parent.children().filter(Node::is_element) {
        let name = node.tag_name().name().to_string();
        let index = match seen.iter_mut().find(|(n, _)| *n == name) {
            Some((_, count)) => {
                *count += 1;
                *count
            }
            None => {
                seen.push((name.clone(), 1));
                1
            }
        };
        let path = format!("{parent_path}/{name}[{index}]");
        out.push(Child { node, name, path });
    }

    out
}

/// 1-based index of `node` among element siblings sharing its local name.
pub fn sibling_index(node: Node<'_, '_>) -> usize {
    let name = node.tag_name().name();
    1 + node
        .prev_siblings()
        .filter(|n| *n != node && n.is_element() && n.tag_name().name() == name)
        .count()
}

/// Concatenated direct text children, trimmed.
pub fn text(node: Node<'_, '_>) -> String {
    let raw: String = node
        .children()
        .filter(Node::is_text)
        .filter_map(|n| n.text())
        .collect();
    raw.trim().to_string()
}

/// Trimmed text of the first child named `name`, if it has any.
pub fn child_text(children: &[Child<'_, '_>], name: &str) -> Option<String> {
    children
        .iter()
        .find(|c| c.name == name)
        .map(Child::text)
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_children_get_same_name_indexes() {
        let doc = roxmltree::Document::parse("<r><a/><b/><a>x</a></r>").unwrap();
        let children = element_children(doc.root_element(), "/r[1]");
        let paths: Vec<&str> = children.iter().map(|c| c.path.as_str()).collect();
        assert_eq!(paths, vec!["/r[1]/a[1]", "/r[1]/b[1]", "/r[1]/a[2]"]);
        assert_eq!(sibling_index(children[2].node), 2);
        assert_eq!(child_text(&children, "a"), None);
    }

    #[test]
    fn test_text_joins_cdata_and_trims() {
        let doc = roxmltree::Document::parse("<a>  one <![CDATA[two]]> </a>").unwrap();
        assert_eq!(text(doc.root_element()), "one two");
    }
}
