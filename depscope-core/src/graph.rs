use crate::store::PackageStore;
use serde_json::Value;

pub const UNKNOWN_VERSION: &str = "unknown";

/// One occurrence of a package within the resolved tree.
///
/// Identity is positional: the same name+version appearing under two
/// different parents is two distinct nodes, and each renders independently.
#[derive(Debug, Clone)]
pub struct PackageNode {
    pub name: String,
    pub version: String,
    pub children: Vec<PackageNode>,
}

impl PackageNode {
    /// Build a node from one entry of the manager's `ls --json` report.
    ///
    /// The report shape is `{version?, dependencies?: {name: {...}}}` at
    /// arbitrary depth. Absent fields are never an error: a missing version
    /// becomes the sentinel, a missing dependency map a leaf. Child order is
    /// the order the manager reported.
    pub fn from_report(name: &str, report: &Value) -> Self {
        let version = report
            .get("version")
            .and_then(Value::as_str)
            .unwrap_or(UNKNOWN_VERSION)
            .to_string();

        let children = report
            .get("dependencies")
            .and_then(Value::as_object)
            .map(|deps| {
                deps.iter()
                    .map(|(child, value)| PackageNode::from_report(child, value))
                    .collect()
            })
            .unwrap_or_default();

        PackageNode {
            name: name.to_string(),
            version,
            children,
        }
    }

    /// Names of the root's direct dependencies, in manager order. This is
    /// the flattened set the size ledger and the alternative matcher share.
    pub fn direct_dependency_names(&self) -> Vec<String> {
        self.children.iter().map(|child| child.name.clone()).collect()
    }
}

/// Depth-first pre-order rendering of the tree, one line per node.
///
/// Peer requirements come from each package's on-disk manifest, not from
/// the tree; a package that cannot be read simply gets no peer lines.
pub fn render_tree(root: &PackageNode, store: &dyn PackageStore) -> Vec<String> {
    let mut lines = Vec::new();
    let mut path = Vec::new();
    render_node(root, 0, store, &mut path, &mut lines);
    lines
}

fn render_node(
    node: &PackageNode,
    depth: usize,
    store: &dyn PackageStore,
    path: &mut Vec<String>,
    lines: &mut Vec<String>,
) {
    lines.push(format!("{}{}@{}", indent(depth), node.name, node.version));

    if let Some(manifest) = store.read_manifest(&node.name) {
        for (peer, range) in &manifest.peer_dependencies {
            lines.push(format!("{}requires {}@{}", indent(depth + 1), peer, range));
        }
    }

    path.push(node.name.clone());

    for child in &node.children {
        // A name already on the root-to-node path means the manager reported
        // a cycle; mark it instead of recursing forever.
        if path.iter().any(|ancestor| ancestor == &child.name) {
            lines.push(format!(
                "{}{}@{} (cycle)",
                indent(depth + 1),
                child.name,
                child.version
            ));
            continue;
        }

        render_node(child, depth + 1, store, path, lines);
    }

    path.pop();
}

fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::Manifest;
    use crate::store::fixtures::MemoryStore;
    use serde_json::json;

    fn node(name: &str, version: &str, children: Vec<PackageNode>) -> PackageNode {
        PackageNode {
            name: name.to_string(),
            version: version.to_string(),
            children,
        }
    }

    #[test]
    fn missing_version_defaults_to_sentinel() {
        let report = json!({"dependencies": {}});
        let parsed = PackageNode::from_report("pkg", &report);
        assert_eq!(parsed.version, UNKNOWN_VERSION);
        assert!(parsed.children.is_empty());
    }

    #[test]
    fn missing_dependencies_is_a_leaf() {
        let report = json!({"version": "2.0.0"});
        let parsed = PackageNode::from_report("pkg", &report);
        assert!(parsed.children.is_empty());
    }

    #[test]
    fn child_order_follows_the_report() {
        // Deliberately not alphabetical; the parser must not re-sort
        let raw = r#"{
            "version": "1.0.0",
            "dependencies": {
                "zebra": {"version": "3.0.0"},
                "apple": {"version": "1.0.0"},
                "mango": {"version": "2.0.0"}
            }
        }"#;
        let report: Value = serde_json::from_str(raw).unwrap();
        let parsed = PackageNode::from_report("root", &report);
        let names = parsed.direct_dependency_names();
        assert_eq!(names, vec!["zebra", "apple", "mango"]);
    }

    #[test]
    fn renders_one_line_per_node_with_depth_indentation() {
        let root = node(
            "app",
            "1.0.0",
            vec![
                node("a", "1.1.0", vec![node("b", "2.0.0", vec![])]),
                node("c", "3.0.0", vec![]),
            ],
        );
        let store = MemoryStore::default();

        let lines = render_tree(&root, &store);
        assert_eq!(
            lines,
            vec![
                "app@1.0.0",
                "  a@1.1.0",
                "    b@2.0.0",
                "  c@3.0.0",
            ]
        );
    }

    #[test]
    fn diamond_positions_render_independently() {
        let root = node(
            "app",
            "1.0.0",
            vec![
                node("a", "1.0.0", vec![node("shared", "1.0.0", vec![])]),
                node("b", "1.0.0", vec![node("shared", "2.0.0", vec![])]),
            ],
        );
        let store = MemoryStore::default();

        let lines = render_tree(&root, &store);
        assert!(lines.contains(&"    shared@1.0.0".to_string()));
        assert!(lines.contains(&"    shared@2.0.0".to_string()));
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn peer_requirements_come_from_the_store() {
        let root = node("app", "1.0.0", vec![node("react-dom", "18.2.0", vec![])]);

        let mut manifest = Manifest::default();
        manifest
            .peer_dependencies
            .insert("react".to_string(), "^18.2.0".to_string());
        let store = MemoryStore::default().with_manifest("react-dom", manifest);

        let lines = render_tree(&root, &store);
        assert_eq!(
            lines,
            vec![
                "app@1.0.0",
                "  react-dom@18.2.0",
                "    requires react@^18.2.0",
            ]
        );
    }

    #[test]
    fn cyclic_input_terminates_with_a_marker() {
        // a -> b -> a re-enters the current path; the walk must prune there
        let root = node(
            "app",
            "1.0.0",
            vec![node(
                "a",
                "1.0.0",
                vec![node("b", "1.0.0", vec![node("a", "1.0.0", vec![])])],
            )],
        );
        let store = MemoryStore::default();

        let lines = render_tree(&root, &store);
        assert_eq!(
            lines,
            vec![
                "app@1.0.0",
                "  a@1.0.0",
                "    b@1.0.0",
                "      a@1.0.0 (cycle)",
            ]
        );
    }

    #[test]
    fn repeated_name_off_the_path_is_not_a_cycle() {
        // Sibling subtrees may both contain "shared"; only path re-entry counts
        let root = node(
            "app",
            "1.0.0",
            vec![
                node("a", "1.0.0", vec![node("shared", "1.0.0", vec![])]),
                node("shared", "1.0.0", vec![]),
            ],
        );
        let store = MemoryStore::default();

        let lines = render_tree(&root, &store);
        assert!(!lines.iter().any(|line| line.contains("(cycle)")));
        assert_eq!(lines.len(), 4);
    }
}
