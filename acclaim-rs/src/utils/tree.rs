//! Tree rendering for skeleton hierarchies

use console::Style;
use std::collections::BTreeMap;
use std::fmt::Write;

/// A node in a rendered tree
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub name: String,
    pub node_type: NodeType,
    pub children: Vec<TreeNode>,
    pub metadata: BTreeMap<String, String>,
}

/// Kinds of nodes in a skeleton tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    /// The synthetic root
    Root,
    /// A defined bone
    Bone,
    /// A hierarchy entry without a bone definition
    Undefined,
    /// A bone already shown elsewhere in the tree
    Repeated,
}

/// Options for tree rendering
#[derive(Debug, Clone, Default)]
pub struct TreeOptions {
    pub max_depth: Option<usize>,
    pub no_color: bool,
    pub show_metadata: bool,
    pub compact: bool,
}

impl TreeNode {
    /// Create a new tree node
    pub fn new(name: impl Into<String>, node_type: NodeType) -> Self {
        Self {
            name: name.into(),
            node_type,
            children: Vec::new(),
            metadata: BTreeMap::new(),
        }
    }

    /// Add a child node
    pub fn add_child(mut self, child: TreeNode) -> Self {
        self.children.push(child);
        self
    }

    /// Add metadata
    pub fn with_metadata(mut self, key: &str, value: &str) -> Self {
        self.metadata.insert(key.to_string(), value.to_string());
        self
    }
}

impl NodeType {
    /// Marker shown before the node name
    pub fn icon(self) -> &'static str {
        match self {
            NodeType::Root => "◉",
            NodeType::Bone => "●",
            NodeType::Undefined => "✗",
            NodeType::Repeated => "↺",
        }
    }

    /// Color style for node type
    pub fn style(self, no_color: bool) -> Style {
        if no_color {
            Style::new()
        } else {
            match self {
                NodeType::Root => Style::new().bold().cyan(),
                NodeType::Bone => Style::new().green(),
                NodeType::Undefined => Style::new().red(),
                NodeType::Repeated => Style::new().yellow(),
            }
        }
    }
}

/// Render a tree structure to string
pub fn render_tree(root: &TreeNode, options: &TreeOptions) -> String {
    let mut output = String::new();
    render_node(root, &mut output, "", true, 0, options);
    output
}

/// Render a single node and its children
fn render_node(
    node: &TreeNode,
    output: &mut String,
    prefix: &str,
    is_last: bool,
    depth: usize,
    options: &TreeOptions,
) {
    if let Some(max_depth) = options.max_depth
        && depth > max_depth
    {
        return;
    }

    let icon = node.node_type.icon();
    let style = node.node_type.style(options.no_color);
    let connector = if depth == 0 {
        ""
    } else if is_last {
        "└── "
    } else {
        "├── "
    };

    let _ = write!(
        output,
        "{}{}{} {}",
        prefix,
        connector,
        icon,
        style.apply_to(&node.name)
    );

    if options.show_metadata && options.compact && !node.metadata.is_empty() {
        let parts: Vec<String> = node
            .metadata
            .iter()
            .map(|(key, value)| format!("{key}:{value}"))
            .collect();
        let _ = write!(output, " [{}]", parts.join(", "));
    }
    output.push('\n');

    let child_prefix = if depth == 0 {
        String::new()
    } else {
        format!("{}{}", prefix, if is_last { "    " } else { "│   " })
    };

    if options.show_metadata && !options.compact {
        let meta_style = if options.no_color {
            Style::new()
        } else {
            Style::new().dim()
        };
        for (key, value) in &node.metadata {
            let _ = writeln!(
                output,
                "{}    {}: {}",
                child_prefix,
                meta_style.apply_to(key),
                value
            );
        }
    }

    for (i, child) in node.children.iter().enumerate() {
        let is_last_child = i == node.children.len() - 1;
        render_node(
            child,
            output,
            &child_prefix,
            is_last_child,
            depth + 1,
            options,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TreeNode {
        TreeNode::new("walk.asf", NodeType::Root)
            .with_metadata("bones", "3")
            .add_child(
                TreeNode::new("lfemur", NodeType::Bone)
                    .with_metadata("dof", "rx ry rz")
                    .add_child(TreeNode::new("ltibia", NodeType::Bone)),
            )
            .add_child(TreeNode::new("ghost", NodeType::Undefined))
    }

    #[test]
    fn test_tree_rendering() {
        let options = TreeOptions {
            no_color: true,
            show_metadata: true,
            ..TreeOptions::default()
        };
        let output = render_tree(&sample(), &options);

        assert!(output.starts_with("◉ walk.asf\n"));
        assert!(output.contains("├── ● lfemur"));
        assert!(output.contains("│   └── ● ltibia"));
        assert!(output.contains("└── ✗ ghost"));
        assert!(output.contains("dof: rx ry rz"));
    }

    #[test]
    fn test_depth_limit_and_compact() {
        let options = TreeOptions {
            max_depth: Some(1),
            no_color: true,
            show_metadata: true,
            compact: true,
        };
        let output = render_tree(&sample(), &options);

        assert!(output.contains("lfemur [dof:rx ry rz]"));
        assert!(!output.contains("ltibia"));
    }
}
