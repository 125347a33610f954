//! In-memory registry tree produced by the registry decoder.

/// Typed payload of a registry node.
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryValue {
    Directory(Vec<RegistryNode>),
    String(String),
    Int(i32),
    Float(f64),
    IntArray(Vec<i32>),
}

impl RegistryValue {
    pub fn kind(&self) -> &'static str {
        match self {
            RegistryValue::Directory(_) => "directory",
            RegistryValue::String(_) => "string",
            RegistryValue::Int(_) => "int",
            RegistryValue::Float(_) => "float",
            RegistryValue::IntArray(_) => "int[]",
        }
    }
}

/// A named node. Sibling names are not unique; lookups see the first match only.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistryNode {
    pub name: String,
    pub value: RegistryValue,
}

impl RegistryNode {
    pub fn new(name: impl Into<String>, value: RegistryValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// Children of a directory node; empty for leaves.
    pub fn children(&self) -> &[RegistryNode] {
        match &self.value {
            RegistryValue::Directory(children) => children,
            _ => &[],
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self.value, RegistryValue::Directory(_))
    }
}

/// A decoded registry file. The root is always an unnamed directory.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistryTree {
    root: RegistryNode,
}

impl RegistryTree {
    pub fn new(children: Vec<RegistryNode>) -> Self {
        Self {
            root: RegistryNode::new("", RegistryValue::Directory(children)),
        }
    }

    pub fn root(&self) -> &RegistryNode {
        &self.root
    }

    /// Top-level sections, in storage order.
    pub fn sections(&self) -> &[RegistryNode] {
        self.root.children()
    }

    /// Depth-first walk over every node below the root, yielding `(depth, node)`.
    ///
    /// Top-level nodes have depth 0.
    pub fn iter(&self) -> NodeIter<'_> {
        NodeIter {
            stack: self.sections().iter().rev().map(|n| (0, n)).collect(),
        }
    }

    /// Number of nodes below the root.
    pub fn node_count(&self) -> usize {
        self.iter().count()
    }
}

/// Iterator returned by [`RegistryTree::iter`].
pub struct NodeIter<'a> {
    stack: Vec<(usize, &'a RegistryNode)>,
}

impl<'a> Iterator for NodeIter<'a> {
    type Item = (usize, &'a RegistryNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.children().iter().rev().map(|child| (depth + 1, child)));
        Some((depth, node))
    }
}
