use std::fmt::Display;

use crate::parser::literals::Literal;
use crate::query::NodeKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

/// Node kinds of a WHERE condition tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WhereKind {
    /// Marker holding the whole condition as its only child.
    Where,
    Eq,
    Neq,
    Gt,
    GtEq,
    Lt,
    LtEq,
    Not,
    And,
    Or,
    In,
    NotIn,
    InAny,
    NotInAny,
    EqAny,
    IsNull,
    IsNotNull,
    Like,
    NotLike,
    Contains,
    InFolder,
    InTree,
    Score,
    /// Leaf whose key is registered in the column reference table.
    Column,
    Qualifier(String),
    Literal(Literal),
    List,
}

impl Display for WhereKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            WhereKind::Where => "WHERE",
            WhereKind::Eq => "EQ",
            WhereKind::Neq => "NEQ",
            WhereKind::Gt => "GT",
            WhereKind::GtEq => "GTEQ",
            WhereKind::Lt => "LT",
            WhereKind::LtEq => "LTEQ",
            WhereKind::Not => "NOT",
            WhereKind::And => "AND",
            WhereKind::Or => "OR",
            WhereKind::In => "IN",
            WhereKind::NotIn => "NOT_IN",
            WhereKind::InAny => "IN_ANY",
            WhereKind::NotInAny => "NOT_IN_ANY",
            WhereKind::EqAny => "EQ_ANY",
            WhereKind::IsNull => "IS_NULL",
            WhereKind::IsNotNull => "IS_NOT_NULL",
            WhereKind::Like => "LIKE",
            WhereKind::NotLike => "NOT_LIKE",
            WhereKind::Contains => "CONTAINS",
            WhereKind::InFolder => "IN_FOLDER",
            WhereKind::InTree => "IN_TREE",
            WhereKind::Score => "SCORE",
            WhereKind::Column => "COL",
            WhereKind::Qualifier(_) => "QUALIFIER",
            WhereKind::Literal(_) => "LITERAL",
            WhereKind::List => "LIST",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhereNode {
    pub id: NodeId,
    pub key: NodeKey,
    pub kind: WhereKind,
    pub children: Vec<NodeId>,
}

/// Arena-backed condition tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WhereTree {
    nodes: Vec<WhereNode>,
    root: Option<NodeId>,
}

impl WhereTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: NodeKey, kind: WhereKind, children: Vec<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(WhereNode { id, key, kind, children });
        id
    }

    pub fn leaf(&mut self, key: NodeKey, kind: WhereKind) -> NodeId {
        self.add(key, kind, vec![])
    }

    pub fn node(&self, id: NodeId) -> &WhereNode {
        &self.nodes[id.0]
    }

    pub fn child(&self, node: &WhereNode, index: usize) -> Option<&WhereNode> {
        node.children.get(index).map(|id| self.node(*id))
    }

    pub fn children<'t>(&'t self, node: &'t WhereNode) -> impl Iterator<Item = &'t WhereNode> + 't {
        node.children.iter().map(move |id| self.node(*id))
    }

    pub fn root(&self) -> Option<&WhereNode> {
        self.root.map(|id| self.node(id))
    }

    /// Wrap `condition` in the `Where` marker and make it the root.
    pub fn set_condition(&mut self, key: NodeKey, condition: NodeId) -> NodeId {
        let root = self.add(key, WhereKind::Where, vec![condition]);
        self.root = Some(root);
        root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_rooted_tree() {
        let mut tree = WhereTree::new();
        let col = tree.leaf(6, WhereKind::Column);
        let lit = tree.leaf(10, WhereKind::Literal(Literal::Int(1)));
        let eq = tree.add(8, WhereKind::Eq, vec![col, lit]);
        tree.set_condition(0, eq);

        let root = tree.root().unwrap();
        assert_eq!(root.kind, WhereKind::Where);
        let cond = tree.child(root, 0).unwrap();
        assert_eq!(cond.kind, WhereKind::Eq);
        let keys: Vec<_> = tree.children(cond).map(|n| n.key).collect();
        assert_eq!(keys, vec![6, 10]);
        assert!(tree.child(cond, 2).is_none());
        assert_eq!(tree.len(), 4);
    }
}
