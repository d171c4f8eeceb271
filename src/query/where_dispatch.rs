use tracing::debug;

use crate::query::{ConditionProcessor, QueryError, QueryObject, WhereKind, WhereNode, WhereTree};

impl QueryObject<'_> {
    /// Walk the WHERE tree children-first and fire one processor callback
    /// per operator node. Does nothing without a processor or a WHERE
    /// clause.
    pub fn process_where_clause(&self, processor: Option<&mut dyn ConditionProcessor>) -> Result<(), QueryError> {
        let (Some(processor), Some(tree)) = (processor, self.where_tree()) else {
            return Ok(());
        };
        let Some(root) = tree.root() else {
            return Ok(());
        };

        processor.on_start_processing(root)?;
        Self::process_where_node(tree, root, &mut *processor)?;
        processor.on_stop_processing()
    }

    fn process_where_node(tree: &WhereTree, node: &WhereNode, processor: &mut dyn ConditionProcessor) -> Result<(), QueryError> {
        for child in tree.children(node) {
            Self::process_where_node(tree, child, processor)?;
        }
        Self::eval_where_node(tree, node, processor)
    }

    fn eval_where_node(tree: &WhereTree, node: &WhereNode, processor: &mut dyn ConditionProcessor) -> Result<(), QueryError> {
        debug!("eval where node {} at {}", node.kind, node.key);
        match &node.kind {
            WhereKind::Eq => {
                let (left, right) = Self::binary(tree, node)?;
                processor.on_equals(node, left, right)
            }
            WhereKind::Neq => {
                let (left, right) = Self::binary(tree, node)?;
                processor.on_not_equals(node, left, right)
            }
            WhereKind::Gt => {
                let (left, right) = Self::binary(tree, node)?;
                processor.on_greater_than(node, left, right)
            }
            WhereKind::GtEq => {
                let (left, right) = Self::binary(tree, node)?;
                processor.on_greater_or_equals(node, left, right)
            }
            WhereKind::Lt => {
                let (left, right) = Self::binary(tree, node)?;
                processor.on_less_than(node, left, right)
            }
            WhereKind::LtEq => {
                let (left, right) = Self::binary(tree, node)?;
                processor.on_less_or_equals(node, left, right)
            }
            WhereKind::Not => processor.on_not(node, Self::unary(tree, node)?),
            WhereKind::And => {
                let (left, right) = Self::binary(tree, node)?;
                processor.on_and(node, left, right)
            }
            WhereKind::Or => {
                let (left, right) = Self::binary(tree, node)?;
                processor.on_or(node, left, right)
            }
            WhereKind::In => {
                let (column, list) = Self::binary(tree, node)?;
                processor.on_in(node, column, list)
            }
            WhereKind::NotIn => {
                let (column, list) = Self::binary(tree, node)?;
                processor.on_not_in(node, column, list)
            }
            WhereKind::InAny => {
                let (column, list) = Self::binary(tree, node)?;
                processor.on_in_any(node, column, list)
            }
            WhereKind::NotInAny => {
                let (column, list) = Self::binary(tree, node)?;
                processor.on_not_in_any(node, column, list)
            }
            WhereKind::EqAny => {
                let (literal, column) = Self::binary(tree, node)?;
                processor.on_eq_any(node, literal, column)
            }
            WhereKind::IsNull => processor.on_is_null(node, Self::unary(tree, node)?),
            WhereKind::IsNotNull => processor.on_is_not_null(node, Self::unary(tree, node)?),
            WhereKind::Like => {
                let (column, pattern) = Self::binary(tree, node)?;
                processor.on_is_like(node, column, pattern)
            }
            WhereKind::NotLike => {
                let (column, pattern) = Self::binary(tree, node)?;
                processor.on_is_not_like(node, column, pattern)
            }
            WhereKind::Contains => {
                let (qualifier, search) = Self::qualified(tree, node)?;
                processor.on_contains(node, qualifier, search)
            }
            WhereKind::InFolder => {
                let (qualifier, folder) = Self::qualified(tree, node)?;
                processor.on_in_folder(node, qualifier, folder)
            }
            WhereKind::InTree => {
                let (qualifier, folder) = Self::qualified(tree, node)?;
                processor.on_in_tree(node, qualifier, folder)
            }
            WhereKind::Score => processor.on_score(node, tree.child(node, 0)),
            WhereKind::Where | WhereKind::Column | WhereKind::Qualifier(_) | WhereKind::Literal(_) | WhereKind::List => Ok(()),
        }
    }

    fn malformed(node: &WhereNode) -> QueryError {
        QueryError::MalformedWhere { kind: node.kind.to_string(), children: node.children.len() }
    }

    fn unary<'t>(tree: &'t WhereTree, node: &WhereNode) -> Result<&'t WhereNode, QueryError> {
        match node.children.as_slice() {
            [only] => Ok(tree.node(*only)),
            _ => Err(Self::malformed(node)),
        }
    }

    fn binary<'t>(tree: &'t WhereTree, node: &WhereNode) -> Result<(&'t WhereNode, &'t WhereNode), QueryError> {
        match node.children.as_slice() {
            [left, right] => Ok((tree.node(*left), tree.node(*right))),
            _ => Err(Self::malformed(node)),
        }
    }

    /// One child: primary operand only. Two: qualifier then operand.
    fn qualified<'t>(tree: &'t WhereTree, node: &WhereNode) -> Result<(Option<&'t WhereNode>, &'t WhereNode), QueryError> {
        match node.children.as_slice() {
            [operand] => Ok((None, tree.node(*operand))),
            [qualifier, operand] => Ok((Some(tree.node(*qualifier)), tree.node(*operand))),
            _ => Err(Self::malformed(node)),
        }
    }
}
