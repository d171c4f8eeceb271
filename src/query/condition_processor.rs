use crate::query::{QueryError, WhereNode};

/// Callbacks fired by `QueryObject::process_where_clause`, children before
/// parents. Nodes carry their char-offset key; column leaves can be looked
/// up with `QueryObject::column_reference`.
pub trait ConditionProcessor {
    fn on_start_processing(&mut self, where_node: &WhereNode) -> Result<(), QueryError>;
    fn on_stop_processing(&mut self) -> Result<(), QueryError>;

    fn on_equals(&mut self, node: &WhereNode, left: &WhereNode, right: &WhereNode) -> Result<(), QueryError>;
    fn on_not_equals(&mut self, node: &WhereNode, left: &WhereNode, right: &WhereNode) -> Result<(), QueryError>;
    fn on_greater_than(&mut self, node: &WhereNode, left: &WhereNode, right: &WhereNode) -> Result<(), QueryError>;
    fn on_greater_or_equals(&mut self, node: &WhereNode, left: &WhereNode, right: &WhereNode) -> Result<(), QueryError>;
    fn on_less_than(&mut self, node: &WhereNode, left: &WhereNode, right: &WhereNode) -> Result<(), QueryError>;
    fn on_less_or_equals(&mut self, node: &WhereNode, left: &WhereNode, right: &WhereNode) -> Result<(), QueryError>;

    fn on_not(&mut self, node: &WhereNode, child: &WhereNode) -> Result<(), QueryError>;
    fn on_and(&mut self, node: &WhereNode, left: &WhereNode, right: &WhereNode) -> Result<(), QueryError>;
    fn on_or(&mut self, node: &WhereNode, left: &WhereNode, right: &WhereNode) -> Result<(), QueryError>;

    fn on_in(&mut self, node: &WhereNode, column: &WhereNode, list: &WhereNode) -> Result<(), QueryError>;
    fn on_not_in(&mut self, node: &WhereNode, column: &WhereNode, list: &WhereNode) -> Result<(), QueryError>;
    fn on_in_any(&mut self, node: &WhereNode, column: &WhereNode, list: &WhereNode) -> Result<(), QueryError>;
    fn on_not_in_any(&mut self, node: &WhereNode, column: &WhereNode, list: &WhereNode) -> Result<(), QueryError>;
    fn on_eq_any(&mut self, node: &WhereNode, literal: &WhereNode, column: &WhereNode) -> Result<(), QueryError>;

    fn on_is_null(&mut self, node: &WhereNode, column: &WhereNode) -> Result<(), QueryError>;
    fn on_is_not_null(&mut self, node: &WhereNode, column: &WhereNode) -> Result<(), QueryError>;
    fn on_is_like(&mut self, node: &WhereNode, column: &WhereNode, pattern: &WhereNode) -> Result<(), QueryError>;
    fn on_is_not_like(&mut self, node: &WhereNode, column: &WhereNode, pattern: &WhereNode) -> Result<(), QueryError>;

    fn on_contains(&mut self, node: &WhereNode, qualifier: Option<&WhereNode>, search: &WhereNode) -> Result<(), QueryError>;
    fn on_in_folder(&mut self, node: &WhereNode, qualifier: Option<&WhereNode>, folder: &WhereNode) -> Result<(), QueryError>;
    fn on_in_tree(&mut self, node: &WhereNode, qualifier: Option<&WhereNode>, folder: &WhereNode) -> Result<(), QueryError>;
    fn on_score(&mut self, node: &WhereNode, child: Option<&WhereNode>) -> Result<(), QueryError>;
}
