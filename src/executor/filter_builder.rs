use tracing::trace;

use crate::executor::{ComparatorOp, Filter, Target};
use crate::parser::literals::Literal;
use crate::query::{ColumnResolver, ConditionProcessor, QueryError, QueryObject, Selector, WhereKind, WhereNode};
use crate::types::{PropertyDefinition, PropertyType};

/// Turns a resolved WHERE tree into a `Filter`.
///
/// Operator callbacks pop their operand filters from the stack and push
/// the combined one. Leaves push nothing.
pub struct FilterBuilder<'q, 'a> {
    query: &'q QueryObject<'a>,
    stack: Vec<Filter>,
}

enum Operand<'n, 'a> {
    /// A property column with its definition, or SCORE() without one.
    Target(Target, Option<&'a PropertyDefinition>),
    Literal(&'n Literal),
}

impl<'q, 'a> FilterBuilder<'q, 'a> {
    pub fn new(query: &'q QueryObject<'a>) -> Self {
        Self { query, stack: vec![] }
    }

    /// `None` when the query has no WHERE clause.
    pub fn build(query: &'q QueryObject<'a>) -> Result<Option<Filter>, QueryError> {
        if query.where_tree().is_none() {
            return Ok(None);
        }
        let mut builder = Self::new(query);
        query.process_where_clause(Some(&mut builder))?;
        Ok(builder.stack.pop())
    }

    fn processor_error<T>(message: String) -> Result<T, QueryError> {
        QueryError::Processor(message).err()
    }

    fn pop(&mut self) -> Result<Filter, QueryError> {
        match self.stack.pop() {
            Some(filter) => Ok(filter),
            None => Self::processor_error("Condition is missing an operand.".into()),
        }
    }

    fn push(&mut self, filter: Filter) -> Result<(), QueryError> {
        trace!("push filter {:?}", filter);
        self.stack.push(filter);
        Ok(())
    }

    /// Property id and definition bound to a column leaf.
    fn column(&self, node: &WhereNode) -> Result<(String, &'a PropertyDefinition), QueryError> {
        if node.kind != WhereKind::Column {
            return Self::processor_error(format!("Expected a column, found {}.", node.kind));
        }
        let column = match self.query.column_reference(node.key) {
            Some(Selector::Column(column)) => column,
            Some(Selector::Function(function)) => {
                return Self::processor_error(format!("Function {}() cannot be used here.", function.name));
            }
            None => return Self::processor_error(format!("No column registered at {}.", node.key)),
        };
        let (Some(type_id), Some(property_id)) = (column.type_id(), column.property_id()) else {
            return Self::processor_error(format!("Column {} is not bound to a property.", column.property_query_name));
        };
        let catalog = self.query.catalog();
        let definition = catalog.type_by_id(type_id)
            .and_then(|td| catalog.property_definition(td, property_id))
            .ok_or_else(|| QueryError::UnknownProperty {
                property: property_id.to_string(),
                type_id: type_id.to_string(),
            })?;
        Ok((property_id.to_string(), definition))
    }

    fn is_function(&self, node: &WhereNode) -> bool {
        matches!(self.query.column_reference(node.key), Some(Selector::Function(_)))
    }

    fn single_valued(&self, node: &WhereNode) -> Result<(String, &'a PropertyDefinition), QueryError> {
        let (id, definition) = self.column(node)?;
        if definition.is_multi_valued() {
            return Self::processor_error(format!("Multi-valued property {} needs ANY.", id));
        }
        Ok((id, definition))
    }

    fn multi_valued(&self, node: &WhereNode) -> Result<(String, &'a PropertyDefinition), QueryError> {
        let (id, definition) = self.column(node)?;
        if !definition.is_multi_valued() {
            return Self::processor_error(format!("ANY needs a multi-valued property, {} is single-valued.", id));
        }
        Ok((id, definition))
    }

    fn operand<'n>(&self, node: &'n WhereNode) -> Result<Operand<'n, 'a>, QueryError> {
        match &node.kind {
            WhereKind::Literal(literal) => Ok(Operand::Literal(literal)),
            WhereKind::Score => Ok(Operand::Target(Target::Score, None)),
            // an alias of SCORE() in the select list
            WhereKind::Column if self.is_function(node) => Ok(Operand::Target(Target::Score, None)),
            WhereKind::Column => {
                let (id, definition) = self.single_valued(node)?;
                Ok(Operand::Target(Target::Property(id), Some(definition)))
            }
            kind => Self::processor_error(format!("Unexpected operand {}.", kind)),
        }
    }

    fn literal<'n>(node: &'n WhereNode) -> Result<&'n Literal, QueryError> {
        match &node.kind {
            WhereKind::Literal(literal) => Ok(literal),
            kind => Self::processor_error(format!("Expected a literal, found {}.", kind)),
        }
    }

    fn string_literal<'n>(node: &'n WhereNode) -> Result<&'n str, QueryError> {
        match Self::literal(node)? {
            Literal::String(s) => Ok(s),
            other => Self::processor_error(format!("Expected a string, found {}.", other)),
        }
    }

    fn list(&self, node: &WhereNode) -> Result<Vec<Literal>, QueryError> {
        let Some(tree) = self.query.where_tree() else {
            return Self::processor_error("No WHERE clause.".into());
        };
        tree.children(node)
            .map(|child| Self::literal(child).cloned())
            .collect()
    }

    /// SCORE() compares with numbers only.
    fn check_literal(definition: Option<&PropertyDefinition>, literal: &Literal) -> Result<(), QueryError> {
        let numeric = matches!(literal, Literal::Int(_) | Literal::Float(_));
        let Some(definition) = definition else {
            if numeric {
                return Ok(());
            }
            return Self::processor_error(format!("SCORE() cannot be compared with {}.", literal));
        };
        let compatible = match definition.property_type {
            Some(PropertyType::Boolean) => matches!(literal, Literal::Bool(_)),
            Some(PropertyType::Integer | PropertyType::Decimal) => numeric,
            Some(PropertyType::DateTime) => matches!(literal, Literal::DateTime(_) | Literal::String(_)),
            Some(PropertyType::String | PropertyType::Id | PropertyType::Html | PropertyType::Uri) => {
                matches!(literal, Literal::String(_))
            }
            None => false,
        };
        if !compatible {
            return Self::processor_error(format!("Property {} cannot be compared with {}.", definition.id(), literal));
        }
        Ok(())
    }

    fn compare(&mut self, op: ComparatorOp, left: &WhereNode, right: &WhereNode) -> Result<(), QueryError> {
        let filter = match (self.operand(left)?, self.operand(right)?) {
            (Operand::Target(target, definition), Operand::Literal(value)) => {
                Self::check_literal(definition, value)?;
                Filter::Compare { target, op, value: value.clone() }
            }
            (Operand::Literal(value), Operand::Target(target, definition)) => {
                Self::check_literal(definition, value)?;
                Filter::Compare { target, op: op.flip(), value: value.clone() }
            }
            _ => return Self::processor_error(format!("Comparison {} needs one property and one literal.", op)),
        };
        self.push(filter)
    }

    fn in_list(&mut self, column: &WhereNode, list: &WhereNode, negated: bool) -> Result<(), QueryError> {
        let (property, definition) = self.single_valued(column)?;
        let values = self.list(list)?;
        for value in &values {
            Self::check_literal(Some(definition), value)?;
        }
        self.push(Filter::In { property, values, negated })
    }

    fn in_any(&mut self, column: &WhereNode, list: &WhereNode, negated: bool) -> Result<(), QueryError> {
        let (property, definition) = self.multi_valued(column)?;
        let values = self.list(list)?;
        for value in &values {
            Self::check_literal(Some(definition), value)?;
        }
        self.push(Filter::InAny { property, values, negated })
    }

    fn is_null(&mut self, column: &WhereNode, negated: bool) -> Result<(), QueryError> {
        let (property, _) = self.column(column)?;
        self.push(Filter::IsNull { property, negated })
    }

    fn like(&mut self, column: &WhereNode, pattern: &WhereNode, negated: bool) -> Result<(), QueryError> {
        let (property, definition) = self.single_valued(column)?;
        if definition.property_type != Some(PropertyType::String) {
            return Self::processor_error(format!("LIKE needs a string property, {} is not.", property));
        }
        let pattern = Filter::like_regex(Self::string_literal(pattern)?)
            .map_err(|e| QueryError::Processor(format!("Invalid LIKE pattern: {e}")))?;
        self.push(Filter::Like { property, pattern, negated })
    }

    fn check_qualifier(&self, qualifier: Option<&WhereNode>) -> Result<(), QueryError> {
        let Some(node) = qualifier else {
            return Ok(());
        };
        let WhereKind::Qualifier(name) = &node.kind else {
            return Self::processor_error(format!("Expected a qualifier, found {}.", node.kind));
        };
        match ColumnResolver::referenced_type_query_name(name, self.query.types()) {
            Some(_) => Ok(()),
            None => QueryError::TypeOrAliasNotFound(name.clone()).err(),
        }
    }
}

impl ConditionProcessor for FilterBuilder<'_, '_> {
    fn on_start_processing(&mut self, _where_node: &WhereNode) -> Result<(), QueryError> {
        self.stack.clear();
        Ok(())
    }

    fn on_stop_processing(&mut self) -> Result<(), QueryError> {
        match self.stack.len() {
            1 => Ok(()),
            n => Self::processor_error(format!("WHERE clause reduced to {} conditions.", n)),
        }
    }

    fn on_equals(&mut self, _node: &WhereNode, left: &WhereNode, right: &WhereNode) -> Result<(), QueryError> {
        self.compare(ComparatorOp::Eq, left, right)
    }

    fn on_not_equals(&mut self, _node: &WhereNode, left: &WhereNode, right: &WhereNode) -> Result<(), QueryError> {
        self.compare(ComparatorOp::NotEq, left, right)
    }

    fn on_greater_than(&mut self, _node: &WhereNode, left: &WhereNode, right: &WhereNode) -> Result<(), QueryError> {
        self.compare(ComparatorOp::Gt, left, right)
    }

    fn on_greater_or_equals(&mut self, _node: &WhereNode, left: &WhereNode, right: &WhereNode) -> Result<(), QueryError> {
        self.compare(ComparatorOp::GtEq, left, right)
    }

    fn on_less_than(&mut self, _node: &WhereNode, left: &WhereNode, right: &WhereNode) -> Result<(), QueryError> {
        self.compare(ComparatorOp::Lt, left, right)
    }

    fn on_less_or_equals(&mut self, _node: &WhereNode, left: &WhereNode, right: &WhereNode) -> Result<(), QueryError> {
        self.compare(ComparatorOp::LtEq, left, right)
    }

    fn on_not(&mut self, _node: &WhereNode, _child: &WhereNode) -> Result<(), QueryError> {
        let inner = self.pop()?;
        self.push(Filter::Not(Box::new(inner)))
    }

    fn on_and(&mut self, _node: &WhereNode, _left: &WhereNode, _right: &WhereNode) -> Result<(), QueryError> {
        let right = self.pop()?;
        let left = self.pop()?;
        self.push(Filter::And(Box::new(left), Box::new(right)))
    }

    fn on_or(&mut self, _node: &WhereNode, _left: &WhereNode, _right: &WhereNode) -> Result<(), QueryError> {
        let right = self.pop()?;
        let left = self.pop()?;
        self.push(Filter::Or(Box::new(left), Box::new(right)))
    }

    fn on_in(&mut self, _node: &WhereNode, column: &WhereNode, list: &WhereNode) -> Result<(), QueryError> {
        self.in_list(column, list, false)
    }

    fn on_not_in(&mut self, _node: &WhereNode, column: &WhereNode, list: &WhereNode) -> Result<(), QueryError> {
        self.in_list(column, list, true)
    }

    fn on_in_any(&mut self, _node: &WhereNode, column: &WhereNode, list: &WhereNode) -> Result<(), QueryError> {
        self.in_any(column, list, false)
    }

    fn on_not_in_any(&mut self, _node: &WhereNode, column: &WhereNode, list: &WhereNode) -> Result<(), QueryError> {
        self.in_any(column, list, true)
    }

    fn on_eq_any(&mut self, _node: &WhereNode, literal: &WhereNode, column: &WhereNode) -> Result<(), QueryError> {
        let (property, definition) = self.multi_valued(column)?;
        let value = Self::literal(literal)?;
        Self::check_literal(Some(definition), value)?;
        self.push(Filter::EqAny { property, value: value.clone() })
    }

    fn on_is_null(&mut self, _node: &WhereNode, column: &WhereNode) -> Result<(), QueryError> {
        self.is_null(column, false)
    }

    fn on_is_not_null(&mut self, _node: &WhereNode, column: &WhereNode) -> Result<(), QueryError> {
        self.is_null(column, true)
    }

    fn on_is_like(&mut self, _node: &WhereNode, column: &WhereNode, pattern: &WhereNode) -> Result<(), QueryError> {
        self.like(column, pattern, false)
    }

    fn on_is_not_like(&mut self, _node: &WhereNode, column: &WhereNode, pattern: &WhereNode) -> Result<(), QueryError> {
        self.like(column, pattern, true)
    }

    fn on_contains(&mut self, _node: &WhereNode, qualifier: Option<&WhereNode>, search: &WhereNode) -> Result<(), QueryError> {
        self.check_qualifier(qualifier)?;
        let terms = Filter::search_terms(Self::string_literal(search)?);
        self.push(Filter::Contains(terms))
    }

    fn on_in_folder(&mut self, _node: &WhereNode, qualifier: Option<&WhereNode>, folder: &WhereNode) -> Result<(), QueryError> {
        self.check_qualifier(qualifier)?;
        let folder_id = Self::string_literal(folder)?.to_string();
        self.push(Filter::InFolder(folder_id))
    }

    fn on_in_tree(&mut self, _node: &WhereNode, qualifier: Option<&WhereNode>, folder: &WhereNode) -> Result<(), QueryError> {
        self.check_qualifier(qualifier)?;
        let folder_id = Self::string_literal(folder)?.to_string();
        self.push(Filter::InTree(folder_id))
    }

    /// Handled by the enclosing comparison.
    fn on_score(&mut self, _node: &WhereNode, _child: Option<&WhereNode>) -> Result<(), QueryError> {
        Ok(())
    }
}
