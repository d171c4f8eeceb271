#[cfg(test)]
pub mod fixtures {
    use crate::query::{ConditionProcessor, QueryError, WhereNode};
    use crate::types::{
        BaseTypeId, Cardinality, PropertyDefinition, PropertyType, TypeDefinition, TypeManager,
    };

    /// Base types plus an invoice document type and a project folder type.
    pub fn catalog() -> TypeManager {
        let mut tm = TypeManager::new();
        tm.add_type(
            TypeDefinition::new("acme:invoice", BaseTypeId::Document, Some("cmis:document"))
                .with_property(
                    PropertyDefinition::new("acme:invoiceAmount", PropertyType::Decimal)
                        .with_query_name("acme:amount")
                        .with_local_name("amount"),
                )
                .with_property(PropertyDefinition::new("acme:customer", PropertyType::String))
                .with_property(PropertyDefinition::new("acme:paid", PropertyType::Boolean))
                .with_property(PropertyDefinition::new("acme:dueDate", PropertyType::DateTime))
                .with_property(
                    PropertyDefinition::new("acme:tags", PropertyType::String).with_cardinality(Cardinality::Multi),
                ),
        ).unwrap();
        tm.add_type(
            TypeDefinition::new("acme:project", BaseTypeId::Folder, Some("cmis:folder"))
                .with_property(PropertyDefinition::new("acme:budget", PropertyType::Integer)),
        ).unwrap();
        tm
    }

    /// Records every callback as `name(key, key...)`.
    #[derive(Debug, Default)]
    pub struct Recorder {
        pub calls: Vec<String>,
    }

    impl Recorder {
        fn record(&mut self, name: &str, nodes: &[Option<&WhereNode>]) -> Result<(), QueryError> {
            let keys: Vec<String> = nodes.iter()
                .map(|n| n.map(|n| n.key.to_string()).unwrap_or_else(|| "-".into()))
                .collect();
            self.calls.push(format!("{}({})", name, keys.join(",")));
            Ok(())
        }
    }

    impl ConditionProcessor for Recorder {
        fn on_start_processing(&mut self, where_node: &WhereNode) -> Result<(), QueryError> {
            self.record("start", &[Some(where_node)])
        }
        fn on_stop_processing(&mut self) -> Result<(), QueryError> {
            self.record("stop", &[])
        }
        fn on_equals(&mut self, _: &WhereNode, l: &WhereNode, r: &WhereNode) -> Result<(), QueryError> {
            self.record("eq", &[Some(l), Some(r)])
        }
        fn on_not_equals(&mut self, _: &WhereNode, l: &WhereNode, r: &WhereNode) -> Result<(), QueryError> {
            self.record("neq", &[Some(l), Some(r)])
        }
        fn on_greater_than(&mut self, _: &WhereNode, l: &WhereNode, r: &WhereNode) -> Result<(), QueryError> {
            self.record("gt", &[Some(l), Some(r)])
        }
        fn on_greater_or_equals(&mut self, _: &WhereNode, l: &WhereNode, r: &WhereNode) -> Result<(), QueryError> {
            self.record("gteq", &[Some(l), Some(r)])
        }
        fn on_less_than(&mut self, _: &WhereNode, l: &WhereNode, r: &WhereNode) -> Result<(), QueryError> {
            self.record("lt", &[Some(l), Some(r)])
        }
        fn on_less_or_equals(&mut self, _: &WhereNode, l: &WhereNode, r: &WhereNode) -> Result<(), QueryError> {
            self.record("lteq", &[Some(l), Some(r)])
        }
        fn on_not(&mut self, _: &WhereNode, c: &WhereNode) -> Result<(), QueryError> {
            self.record("not", &[Some(c)])
        }
        fn on_and(&mut self, _: &WhereNode, l: &WhereNode, r: &WhereNode) -> Result<(), QueryError> {
            self.record("and", &[Some(l), Some(r)])
        }
        fn on_or(&mut self, _: &WhereNode, l: &WhereNode, r: &WhereNode) -> Result<(), QueryError> {
            self.record("or", &[Some(l), Some(r)])
        }
        fn on_in(&mut self, _: &WhereNode, c: &WhereNode, l: &WhereNode) -> Result<(), QueryError> {
            self.record("in", &[Some(c), Some(l)])
        }
        fn on_not_in(&mut self, _: &WhereNode, c: &WhereNode, l: &WhereNode) -> Result<(), QueryError> {
            self.record("not_in", &[Some(c), Some(l)])
        }
        fn on_in_any(&mut self, _: &WhereNode, c: &WhereNode, l: &WhereNode) -> Result<(), QueryError> {
            self.record("in_any", &[Some(c), Some(l)])
        }
        fn on_not_in_any(&mut self, _: &WhereNode, c: &WhereNode, l: &WhereNode) -> Result<(), QueryError> {
            self.record("not_in_any", &[Some(c), Some(l)])
        }
        fn on_eq_any(&mut self, _: &WhereNode, l: &WhereNode, c: &WhereNode) -> Result<(), QueryError> {
            self.record("eq_any", &[Some(l), Some(c)])
        }
        fn on_is_null(&mut self, _: &WhereNode, c: &WhereNode) -> Result<(), QueryError> {
            self.record("is_null", &[Some(c)])
        }
        fn on_is_not_null(&mut self, _: &WhereNode, c: &WhereNode) -> Result<(), QueryError> {
            self.record("is_not_null", &[Some(c)])
        }
        fn on_is_like(&mut self, _: &WhereNode, c: &WhereNode, p: &WhereNode) -> Result<(), QueryError> {
            self.record("like", &[Some(c), Some(p)])
        }
        fn on_is_not_like(&mut self, _: &WhereNode, c: &WhereNode, p: &WhereNode) -> Result<(), QueryError> {
            self.record("not_like", &[Some(c), Some(p)])
        }
        fn on_contains(&mut self, _: &WhereNode, q: Option<&WhereNode>, s: &WhereNode) -> Result<(), QueryError> {
            self.record("contains", &[q, Some(s)])
        }
        fn on_in_folder(&mut self, _: &WhereNode, q: Option<&WhereNode>, f: &WhereNode) -> Result<(), QueryError> {
            self.record("in_folder", &[q, Some(f)])
        }
        fn on_in_tree(&mut self, _: &WhereNode, q: Option<&WhereNode>, f: &WhereNode) -> Result<(), QueryError> {
            self.record("in_tree", &[q, Some(f)])
        }
        fn on_score(&mut self, node: &WhereNode, _: Option<&WhereNode>) -> Result<(), QueryError> {
            self.record("score", &[Some(node)])
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::literals::Literal;
    use crate::query::_tests::fixtures::{catalog, Recorder};
    use crate::query::{
        ColumnReference, FunctionReference, QueryError, QueryObject, Selector, WhereKind, WhereTree,
    };

    fn resolved(selector: &Selector) -> (Option<&str>, Option<&str>) {
        let col = selector.as_column().unwrap();
        (col.type_id(), col.property_id())
    }

    #[test]
    fn single_type_binds_unqualified_property() {
        let catalog = catalog();
        let query = QueryObject::analyze("SELECT acme:amount FROM acme:invoice", &catalog).unwrap();
        let select = query.select_references();
        assert_eq!(resolved(select[0]), (Some("acme:invoice"), Some("acme:invoiceAmount")));
    }

    #[test]
    fn inherited_property_binds_to_subtype() {
        let catalog = catalog();
        let query = QueryObject::analyze("SELECT cmis:name FROM acme:invoice", &catalog).unwrap();
        assert_eq!(resolved(query.select_references()[0]), (Some("acme:invoice"), Some("cmis:name")));
    }

    #[test]
    fn single_type_missing_property() {
        let catalog = catalog();
        let result = QueryObject::analyze("SELECT acme:budget FROM acme:invoice", &catalog);
        assert!(matches!(result, Err(QueryError::PropertyNotFound(p)) if p == "acme:budget"));
    }

    #[test]
    fn two_types_unique_property_binds() {
        let catalog = catalog();
        let query = QueryObject::analyze("SELECT acme:budget FROM acme:invoice, acme:project", &catalog).unwrap();
        assert_eq!(resolved(query.select_references()[0]), (Some("acme:project"), Some("acme:budget")));
    }

    #[test]
    fn two_types_shared_property_is_ambiguous_unless_qualified() {
        let catalog = catalog();
        let result = QueryObject::analyze("SELECT cmis:name FROM acme:invoice i, acme:project p", &catalog);
        assert!(matches!(result, Err(QueryError::AmbiguousProperty { property, .. }) if property == "cmis:name"));

        let query = QueryObject::analyze("SELECT i.cmis:name FROM acme:invoice i, acme:project p", &catalog).unwrap();
        assert_eq!(resolved(query.select_references()[0]), (Some("acme:invoice"), Some("cmis:name")));
    }

    #[test]
    fn qualifier_may_be_type_query_name() {
        let catalog = catalog();
        let query = QueryObject::analyze(
            "SELECT acme:project.acme:budget FROM acme:invoice i, acme:project",
            &catalog,
        ).unwrap();
        assert_eq!(resolved(query.select_references()[0]), (Some("acme:project"), Some("acme:budget")));
    }

    #[test]
    fn qualified_errors() {
        let catalog = catalog();
        assert!(matches!(
            QueryObject::analyze("SELECT x.cmis:name FROM acme:invoice i", &catalog),
            Err(QueryError::TypeOrAliasNotFound(name)) if name == "x"
        ));
        assert!(matches!(
            QueryObject::analyze("SELECT i.acme:budget FROM acme:invoice i", &catalog),
            Err(QueryError::UnknownProperty { property, type_id }) if property == "acme:budget" && type_id == "acme:invoice"
        ));
        assert!(matches!(
            QueryObject::analyze("SELECT cmis:name FROM acme:unknown", &catalog),
            Err(QueryError::TypeOrAliasNotFound(name)) if name == "acme:unknown"
        ));
    }

    #[test]
    fn sort_by_alias_shares_the_select_selector() {
        let catalog = catalog();
        let query = QueryObject::analyze(
            "SELECT acme:amount AS x FROM acme:invoice ORDER BY x DESC",
            &catalog,
        ).unwrap();

        let select = query.select_references()[0];
        let (sorted, ascending) = query.order_by()[0];
        assert!(!ascending);
        assert!(std::ptr::eq(select, sorted));
        assert_eq!(resolved(sorted), (Some("acme:invoice"), Some("acme:invoiceAmount")));
        assert_eq!(query.requested_properties().get("acme:invoiceAmount").map(String::as_str), Some("x"));
    }

    #[test]
    fn where_alias_use_points_at_target() {
        let catalog = catalog();
        let query = QueryObject::analyze(
            "SELECT i.acme:customer AS c FROM acme:invoice i WHERE c = 'ACME' AND c IS NOT NULL",
            &catalog,
        ).unwrap();

        let select = query.select_references()[0];
        let wheres = query.where_references();
        assert_eq!(wheres.len(), 2);
        assert!(wheres.iter().all(|w| std::ptr::eq(*w, select)));

        let tree = query.where_tree().unwrap();
        let and = tree.child(tree.root().unwrap(), 0).unwrap();
        let eq = tree.child(and, 0).unwrap();
        let column = tree.child(eq, 0).unwrap();
        assert!(std::ptr::eq(query.column_reference(column.key).unwrap(), select));
    }

    #[test]
    fn score_alias_in_order_by() {
        let catalog = catalog();
        let query = QueryObject::analyze(
            "SELECT cmis:name, SCORE() AS relevance FROM cmis:document ORDER BY relevance",
            &catalog,
        ).unwrap();
        let (sorted, _) = query.order_by()[0];
        assert_eq!(sorted, &Selector::Function(FunctionReference {
            name: "SCORE".into(),
            alias_name: Some("relevance".into()),
        }));
        assert_eq!(query.requested_functions().get("SCORE").map(String::as_str), Some("relevance"));
    }

    #[test]
    fn duplicate_aliases_fail_before_resolution() {
        let catalog = catalog();
        let mut query = QueryObject::new(&catalog);
        let a = query.register_select(7, ColumnReference::new("cmis:name"));
        let b = query.register_select(20, ColumnReference::new("cmis:objectId"));
        query.register_alias("x", a).unwrap();
        assert_eq!(query.register_alias("x", b), Err(QueryError::DuplicateAlias("x".into())));

        query.register_from_type(Some("d"), "cmis:document").unwrap();
        assert_eq!(
            query.register_from_type(Some("d"), "cmis:folder"),
            Err(QueryError::DuplicateFromAlias("d".into()))
        );
        assert_eq!(query.types().len(), 1);
    }

    #[test]
    fn wildcards() {
        let catalog = catalog();
        let query = QueryObject::analyze("SELECT * FROM acme:invoice, acme:project", &catalog).unwrap();
        let star = query.select_references()[0].as_column().unwrap();
        assert!(!star.is_resolved());
        assert_eq!(query.requested_properties().get("*").map(String::as_str), Some("*"));

        let query = QueryObject::analyze("SELECT p.* FROM acme:invoice, acme:project p", &catalog).unwrap();
        assert_eq!(resolved(query.select_references()[0]), (Some("acme:project"), None));
    }

    #[test]
    fn resolve_without_from_fails() {
        let catalog = catalog();
        let mut query = QueryObject::new(&catalog);
        query.register_select(7, ColumnReference::new("cmis:name"));
        assert_eq!(query.resolve_types(), Err(QueryError::NoSourceType));
    }

    #[test]
    fn join_references_resolve() {
        let catalog = catalog();
        let query = QueryObject::analyze(
            "SELECT i.cmis:name FROM acme:invoice i JOIN acme:project p ON i.cmis:parentId = p.cmis:objectId",
            &catalog,
        );
        // cmis:parentId is a folder property
        assert!(matches!(query, Err(QueryError::UnknownProperty { .. })));

        let query = QueryObject::analyze(
            "SELECT i.cmis:name FROM acme:invoice i JOIN acme:project p ON i.cmis:objectId = p.cmis:objectId",
            &catalog,
        ).unwrap();
        let joins: Vec<_> = query.join_references().into_iter().map(resolved).collect();
        assert_eq!(joins, vec![
            (Some("acme:invoice"), Some("cmis:objectId")),
            (Some("acme:project"), Some("cmis:objectId")),
        ]);
    }

    #[test]
    fn join_alias_use_points_at_target() {
        let catalog = catalog();
        let query = QueryObject::analyze(
            "SELECT i.cmis:objectId AS oid FROM acme:invoice i JOIN acme:project p ON oid = p.cmis:objectId",
            &catalog,
        ).unwrap();

        let select = query.select_references()[0];
        let joins = query.join_references();
        assert_eq!(joins.len(), 2);
        assert!(std::ptr::eq(joins[0], select));
        assert!(!std::ptr::eq(joins[1], select));
        assert_eq!(resolved(joins[0]), (Some("acme:invoice"), Some("cmis:objectId")));
        assert_eq!(resolved(joins[1]), (Some("acme:project"), Some("cmis:objectId")));
    }

    #[test]
    fn accessors() {
        let catalog = catalog();
        let query = QueryObject::analyze("SELECT * FROM acme:invoice i, acme:project p", &catalog).unwrap();
        assert_eq!(query.main_type_alias(), Some("i"));
        assert_eq!(query.main_from_type().map(|td| td.id()), Some("acme:invoice"));
        assert_eq!(query.type_query_name("p"), Some("acme:project"));
        let invoice = query.type_definition_from_query_name("acme:invoice").unwrap();
        assert_eq!(query.parent_type(invoice).map(|td| td.id()), Some("cmis:document"));
        assert!(query.catalog().is_subtype_of("acme:invoice", "cmis:document"));
        assert_eq!(query.column_references().count(), 1);
    }

    #[test]
    fn where_callbacks_run_children_first() {
        let catalog = catalog();
        // AND(EQ(a, b), LIKE(c, d))
        let query = QueryObject::analyze(
            "SELECT * FROM acme:invoice WHERE acme:customer = 'x' AND cmis:name LIKE 'y%'",
            &catalog,
        ).unwrap();
        let mut recorder = Recorder::default();
        query.process_where_clause(Some(&mut recorder)).unwrap();
        assert_eq!(recorder.calls, vec![
            "start(27)", "eq(33,49)", "like(57,72)", "and(47,67)", "stop()",
        ]);
    }

    #[test]
    fn where_callbacks_cover_every_kind() {
        let catalog = catalog();
        let query = QueryObject::analyze(
            "SELECT * FROM acme:invoice WHERE NOT acme:amount >= 1 OR acme:amount <= 2 OR acme:amount > 3 \
             OR acme:amount < 4 OR acme:amount <> 5 OR acme:customer NOT LIKE 'a' OR acme:customer IN ('a') \
             OR acme:customer NOT IN ('b') OR ANY acme:tags IN ('t') OR ANY acme:tags NOT IN ('u') \
             OR 'v' = ANY acme:tags OR acme:paid IS NULL OR IN_FOLDER('f') OR IN_TREE('t') OR SCORE() > 0",
            &catalog,
        ).unwrap();
        let mut recorder = Recorder::default();
        query.process_where_clause(Some(&mut recorder)).unwrap();
        let names: Vec<&str> = recorder.calls.iter().map(|c| c.split('(').next().unwrap()).collect();
        for expected in [
            "not", "gteq", "lteq", "gt", "lt", "neq", "not_like", "in", "not_in", "in_any", "not_in_any",
            "eq_any", "is_null", "in_folder", "in_tree", "score", "or",
        ] {
            assert!(names.contains(&expected), "{expected} missing from {names:?}");
        }
        assert_eq!(names.first(), Some(&"start"));
        assert_eq!(names.last(), Some(&"stop"));
    }

    #[test]
    fn contains_with_and_without_qualifier() {
        let catalog = catalog();
        let query = QueryObject::analyze("SELECT * FROM acme:invoice i WHERE CONTAINS('foo')", &catalog).unwrap();
        let mut recorder = Recorder::default();
        query.process_where_clause(Some(&mut recorder)).unwrap();
        assert_eq!(recorder.calls[1], "contains(-,44)");

        let query = QueryObject::analyze("SELECT * FROM acme:invoice i WHERE CONTAINS(i, 'foo')", &catalog).unwrap();
        let mut recorder = Recorder::default();
        query.process_where_clause(Some(&mut recorder)).unwrap();
        assert_eq!(recorder.calls[1], "contains(44,47)");
    }

    #[test]
    fn where_processing_is_optional() {
        let catalog = catalog();
        let query = QueryObject::analyze("SELECT * FROM acme:invoice", &catalog).unwrap();
        let mut recorder = Recorder::default();
        query.process_where_clause(Some(&mut recorder)).unwrap();
        assert!(recorder.calls.is_empty());

        let query = QueryObject::analyze("SELECT * FROM acme:invoice WHERE acme:paid = TRUE", &catalog).unwrap();
        assert!(query.process_where_clause(None).is_ok());
    }

    #[test]
    fn malformed_tree_is_rejected() {
        let catalog = catalog();
        let mut query = QueryObject::new(&catalog);
        query.register_from_type(None, "acme:invoice").unwrap();
        let mut tree = WhereTree::new();
        let lit = tree.leaf(10, WhereKind::Literal(Literal::Int(1)));
        let eq = tree.add(8, WhereKind::Eq, vec![lit]);
        tree.set_condition(0, eq);
        query.set_where_tree(tree);

        let mut recorder = Recorder::default();
        assert_eq!(
            query.process_where_clause(Some(&mut recorder)),
            Err(QueryError::MalformedWhere { kind: "EQ".into(), children: 1 })
        );
    }
}
