//! Ordering spec tests

#[cfg(test)]
mod tests {
    use crate::errors::QueryClauseError;
    use crate::ordering::{NullsPlacement, OrderingSpec, SortEntry, SortOrder};

    fn abc() -> OrderingSpec {
        OrderingSpec::with_conditions(vec![
            SortEntry::from(("a", "t.a")),
            SortEntry::from(("b", "t.b", SortOrder::Desc)),
            SortEntry::from("c"),
        ])
        .unwrap()
    }

    #[test]
    fn test_empty_spec_renders_nothing() {
        let spec = OrderingSpec::new();
        assert_eq!(spec.get_order_by(), "");
        assert!(spec.current_order().is_empty());
    }

    #[test]
    fn test_single_condition() {
        let mut spec = OrderingSpec::new();
        spec.add_condition("name", None, SortOrder::Asc).unwrap();
        assert_eq!(spec.get_order_by(), "ORDER BY name ASC NULLS LAST");
    }

    #[test]
    fn test_bulk_conditions_render_in_entry_order() {
        let spec = abc();
        assert_eq!(spec.current_order(), vec!["a", "b", "c"]);
        assert_eq!(spec.get_order_by(), "ORDER BY t.a ASC, t.b DESC, c ASC NULLS LAST");
    }

    #[test]
    fn test_add_condition_updates_direction() {
        let mut spec = abc();
        spec.add_condition("a", Some("t.a"), SortOrder::Desc).unwrap();

        assert_eq!(spec.condition("a").unwrap().direction, SortOrder::Desc);
        assert_eq!(spec.current_order(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_add_condition_conflict() {
        let mut spec = abc();
        let err = spec.add_condition("a", Some("x.a"), SortOrder::Asc).unwrap_err();
        assert!(matches!(err, QueryClauseError::Conflict { .. }));
        assert_eq!(spec.condition("a").unwrap().sql_form, "t.a");
    }

    #[test]
    fn test_add_conditions_replaces_everything() {
        let mut spec = abc();
        spec.set_order(["c", "b"], true).unwrap();
        spec.add_conditions(vec![("x", "t.x")]).unwrap();

        assert!(spec.condition("a").is_none());
        assert!(spec.default_order().is_empty());
        assert_eq!(spec.get_order_by(), "ORDER BY t.x ASC NULLS LAST");
    }

    #[test]
    fn test_add_conditions_conflict_keeps_previous_state() {
        let mut spec = abc();
        let result = spec.add_conditions(vec![("x", "t.x"), ("x", "t.y")]);

        assert!(matches!(result, Err(QueryClauseError::Conflict { .. })));
        assert_eq!(spec.current_order(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_set_direction() {
        let mut spec = abc();
        spec.set_direction("c", SortOrder::Desc).unwrap();
        assert_eq!(spec.get_order_by(), "ORDER BY t.a ASC, t.b DESC, c DESC NULLS LAST");

        assert_eq!(
            spec.set_direction("z", SortOrder::Asc).unwrap_err(),
            QueryClauseError::UnknownCondition("z".to_string())
        );
    }

    #[test]
    fn test_parse_direction() {
        assert_eq!("desc".parse::<SortOrder>().unwrap(), SortOrder::Desc);
        assert_eq!(" ASC ".parse::<SortOrder>().unwrap(), SortOrder::Asc);
        assert_eq!(
            "up".parse::<SortOrder>().unwrap_err(),
            QueryClauseError::UnknownDirection("up".to_string())
        );
    }

    #[test]
    fn test_set_order() {
        let mut spec = abc();
        spec.set_order(["c", "a", "b"], false).unwrap();
        assert_eq!(spec.current_order(), vec!["c", "a", "b"]);
        assert!(spec.default_order().is_empty());

        assert_eq!(
            spec.set_order(["a", "nope"], false).unwrap_err(),
            QueryClauseError::UnknownCondition("nope".to_string())
        );
        assert_eq!(spec.current_order(), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_partial_order_keeps_every_condition() {
        let mut spec = abc();
        spec.set_order(["b"], false).unwrap();

        assert_eq!(spec.current_order(), vec!["b", "a", "c"]);
        assert_eq!(spec.get_order_by(), "ORDER BY t.b DESC, t.a ASC, c ASC NULLS LAST");
    }

    #[test]
    fn test_raise_and_reset() {
        let mut spec = abc();
        spec.set_order(["a", "b", "c"], true).unwrap();

        spec.raise_conditions_in_order(["b"]).unwrap();
        assert_eq!(spec.current_order(), vec!["b", "a", "c"]);

        spec.reset_order();
        assert_eq!(spec.current_order(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_raise_keeps_relative_order() {
        let mut spec = OrderingSpec::with_conditions(vec!["a", "b", "c", "d", "e"]).unwrap();

        spec.raise_conditions_in_order(["d", "b", "d"]).unwrap();
        assert_eq!(spec.current_order(), vec!["d", "b", "a", "c", "e"]);

        spec.raise_conditions_in_order(["e"]).unwrap();
        assert_eq!(spec.current_order(), vec!["e", "d", "b", "a", "c"]);

        assert!(spec.raise_conditions_in_order(["x"]).is_err());
        assert_eq!(spec.current_order(), vec!["e", "d", "b", "a", "c"]);
    }

    #[test]
    fn test_reset_without_default_uses_registration_order() {
        let mut spec = abc();
        spec.set_order(["c", "b", "a"], false).unwrap();
        spec.reset_order();
        assert_eq!(spec.current_order(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_explicit_default_order() {
        let mut spec = abc();
        spec.set_default_order(["c"]).unwrap();
        spec.raise_conditions_in_order(["b"]).unwrap();
        spec.reset_order();

        assert_eq!(spec.current_order(), vec!["c", "a", "b"]);
        assert!(spec.set_default_order(["zz"]).is_err());
    }

    #[test]
    fn test_new_condition_joins_current_order() {
        let mut spec = abc();
        spec.set_order(["c"], false).unwrap();
        spec.add_condition("d", Some("t.d"), SortOrder::Desc).unwrap();

        assert_eq!(spec.current_order(), vec!["c", "d", "a", "b"]);
    }

    #[test]
    fn test_nulls_first_and_clear() {
        let mut spec = abc();
        spec.set_nulls_placement(NullsPlacement::First);
        assert_eq!(spec.get_order_by(), "ORDER BY t.a ASC, t.b DESC, c ASC NULLS FIRST");

        spec.clear();
        assert_eq!(spec.get_order_by(), "");
        assert!(spec.fields().is_empty());

        // cleared aliases can be registered with a new expression
        spec.add_condition("a", Some("other.a"), SortOrder::Asc).unwrap();
        assert_eq!(spec.get_order_by(), "ORDER BY other.a ASC NULLS FIRST");
    }
}
