//! Constraint mapping tests

use schema_constraints_sdk::constraints::{
    CallbackRegistry, ChoiceConstraint, ChoiceKey, ChoiceSet, Constraint, ConstraintRegistry,
    PropertyHandle,
};
use schema_constraints_sdk::describe::{ClassDescriber, ConstraintMapper, MapError};
use schema_constraints_sdk::models::Schema;
use schema_constraints_sdk::validation::validate_schema;
use serde_json::json;

mod required_list_tests {
    use super::*;

    #[test]
    fn test_required_list_stays_dense_and_sequential() {
        let mut registry = ConstraintRegistry::new();
        registry.declare(
            "Entity",
            "property1",
            vec![
                Constraint::NotBlank { allow_null: false },
                Constraint::Length {
                    min: Some(1),
                    max: None,
                },
            ],
        );
        registry.declare(
            "Entity",
            "property2",
            vec![Constraint::NotBlank { allow_null: false }],
        );

        let mut schema = Schema::new();
        schema.add_property("property1");
        schema.add_property("property2");

        let mapper = ConstraintMapper::new(&registry);
        mapper
            .update_property(&PropertyHandle::new("Entity", "property1"), &mut schema)
            .unwrap();
        mapper
            .update_property(&PropertyHandle::new("Entity", "property2"), &mut schema)
            .unwrap();

        assert_eq!(
            schema.required,
            vec!["property1".to_string(), "property2".to_string()]
        );
        assert_eq!(schema.property("property1").unwrap().min_length, Some(1));
        assert_eq!(schema.property("property1").unwrap().max_length, None);
    }

    #[test]
    fn test_allow_null_keeps_property_optional() {
        let mut registry = ConstraintRegistry::new();
        registry.declare(
            "Entity",
            "property1",
            vec![
                Constraint::NotBlank { allow_null: true },
                Constraint::Length {
                    min: Some(1),
                    max: None,
                },
            ],
        );
        registry.declare(
            "Entity",
            "property2",
            vec![Constraint::NotBlank { allow_null: false }],
        );

        let mut schema = Schema::new();
        schema.add_property("property1");
        schema.add_property("property2");

        let mapper = ConstraintMapper::new(&registry);
        mapper
            .update_property(&PropertyHandle::new("Entity", "property1"), &mut schema)
            .unwrap();
        mapper
            .update_property(&PropertyHandle::new("Entity", "property2"), &mut schema)
            .unwrap();

        assert_eq!(schema.required, vec!["property2".to_string()]);
    }

    #[test]
    fn test_not_null_always_marks_required() {
        let mut registry = ConstraintRegistry::new();
        registry.declare("Entity", "property1", vec![Constraint::NotNull]);

        let mut schema = Schema::new();
        schema.add_property("property1");

        ConstraintMapper::new(&registry)
            .update_property(&PropertyHandle::new("Entity", "property1"), &mut schema)
            .unwrap();

        assert_eq!(schema.required, vec!["property1".to_string()]);
    }

    #[test]
    fn test_repeated_required_constraints_do_not_duplicate() {
        let mut registry = ConstraintRegistry::new();
        registry.declare(
            "Entity",
            "property1",
            vec![
                Constraint::NotBlank { allow_null: false },
                Constraint::NotNull,
                Constraint::NotBlank { allow_null: false },
            ],
        );

        let mut schema = Schema::new();
        schema.add_property("property1");

        ConstraintMapper::new(&registry)
            .update_property(&PropertyHandle::new("Entity", "property1"), &mut schema)
            .unwrap();

        assert_eq!(schema.required, vec!["property1".to_string()]);
    }
}

mod length_tests {
    use super::*;

    fn length_schema(min: Option<u64>, max: Option<u64>) -> Schema {
        let mut registry = ConstraintRegistry::new();
        registry.declare("Entity", "property1", vec![Constraint::Length { min, max }]);

        let mut schema = Schema::new();
        schema.add_property("property1");

        ConstraintMapper::new(&registry)
            .update_property(&PropertyHandle::new("Entity", "property1"), &mut schema)
            .unwrap();
        schema
    }

    #[test]
    fn test_min_only_leaves_max_length_unset() {
        let schema = length_schema(Some(1), None);
        let property = schema.property("property1").unwrap();
        assert_eq!(property.min_length, Some(1));
        assert_eq!(property.max_length, None);
    }

    #[test]
    fn test_max_only_leaves_min_length_unset() {
        let schema = length_schema(None, Some(100));
        let property = schema.property("property1").unwrap();
        assert_eq!(property.min_length, None);
        assert_eq!(property.max_length, Some(100));
    }

    #[test]
    fn test_both_bounds_set_independently_from_one_declaration() {
        let schema = length_schema(Some(2), Some(50));
        let property = schema.property("property1").unwrap();
        assert_eq!(property.min_length, Some(2));
        assert_eq!(property.max_length, Some(50));
    }

    #[test]
    fn test_later_length_declaration_wins_per_declared_side() {
        let mut registry = ConstraintRegistry::new();
        registry.declare(
            "Entity",
            "property1",
            vec![
                Constraint::Length {
                    min: Some(1),
                    max: Some(10),
                },
                Constraint::Length {
                    min: Some(3),
                    max: None,
                },
            ],
        );

        let mut schema = Schema::new();
        schema.add_property("property1");

        ConstraintMapper::new(&registry)
            .update_property(&PropertyHandle::new("Entity", "property1"), &mut schema)
            .unwrap();

        let property = schema.property("property1").unwrap();
        // Last declaration wins where it declares a side; the undeclared
        // side keeps the earlier value.
        assert_eq!(property.min_length, Some(3));
        assert_eq!(property.max_length, Some(10));
    }
}

mod choice_tests {
    use super::*;

    #[test]
    fn test_keyed_choices_become_dense_value_list() {
        let mut registry = ConstraintRegistry::new();
        registry.declare(
            "Entity",
            "property1",
            vec![
                Constraint::Length {
                    min: Some(1),
                    max: None,
                },
                Constraint::Choice(ChoiceConstraint::keyed(vec![
                    (ChoiceKey::Index(1), json!("active")),
                    (ChoiceKey::Index(2), json!("blocked")),
                ])),
            ],
        );

        let mut schema = Schema::new();
        schema.add_property("property1");

        ConstraintMapper::new(&registry)
            .update_property(&PropertyHandle::new("Entity", "property1"), &mut schema)
            .unwrap();

        assert_eq!(
            schema.property("property1").unwrap().enum_values,
            Some(vec![json!("active"), json!("blocked")])
        );
    }

    #[test]
    fn test_string_keyed_choices_drop_keys_and_keep_order() {
        let mut registry = ConstraintRegistry::new();
        registry.declare(
            "Entity",
            "property1",
            vec![Constraint::Choice(ChoiceConstraint::keyed(vec![
                (ChoiceKey::Name("first".to_string()), json!(10)),
                (ChoiceKey::Name("second".to_string()), json!(20)),
            ]))],
        );

        let mut schema = Schema::new();
        schema.add_property("property1");

        ConstraintMapper::new(&registry)
            .update_property(&PropertyHandle::new("Entity", "property1"), &mut schema)
            .unwrap();

        assert_eq!(
            schema.property("property1").unwrap().enum_values,
            Some(vec![json!(10), json!(20)])
        );
    }

    #[test]
    fn test_multiple_choice_applies_enum_to_items() {
        let mut registry = ConstraintRegistry::new();
        registry.declare(
            "Entity",
            "property1",
            vec![Constraint::Choice(
                ChoiceConstraint::values(vec![json!("one"), json!("two")]).multiple(),
            )],
        );

        let mut schema = Schema::new();
        schema.add_property("property1");

        ConstraintMapper::new(&registry)
            .update_property(&PropertyHandle::new("Entity", "property1"), &mut schema)
            .unwrap();

        let property = schema.property("property1").unwrap();
        assert_eq!(property.enum_values, None);
        let items = property.items.as_deref().unwrap();
        assert_eq!(items.enum_values, Some(vec![json!("one"), json!("two")]));
    }

    #[test]
    fn test_callback_resolves_through_registry() {
        let mut registry = ConstraintRegistry::new();
        registry.declare(
            "Entity",
            "property1",
            vec![Constraint::Choice(ChoiceConstraint::callback("statuses"))],
        );

        let mut callbacks = CallbackRegistry::new();
        callbacks.register("statuses", || {
            ChoiceSet::Keyed(vec![
                (ChoiceKey::Index(1), json!("active")),
                (ChoiceKey::Index(2), json!("blocked")),
            ])
        });

        let mut schema = Schema::new();
        schema.add_property("property1");

        ConstraintMapper::with_callbacks(&registry, callbacks)
            .update_property(&PropertyHandle::new("Entity", "property1"), &mut schema)
            .unwrap();

        assert_eq!(
            schema.property("property1").unwrap().enum_values,
            Some(vec![json!("active"), json!("blocked")])
        );
    }

    #[test]
    fn test_unresolved_callback_is_an_error_and_leaves_enum_unset() {
        let mut registry = ConstraintRegistry::new();
        registry.declare(
            "Entity",
            "property1",
            vec![Constraint::Choice(ChoiceConstraint::callback("missing"))],
        );

        let mut schema = Schema::new();
        schema.add_property("property1");

        let result = ConstraintMapper::new(&registry)
            .update_property(&PropertyHandle::new("Entity", "property1"), &mut schema);

        match result {
            Err(MapError::UnknownCallback(name)) => assert_eq!(name, "missing"),
            other => panic!("expected UnknownCallback, got {:?}", other),
        }
        assert_eq!(schema.property("property1").unwrap().enum_values, None);
    }

    #[test]
    fn test_later_choice_overwrites_earlier_enum() {
        let mut registry = ConstraintRegistry::new();
        registry.declare(
            "Entity",
            "property1",
            vec![
                Constraint::Choice(ChoiceConstraint::values(vec![json!("a")])),
                Constraint::Choice(ChoiceConstraint::values(vec![json!("b"), json!("c")])),
            ],
        );

        let mut schema = Schema::new();
        schema.add_property("property1");

        ConstraintMapper::new(&registry)
            .update_property(&PropertyHandle::new("Entity", "property1"), &mut schema)
            .unwrap();

        assert_eq!(
            schema.property("property1").unwrap().enum_values,
            Some(vec![json!("b"), json!("c")])
        );
    }
}

mod unsupported_constraint_tests {
    use super::*;

    #[test]
    fn test_unmapped_constraints_are_skipped_without_error() {
        let mut registry = ConstraintRegistry::new();
        registry.declare(
            "Entity",
            "property1",
            vec![
                Constraint::Other("Email".to_string()),
                Constraint::Length {
                    min: Some(1),
                    max: None,
                },
                Constraint::Other("Ip".to_string()),
            ],
        );

        let mut schema = Schema::new();
        schema.add_property("property1");

        ConstraintMapper::new(&registry)
            .update_property(&PropertyHandle::new("Entity", "property1"), &mut schema)
            .unwrap();

        let property = schema.property("property1").unwrap();
        assert_eq!(property.min_length, Some(1));
        assert!(schema.required.is_empty());
    }

    #[test]
    fn test_unconstrained_property_is_untouched() {
        let registry = ConstraintRegistry::new();

        let mut schema = Schema::new();
        schema.add_property("property1");
        let before = schema.clone();

        ConstraintMapper::new(&registry)
            .update_property(&PropertyHandle::new("Entity", "property1"), &mut schema)
            .unwrap();

        assert_eq!(schema, before);
    }
}

mod describer_tests {
    use super::*;

    #[test]
    fn test_full_class_description_passes_validation() {
        let mut registry = ConstraintRegistry::new();
        registry.declare(
            "User",
            "username",
            vec![
                Constraint::NotBlank { allow_null: false },
                Constraint::Length {
                    min: Some(3),
                    max: Some(32),
                },
                Constraint::Regex {
                    pattern: "[a-z0-9_]+".to_string(),
                },
            ],
        );
        registry.declare(
            "User",
            "roles",
            vec![
                Constraint::Count {
                    min: Some(1),
                    max: None,
                },
                Constraint::Choice(
                    ChoiceConstraint::values(vec![json!("admin"), json!("member")]).multiple(),
                ),
            ],
        );
        registry.declare(
            "User",
            "age",
            vec![Constraint::Range {
                min: Some(0),
                max: Some(150),
            }],
        );

        let describer = ClassDescriber::new(&registry);
        let schema = describer.describe("User", &["username", "roles", "age"]).unwrap();

        assert_eq!(schema.required, vec!["username".to_string()]);

        let username = schema.property("username").unwrap();
        assert_eq!(username.min_length, Some(3));
        assert_eq!(username.max_length, Some(32));
        assert_eq!(username.pattern.as_deref(), Some("[a-z0-9_]+"));

        let roles = schema.property("roles").unwrap();
        assert_eq!(roles.min_items, Some(1));
        assert_eq!(roles.max_items, None);
        assert_eq!(
            roles.items.as_deref().unwrap().enum_values,
            Some(vec![json!("admin"), json!("member")])
        );

        let age = schema.property("age").unwrap();
        assert_eq!(age.minimum, Some(0));
        assert_eq!(age.maximum, Some(150));

        assert!(validate_schema(&schema).is_valid());
    }

    #[test]
    fn test_describe_with_callbacks() {
        let mut registry = ConstraintRegistry::new();
        registry.declare(
            "Order",
            "status",
            vec![Constraint::Choice(ChoiceConstraint::callback("statuses"))],
        );

        let mut callbacks = CallbackRegistry::new();
        callbacks.register("statuses", || {
            ChoiceSet::List(vec![json!("open"), json!("shipped")])
        });

        let describer = ClassDescriber::with_callbacks(&registry, callbacks);
        let schema = describer.describe("Order", &["status"]).unwrap();

        assert_eq!(
            schema.property("status").unwrap().enum_values,
            Some(vec![json!("open"), json!("shipped")])
        );
    }
}
