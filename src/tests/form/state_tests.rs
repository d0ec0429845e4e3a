use std::sync::Arc;

use crate::{
    domain::{DataModel, FormValues, paths},
    form::{
        CommandOutcome, FormCommand, FormError, FormModel, REQUIRED, SchemaValidator,
        SubmitOutcome,
    },
    tree::{FieldPath, Scalar, ValueNode},
};

fn validated_model() -> FormModel {
    let data_model = DataModel::builtin();
    let validator = SchemaValidator::new(&data_model).expect("form schema compiles");
    FormModel::new(Arc::new(data_model), Box::new(validator))
}

fn fill_initial(model: &mut FormModel) {
    let entry = paths::schema_entry(0);
    let second = entry.second(0);
    let third = second.third(0);
    model.set_value(&paths::table_config(), "table").unwrap();
    model.set_value(&entry.job_types(), "dataGrid").unwrap();
    model.set_value(&entry.config(), "cfg1").unwrap();
    model.set_value(&second.name(), "second").unwrap();
    model.set_value(&second.kind(), "date").unwrap();
    model.set_value(&third.name(), "third").unwrap();
    model.set_value(&third.random(), "number").unwrap();
}

fn len_at(model: &FormModel, path: &FieldPath) -> usize {
    model
        .get_value(path)
        .and_then(ValueNode::as_sequence)
        .map_or(0, <[ValueNode]>::len)
}

#[test]
fn set_value_leaves_siblings_alone() {
    let mut model = FormModel::unvalidated();
    let config = paths::schema_entry(0).config();
    let before = model.values().clone();

    assert!(model.set_value(&config, "cfg1").unwrap());
    assert_eq!(
        model.get_scalar(&config),
        Some(&Scalar::Text("cfg1".into()))
    );
    for (path, scalar) in before.leaves() {
        if path != config {
            assert_eq!(model.get_scalar(&path), Some(scalar), "{path}");
        }
    }
    assert_eq!(model.revision(), 1);
}

#[test]
fn unchanged_edit_keeps_revision() {
    let mut model = FormModel::unvalidated();
    assert!(!model.set_value(&paths::table_config(), "").unwrap());
    assert_eq!(model.revision(), 0);
}

#[test]
fn errors_stay_hidden_until_touched() {
    let mut model = validated_model();
    let table = paths::table_config();
    model.set_value(&table, "x").unwrap();
    model.set_value(&table, "").unwrap();

    assert_eq!(model.get_error(&table), Some(REQUIRED));
    assert!(!model.is_touched(&table));
    assert_eq!(model.visible_error(&table), None);

    model.touch(&table).unwrap();
    assert_eq!(model.visible_error(&table), Some(REQUIRED));
}

#[test]
fn append_uses_group_template() {
    let mut model = FormModel::unvalidated();
    let group = paths::schema_entry(0).second(0).third_level();
    assert_eq!(model.append(&group).unwrap(), 2);
    assert_eq!(
        model.get_value(&group.index(1)),
        Some(&crate::domain::GroupKind::ThirdLevel.template())
    );

    let err = model.append(&paths::table_config()).unwrap_err();
    assert!(matches!(err, FormError::UnknownGroup(_)));
}

#[test]
fn append_rejects_paths_off_the_form_shape() {
    let mut model = FormModel::unvalidated();
    model.set_value(&paths::table_config(), "orders").unwrap();
    let before = model.values().clone();

    let err = model
        .append(&FieldPath::parse("tableConfig.schemaList"))
        .unwrap_err();
    assert!(matches!(err, FormError::UnknownGroup(_)));
    let err = model
        .append(&paths::schema_entry(3).second_level())
        .unwrap_err();
    assert!(matches!(err, FormError::UnknownGroup(_)));
    let err = model
        .append(&paths::schema_entry(0).second(4).third_level())
        .unwrap_err();
    assert!(matches!(err, FormError::UnknownGroup(_)));

    assert_eq!(model.values(), &before);
    assert_eq!(
        model.get_scalar(&paths::table_config()),
        Some(&Scalar::Text("orders".into()))
    );
    assert_eq!(len_at(&model, &paths::schema_list()), 1);
}

#[test]
fn remove_realigns_touched_and_errors() {
    let mut model = validated_model();
    let list = paths::schema_list();
    model.append(&list).unwrap();
    model.touch(&paths::schema_entry(1).config()).unwrap();
    assert!(model.get_error(&paths::schema_entry(1).config()).is_some());

    assert!(model.remove_at(&list, 0));
    assert_eq!(len_at(&model, &list), 1);
    assert!(model.is_touched(&paths::schema_entry(0).config()));
    assert!(!model.is_touched(&paths::schema_entry(1).config()));
    assert_eq!(
        model.visible_error(&paths::schema_entry(0).config()),
        Some(REQUIRED)
    );
}

#[test]
fn remove_out_of_range_is_ignored() {
    let mut model = FormModel::unvalidated();
    let before = model.values().clone();
    assert!(!model.remove_at(&paths::schema_list(), 3));
    assert_eq!(model.values(), &before);
    assert_eq!(model.revision(), 0);
}

#[test]
fn third_level_removal_targets_its_own_index() {
    let mut model = FormModel::unvalidated();
    let second = paths::schema_entry(0).second(0);
    model.append(&paths::schema_entry(0).second_level()).unwrap();
    model.append(&second.third_level()).unwrap();
    model.set_value(&second.third(1).name(), "keep").unwrap();

    assert!(model.remove_at(&second.third_level(), 0));
    assert_eq!(len_at(&model, &second.third_level()), 1);
    assert_eq!(len_at(&model, &paths::schema_entry(0).second_level()), 2);
    assert_eq!(
        model.get_scalar(&second.third(0).name()),
        Some(&Scalar::Text("keep".into()))
    );
}

#[test]
fn stale_revision_is_rejected() {
    let mut model = FormModel::unvalidated();
    let observed = model.revision();
    model
        .apply_if_revision(
            observed,
            FormCommand::Set {
                path: paths::table_config(),
                value: "first".into(),
            },
        )
        .unwrap();

    let err = model
        .apply_if_revision(
            observed,
            FormCommand::Set {
                path: paths::table_config(),
                value: "second".into(),
            },
        )
        .unwrap_err();
    assert!(matches!(
        err,
        FormError::StaleRevision {
            expected: 0,
            actual: 1
        }
    ));
    assert_eq!(
        model.get_scalar(&paths::table_config()),
        Some(&Scalar::Text("first".into()))
    );
}

#[test]
fn submit_blocks_on_errors_and_touches_everything() {
    let mut model = validated_model();
    let mut called = false;
    let outcome = model.submit(|_| called = true).unwrap();

    let SubmitOutcome::Invalid { issues } = outcome else {
        panic!("blank form must not submit");
    };
    assert!(!called);
    assert_eq!(issues.len(), 7);
    assert!(issues.iter().all(|issue| issue.message == REQUIRED));
    for path in model.leaf_paths() {
        assert!(model.is_touched(&path), "{path}");
    }
}

#[test]
fn submit_hands_typed_values_to_handler() {
    let mut model = validated_model();
    fill_initial(&mut model);
    assert_eq!(model.error_count(), 0);

    let mut received = None;
    let outcome = model.submit(|values| received = Some(values.clone())).unwrap();
    let SubmitOutcome::Submitted(values) = outcome else {
        panic!("filled form should submit");
    };
    assert_eq!(received.as_ref(), Some(&values));
    assert_eq!(values.schema_list[0].config.as_deref(), Some("cfg1"));
    assert_eq!(
        values.schema_list[0].second_level[0].third_level[0]
            .random
            .as_deref(),
        Some("number")
    );
}

#[test]
fn submit_command_reports_outcome() {
    let mut model = validated_model();
    fill_initial(&mut model);
    let outcome = crate::form::apply_command(&mut model, FormCommand::Submit).unwrap();
    assert!(matches!(
        outcome,
        CommandOutcome::Submitted(SubmitOutcome::Submitted(FormValues { .. }))
    ));
}

#[test]
fn seed_values_must_be_a_record() {
    let err = FormModel::unvalidated()
        .with_values(ValueNode::sequence([]))
        .unwrap_err();
    assert!(matches!(err, FormError::InvalidRoot));
}

#[test]
fn flags_are_not_form_values() {
    let mut model = FormModel::unvalidated();
    let err = model.set_value(&paths::table_config(), true).unwrap_err();
    assert!(matches!(err, FormError::FlagValue(_)));
    assert_eq!(model.revision(), 0);

    let seeded = ValueNode::record([("tableConfig", ValueNode::flag(true))]);
    let err = FormModel::unvalidated().with_values(seeded).unwrap_err();
    assert!(matches!(err, FormError::FlagValue(path) if path == "tableConfig"));
}
