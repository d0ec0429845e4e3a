use std::sync::Arc;

use crate::{
    domain::{DataModel, JOB_TYPES, TYPE_OPTIONS, paths},
    form::{ChoiceField, FormError, FormModel, REQUIRED, SchemaValidator, TextField},
    tree::Scalar,
};

fn model() -> FormModel {
    let data_model = DataModel::builtin();
    let validator = SchemaValidator::new(&data_model).expect("form schema compiles");
    FormModel::new(Arc::new(data_model), Box::new(validator))
}

#[test]
fn text_field_round_trip() {
    let mut model = model();
    let field = TextField::new(paths::schema_entry(0).config(), "Config");
    assert_eq!(field.view(&model).value, "");

    field.change(&mut model, "cfg1").unwrap();
    let view = field.view(&model);
    assert_eq!(view.value, "cfg1");
    assert_eq!(view.error, None);
}

#[test]
fn text_field_shows_error_after_blur() {
    let mut model = model();
    let field = TextField::new(paths::table_config(), "Table Config");
    assert_eq!(field.view(&model).error, None);
    field.blur(&mut model).unwrap();
    assert_eq!(field.view(&model).error.as_deref(), Some(REQUIRED));
}

#[test]
fn absent_text_reads_as_empty() {
    let model = model();
    let field = TextField::new(paths::schema_entry(4).config(), "Config");
    assert_eq!(field.view(&model).value, "");
}

#[test]
fn choice_field_stores_option_name() {
    let mut model = model();
    let path = paths::schema_entry(0).second(0).kind();
    let field = ChoiceField::new(path.clone(), "Type", TYPE_OPTIONS);
    assert!(field.selected(&model).is_none(), "blank value selects nothing");

    let date = model
        .data_model()
        .get(TYPE_OPTIONS)
        .and_then(|set| set.find_by_label("date"))
        .cloned()
        .unwrap();
    field.select(&mut model, Some(&date)).unwrap();
    assert_eq!(model.get_scalar(&path), Some(&Scalar::Text("date".into())));
    assert_eq!(field.selected(&model), Some(&date));
    assert_eq!(field.view(&model).value, "date");
}

#[test]
fn clearing_a_choice_stores_null() {
    let mut model = model();
    let path = paths::schema_entry(0).job_types();
    let field = ChoiceField::new(path.clone(), "Job Types", JOB_TYPES);
    field.select_label(&mut model, "dataGrid").unwrap();
    field.select(&mut model, None).unwrap();
    assert_eq!(model.get_scalar(&path), Some(&Scalar::Null));
    assert!(field.selected(&model).is_none());

    let empty = model.data_model().get(JOB_TYPES).unwrap().items()[0].clone();
    field.select_label(&mut model, "dataGrid").unwrap();
    field.select(&mut model, Some(&empty)).unwrap();
    assert_eq!(model.get_scalar(&path), Some(&Scalar::Null));
}

#[test]
fn unknown_labels_and_sets_are_errors() {
    let mut model = model();
    let field = ChoiceField::for_path(paths::schema_entry(0).job_types(), "Job Types").unwrap();
    assert_eq!(field.option_set, JOB_TYPES);
    assert!(matches!(
        field.select_label(&mut model, "nope"),
        Err(FormError::UnknownOption { .. })
    ));

    let orphan = ChoiceField::new(paths::table_config(), "Table", "missing");
    assert!(matches!(
        orphan.select_label(&mut model, "x"),
        Err(FormError::MissingOptionSet(_))
    ));
    assert!(matches!(
        ChoiceField::for_path(paths::table_config(), "Table"),
        Err(FormError::NotAChoice(_))
    ));
}
