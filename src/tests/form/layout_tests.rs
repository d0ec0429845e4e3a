use crate::{
    domain::{GroupKind, paths},
    form::{FieldBinding, FormLayout, FormModel, render_outline},
};

#[test]
fn walks_all_three_levels() {
    let mut model = FormModel::unvalidated();
    model.append(&paths::schema_list()).unwrap();
    model
        .append(&paths::schema_entry(1).second(0).third_level())
        .unwrap();

    let layout = FormLayout::walk(&model);
    assert_eq!(layout.fields.len(), 1);
    assert_eq!(layout.schema_list.kind, GroupKind::SchemaList);
    assert_eq!(layout.schema_list.entries.len(), 2);

    let second_entry = &layout.schema_list.entries[1];
    assert_eq!(second_entry.title, "Schema List 2");
    let second_level = &second_entry.groups[0];
    assert_eq!(second_level.path, paths::schema_entry(1).second_level());
    let third_level = &second_level.entries[0].groups[0];
    assert_eq!(third_level.kind, GroupKind::ThirdLevel);
    assert_eq!(third_level.entries.len(), 2);
    assert!(third_level.entries[1].groups.is_empty());

    // 1 top-level + 2 per schema entry + 2 per 2nd level + 2 per 3rd level
    assert_eq!(layout.all_fields().len(), 1 + 2 * 2 + 2 * 2 + 3 * 2);
}

#[test]
fn choice_bindings_name_their_option_sets() {
    let model = FormModel::unvalidated();
    let layout = FormLayout::walk(&model);
    let entry = &layout.schema_list.entries[0];
    let FieldBinding::Choice(job_types) = &entry.fields[0] else {
        panic!("job types is a choice field");
    };
    assert_eq!(job_types.option_set, crate::domain::JOB_TYPES);
    assert_eq!(job_types.path, paths::schema_entry(0).job_types());
}

#[test]
fn outline_lists_values_and_visible_errors() {
    let mut model = FormModel::unvalidated();
    model
        .set_value(&paths::schema_entry(0).config(), "cfg1")
        .unwrap();
    let outline = render_outline(&model);
    assert!(outline.starts_with("Table Config : \"\"\n"), "{outline}");
    assert!(outline.contains("  Job Types : <none>\n"), "{outline}");
    assert!(outline.contains("  Config    : \"cfg1\"\n"), "{outline}");
    assert!(outline.contains("    3rd Level 1\n"), "{outline}");
    assert!(
        outline.contains("+ Add Schema List (schemaList)"),
        "{outline}"
    );
}
