use super::*;

#[test]
fn allowed_model_file_is_kept() {
    let mut form = OrderForm::new(FormConfig::post());
    form.choose_file("model.stl");
    assert_eq!(form.uploaded_file(), Some("model.stl"));
    assert!(form.take_alerts().is_empty());
}

#[test]
fn extension_check_is_case_insensitive() {
    let mut form = OrderForm::new(FormConfig::post());
    form.choose_file("photo.JPeG");
    assert_eq!(form.uploaded_file(), Some("photo.JPeG"));
    assert!(form.take_alerts().is_empty());
}

#[test]
fn disallowed_extension_alerts_and_clears_the_input() {
    let mut form = OrderForm::new(FormConfig::post());
    form.choose_file("model.EXE");
    assert_eq!(form.uploaded_file(), None);
    assert_eq!(
        form.take_alerts(),
        vec!["Invalid file type. Allowed: STL, 3MF, OBJ, AMF, PNG, JPEG, PDF.".to_string()]
    );
}

#[test]
fn only_the_last_extension_segment_counts() {
    let mut form = OrderForm::new(FormConfig::post());
    form.choose_file("archive.stl.gz");
    assert_eq!(form.uploaded_file(), None);
    assert_eq!(form.take_alerts().len(), 1);
}

#[test]
fn name_without_a_dot_is_rejected() {
    let mut form = OrderForm::new(FormConfig::post());
    form.choose_file("README");
    assert_eq!(form.uploaded_file(), None);
    assert_eq!(form.take_alerts().len(), 1);
}

#[test]
fn replacement_after_rejection_works() {
    let mut form = OrderForm::new(FormConfig::post());
    form.choose_file("part.zip");
    assert_eq!(form.uploaded_file(), None);

    form.choose_file("part.3mf");
    assert_eq!(form.uploaded_file(), Some("part.3mf"));
}
