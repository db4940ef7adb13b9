use super::*;

#[test]
fn moves_without_a_press_leave_no_ink() {
    let mut form = OrderForm::new(FormConfig::post());
    form.pointer_move(40.0, 40.0);
    form.pointer_move(80.0, 60.0);
    assert!(!form.has_ink());
}

#[test]
fn press_move_release_marks_ink() {
    let mut form = OrderForm::new(FormConfig::post());
    form.pointer_down(10.0, 10.0);
    form.pointer_move(120.0, 60.0);
    form.pointer_up();
    assert!(form.has_ink());
}

#[test]
fn leaving_the_canvas_ends_the_stroke() {
    let mut solo = OrderForm::new(FormConfig::post());
    solo.pointer_down(10.0, 10.0);
    solo.pointer_up();
    let dot_only = solo.signature.as_ref().unwrap().to_png_data_url();

    let mut form = OrderForm::new(FormConfig::post());
    form.pointer_down(10.0, 10.0);
    form.pointer_leave();
    // No longer drawing: this move must not extend the path.
    form.pointer_move(300.0, 120.0);
    let after_leave = form.signature.as_ref().unwrap().to_png_data_url();

    assert_eq!(after_leave, dot_only);
}

#[test]
fn clear_erases_the_raster_and_resets_the_flag() {
    let blank = OrderForm::new(FormConfig::post());
    let blank_url = blank.signature.as_ref().unwrap().to_png_data_url();

    let mut form = OrderForm::new(FormConfig::post());
    form.pointer_down(10.0, 10.0);
    form.pointer_move(200.0, 100.0);
    form.pointer_up();
    assert_ne!(form.signature.as_ref().unwrap().to_png_data_url(), blank_url);

    form.clear_signature();
    assert!(!form.has_ink());
    assert_eq!(form.signature.as_ref().unwrap().to_png_data_url(), blank_url);
    assert_eq!(form.signature_data_url(), "");
}

#[test]
fn post_submission_serializes_the_drawing_into_the_hidden_field() -> Result<()> {
    let mut form = completed_form(FormConfig::post())?;
    form.pointer_down(20.0, 20.0);
    form.pointer_move(180.0, 90.0);
    form.pointer_up();
    form.submit();

    let requests = form.take_post_requests();
    let data_url = requests[0]
        .entries
        .iter()
        .find(|(name, _)| name == "Signature Data URL")
        .map(|(_, value)| value.as_str())
        .expect("hidden field present");
    // PNG magic behind the base64 prefix.
    assert!(data_url.starts_with("data:image/png;base64,iVBORw0KGgo"));
    Ok(())
}

#[test]
fn untouched_pad_posts_an_empty_hidden_field() -> Result<()> {
    let mut form = completed_form(FormConfig::post())?;
    form.submit();

    let requests = form.take_post_requests();
    let data_url = requests[0]
        .entries
        .iter()
        .find(|(name, _)| name == "Signature Data URL")
        .map(|(_, value)| value.as_str());
    assert_eq!(data_url, Some(""));
    Ok(())
}

#[test]
fn revisions_without_a_pad_ignore_pointer_traffic() -> Result<()> {
    let config = FormConfig {
        signature_pad: false,
        ..FormConfig::post()
    };
    let mut form = completed_form(config)?;
    form.pointer_down(10.0, 10.0);
    form.pointer_up();
    assert!(!form.has_ink());

    form.submit();
    let requests = form.take_post_requests();
    assert!(
        requests[0]
            .entries
            .iter()
            .all(|(name, _)| name != "Signature Data URL")
    );
    Ok(())
}
