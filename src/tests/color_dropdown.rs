use super::*;

#[test]
fn summary_starts_at_placeholder_and_follows_selection() -> Result<()> {
    let mut form = OrderForm::new(FormConfig::post());
    assert_eq!(form.color_summary(), "Select Colors");

    form.click_color(0)?;
    form.click_color(2)?;
    assert_eq!(form.color_summary(), "Black, Gray");
    assert_eq!(form.selected_colors(), vec!["Black", "Gray"]);
    Ok(())
}

#[test]
fn fifth_selection_is_reverted_with_limit_error() -> Result<()> {
    let mut form = OrderForm::new(FormConfig::post());
    for index in 0..4 {
        form.click_color(index)?;
    }
    form.assert_color_error("")?;
    assert_eq!(form.color_summary(), "Black, White, Gray, Red");

    form.click_color(4)?;
    assert_eq!(form.selected_colors().len(), 4);
    assert!(!form.selected_colors().contains(&"Orange".to_string()));
    form.assert_color_error("You can select up to 4 colors only.")?;
    // The early return leaves the summary as it was.
    assert_eq!(form.color_summary(), "Black, White, Gray, Red");
    Ok(())
}

#[test]
fn unchecking_after_limit_clears_the_error() -> Result<()> {
    let mut form = OrderForm::new(FormConfig::post());
    for index in 0..4 {
        form.click_color(index)?;
    }
    form.click_color(4)?;
    form.assert_color_error("You can select up to 4 colors only.")?;

    form.click_color(0)?;
    form.assert_color_error("")?;
    assert_eq!(form.color_summary(), "White, Gray, Red");
    Ok(())
}

#[test]
fn panel_toggles_and_mirrors_aria_expanded() {
    let mut form = OrderForm::new(FormConfig::post());
    assert!(!form.color_panel_open());
    assert_eq!(form.panel_expanded_attr(), "false");

    form.toggle_color_panel();
    assert!(form.color_panel_open());
    assert_eq!(form.panel_expanded_attr(), "true");

    form.toggle_color_panel();
    assert!(!form.color_panel_open());
    assert_eq!(form.panel_expanded_attr(), "false");
}

#[test]
fn outside_click_closes_the_panel() {
    let mut form = OrderForm::new(FormConfig::post());
    form.toggle_color_panel();
    assert!(form.color_panel_open());

    form.click_outside();
    assert!(!form.color_panel_open());
}

#[test]
fn escape_closes_the_panel_in_the_latest_revision() {
    let mut form = OrderForm::new(FormConfig::post());
    form.toggle_color_panel();
    form.press_key("Enter");
    assert!(form.color_panel_open());

    form.press_key("Escape");
    assert!(!form.color_panel_open());
}

#[test]
fn escape_is_inert_when_the_revision_lacks_the_listener() {
    let config = FormConfig {
        escape_closes_panel: false,
        ..FormConfig::post()
    };
    let mut form = OrderForm::new(config);
    form.toggle_color_panel();
    form.press_key("Escape");
    assert!(form.color_panel_open());
}

#[test]
fn unknown_color_index_is_a_runtime_error() {
    let mut form = OrderForm::new(FormConfig::post());
    let err = form.click_color(99).unwrap_err();
    assert!(matches!(err, Error::Runtime(_)));
}
