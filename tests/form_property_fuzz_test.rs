use order_form::{Field, FormConfig, OrderForm};
use proptest::collection::vec;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Action {
    ClickColor(usize),
    TogglePanel,
    ClickOutside,
    PressEscape,
    ScrollTerms(u32),
    Agree(bool),
    ChooseFile(&'static str),
    TypeName(&'static str),
    DrawStroke,
    Advance(u32),
    Submit,
}

fn action_strategy() -> BoxedStrategy<Action> {
    prop_oneof![
        (0usize..10).prop_map(Action::ClickColor),
        Just(Action::TogglePanel),
        Just(Action::ClickOutside),
        Just(Action::PressEscape),
        (0u32..=420).prop_map(Action::ScrollTerms),
        any::<bool>().prop_map(Action::Agree),
        prop_oneof![
            Just("part.stl"),
            Just("part.exe"),
            Just("photo.jpeg"),
            Just("notes"),
        ]
        .prop_map(Action::ChooseFile),
        prop_oneof![Just("Riley"), Just(""), Just("Zoë")].prop_map(Action::TypeName),
        Just(Action::DrawStroke),
        (0u32..10_000).prop_map(Action::Advance),
        Just(Action::Submit),
    ]
    .boxed()
}

fn apply(form: &mut OrderForm, action: &Action) {
    match action {
        Action::ClickColor(index) => {
            form.click_color(*index).expect("index within the palette");
        }
        Action::TogglePanel => form.toggle_color_panel(),
        Action::ClickOutside => form.click_outside(),
        Action::PressEscape => form.press_key("Escape"),
        Action::ScrollTerms(px) => form.scroll_terms_to(f64::from(*px)),
        Action::Agree(checked) => form.set_agreement(*checked),
        Action::ChooseFile(name) => form.choose_file(name),
        Action::TypeName(name) => form.type_text(Field::FullName, name),
        Action::DrawStroke => {
            form.pointer_down(12.0, 12.0);
            form.pointer_move(200.0, 80.0);
            form.pointer_up();
        }
        Action::Advance(ms) => form.advance_time(i64::from(*ms)).expect("non-negative"),
        Action::Submit => form.submit(),
    }
}

proptest! {
    #[test]
    fn color_cap_holds_under_any_toggle_sequence(clicks in vec(0usize..10, 0..60)) {
        let mut form = OrderForm::new(FormConfig::post());
        for index in clicks {
            form.click_color(index).expect("index within the palette");
            prop_assert!(form.selected_colors().len() <= 4);
        }
    }

    #[test]
    fn terms_unlock_exactly_tracks_reaching_bottom(scrolls in vec(0u32..=420, 0..30)) {
        // The fixed panel is 180px tall over 600px of content, so the
        // 2px window opens at scroll offsets of 418 and above.
        let mut form = OrderForm::new(FormConfig::post());
        let mut reached = false;
        for scroll in scrolls {
            form.scroll_terms_to(f64::from(scroll));
            reached = reached || scroll >= 418;
            prop_assert_eq!(form.terms_checkbox_enabled(), reached);
        }
    }

    #[test]
    fn phone_formatting_is_idempotent(raw in "[0-9 ().-]{0,16}") {
        let mut form = OrderForm::new(FormConfig::post());
        form.type_text(Field::Phone, &raw);
        form.blur(Field::Phone);
        let once = form.value(Field::Phone).to_string();
        form.blur(Field::Phone);
        prop_assert_eq!(form.value(Field::Phone), once.as_str());
    }

    #[test]
    fn arbitrary_interaction_storms_keep_the_form_consistent(
        actions in vec(action_strategy(), 0..80)
    ) {
        let mut form = OrderForm::new(FormConfig::post());
        form.set_random_seed(99);
        for action in &actions {
            apply(&mut form, action);
            prop_assert!(form.selected_colors().len() <= 4);
            prop_assert!(!form.terms_agreed() || form.terms_checkbox_enabled());
        }
        // Still interactive after whatever happened above.
        let open = form.color_panel_open();
        form.toggle_color_panel();
        prop_assert_eq!(form.color_panel_open(), !open);
    }
}
