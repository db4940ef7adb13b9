use super::*;

use std::collections::HashSet;

#[test]
fn challenge_prompt_is_a_single_digit_addition() {
    let mut form = OrderForm::new(FormConfig::post());
    form.set_random_seed(42);
    let prompt = form.challenge_prompt().to_string();
    assert!(prompt.starts_with("What is "));
    assert!(prompt.ends_with('?'));

    let sum = form.challenge_expected_sum().expect("bot filter is on");
    assert!((2..=18).contains(&sum));
}

#[test]
fn filled_honeypot_rejects_silently() -> Result<()> {
    let mut form = completed_form(FormConfig::post())?;
    form.type_text(Field::Company, "Totally Real LLC");
    form.submit();

    form.assert_status("")?;
    assert!(form.take_post_requests().is_empty());
    Ok(())
}

#[test]
fn submissions_inside_the_dwell_window_are_rejected() -> Result<()> {
    let mut form = OrderForm::new(FormConfig::post());
    form.set_random_seed(7);
    fill_required(&mut form);
    form.click_color(1)?;
    form.scroll_terms_to_bottom();
    form.set_agreement(true);
    form.set_human_check(true);
    let sum = form.challenge_expected_sum().expect("bot filter is on");
    form.type_text(Field::ChallengeAnswer, &sum.to_string());

    // Page loaded at t=0; 4.9s is still inside the 5s window.
    form.advance_time(4_900)?;
    form.submit();
    form.assert_status("Form submitted too quickly. Please review your order and try again.")?;
    assert!(form.take_post_requests().is_empty());

    form.advance_time(200)?;
    form.submit();
    form.assert_status("Request submitted successfully!")?;
    Ok(())
}

#[test]
fn unchecked_confirmation_box_blocks() -> Result<()> {
    let mut form = completed_form(FormConfig::post())?;
    form.set_human_check(false);
    form.submit();
    form.assert_status("Please confirm you are not a robot.")?;
    assert!(form.take_post_requests().is_empty());
    Ok(())
}

#[test]
fn wrong_answer_clears_the_field_and_regenerates_the_challenge() -> Result<()> {
    let mut form = completed_form(FormConfig::post())?;

    let mut prompts = HashSet::new();
    prompts.insert(form.challenge_prompt().to_string());
    for _ in 0..10 {
        let wrong = form.challenge_expected_sum().expect("bot filter is on") + 1;
        form.type_text(Field::ChallengeAnswer, &wrong.to_string());
        form.submit();

        form.assert_status("Incorrect answer, please try the new question.")?;
        assert_eq!(form.value(Field::ChallengeAnswer), "");
        assert_eq!(form.focused(), Some(Field::ChallengeAnswer));
        prompts.insert(form.challenge_prompt().to_string());
    }
    // Ten regenerations from the seeded generator cannot all collide.
    assert!(prompts.len() > 1);
    assert!(form.take_post_requests().is_empty());
    Ok(())
}

#[test]
fn correct_answer_after_a_miss_goes_through() -> Result<()> {
    let mut form = completed_form(FormConfig::post())?;
    let wrong = form.challenge_expected_sum().expect("bot filter is on") + 1;
    form.type_text(Field::ChallengeAnswer, &wrong.to_string());
    form.submit();

    let sum = form.challenge_expected_sum().expect("regenerated");
    form.type_text(Field::ChallengeAnswer, &sum.to_string());
    form.submit();
    form.assert_status("Request submitted successfully!")?;
    Ok(())
}

#[test]
fn revisions_without_the_filter_submit_at_load_time() -> Result<()> {
    let config = FormConfig {
        bot_filter: false,
        ..FormConfig::post()
    };
    let mut form = OrderForm::new(config);
    fill_required(&mut form);
    form.click_color(0)?;
    form.scroll_terms_to_bottom();
    form.set_agreement(true);

    assert_eq!(form.challenge_expected_sum(), None);
    form.submit();
    form.assert_status("Request submitted successfully!")?;
    Ok(())
}
