use crate::bot_check::{self, BotVerdict};
use crate::color_select;
use crate::config::SubmitStrategy;
use crate::datetime;
use crate::form::{DeferredTask, DownloadArtifact, Navigation, NavigationKind, OrderForm};
use crate::page::Field;
use crate::post::{self, PostOutcome, PostRequest};
use crate::signature::SignaturePad;
use crate::terms;
use crate::{mailto, pdf};

pub(crate) const REQUIRED_STATUS: &str = "Please fill out all required fields correctly.";
pub(crate) const TYPED_SIGNATURE_STATUS: &str =
    "Please type your digital signature (full name).";

impl OrderForm {
    /// The submit handler: the fixed validation sequence, then exactly
    /// one output strategy. Short-circuits on the first failure and
    /// leaves the form interactive.
    pub(crate) fn run_submit(&mut self) {
        self.page.status.clear();
        self.page.focused = None;

        if !self.bot_filter_passes() {
            return;
        }

        if self.page.selected_colors().is_empty() {
            self.page.color_error = color_select::MIN_ERROR.to_string();
            self.trace_line("[submit] blocked step=colors".to_string());
            return;
        }
        self.page.color_error.clear();

        if !self.terms.satisfied(&self.page) {
            self.page.terms_error = terms::TERMS_ERROR.to_string();
            self.trace_line("[submit] blocked step=terms".to_string());
            return;
        }
        self.page.terms_error.clear();

        if let Some(field) = self.page.first_invalid_field(self.config.phone_field) {
            self.page.status = REQUIRED_STATUS.to_string();
            self.page.focused = Some(field);
            self.trace_line(format!("[submit] blocked step=validity field={field:?}"));
            return;
        }

        if self.page.typed_signature.value.trim().is_empty() {
            self.page.status = TYPED_SIGNATURE_STATUS.to_string();
            self.page.focused = Some(Field::TypedSignature);
            self.trace_line("[submit] blocked step=signature".to_string());
            return;
        }

        // All gates cleared: stamp the agreement timestamps from the
        // harness clock.
        self.page.agreement_timestamp = datetime::format_us_locale(self.now_ms);
        self.page.agreement_timestamp_iso = datetime::format_iso(self.now_ms);

        let drawn = self.signature.as_ref().is_some_and(SignaturePad::has_ink);
        if self.config.strategy == SubmitStrategy::Post {
            self.page.signature_data_url = match (&self.signature, drawn) {
                (Some(pad), true) => pad.to_png_data_url(),
                _ => String::new(),
            };
        }

        match self.config.strategy {
            SubmitStrategy::Post => self.submit_post(),
            SubmitStrategy::Mailto => self.submit_mailto(drawn),
            SubmitStrategy::Pdf => self.submit_pdf(drawn),
        }
    }

    fn bot_filter_passes(&mut self) -> bool {
        let Some(bot) = self.bot else {
            return true;
        };
        let elapsed = self.now_ms - self.loaded_at_ms;
        match bot.verdict(&self.page, elapsed, self.config.min_dwell_ms) {
            BotVerdict::Pass => true,
            BotVerdict::Honeypot => {
                // Silent: no status, no outputs, nothing for the bot
                // to learn from.
                self.trace_line("[submit] blocked step=bot reason=honeypot".to_string());
                false
            }
            BotVerdict::TooFast => {
                self.page.status = bot_check::TOO_FAST_STATUS.to_string();
                self.trace_line("[submit] blocked step=bot reason=dwell".to_string());
                false
            }
            BotVerdict::NotConfirmed => {
                self.page.status = bot_check::CONFIRM_STATUS.to_string();
                self.trace_line("[submit] blocked step=bot reason=confirm".to_string());
                false
            }
            BotVerdict::WrongAnswer => {
                self.page.status = bot_check::WRONG_ANSWER_STATUS.to_string();
                self.page.challenge_answer.value.clear();
                self.page.focused = Some(Field::ChallengeAnswer);
                self.regenerate_challenge();
                self.trace_line("[submit] blocked step=bot reason=challenge".to_string());
                false
            }
        }
    }

    fn submit_post(&mut self) {
        self.page.status = post::SENDING_STATUS.to_string();
        let request = PostRequest {
            url: self.config.action_url.clone(),
            entries: self.page.form_entries(&self.config),
        };
        self.post_requests.push(request);

        let outcome = self.post_mock.perform();
        self.trace_line(format!("[submit] strategy=post outcome={outcome:?}"));
        match outcome {
            PostOutcome::Accepted(_) => {
                self.page.status = post::SUCCESS_STATUS.to_string();
                self.reset_after_success();
            }
            PostOutcome::HttpError(_) => {
                self.page.status = post::HTTP_ERROR_STATUS.to_string();
            }
            PostOutcome::TransportError(_) => {
                self.page.status = post::TRANSPORT_ERROR_STATUS.to_string();
            }
        }
    }

    fn submit_mailto(&mut self, drawn: bool) {
        let uri = mailto::compose(&self.page, &self.config, drawn);
        self.navigations.push(Navigation {
            kind: NavigationKind::HrefSet,
            to: uri,
        });
        self.page.status = mailto::HANDOFF_STATUS.to_string();
        self.trace_line("[submit] strategy=mailto outcome=handoff".to_string());
    }

    fn submit_pdf(&mut self, drawn: bool) {
        let Some(engine) = self.document_engine else {
            self.page.status = pdf::ENGINE_MISSING_STATUS.to_string();
            self.trace_line("[submit] strategy=pdf outcome=engine_missing".to_string());
            return;
        };
        let (filename, bytes) = engine.render(&self.page, &self.config, self.now_ms, drawn);
        let object_url = format!("blob:order-form/{}", self.next_blob_id);
        self.next_blob_id += 1;
        self.navigations.push(Navigation {
            kind: NavigationKind::OpenTab,
            to: object_url,
        });
        self.downloads.push(DownloadArtifact {
            filename,
            mime_type: "application/pdf".to_string(),
            bytes,
        });
        self.page.status = pdf::GENERATED_STATUS.to_string();
        self.trace_line("[submit] strategy=pdf outcome=generated".to_string());
    }

    /// `form.reset()` plus the dependent UI the original restored by
    /// hand after a successful POST.
    fn reset_after_success(&mut self) {
        for field in [
            Field::FullName,
            Field::Email,
            Field::Phone,
            Field::ItemDescription,
            Field::Quantity,
            Field::Instructions,
            Field::TypedSignature,
            Field::ChallengeAnswer,
            Field::Company,
        ] {
            self.page.field_mut(field).value.clear();
        }
        let color_select = self.color_select;
        color_select.reset(&mut self.page);
        self.page.upload.filename = None;
        self.page.human_check.checked = false;
        self.clear_signature_state();
        if self.config.reset_terms_after_submit {
            let mut terms = self.terms;
            terms.relock(&mut self.page);
            self.terms = terms;
            // The scroll reset was deferred to the next tick.
            self.schedule_task(0, DeferredTask::ResetTermsScroll);
        }
    }
}
