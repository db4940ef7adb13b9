use crate::bot_check::BotCheck;
use crate::color_select::ColorSelect;
use crate::config::{FormConfig, SubmitStrategy};
use crate::events::{self, Event, EventKind, HandlerId, Subscription, Target};
use crate::file_check;
use crate::page::{self, Field, Page};
use crate::pdf::DocumentEngine;
use crate::post::{PostMock, PostRequest};
use crate::signature::SignaturePad;
use crate::terms::TermsGate;
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationKind {
    /// `location.href` assignment: the mailto handoff.
    HrefSet,
    /// `window.open` on an object URL: the generated document tab.
    OpenTab,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub kind: NavigationKind,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadArtifact {
    pub filename: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DeferredTask {
    /// The original deferred the post-submit scroll reset with
    /// `setTimeout(..., 0)`.
    ResetTermsScroll,
}

#[derive(Debug, Clone, Copy)]
struct ScheduledTask {
    due_at: i64,
    order: i64,
    task: DeferredTask,
}

/// The order form controller: one instance per page load.
///
/// Owns the typed view-model, the component state, the subscription
/// table, and every deterministic harness seam (clock, PRNG, transport
/// mock, capture surfaces). User-action methods synthesize events that
/// route through the table exactly as the page's listeners fired.
pub struct OrderForm {
    pub(crate) config: FormConfig,
    pub(crate) page: Page,
    subscriptions: Vec<Subscription>,
    pub(crate) color_select: ColorSelect,
    pub(crate) terms: TermsGate,
    pub(crate) signature: Option<SignaturePad>,
    pub(crate) bot: Option<BotCheck>,
    pub(crate) document_engine: Option<DocumentEngine>,
    pub(crate) post_mock: PostMock,
    pub(crate) now_ms: i64,
    pub(crate) loaded_at_ms: i64,
    task_queue: Vec<ScheduledTask>,
    next_task_order: i64,
    rng_state: u64,
    pub(crate) next_blob_id: usize,
    pub(crate) post_requests: Vec<PostRequest>,
    pub(crate) navigations: Vec<Navigation>,
    pub(crate) downloads: Vec<DownloadArtifact>,
    pub(crate) alerts: Vec<String>,
    trace: bool,
    trace_logs: Vec<String>,
    trace_log_limit: usize,
    trace_to_stderr: bool,
}

impl OrderForm {
    pub fn new(config: FormConfig) -> Self {
        let page = Page::new(&config);
        let subscriptions = events::subscription_table(&config);
        let mut form = Self {
            color_select: ColorSelect::new(config.max_colors),
            terms: TermsGate::default(),
            signature: config.signature_pad.then(SignaturePad::new),
            bot: config.bot_filter.then(|| BotCheck::new(0, 0)),
            document_engine: (config.strategy == SubmitStrategy::Pdf)
                .then_some(DocumentEngine),
            post_mock: PostMock::default(),
            now_ms: 0,
            loaded_at_ms: 0,
            task_queue: Vec::new(),
            next_task_order: 0,
            rng_state: 0x9E37_79B9_7F4A_7C15,
            next_blob_id: 1,
            post_requests: Vec::new(),
            navigations: Vec::new(),
            downloads: Vec::new(),
            alerts: Vec::new(),
            trace: false,
            trace_logs: Vec::new(),
            trace_log_limit: 10_000,
            trace_to_stderr: true,
            config,
            page,
            subscriptions,
        };
        form.regenerate_challenge();
        // The page ran the unlock check once at load: a panel short
        // enough to already sit at its bottom needs no scrolling.
        let mut terms = form.terms;
        terms.on_scroll(&mut form.page);
        form.terms = terms;
        form
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    // ----- user actions ---------------------------------------------

    pub fn type_text(&mut self, field: Field, text: &str) {
        self.page.field_mut(field).value = text.to_string();
    }

    pub fn blur(&mut self, field: Field) {
        if field == Field::Phone {
            self.dispatch(Event::plain(Target::PhoneInput, EventKind::Blur));
        }
    }

    pub fn toggle_color_panel(&mut self) {
        self.dispatch(Event::plain(Target::DropdownButton, EventKind::Click));
    }

    /// A click landing anywhere outside the dropdown.
    pub fn click_outside(&mut self) {
        self.dispatch(Event::plain(Target::Document, EventKind::Click));
    }

    pub fn press_key(&mut self, key: &str) {
        self.dispatch(Event::key_down(Target::Document, key));
    }

    pub fn click_color(&mut self, index: usize) -> Result<()> {
        if index >= self.page.colors.len() {
            return Err(Error::Runtime(format!(
                "unknown color option index: {index}"
            )));
        }
        self.page.colors[index].checked = !self.page.colors[index].checked;
        self.dispatch(Event::plain(Target::ColorOption(index), EventKind::Change));
        Ok(())
    }

    pub fn choose_file(&mut self, filename: &str) {
        self.page.upload.filename = Some(filename.to_string());
        self.dispatch(Event::plain(Target::FileInput, EventKind::Change));
    }

    pub fn scroll_terms_to(&mut self, scroll_top: f64) {
        let max = self.page.terms_panel.max_scroll_top();
        self.page.terms_panel.scroll_top = scroll_top.clamp(0.0, max);
        self.dispatch(Event::plain(Target::TermsPanel, EventKind::Scroll));
    }

    pub fn scroll_terms_to_bottom(&mut self) {
        self.scroll_terms_to(self.page.terms_panel.max_scroll_top());
    }

    /// Toggling a disabled checkbox is ignored, as in a real page.
    pub fn set_agreement(&mut self, checked: bool) {
        if self.page.agree_terms.disabled {
            return;
        }
        self.page.agree_terms.checked = checked;
    }

    pub fn set_human_check(&mut self, checked: bool) {
        self.page.human_check.checked = checked;
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.dispatch(Event::pointer(
            Target::SignatureCanvas,
            EventKind::PointerDown,
            x,
            y,
        ));
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.dispatch(Event::pointer(
            Target::SignatureCanvas,
            EventKind::PointerMove,
            x,
            y,
        ));
    }

    pub fn pointer_up(&mut self) {
        self.dispatch(Event::plain(Target::SignatureCanvas, EventKind::PointerUp));
    }

    pub fn pointer_leave(&mut self) {
        self.dispatch(Event::plain(
            Target::SignatureCanvas,
            EventKind::PointerLeave,
        ));
    }

    pub fn clear_signature(&mut self) {
        self.dispatch(Event::plain(
            Target::SignatureClearButton,
            EventKind::Click,
        ));
    }

    pub fn submit(&mut self) {
        self.dispatch(Event::plain(Target::Form, EventKind::Submit));
    }

    // ----- event routing --------------------------------------------

    pub(crate) fn dispatch(&mut self, event: Event) {
        if self.trace {
            self.trace_line(format!(
                "[event] kind={:?} target={:?}",
                event.kind, event.target
            ));
        }
        let handlers: Vec<HandlerId> = self
            .subscriptions
            .iter()
            .filter(|subscription| subscription.matches(&event))
            .map(|subscription| subscription.handler)
            .collect();
        for handler in handlers {
            self.run_handler(handler, &event);
        }
    }

    fn run_handler(&mut self, handler: HandlerId, event: &Event) {
        let color_select = self.color_select;
        match handler {
            HandlerId::ToggleColorPanel => color_select.toggle_panel(&mut self.page),
            HandlerId::CloseColorPanelOnOutsideClick => {
                color_select.set_panel_open(&mut self.page, false);
            }
            HandlerId::CloseColorPanelOnEscape => {
                if event.key.as_deref() == Some("Escape") {
                    color_select.set_panel_open(&mut self.page, false);
                }
            }
            HandlerId::EnforceColorCap => {
                if let Target::ColorOption(index) = event.target {
                    color_select.on_change(&mut self.page, index);
                }
            }
            HandlerId::ValidateUpload => self.validate_upload(),
            HandlerId::UnlockTermsOnScroll => {
                let mut terms = self.terms;
                terms.on_scroll(&mut self.page);
                self.terms = terms;
            }
            HandlerId::BeginSignatureStroke => {
                if let (Some(pad), Some((x, y))) = (self.signature.as_mut(), event.point) {
                    pad.pointer_down(x, y);
                }
            }
            HandlerId::ExtendSignatureStroke => {
                if let (Some(pad), Some((x, y))) = (self.signature.as_mut(), event.point) {
                    pad.pointer_move(x, y);
                }
            }
            HandlerId::EndSignatureStroke => {
                if let Some(pad) = self.signature.as_mut() {
                    pad.pointer_up();
                }
            }
            HandlerId::ClearSignature => self.clear_signature_state(),
            HandlerId::FormatPhone => {
                self.page.phone.value = page::format_us_phone(&self.page.phone.value);
            }
            HandlerId::SubmitForm => self.run_submit(),
        }
    }

    fn validate_upload(&mut self) {
        let Some(filename) = self.page.upload.filename.clone() else {
            return;
        };
        if !file_check::is_allowed(&filename) {
            self.alerts.push(file_check::REJECT_ALERT.to_string());
            self.page.upload.filename = None;
        }
    }

    pub(crate) fn clear_signature_state(&mut self) {
        if let Some(pad) = self.signature.as_mut() {
            pad.clear();
        }
        self.page.signature_data_url.clear();
    }

    // ----- deterministic clock --------------------------------------

    pub fn advance_time(&mut self, delta_ms: i64) -> Result<()> {
        if delta_ms < 0 {
            return Err(Error::Runtime(
                "advance_time requires non-negative milliseconds".into(),
            ));
        }
        let from = self.now_ms;
        self.now_ms = self.now_ms.saturating_add(delta_ms);
        let ran = self.run_due_tasks();
        self.trace_line(format!(
            "[timer] advance delta_ms={delta_ms} from={from} to={} ran_due={ran}",
            self.now_ms
        ));
        Ok(())
    }

    pub fn advance_time_to(&mut self, target_ms: i64) -> Result<()> {
        if target_ms < self.now_ms {
            return Err(Error::Runtime(format!(
                "advance_time_to requires target >= now_ms (target={target_ms}, now_ms={})",
                self.now_ms
            )));
        }
        self.advance_time(target_ms - self.now_ms)
    }

    pub fn now_ms(&self) -> i64 {
        self.now_ms
    }

    pub fn loaded_at_ms(&self) -> i64 {
        self.loaded_at_ms
    }

    pub(crate) fn schedule_task(&mut self, delay_ms: i64, task: DeferredTask) {
        let order = self.next_task_order;
        self.next_task_order += 1;
        self.task_queue.push(ScheduledTask {
            due_at: self.now_ms + delay_ms.max(0),
            order,
            task,
        });
    }

    fn run_due_tasks(&mut self) -> usize {
        let mut due: Vec<ScheduledTask> = self
            .task_queue
            .iter()
            .copied()
            .filter(|task| task.due_at <= self.now_ms)
            .collect();
        self.task_queue.retain(|task| task.due_at > self.now_ms);
        due.sort_by_key(|task| (task.due_at, task.order));
        let count = due.len();
        for scheduled in due {
            self.run_task(scheduled.task);
        }
        count
    }

    fn run_task(&mut self, task: DeferredTask) {
        match task {
            DeferredTask::ResetTermsScroll => self.page.terms_panel.scroll_top = 0.0,
        }
    }

    // ----- deterministic randomness ---------------------------------

    pub fn set_random_seed(&mut self, seed: u64) {
        self.rng_state = if seed == 0 { 0xA5A5_A5A5_A5A5_A5A5 } else { seed };
        // A fresh prompt so the seed fully determines the challenge.
        self.regenerate_challenge();
    }

    fn next_random_f64(&mut self) -> f64 {
        // xorshift64*: simple deterministic PRNG for the harness.
        let mut x = self.rng_state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.rng_state = if x == 0 { 0xA5A5_A5A5_A5A5_A5A5 } else { x };
        let out = x.wrapping_mul(0x2545_F491_4F6C_DD1D);
        let mantissa = out >> 11;
        (mantissa as f64) * (1.0 / ((1u64 << 53) as f64))
    }

    fn draw_digit(&mut self) -> i64 {
        (self.next_random_f64() * 9.0) as i64 + 1
    }

    pub(crate) fn regenerate_challenge(&mut self) {
        if self.bot.is_none() {
            return;
        }
        let lhs = self.draw_digit();
        let rhs = self.draw_digit();
        if let Some(bot) = self.bot.as_mut() {
            bot.set_challenge(&mut self.page, lhs, rhs);
        }
    }

    // ----- mock seams and capture surfaces --------------------------

    /// Queue the HTTP status the next POST resolves with. With nothing
    /// queued the transport accepts with 200.
    pub fn queue_post_response(&mut self, status: u16) {
        self.post_mock.queue_status(status);
    }

    /// Make the next POST fail before reaching the endpoint.
    pub fn fail_next_post(&mut self, reason: &str) {
        self.post_mock.queue_transport_failure(reason);
    }

    /// Simulate the CDN-loaded document library never appearing.
    pub fn drop_document_engine(&mut self) {
        self.document_engine = None;
    }

    pub fn take_post_requests(&mut self) -> Vec<PostRequest> {
        std::mem::take(&mut self.post_requests)
    }

    pub fn take_navigations(&mut self) -> Vec<Navigation> {
        std::mem::take(&mut self.navigations)
    }

    pub fn take_downloads(&mut self) -> Vec<DownloadArtifact> {
        std::mem::take(&mut self.downloads)
    }

    pub fn take_alerts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.alerts)
    }

    // ----- observation ----------------------------------------------

    pub fn status(&self) -> &str {
        &self.page.status
    }

    pub fn color_error(&self) -> &str {
        &self.page.color_error
    }

    pub fn terms_error(&self) -> &str {
        &self.page.terms_error
    }

    pub fn color_summary(&self) -> &str {
        &self.page.color_summary
    }

    pub fn color_panel_open(&self) -> bool {
        self.page.panel_open
    }

    /// The dropdown button's `aria-expanded` mirror.
    pub fn panel_expanded_attr(&self) -> &str {
        &self.page.panel_expanded_attr
    }

    pub fn selected_colors(&self) -> Vec<String> {
        self.page
            .selected_colors()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn terms_checkbox_enabled(&self) -> bool {
        !self.page.agree_terms.disabled
    }

    pub fn terms_agreed(&self) -> bool {
        self.page.agree_terms.checked
    }

    /// Whether the terms panel has ever reached its bottom since load
    /// (or since the post-submit re-lock).
    pub fn terms_bottom_reached(&self) -> bool {
        self.terms.reached_bottom()
    }

    pub fn terms_scroll_top(&self) -> f64 {
        self.page.terms_panel.scroll_top
    }

    pub fn value(&self, field: Field) -> &str {
        &self.page.field(field).value
    }

    pub fn focused(&self) -> Option<Field> {
        self.page.focused
    }

    pub fn uploaded_file(&self) -> Option<&str> {
        self.page.upload.filename.as_deref()
    }

    pub fn has_ink(&self) -> bool {
        self.signature.as_ref().is_some_and(SignaturePad::has_ink)
    }

    pub fn signature_data_url(&self) -> &str {
        &self.page.signature_data_url
    }

    pub fn challenge_prompt(&self) -> &str {
        &self.page.challenge_prompt
    }

    /// The sum the bot challenge currently expects, for driving tests.
    pub fn challenge_expected_sum(&self) -> Option<i64> {
        self.bot.as_ref().map(BotCheck::expected_sum)
    }

    // ----- assertions -----------------------------------------------

    pub fn assert_status(&self, expected: &str) -> Result<()> {
        Self::assert_string("status", expected, &self.page.status)
    }

    pub fn assert_color_error(&self, expected: &str) -> Result<()> {
        Self::assert_string("color error", expected, &self.page.color_error)
    }

    pub fn assert_terms_error(&self, expected: &str) -> Result<()> {
        Self::assert_string("terms error", expected, &self.page.terms_error)
    }

    fn assert_string(subject: &str, expected: &str, actual: &str) -> Result<()> {
        if expected == actual {
            Ok(())
        } else {
            Err(Error::AssertionFailed {
                subject: subject.to_string(),
                expected: expected.to_string(),
                actual: actual.to_string(),
            })
        }
    }

    // ----- tracing --------------------------------------------------

    pub fn enable_trace(&mut self, enabled: bool) {
        self.trace = enabled;
    }

    pub fn set_trace_stderr(&mut self, enabled: bool) {
        self.trace_to_stderr = enabled;
    }

    pub fn set_trace_log_limit(&mut self, max_entries: usize) -> Result<()> {
        if max_entries == 0 {
            return Err(Error::Runtime(
                "set_trace_log_limit requires at least 1 entry".into(),
            ));
        }
        self.trace_log_limit = max_entries;
        while self.trace_logs.len() > self.trace_log_limit {
            self.trace_logs.remove(0);
        }
        Ok(())
    }

    pub fn take_trace_logs(&mut self) -> Vec<String> {
        std::mem::take(&mut self.trace_logs)
    }

    pub(crate) fn trace_line(&mut self, line: String) {
        if !self.trace {
            return;
        }
        if self.trace_to_stderr {
            eprintln!("{line}");
        }
        self.trace_logs.push(line);
        while self.trace_logs.len() > self.trace_log_limit {
            self.trace_logs.remove(0);
        }
    }
}
