/// Default color palette offered by the dropdown.
pub(crate) const DEFAULT_COLORS: [&str; 10] = [
    "Black", "White", "Gray", "Red", "Orange", "Yellow", "Green", "Blue", "Purple", "Pink",
];

/// Output strategy of the submission pipeline. The page revisions were
/// mutually exclusive on this axis; exactly one strategy is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitStrategy {
    /// Form-encoded POST to the configured endpoint, JSON response.
    Post,
    /// `mailto:` URI handoff to the OS mail client.
    Mailto,
    /// Client-side PDF generation, opened in a tab and downloaded.
    Pdf,
}

/// Static configuration of one form revision.
///
/// The near-duplicate page revisions differed only in which optional
/// features were present; each divergence is an independent flag here,
/// never a merged guess. Runtime knobs (seed, mock responses, trace)
/// stay harness setters on [`crate::OrderForm`].
#[derive(Debug, Clone, PartialEq)]
pub struct FormConfig {
    pub strategy: SubmitStrategy,
    /// POST endpoint for [`SubmitStrategy::Post`].
    pub action_url: String,
    /// Recipient address for [`SubmitStrategy::Mailto`].
    pub mailto_recipient: String,
    /// URL-encoded into the mailto subject line.
    pub mail_subject: String,
    /// Checkbox values offered by the color dropdown.
    pub colors: Vec<String>,
    /// Selection cap enforced on every change.
    pub max_colors: usize,
    /// Hand-drawn signature canvas present.
    pub signature_pad: bool,
    /// Honeypot + dwell time + confirm box + arithmetic challenge.
    pub bot_filter: bool,
    /// Phone field with US formatting on blur.
    pub phone_field: bool,
    /// Escape closes the color panel (latest dropdown revision).
    pub escape_closes_panel: bool,
    /// CRLF line endings in the mail body (final mailto revision).
    pub crlf_body: bool,
    /// Re-lock the terms checkbox after a successful POST.
    pub reset_terms_after_submit: bool,
    /// Minimum milliseconds between page load and an accepted submit.
    pub min_dwell_ms: i64,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            strategy: SubmitStrategy::Post,
            action_url: "https://formspree.io/f/order-intake".to_string(),
            mailto_recipient: "orders@shop3d.example".to_string(),
            mail_subject: "New Custom 3D Order Request".to_string(),
            colors: DEFAULT_COLORS.iter().map(|c| c.to_string()).collect(),
            max_colors: 4,
            signature_pad: true,
            bot_filter: true,
            phone_field: true,
            escape_closes_panel: true,
            crlf_body: true,
            reset_terms_after_submit: true,
            min_dwell_ms: 5_000,
        }
    }
}

impl FormConfig {
    /// Richest endpoint-POST revision: every optional feature enabled.
    pub fn post() -> Self {
        Self::default()
    }

    /// Richest mailto revision. The mailto pages never reset the form
    /// after handoff, so the terms re-lock flag is off.
    pub fn mailto() -> Self {
        Self {
            strategy: SubmitStrategy::Mailto,
            reset_terms_after_submit: false,
            ..Self::default()
        }
    }

    /// Richest PDF revision. Same page lifetime behavior as mailto.
    pub fn pdf() -> Self {
        Self {
            strategy: SubmitStrategy::Pdf,
            reset_terms_after_submit: false,
            ..Self::default()
        }
    }
}
