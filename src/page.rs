use std::sync::OnceLock;

use fancy_regex::Regex;

use crate::color_select;
use crate::config::FormConfig;

/// Scrollable terms panel geometry. Fixed content, like the static page.
pub(crate) const TERMS_CLIENT_HEIGHT: f64 = 180.0;
pub(crate) const TERMS_SCROLL_HEIGHT: f64 = 600.0;

/// Scroll tolerance in pixels when deciding the panel reached bottom.
pub(crate) const SCROLL_BOTTOM_SLACK: f64 = 2.0;

const US_PHONE_PATTERN: &str = r"^\(?\d{3}\)?[\s.-]?\d{3}[\s.-]?\d{4}$";

/// Text-bearing controls addressable from user actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    FullName,
    Email,
    Phone,
    ItemDescription,
    Quantity,
    Instructions,
    TypedSignature,
    ChallengeAnswer,
    /// Hidden honeypot input; humans never see or fill it.
    Company,
}

impl Field {
    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::FullName => "Full Name",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::ItemDescription => "Item Description",
            Self::Quantity => "Quantity",
            Self::Instructions => "Special Instructions",
            Self::TypedSignature => "Typed Signature",
            Self::ChallengeAnswer => "Challenge Answer",
            Self::Company => "Company",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TextKind {
    Text,
    Email,
    Tel,
    Number,
    Multiline,
}

#[derive(Debug, Clone)]
pub(crate) struct TextField {
    pub(crate) value: String,
    pub(crate) kind: TextKind,
    pub(crate) required: bool,
    pub(crate) min: Option<i64>,
}

impl TextField {
    fn new(kind: TextKind, required: bool) -> Self {
        Self {
            value: String::new(),
            kind,
            required,
            min: None,
        }
    }

    fn number(required: bool, min: i64) -> Self {
        Self {
            min: Some(min),
            ..Self::new(TextKind::Number, required)
        }
    }

    /// Constraint validity of a single control, mirroring the subset of
    /// HTML validation the page relied on.
    pub(crate) fn is_valid(&self) -> bool {
        if self.value.is_empty() {
            return !self.required;
        }
        match self.kind {
            TextKind::Text | TextKind::Multiline => true,
            TextKind::Email => is_simple_email(&self.value),
            TextKind::Tel => is_us_phone(&self.value),
            TextKind::Number => match self.value.trim().parse::<i64>() {
                Ok(n) => self.min.is_none_or(|min| n >= min),
                Err(_) => false,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Checkbox {
    pub(crate) checked: bool,
    pub(crate) disabled: bool,
}

impl Checkbox {
    fn enabled() -> Self {
        Self {
            checked: false,
            disabled: false,
        }
    }

    fn locked() -> Self {
        Self {
            checked: false,
            disabled: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ScrollPanel {
    pub(crate) scroll_top: f64,
    pub(crate) client_height: f64,
    pub(crate) scroll_height: f64,
}

impl ScrollPanel {
    pub(crate) fn max_scroll_top(&self) -> f64 {
        (self.scroll_height - self.client_height).max(0.0)
    }

    pub(crate) fn at_bottom(&self) -> bool {
        self.scroll_top + self.client_height >= self.scroll_height - SCROLL_BOTTOM_SLACK
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ColorOption {
    pub(crate) value: String,
    pub(crate) checked: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct FileField {
    pub(crate) filename: Option<String>,
}

/// Typed view-model of the order page: one field per DOM handle the
/// original script looked up by id, populated once at initialization.
#[derive(Debug, Clone)]
pub(crate) struct Page {
    pub(crate) full_name: TextField,
    pub(crate) email: TextField,
    pub(crate) phone: TextField,
    pub(crate) item_description: TextField,
    pub(crate) quantity: TextField,
    pub(crate) instructions: TextField,
    pub(crate) colors: Vec<ColorOption>,
    pub(crate) color_summary: String,
    pub(crate) panel_open: bool,
    /// Mirror of the button's `aria-expanded` attribute.
    pub(crate) panel_expanded_attr: String,
    pub(crate) color_error: String,
    pub(crate) upload: FileField,
    pub(crate) terms_panel: ScrollPanel,
    pub(crate) agree_terms: Checkbox,
    pub(crate) terms_error: String,
    pub(crate) typed_signature: TextField,
    pub(crate) signature_data_url: String,
    pub(crate) agreement_timestamp: String,
    pub(crate) agreement_timestamp_iso: String,
    pub(crate) honeypot: TextField,
    pub(crate) human_check: Checkbox,
    pub(crate) challenge_prompt: String,
    pub(crate) challenge_answer: TextField,
    pub(crate) status: String,
    pub(crate) focused: Option<Field>,
}

impl Page {
    pub(crate) fn new(config: &FormConfig) -> Self {
        Self {
            full_name: TextField::new(TextKind::Text, true),
            email: TextField::new(TextKind::Email, true),
            phone: TextField::new(TextKind::Tel, false),
            item_description: TextField::new(TextKind::Multiline, true),
            quantity: TextField::number(true, 1),
            instructions: TextField::new(TextKind::Multiline, false),
            colors: config
                .colors
                .iter()
                .map(|value| ColorOption {
                    value: value.clone(),
                    checked: false,
                })
                .collect(),
            color_summary: color_select::PLACEHOLDER.to_string(),
            panel_open: false,
            panel_expanded_attr: "false".to_string(),
            color_error: String::new(),
            upload: FileField::default(),
            terms_panel: ScrollPanel {
                scroll_top: 0.0,
                client_height: TERMS_CLIENT_HEIGHT,
                scroll_height: TERMS_SCROLL_HEIGHT,
            },
            agree_terms: Checkbox::locked(),
            terms_error: String::new(),
            typed_signature: TextField::new(TextKind::Text, true),
            signature_data_url: String::new(),
            agreement_timestamp: String::new(),
            agreement_timestamp_iso: String::new(),
            honeypot: TextField::new(TextKind::Text, false),
            human_check: Checkbox::enabled(),
            challenge_prompt: String::new(),
            challenge_answer: TextField::new(TextKind::Number, false),
            status: String::new(),
            focused: None,
        }
    }

    pub(crate) fn field(&self, field: Field) -> &TextField {
        match field {
            Field::FullName => &self.full_name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::ItemDescription => &self.item_description,
            Field::Quantity => &self.quantity,
            Field::Instructions => &self.instructions,
            Field::TypedSignature => &self.typed_signature,
            Field::ChallengeAnswer => &self.challenge_answer,
            Field::Company => &self.honeypot,
        }
    }

    pub(crate) fn field_mut(&mut self, field: Field) -> &mut TextField {
        match field {
            Field::FullName => &mut self.full_name,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
            Field::ItemDescription => &mut self.item_description,
            Field::Quantity => &mut self.quantity,
            Field::Instructions => &mut self.instructions,
            Field::TypedSignature => &mut self.typed_signature,
            Field::ChallengeAnswer => &mut self.challenge_answer,
            Field::Company => &mut self.honeypot,
        }
    }

    pub(crate) fn selected_colors(&self) -> Vec<&str> {
        self.colors
            .iter()
            .filter(|option| option.checked)
            .map(|option| option.value.as_str())
            .collect()
    }

    /// Walk the required controls in page order and return the first
    /// one failing constraint validation, for focusing.
    pub(crate) fn first_invalid_field(&self, phone_enabled: bool) -> Option<Field> {
        let mut checks = vec![Field::FullName, Field::Email];
        if phone_enabled {
            checks.push(Field::Phone);
        }
        checks.extend([Field::ItemDescription, Field::Quantity, Field::TypedSignature]);
        checks
            .into_iter()
            .find(|field| !self.field(*field).is_valid())
    }

    /// Form-data entries in submission order, `Color` repeated per
    /// selection. Mirrors what `new FormData(form)` collected: every
    /// control is present, empty or not.
    pub(crate) fn form_entries(&self, config: &FormConfig) -> Vec<(String, String)> {
        let mut entries = Vec::new();
        let mut push_field = |field: Field, value: &str| {
            entries.push((field.label().to_string(), value.to_string()));
        };

        push_field(Field::FullName, &self.full_name.value);
        push_field(Field::Email, &self.email.value);
        if config.phone_field {
            push_field(Field::Phone, &self.phone.value);
        }
        push_field(Field::ItemDescription, &self.item_description.value);
        push_field(Field::Quantity, &self.quantity.value);
        push_field(Field::Instructions, &self.instructions.value);
        for color in self.selected_colors() {
            entries.push(("Color".to_string(), color.to_string()));
        }
        entries.push((
            "Uploaded File".to_string(),
            self.upload.filename.clone().unwrap_or_default(),
        ));
        entries.push((
            Field::TypedSignature.label().to_string(),
            self.typed_signature.value.clone(),
        ));
        if config.signature_pad {
            entries.push((
                "Signature Data URL".to_string(),
                self.signature_data_url.clone(),
            ));
        }
        entries.push((
            "Agreement Timestamp".to_string(),
            self.agreement_timestamp.clone(),
        ));
        entries.push((
            "Agreement Timestamp (ISO)".to_string(),
            self.agreement_timestamp_iso.clone(),
        ));
        if config.bot_filter {
            entries.push((Field::Company.label().to_string(), self.honeypot.value.clone()));
        }
        entries
    }
}

pub(crate) fn is_simple_email(value: &str) -> bool {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return false;
    }
    let Some((local, domain)) = trimmed.split_once('@') else {
        return false;
    };
    !local.is_empty() && !domain.is_empty() && !domain.contains('@')
}

fn phone_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(US_PHONE_PATTERN).ok())
        .as_ref()
}

/// Advisory, like the page: an unavailable pattern accepts everything.
pub(crate) fn is_us_phone(value: &str) -> bool {
    match phone_pattern() {
        Some(pattern) => pattern.is_match(value.trim()).unwrap_or(false),
        None => true,
    }
}

/// Blur-time phone formatting: ten digits (optionally 1-prefixed)
/// become `(NNN) NNN-NNNN`; anything else is left as typed.
pub(crate) fn format_us_phone(value: &str) -> String {
    let digits: String = value.chars().filter(char::is_ascii_digit).collect();
    let digits = match digits.len() {
        10 => digits.as_str(),
        11 if digits.starts_with('1') => &digits[1..],
        _ => return value.to_string(),
    };
    format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..])
}
