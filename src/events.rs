use crate::config::FormConfig;

/// Event targets, one per DOM handle the original listeners bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    DropdownButton,
    /// The document itself: outside clicks and key presses land here.
    Document,
    ColorOption(usize),
    FileInput,
    TermsPanel,
    SignatureCanvas,
    SignatureClearButton,
    PhoneInput,
    Form,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Click,
    Change,
    Blur,
    Scroll,
    PointerDown,
    PointerMove,
    PointerUp,
    PointerLeave,
    KeyDown,
    Submit,
}

/// A synthesized user event routed through the subscription table.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Event {
    pub(crate) target: Target,
    pub(crate) kind: EventKind,
    pub(crate) point: Option<(f64, f64)>,
    pub(crate) key: Option<String>,
}

impl Event {
    pub(crate) fn plain(target: Target, kind: EventKind) -> Self {
        Self {
            target,
            kind,
            point: None,
            key: None,
        }
    }

    pub(crate) fn pointer(target: Target, kind: EventKind, x: f64, y: f64) -> Self {
        Self {
            point: Some((x, y)),
            ..Self::plain(target, kind)
        }
    }

    pub(crate) fn key_down(target: Target, key: &str) -> Self {
        Self {
            key: Some(key.to_string()),
            ..Self::plain(target, EventKind::KeyDown)
        }
    }
}

/// Handler identities. The original registered closures; an explicit
/// enum keeps dispatch deterministic and inspectable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HandlerId {
    ToggleColorPanel,
    CloseColorPanelOnOutsideClick,
    CloseColorPanelOnEscape,
    EnforceColorCap,
    ValidateUpload,
    UnlockTermsOnScroll,
    BeginSignatureStroke,
    ExtendSignatureStroke,
    EndSignatureStroke,
    ClearSignature,
    FormatPhone,
    SubmitForm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TargetMatch {
    Exact(Target),
    AnyColorOption,
}

impl TargetMatch {
    fn matches(self, target: Target) -> bool {
        match self {
            Self::Exact(expected) => expected == target,
            Self::AnyColorOption => matches!(target, Target::ColorOption(_)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Subscription {
    pub(crate) target: TargetMatch,
    pub(crate) kind: EventKind,
    pub(crate) handler: HandlerId,
}

impl Subscription {
    fn new(target: TargetMatch, kind: EventKind, handler: HandlerId) -> Self {
        Self {
            target,
            kind,
            handler,
        }
    }

    pub(crate) fn matches(&self, event: &Event) -> bool {
        self.kind == event.kind && self.target.matches(event.target)
    }
}

/// Listener registrations for one form revision, in attach order.
pub(crate) fn subscription_table(config: &FormConfig) -> Vec<Subscription> {
    use EventKind::*;
    use HandlerId::*;
    use TargetMatch::{AnyColorOption, Exact};

    let mut table = vec![
        Subscription::new(Exact(Target::DropdownButton), Click, ToggleColorPanel),
        Subscription::new(Exact(Target::Document), Click, CloseColorPanelOnOutsideClick),
        Subscription::new(AnyColorOption, Change, EnforceColorCap),
        Subscription::new(Exact(Target::FileInput), Change, ValidateUpload),
        Subscription::new(Exact(Target::TermsPanel), Scroll, UnlockTermsOnScroll),
    ];
    if config.escape_closes_panel {
        table.push(Subscription::new(
            Exact(Target::Document),
            KeyDown,
            CloseColorPanelOnEscape,
        ));
    }
    if config.signature_pad {
        table.extend([
            Subscription::new(Exact(Target::SignatureCanvas), PointerDown, BeginSignatureStroke),
            Subscription::new(Exact(Target::SignatureCanvas), PointerMove, ExtendSignatureStroke),
            Subscription::new(Exact(Target::SignatureCanvas), PointerUp, EndSignatureStroke),
            Subscription::new(Exact(Target::SignatureCanvas), PointerLeave, EndSignatureStroke),
            Subscription::new(Exact(Target::SignatureClearButton), Click, ClearSignature),
        ]);
    }
    if config.phone_field {
        table.push(Subscription::new(Exact(Target::PhoneInput), Blur, FormatPhone));
    }
    table.push(Subscription::new(Exact(Target::Form), Submit, SubmitForm));
    table
}
