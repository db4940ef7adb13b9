//! Deterministic runtime model of the client-side order form used by a
//! custom fabrication ("3D print") request site.
//!
//! The original page wired DOM event handlers to a capped multi-select
//! color dropdown, file-extension validation, a scroll-gated terms
//! checkbox, an optional signature pad, a bot filter, and one of three
//! submission strategies (endpoint POST, `mailto:` handoff, client-side
//! PDF). This crate models that behavior headlessly: a typed view-model
//! replaces DOM lookups, an explicit subscription table replaces ambient
//! closures, and every external effect (network, navigation, downloads,
//! alerts, clock, randomness) is a deterministic harness seam that tests
//! drive and observe directly.
//!
//! ```
//! use order_form::{FormConfig, OrderForm};
//!
//! let mut form = OrderForm::new(FormConfig::mailto());
//! form.scroll_terms_to_bottom();
//! form.set_agreement(true);
//! ```

use std::error::Error as StdError;
use std::fmt;

mod bot_check;
mod color_select;
mod config;
mod datetime;
mod encode;
mod events;
mod file_check;
mod form;
mod mailto;
mod page;
mod pdf;
mod post;
mod signature;
mod submit;
mod terms;


pub use config::{FormConfig, SubmitStrategy};
pub use events::{EventKind, Target};
pub use form::{DownloadArtifact, Navigation, NavigationKind, OrderForm};
pub use page::Field;
pub use post::{PostOutcome, PostRequest};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    Runtime(String),
    AssertionFailed {
        subject: String,
        expected: String,
        actual: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Runtime(msg) => write!(f, "runtime error: {msg}"),
            Self::AssertionFailed {
                subject,
                expected,
                actual,
            } => write!(
                f,
                "assertion failed for {subject}: expected {expected}, actual {actual}"
            ),
        }
    }
}

impl StdError for Error {}
