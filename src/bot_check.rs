use crate::page::Page;

pub(crate) const TOO_FAST_STATUS: &str =
    "Form submitted too quickly. Please review your order and try again.";
pub(crate) const CONFIRM_STATUS: &str = "Please confirm you are not a robot.";
pub(crate) const WRONG_ANSWER_STATUS: &str = "Incorrect answer, please try the new question.";

/// First verdict in submission order wins; `Pass` means every check
/// cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BotVerdict {
    Pass,
    /// Non-empty honeypot: reject without any visible reaction.
    Honeypot,
    TooFast,
    NotConfirmed,
    WrongAnswer,
}

/// Honeypot, dwell-time, confirm-box, and addition-challenge filter.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BotCheck {
    lhs: i64,
    rhs: i64,
}

impl BotCheck {
    pub(crate) fn new(lhs: i64, rhs: i64) -> Self {
        Self { lhs, rhs }
    }

    pub(crate) fn expected_sum(&self) -> i64 {
        self.lhs + self.rhs
    }

    /// Install freshly drawn single-digit addends and update the
    /// visible prompt.
    pub(crate) fn set_challenge(&mut self, page: &mut Page, lhs: i64, rhs: i64) {
        self.lhs = lhs;
        self.rhs = rhs;
        page.challenge_prompt = format!("What is {lhs} + {rhs}?");
    }

    pub(crate) fn verdict(&self, page: &Page, elapsed_ms: i64, min_dwell_ms: i64) -> BotVerdict {
        if !page.honeypot.value.is_empty() {
            return BotVerdict::Honeypot;
        }
        if elapsed_ms < min_dwell_ms {
            return BotVerdict::TooFast;
        }
        if !page.human_check.checked {
            return BotVerdict::NotConfirmed;
        }
        let answered = page
            .challenge_answer
            .value
            .trim()
            .parse::<i64>()
            .is_ok_and(|answer| answer == self.expected_sum());
        if !answered {
            return BotVerdict::WrongAnswer;
        }
        BotVerdict::Pass
    }
}
