//! Render, validate, and re-prompt until an answer is accepted

use super::validate::{check, Rules, ValidationOutcome};
use std::io;

/// Drive a prompt until it produces an accepted answer.
///
/// `render` produces a candidate, or a rejection of its own (for example an
/// unknown select key). Every rejection is passed to `report` and the prompt
/// is rendered again. There is no retry limit: the loop ends on an accepted
/// answer or when `render` fails with an I/O error.
pub fn prompt_until_valid<C, T, R, E>(
    ctx: &mut C,
    mut render: R,
    rules: &Rules<'_, T>,
    mut report: E,
) -> io::Result<T>
where
    C: ?Sized,
    R: FnMut(&mut C) -> io::Result<ValidationOutcome<T>>,
    E: FnMut(&mut C, &str) -> io::Result<()>,
{
    loop {
        let candidate = match render(ctx)? {
            ValidationOutcome::Accepted(candidate) => candidate,
            ValidationOutcome::Rejected(message) => {
                report(ctx, &message)?;
                continue;
            }
        };

        match check(candidate, rules) {
            ValidationOutcome::Accepted(answer) => return Ok(answer),
            ValidationOutcome::Rejected(message) => {
                tracing::debug!(%message, "answer rejected");
                report(ctx, &message)?;
            }
        }
    }
}
