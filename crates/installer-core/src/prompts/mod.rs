//! Terminal prompts with a line-based fallback
//!
//! Prompts render either as rich cliclack widgets or, when stdin is not a
//! terminal, the host lacks support, or fallback is forced, as plain
//! question/answer lines. Both paths share the same required and validator
//! semantics through [`prompt_until_valid`].
//!
//! The render mode is decided once when a [`Prompter`] is created and never
//! changes for that prompter.
//!
//! ```ignore
//! use installer_core::prompts::{Prompter, TextPrompt};
//!
//! let mut prompter = Prompter::detect(false);
//! let name = prompter.ask(
//!     &TextPrompt::new("What is the name of your project?")
//!         .required("The project name is required."),
//! )?;
//! ```

mod fallback;
mod io;
mod kinds;
mod mode;
mod retry;
mod rich;
mod validate;

pub use self::io::{LineIo, TerminalIo};
use self::io::EofGuard;
#[cfg(test)]
pub(crate) use self::io::scripted::ScriptedIo;
pub use fallback::{parse_confirm, resolve_choice, NONE_OPTION};
pub use kinds::{
    ConfirmPrompt, MultiSelectPrompt, Options, PasswordPrompt, Prompt, PromptKind, SelectPrompt,
    SuggestPrompt, Suggestions, TextPrompt,
};
pub use mode::{decide_render_mode, RenderMode};
pub use retry::prompt_until_valid;
pub use validate::{
    check, validator, Required, Rules, ValidationOutcome, Validator, DEFAULT_REQUIRED_MESSAGE,
};

use std::io::IsTerminal;

/// Run-wide prompt context: the render mode and the line I/O used by the fallback path
pub struct Prompter<I: LineIo = TerminalIo> {
    mode: RenderMode,
    io: I,
}

impl Prompter<TerminalIo> {
    /// Inspect stdin and the host OS once and fix the render mode for this run
    pub fn detect(force_fallback: bool) -> Self {
        let interactive = std::io::stdin().is_terminal();
        let mode = decide_render_mode(interactive, std::env::consts::OS, force_fallback);
        tracing::debug!(%mode, interactive, force_fallback, "prompt render mode decided");
        Self::with_mode(mode, TerminalIo::new())
    }
}

impl<I: LineIo> Prompter<I> {
    pub fn with_mode(mode: RenderMode, io: I) -> Self {
        Self { mode, io }
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    pub fn io(&self) -> &I {
        &self.io
    }

    /// Ask one question and return the accepted answer
    pub fn ask<P: Prompt>(&mut self, prompt: &P) -> std::io::Result<P::Answer> {
        tracing::trace!(kind = ?prompt.kind(), label = prompt.label(), mode = %self.mode, "prompt");

        let rules = Rules {
            required: prompt.required(),
            validate: prompt.validator(),
            is_empty: P::is_empty_answer,
        };

        match self.mode {
            RenderMode::Fallback => {
                let mut io = EofGuard::new(&mut self.io);
                prompt_until_valid(
                    &mut io,
                    |io: &mut EofGuard<'_, I>| prompt.render_fallback(io),
                    &rules,
                    |io: &mut EofGuard<'_, I>, message: &str| io.reject(message),
                )
            }
            RenderMode::Rich => prompt_until_valid(
                &mut (),
                |_: &mut ()| prompt.render_rich(),
                &rules,
                |_: &mut (), message: &str| cliclack::log::error(message),
            ),
        }
    }
}
