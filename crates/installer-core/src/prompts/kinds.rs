//! The closed set of prompt kinds
//!
//! Each kind is a small builder struct. [`Prompt`] is sealed and implemented
//! exactly once per kind, pairing the kind with its answer type, its empty
//! answer predicate, and its fallback and rich renderers.

use super::fallback;
use super::io::LineIo;
use super::rich;
use super::validate::{Required, ValidationOutcome, Validator};
use std::fmt;
use std::io;
use std::sync::Arc;

/// Ordered `value -> display label` pairs
pub type Options = Vec<(String, String)>;

/// Dynamic suggestion source, called with the text typed so far
pub type SuggestionFn = Arc<dyn Fn(&str) -> Vec<String> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Text,
    Password,
    Confirm,
    Select,
    MultiSelect,
    Suggest,
}

mod sealed {
    pub trait Sealed {}
}

/// One kind of interaction request
pub trait Prompt: sealed::Sealed {
    type Answer;

    fn kind(&self) -> PromptKind;

    fn label(&self) -> &str;

    /// Help text shown with the question
    fn hint_text(&self) -> Option<&str>;

    /// The kind's "empty" sentinel, which a required prompt rejects
    fn is_empty_answer(answer: &Self::Answer) -> bool;

    fn required(&self) -> &Required;

    fn validator(&self) -> Option<&Validator<Self::Answer>>;

    /// Line-based rendering, one question and one answer
    fn render_fallback(&self, io: &mut dyn LineIo) -> io::Result<ValidationOutcome<Self::Answer>>;

    /// Interactive terminal rendering
    fn render_rich(&self) -> io::Result<ValidationOutcome<Self::Answer>>;
}

macro_rules! common_builders {
    ($answer:ty) => {
        pub fn hint(mut self, hint: impl Into<String>) -> Self {
            self.hint = Some(hint.into());
            self
        }

        pub fn validate<F>(mut self, f: F) -> Self
        where
            F: Fn(&$answer) -> Option<String> + Send + Sync + 'static,
        {
            self.validate = Some(Arc::new(f));
            self
        }
    };
}

/// Free text input
#[derive(Clone)]
pub struct TextPrompt {
    pub label: String,
    pub placeholder: Option<String>,
    pub default: Option<String>,
    pub hint: Option<String>,
    pub required: Required,
    pub validate: Option<Validator<String>>,
}

impl TextPrompt {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            placeholder: None,
            default: None,
            hint: None,
            required: Required::No,
            validate: None,
        }
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn required(mut self, required: impl Into<Required>) -> Self {
        self.required = required.into();
        self
    }

    common_builders!(String);
}

/// Masked text input. Defaults are never echoed, so there are none.
#[derive(Clone)]
pub struct PasswordPrompt {
    pub label: String,
    pub hint: Option<String>,
    pub required: Required,
    pub validate: Option<Validator<String>>,
}

impl PasswordPrompt {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            hint: None,
            required: Required::No,
            validate: None,
        }
    }

    pub fn required(mut self, required: impl Into<Required>) -> Self {
        self.required = required.into();
        self
    }

    common_builders!(String);
}

/// Yes/no question
#[derive(Clone)]
pub struct ConfirmPrompt {
    pub label: String,
    pub default: bool,
    pub hint: Option<String>,
    pub required: Required,
    pub validate: Option<Validator<bool>>,
}

impl ConfirmPrompt {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            default: true,
            hint: None,
            required: Required::No,
            validate: None,
        }
    }

    pub fn default(mut self, default: bool) -> Self {
        self.default = default;
        self
    }

    pub fn required(mut self, required: impl Into<Required>) -> Self {
        self.required = required.into();
        self
    }

    common_builders!(bool);
}

/// Single choice from an ordered option list. Always answerable, never "required".
#[derive(Clone)]
pub struct SelectPrompt {
    pub label: String,
    pub options: Options,
    pub default: Option<String>,
    pub hint: Option<String>,
    pub validate: Option<Validator<String>>,
    required: Required,
}

impl SelectPrompt {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            options: Vec::new(),
            default: None,
            hint: None,
            validate: None,
            required: Required::No,
        }
    }

    pub fn option(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
        self.options.push((value.into(), label.into()));
        self
    }

    pub fn options<I, V, L>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = (V, L)>,
        V: Into<String>,
        L: Into<String>,
    {
        self.options
            .extend(options.into_iter().map(|(v, l)| (v.into(), l.into())));
        self
    }

    pub fn default(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    common_builders!(String);
}

/// Any number of choices from an ordered option list
#[derive(Clone)]
pub struct MultiSelectPrompt {
    pub label: String,
    pub options: Options,
    pub default: Vec<String>,
    pub hint: Option<String>,
    pub required: Required,
    pub validate: Option<Validator<Vec<String>>>,
}

impl MultiSelectPrompt {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            options: Vec::new(),
            default: Vec::new(),
            hint: None,
            required: Required::No,
            validate: None,
        }
    }

    pub fn option(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
        self.options.push((value.into(), label.into()));
        self
    }

    pub fn options<I, V, L>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = (V, L)>,
        V: Into<String>,
        L: Into<String>,
    {
        self.options
            .extend(options.into_iter().map(|(v, l)| (v.into(), l.into())));
        self
    }

    pub fn default<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.default = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn required(mut self, required: impl Into<Required>) -> Self {
        self.required = required.into();
        self
    }

    common_builders!(Vec<String>);
}

/// Where a suggest prompt gets its completion candidates
#[derive(Clone)]
pub enum Suggestions {
    Static(Vec<String>),
    Dynamic(SuggestionFn),
}

impl Suggestions {
    /// Candidates for the text typed so far
    pub fn candidates(&self, typed: &str) -> Vec<String> {
        match self {
            Suggestions::Static(values) => values.clone(),
            Suggestions::Dynamic(source) => source(typed),
        }
    }
}

impl fmt::Debug for Suggestions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Suggestions::Static(values) => f.debug_tuple("Static").field(values).finish(),
            Suggestions::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

/// Free text with completion candidates
#[derive(Clone)]
pub struct SuggestPrompt {
    pub label: String,
    pub suggestions: Suggestions,
    pub placeholder: Option<String>,
    pub default: Option<String>,
    pub hint: Option<String>,
    pub required: Required,
    pub validate: Option<Validator<String>>,
}

impl SuggestPrompt {
    pub fn new<I, S>(label: impl Into<String>, suggestions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_suggestions(
            label,
            Suggestions::Static(suggestions.into_iter().map(Into::into).collect()),
        )
    }

    pub fn dynamic<F>(label: impl Into<String>, source: F) -> Self
    where
        F: Fn(&str) -> Vec<String> + Send + Sync + 'static,
    {
        Self::with_suggestions(label, Suggestions::Dynamic(Arc::new(source)))
    }

    fn with_suggestions(label: impl Into<String>, suggestions: Suggestions) -> Self {
        Self {
            label: label.into(),
            suggestions,
            placeholder: None,
            default: None,
            hint: None,
            required: Required::No,
            validate: None,
        }
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn required(mut self, required: impl Into<Required>) -> Self {
        self.required = required.into();
        self
    }

    common_builders!(String);
}

macro_rules! impl_prompt {
    ($prompt:ty, $kind:ident, $answer:ty, $is_empty:expr, $fallback:path, $rich:path) => {
        impl sealed::Sealed for $prompt {}

        impl Prompt for $prompt {
            type Answer = $answer;

            fn kind(&self) -> PromptKind {
                PromptKind::$kind
            }

            fn label(&self) -> &str {
                &self.label
            }

            fn hint_text(&self) -> Option<&str> {
                self.hint.as_deref()
            }

            fn is_empty_answer(answer: &$answer) -> bool {
                let is_empty: fn(&$answer) -> bool = $is_empty;
                is_empty(answer)
            }

            fn required(&self) -> &Required {
                &self.required
            }

            fn validator(&self) -> Option<&Validator<$answer>> {
                self.validate.as_ref()
            }

            fn render_fallback(
                &self,
                io: &mut dyn LineIo,
            ) -> io::Result<ValidationOutcome<$answer>> {
                $fallback(self, io)
            }

            fn render_rich(&self) -> io::Result<ValidationOutcome<$answer>> {
                rich::remark(Prompt::hint_text(self))?;
                $rich(self)
            }
        }
    };
}

impl_prompt!(TextPrompt, Text, String, |a| a.is_empty(), fallback::text, rich::text);
impl_prompt!(
    PasswordPrompt,
    Password,
    String,
    |a| a.is_empty(),
    fallback::password,
    rich::password
);
impl_prompt!(ConfirmPrompt, Confirm, bool, |a| !*a, fallback::confirm, rich::confirm);
impl_prompt!(
    SelectPrompt,
    Select,
    String,
    |a| a.is_empty(),
    fallback::select,
    rich::select
);
impl_prompt!(
    MultiSelectPrompt,
    MultiSelect,
    Vec<String>,
    |a| a.is_empty(),
    fallback::multi_select,
    rich::multi_select
);
impl_prompt!(
    SuggestPrompt,
    Suggest,
    String,
    |a| a.is_empty(),
    fallback::suggest,
    rich::suggest
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_answer_sentinels() {
        assert!(TextPrompt::is_empty_answer(&String::new()));
        assert!(!TextPrompt::is_empty_answer(&"x".to_string()));
        assert!(ConfirmPrompt::is_empty_answer(&false));
        assert!(!ConfirmPrompt::is_empty_answer(&true));
        assert!(MultiSelectPrompt::is_empty_answer(&Vec::new()));
        assert!(!MultiSelectPrompt::is_empty_answer(&vec!["a".to_string()]));
    }

    #[test]
    fn test_every_kind_exposes_its_hint() {
        let hint = Some("Use the arrow keys");

        assert_eq!(TextPrompt::new("a").hint("Use the arrow keys").hint_text(), hint);
        assert_eq!(PasswordPrompt::new("a").hint("Use the arrow keys").hint_text(), hint);
        assert_eq!(ConfirmPrompt::new("a").hint("Use the arrow keys").hint_text(), hint);
        assert_eq!(
            SelectPrompt::new("a").option("x", "X").hint("Use the arrow keys").hint_text(),
            hint
        );
        assert_eq!(
            MultiSelectPrompt::new("a").option("x", "X").hint("Use the arrow keys").hint_text(),
            hint
        );
        assert_eq!(
            SuggestPrompt::new("a", ["x"]).hint("Use the arrow keys").hint_text(),
            hint
        );
        assert_eq!(SelectPrompt::new("a").hint_text(), None);
    }

    #[test]
    fn test_select_is_never_required() {
        let prompt = SelectPrompt::new("Pick").option("a", "A");
        assert!(!prompt.required().is_required());
        assert_eq!(prompt.kind(), PromptKind::Select);
    }

    #[test]
    fn test_builders_keep_option_order() {
        let prompt = MultiSelectPrompt::new("Pick")
            .options([("c", "C"), ("a", "A")])
            .option("b", "B")
            .default(["b"]);

        let values: Vec<&str> = prompt.options.iter().map(|(v, _)| v.as_str()).collect();
        assert_eq!(values, vec!["c", "a", "b"]);
        assert_eq!(prompt.default, vec!["b".to_string()]);
    }

    #[test]
    fn test_dynamic_suggestions_receive_typed_text() {
        let prompt = SuggestPrompt::dynamic("Branch", |typed| {
            vec![format!("{}-main", typed), format!("{}-dev", typed)]
        });
        assert_eq!(
            prompt.suggestions.candidates("feat"),
            vec!["feat-main".to_string(), "feat-dev".to_string()]
        );
    }
}
