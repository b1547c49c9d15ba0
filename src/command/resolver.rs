//! Roll resolution - classifies query tokens and makes one uniform draw

use crate::command::token::{tokenize, Token};
use crate::command::usage::{check_span, RollError};
use crate::core::config::{RollType, Settings};
use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;

/// Outcome of resolving one query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Roll {
    /// Yes/no answer using the configured labels
    Answer { label: String, affirmative: bool },
    /// Integer drawn from the inclusive range `start..=end`
    Number { value: i64, start: i64, end: i64 },
    /// One label picked out of `choices` candidates
    Pick { label: String, choices: usize },
    /// No roll was made; show usage with this message
    Usage(RollError),
}

impl Roll {
    pub fn is_usage(&self) -> bool {
        matches!(self, Roll::Usage(_))
    }

    pub fn error(&self) -> Option<&RollError> {
        match self {
            Roll::Usage(err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for Roll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Roll::Answer { label, .. } | Roll::Pick { label, .. } => f.write_str(label),
            Roll::Number { value, .. } => write!(f, "{}", value),
            Roll::Usage(err) => write!(f, "{}", err),
        }
    }
}

/// What the tokens ask for, before any randomness
#[derive(Debug, PartialEq, Eq)]
enum Request<'t> {
    Default,
    Range { start: i64, end: i64 },
    Labels(Vec<&'t str>),
}

fn classify<S: AsRef<str>>(tokens: &[S]) -> Result<Request<'_>, RollError> {
    if tokens.is_empty() {
        return Ok(Request::Default);
    }

    let classified: Vec<Token<'_>> = tokens.iter().map(|t| Token::classify(t.as_ref())).collect();

    if !classified.iter().all(Token::is_numeric) {
        return Ok(Request::Labels(tokens.iter().map(|t| t.as_ref()).collect()));
    }

    match classified.as_slice() {
        [Token::Integer(n)] if *n < 1 => Err(RollError::NonPositiveBound(*n)),
        [Token::Integer(n)] => Ok(Request::Range { start: 1, end: *n }),
        [Token::Integer(a), Token::Integer(b)] => Ok(Request::Range {
            start: *a.min(b),
            end: *a.max(b),
        }),
        [_] | [_, _] => Err(RollError::InvalidRange),
        _ => Err(RollError::TooManyArguments),
    }
}

/// Resolves queries against one set of settings
pub struct RollResolver<'a> {
    settings: &'a Settings,
}

impl<'a> RollResolver<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    /// Resolve already-split tokens to a roll
    pub fn resolve<S, R>(&self, tokens: &[S], rng: &mut R) -> Roll
    where
        S: AsRef<str>,
        R: Rng + ?Sized,
    {
        let outcome = classify(tokens).and_then(|request| {
            tracing::debug!(?request, "classified roll query");
            self.draw(request, rng)
        });

        outcome.unwrap_or_else(|err| {
            tracing::debug!(%err, "roll query rejected");
            Roll::Usage(err)
        })
    }

    /// Split a raw query on whitespace and resolve it
    pub fn resolve_query<R: Rng + ?Sized>(&self, query: &str, rng: &mut R) -> Roll {
        self.resolve(&tokenize(query), rng)
    }

    fn draw<R: Rng + ?Sized>(&self, request: Request<'_>, rng: &mut R) -> Result<Roll, RollError> {
        match request {
            Request::Default => self.draw_default(rng),
            Request::Range { start, end } => roll_range(start, end, rng),
            Request::Labels(labels) => pick(&labels, rng),
        }
    }

    fn draw_default<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Roll, RollError> {
        let settings = self.settings;
        match settings.roll_type {
            RollType::YesNo => {
                let affirmative = rng.gen_bool(0.5);
                let label = if affirmative {
                    &settings.yes_label
                } else {
                    &settings.no_label
                };
                Ok(Roll::Answer {
                    label: label.clone(),
                    affirmative,
                })
            }
            RollType::Number => {
                let (from, to) = (settings.default_from, settings.default_to);
                roll_range(from.min(to), from.max(to), rng)
            }
            RollType::CustomLabel => {
                if settings.custom_labels.is_empty() {
                    return Err(RollError::CustomLabelsNotConfigured);
                }
                pick(&settings.custom_labels, rng)
            }
        }
    }
}

fn roll_range<R: Rng + ?Sized>(start: i64, end: i64, rng: &mut R) -> Result<Roll, RollError> {
    check_span(start, end)?;
    let value = rng.gen_range(start..=end);
    Ok(Roll::Number { value, start, end })
}

fn pick<S: AsRef<str>, R: Rng + ?Sized>(labels: &[S], rng: &mut R) -> Result<Roll, RollError> {
    let label = labels
        .choose(rng)
        .ok_or(RollError::CustomLabelsNotConfigured)?;
    Ok(Roll::Pick {
        label: label.as_ref().to_string(),
        choices: labels.len(),
    })
}

/// Resolve tokens to the display string shown by the host
pub fn resolve<S, R>(tokens: &[S], settings: &Settings, rng: &mut R) -> String
where
    S: AsRef<str>,
    R: Rng + ?Sized,
{
    RollResolver::new(settings).resolve(tokens, rng).to_string()
}
