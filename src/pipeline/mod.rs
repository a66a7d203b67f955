//! Phase driver
//!
//! The three phases never depend on each other's output, but callers run
//! them in order and stop at the first failure:
//!
//! ```text
//! lex ──pass──▶ parse ──pass──▶ check
//! ```
//!
//! [`Analysis`] holds that discipline.  It can run every phase in one go
//! ([`analyze`]) or one phase at a time, refusing a phase whose predecessor
//! has not passed (used by the terminal UI's phase keys).
//!
//! The [`fixture`] submodule runs `.decl` files against expected outcomes.

pub mod fixture;

use crate::checker::findings::SemanticFinding;
use crate::checker::semantic::check;
use crate::parser::ast::AstNode;
use crate::parser::lexer::{lex, LexicalError, Token};
use crate::parser::parser::parse;
use std::fmt;
use thiserror::Error;

/// One of the three analysis phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Lexical,
    Syntax,
    Semantic,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::Lexical, Phase::Syntax, Phase::Semantic];

    /// The phase that must pass before this one may run.
    pub fn requires(self) -> Option<Phase> {
        match self {
            Phase::Lexical => None,
            Phase::Syntax => Some(Phase::Lexical),
            Phase::Semantic => Some(Phase::Syntax),
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Lexical => "lexical",
            Phase::Syntax => "syntax",
            Phase::Semantic => "semantic",
        };
        f.write_str(name)
    }
}

/// Result of one phase
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PhaseOutcome {
    Pass,
    Error(String),
    #[default]
    Skipped,
}

impl PhaseOutcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, PhaseOutcome::Pass)
    }

    pub fn label(&self) -> &'static str {
        match self {
            PhaseOutcome::Pass => "PASS",
            PhaseOutcome::Error(_) => "ERROR",
            PhaseOutcome::Skipped => "SKIP",
        }
    }
}

impl fmt::Display for PhaseOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhaseOutcome::Error(message) => write!(f, "ERROR ({})", message),
            other => f.write_str(other.label()),
        }
    }
}

/// Returned when a phase is requested before its predecessor passed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("the {phase} phase needs a passing {required} phase first")]
pub struct PhaseBlocked {
    pub phase: Phase,
    pub required: Phase,
}

/// Outcomes and artifacts of the phases run so far on one source text
#[derive(Debug, Clone, Default)]
pub struct Analysis {
    pub tokens: Option<Vec<Token>>,
    pub lex_error: Option<LexicalError>,
    pub ast: Option<AstNode>,
    pub findings: Option<Vec<SemanticFinding>>,
    lexical: PhaseOutcome,
    syntax: PhaseOutcome,
    semantic: PhaseOutcome,
}

/// Run all phases on `source`, stopping after the first failing one.
pub fn analyze(source: &str) -> Analysis {
    let mut analysis = Analysis::new();
    for phase in Phase::ALL {
        if analysis.run(phase, source).is_err() {
            break;
        }
    }
    analysis
}

impl Analysis {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn outcome(&self, phase: Phase) -> &PhaseOutcome {
        match phase {
            Phase::Lexical => &self.lexical,
            Phase::Syntax => &self.syntax,
            Phase::Semantic => &self.semantic,
        }
    }

    /// Whether every phase ran and passed.
    pub fn is_clean(&self) -> bool {
        Phase::ALL.iter().all(|phase| self.outcome(*phase).is_pass())
    }

    pub fn can_run(&self, phase: Phase) -> bool {
        phase
            .requires()
            .map_or(true, |required| self.outcome(required).is_pass())
    }

    /// Run one phase. Re-running a phase discards the results of the phases
    /// after it.
    pub fn run(&mut self, phase: Phase, source: &str) -> Result<&PhaseOutcome, PhaseBlocked> {
        if let Some(required) = phase.requires() {
            if !self.outcome(required).is_pass() {
                return Err(PhaseBlocked { phase, required });
            }
        }

        self.reset_from(phase);
        log::debug!("running {} phase", phase);

        match phase {
            Phase::Lexical => match lex(source) {
                Ok(tokens) => {
                    self.tokens = Some(tokens);
                    self.lexical = PhaseOutcome::Pass;
                }
                Err(e) => {
                    self.lexical = PhaseOutcome::Error(e.to_string());
                    self.lex_error = Some(e);
                }
            },
            Phase::Syntax => match parse(source) {
                Ok(ast) => {
                    self.ast = Some(ast);
                    self.syntax = PhaseOutcome::Pass;
                }
                Err(e) => self.syntax = PhaseOutcome::Error(e.to_string()),
            },
            Phase::Semantic => {
                let findings = self.ast.as_ref().map(check).unwrap_or_default();
                self.semantic = match findings.iter().find(|f| f.is_error()) {
                    Some(first) => PhaseOutcome::Error(first.message.clone()),
                    None => PhaseOutcome::Pass,
                };
                self.findings = Some(findings);
            }
        }

        let outcome = self.outcome(phase);
        log::debug!("{} phase: {}", phase, outcome);
        Ok(outcome)
    }

    fn reset_from(&mut self, phase: Phase) {
        if phase == Phase::Lexical {
            self.tokens = None;
            self.lex_error = None;
            self.lexical = PhaseOutcome::Skipped;
        }
        if phase != Phase::Semantic {
            self.ast = None;
            self.syntax = PhaseOutcome::Skipped;
        }
        self.findings = None;
        self.semantic = PhaseOutcome::Skipped;
    }
}
