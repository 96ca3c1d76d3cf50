//! Invariant rules and verdicts.
//!
//! An evaluator is a list of named rules over a context of snapshots. The
//! rules are checked in order and the first one that does not hold names the
//! denial.

/// A named, pure predicate over an evaluation context.
pub struct Rule<C> {
    name: &'static str,
    holds: fn(&C) -> bool,
}

impl<C> Rule<C> {
    /// Creates a rule.
    #[must_use]
    pub const fn new(name: &'static str, holds: fn(&C) -> bool) -> Self {
        Self { name, holds }
    }

    /// Returns the rule name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns `true` if the rule holds for `context`.
    #[must_use]
    pub fn holds(&self, context: &C) -> bool {
        (self.holds)(context)
    }
}

impl<C> std::fmt::Debug for Rule<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

/// Outcome of evaluating an invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Every rule held.
    Allowed,
    /// A rule did not hold.
    Denied {
        /// Name of the first rule that did not hold.
        rule: &'static str,
    },
}

impl Verdict {
    /// Returns `true` for `Allowed`.
    #[must_use]
    pub fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Returns the denying rule, if any.
    #[must_use]
    pub fn denied_rule(self) -> Option<&'static str> {
        match self {
            Self::Allowed => None,
            Self::Denied { rule } => Some(rule),
        }
    }

    /// Keeps `Allowed`; otherwise evaluates the alternative.
    #[must_use]
    pub fn or_else(self, alternative: impl FnOnce() -> Verdict) -> Verdict {
        match self {
            Self::Allowed => Self::Allowed,
            Self::Denied { .. } => alternative(),
        }
    }
}

/// Checks `rules` against `context` in order.
#[must_use]
pub fn evaluate<C>(rules: &[Rule<C>], context: &C) -> Verdict {
    rules
        .iter()
        .find(|rule| !rule.holds(context))
        .map_or(Verdict::Allowed, |rule| Verdict::Denied { rule: rule.name })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Door {
        locked: bool,
        has_key: bool,
    }

    fn door_rules() -> [Rule<Door>; 2] {
        [
            Rule::new("door_unlocked", |door| !door.locked),
            Rule::new("holds_key", |door| door.has_key),
        ]
    }

    #[test]
    fn test_evaluate_allows_when_every_rule_holds() {
        let door = Door {
            locked: false,
            has_key: true,
        };

        assert_eq!(evaluate(&door_rules(), &door), Verdict::Allowed);
    }

    #[test]
    fn test_evaluate_names_first_failing_rule() {
        let door = Door {
            locked: true,
            has_key: false,
        };

        assert_eq!(
            evaluate(&door_rules(), &door),
            Verdict::Denied {
                rule: "door_unlocked"
            }
        );
    }

    #[test]
    fn test_evaluate_with_no_rules_allows() {
        let door = Door {
            locked: true,
            has_key: false,
        };

        assert!(evaluate::<Door>(&[], &door).is_allowed());
    }

    #[test]
    fn test_or_else_only_runs_alternative_after_denial() {
        let allowed = Verdict::Allowed.or_else(|| panic!("alternative must not run"));
        let denied = Verdict::Denied { rule: "first" }.or_else(|| Verdict::Denied { rule: "second" });

        assert!(allowed.is_allowed());
        assert_eq!(denied.denied_rule(), Some("second"));
    }
}
