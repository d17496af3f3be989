use super::rules::{ErrorKey, Rule};
use super::value::ControlValue;
use std::collections::BTreeSet;

pub type ErrorSet = BTreeSet<ErrorKey>;

/// A single form field with its rules and current errors.
#[derive(Debug, Clone, Default)]
pub struct FormControl<V: ControlValue> {
    value: V,
    rules: Vec<Rule>,
    errors: ErrorSet,
}

impl<V: ControlValue> FormControl<V> {
    /// A control validated against `rules` from the start.
    #[must_use]
    pub fn new(value: V, rules: Vec<Rule>) -> Self {
        let mut control = Self { value, rules, errors: ErrorSet::new() };
        control.update_validity();
        control
    }

    pub const fn value(&self) -> &V {
        &self.value
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Replaces the value and revalidates.
    pub fn set_value(&mut self, value: V) {
        self.value = value;
        self.update_validity();
    }

    /// Restores the default value and revalidates.
    pub fn reset(&mut self) {
        self.set_value(V::default());
    }

    /// Replaces the rules. Errors stay stale until [`Self::update_validity`].
    pub fn set_rules(&mut self, rules: impl IntoIterator<Item = Rule>) {
        self.rules = rules.into_iter().collect();
    }

    pub fn clear_rules(&mut self) {
        self.rules.clear();
    }

    pub fn update_validity(&mut self) {
        self.errors = self.rules.iter().filter_map(|rule| rule.check(&self.value)).collect();
    }

    pub const fn errors(&self) -> &ErrorSet {
        &self.errors
    }

    #[must_use]
    pub fn has_error(&self, key: ErrorKey) -> bool {
        self.errors.contains(&key)
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_are_the_union_of_failed_rules() {
        let mut password = FormControl::new(
            String::new(),
            [Rule::Required, Rule::MinLength(8)].into_iter().chain(Rule::password_criteria()).collect(),
        );
        assert_eq!(password.errors().iter().copied().collect::<Vec<_>>(), vec![ErrorKey::Required]);

        password.set_value("abc".to_owned());
        assert_eq!(
            password.errors().iter().copied().collect::<Vec<_>>(),
            vec![ErrorKey::Minlength, ErrorKey::UpperCase, ErrorKey::Digit, ErrorKey::SpecialChar]
        );

        password.set_value("Abcdef1!".to_owned());
        assert!(password.is_valid());
    }

    #[test]
    fn test_rules_swap_needs_revalidation() {
        let mut email = FormControl::new(String::new(), vec![Rule::Required]);
        assert!(email.has_error(ErrorKey::Required));

        email.clear_rules();
        assert!(!email.is_valid());
        email.update_validity();
        assert!(email.is_valid());
    }
}
