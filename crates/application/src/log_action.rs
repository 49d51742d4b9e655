use annalist_domain::LogCategory;

/// Mutating log-lifecycle action requested through the `action` query flag.
///
/// The flag rides on GET requests for wire compatibility with the panel's
/// existing URLs; unknown values are treated as no action at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogAction {
    /// Delete every entry in the category.
    Clear,
    /// Enforce retention on the category.
    Trim,
}

impl LogAction {
    /// Parses the raw `action` query value. Unknown values map to `None`.
    #[must_use]
    pub fn from_param(raw: Option<&str>) -> Option<Self> {
        match raw {
            Some("clear") => Some(Self::Clear),
            Some("trim") => Some(Self::Trim),
            _ => None,
        }
    }

    /// Returns the success notification shown after the action ran.
    #[must_use]
    pub fn notification(&self, category: LogCategory) -> String {
        match self {
            Self::Clear => format!("The {} has been cleared.", category.display_name()),
            Self::Trim => format!("The {} has been trimmed.", category.display_name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use annalist_domain::LogCategory;

    use super::LogAction;

    #[test]
    fn parses_known_actions() {
        assert_eq!(LogAction::from_param(Some("clear")), Some(LogAction::Clear));
        assert_eq!(LogAction::from_param(Some("trim")), Some(LogAction::Trim));
    }

    #[test]
    fn unknown_and_absent_values_mean_no_action() {
        assert_eq!(LogAction::from_param(Some("purge")), None);
        assert_eq!(LogAction::from_param(Some("")), None);
        assert_eq!(LogAction::from_param(None), None);
    }

    #[test]
    fn notifications_name_the_log() {
        assert_eq!(
            LogAction::Clear.notification(LogCategory::Change),
            "The change log has been cleared."
        );
        assert_eq!(
            LogAction::Trim.notification(LogCategory::System),
            "The system log has been trimmed."
        );
    }
}
