use flames_core::result::FlamesResult;
use flames_core::validation::ValidationErrors;

/// Which of the two page views is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageView {
    /// Name entry form, no current result
    Idle,
    /// A result card is shown
    ResultShown,
}

/// Everything a front end needs to render the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageState {
    /// Result currently on display
    pub current: Option<FlamesResult>,
    /// Session history, most recent first
    pub history: Vec<FlamesResult>,
    /// A calculation is in flight
    pub is_loading: bool,
    /// The celebration flourish is up
    pub show_celebration: bool,
    /// Per-field messages from the last rejected submission
    pub field_errors: ValidationErrors,
}

impl PageState {
    pub fn view(&self) -> PageView {
        if self.current.is_some() {
            PageView::ResultShown
        } else {
            PageView::Idle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flames_core::result::RelationshipCategory;

    #[test]
    fn test_view_follows_current_result() {
        let mut state = PageState::default();
        assert_eq!(state.view(), PageView::Idle);

        state.current = Some(FlamesResult::unpersisted(
            "Alice",
            "Bob",
            RelationshipCategory::Friends,
        ));
        assert_eq!(state.view(), PageView::ResultShown);
    }
}
