use serenity::all::ReactionType;

/// Every input a navigation session understands. Anything else a user
/// reacts with is dropped before it reaches the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavAction {
    First,
    Previous,
    Next,
    Last,
    Stop,
    OverlayHelp,
    OverlayBotHelp,
}

impl NavAction {
    /// Display order of the reaction controls.
    pub const ALL: [NavAction; 7] = [
        NavAction::First,
        NavAction::Previous,
        NavAction::Next,
        NavAction::Last,
        NavAction::Stop,
        NavAction::OverlayHelp,
        NavAction::OverlayBotHelp,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            NavAction::First => "\u{23ee}",
            NavAction::Previous => "\u{25c0}",
            NavAction::Next => "\u{25b6}",
            NavAction::Last => "\u{23ed}",
            NavAction::Stop => "\u{23f9}",
            NavAction::OverlayHelp => "\u{2139}",
            NavAction::OverlayBotHelp => "\u{2754}",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        // clients may append the emoji presentation selector
        let symbol = symbol.trim_end_matches('\u{fe0f}');
        NavAction::ALL.into_iter().find(|a| a.symbol() == symbol)
    }

    pub fn from_reaction(emoji: &ReactionType) -> Option<Self> {
        match emoji {
            ReactionType::Unicode(symbol) => Self::from_symbol(symbol),
            _ => None,
        }
    }

    pub fn reaction(self) -> ReactionType {
        ReactionType::Unicode(self.symbol().to_string())
    }

    /// Line shown in the reaction legend overlay.
    pub fn describe(self) -> &'static str {
        match self {
            NavAction::First => "Goes to the first page",
            NavAction::Previous => "Goes to the previous page",
            NavAction::Next => "Goes to the next page",
            NavAction::Last => "Goes to the last page",
            NavAction::Stop => "Stops the interactive pagination session",
            NavAction::OverlayHelp => "Shows this message",
            NavAction::OverlayBotHelp => "Shows how to use the bot",
        }
    }

    /// Controls worth attaching for a layout of `page_count` pages. A single
    /// page gets none, and with two pages first/last would only duplicate
    /// previous/next.
    pub fn controls_for(page_count: usize) -> Vec<NavAction> {
        if page_count <= 1 {
            return Vec::new();
        }

        NavAction::ALL
            .into_iter()
            .filter(|a| page_count > 2 || !matches!(a, NavAction::First | NavAction::Last))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn every_symbol_maps_back_to_its_action() {
        for action in NavAction::ALL {
            assert_eq!(NavAction::from_symbol(action.symbol()), Some(action));
            assert_eq!(NavAction::from_reaction(&action.reaction()), Some(action));
        }
    }

    #[test]
    fn variation_selector_is_ignored() {
        assert_eq!(NavAction::from_symbol("\u{25b6}\u{fe0f}"), Some(NavAction::Next));
        assert_eq!(NavAction::from_symbol("\u{2139}\u{fe0f}"), Some(NavAction::OverlayHelp));
    }

    #[test]
    fn unrelated_reactions_are_not_actions() {
        assert_eq!(NavAction::from_symbol("\u{1f44d}"), None);
        assert_eq!(NavAction::from_symbol(""), None);
    }

    #[test]
    fn controls_depend_on_page_count() {
        assert!(NavAction::controls_for(1).is_empty());
        assert_eq!(
            NavAction::controls_for(2),
            vec![
                NavAction::Previous,
                NavAction::Next,
                NavAction::Stop,
                NavAction::OverlayHelp,
                NavAction::OverlayBotHelp,
            ]
        );
        assert_eq!(NavAction::controls_for(3), NavAction::ALL.to_vec());
    }
}
