// The four buttons of the main screen

/// All actions the main screen offers, in button order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Currencies,
    Symbols,
    Prices,
    Exit,
}

impl Action {
    pub const ALL: [Action; 4] = [
        Action::Currencies,
        Action::Symbols,
        Action::Prices,
        Action::Exit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Action::Currencies => "List currencies",
            Action::Symbols => "Trading pairs",
            Action::Prices => "Current prices",
            Action::Exit => "Exit",
        }
    }

    /// Endpoint fetched by this action, `None` for Exit
    pub fn endpoint(&self) -> Option<&'static str> {
        match self {
            Action::Currencies => Some("/api/currencies"),
            Action::Symbols => Some("/api/symbols"),
            Action::Prices => Some("/api/prices"),
            Action::Exit => None,
        }
    }

    /// Parse the endpoint name used by `--fetch`
    pub fn from_name(name: &str) -> Option<Action> {
        match name.trim().to_ascii_lowercase().as_str() {
            "currencies" => Some(Action::Currencies),
            "symbols" | "pairs" => Some(Action::Symbols),
            "prices" => Some(Action::Prices),
            _ => None,
        }
    }
}
