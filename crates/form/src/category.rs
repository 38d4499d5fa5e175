use std::fmt;

/// The fixed set of categories the picker offers.
///
/// Operations loaded from the server may carry any string; only exact label
/// matches map onto a variant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Category {
    #[default]
    Food,
    Transport,
    Entertainment,
    Health,
    Clothing,
    Other,
    Salary,
    Gifts,
    Investments,
}

impl Category {
    /// Picker order.
    pub const ALL: [Category; 9] = [
        Category::Food,
        Category::Transport,
        Category::Entertainment,
        Category::Health,
        Category::Clothing,
        Category::Other,
        Category::Salary,
        Category::Gifts,
        Category::Investments,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Food => "Еда",
            Self::Transport => "Транспорт",
            Self::Entertainment => "Развлечения",
            Self::Health => "Здоровье",
            Self::Clothing => "Одежда",
            Self::Other => "Другое",
            Self::Salary => "Зарплата",
            Self::Gifts => "Подарки",
            Self::Investments => "Инвестиции",
        }
    }

    /// Exact, case-sensitive label lookup.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.label() == label)
    }

    fn position(self) -> usize {
        Self::ALL
            .iter()
            .position(|category| *category == self)
            .unwrap_or(0)
    }

    /// Next entry in picker order, wrapping around.
    pub fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    /// Previous entry in picker order, wrapping around.
    pub fn prev(self) -> Self {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
